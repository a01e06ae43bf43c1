//! Built-in routes.

use serde_json::json;

use crate::device::{ActuatorCommand, DeviceSnapshot};
use crate::http::body::decode_state;
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::router::Router;

const INDEX_BODY: &str = "\
Available routes:
GET  /        this listing
GET  /temp    current temperature in degrees Celsius
POST /led     set the LED (state=0|1, JSON {\"state\": 0|1}, or plain 0|1)
GET  /status  JSON temperature and LED state
";

pub fn default_router() -> Router {
    Router::new()
        .route(Method::GET, "/", index)
        .route(Method::GET, "/temp", temperature)
        .route(Method::POST, "/led", led)
        .route(Method::GET, "/status", status)
}

pub fn index(_req: &Request, _snapshot: &DeviceSnapshot) -> (Response, ActuatorCommand) {
    (Response::ok(INDEX_BODY), ActuatorCommand::NoChange)
}

/// Sensor reads never touch the LED.
pub fn temperature(_req: &Request, snapshot: &DeviceSnapshot) -> (Response, ActuatorCommand) {
    let body = format!("{:.2}\n", snapshot.temperature);
    (Response::ok(body), ActuatorCommand::NoChange)
}

pub fn led(req: &Request, _snapshot: &DeviceSnapshot) -> (Response, ActuatorCommand) {
    match decode_state(&req.body, req.content_type()) {
        Some(on) => {
            let body = if on { "LED ON\n" } else { "LED OFF\n" };
            (Response::ok(body), ActuatorCommand::from_state(on))
        }
        None => (
            Response::bad_request("expected state 0 or 1"),
            ActuatorCommand::NoChange,
        ),
    }
}

pub fn status(_req: &Request, snapshot: &DeviceSnapshot) -> (Response, ActuatorCommand) {
    let payload = json!({
        "temperature": snapshot.temperature,
        "led_on": snapshot.led_on,
    });
    (Response::json(&payload), ActuatorCommand::NoChange)
}
