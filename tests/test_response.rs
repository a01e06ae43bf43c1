use sensorlink::http::response::{Response, ResponseBuilder, StatusCode, TEXT_PLAIN};
use sensorlink::http::writer::serialize_response;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::MethodNotAllowed.reason_phrase(),
        "Method Not Allowed"
    );
}

#[test]
fn test_response_builder_fills_default_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello".to_vec())
        .build();

    assert_eq!(response.headers.len(), 3);
    assert_eq!(response.header("content-type"), Some(TEXT_PLAIN));
    assert_eq!(response.header("Content-Length"), Some("5"));
    assert_eq!(response.header("Connection"), Some("close"));
}

#[test]
fn test_response_builder_keeps_explicit_content_type() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .content_type("application/json")
        .body("{}")
        .build();

    assert_eq!(response.header("Content-Type"), Some("application/json"));
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::Ok).build();

    assert!(response.body.is_empty());
    assert_eq!(response.header("Content-Length"), Some("0"));
}

#[test]
fn test_response_ok_helper() {
    let response = Response::ok("24.55\n");

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"24.55\n".to_vec());
}

#[test]
fn test_response_json_helper() {
    let response = Response::json(&serde_json::json!({ "led_on": true }));

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Type"), Some("application/json"));
    assert_eq!(response.body, br#"{"led_on":true}"#.to_vec());
}

#[test]
fn test_response_error_helpers() {
    let response = Response::not_found();
    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, b"404 Not Found".to_vec());

    let response = Response::bad_request("expected state 0 or 1");
    assert_eq!(response.status, StatusCode::BadRequest);
    assert!(String::from_utf8_lossy(&response.body).contains("expected state 0 or 1"));

    let response = Response::method_not_allowed("GET");
    assert_eq!(response.status, StatusCode::MethodNotAllowed);
    assert_eq!(response.header("Allow"), Some("GET"));
}

#[test]
fn test_serialized_response_is_well_framed() {
    let response = Response::ok("LED ON\n");
    let wire = String::from_utf8(serialize_response(&response)).unwrap();

    let (head, body) = wire.split_once("\r\n\r\n").unwrap();
    let mut lines = head.split("\r\n");

    assert_eq!(lines.next(), Some("HTTP/1.1 200 OK"));
    let headers: Vec<_> = lines.collect();
    assert!(headers.contains(&"Connection: close"));
    assert!(headers.contains(&"Content-Length: 7"));
    assert!(headers.iter().any(|h| h.starts_with("Content-Type: text/plain")));
    assert_eq!(body, "LED ON\n");
}
