use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::device::{Actuator, DeviceSnapshot, LedState, TemperatureSensor};
use crate::http::connection::Connection;
use crate::router::Router;

/// Pause after a failed accept so a persistent error does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn run<S, A>(cfg: &Config, router: &Router, sensor: S, actuator: A) -> anyhow::Result<()>
where
    S: TemperatureSensor,
    A: Actuator,
{
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);

    serve(listener, cfg, router, sensor, actuator).await
}

/// Serves connections one at a time, forever.
///
/// The loop owns the LED state. Each connection sees a snapshot taken just
/// before it is served, and whatever command it returns is applied to the
/// state and the actuator before the next connection is accepted.
pub async fn serve<S, A>(
    listener: TcpListener,
    cfg: &Config,
    router: &Router,
    mut sensor: S,
    mut actuator: A,
) -> anyhow::Result<()>
where
    S: TemperatureSensor,
    A: Actuator,
{
    let mut led = LedState::default();

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Accept failed: {}", e);
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let snapshot = DeviceSnapshot {
            temperature: sensor.read_temperature(),
            led_on: led.is_on(),
        };

        let mut conn =
            Connection::new(socket, cfg.read_buffer_size).with_read_timeout(cfg.read_timeout());
        match conn.serve(router, &snapshot).await {
            Ok(command) => {
                if led.apply(command) {
                    tracing::debug!(led_on = led.is_on(), "LED state changed");
                }
                actuator.apply_actuator(command);
            }
            Err(e) => {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        }
    }
}
