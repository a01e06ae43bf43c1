use sensorlink::config::Config;
use sensorlink::{device, handlers, server};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let router = handlers::default_router();
    let sensor = device::sensor_from_config(&cfg.sensor);
    let actuator = device::actuator_from_config(&cfg.actuator);

    tokio::select! {
        res = server::listener::run(&cfg, &router, sensor, actuator) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
