//! Device collaborators: the temperature sensor and the LED actuator.
//!
//! The HTTP core never calls into these. The dispatch loop samples the
//! sensor before serving a connection and applies the returned
//! [`ActuatorCommand`] after the response has been sent.

use std::path::PathBuf;

use crate::config::{ActuatorConfig, SensorConfig};

/// Desired change to the LED, produced by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCommand {
    On,
    Off,
    NoChange,
}

impl ActuatorCommand {
    pub fn from_state(on: bool) -> Self {
        if on { ActuatorCommand::On } else { ActuatorCommand::Off }
    }
}

/// What a handler is allowed to know about the device for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSnapshot {
    pub temperature: f64,
    pub led_on: bool,
}

/// Last LED state applied by the dispatch loop. Starts off.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LedState {
    on: bool,
}

impl LedState {
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Applies `cmd`, returning whether the state changed.
    pub fn apply(&mut self, cmd: ActuatorCommand) -> bool {
        let next = match cmd {
            ActuatorCommand::On => true,
            ActuatorCommand::Off => false,
            ActuatorCommand::NoChange => return false,
        };
        let changed = self.on != next;
        self.on = next;
        changed
    }
}

pub trait TemperatureSensor {
    /// Current temperature in degrees Celsius.
    fn read_temperature(&mut self) -> f64;
}

pub trait Actuator {
    fn apply_actuator(&mut self, command: ActuatorCommand);
}

/// Always reports the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedSensor(pub f64);

impl TemperatureSensor for FixedSensor {
    fn read_temperature(&mut self) -> f64 {
        self.0
    }
}

/// Reads a Linux thermal zone file.
///
/// The kernel reports millidegrees as an integer; a value with a decimal
/// point is taken as degrees. A failed or non-finite read falls back to the
/// last good value.
#[derive(Debug)]
pub struct ThermalZoneSensor {
    path: PathBuf,
    last: f64,
}

impl ThermalZoneSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last: 0.0,
        }
    }

    fn sample(&self) -> anyhow::Result<f64> {
        let raw = std::fs::read_to_string(&self.path)?;
        let raw = raw.trim();
        let celsius = if raw.contains('.') {
            raw.parse::<f64>()?
        } else {
            raw.parse::<i64>()? as f64 / 1000.0
        };
        anyhow::ensure!(celsius.is_finite(), "non-finite reading {raw:?}");
        Ok(celsius)
    }
}

impl TemperatureSensor for ThermalZoneSensor {
    fn read_temperature(&mut self) -> f64 {
        match self.sample() {
            Ok(celsius) => self.last = celsius,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Thermal zone read failed, reusing last reading"
                );
            }
        }
        self.last
    }
}

/// Logs LED transitions instead of driving a pin.
#[derive(Debug, Default)]
pub struct LogActuator {
    state: LedState,
}

impl Actuator for LogActuator {
    fn apply_actuator(&mut self, command: ActuatorCommand) {
        if self.state.apply(command) {
            tracing::info!(led_on = self.state.is_on(), "LED switched");
        }
    }
}

/// Drives a GPIO through its sysfs `value` file.
#[derive(Debug)]
pub struct SysfsGpioActuator {
    path: PathBuf,
}

impl SysfsGpioActuator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Actuator for SysfsGpioActuator {
    fn apply_actuator(&mut self, command: ActuatorCommand) {
        let value: &[u8] = match command {
            ActuatorCommand::On => b"1",
            ActuatorCommand::Off => b"0",
            ActuatorCommand::NoChange => return,
        };
        if let Err(e) = std::fs::write(&self.path, value) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to write GPIO value"
            );
        }
    }
}

pub fn sensor_from_config(cfg: &SensorConfig) -> Box<dyn TemperatureSensor> {
    match cfg {
        SensorConfig::Fixed { celsius } => Box::new(FixedSensor(*celsius)),
        SensorConfig::ThermalZone { path } => Box::new(ThermalZoneSensor::new(path.clone())),
    }
}

pub fn actuator_from_config(cfg: &ActuatorConfig) -> Box<dyn Actuator> {
    match cfg {
        ActuatorConfig::Log => Box::new(LogActuator::default()),
        ActuatorConfig::SysfsGpio { path } => Box::new(SysfsGpioActuator::new(path.clone())),
    }
}

impl<T: TemperatureSensor + ?Sized> TemperatureSensor for Box<T> {
    fn read_temperature(&mut self) -> f64 {
        (**self).read_temperature()
    }
}

impl<T: Actuator + ?Sized> Actuator for Box<T> {
    fn apply_actuator(&mut self, command: ActuatorCommand) {
        (**self).apply_actuator(command)
    }
}
