//! Runtime configuration.
//!
//! Loaded from an optional YAML file named by `SENSORLINK_CONFIG`, then the
//! `LISTEN` environment variable overrides the listen address.

use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_listen_addr")]
    pub listen_addr: String,

    /// Upper bound on bytes read from a single connection.
    #[serde(default = "Config::default_read_buffer_size")]
    pub read_buffer_size: usize,

    /// How long a client gets to deliver its request before whatever has
    /// arrived is served as-is.
    #[serde(default = "Config::default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    #[serde(default)]
    pub sensor: SensorConfig,

    #[serde(default)]
    pub actuator: ActuatorConfig,
}

/// Where temperature readings come from.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorConfig {
    Fixed {
        #[serde(default = "SensorConfig::default_celsius")]
        celsius: f64,
    },
    ThermalZone {
        #[serde(default = "SensorConfig::default_thermal_zone")]
        path: PathBuf,
    },
}

/// Where LED commands go.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActuatorConfig {
    #[default]
    Log,
    SysfsGpio { path: PathBuf },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            read_buffer_size: Self::default_read_buffer_size(),
            read_timeout_ms: Self::default_read_timeout_ms(),
            sensor: SensorConfig::default(),
            actuator: ActuatorConfig::default(),
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig::Fixed {
            celsius: Self::default_celsius(),
        }
    }
}

impl SensorConfig {
    fn default_celsius() -> f64 {
        21.0
    }

    fn default_thermal_zone() -> PathBuf {
        PathBuf::from(DEFAULT_THERMAL_ZONE)
    }
}

impl Config {
    fn default_listen_addr() -> String {
        DEFAULT_LISTEN_ADDR.to_string()
    }

    fn default_read_buffer_size() -> usize {
        DEFAULT_READ_BUFFER_SIZE
    }

    fn default_read_timeout_ms() -> u64 {
        DEFAULT_READ_TIMEOUT_MS
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Loads configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` in place of the environment.
    pub fn load_from<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("SENSORLINK_CONFIG") {
            Some(path) => {
                let txt = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {path}"))?;
                Self::from_yaml(&txt).with_context(|| format!("parsing config file {path}"))?
            }
            None => Self::default(),
        };

        if let Some(addr) = lookup("LISTEN") {
            cfg.listen_addr = addr;
        }

        Ok(cfg)
    }

    /// Parses a YAML document, filling unset fields with defaults.
    pub fn from_yaml(txt: &str) -> anyhow::Result<Self> {
        let mut cfg: Config = if txt.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(txt)?
        };
        if cfg.read_buffer_size == 0 {
            cfg.read_buffer_size = Self::default_read_buffer_size();
        }
        if cfg.read_timeout_ms == 0 {
            cfg.read_timeout_ms = Self::default_read_timeout_ms();
        }
        if let SensorConfig::Fixed { celsius } = cfg.sensor {
            anyhow::ensure!(celsius.is_finite(), "sensor.celsius must be finite, got {celsius}");
        }
        Ok(cfg)
    }
}
