use sensorlink::config::{
    ActuatorConfig, Config, DEFAULT_LISTEN_ADDR, DEFAULT_READ_BUFFER_SIZE, DEFAULT_READ_TIMEOUT_MS,
    DEFAULT_THERMAL_ZONE, SensorConfig,
};
use std::collections::HashMap;
use std::path::PathBuf;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_config_defaults_without_env() {
    let cfg = Config::load_from(env(&[])).unwrap();

    assert_eq!(cfg.listen_addr, DEFAULT_LISTEN_ADDR);
    assert_eq!(cfg.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
    assert_eq!(cfg.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS);
    assert_eq!(cfg.sensor, SensorConfig::Fixed { celsius: 21.0 });
    assert_eq!(cfg.actuator, ActuatorConfig::Log);
}

#[test]
fn test_config_listen_from_env() {
    let cfg = Config::load_from(env(&[("LISTEN", "0.0.0.0:3000")])).unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
}

#[test]
fn test_config_from_yaml_full() {
    let cfg = Config::from_yaml(
        r#"
listen_addr: "0.0.0.0:80"
read_buffer_size: 2048
sensor:
  kind: thermal_zone
  path: /tmp/zone
actuator:
  kind: sysfs_gpio
  path: /sys/class/gpio/gpio17/value
"#,
    )
    .unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:80");
    assert_eq!(cfg.read_buffer_size, 2048);
    assert_eq!(
        cfg.sensor,
        SensorConfig::ThermalZone { path: PathBuf::from("/tmp/zone") }
    );
    assert_eq!(
        cfg.actuator,
        ActuatorConfig::SysfsGpio { path: PathBuf::from("/sys/class/gpio/gpio17/value") }
    );
}

#[test]
fn test_config_from_yaml_partial_uses_defaults() {
    let cfg = Config::from_yaml("sensor:\n  kind: thermal_zone\n").unwrap();

    assert_eq!(cfg.listen_addr, DEFAULT_LISTEN_ADDR);
    assert_eq!(
        cfg.sensor,
        SensorConfig::ThermalZone { path: PathBuf::from(DEFAULT_THERMAL_ZONE) }
    );

    let cfg = Config::from_yaml("sensor:\n  kind: fixed\n  celsius: 24.5512\n").unwrap();
    assert_eq!(cfg.sensor, SensorConfig::Fixed { celsius: 24.5512 });
}

#[test]
fn test_config_zero_buffer_falls_back() {
    let cfg = Config::from_yaml("read_buffer_size: 0\n").unwrap();
    assert_eq!(cfg.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
}

#[test]
fn test_config_read_timeout() {
    let cfg = Config::from_yaml("read_timeout_ms: 250\n").unwrap();
    assert_eq!(cfg.read_timeout(), std::time::Duration::from_millis(250));

    let cfg = Config::from_yaml("read_timeout_ms: 0\n").unwrap();
    assert_eq!(cfg.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS);
}

#[test]
fn test_config_rejects_non_finite_celsius() {
    for value in [".nan", ".inf", "-.inf"] {
        let yaml = format!("sensor:\n  kind: fixed\n  celsius: {value}\n");
        assert!(Config::from_yaml(&yaml).is_err(), "{value} accepted");
    }
}

#[test]
fn test_config_empty_yaml_is_default() {
    let cfg = Config::from_yaml("").unwrap();
    assert_eq!(cfg.listen_addr, DEFAULT_LISTEN_ADDR);
}

#[test]
fn test_config_rejects_unknown_kind() {
    assert!(Config::from_yaml("actuator:\n  kind: laser\n").is_err());
}

#[test]
fn test_config_file_then_env_override() {
    let dir = std::env::temp_dir().join(format!("sensorlink-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sensorlink.yaml");
    std::fs::write(&path, "listen_addr: \"10.0.0.5:8000\"\nread_buffer_size: 512\n").unwrap();
    let path_str = path.to_str().unwrap();

    let cfg = Config::load_from(env(&[("SENSORLINK_CONFIG", path_str)])).unwrap();
    assert_eq!(cfg.listen_addr, "10.0.0.5:8000");
    assert_eq!(cfg.read_buffer_size, 512);

    let cfg = Config::load_from(env(&[
        ("SENSORLINK_CONFIG", path_str),
        ("LISTEN", "127.0.0.1:9999"),
    ]))
    .unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:9999");
    assert_eq!(cfg.read_buffer_size, 512);
}

#[test]
fn test_config_missing_file_is_error() {
    let result = Config::load_from(env(&[("SENSORLINK_CONFIG", "/nonexistent/sensorlink.yaml")]));
    assert!(result.is_err());
}
