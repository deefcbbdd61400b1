//! Unit tests for TOML configuration parsing.

use gantry_motion::config::{load_config, parse_config, MachineConfig};
use gantry_motion::error::{ConfigError, Error};
use gantry_motion::StepsPerSec;

/// Test parsing a full two-axis configuration from TOML.
#[test]
fn test_parse_axis_config() {
    let toml_str = r#"
[machine]
move_timeout_ms = 12000

[axes.x]
name = "Gantry X"
move_speed_steps_per_sec = 1200.0
step_pulse_us = 2
steps_per_unit = 80.0
invert_direction = true
switches_active_low = false
enable_active_low = false

[axes.y]
name = "Gantry Y"
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let x = config.axis("x").expect("Axis not found");

    assert_eq!(x.name.as_str(), "Gantry X");
    assert_eq!(x.move_speed, StepsPerSec(1200.0));
    assert_eq!(x.step_pulse_us, 2);
    assert_eq!(x.steps_per_unit, 80.0);

    let polarity = x.polarity();
    assert!(polarity.invert_direction);
    assert!(!polarity.switches_active_low);
    assert!(!polarity.enable_active_low);

    assert_eq!(config.machine.move_timeout_ms, 12000);
    // Unset deadline keeps its default
    assert_eq!(config.machine.home_timeout_ms, 30000);
}

/// Test that omitted axis fields take their defaults.
#[test]
fn test_axis_defaults() {
    let toml_str = r#"
[axes.y]
name = "Y"
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let y = config.axis("y").expect("Axis not found");

    assert_eq!(y.move_speed, StepsPerSec(500.0));
    assert_eq!(y.step_pulse_us, 1);
    assert_eq!(y.steps_per_unit, 1.0);
    assert!(!y.invert_direction);
    assert!(y.switches_active_low);
    assert!(y.enable_active_low);
}

/// Test that axis keys keep their file order.
#[test]
fn test_axis_keys_in_order() {
    let toml_str = r#"
[axes.y]
name = "Y"

[axes.x]
name = "X"
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let keys: Vec<_> = config.axis_keys().collect();
    assert_eq!(keys, ["y", "x"]);
}

/// Test that an axis without a name is rejected during parsing.
#[test]
fn test_missing_name_rejected() {
    let toml_str = r#"
[axes.x]
move_speed_steps_per_sec = 100.0
"#;

    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test loading a configuration file from disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("gantry_motion_load_test.toml");
    std::fs::write(&path, "[axes.x]\nname = \"X\"\n").expect("Failed to write config");

    let config = load_config(&path).expect("Failed to load config");
    assert!(config.axis("x").is_some());

    let _ = std::fs::remove_file(&path);
}
