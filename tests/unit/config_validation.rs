//! Unit tests for configuration validation.

use gantry_motion::config::{validate_config, MachineConfig};
use gantry_motion::error::{ConfigError, Error};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
[axes.x]
name = "X"
move_speed_steps_per_sec = 900.0
steps_per_unit = 40.0

[axes.y]
name = "Y"
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for two axes sharing a display name.
#[test]
fn test_duplicate_axis_name() {
    let toml_str = r#"
[axes.x]
name = "Axis"

[axes.y]
name = "Axis"
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::DuplicateAxisName(ref name))) if name.as_str() == "Axis"
    ));
}

/// Test validation fails for a negative move speed.
#[test]
fn test_invalid_move_speed() {
    let toml_str = r#"
[axes.x]
name = "X"
move_speed_steps_per_sec = -100.0
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidMoveSpeed(_)))
    ));
}

/// Test validation fails for a zero-width step pulse.
#[test]
fn test_invalid_step_pulse() {
    let toml_str = r#"
[axes.x]
name = "X"
step_pulse_us = 0
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStepPulse(0)))
    ));
}

/// Test validation fails for a non-positive coordinate scale.
#[test]
fn test_invalid_steps_per_unit() {
    let toml_str = r#"
[axes.y]
name = "Y"
steps_per_unit = 0.0
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_err());
}

/// Test that empty configuration is valid.
#[test]
fn test_empty_config_is_valid() {
    let config = MachineConfig::default();
    assert!(validate_config(&config).is_ok());
}
