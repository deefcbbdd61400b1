//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisConfig, MachineConfig};

/// Validate a machine configuration.
///
/// Checks:
/// - Move speeds are finite and positive
/// - Step pulses are at least one microsecond
/// - Steps per unit are finite and positive
/// - Axis display names are unique
pub fn validate_config(config: &MachineConfig) -> Result<()> {
    for (i, (_, axis)) in config.axes.iter().enumerate() {
        validate_axis(axis)?;

        let duplicate = config
            .axes
            .values()
            .skip(i + 1)
            .any(|other| other.name == axis.name);
        if duplicate {
            return Err(Error::Config(ConfigError::DuplicateAxisName(axis.name.clone())));
        }
    }

    Ok(())
}

pub(crate) fn validate_axis(config: &AxisConfig) -> Result<()> {
    let speed = config.move_speed.0;
    if !speed.is_finite() || speed <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidMoveSpeed(speed)));
    }

    if config.step_pulse_us == 0 {
        return Err(Error::Config(ConfigError::InvalidStepPulse(config.step_pulse_us)));
    }

    if !config.steps_per_unit.is_finite() || config.steps_per_unit <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerUnit(
            config.steps_per_unit,
        )));
    }

    Ok(())
}
