//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::axis::PinPolarity;

use super::units::StepsPerSec;

/// Complete configuration of one stepper axis.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Speed used by automatic moves and homing.
    #[serde(default = "default_move_speed", rename = "move_speed_steps_per_sec")]
    pub move_speed: StepsPerSec,

    /// Width of the STEP pulse in microseconds.
    #[serde(default = "default_step_pulse_us")]
    pub step_pulse_us: u32,

    /// Steps per machine unit, applied to G-code X/Y coordinates.
    #[serde(default = "default_steps_per_unit")]
    pub steps_per_unit: f32,

    /// Invert DIR pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Limit switches read LOW when asserted (pull-up wiring).
    #[serde(default = "default_true")]
    pub switches_active_low: bool,

    /// Driver is enabled by pulling ENABLE low.
    #[serde(default = "default_true")]
    pub enable_active_low: bool,
}

fn default_move_speed() -> StepsPerSec {
    StepsPerSec(500.0)
}

fn default_step_pulse_us() -> u32 {
    1
}

fn default_steps_per_unit() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

impl AxisConfig {
    /// Create a configuration with defaults for everything but the name.
    pub fn named(name: &str) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            move_speed: default_move_speed(),
            step_pulse_us: default_step_pulse_us(),
            steps_per_unit: default_steps_per_unit(),
            invert_direction: false,
            switches_active_low: true,
            enable_active_low: true,
        }
    }

    /// Electrical polarity of the axis' GPIO lines.
    pub fn polarity(&self) -> PinPolarity {
        PinPolarity {
            invert_direction: self.invert_direction,
            switches_active_low: self.switches_active_low,
            enable_active_low: self.enable_active_low,
        }
    }
}
