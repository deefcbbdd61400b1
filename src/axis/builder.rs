//! Builder pattern for AxisController.

use crate::config::units::StepsPerSec;
use crate::config::{AxisConfig, MachineConfig};
use crate::error::{ConfigError, Error, Result};

use super::controller::{AxisController, DEFAULT_MOVE_SPEED, DEFAULT_STEP_PULSE_US};
use super::pins::{AxisPins, PinPolarity};

/// Builder for creating AxisController instances.
pub struct AxisControllerBuilder<P: AxisPins> {
    pins: Option<P>,
    name: Option<heapless::String<32>>,
    move_speed: StepsPerSec,
    step_pulse_us: u32,
    polarity: Option<PinPolarity>,
}

impl<P: AxisPins> Default for AxisControllerBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: AxisPins> AxisControllerBuilder<P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pins: None,
            name: None,
            move_speed: DEFAULT_MOVE_SPEED,
            step_pulse_us: DEFAULT_STEP_PULSE_US,
            polarity: None,
        }
    }

    /// Set the hardware lines.
    pub fn pins(mut self, pins: P) -> Self {
        self.pins = Some(pins);
        self
    }

    /// Set the axis name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set the speed for automatic moves and homing.
    pub fn move_speed(mut self, speed: StepsPerSec) -> Self {
        self.move_speed = speed;
        self
    }

    /// Set the STEP pulse width in microseconds.
    pub fn step_pulse_us(mut self, width_us: u32) -> Self {
        self.step_pulse_us = width_us;
        self
    }

    /// Override the polarity of the pins.
    ///
    /// Without it the pins keep whatever polarity they were created with.
    pub fn polarity(mut self, polarity: PinPolarity) -> Self {
        self.polarity = Some(polarity);
        self
    }

    /// Configure from an AxisConfig, including the pin polarity.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        self.name = Some(config.name.clone());
        self.move_speed = config.move_speed;
        self.step_pulse_us = config.step_pulse_us;
        self.polarity = Some(config.polarity());
        self
    }

    /// Configure from MachineConfig by axis key.
    pub fn from_config(self, config: &MachineConfig, key: &str) -> Result<Self> {
        let axis_config = config.axis(key).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                heapless::String::try_from(key).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_axis_config(axis_config))
    }

    /// Build the AxisController.
    ///
    /// # Errors
    ///
    /// Returns an error if the pins were not provided.
    pub fn build(self) -> Result<AxisController<P>> {
        let mut pins = self
            .pins
            .ok_or(Error::Config(ConfigError::MissingField("pins")))?;
        if let Some(polarity) = self.polarity {
            pins.set_polarity(polarity);
        }

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("axis").unwrap_or_default());

        Ok(AxisController::from_parts(
            pins,
            name,
            self.move_speed,
            self.step_pulse_us,
        ))
    }
}

impl<P: AxisPins> AxisController<P> {
    /// Create a builder for an axis.
    pub fn builder() -> AxisControllerBuilder<P> {
        AxisControllerBuilder::new()
    }
}
