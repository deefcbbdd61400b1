//! Simulated axis hardware.
//!
//! Counts pulses into a physical carriage position and derives the limit
//! switch states from it, so homing and blocked moves can be exercised
//! without a board.

use super::pins::{AxisPins, PinError, PinPolarity};

/// In-memory [`AxisPins`] implementation.
#[derive(Debug, Clone, Default)]
pub struct SimulatedPins {
    /// Physical carriage position, moved by every pulse.
    carriage: i64,
    /// Switch asserted while `carriage <= min_at`.
    min_at: Option<i64>,
    /// Switch asserted while `carriage >= max_at`.
    max_at: Option<i64>,
    min_forced: bool,
    max_forced: bool,
    enabled: bool,
    forward: bool,
    pulses: u64,
    last_pulse_width_us: u32,
    configured: bool,
    fail_step: bool,
    polarity: PinPolarity,
}

impl SimulatedPins {
    /// Free-running carriage with no switches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Carriage at `carriage` with switches at the given physical positions.
    pub fn with_travel(carriage: i64, min_at: Option<i64>, max_at: Option<i64>) -> Self {
        Self {
            carriage,
            min_at,
            max_at,
            ..Self::default()
        }
    }

    /// Hold the minimum switch asserted regardless of carriage position.
    pub fn force_min(&mut self, asserted: bool) {
        self.min_forced = asserted;
    }

    /// Hold the maximum switch asserted regardless of carriage position.
    pub fn force_max(&mut self, asserted: bool) {
        self.max_forced = asserted;
    }

    /// Make every following pulse fail with [`PinError::Step`].
    pub fn fail_step(&mut self, fail: bool) {
        self.fail_step = fail;
    }

    /// Physical carriage position.
    pub fn carriage(&self) -> i64 {
        self.carriage
    }

    /// Number of STEP pulses emitted so far.
    pub fn pulses(&self) -> u64 {
        self.pulses
    }

    /// Width of the most recent pulse.
    pub fn last_pulse_width_us(&self) -> u32 {
        self.last_pulse_width_us
    }

    /// Level last written to ENABLE.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Level last written to DIR.
    pub fn forward(&self) -> bool {
        self.forward
    }

    /// Polarity last applied. Levels are modelled logically, so it has no
    /// other effect.
    pub fn polarity(&self) -> PinPolarity {
        self.polarity
    }

    /// `configure` has been called.
    pub fn configured(&self) -> bool {
        self.configured
    }

    fn min_state(&self) -> bool {
        self.min_forced || self.min_at.map_or(false, |at| self.carriage <= at)
    }

    fn max_state(&self) -> bool {
        self.max_forced || self.max_at.map_or(false, |at| self.carriage >= at)
    }
}

impl AxisPins for SimulatedPins {
    fn set_polarity(&mut self, polarity: PinPolarity) {
        self.polarity = polarity;
    }

    fn configure(&mut self) -> Result<(), PinError> {
        self.configured = true;
        self.enabled = false;
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), PinError> {
        self.enabled = enabled;
        Ok(())
    }

    fn set_direction(&mut self, forward: bool) -> Result<(), PinError> {
        self.forward = forward;
        Ok(())
    }

    fn pulse_step(&mut self, width_us: u32) -> Result<(), PinError> {
        if self.fail_step {
            return Err(PinError::Step);
        }
        self.pulses += 1;
        self.last_pulse_width_us = width_us;
        self.carriage += if self.forward { 1 } else { -1 };
        Ok(())
    }

    fn is_min_asserted(&mut self) -> Result<bool, PinError> {
        Ok(self.min_state())
    }

    fn is_max_asserted(&mut self) -> Result<bool, PinError> {
        Ok(self.max_state())
    }
}
