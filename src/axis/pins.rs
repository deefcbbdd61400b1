//! Hardware capability interface of one axis and its embedded-hal backend.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// GPIO line that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// STEP output
    Step,
    /// DIR output
    Direction,
    /// ENABLE output
    Enable,
    /// Minimum limit switch input
    MinSwitch,
    /// Maximum limit switch input
    MaxSwitch,
}

impl PinError {
    /// Short name of the failing line.
    pub fn line(&self) -> &'static str {
        match self {
            PinError::Step => "STEP",
            PinError::Direction => "DIR",
            PinError::Enable => "ENABLE",
            PinError::MinSwitch => "MIN",
            PinError::MaxSwitch => "MAX",
        }
    }
}

/// Everything an [`AxisController`](super::AxisController) needs from the hardware.
///
/// Implemented by [`GpioPins`] for real embedded-hal pins and by
/// [`SimulatedPins`](super::SimulatedPins) for deterministic tests.
pub trait AxisPins {
    /// Apply the electrical polarity of the lines.
    ///
    /// Called before [`configure`](Self::configure) when the axis is built
    /// from configuration.
    fn set_polarity(&mut self, polarity: PinPolarity);

    /// Put the lines in their idle state: STEP low, driver disabled.
    fn configure(&mut self) -> Result<(), PinError>;

    /// Drive the ENABLE line.
    fn set_enabled(&mut self, enabled: bool) -> Result<(), PinError>;

    /// Drive the DIR line, `true` meaning increasing position.
    fn set_direction(&mut self, forward: bool) -> Result<(), PinError>;

    /// Emit one STEP pulse of the given width.
    fn pulse_step(&mut self, width_us: u32) -> Result<(), PinError>;

    /// Minimum limit switch is asserted.
    fn is_min_asserted(&mut self) -> Result<bool, PinError>;

    /// Maximum limit switch is asserted.
    fn is_max_asserted(&mut self) -> Result<bool, PinError>;
}

/// Electrical polarity of an axis' lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinPolarity {
    /// Swap DIR levels.
    pub invert_direction: bool,
    /// Switches read LOW when asserted.
    pub switches_active_low: bool,
    /// Driver enabled by a LOW level.
    pub enable_active_low: bool,
}

impl Default for PinPolarity {
    fn default() -> Self {
        Self {
            invert_direction: false,
            switches_active_low: true,
            enable_active_low: true,
        }
    }
}

/// Placeholder for an absent line.
///
/// As an output it ignores writes, as an input it reads as never asserted
/// whatever the configured polarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl InputPin for NoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

/// Axis lines backed by embedded-hal 1.0 pins.
///
/// Generic over:
/// - `STEP`, `DIR`, `EN`: output pins (use [`NoPin`] for a hard-wired enable)
/// - `MIN`, `MAX`: limit switch inputs (use [`NoPin`] when there is no max switch)
/// - `DELAY`: delay provider timing the STEP pulse
pub struct GpioPins<STEP, DIR, EN, MIN, MAX, DELAY> {
    step: STEP,
    dir: DIR,
    enable: EN,
    min: MIN,
    max: MAX,
    delay: DELAY,
    polarity: PinPolarity,
}

impl<STEP, DIR, EN, MIN, MAX, DELAY> GpioPins<STEP, DIR, EN, MIN, MAX, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    MIN: InputPin,
    MAX: InputPin,
    DELAY: DelayNs,
{
    /// Bundle the pins of one axis with default polarity.
    pub fn new(step: STEP, dir: DIR, enable: EN, min: MIN, max: MAX, delay: DELAY) -> Self {
        Self {
            step,
            dir,
            enable,
            min,
            max,
            delay,
            polarity: PinPolarity::default(),
        }
    }

    /// Set the electrical polarity.
    pub fn with_polarity(mut self, polarity: PinPolarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Current polarity.
    pub fn polarity(&self) -> PinPolarity {
        self.polarity
    }

    /// Give the pins back.
    pub fn release(self) -> (STEP, DIR, EN, MIN, MAX, DELAY) {
        (self.step, self.dir, self.enable, self.min, self.max, self.delay)
    }
}

fn write_level<P: OutputPin>(pin: &mut P, high: bool, line: PinError) -> Result<(), PinError> {
    if high {
        pin.set_high().map_err(|_| line)
    } else {
        pin.set_low().map_err(|_| line)
    }
}

fn read_switch<P: InputPin>(pin: &mut P, active_low: bool, line: PinError) -> Result<bool, PinError> {
    if active_low {
        pin.is_low().map_err(|_| line)
    } else {
        pin.is_high().map_err(|_| line)
    }
}

impl<STEP, DIR, EN, MIN, MAX, DELAY> AxisPins for GpioPins<STEP, DIR, EN, MIN, MAX, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    MIN: InputPin,
    MAX: InputPin,
    DELAY: DelayNs,
{
    fn set_polarity(&mut self, polarity: PinPolarity) {
        self.polarity = polarity;
    }

    fn configure(&mut self) -> Result<(), PinError> {
        self.step.set_low().map_err(|_| PinError::Step)?;
        self.set_enabled(false)
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), PinError> {
        let high = enabled != self.polarity.enable_active_low;
        write_level(&mut self.enable, high, PinError::Enable)
    }

    fn set_direction(&mut self, forward: bool) -> Result<(), PinError> {
        let high = forward != self.polarity.invert_direction;
        write_level(&mut self.dir, high, PinError::Direction)
    }

    fn pulse_step(&mut self, width_us: u32) -> Result<(), PinError> {
        self.step.set_high().map_err(|_| PinError::Step)?;
        self.delay.delay_us(width_us);
        self.step.set_low().map_err(|_| PinError::Step)
    }

    fn is_min_asserted(&mut self) -> Result<bool, PinError> {
        read_switch(&mut self.min, self.polarity.switches_active_low, PinError::MinSwitch)
    }

    fn is_max_asserted(&mut self) -> Result<bool, PinError> {
        read_switch(&mut self.max, self.polarity.switches_active_low, PinError::MaxSwitch)
    }
}
