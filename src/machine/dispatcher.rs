//! Two-axis command dispatcher.
//!
//! Routes interpreted G-code to the X and Y axis controllers and keeps the
//! logical position that partially specified moves fall back on.

use core::fmt;

use crate::axis::{elapsed_ms, AxisController, AxisPins, Clock};
use crate::config::units::{Steps, StepsPerSec};
use crate::config::{validate_config, MachineConfig, MotionSettings};
use crate::error::{ConfigError, Error, MotionError, MotorError, Result};
use crate::gcode::{parse_line, MotionCommand};
use crate::protocol::{write_error, write_report};

use super::report::{Report, StepPoint};

/// Axis key of the X axis in [`MachineConfig::axes`].
pub const X_AXIS_KEY: &str = "x";

/// Axis key of the Y axis in [`MachineConfig::axes`].
pub const Y_AXIS_KEY: &str = "y";

/// A gantry with an X and a Y axis.
///
/// Moves drive both axes in one polling loop, each at its own move speed.
/// This is not interpolation: axes travelling different distances arrive
/// at different times.
///
/// # Example
///
/// ```rust
/// use gantry_motion::axis::{AxisController, SimClock, SimulatedPins};
/// use gantry_motion::config::MotionSettings;
/// use gantry_motion::machine::Machine;
///
/// let x = AxisController::new(SimulatedPins::with_travel(10, Some(0), None));
/// let y = AxisController::new(SimulatedPins::with_travel(10, Some(0), None));
/// let mut machine = Machine::new(x, y, MotionSettings::default());
/// let mut clock = SimClock::new(100);
///
/// machine.initialize().unwrap();
/// let mut out = String::new();
/// machine.handle_line("G28", &mut clock, &mut out).unwrap();
/// machine.handle_line("G0 X20 Y5", &mut clock, &mut out).unwrap();
/// assert!(out.ends_with("Pos: X20 Y5\nOK\n"));
/// ```
pub struct Machine<PX: AxisPins, PY: AxisPins> {
    x: AxisController<PX>,
    y: AxisController<PY>,
    /// Last commanded target, in steps.
    logical: StepPoint,
    settings: MotionSettings,
    x_steps_per_unit: f32,
    y_steps_per_unit: f32,
}

impl<PX: AxisPins, PY: AxisPins> Machine<PX, PY> {
    /// Combine two controllers. G-code coordinates are taken as steps.
    pub fn new(x: AxisController<PX>, y: AxisController<PY>, settings: MotionSettings) -> Self {
        Self {
            x,
            y,
            logical: StepPoint::default(),
            settings,
            x_steps_per_unit: 1.0,
            y_steps_per_unit: 1.0,
        }
    }

    /// Build both axes from configuration keys `x` and `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or lacks either key.
    pub fn from_config(config: &MachineConfig, x_pins: PX, y_pins: PY) -> Result<Self> {
        validate_config(config)?;

        let x_config = config.axis(X_AXIS_KEY).ok_or_else(|| axis_not_found(X_AXIS_KEY))?;
        let y_config = config.axis(Y_AXIS_KEY).ok_or_else(|| axis_not_found(Y_AXIS_KEY))?;

        let x = AxisController::builder()
            .pins(x_pins)
            .from_axis_config(x_config)
            .build()?;
        let y = AxisController::builder()
            .pins(y_pins)
            .from_axis_config(y_config)
            .build()?;

        Ok(Self::new(x, y, config.machine)
            .with_steps_per_unit(x_config.steps_per_unit, y_config.steps_per_unit))
    }

    /// Set the coordinate scale of each axis.
    pub fn with_steps_per_unit(mut self, x: f32, y: f32) -> Self {
        self.x_steps_per_unit = x;
        self.y_steps_per_unit = y;
        self
    }

    /// Initialize and enable both axes.
    pub fn initialize(&mut self) -> Result<()> {
        self.x.initialize()?;
        self.y.initialize()?;
        self.x.set_enabled(true)?;
        self.y.set_enabled(true)?;
        info!("machine ready");
        Ok(())
    }

    /// Stop and disable both axes.
    pub fn teardown(&mut self) -> Result<()> {
        let x = self.x.teardown();
        let y = self.y.teardown();
        x.and(y)
    }

    /// Carry out one command.
    ///
    /// Blocking: returns when the motion has finished or failed. On
    /// failure both axes are stopped and the logical position follows the
    /// positions actually reached.
    pub fn execute<C: Clock>(&mut self, command: &MotionCommand, clock: &mut C) -> Result<Report> {
        debug!("executing {}", command.code());
        match *command {
            MotionCommand::Home => {
                self.home(clock)?;
                Ok(Report::Homed)
            }
            MotionCommand::RapidMove { x, y } => self.move_to(command, x, y, clock),
            MotionCommand::LinearMove { x, y, feed } => {
                if let Some(feed) = feed {
                    let speed = StepsPerSec(feed as f32);
                    self.x.set_move_speed(speed);
                    self.y.set_move_speed(speed);
                }
                self.move_to(command, x, y, clock)
            }
            MotionCommand::SpindleControl { speed } => Ok(Report::Spindle { speed }),
        }
    }

    /// Parse, execute and acknowledge one protocol line.
    ///
    /// Writes `CMD:`/`Pos:`/`OK` lines on success and a single `ERR:` line
    /// on failure. Only errors of the sink itself are returned.
    pub fn handle_line<C: Clock, W: fmt::Write>(
        &mut self,
        line: &str,
        clock: &mut C,
        out: &mut W,
    ) -> fmt::Result {
        let outcome = parse_line(line)
            .map_err(Error::from)
            .and_then(|command| self.execute(&command, clock));

        match outcome {
            Ok(report) => write_report(out, &report),
            Err(e) => {
                warn!("line rejected");
                write_error(out, &e)
            }
        }
    }

    /// Last commanded target in steps.
    pub fn logical_position(&self) -> StepPoint {
        self.logical
    }

    /// Positions reported by the axis controllers.
    pub fn position(&self) -> StepPoint {
        StepPoint {
            x: self.x.position(),
            y: self.y.position(),
        }
    }

    /// Blocking deadlines in use.
    pub fn settings(&self) -> MotionSettings {
        self.settings
    }

    /// Borrow the X axis.
    pub fn x(&self) -> &AxisController<PX> {
        &self.x
    }

    /// Mutably borrow the X axis.
    pub fn x_mut(&mut self) -> &mut AxisController<PX> {
        &mut self.x
    }

    /// Borrow the Y axis.
    pub fn y(&self) -> &AxisController<PY> {
        &self.y
    }

    /// Mutably borrow the Y axis.
    pub fn y_mut(&mut self) -> &mut AxisController<PY> {
        &mut self.y
    }

    /// Give both controllers back.
    pub fn into_axes(self) -> (AxisController<PX>, AxisController<PY>) {
        (self.x, self.y)
    }

    fn home<C: Clock>(&mut self, clock: &mut C) -> Result<()> {
        let timeout_ms = self.settings.home_timeout_ms;
        self.x.home_blocking(timeout_ms, clock)?;
        self.y.home_blocking(timeout_ms, clock)?;
        self.logical = StepPoint::default();
        Ok(())
    }

    fn move_to<C: Clock>(
        &mut self,
        command: &MotionCommand,
        x: Option<f64>,
        y: Option<f64>,
        clock: &mut C,
    ) -> Result<Report> {
        let target = StepPoint {
            x: x.map_or(self.logical.x, |v| Steps::from_units_rounded(v, self.x_steps_per_unit)),
            y: y.map_or(self.logical.y, |v| Steps::from_units_rounded(v, self.y_steps_per_unit)),
        };

        let result = self.run_synchronized(target, clock);
        self.logical = self.position();
        result?;

        Ok(Report::Moved {
            command: *command,
            target,
            position: self.logical,
        })
    }

    /// Start both axes and poll them together until both arrive.
    fn run_synchronized<C: Clock>(&mut self, target: StepPoint, clock: &mut C) -> Result<()> {
        if !self.x.is_enabled() || !self.y.is_enabled() {
            return Err(MotorError::Disabled.into());
        }

        self.x.move_to(target.x);
        self.y.move_to(target.y);

        let start_us = clock.now_us();
        let timeout_ms = self.settings.move_timeout_ms;
        loop {
            if !self.x.is_auto_move() && !self.y.is_auto_move() {
                break;
            }

            let now_us = clock.now_us();
            let elapsed = elapsed_ms(start_us, now_us);
            if elapsed >= timeout_ms {
                self.stop_all();
                warn!("move timed out after {} ms", elapsed);
                return Err(MotionError::Timeout { elapsed_ms: elapsed }.into());
            }

            if let Err(e) = self.update_all(now_us) {
                self.stop_all();
                return Err(e);
            }
            clock.idle();
        }

        for (position, target) in [
            (self.x.position(), target.x),
            (self.y.position(), target.y),
        ] {
            if position != target {
                return Err(MotionError::Blocked {
                    position: position.0,
                    target: target.0,
                }
                .into());
            }
        }
        Ok(())
    }

    fn update_all(&mut self, now_us: u64) -> Result<()> {
        self.x.update(now_us)?;
        self.y.update(now_us)?;
        Ok(())
    }

    fn stop_all(&mut self) {
        self.x.stop();
        self.y.stop();
    }
}

fn axis_not_found(key: &str) -> Error {
    Error::Config(ConfigError::AxisNotFound(
        heapless::String::try_from(key).unwrap_or_default(),
    ))
}
