//! Non-blocking stepper axis controller.
//!
//! Generic over the [`AxisPins`] capability so the same logic drives real
//! GPIO and the simulated backend.

use crate::config::units::{Steps, StepsPerSec};
use crate::error::{MotionError, MotorError, Result};

use super::clock::{elapsed_ms, Clock};
use super::pins::AxisPins;
use super::state::{Direction, MotionMode, Tick};

/// Default speed for automatic moves and homing.
pub const DEFAULT_MOVE_SPEED: StepsPerSec = StepsPerSec(500.0);

/// Default STEP pulse width in microseconds.
pub const DEFAULT_STEP_PULSE_US: u32 = 1;

/// One stepper axis: position tracking, limit-gated stepping, automatic
/// moves and homing.
///
/// All motion is produced by [`update`](Self::update), which emits at most
/// one step per call. The blocking operations are bounded busy-poll loops
/// over `update` driven by an injected [`Clock`].
pub struct AxisController<P: AxisPins> {
    /// Hardware lines.
    pins: P,

    /// Axis name for logging/debugging.
    name: heapless::String<32>,

    /// Absolute position, changed only by steps or explicit resets.
    position: Steps,

    /// Target of the current or last automatic move.
    target: Steps,

    /// Signed commanded speed.
    velocity: StepsPerSec,

    /// Magnitude used by automatic moves and homing.
    move_speed: StepsPerSec,

    enabled: bool,

    /// Velocity is recomputed toward `target` every update.
    auto_move: bool,

    /// Direction used by `step_once`.
    direction: Direction,

    /// Level last written to DIR (cached to avoid unnecessary pin writes).
    dir_line: Option<bool>,

    /// Time of the last emitted step, `None` before the first update.
    last_step_us: Option<u64>,

    step_pulse_us: u32,
}

impl<P: AxisPins> AxisController<P> {
    /// Create a controller with default speed and pulse width.
    ///
    /// Call [`initialize`](Self::initialize) before use.
    pub fn new(pins: P) -> Self {
        Self::from_parts(
            pins,
            heapless::String::try_from("axis").unwrap_or_default(),
            DEFAULT_MOVE_SPEED,
            DEFAULT_STEP_PULSE_US,
        )
    }

    pub(crate) fn from_parts(
        pins: P,
        name: heapless::String<32>,
        move_speed: StepsPerSec,
        step_pulse_us: u32,
    ) -> Self {
        Self {
            pins,
            name,
            position: Steps(0),
            target: Steps(0),
            velocity: StepsPerSec(0.0),
            move_speed: move_speed.abs(),
            enabled: false,
            auto_move: false,
            direction: Direction::Forward,
            dir_line: None,
            last_step_us: None,
            step_pulse_us,
        }
    }

    /// Configure the lines and leave the driver disabled.
    ///
    /// Safe to call repeatedly.
    pub fn initialize(&mut self) -> Result<()> {
        self.pins.configure()?;
        self.enabled = false;
        self.dir_line = None;
        info!("axis {} initialized", self.name.as_str());
        Ok(())
    }

    /// Stop and disable the driver.
    pub fn teardown(&mut self) -> Result<()> {
        self.stop();
        self.set_enabled(false)
    }

    /// Gate step emission. Disabling keeps the pending target.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.pins.set_enabled(enabled)?;
        if self.enabled != enabled {
            debug!("axis {} enabled={}", self.name.as_str(), enabled);
        }
        self.enabled = enabled;
        Ok(())
    }

    /// Set the direction used by [`step_once`](Self::step_once).
    ///
    /// Automatic moves ignore it.
    pub fn set_direction(&mut self, forward: bool) -> Result<()> {
        self.direction = Direction::from_forward(forward);
        self.write_direction(forward)
    }

    /// Try to take exactly one step in the manual direction.
    ///
    /// Returns `Ok(false)` without touching any state when disabled or when
    /// the limit switch in that direction is asserted.
    pub fn step_once(&mut self) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }
        let direction = self.direction;
        if !self.can_step(direction)? {
            return Ok(false);
        }
        self.emit_step(direction)?;
        Ok(true)
    }

    /// Run continuously at a signed speed, cancelling any automatic move.
    ///
    /// Zero halts stepping.
    pub fn set_velocity(&mut self, velocity: StepsPerSec) {
        self.velocity = velocity;
        self.auto_move = false;
    }

    /// Speed magnitude for subsequent automatic moves and homing.
    ///
    /// The sign is discarded.
    pub fn set_move_speed(&mut self, speed: StepsPerSec) {
        self.move_speed = speed.abs();
    }

    /// Set the STEP pulse width in microseconds.
    pub fn set_step_pulse_us(&mut self, width_us: u32) {
        self.step_pulse_us = width_us;
    }

    /// Overwrite the position counter (calibration).
    pub fn set_position(&mut self, position: Steps) {
        self.position = position;
    }

    /// Start an automatic move toward `target`.
    ///
    /// When already on target the axis stops and no step follows.
    pub fn move_to(&mut self, target: Steps) {
        self.target = target;
        if target == self.position {
            self.stop();
            return;
        }
        self.auto_move = true;
        self.velocity = self.velocity_toward_target();
        debug!(
            "axis {} moving {} -> {}",
            self.name.as_str(),
            self.position.0,
            target.0
        );
    }

    /// Zero velocity and leave automatic-move mode.
    ///
    /// Position and enable state are untouched.
    pub fn stop(&mut self) {
        self.velocity = StepsPerSec(0.0);
        self.auto_move = false;
    }

    /// Advance motion by at most one step.
    ///
    /// Must be called more often than the step interval, otherwise steps
    /// are lost rather than queued.
    pub fn update(&mut self, now_us: u64) -> Result<Tick> {
        if !self.enabled {
            return Ok(Tick::Disabled);
        }

        if self.auto_move {
            if self.position == self.target {
                self.stop();
                return Ok(Tick::Arrived);
            }
            self.velocity = self.velocity_toward_target();
        }

        let interval_us = match self.velocity.step_interval_us() {
            Some(interval) => interval,
            None => return Ok(Tick::Idle),
        };

        let direction = Direction::from_forward(self.velocity.0 > 0.0);
        if !self.can_step(direction)? {
            warn!(
                "axis {} refused at limit, position {}",
                self.name.as_str(),
                self.position.0
            );
            self.stop();
            return Ok(Tick::Blocked);
        }

        let last = *self.last_step_us.get_or_insert(now_us);
        if now_us.saturating_sub(last) < interval_us {
            return Ok(Tick::Pending);
        }

        self.emit_step(direction)?;
        self.last_step_us = Some(now_us);

        if self.auto_move && self.position == self.target {
            trace!("axis {} reached {}", self.name.as_str(), self.target.0);
            self.stop();
        }

        // Position may only be negative here if homing was skipped.
        if self.position.0 < 0 && self.pins.is_min_asserted()? {
            self.position = Steps(0);
        }

        Ok(Tick::Stepped)
    }

    /// Move to `target` and wait for arrival.
    ///
    /// # Errors
    ///
    /// - [`MotorError::Disabled`] if the driver is disabled (nothing changes)
    /// - [`MotionError::Timeout`] if `timeout_ms` elapses first (axis stopped)
    /// - [`MotionError::Blocked`] if a limit switch ended the move early
    pub fn move_to_blocking<C: Clock>(
        &mut self,
        target: Steps,
        timeout_ms: u32,
        clock: &mut C,
    ) -> Result<()> {
        self.ensure_enabled()?;
        let start_us = clock.now_us();
        self.move_to(target);
        self.run_until(clock, start_us, timeout_ms, |axis| Ok(!axis.auto_move))?;

        if self.position != target {
            return Err(MotionError::Blocked {
                position: self.position.0,
                target: target.0,
            }
            .into());
        }
        Ok(())
    }

    /// Drive to the minimum switch and make that position zero.
    ///
    /// If the switch is already asserted the axis first backs off until it
    /// releases, then approaches again, so the reference is always taken on
    /// the same edge. Both phases share one deadline. On failure the
    /// position counter is left as it was.
    pub fn home_blocking<C: Clock>(&mut self, timeout_ms: u32, clock: &mut C) -> Result<()> {
        self.seek_switch(Direction::Reverse, timeout_ms, clock)?;
        self.position = Steps(0);
        self.target = Steps(0);
        info!("axis {} homed", self.name.as_str());
        Ok(())
    }

    /// Drive to the maximum switch and set the position to `reset_position`.
    ///
    /// Mirror image of [`home_blocking`](Self::home_blocking).
    pub fn goto_max_blocking<C: Clock>(
        &mut self,
        reset_position: Steps,
        timeout_ms: u32,
        clock: &mut C,
    ) -> Result<()> {
        self.seek_switch(Direction::Forward, timeout_ms, clock)?;
        self.position = reset_position;
        self.target = reset_position;
        info!("axis {} at max, position {}", self.name.as_str(), reset_position.0);
        Ok(())
    }

    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current absolute position.
    #[inline]
    pub fn position(&self) -> Steps {
        self.position
    }

    /// Target of the current or last automatic move.
    #[inline]
    pub fn target(&self) -> Steps {
        self.target
    }

    /// Signed commanded speed.
    #[inline]
    pub fn velocity(&self) -> StepsPerSec {
        self.velocity
    }

    /// Speed magnitude for automatic moves and homing.
    #[inline]
    pub fn move_speed(&self) -> StepsPerSec {
        self.move_speed
    }

    /// STEP pulse width in microseconds.
    #[inline]
    pub fn step_pulse_us(&self) -> u32 {
        self.step_pulse_us
    }

    /// Manual stepping direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Driver enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Automatic move in progress.
    #[inline]
    pub fn is_auto_move(&self) -> bool {
        self.auto_move
    }

    /// Current motion mode.
    pub fn mode(&self) -> MotionMode {
        if self.auto_move {
            MotionMode::AutoMove
        } else if self.velocity.is_zero() {
            MotionMode::Stopped
        } else {
            MotionMode::Velocity
        }
    }

    /// Minimum limit switch asserted right now.
    pub fn is_min_asserted(&mut self) -> Result<bool> {
        Ok(self.pins.is_min_asserted()?)
    }

    /// Maximum limit switch asserted right now.
    pub fn is_max_asserted(&mut self) -> Result<bool> {
        Ok(self.pins.is_max_asserted()?)
    }

    /// Borrow the hardware lines.
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Mutably borrow the hardware lines.
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Give the hardware lines back.
    pub fn into_pins(self) -> P {
        self.pins
    }

    fn velocity_toward_target(&self) -> StepsPerSec {
        if self.target > self.position {
            self.move_speed
        } else {
            -self.move_speed
        }
    }

    fn can_step(&mut self, direction: Direction) -> Result<bool> {
        // End of the counter range blocks like a switch.
        if self.position.checked_offset(direction.sign()).is_none() {
            return Ok(false);
        }
        let blocked = match direction {
            Direction::Forward => self.pins.is_max_asserted()?,
            Direction::Reverse => self.pins.is_min_asserted()?,
        };
        Ok(!blocked)
    }

    fn write_direction(&mut self, forward: bool) -> Result<()> {
        if self.dir_line != Some(forward) {
            self.pins.set_direction(forward)?;
            self.dir_line = Some(forward);
        }
        Ok(())
    }

    fn emit_step(&mut self, direction: Direction) -> Result<()> {
        let next = match self.position.checked_offset(direction.sign()) {
            Some(next) => next,
            None => return Ok(()),
        };
        self.write_direction(direction.is_forward())?;
        self.pins.pulse_step(self.step_pulse_us)?;
        self.position = next;
        Ok(())
    }

    fn ensure_enabled(&self) -> Result<()> {
        if self.enabled {
            Ok(())
        } else {
            Err(MotorError::Disabled.into())
        }
    }

    fn seek_switch<C: Clock>(
        &mut self,
        toward: Direction,
        timeout_ms: u32,
        clock: &mut C,
    ) -> Result<()> {
        self.ensure_enabled()?;
        let start_us = clock.now_us();
        let away = StepsPerSec(self.move_speed.0 * -(toward.sign() as f32));

        if self.switch_asserted(toward)? {
            debug!("axis {} backing off switch", self.name.as_str());
            self.set_velocity(away);
            self.run_until(clock, start_us, timeout_ms, |axis| {
                if !axis.switch_asserted(toward)? {
                    return Ok(true);
                }
                if axis.velocity.is_zero() {
                    return Err(MotionError::BackOffBlocked.into());
                }
                Ok(false)
            })?;
        }

        debug!("axis {} approaching switch", self.name.as_str());
        self.set_velocity(-away);
        self.run_until(clock, start_us, timeout_ms, |axis| axis.switch_asserted(toward))?;
        self.stop();
        Ok(())
    }

    fn switch_asserted(&mut self, toward: Direction) -> Result<bool> {
        match toward {
            Direction::Forward => self.is_max_asserted(),
            Direction::Reverse => self.is_min_asserted(),
        }
    }

    /// Poll `update` until `done` holds or the deadline passes.
    ///
    /// Every error path leaves the axis stopped.
    fn run_until<C, F>(&mut self, clock: &mut C, start_us: u64, timeout_ms: u32, mut done: F) -> Result<()>
    where
        C: Clock,
        F: FnMut(&mut Self) -> Result<bool>,
    {
        loop {
            match done(self) {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(e) => {
                    self.stop();
                    return Err(e);
                }
            }

            let now_us = clock.now_us();
            let elapsed = elapsed_ms(start_us, now_us);
            if elapsed >= timeout_ms {
                self.stop();
                warn!("axis {} timed out after {} ms", self.name.as_str(), elapsed);
                return Err(MotionError::Timeout { elapsed_ms: elapsed }.into());
            }

            if let Err(e) = self.update(now_us) {
                self.stop();
                return Err(e);
            }
            clock.idle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{SimClock, SimulatedPins};
    use crate::error::Error;

    fn enabled_axis(pins: SimulatedPins) -> AxisController<SimulatedPins> {
        let mut axis = AxisController::new(pins);
        axis.initialize().unwrap();
        axis.set_enabled(true).unwrap();
        axis
    }

    #[test]
    fn test_starts_disabled() {
        let mut axis = AxisController::new(SimulatedPins::new());
        axis.initialize().unwrap();

        assert!(!axis.is_enabled());
        assert!(axis.pins().configured());
        assert!(!axis.step_once().unwrap());
        assert_eq!(axis.position(), Steps(0));
    }

    #[test]
    fn test_step_once_respects_limits() {
        let mut axis = enabled_axis(SimulatedPins::new());

        axis.set_direction(true).unwrap();
        assert!(axis.step_once().unwrap());
        assert_eq!(axis.position(), Steps(1));

        axis.pins_mut().force_max(true);
        assert!(!axis.step_once().unwrap());
        assert_eq!(axis.position(), Steps(1));

        // Reverse is still allowed with only the max switch asserted
        axis.set_direction(false).unwrap();
        assert!(axis.step_once().unwrap());
        assert_eq!(axis.position(), Steps(0));
        assert_eq!(axis.pins().pulses(), 2);
    }

    #[test]
    fn test_move_speed_stored_as_magnitude() {
        let mut axis = AxisController::new(SimulatedPins::new());
        axis.set_move_speed(StepsPerSec(-300.0));
        assert_eq!(axis.move_speed(), StepsPerSec(300.0));
    }

    #[test]
    fn test_move_to_current_position_is_noop() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.move_to(Steps(0));

        assert!(!axis.is_auto_move());
        assert_eq!(axis.mode(), MotionMode::Stopped);
        for t in 0..100 {
            assert_eq!(axis.update(t * 10_000).unwrap(), Tick::Idle);
        }
        assert_eq!(axis.pins().pulses(), 0);
    }

    #[test]
    fn test_update_paces_steps() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.set_move_speed(StepsPerSec(1000.0)); // 1000 us per step
        axis.move_to(Steps(3));
        assert_eq!(axis.velocity(), StepsPerSec(1000.0));

        // First update only records the time
        assert_eq!(axis.update(10_000).unwrap(), Tick::Pending);
        assert_eq!(axis.update(10_500).unwrap(), Tick::Pending);
        assert_eq!(axis.update(11_000).unwrap(), Tick::Stepped);
        assert_eq!(axis.update(11_999).unwrap(), Tick::Pending);
        assert_eq!(axis.update(12_000).unwrap(), Tick::Stepped);
        assert_eq!(axis.update(13_000).unwrap(), Tick::Stepped);

        assert_eq!(axis.position(), Steps(3));
        assert!(!axis.is_auto_move());
        assert_eq!(axis.update(14_000).unwrap(), Tick::Idle);
    }

    #[test]
    fn test_auto_move_reverses_toward_target() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.set_position(Steps(10));
        axis.move_to(Steps(8));
        assert!(axis.velocity().0 < 0.0);

        let mut now = 0;
        while axis.is_auto_move() {
            axis.update(now).unwrap();
            now += 5_000;
        }
        assert_eq!(axis.position(), Steps(8));
        assert!(!axis.pins().forward());
    }

    #[test]
    fn test_disabled_update_changes_nothing() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.move_to(Steps(5));
        axis.set_enabled(false).unwrap();

        assert_eq!(axis.update(1_000_000).unwrap(), Tick::Disabled);
        assert_eq!(axis.update(2_000_000).unwrap(), Tick::Disabled);
        assert!(axis.is_auto_move());
        assert_eq!(axis.target(), Steps(5));
        assert_eq!(axis.position(), Steps(0));
    }

    #[test]
    fn test_blocked_auto_move_is_cancelled() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.move_to(Steps(-4));
        axis.pins_mut().force_min(true);

        assert_eq!(axis.update(0).unwrap(), Tick::Blocked);
        assert!(!axis.is_auto_move());
        assert_eq!(axis.velocity(), StepsPerSec(0.0));
        assert_eq!(axis.mode(), MotionMode::Stopped);
    }

    #[test]
    fn test_set_velocity_cancels_auto_move() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.move_to(Steps(100));
        axis.set_velocity(StepsPerSec(-20.0));

        assert!(!axis.is_auto_move());
        assert_eq!(axis.mode(), MotionMode::Velocity);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.set_position(Steps(7));
        axis.move_to(Steps(20));

        axis.stop();
        let once = (axis.position(), axis.velocity(), axis.is_auto_move(), axis.is_enabled());
        axis.stop();
        let twice = (axis.position(), axis.velocity(), axis.is_auto_move(), axis.is_enabled());
        assert_eq!(once, twice);
        assert_eq!(once, (Steps(7), StepsPerSec(0.0), false, true));
    }

    #[test]
    fn test_disable_twice_matches_once() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.set_position(Steps(4));
        axis.move_to(Steps(9));

        let snapshot = |axis: &AxisController<SimulatedPins>| {
            (
                axis.position(),
                axis.target(),
                axis.is_auto_move(),
                axis.is_enabled(),
                axis.pins().enabled(),
                axis.pins().pulses(),
            )
        };

        axis.set_enabled(false).unwrap();
        let once = snapshot(&axis);
        axis.set_enabled(false).unwrap();
        let twice = snapshot(&axis);

        assert_eq!(once, twice);
        // Pending target survives
        assert_eq!(once, (Steps(4), Steps(9), true, false, false, 0));
    }

    #[test]
    fn test_initialize_twice_matches_once() {
        let mut axis = AxisController::new(SimulatedPins::new());
        axis.set_position(Steps(-12));

        let snapshot = |axis: &AxisController<SimulatedPins>| {
            (
                axis.position(),
                axis.target(),
                axis.is_auto_move(),
                axis.is_enabled(),
                axis.pins().enabled(),
                axis.pins().configured(),
                axis.pins().pulses(),
            )
        };

        axis.initialize().unwrap();
        let once = snapshot(&axis);
        axis.initialize().unwrap();
        let twice = snapshot(&axis);

        assert_eq!(once, twice);
        assert_eq!(once, (Steps(-12), Steps(0), false, false, false, true, 0));
    }

    #[test]
    fn test_step_pulse_width_reaches_pins() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.set_direction(true).unwrap();

        assert!(axis.step_once().unwrap());
        assert_eq!(axis.pins().last_pulse_width_us(), DEFAULT_STEP_PULSE_US);

        axis.set_step_pulse_us(7);
        assert!(axis.step_once().unwrap());
        assert_eq!(axis.step_pulse_us(), 7);
        assert_eq!(axis.pins().last_pulse_width_us(), 7);
    }

    #[test]
    fn test_counter_range_end_refuses_step() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.set_position(Steps(i64::MAX));

        axis.set_direction(true).unwrap();
        assert!(!axis.step_once().unwrap());
        axis.set_velocity(StepsPerSec(1000.0));
        assert_eq!(axis.update(0).unwrap(), Tick::Blocked);
        assert_eq!(axis.position(), Steps(i64::MAX));
        assert_eq!(axis.pins().pulses(), 0);

        axis.set_position(Steps(i64::MIN));
        axis.set_direction(false).unwrap();
        assert!(!axis.step_once().unwrap());

        // Stepping back into range is allowed
        axis.set_direction(true).unwrap();
        assert!(axis.step_once().unwrap());
        assert_eq!(axis.position(), Steps(i64::MIN + 1));
    }

    #[test]
    fn test_negative_position_clamped_at_min_switch() {
        // Switch sits one step behind the carriage
        let mut axis = enabled_axis(SimulatedPins::with_travel(1, Some(0), None));
        axis.set_position(Steps(-3));
        axis.set_velocity(StepsPerSec(-1000.0));

        axis.update(0).unwrap();
        assert_eq!(axis.update(1_000).unwrap(), Tick::Stepped);
        assert_eq!(axis.position(), Steps(0));
    }

    #[test]
    fn test_move_to_blocking_reaches_target() {
        let mut axis = enabled_axis(SimulatedPins::new());
        let mut clock = SimClock::new(100);

        axis.move_to_blocking(Steps(25), 1_000, &mut clock).unwrap();

        assert_eq!(axis.position(), Steps(25));
        assert_eq!(axis.pins().carriage(), 25);
        assert!(!axis.is_auto_move());
    }

    #[test]
    fn test_move_to_blocking_times_out() {
        let mut axis = enabled_axis(SimulatedPins::new());
        let mut clock = SimClock::new(100);

        // 500 steps/s needs 2 s for 1000 steps
        let result = axis.move_to_blocking(Steps(1000), 100, &mut clock);

        assert!(matches!(
            result,
            Err(Error::Motion(MotionError::Timeout { elapsed_ms: 100 }))
        ));
        assert!(!axis.is_auto_move());
        assert_eq!(axis.velocity(), StepsPerSec(0.0));
        assert!(axis.position().0 > 0 && axis.position().0 < 1000);
    }

    #[test]
    fn test_move_to_blocking_reports_limit() {
        let mut axis = enabled_axis(SimulatedPins::with_travel(0, None, Some(10)));
        let mut clock = SimClock::new(100);

        let result = axis.move_to_blocking(Steps(50), 10_000, &mut clock);

        assert_eq!(
            result,
            Err(Error::Motion(MotionError::Blocked {
                position: 10,
                target: 50
            }))
        );
        assert_eq!(axis.position(), Steps(10));
    }

    #[test]
    fn test_blocking_on_disabled_axis_fails_fast() {
        let mut axis = AxisController::new(SimulatedPins::new());
        axis.initialize().unwrap();
        let mut clock = SimClock::new(100);

        assert_eq!(
            axis.home_blocking(1_000, &mut clock),
            Err(Error::Motor(MotorError::Disabled))
        );
        assert_eq!(
            axis.move_to_blocking(Steps(3), 1_000, &mut clock),
            Err(Error::Motor(MotorError::Disabled))
        );
        assert!(!axis.is_auto_move());
        assert_eq!(clock.now(), 0);
    }

    #[test]
    fn test_home_blocking_zeroes_position() {
        // Carriage 40 steps above the switch, counter says 1234
        let mut axis = enabled_axis(SimulatedPins::with_travel(40, Some(0), None));
        axis.set_position(Steps(1234));
        let mut clock = SimClock::new(100);

        axis.home_blocking(5_000, &mut clock).unwrap();

        assert_eq!(axis.position(), Steps(0));
        assert_eq!(axis.target(), Steps(0));
        assert_eq!(axis.pins().carriage(), 0);
        assert_eq!(axis.mode(), MotionMode::Stopped);
    }

    #[test]
    fn test_home_backs_off_asserted_switch() {
        // Switch asserted for carriage <= 0, carriage starts at -2
        let mut axis = enabled_axis(SimulatedPins::with_travel(-2, Some(0), None));
        axis.set_position(Steps(99));
        let mut clock = SimClock::new(100);

        axis.home_blocking(5_000, &mut clock).unwrap();

        // Backed off to 1, then approached until asserted again at 0
        assert_eq!(axis.pins().carriage(), 0);
        assert_eq!(axis.pins().pulses(), 4);
        assert_eq!(axis.position(), Steps(0));
    }

    #[test]
    fn test_home_with_asserted_switch_and_zero_timeout_fails() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.pins_mut().force_min(true);
        axis.set_position(Steps(17));
        let mut clock = SimClock::new(100);

        let result = axis.home_blocking(0, &mut clock);

        assert!(matches!(
            result,
            Err(Error::Motion(MotionError::Timeout { .. }))
        ));
        assert_eq!(axis.position(), Steps(17));
        assert_eq!(axis.velocity(), StepsPerSec(0.0));
    }

    #[test]
    fn test_home_back_off_blocked_by_max() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.pins_mut().force_min(true);
        axis.pins_mut().force_max(true);
        let mut clock = SimClock::new(100);

        assert_eq!(
            axis.home_blocking(5_000, &mut clock),
            Err(Error::Motion(MotionError::BackOffBlocked))
        );
        assert_eq!(axis.pins().pulses(), 0);
    }

    #[test]
    fn test_goto_max_sets_reset_position() {
        let mut axis = enabled_axis(SimulatedPins::with_travel(0, Some(-100), Some(30)));
        let mut clock = SimClock::new(100);

        axis.goto_max_blocking(Steps(4000), 5_000, &mut clock).unwrap();

        assert_eq!(axis.pins().carriage(), 30);
        assert_eq!(axis.position(), Steps(4000));
    }

    #[test]
    fn test_pin_failure_stops_blocking_move() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.pins_mut().fail_step(true);
        let mut clock = SimClock::new(100);

        let result = axis.move_to_blocking(Steps(10), 1_000, &mut clock);

        assert_eq!(
            result,
            Err(Error::Motor(MotorError::Pin(crate::axis::PinError::Step)))
        );
        assert!(!axis.is_auto_move());
    }

    #[test]
    fn test_teardown_disables() {
        let mut axis = enabled_axis(SimulatedPins::new());
        axis.move_to(Steps(3));
        axis.teardown().unwrap();

        assert!(!axis.is_enabled());
        assert!(!axis.pins().enabled());
        assert!(!axis.is_auto_move());
    }
}
