//! Axis motion modes and per-update outcomes.

/// Direction of axis motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing position, toward the maximum switch.
    Forward,
    /// Decreasing position, toward the minimum switch.
    Reverse,
}

impl Direction {
    /// Get direction from a signed step delta or velocity sign.
    #[inline]
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    /// True for [`Direction::Forward`].
    #[inline]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

/// What drives the axis between updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionMode {
    /// Velocity is zero.
    Stopped,
    /// Velocity fixed by the caller.
    Velocity,
    /// Velocity recomputed toward the target every update.
    AutoMove,
}

impl MotionMode {
    /// Mode name for display/debugging.
    pub fn name(self) -> &'static str {
        match self {
            MotionMode::Stopped => "Stopped",
            MotionMode::Velocity => "Velocity",
            MotionMode::AutoMove => "AutoMove",
        }
    }
}

/// Result of one [`AxisController::update`](super::AxisController::update) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Driver disabled, nothing done.
    Disabled,
    /// No motion requested.
    Idle,
    /// Automatic move found the axis on target and stopped.
    Arrived,
    /// Limit switch refused the requested direction, motion cancelled.
    Blocked,
    /// Next step not due yet.
    Pending,
    /// One step emitted.
    Stepped,
}

impl Tick {
    /// A step pulse was emitted during this update.
    #[inline]
    pub fn stepped(self) -> bool {
        self == Tick::Stepped
    }
}
