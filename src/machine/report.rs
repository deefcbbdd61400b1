//! Results of executed commands.

use crate::config::units::Steps;
use crate::gcode::MotionCommand;

/// X/Y pair of step positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepPoint {
    /// X axis steps
    pub x: Steps,
    /// Y axis steps
    pub y: Steps,
}

impl StepPoint {
    /// Create a point.
    pub const fn new(x: i64, y: i64) -> Self {
        Self {
            x: Steps(x),
            y: Steps(y),
        }
    }
}

/// What a successfully executed command did.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// Both axes homed, logical position is the origin.
    Homed,
    /// A `G0`/`G1` move finished on target.
    Moved {
        /// The executed command
        command: MotionCommand,
        /// Resolved step targets
        target: StepPoint,
        /// Positions read back after the move
        position: StepPoint,
    },
    /// `M3` acknowledged. There is no spindle output.
    Spindle {
        /// Requested speed
        speed: Option<u8>,
    },
}
