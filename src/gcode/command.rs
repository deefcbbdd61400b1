//! Interpreted motion commands.

/// One validated command line.
///
/// Coordinates are in machine units, present only when given on the line.
/// Parse failures are reported as [`ParseError`](crate::error::ParseError)
/// instead, so a command never carries an error alongside its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionCommand {
    /// `G0`: move both axes at their current move speed.
    RapidMove {
        /// Target X
        x: Option<f64>,
        /// Target Y
        y: Option<f64>,
    },
    /// `G1`: like `G0`, optionally changing the move speed first.
    LinearMove {
        /// Target X
        x: Option<f64>,
        /// Target Y
        y: Option<f64>,
        /// Feed rate in steps per second, never negative
        feed: Option<f64>,
    },
    /// `G28`: home both axes.
    Home,
    /// `M3`: spindle on.
    SpindleControl {
        /// Spindle speed 0-255
        speed: Option<u8>,
    },
}

impl MotionCommand {
    /// Command word as written in G-code.
    pub fn code(&self) -> &'static str {
        match self {
            MotionCommand::RapidMove { .. } => "G0",
            MotionCommand::LinearMove { .. } => "G1",
            MotionCommand::Home => "G28",
            MotionCommand::SpindleControl { .. } => "M3",
        }
    }

    /// Requested X/Y coordinates, if this is a move.
    pub fn coordinates(&self) -> Option<(Option<f64>, Option<f64>)> {
        match *self {
            MotionCommand::RapidMove { x, y } | MotionCommand::LinearMove { x, y, .. } => {
                Some((x, y))
            }
            _ => None,
        }
    }

    /// True for a move that names at least one axis.
    pub fn changes_position(&self) -> bool {
        matches!(self.coordinates(), Some((x, y)) if x.is_some() || y.is_some())
    }
}
