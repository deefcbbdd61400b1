//! Acknowledgment formatting.
//!
//! ```text
//! CMD: G0 X<tx> Y<ty>
//! Pos: X<x> Y<y>
//! OK
//! ```
//!
//! Failures produce a single `ERR: <reason>` line.

use core::fmt::{self, Write};

use crate::error::Error;
use crate::gcode::MotionCommand;
use crate::machine::Report;

/// Write the acknowledgment of a successful command.
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> fmt::Result {
    match report {
        Report::Homed => writeln!(out, "CMD: G28")?,
        Report::Moved {
            command,
            target,
            position,
        } => {
            write!(out, "CMD: {} X{} Y{}", command.code(), target.x.0, target.y.0)?;
            if let MotionCommand::LinearMove {
                feed: Some(feed), ..
            } = command
            {
                write!(out, " F{}", feed)?;
            }
            writeln!(out)?;
            writeln!(out, "Pos: X{} Y{}", position.x.0, position.y.0)?;
        }
        Report::Spindle { speed } => {
            write!(out, "CMD: M3")?;
            if let Some(speed) = speed {
                write!(out, " S{}", speed)?;
            }
            writeln!(out)?;
        }
    }
    writeln!(out, "OK")
}

/// Write the `ERR:` line of a failed command.
pub fn write_error<W: Write>(out: &mut W, error: &Error) -> fmt::Result {
    writeln!(out, "ERR: {}", error)
}
