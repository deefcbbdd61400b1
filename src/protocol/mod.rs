//! Line-oriented command protocol.
//!
//! One command per newline-terminated line in, one acknowledgment out.

mod line;
mod response;

pub use line::{LineAssembler, LineEvent};
pub use response::{write_error, write_report};
