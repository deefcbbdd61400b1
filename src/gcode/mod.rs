//! G-code subset interpreter.
//!
//! Turns one line of text into a [`MotionCommand`] or a [`ParseError`].
//! Supported words: `G0`, `G1`, `G28`, `M3`, `X`, `Y`, `F`, `S`.
//!
//! [`ParseError`]: crate::error::ParseError

mod command;
mod lexer;
mod parser;

pub use command::MotionCommand;
pub use lexer::{parse_number, strip_comments, LineBuffer, Word, Words};
pub use parser::parse_line;

/// Maximum accepted line length in bytes.
///
/// [`LineAssembler`](crate::protocol::LineAssembler) only admits printable
/// ASCII, so on the serial path this is also the character count.
pub const MAX_LINE_LENGTH: usize = 120;
