//! Line-to-command interpretation.

use crate::error::ParseError;

use super::command::MotionCommand;
use super::lexer::{parse_number, strip_comments, Word, Words};

/// Fields collected from one line. Later words overwrite earlier ones.
#[derive(Debug, Default)]
struct Fields {
    g: Option<i64>,
    m: Option<i64>,
    x: Option<f64>,
    y: Option<f64>,
    feed: Option<f64>,
    speed: Option<u8>,
}

impl Fields {
    fn apply(&mut self, word: Word<'_>) -> Result<(), ParseError> {
        match word.letter {
            'G' => self.g = Some(code_number(word)?),
            'M' => self.m = Some(code_number(word)?),
            'X' => self.x = Some(value(word)?),
            'Y' => self.y = Some(value(word)?),
            'F' => {
                let feed = value(word)?;
                if feed < 0.0 {
                    return Err(ParseError::NegativeFeedRate);
                }
                self.feed = Some(feed);
            }
            'S' => {
                let speed = value(word)? as i64;
                let speed = u8::try_from(speed)
                    .map_err(|_| ParseError::SpindleSpeedOutOfRange(speed))?;
                self.speed = Some(speed);
            }
            // Tool numbers, line numbers and the like are skipped
            _ => {}
        }
        Ok(())
    }

    fn resolve(self) -> Result<MotionCommand, ParseError> {
        if self.m == Some(3) {
            return Ok(MotionCommand::SpindleControl { speed: self.speed });
        }

        match self.g {
            Some(0) => Ok(MotionCommand::RapidMove {
                x: self.x,
                y: self.y,
            }),
            Some(1) => Ok(MotionCommand::LinearMove {
                x: self.x,
                y: self.y,
                feed: self.feed,
            }),
            Some(28) => Ok(MotionCommand::Home),
            Some(other) => Err(ParseError::UnsupportedGCode(other)),
            None => Err(ParseError::NoCommand),
        }
    }
}

/// `G`/`M` number, truncated toward zero.
fn code_number(word: Word<'_>) -> Result<i64, ParseError> {
    if word.number.is_empty() {
        return Err(ParseError::MissingNumber(word.letter));
    }
    Ok(parse_number(word.number)? as i64)
}

fn value(word: Word<'_>) -> Result<f64, ParseError> {
    if word.number.is_empty() {
        return Err(ParseError::MissingValue(word.letter));
    }
    parse_number(word.number)
}

/// Interpret one line of G-code.
///
/// Pure: the same text always gives the same result. The first failing
/// word decides the error.
///
/// # Example
///
/// ```rust
/// use gantry_motion::gcode::{parse_line, MotionCommand};
///
/// let cmd = parse_line("G1 X100 Y-50.5 F200").unwrap();
/// assert_eq!(
///     cmd,
///     MotionCommand::LinearMove { x: Some(100.0), y: Some(-50.5), feed: Some(200.0) }
/// );
/// ```
pub fn parse_line(line: &str) -> Result<MotionCommand, ParseError> {
    let stripped = strip_comments(line)?;
    let code = stripped.trim();
    if code.is_empty() {
        return Err(ParseError::EmptyLine);
    }

    let mut fields = Fields::default();
    for word in Words::new(code) {
        fields.apply(word?)?;
    }
    fields.resolve()
}
