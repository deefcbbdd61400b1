//! Byte stream to command line assembly.

use crate::gcode::LineBuffer;

/// Something worth acting on after a byte was pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// A complete, trimmed, non-empty line.
    Line(&'a str),
    /// The current line passed
    /// [`MAX_LINE_LENGTH`](crate::gcode::MAX_LINE_LENGTH) characters. The rest of
    /// it up to the next newline is discarded.
    TooLong,
}

/// Accumulates printable bytes into newline-terminated lines.
///
/// `\r` and non-printable bytes are dropped, so CRLF and LF input behave
/// the same.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buf: LineBuffer,
    /// Characters are being discarded until the next newline.
    overflowed: bool,
    /// `buf` holds a line that was already handed out.
    complete: bool,
}

impl LineAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte.
    pub fn push(&mut self, byte: u8) -> Option<LineEvent<'_>> {
        if self.complete {
            self.buf.clear();
            self.complete = false;
        }

        match byte {
            b'\n' => {
                if core::mem::take(&mut self.overflowed) {
                    return None;
                }
                self.complete = true;
                let line = self.buf.trim();
                if line.is_empty() {
                    None
                } else {
                    Some(LineEvent::Line(line))
                }
            }
            0x20..=0x7E if self.overflowed => None,
            0x20..=0x7E => {
                if self.buf.push(byte as char).is_err() {
                    self.buf.clear();
                    self.overflowed = true;
                    return Some(LineEvent::TooLong);
                }
                None
            }
            _ => None,
        }
    }

    /// Characters of the line being assembled.
    pub fn pending(&self) -> usize {
        if self.complete {
            0
        } else {
            self.buf.len()
        }
    }
}
