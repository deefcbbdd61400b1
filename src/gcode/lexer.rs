//! Comment stripping and word tokenizing for single G-code lines.

use crate::error::ParseError;

use super::MAX_LINE_LENGTH;

/// Line text after comment removal, bounded in bytes.
pub type LineBuffer = heapless::String<MAX_LINE_LENGTH>;

/// Remove `;` comments and `( ... )` comments from a line.
///
/// Everything from the first `;` is dropped. Parenthesised text is removed
/// including the parentheses; an unterminated `(` runs to the end of the
/// line. Parentheses do not nest. Whitespace is kept as is.
///
/// # Errors
///
/// [`ParseError::LineTooLong`] if the remaining text does not fit
/// [`MAX_LINE_LENGTH`] bytes. Multi-byte characters count once per byte.
pub fn strip_comments(line: &str) -> Result<LineBuffer, ParseError> {
    let code = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut out = LineBuffer::new();
    let mut in_paren = false;
    for c in code.chars() {
        match c {
            '(' => in_paren = true,
            ')' => in_paren = false,
            _ if in_paren => {}
            _ => out.push(c).map_err(|_| ParseError::LineTooLong)?,
        }
    }
    Ok(out)
}

/// One letter and the numeric text that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    /// Uppercased address letter.
    pub letter: char,
    /// Numeric text, empty when the letter stands alone.
    pub number: &'a str,
}

/// Iterator over the words of a comment-free line.
///
/// Yields an error and then stops at the first character that cannot start
/// a word.
pub struct Words<'a> {
    src: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Words<'a> {
    /// Tokenize `src`.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            failed: false,
        }
    }

    /// Scan a signed decimal literal with optional exponent starting at
    /// `start`, returning its end.
    ///
    /// A malformed exponent is not part of the literal: `1e` and `1e+`
    /// end right before the `e`.
    fn scan_number(&self, start: usize) -> usize {
        let bytes = self.src.as_bytes();
        let len = bytes.len();
        let digits = |mut i: usize| {
            while i < len && bytes[i].is_ascii_digit() {
                i += 1;
            }
            i
        };

        let mut i = start;
        if i < len && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        i = digits(i);
        if i < len && bytes[i] == b'.' {
            i = digits(i + 1);
        }
        if i < len && matches!(bytes[i], b'e' | b'E') {
            let mut j = i + 1;
            if j < len && matches!(bytes[j], b'+' | b'-') {
                j += 1;
            }
            let end = digits(j);
            if end > j {
                i = end;
            }
        }
        i
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = Result<Word<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }

        let c = self.src[self.pos..].chars().next()?;
        if !c.is_ascii_alphabetic() {
            self.failed = true;
            return Some(Err(ParseError::UnexpectedCharacter(c)));
        }

        let start = self.pos + 1;
        let end = self.scan_number(start);
        self.pos = end;
        Some(Ok(Word {
            letter: c.to_ascii_uppercase(),
            number: &self.src[start..end],
        }))
    }
}

/// Parse numeric text as a finite double.
///
/// # Errors
///
/// - [`ParseError::EmptyNumber`] for empty text
/// - [`ParseError::InvalidNumber`] when the text is not a number
/// - [`ParseError::NumberOutOfRange`] when it overflows to infinity, or
///   underflows to zero or a subnormal
pub fn parse_number(text: &str) -> Result<f64, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptyNumber);
    }
    let value: f64 = text.parse().map_err(|_| ParseError::InvalidNumber)?;
    if !value.is_finite() || value.is_subnormal() {
        return Err(ParseError::NumberOutOfRange);
    }
    if value == 0.0 && has_nonzero_digit(text) {
        return Err(ParseError::NumberOutOfRange);
    }
    Ok(value)
}

/// The mantissa of `text` has a digit other than zero.
fn has_nonzero_digit(text: &str) -> bool {
    text.bytes()
        .take_while(|b| !matches!(b, b'e' | b'E'))
        .any(|b| matches!(b, b'1'..=b'9'))
}
