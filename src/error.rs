//! Error types for gantry-motion.
//!
//! Provides unified error handling across configuration, axis control,
//! blocking motion and G-code interpretation.

use core::fmt;

use crate::axis::PinError;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all gantry-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Axis hardware or state error
    Motor(MotorError),
    /// Blocking motion did not complete
    Motion(MotionError),
    /// G-code line could not be interpreted
    Parse(ParseError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Axis key not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Two axes share the same display name
    DuplicateAxisName(heapless::String<32>),
    /// Invalid move speed (must be finite and > 0)
    InvalidMoveSpeed(f32),
    /// Invalid step pulse width (must be >= 1 us)
    InvalidStepPulse(u32),
    /// Invalid steps per unit (must be finite and > 0)
    InvalidStepsPerUnit(f32),
    /// A builder was missing a required field
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Axis hardware and state errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// A GPIO line could not be driven or read
    Pin(PinError),
    /// Blocking operation requested while the driver is disabled
    Disabled,
}

/// Blocking motion failures.
///
/// None of these leave an axis moving: velocity is zeroed and automatic
/// move mode is cleared before the error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// The deadline elapsed before the operation completed
    Timeout {
        /// Milliseconds spent before giving up
        elapsed_ms: u32,
    },
    /// A limit switch refused motion before the target was reached
    Blocked {
        /// Position where the axis stopped
        position: i64,
        /// Requested target
        target: i64,
    },
    /// Homing could not leave an asserted switch because the opposite
    /// switch is asserted as well
    BackOffBlocked,
}

/// G-code interpretation errors.
///
/// Every variant maps to a fixed human-readable reason, see [`ParseError::reason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Nothing left after comments and whitespace were removed
    EmptyLine,
    /// Line exceeds the protocol's maximum length
    LineTooLong,
    /// A character that cannot start a word
    UnexpectedCharacter(char),
    /// `G` or `M` word without a number
    MissingNumber(char),
    /// `X`, `Y`, `F` or `S` word without a value
    MissingValue(char),
    /// Numeric field was empty
    EmptyNumber,
    /// Numeric field could not be parsed
    InvalidNumber,
    /// Numeric field does not fit a finite double
    NumberOutOfRange,
    /// `F` was negative
    NegativeFeedRate,
    /// `S` outside 0..=255 after truncation
    SpindleSpeedOutOfRange(i64),
    /// `G` number other than 0, 1 or 28
    UnsupportedGCode(i64),
    /// Neither a supported `G` nor `M3` on the line
    NoCommand,
}

impl ParseError {
    /// Human-readable reason reported back over the line protocol.
    pub fn reason(&self) -> &'static str {
        match self {
            ParseError::EmptyLine => "Empty line",
            ParseError::LineTooLong => "Line too long",
            ParseError::UnexpectedCharacter(_) => "Unexpected character in input",
            ParseError::MissingNumber('G') => "G with no number",
            ParseError::MissingNumber(_) => "M with no number",
            ParseError::MissingValue('X') => "X with no value",
            ParseError::MissingValue('Y') => "Y with no value",
            ParseError::MissingValue('F') => "F with no value",
            ParseError::MissingValue(_) => "S with no value",
            ParseError::EmptyNumber => "Empty numeric field",
            ParseError::InvalidNumber => "Invalid number format",
            ParseError::NumberOutOfRange => "Numeric out of range",
            ParseError::NegativeFeedRate => "Feed rate F must be non-negative",
            ParseError::SpindleSpeedOutOfRange(_) => "S value out of range 0-255",
            ParseError::UnsupportedGCode(_) => "Unsupported G-code number",
            ParseError::NoCommand => "No supported G/M command found",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::DuplicateAxisName(name) => write!(f, "Duplicate axis name: '{}'", name),
            ConfigError::InvalidMoveSpeed(v) => {
                write!(f, "Invalid move speed: {}. Must be > 0", v)
            }
            ConfigError::InvalidStepPulse(v) => {
                write!(f, "Invalid step pulse width: {} us. Must be >= 1", v)
            }
            ConfigError::InvalidStepsPerUnit(v) => {
                write!(f, "Invalid steps per unit: {}. Must be > 0", v)
            }
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::Pin(pin) => write!(f, "GPIO operation failed on {} line", pin.line()),
            MotorError::Disabled => write!(f, "Axis is disabled"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::Timeout { elapsed_ms } => {
                write!(f, "Timed out after {} ms", elapsed_ms)
            }
            MotionError::Blocked { position, target } => {
                write!(f, "Blocked by limit switch at {} before reaching {}", position, target)
            }
            MotionError::BackOffBlocked => {
                write!(f, "Cannot back off switch, opposite limit asserted")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<PinError> for Error {
    fn from(e: PinError) -> Self {
        Error::Motor(MotorError::Pin(e))
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
