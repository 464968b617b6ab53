//! Error types for coil-stepper.
//!
//! Provides unified error handling across configuration, motor control and
//! command/choreography arguments.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all coil-stepper operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor or output line error
    Motor(MotorError),
    /// Malformed command or choreography argument
    Argument(ArgumentError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration, or a required builder field is missing
    ParseError(heapless::String<128>),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// Duplicate motor name in configuration
    DuplicateMotorName(heapless::String<32>),
    /// The same line is assigned twice
    DuplicatePin {
        /// Motor declaring the line a second time
        motor: heapless::String<32>,
        /// Offending line number
        pin: u8,
    },
    /// Line number above the configured maximum
    InvalidPin {
        /// Motor declaring the line
        motor: heapless::String<32>,
        /// Offending line number
        pin: u8,
    },
    /// More motors than the configuration can hold
    TooManyMotors,
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// A write to an output line failed
    PinError,
    /// Line is already claimed by another live motor
    PinConflict(u8),
    /// Line number is outside the platform's valid range
    InvalidPin(u8),
    /// Motor has been cleaned up and no longer owns its lines
    Detached,
}

/// Errors in command or choreography arguments.
///
/// Reported before any hardware state is touched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgumentError {
    /// Command keyword not recognised
    UnknownCommand(heapless::String<32>),
    /// A required argument is missing
    MissingArgument(&'static str),
    /// Argument could not be parsed as an integer
    InvalidInteger(heapless::String<32>),
    /// More arguments than the command accepts
    UnexpectedArgument(heapless::String<32>),
    /// Motor code not present in the pin table
    UnknownMotor(heapless::String<32>),
    /// Motor code is configured but not currently active
    MotorNotActive(heapless::String<32>),
    /// Motor code is already active
    MotorAlreadyActive(heapless::String<32>),
    /// Every configured motor is already active
    NoFreeMotor,
    /// A pattern was given the same motor twice
    SameMotor(heapless::String<32>),
    /// Step arithmetic would overflow
    Overflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Argument(e) => write!(f, "Argument error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::DuplicateMotorName(name) => write!(f, "Duplicate motor name: '{}'", name),
            ConfigError::DuplicatePin { motor, pin } => {
                write!(f, "Motor '{}' uses line {} which is already assigned", motor, pin)
            }
            ConfigError::InvalidPin { motor, pin } => {
                write!(f, "Motor '{}' uses line {} outside the valid range", motor, pin)
            }
            ConfigError::TooManyMotors => write!(f, "Too many motors in configuration"),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::PinConflict(line) => write!(f, "Line {} is already in use", line),
            MotorError::InvalidPin(line) => write!(f, "Line {} is not a valid output line", line),
            MotorError::Detached => write!(f, "Motor lines have been released"),
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::UnknownCommand(cmd) => write!(f, "Unknown command '{}'", cmd),
            ArgumentError::MissingArgument(what) => write!(f, "Missing argument: {}", what),
            ArgumentError::InvalidInteger(arg) => write!(f, "'{}' is not an integer", arg),
            ArgumentError::UnexpectedArgument(arg) => write!(f, "Unexpected argument '{}'", arg),
            ArgumentError::UnknownMotor(name) => write!(f, "Unknown motor code '{}'", name),
            ArgumentError::MotorNotActive(name) => write!(f, "Motor {} is not listed", name),
            ArgumentError::MotorAlreadyActive(name) => write!(f, "Motor {} is already listed", name),
            ArgumentError::NoFreeMotor => write!(f, "Not enough pins for a new motor"),
            ArgumentError::SameMotor(name) => write!(f, "Motor {} given twice", name),
            ArgumentError::Overflow => write!(f, "Step count overflow"),
        }
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

impl From<ArgumentError> for Error {
    fn from(e: ArgumentError) -> Self {
        Error::Argument(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for ArgumentError {}

/// Build a bounded string from arbitrary input, truncating on a char boundary.
pub(crate) fn truncated<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
