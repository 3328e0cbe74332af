//! Error types for rotating-table.
//!
//! Provides unified error handling across configuration, line acquisition and
//! value writes. Every error is terminal to the operation that raised it;
//! nothing in this crate retries.

use core::fmt;

/// Provider message attached to acquisition and write failures.
pub type Reason = heapless::String<64>;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all rotating-table operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Line bundle acquisition error
    Acquire(AcquireError),
    /// Value push rejected by the provider
    Write(WriteError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Wrong number of line offsets (must be exactly 4)
    LineCount(usize),
    /// The same line offset appears twice
    DuplicateLineOffset(u32),
    /// Chip path is empty
    EmptyChipPath,
    /// Consumer tag is empty
    EmptyConsumer,
    /// Step interval must be > 0 microseconds
    InvalidStepInterval(u32),
    /// Stops per revolution must be within 1..=steps_per_revolution
    InvalidStops {
        /// Requested stops per revolution
        stops: u32,
        /// Steps in one full revolution
        steps_per_revolution: u32,
    },
    /// Revolutions must be > 0
    InvalidRevolutions(u32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Line bundle acquisition errors, one per acquisition stage.
///
/// Whatever stage fails, every sub-resource allocated before it has already
/// been released when this error reaches the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquireError {
    /// The chip could not be opened
    ChipOpen(Reason),
    /// Direction settings or line configuration could not be allocated
    ConfigAlloc(Reason),
    /// Attaching the output settings to a line failed
    LineBind {
        /// Offset whose attachment failed
        offset: u32,
        /// Provider message
        reason: Reason,
    },
    /// The request descriptor could not be allocated
    RequestConfig(Reason),
    /// The final line request was refused
    LineRequest(Reason),
}

impl AcquireError {
    /// Short name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            AcquireError::ChipOpen(_) => "chip-open",
            AcquireError::ConfigAlloc(_) => "config-alloc",
            AcquireError::LineBind { .. } => "line-bind",
            AcquireError::RequestConfig(_) => "request-config",
            AcquireError::LineRequest(_) => "line-request",
        }
    }

    /// Provider message for the failure.
    pub fn reason(&self) -> &str {
        match self {
            AcquireError::ChipOpen(r)
            | AcquireError::ConfigAlloc(r)
            | AcquireError::RequestConfig(r)
            | AcquireError::LineRequest(r) => r.as_str(),
            AcquireError::LineBind { reason, .. } => reason.as_str(),
        }
    }
}

/// A value push rejected by the provider.
///
/// The bundle stays valid and owned after a write error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteError {
    /// Step index being written, when the write came from a drive loop
    pub step: Option<i64>,
    /// Provider message
    pub reason: Reason,
}

impl WriteError {
    /// Create a write error from a provider message.
    pub fn new(reason: Reason) -> Self {
        Self { step: None, reason }
    }

    /// Tag the error with the step index that was being written.
    pub fn at_step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }
}

/// Render any displayable value into a fixed-capacity string, truncating.
pub(crate) fn reason<const N: usize>(value: &dyn fmt::Display) -> heapless::String<N> {
    use core::fmt::Write;

    struct Truncating<'a, const N: usize>(&'a mut heapless::String<N>);

    impl<const N: usize> Write for Truncating<'_, N> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for c in s.chars() {
                if self.0.push(c).is_err() {
                    break;
                }
            }
            Ok(())
        }
    }

    let mut buf = heapless::String::new();
    let _ = write!(Truncating(&mut buf), "{}", value);
    buf
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Acquire(e) => write!(f, "Acquisition error: {}", e),
            Error::Write(e) => write!(f, "Write error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::LineCount(n) => write!(f, "Expected 4 line offsets, got {}", n),
            ConfigError::DuplicateLineOffset(offset) => {
                write!(f, "Line offset {} is listed more than once", offset)
            }
            ConfigError::EmptyChipPath => write!(f, "Chip path must not be empty"),
            ConfigError::EmptyConsumer => write!(f, "Consumer tag must not be empty"),
            ConfigError::InvalidStepInterval(v) => {
                write!(f, "Invalid step interval: {} us. Must be > 0", v)
            }
            ConfigError::InvalidStops { stops, steps_per_revolution } => write!(
                f,
                "Invalid stops per revolution: {}. Must be 1-{}",
                stops, steps_per_revolution
            ),
            ConfigError::InvalidRevolutions(v) => {
                write!(f, "Invalid revolutions: {}. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireError::ChipOpen(r) => write!(f, "Unable to open GPIO chip: {}", r),
            AcquireError::ConfigAlloc(r) => {
                write!(f, "Unable to allocate line configuration: {}", r)
            }
            AcquireError::LineBind { offset, reason } => {
                write!(f, "Unable to configure line {}: {}", offset, reason)
            }
            AcquireError::RequestConfig(r) => {
                write!(f, "Unable to allocate request configuration: {}", r)
            }
            AcquireError::LineRequest(r) => write!(f, "Line request refused: {}", r),
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.step {
            Some(step) => write!(f, "Setting line values failed at step {}: {}", step, self.reason),
            None => write!(f, "Setting line values failed: {}", self.reason),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<AcquireError> for Error {
    fn from(e: AcquireError) -> Self {
        Error::Acquire(e)
    }
}

impl From<WriteError> for Error {
    fn from(e: WriteError) -> Self {
        Error::Write(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for AcquireError {}

#[cfg(feature = "std")]
impl std::error::Error for WriteError {}
