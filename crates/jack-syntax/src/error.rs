//! Error handling types shared by every stage of the Jack syntax analyzer.
//!
//! Grammar mismatches are *not* errors in this sense: the parser records them
//! as inline `<error>` nodes and keeps going. [`Error`] is reserved for faults
//! that stop a stage outright, such as running the token cursor past the end
//! of the stream or failing to read a source file.
//!
//! # Examples
//!
//! ## Basic error creation
//!
//! ```rust
//! use jack_syntax::error::{Error, Result, error};
//!
//! let simple_error = Error::new("Something went wrong");
//! let located_error = Error::at_line("Unexpected end of input", 12);
//!
//! fn might_fail() -> Result<i32> {
//!     error("Operation failed")
//! }
//! assert!(might_fail().is_err());
//! ```
//!
//! ## Error propagation
//!
//! ```rust
//! use jack_syntax::error::{Error, Result, error_at};
//!
//! fn parse_constant(s: &str, line: usize) -> Result<u16> {
//!     s.parse()
//!         .map_err(|_| Error::at_line(format!("Invalid integer constant: {}", s), line))
//! }
//!
//! fn checked(s: &str) -> Result<u16> {
//!     let value = parse_constant(s, 3)?;
//!     if value > 32767 {
//!         error_at(3, "Integer constant out of range")
//!     } else {
//!         Ok(value)
//!     }
//! }
//!
//! assert_eq!(checked("42").unwrap(), 42);
//! assert!(checked("40000").is_err());
//! ```

use std::fmt;

/// A fatal error raised while scanning, parsing or driving the analyzer.
///
/// Each error carries a human-readable message and, when it can be tied to
/// the source, the 1-based line it came from.
///
/// # Examples
///
/// ```rust
/// use jack_syntax::Error;
///
/// let generic_error = Error::new("File not found");
/// assert_eq!(generic_error.to_string(), "File not found");
///
/// let located = Error::at_line("Unexpected end of input", 15);
/// assert_eq!(located.to_string(), "Unexpected end of input at line 15");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// Human-readable error message
    pub msg: String,

    /// Optional line number in the source file (1-based)
    pub line: Option<usize>,
}

impl Error {
    /// Creates a new error with no source location.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            line: None,
        }
    }

    /// Creates a new error tied to a 1-based source line.
    pub fn at_line(msg: impl Into<String>, line: usize) -> Self {
        Self {
            msg: msg.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(l) => write!(f, "{} at line {}", self.msg, l),
            None => write!(f, "{}", self.msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::new(s)
    }
}
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::new(s)
    }
}
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::new(e.to_string())
    }
}

/// A specialized `Result` type for analyzer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::new(msg))`.
pub fn error<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::new(msg))
}

/// Shorthand for `Err(Error::at_line(msg, line))`.
pub fn error_at<T>(line: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::at_line(msg, line))
}
