//! Error types for RDA encoding, addressing and the serde bridge.
//!
//! Parsing an RDA string never fails: a malformed header simply makes the whole
//! input a dimension-0 scalar. Errors come from three places:
//!
//! - **Dimension limit**: an operation needs one more nesting level than the
//!   pool of default delimiter characters can provide
//! - **Invalid encoding**: a custom [`Encoding`](crate::Encoding) was built from
//!   characters that cannot act as delimiters or escape character
//! - **Serde bridge**: a stored string could not be read as the requested type,
//!   or a reader/writer failed
//!
//! ## Examples
//!
//! ```rust
//! use rda::{Encoding, Error};
//!
//! let err = Encoding::with_delimiters(['|', '|'], '\\').unwrap_err();
//! assert!(matches!(err, Error::InvalidEncoding { ch: '|', .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The delimiter pool cannot supply the requested number of levels.
    #[error("Maximum RDA dimension limit ({limit}) reached, cannot allocate {requested} delimiter levels")]
    DimensionLimit { requested: usize, limit: usize },

    /// A character cannot be used as a delimiter or escape character.
    #[error("Invalid encoding character {ch:?}: {reason}")]
    InvalidEncoding { ch: char, reason: String },

    /// A stored value could not be read as the requested type.
    #[error("Type mismatch: expected {expected}, found {found:?}")]
    TypeMismatch { expected: String, found: String },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a dimension-limit error for a request of `requested` delimiter levels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rda::Error;
    ///
    /// let err = Error::dimension_limit(41, 40);
    /// assert!(err.to_string().contains("(40)"));
    /// ```
    pub fn dimension_limit(requested: usize, limit: usize) -> Self {
        Error::DimensionLimit { requested, limit }
    }

    /// Creates an invalid-encoding error for `ch`.
    pub fn invalid_encoding(ch: char, reason: &str) -> Self {
        Error::InvalidEncoding {
            ch,
            reason: reason.to_string(),
        }
    }

    /// Creates a type mismatch error when a scalar cannot be read as `expected`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rda::Error;
    ///
    /// let err = Error::type_mismatch("u32", "abc");
    /// assert!(err.to_string().contains("expected u32"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
