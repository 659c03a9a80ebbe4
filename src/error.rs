//! Error types for WowAce encoding, decoding and print-safe transport.
//!
//! Every failure aborts the whole operation: a decode never returns a partially
//! built value and a transport decode never returns partial bytes.
//!
//! ## Error Categories
//!
//! - **Format**: malformed wire input (missing `^1`/`^^` delimiters, unknown type
//!   tags, unterminated tables, symbols outside the transport alphabet, trailing
//!   input). Positions are byte offsets into the input.
//! - **Value**: the caller asked to encode something the format cannot carry,
//!   such as NaN or a tree nested deeper than the configured limit.
//! - **Data**: a well-formed document does not fit the requested Rust type.
//! - **Io**: reading from or writing to an I/O stream failed.
//!
//! ## Examples
//!
//! ```rust
//! use serde_wowace::{from_str, ErrorKind, Value};
//!
//! let err = from_str::<Value>("^1^Qfoo^^").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Format);
//! assert!(err.to_string().contains("^Q"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed WowAce input
    #[error("Invalid WowAce format at offset {offset}: {msg}")]
    InvalidFormat { offset: usize, msg: String },

    /// Input ended where more was required
    #[error("Unexpected end of input at offset {offset}: expected {expected}")]
    UnexpectedEof { offset: usize, expected: String },

    /// Type marker not defined by the format
    #[error("Unsupported type tag '^{tag}' at offset {offset}")]
    UnsupportedTag { offset: usize, tag: char },

    /// Bytes left between the top-level value and the `^^` terminator
    #[error("Trailing input at offset {offset}: {remaining} byte(s) after the top-level value")]
    TrailingInput { offset: usize, remaining: usize },

    /// Character outside the 64-symbol print alphabet
    #[error("Invalid print-safe symbol {symbol:?} at position {position}")]
    InvalidSymbol { position: usize, symbol: char },

    /// Value that cannot be represented on the wire
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Custom error raised while mapping a decoded value onto a Rust type
    #[error("Error: {0}")]
    Custom(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input; see the module docs.
    Format,
    /// Unencodable value.
    Value,
    /// Decoded data does not match the target type.
    Data,
    /// Underlying reader or writer failed.
    Io,
}

impl Error {
    /// Creates a format error at the given byte offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wowace::Error;
    ///
    /// let err = Error::invalid_format(7, "missing '^^' terminator");
    /// assert!(err.to_string().contains("offset 7"));
    /// ```
    pub fn invalid_format(offset: usize, msg: &str) -> Self {
        Error::InvalidFormat {
            offset,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(offset: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            offset,
            expected: expected.to_string(),
        }
    }

    /// Creates an unsupported type tag error.
    pub fn unsupported_tag(offset: usize, tag: u8) -> Self {
        Error::UnsupportedTag {
            offset,
            tag: char::from(tag),
        }
    }

    /// Creates an unsupported value error (the encode-side failure).
    pub fn unsupported_value(msg: &str) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wowace::{Error, ErrorKind};
    ///
    /// let err = Error::custom("missing field `id`");
    /// assert_eq!(err.kind(), ErrorKind::Data);
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the category this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidFormat { .. }
            | Error::UnexpectedEof { .. }
            | Error::UnsupportedTag { .. }
            | Error::TrailingInput { .. }
            | Error::InvalidSymbol { .. } => ErrorKind::Format,
            Error::UnsupportedValue(_) => ErrorKind::Value,
            Error::Custom(_) => ErrorKind::Data,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns `true` for malformed-input errors.
    #[inline]
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self.kind(), ErrorKind::Format)
    }

    /// Returns `true` for unencodable-value errors.
    #[inline]
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self.kind(), ErrorKind::Value)
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
