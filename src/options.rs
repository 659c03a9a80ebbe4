//! Configuration options for WowAce encoding and decoding.
//!
//! ## Examples
//!
//! ```rust
//! use serde_wowace::{from_slice_with_options, WowAceOptions, Value};
//!
//! // Reject anything nested deeper than 8 tables.
//! let options = WowAceOptions::new().with_max_depth(8);
//! let value: Value = from_slice_with_options(b"^1^T^t^^", options).unwrap();
//! assert_eq!(value, Value::Array(vec![]));
//! ```

/// Default nesting limit for tables on both encode and decode.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options shared by the encoder and the parser.
///
/// # Examples
///
/// ```rust
/// use serde_wowace::WowAceOptions;
///
/// let options = WowAceOptions::new()
///     .with_max_depth(32)
///     .with_strip_control(false);
/// assert_eq!(options.max_depth, 32);
/// assert!(!options.strip_control);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WowAceOptions {
    /// Maximum table nesting. Deeper input fails to decode, deeper values fail
    /// to encode.
    pub max_depth: usize,
    /// Drop bytes 0x00–0x20 from the input before parsing. Encoded documents
    /// never contain such bytes, so this only affects whitespace or line breaks
    /// added in transit.
    pub strip_control: bool,
}

impl Default for WowAceOptions {
    fn default() -> Self {
        WowAceOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            strip_control: true,
        }
    }
}

impl WowAceOptions {
    /// Creates default options (depth limit 128, control stripping enabled).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wowace::WowAceOptions;
    ///
    /// let options = WowAceOptions::new();
    /// assert_eq!(options.max_depth, 128);
    /// assert!(options.strip_control);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum table nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enables or disables stripping of control bytes and whitespace before
    /// decoding.
    #[must_use]
    pub fn with_strip_control(mut self, strip_control: bool) -> Self {
        self.strip_control = strip_control;
        self
    }
}
