//! # serde_wowace
//!
//! A Serde-compatible library for the WowAce value serialization format, plus the
//! print-safe transport encoding used to move encoded payloads through text-only
//! channels.
//!
//! ## What is WowAce?
//!
//! WowAce is a self-describing, ASCII-safe format for nested tables of numbers,
//! strings and booleans. Every value carries a two-byte type marker, strings are
//! escaped so they never contain the marker byte, and the whole document is
//! wrapped in a `^1` prefix and a `^^` terminator. Addon profiles and import
//! strings are the typical payloads.
//!
//! ## Key Features
//!
//! - **Serde Compatible**: Works with existing Rust types via `#[derive(Serialize, Deserialize)]`
//! - **Dynamic Values**: [`Value`] and [`Table`] model any document, including
//!   non-string table keys and non-UTF-8 strings
//! - **Exact Floats**: finite floats are written as an integer mantissa and
//!   exponent, so they round-trip bit for bit
//! - **Bounded Nesting**: a configurable depth limit guards both directions
//! - **Print-Safe Transport**: [`encode_for_print`] / [`decode_for_print`] pack
//!   bytes into a 64-symbol alphabet
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_wowace::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Character {
//!     name: String,
//!     level: u8,
//!     hardcore: bool,
//! }
//!
//! let character = Character {
//!     name: "Thrall".to_string(),
//!     level: 60,
//!     hardcore: false,
//! };
//!
//! let encoded = to_string(&character).unwrap();
//! assert_eq!(encoded, "^1^T^Sname^SThrall^Slevel^N60^Shardcore^b^t^^");
//!
//! let back: Character = from_str(&encoded).unwrap();
//! assert_eq!(character, back);
//! ```
//!
//! ### Sharing a Payload as Text
//!
//! ```rust
//! use serde_wowace::{decode_for_print, encode_for_print, from_slice, to_vec};
//!
//! let bytes = to_vec(&vec![1, 2, 3]).unwrap();
//! let text = encode_for_print(&bytes);
//! assert!(text.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'(' || b == b')'));
//!
//! let received = decode_for_print(&text).unwrap().unwrap();
//! let numbers: Vec<i32> = from_slice(&received).unwrap();
//! assert_eq!(numbers, vec![1, 2, 3]);
//! ```
//!
//! ### Dynamic Values with the wowace! Macro
//!
//! ```rust
//! use serde_wowace::{to_string, wowace};
//!
//! let data = wowace!({ "hp": 100, 1: true });
//! assert_eq!(to_string(&data).unwrap(), "^1^T^Shp^N100^N1^B^t^^");
//! ```
//!
//! ## Format Reference
//!
//! The wire grammar, number forms and escape table are documented in the
//! [`format`] module.

pub mod cursor;
pub mod de;
pub mod error;
mod float;
pub mod format;
pub mod macros;
pub mod options;
pub mod ser;
pub mod table;
pub mod transport;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, ErrorKind, Result};
pub use options::WowAceOptions;
pub use ser::{Serializer, ValueSerializer};
pub use table::Table;
pub use transport::{decode_for_print, decode_for_print_latin1, encode_for_print};
pub use value::Value;

use de::ValueDeserializer;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to WowAce bytes.
///
/// # Examples
///
/// ```rust
/// use serde_wowace::to_vec;
///
/// assert_eq!(to_vec(&true).unwrap(), b"^1^B^^");
/// ```
///
/// # Errors
///
/// Returns an error if the value contains NaN or nests deeper than the default
/// depth limit.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_vec_with_options(value, WowAceOptions::default())
}

/// Serialize any `T: Serialize` to WowAce bytes with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented on the wire.
pub fn to_vec_with_options<T>(value: &T, options: WowAceOptions) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    let mut serializer = Serializer::new(options);
    serializer.serialize_document(&value)?;
    Ok(serializer.into_inner())
}

/// Serialize any `T: Serialize` to a WowAce string.
///
/// # Examples
///
/// ```rust
/// use serde_wowace::to_string;
///
/// assert_eq!(to_string("a^b").unwrap(), "^1^Sa~Ub^^");
/// ```
///
/// # Errors
///
/// Fails like [`to_vec`], and also when a string value holds bytes that are not
/// valid UTF-8. Use [`to_vec`] for such data.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, WowAceOptions::default())
}

/// Serialize any `T: Serialize` to a WowAce string with custom options.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: WowAceOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let bytes = to_vec_with_options(value, options)?;
    String::from_utf8(bytes).map_err(|_| {
        Error::unsupported_value("document contains non-UTF-8 string bytes; use to_vec")
    })
}

/// Serialize any `T: Serialize` into an I/O stream.
///
/// # Errors
///
/// Returns an error if serialization fails or the writer fails.
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let bytes = to_vec(value)?;
    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_wowace::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.as_table().and_then(|t| t.get_field("y")), Some(&Value::from(2)));
/// ```
///
/// # Errors
///
/// Returns an error if the `Serialize` implementation fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Deserialize an instance of type `T` from WowAce bytes.
///
/// Bytes 0x00–0x20 are ignored, so line-wrapped payloads decode as-is.
///
/// # Examples
///
/// ```rust
/// use serde_wowace::from_slice;
///
/// let n: i64 = from_slice(b"^1^N42^^").unwrap();
/// assert_eq!(n, 42);
/// ```
///
/// # Errors
///
/// Returns a format error for malformed input and a data error when the
/// document does not fit `T`.
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_slice_with_options(v, WowAceOptions::default())
}

/// Deserialize an instance of type `T` from WowAce bytes with custom options.
///
/// # Errors
///
/// See [`from_slice`].
pub fn from_slice_with_options<T>(v: &[u8], options: WowAceOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = Deserializer::parse(v, options)?;
    from_value(value)
}

/// Deserialize an instance of type `T` from a WowAce string.
///
/// # Examples
///
/// ```rust
/// use serde_wowace::from_str;
///
/// let s: String = from_str("^1^Sa~Ub^^").unwrap();
/// assert_eq!(s, "a^b");
/// ```
///
/// # Errors
///
/// See [`from_slice`].
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_slice(s.as_bytes())
}

/// Deserialize an instance of type `T` from an I/O stream of WowAce.
///
/// # Examples
///
/// ```rust
/// use serde_wowace::from_reader;
/// use std::io::Cursor;
///
/// let flags: Vec<bool> = from_reader(Cursor::new(b"^1^T^N1^B^N2^b^t^^")).unwrap();
/// assert_eq!(flags, vec![true, false]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is malformed, or the document
/// does not fit `T`.
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}

/// Interpret a [`Value`] as an instance of type `T`.
///
/// # Errors
///
/// Returns a data error when the value does not fit `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}
