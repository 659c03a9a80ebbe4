//! WowAce wire format.
//!
//! This module documents the format as implemented by this library and holds
//! the marker constants shared by the encoder and the parser.
//!
//! # Overview
//!
//! A document is a single value wrapped in a version prefix and a terminator.
//! Every value starts with a two-byte type marker (`^` followed by a tag
//! letter). Payloads never contain a raw `^`, so the next marker always ends the
//! current payload.
//!
//! ```text
//! document    := "^1" value "^^"
//! value       := null | bool | int | float | string | table
//! null        := "^Z"
//! bool        := "^B" | "^b"
//! int         := "^N" digits
//! float       := "^N" inf_literal | "^F" digits "^f" digits
//! inf_literal := "1.#INF" | "-1.#INF"
//! string      := "^S" escaped_chars
//! table       := "^T" (value value)* "^t"
//! ```
//!
//! # Numbers
//!
//! | Kind | Wire | Example |
//! |------|------|---------|
//! | Integer | `^N` + decimal digits | `^N-42` |
//! | Float (finite) | `^F` mantissa `^f` exponent | `^F6755399441055744^f2` (3.0) |
//! | +Infinity | `^N1.#INF` | |
//! | -Infinity | `^N-1.#INF` | |
//!
//! Finite floats use the frexp decomposition: the value equals
//! `mantissa * 2^(exponent - 53)` where `mantissa / 2^53` lies in `[0.5, 1)`.
//! The encoder always uses this form for floats, even integral ones, so the
//! numeric kind survives a round trip. The parser also accepts decimal float
//! literals after `^N` (`^N1.5`) as produced by other encoders.
//!
//! # Strings
//!
//! Strings are byte sequences. The escape character is `~`:
//!
//! | Byte | Escape |
//! |------|--------|
//! | 0x00–0x20 (except below) | `~` + (byte + 64) |
//! | 0x13, 0x14, 0x15 | `~s`, `~t`, `~u` |
//! | 0x1E | `~z` |
//! | `^` | `~U` |
//! | `~` | `~T` |
//! | 0x7F | `~S` |
//!
//! The four exceptions exist because byte + 64 would produce `S`, `T`, `U` (taken
//! by the escapes below them) or a raw `^`. The parser additionally accepts the
//! classic `~{`, `~|`, `~}` escapes for 0x7F, `~` and `^`.
//!
//! # Tables
//!
//! Tables are key/value pairs in insertion order. Sequences are written as
//! tables keyed `1..N`; when a decoded table has exactly the keys `1..N` it is
//! returned as a sequence.
//!
//! ```text
//! ["a", "b"]        =>  ^1^T^N1^Sa^N2^Sb^t^^
//! {"hp": 100}       =>  ^1^T^Shp^N100^t^^
//! ```

/// Document prefix, including the format version.
pub const PREFIX: &[u8] = b"^1";
/// Document terminator.
pub const SUFFIX: &[u8] = b"^^";
/// Marker byte opening every type tag.
pub const MARKER: u8 = b'^';
/// String escape byte.
pub const ESCAPE: u8 = b'~';

pub const TAG_STRING: u8 = b'S';
pub const TAG_NUMBER: u8 = b'N';
pub const TAG_FLOAT: u8 = b'F';
pub const TAG_TABLE: u8 = b'T';
pub const TAG_TRUE: u8 = b'B';
pub const TAG_FALSE: u8 = b'b';
pub const TAG_NULL: u8 = b'Z';

/// Separator between mantissa and exponent of a `^F` float.
pub const FLOAT_EXPONENT: &[u8] = b"^f";
/// Closes a table.
pub const TABLE_END: &[u8] = b"^t";

pub const POSITIVE_INFINITY: &[u8] = b"1.#INF";
pub const NEGATIVE_INFINITY: &[u8] = b"-1.#INF";
