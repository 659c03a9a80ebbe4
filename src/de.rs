//! WowAce deserialization.
//!
//! Decoding happens in two steps. The [`Deserializer`] parses a document into a
//! [`Value`] tree, then the tree is mapped onto the requested Rust type through
//! serde. The parser reads each byte once and never backtracks.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_wowace::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let point: Point = from_str("^1^T^Sx^N1^Sy^N2^t^^").unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```
//!
//! ## Sequences
//!
//! Tables keyed exactly `1..N` come back as sequences:
//!
//! ```rust
//! use serde_wowace::from_str;
//!
//! let names: Vec<String> = from_str("^1^T^N1^Sa^N2^Sb^t^^").unwrap();
//! assert_eq!(names, vec!["a", "b"]);
//! ```

use crate::cursor::Cursor;
use crate::float::ldexp;
use crate::format::{
    ESCAPE, FLOAT_EXPONENT, MARKER, NEGATIVE_INFINITY, POSITIVE_INFINITY, PREFIX, SUFFIX,
    TABLE_END, TAG_FALSE, TAG_FLOAT, TAG_NULL, TAG_NUMBER, TAG_STRING, TAG_TABLE, TAG_TRUE,
};
use crate::{Error, Result, Table, Value, WowAceOptions};
use num_bigint::BigInt;
use serde::de::{self, Unexpected};
use serde::forward_to_deserialize_any;
use std::borrow::Cow;

/// The WowAce document parser.
///
/// Created via [`Deserializer::new`] over an already normalized buffer. Use
/// [`Deserializer::parse`] to apply [`WowAceOptions::strip_control`] first.
/// Offsets in errors refer to the buffer the parser was given.
pub struct Deserializer<'de> {
    input: &'de [u8],
    cursor: Cursor<'de>,
    options: WowAceOptions,
    depth: usize,
}

impl<'de> Deserializer<'de> {
    pub fn new(input: &'de [u8], options: WowAceOptions) -> Self {
        Deserializer {
            input,
            cursor: Cursor::new(&[]),
            options,
            depth: 0,
        }
    }

    /// Normalizes `input` according to `options` and parses one document.
    ///
    /// # Errors
    ///
    /// Returns a format error for any malformed input.
    pub fn parse(input: &[u8], options: WowAceOptions) -> Result<Value> {
        let input = if options.strip_control {
            strip_control(input)
        } else {
            Cow::Borrowed(input)
        };
        Deserializer::new(&input, options).parse_document()
    }

    /// Parses the whole buffer as a single `^1 ... ^^` document.
    ///
    /// # Errors
    ///
    /// Fails on a missing prefix or terminator, on any malformed value and on
    /// bytes left over after the top-level value.
    pub fn parse_document(&mut self) -> Result<Value> {
        self.parse_body().map_err(|e| {
            tracing::debug!("wowace decode rejected: {e}");
            e
        })
    }

    fn parse_body(&mut self) -> Result<Value> {
        let input = self.input;
        if !input.starts_with(PREFIX) {
            return Err(if input.len() < PREFIX.len() {
                Error::unexpected_eof(0, "'^1' prefix")
            } else {
                Error::invalid_format(0, "missing '^1' prefix")
            });
        }
        if input.len() < PREFIX.len() + SUFFIX.len() || !input.ends_with(SUFFIX) {
            return Err(Error::invalid_format(input.len(), "missing '^^' terminator"));
        }

        self.cursor = Cursor::new(&input[..input.len() - SUFFIX.len()]);
        self.cursor.consume_literal(PREFIX)?;
        let value = self.parse_value()?;

        if !self.cursor.at_end() {
            return Err(Error::TrailingInput {
                offset: self.cursor.pos(),
                remaining: self.cursor.remaining(),
            });
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<Value> {
        let offset = self.cursor.pos();
        let marker = self.cursor.take(2, "type marker")?;
        if marker[0] != MARKER {
            return Err(Error::invalid_format(offset, "expected '^' type marker"));
        }

        match marker[1] {
            TAG_STRING => self.parse_string(),
            TAG_NUMBER => self.parse_number(),
            TAG_FLOAT => self.parse_float(),
            TAG_TABLE => self.parse_table(offset),
            TAG_TRUE => Ok(Value::Bool(true)),
            TAG_FALSE => Ok(Value::Bool(false)),
            TAG_NULL => Ok(Value::Null),
            tag => Err(Error::unsupported_tag(offset, tag)),
        }
    }

    fn parse_string(&mut self) -> Result<Value> {
        let start = self.cursor.pos();
        let run = self.cursor.consume_run_until(&[MARKER]);
        Ok(Value::String(unescape(run, start)?))
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.cursor.pos();
        let run = self.cursor.consume_run_until(&[MARKER]);

        if run == POSITIVE_INFINITY || run == b"inf" {
            return Ok(Value::Float(f64::INFINITY));
        }
        if run == NEGATIVE_INFINITY || run == b"-inf" {
            return Ok(Value::Float(f64::NEG_INFINITY));
        }
        if run.is_empty() {
            return Err(Error::invalid_format(start, "empty number"));
        }

        let text = std::str::from_utf8(run)
            .map_err(|_| Error::invalid_format(start, "number is not ASCII"))?;
        if is_integer_literal(run) {
            return match text.parse::<i64>() {
                Ok(i) => Ok(Value::Integer(i)),
                Err(_) => text
                    .parse::<BigInt>()
                    .map(Value::from)
                    .map_err(|_| Error::invalid_format(start, &format!("invalid integer {text}"))),
            };
        }

        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Float(f)),
            _ => Err(Error::invalid_format(start, &format!("invalid number {text}"))),
        }
    }

    fn parse_float(&mut self) -> Result<Value> {
        let mantissa = self.cursor.consume_int()?;
        self.cursor.consume_literal(FLOAT_EXPONENT)?;
        let exponent = self.cursor.consume_int()?;
        Ok(Value::Float(ldexp(mantissa, exponent)))
    }

    fn parse_table(&mut self, offset: usize) -> Result<Value> {
        if self.depth >= self.options.max_depth {
            return Err(Error::invalid_format(
                offset,
                &format!("nesting exceeds depth limit of {}", self.options.max_depth),
            ));
        }
        self.depth += 1;

        let mut table = Table::new();
        while !self.cursor.peek_literal(TABLE_END) {
            if self.cursor.at_end() {
                return Err(Error::unexpected_eof(self.cursor.pos(), "'^t'"));
            }
            let key = self.parse_value()?;
            let value = self.parse_value()?;
            table.insert(key, value);
        }
        self.cursor.consume_literal(TABLE_END)?;

        self.depth -= 1;
        Ok(table.into_value())
    }
}

fn strip_control(input: &[u8]) -> Cow<'_, [u8]> {
    if !input.iter().any(|&b| b <= 0x20) {
        return Cow::Borrowed(input);
    }
    let stripped: Vec<u8> = input.iter().copied().filter(|&b| b > 0x20).collect();
    tracing::trace!(
        "stripped {} control byte(s) from wowace input",
        input.len() - stripped.len()
    );
    Cow::Owned(stripped)
}

fn is_integer_literal(run: &[u8]) -> bool {
    let digits = run.strip_prefix(b"-").unwrap_or(run);
    !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

/// Reverses the string escapes in one pass. `start` is the offset of `run` in
/// the input, used for error positions.
fn unescape(run: &[u8], start: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(run.len());
    let mut bytes = run.iter().copied().enumerate();
    while let Some((index, byte)) = bytes.next() {
        if byte != ESCAPE {
            out.push(byte);
            continue;
        }

        let Some((_, code)) = bytes.next() else {
            return Err(Error::invalid_format(start + index, "dangling '~' escape"));
        };
        let decoded = match code {
            b's' => 0x13,
            b't' => 0x14,
            b'u' => 0x15,
            b'z' => 0x1e,
            b'S' | b'{' => 0x7f,
            b'T' | b'|' => b'~',
            b'U' | b'}' => b'^',
            code if code >= 64 => code - 64,
            code => {
                return Err(Error::invalid_format(
                    start + index,
                    &format!("invalid escape '~{}'", char::from(code)),
                ))
            }
        };
        out.push(decoded);
    }
    Ok(out)
}

impl Value {
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Value::Null => Unexpected::Unit,
            Value::Bool(b) => Unexpected::Bool(*b),
            Value::Integer(i) => Unexpected::Signed(*i),
            Value::BigInt(_) => Unexpected::Other("big integer"),
            Value::Float(f) => Unexpected::Float(*f),
            Value::String(s) => match std::str::from_utf8(s) {
                Ok(text) => Unexpected::Str(text),
                Err(_) => Unexpected::Bytes(s),
            },
            Value::Array(_) => Unexpected::Seq,
            Value::Table(_) => Unexpected::Map,
        }
    }
}

/// Maps a decoded [`Value`] onto a Rust type.
pub(crate) struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub(crate) fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }

    fn invalid_type<E: de::Expected>(&self, expected: &E) -> Error {
        de::Error::invalid_type(self.value.unexpected(), expected)
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Integer(i) => visitor.visit_i64(i),
            Value::BigInt(b) => {
                if let Ok(u) = u64::try_from(&b) {
                    visitor.visit_u64(u)
                } else if let Ok(i) = i128::try_from(&b) {
                    visitor.visit_i128(i)
                } else if let Ok(u) = u128::try_from(&b) {
                    visitor.visit_u128(u)
                } else {
                    visitor.visit_string(b.to_string())
                }
            }
            Value::Float(f) => visitor.visit_f64(f),
            Value::String(s) => match String::from_utf8(s) {
                Ok(text) => visitor.visit_string(text),
                Err(e) => visitor.visit_byte_buf(e.into_bytes()),
            },
            Value::Array(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_byte_buf(s),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::String(s) => {
                visitor.visit_seq(SeqDeserializer::new(s.into_iter().map(Value::from).collect()))
            }
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            // Sequences are tables keyed 1..N.
            Value::Array(items) => visitor.visit_map(MapDeserializer::new(Table::from(items))),
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            // An empty table is decoded as an empty sequence.
            Value::Array(items) if items.is_empty() => {
                visitor.visit_map(MapDeserializer::new(Table::new()))
            }
            Value::Array(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(_) => visitor.visit_enum(EnumDeserializer {
                variant: self.value,
                value: None,
            }),
            Value::Table(table) if table.len() == 1 => {
                let mut entries = table.into_iter();
                match entries.next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    None => Err(Error::custom("enum table has no variant")),
                }
            }
            _ => Err(self.invalid_type(&"string or single-entry table")),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        drop(self);
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        unit unit_struct identifier
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<Value, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(table: Table) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: Value,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(self.variant))?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            Some(other) => Err(de::Error::invalid_type(other.unexpected(), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"newtype variant",
            )),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(items)) => visitor.visit_seq(SeqDeserializer::new(items)),
            Some(other) => Err(de::Error::invalid_type(other.unexpected(), &"tuple variant")),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"tuple variant",
            )),
        }
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(value) => {
                de::Deserializer::deserialize_struct(ValueDeserializer::new(value), "", fields, visitor)
            }
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"struct variant",
            )),
        }
    }
}
