//! WowAce serialization.
//!
//! This module holds two serializers:
//!
//! - [`Serializer`] writes a [`Value`] tree as a WowAce document.
//! - [`ValueSerializer`] turns any `T: Serialize` into a [`Value`], which is how
//!   the crate-level [`to_vec`](crate::to_vec) family supports arbitrary Rust
//!   types.
//!
//! ## Usage
//!
//! ```rust
//! use serde_wowace::{to_string, Value};
//!
//! assert_eq!(to_string(&42).unwrap(), "^1^N42^^");
//! assert_eq!(to_string(&Value::from("a^b")).unwrap(), "^1^Sa~Ub^^");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_wowace::{Serializer, Value, WowAceOptions};
//!
//! let mut serializer = Serializer::new(WowAceOptions::new());
//! serializer
//!     .serialize_document(&Value::Array(vec![Value::from(true), Value::Null]))
//!     .unwrap();
//! assert_eq!(serializer.into_inner(), b"^1^T^N1^B^N2^Z^t^^");
//! ```

use crate::float::frexp;
use crate::format::{
    ESCAPE, FLOAT_EXPONENT, NEGATIVE_INFINITY, POSITIVE_INFINITY, PREFIX, SUFFIX, TABLE_END,
};
use crate::{Error, Result, Table, Value, WowAceOptions};
use num_bigint::BigInt;
use serde::{ser, Serialize};

/// The WowAce document writer.
///
/// Created via [`Serializer::new`]; feed it one value with
/// [`Serializer::serialize_document`] and take the bytes with
/// [`Serializer::into_inner`].
pub struct Serializer {
    output: Vec<u8>,
    options: WowAceOptions,
    depth: usize,
}

impl Serializer {
    pub fn new(options: WowAceOptions) -> Self {
        Serializer {
            output: Vec::with_capacity(256),
            options,
            depth: 0,
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.output
    }

    /// Writes `^1`, the value, and `^^`.
    ///
    /// On error the buffer holds a partial document and must be discarded.
    ///
    /// # Errors
    ///
    /// Fails with a value error for NaN and for nesting deeper than
    /// [`WowAceOptions::max_depth`].
    pub fn serialize_document(&mut self, value: &Value) -> Result<()> {
        self.output.extend_from_slice(PREFIX);
        self.write_value(value).map_err(|e| {
            tracing::debug!("wowace encode rejected: {e}");
            e
        })?;
        self.output.extend_from_slice(SUFFIX);
        Ok(())
    }

    fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.output.extend_from_slice(b"^Z"),
            Value::Bool(true) => self.output.extend_from_slice(b"^B"),
            Value::Bool(false) => self.output.extend_from_slice(b"^b"),
            Value::Integer(i) => self.write_integer(&i.to_string()),
            Value::BigInt(b) => self.write_integer(&b.to_string()),
            Value::Float(f) => self.write_float(*f)?,
            Value::String(s) => self.write_string(s),
            Value::Array(items) => {
                self.enter()?;
                self.output.extend_from_slice(b"^T");
                for (index, item) in items.iter().enumerate() {
                    self.write_integer(&(index + 1).to_string());
                    self.write_value(item)?;
                }
                self.output.extend_from_slice(TABLE_END);
                self.depth -= 1;
            }
            Value::Table(table) => self.write_table(table)?,
        }
        Ok(())
    }

    fn write_table(&mut self, table: &Table) -> Result<()> {
        self.enter()?;
        self.output.extend_from_slice(b"^T");
        for (key, value) in table {
            self.write_value(key)?;
            self.write_value(value)?;
        }
        self.output.extend_from_slice(TABLE_END);
        self.depth -= 1;
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(Error::unsupported_value(&format!(
                "nesting exceeds depth limit of {}",
                self.options.max_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    #[inline]
    fn write_integer(&mut self, digits: &str) {
        self.output.extend_from_slice(b"^N");
        self.output.extend_from_slice(digits.as_bytes());
    }

    fn write_float(&mut self, f: f64) -> Result<()> {
        if f.is_nan() {
            return Err(Error::unsupported_value("NaN cannot be encoded"));
        }
        if f.is_infinite() {
            self.output.extend_from_slice(b"^N");
            let literal = if f > 0.0 {
                POSITIVE_INFINITY
            } else {
                NEGATIVE_INFINITY
            };
            self.output.extend_from_slice(literal);
            return Ok(());
        }

        let (mantissa, exponent) = frexp(f);
        self.output.extend_from_slice(b"^F");
        self.output.extend_from_slice(mantissa.to_string().as_bytes());
        self.output.extend_from_slice(FLOAT_EXPONENT);
        self.output.extend_from_slice(exponent.to_string().as_bytes());
        Ok(())
    }

    fn write_string(&mut self, s: &[u8]) {
        self.output.extend_from_slice(b"^S");
        escape_into(&mut self.output, s);
    }
}

/// Appends the escaped form of `s` in a single pass over the input.
pub(crate) fn escape_into(output: &mut Vec<u8>, s: &[u8]) {
    output.reserve(s.len());
    for &byte in s {
        let escaped = match byte {
            0x13 => b's',
            0x14 => b't',
            0x15 => b'u',
            0x1e => b'z',
            0x00..=0x20 => byte + 64,
            b'^' => b'U',
            b'~' => b'T',
            0x7f => b'S',
            _ => {
                output.push(byte);
                continue;
            }
        };
        output.push(ESCAPE);
        output.push(escaped);
    }
}

/// Serializer producing a [`Value`] from any `T: Serialize`.
///
/// Sequences become [`Value::Array`], maps and structs become [`Value::Table`]
/// with arbitrary keys. Enum variants carrying data become single-entry tables
/// keyed by the variant name.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTable {
    table: Table,
    current_key: Option<Value>,
}

/// Collects the payload of a tuple or struct variant under its name.
pub struct SerializeVariant<T> {
    name: &'static str,
    inner: T,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVariant<SerializeVec>;
    type SerializeMap = SerializeTable;
    type SerializeStruct = SerializeTable;
    type SerializeStructVariant = SerializeVariant<SerializeTable>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::from(BigInt::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::from(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::String(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut table = Table::with_capacity(1);
        table.insert(variant, to_value(value)?);
        Ok(Value::Table(table))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVariant<SerializeVec>> {
        Ok(SerializeVariant {
            name: variant,
            inner: SerializeVec::new(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeTable> {
        Ok(SerializeTable::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeTable> {
        Ok(SerializeTable::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVariant<SerializeTable>> {
        Ok(SerializeVariant {
            name: variant,
            inner: SerializeTable::new(len),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeTable {
    fn new(capacity: usize) -> Self {
        SerializeTable {
            table: Table::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeVariant<SerializeVec> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(&mut self.inner, value)
    }

    fn end(self) -> Result<Value> {
        let mut table = Table::with_capacity(1);
        table.insert(self.name, Value::Array(self.inner.vec));
        Ok(Value::Table(table))
    }
}

impl ser::SerializeMap for SerializeTable {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(to_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::unsupported_value("serialize_value called without serialize_key"))?;
        self.table.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Table(self.table))
    }
}

impl ser::SerializeStruct for SerializeTable {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.table.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Table(self.table))
    }
}

impl ser::SerializeStructVariant for SerializeVariant<SerializeTable> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Value> {
        let mut table = Table::with_capacity(1);
        table.insert(self.name, Value::Table(self.inner.table));
        Ok(Value::Table(table))
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}
