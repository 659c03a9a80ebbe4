//! Dynamic value representation for WowAce data.
//!
//! This module provides the [`Value`] enum, the tree that the encoder consumes
//! and the parser produces. It is useful whenever the shape of the data is not
//! known at compile time, such as addon profiles or import strings.
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_wowace::{wowace, Value};
//!
//! let null = Value::Null;
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! let raw = Value::bytes(vec![0xff, 0x00]);
//!
//! let profile = wowace!({
//!     "name": "Thrall",
//!     "level": 60,
//!     "talents": [1, 2, 3]
//! });
//! assert!(profile.is_table());
//! ```
//!
//! ## Equality and Keys
//!
//! Any value can be a table key, so `Value` implements [`Eq`] and [`Hash`].
//! Floats compare by numeric value (`0.0 == -0.0`) and NaN is equal to itself.
//! An integer stored as [`Value::BigInt`] equals the same integer stored as
//! [`Value::Integer`].

use crate::Table;
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A dynamically-typed WowAce value.
///
/// Integers that fit in 64 bits are held in [`Value::Integer`]; the parser and
/// the `From` conversions only produce [`Value::BigInt`] for larger magnitudes.
///
/// # Examples
///
/// ```rust
/// use serde_wowace::Value;
///
/// let value = Value::from(42);
/// assert!(value.is_integer());
/// assert_eq!(value.as_i64(), Some(42));
/// assert!(!value.is_string());
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    BigInt(BigInt),
    Float(f64),
    /// Raw bytes; not necessarily UTF-8.
    String(Vec<u8>),
    /// A table keyed `1..N`.
    Array(Vec<Value>),
    Table(Table),
}

impl Value {
    /// Creates a string value from raw bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wowace::Value;
    ///
    /// let value = Value::bytes(b"\x00\xff".to_vec());
    /// assert_eq!(value.as_bytes(), Some(&b"\x00\xff"[..]));
    /// assert_eq!(value.as_str(), None);
    /// ```
    #[must_use]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::String(bytes.into())
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` for [`Value::Integer`] and [`Value::BigInt`].
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::BigInt(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if it fits in an `i64`. Floats are never converted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wowace::Value;
    ///
    /// assert_eq!(Value::from(42).as_i64(), Some(42));
    /// assert_eq!(Value::from(42.0).as_i64(), None);
    /// assert_eq!(Value::from(u64::MAX).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::BigInt(b) => i64::try_from(b).ok(),
            _ => None,
        }
    }

    /// Returns the integer as a [`BigInt`], whatever its size.
    #[must_use]
    pub fn as_bigint(&self) -> Option<BigInt> {
        match self {
            Value::Integer(i) => Some(BigInt::from(*i)),
            Value::BigInt(b) => Some(b.clone()),
            _ => None,
        }
    }

    /// Returns any number as an `f64`, rounding large integers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wowace::Value;
    ///
    /// assert_eq!(Value::from(3).as_f64(), Some(3.0));
    /// assert_eq!(Value::from(f64::INFINITY).as_f64(), Some(f64::INFINITY));
    /// assert_eq!(Value::from("3").as_f64(), None);
    /// ```
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::BigInt(b) => b.to_string().parse().ok(),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the string if it is valid UTF-8.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => std::str::from_utf8(s).ok(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the value the parser would produce for this tree: every table
    /// keyed exactly `1..N` (including the empty table) becomes an array, at
    /// every depth.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wowace::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// table.insert(1, "a");
    /// let value = Value::Array(vec![Value::Table(table)]);
    /// assert_eq!(
    ///     value.into_canonical(),
    ///     Value::Array(vec![Value::Array(vec![Value::from("a")])])
    /// );
    /// ```
    #[must_use]
    pub fn into_canonical(self) -> Value {
        match self {
            Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::into_canonical).collect())
            }
            Value::Table(table) => table
                .into_iter()
                .map(|(key, value)| (key.into_canonical(), value.into_canonical()))
                .collect::<Table>()
                .into_value(),
            other => other,
        }
    }
}

/// Normalised float bits: all zeros and all NaNs collapse to one key each.
fn float_key(f: f64) -> u64 {
    if f == 0.0 {
        0
    } else if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Integer(a), Value::BigInt(b)) | (Value::BigInt(b), Value::Integer(a)) => {
                BigInt::from(*a) == *b
            }
            (Value::Float(a), Value::Float(b)) => float_key(*a) == float_key(*b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => state.write_u8(0),
            Value::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            Value::Integer(i) => {
                state.write_u8(2);
                i.hash(state);
            }
            Value::BigInt(b) => match i64::try_from(b) {
                Ok(i) => {
                    state.write_u8(2);
                    i.hash(state);
                }
                Err(_) => {
                    state.write_u8(3);
                    b.hash(state);
                }
            },
            Value::Float(f) => {
                state.write_u8(4);
                float_key(*f).hash(state);
            }
            Value::String(s) => {
                state.write_u8(5);
                s.hash(state);
            }
            Value::Array(items) => {
                state.write_u8(6);
                items.hash(state);
            }
            Value::Table(table) => {
                state.write_u8(7);
                table.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::BigInt(b) => write!(f, "{}", b),
            Value::Float(fl) => write!(f, "{:?}", fl),
            Value::String(s) => write!(f, "{:?}", String::from_utf8_lossy(s)),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Table(table) => {
                write!(f, "{{")?;
                for (i, (key, value)) in table.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[{}] = {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::BigInt(b) => match i128::try_from(b) {
                Ok(i) => serializer.serialize_i128(i),
                Err(_) => serializer.serialize_str(&b.to_string()),
            },
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => match std::str::from_utf8(s) {
                Ok(text) => serializer.serialize_str(text),
                Err(_) => serializer.serialize_bytes(s),
            },
            Value::Array(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Table(table) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (k, v) in table.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid WowAce value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_vec()))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut table = Table::new();
                while let Some((key, value)) = map.next_entry::<Value, Value>()? {
                    table.insert(key, value);
                }
                Ok(Value::Table(table))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| crate::Error::custom(format!("expected 64-bit integer, found {}", value)))
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::custom(format!("expected number, found {}", value)))
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => String::from_utf8(s)
                .map_err(|e| crate::Error::custom(format!("string is not UTF-8: {}", e))),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_small_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(i64::from(value))
                }
            }
        )*
    };
}

from_small_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! from_wide_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    match i64::try_from(value) {
                        Ok(i) => Value::Integer(i),
                        Err(_) => Value::BigInt(BigInt::from(value)),
                    }
                }
            }
        )*
    };
}

from_wide_integer!(u64, i128, u128, usize, isize);

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        match i64::try_from(&value) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::BigInt(value),
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into_bytes())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.as_bytes().to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tryfrom_i64() {
        assert_eq!(i64::try_from(Value::from(42)).unwrap(), 42);
        assert!(i64::try_from(Value::from(42.0)).is_err());
        assert!(i64::try_from(Value::from("test")).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        assert_eq!(f64::try_from(Value::from(3.5)).unwrap(), 3.5);
        assert_eq!(f64::try_from(Value::from(42)).unwrap(), 42.0);
        assert_eq!(
            f64::try_from(Value::from(f64::NEG_INFINITY)).unwrap(),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_tryfrom_string() {
        assert_eq!(String::try_from(Value::from("hello")).unwrap(), "hello");
        assert!(String::try_from(Value::bytes(vec![0xff])).is_err());
        assert_eq!(
            Vec::<u8>::try_from(Value::bytes(vec![0xff])).unwrap(),
            vec![0xff]
        );
        assert!(bool::try_from(Value::from(1)).is_err());
    }

    #[test]
    fn test_wide_integers_normalize() {
        assert_eq!(Value::from(7u64), Value::Integer(7));
        assert!(matches!(Value::from(u64::MAX), Value::BigInt(_)));
        assert_eq!(Value::from(BigInt::from(-3)), Value::Integer(-3));
        assert!(matches!(Value::from(i128::MIN), Value::BigInt(_)));
    }

    #[test]
    fn test_integer_representations_are_equal() {
        let small = Value::Integer(5);
        let big = Value::BigInt(BigInt::from(5));
        assert_eq!(small, big);

        let mut set = HashSet::new();
        set.insert(small);
        assert!(set.contains(&big));
    }

    #[test]
    fn test_float_equality() {
        assert_eq!(Value::from(0.0), Value::from(-0.0));
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_ne!(Value::from(1.0), Value::from(1));
    }

    #[test]
    fn test_string_accessors() {
        let value = Value::from("héllo");
        assert_eq!(value.as_str(), Some("héllo"));
        assert_eq!(value.as_bytes(), Some("héllo".as_bytes()));
    }

    #[test]
    fn test_into_canonical_nested() {
        let inner: Table = [(1, "x"), (2, "y")].into_iter().collect();
        let mut outer = Table::new();
        outer.insert("list", Value::Table(inner));
        outer.insert("empty", Value::Table(Table::new()));

        let canonical = Value::Table(outer).into_canonical();
        let table = canonical.as_table().unwrap();
        assert_eq!(
            table.get_field("list"),
            Some(&Value::Array(vec![Value::from("x"), Value::from("y")]))
        );
        assert_eq!(table.get_field("empty"), Some(&Value::Array(vec![])));
    }

    #[test]
    fn test_display() {
        let value = Value::Array(vec![Value::from(1), Value::from("a"), Value::Null]);
        assert_eq!(value.to_string(), "[1, \"a\", null]");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
    }
}
