//! Ordered table type for WowAce mappings.
//!
//! [`Table`] wraps an [`IndexMap`] keyed by [`Value`], so any value (numbers,
//! strings, booleans, even other tables) can be a key, and entries are written
//! in insertion order.
//!
//! ## Sequences
//!
//! The wire format has no separate array type: sequences travel as tables
//! keyed `1..N`. [`Table::into_value`] performs the collapse the parser applies,
//! turning a table with exactly those keys into [`Value::Array`].
//!
//! ```rust
//! use serde_wowace::{Table, Value};
//!
//! let mut table = Table::new();
//! table.insert(2, "b");
//! table.insert(1, "a");
//! assert_eq!(
//!     table.into_value(),
//!     Value::Array(vec![Value::from("a"), Value::from("b")])
//! );
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// An ordered map of values to values.
///
/// Equality ignores entry order; iteration follows insertion order.
///
/// # Examples
///
/// ```rust
/// use serde_wowace::{Table, Value};
///
/// let mut table = Table::new();
/// table.insert("first", 1);
/// table.insert("second", 2);
///
/// let keys: Vec<_> = table.keys().cloned().collect();
/// assert_eq!(keys, vec![Value::from("first"), Value::from("second")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table(IndexMap<Value, Value>);

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    /// Creates an empty `Table` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// An existing key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wowace::Table;
    ///
    /// let mut table = Table::new();
    /// assert!(table.insert("key", 42).is_none());
    /// assert!(table.insert("key", 43).is_some());
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        self.0.insert(key.into(), value.into())
    }

    /// Returns a reference to the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value stored under the string key `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wowace::Table;
    ///
    /// let mut table = Table::new();
    /// table.insert("hp", 100);
    /// assert_eq!(table.get_field("hp").and_then(|v| v.as_i64()), Some(100));
    /// assert!(table.get_field("mana").is_none());
    /// ```
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.0.get(&Value::from(name))
    }

    pub fn get_mut(&mut self, key: &Value) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Value, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Value, Value> {
        self.0.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.0.iter()
    }

    /// Returns the length `N` when the keys are exactly the integers `1..=N`.
    ///
    /// An empty table is a sequence of length 0.
    #[must_use]
    pub fn sequence_len(&self) -> Option<usize> {
        let len = self.0.len();
        // Keys are unique, so N keys all within 1..=N cover the whole range.
        let dense = self.0.keys().all(|key| match key.as_i64() {
            Some(index) => index >= 1 && index.unsigned_abs() <= len as u64,
            None => false,
        });
        dense.then_some(len)
    }

    /// Converts the table into a [`Value`], collapsing `1..N` keyed tables into
    /// [`Value::Array`] ordered by key.
    #[must_use]
    pub fn into_value(self) -> Value {
        let Some(len) = self.sequence_len() else {
            return Value::Table(self);
        };

        let mut slots: Vec<Option<Value>> = (0..len).map(|_| None).collect();
        for (key, value) in self.0 {
            if let Some(index) = key.as_i64() {
                slots[(index - 1) as usize] = Some(value);
            }
        }
        Value::Array(slots.into_iter().flatten().collect())
    }
}

impl Hash for Table {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent so that equal tables hash equally.
        let mut combined: u64 = 0;
        for (key, value) in &self.0 {
            let mut entry = DefaultHasher::new();
            key.hash(&mut entry);
            value.hash(&mut entry);
            combined = combined.wrapping_add(entry.finish());
        }
        state.write_usize(self.0.len());
        state.write_u64(combined);
    }
}

impl From<IndexMap<Value, Value>> for Table {
    fn from(map: IndexMap<Value, Value>) -> Self {
        Table(map)
    }
}

impl From<Table> for IndexMap<Value, Value> {
    fn from(table: Table) -> Self {
        table.0
    }
}

/// Builds the `1..N` keyed table a sequence is written as.
impl From<Vec<Value>> for Table {
    fn from(items: Vec<Value>) -> Self {
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (Value::from(index + 1), item))
            .collect()
    }
}

impl IntoIterator for Table {
    type Item = (Value, Value);
    type IntoIter = indexmap::map::IntoIter<Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a Value, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for Table {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Table(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<Value>, V: Into<Value>> Extend<(K, V)> for Table {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.0.extend(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_keys_collapse_in_key_order() {
        let table: Table = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
        assert_eq!(table.sequence_len(), Some(3));
        assert_eq!(
            table.into_value(),
            Value::Array(vec![Value::from("a"), Value::from("b"), Value::from("c")])
        );
    }

    #[test]
    fn test_gap_keeps_mapping() {
        let table: Table = [(1, "a"), (3, "c")].into_iter().collect();
        assert_eq!(table.sequence_len(), None);
        assert!(matches!(table.into_value(), Value::Table(t) if t.len() == 2));
    }

    #[test]
    fn test_non_integer_keys_keep_mapping() {
        let mut table = Table::new();
        table.insert(1.0, "float key");
        assert!(table.into_value().is_table());

        let mut table = Table::new();
        table.insert(0, "zero");
        assert!(table.into_value().is_table());

        let mut table = Table::new();
        table.insert(1, "one");
        table.insert("1", "string one");
        assert!(table.into_value().is_table());
    }

    #[test]
    fn test_empty_table_is_empty_sequence() {
        assert_eq!(Table::new().sequence_len(), Some(0));
        assert_eq!(Table::new().into_value(), Value::Array(vec![]));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: Table = [("x", 1), ("y", 2)].into_iter().collect();
        let b: Table = [("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(Value::Table(a));
        assert!(set.contains(&Value::Table(b)));
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut table = Table::new();
        table.insert("a", 1);
        table.insert("b", 2);
        table.insert("a", 3);
        let entries: Vec<_> = table.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![
                (Value::from("a"), Value::from(3)),
                (Value::from("b"), Value::from(2)),
            ]
        );
    }

    #[test]
    fn test_from_sequence() {
        let mut table = Table::from(vec![Value::from(true), Value::Null]);
        assert_eq!(table.get(&Value::from(1)), Some(&Value::Bool(true)));
        assert_eq!(table.get(&Value::from(2)), Some(&Value::Null));
        assert_eq!(table.remove(&Value::from(3)), None);
    }
}
