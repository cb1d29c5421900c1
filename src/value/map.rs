//! Insertion-ordered map keyed by values.
//!
//! Keys match by *SameValueZero*:
//! - primitives by content, with every `NaN` one key and `-0.0` folded into `0.0`
//! - composites by identity, never by content

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::{Equivalent, IndexMap};
use rustc_hash::FxBuildHasher;

use super::Value;

// =============================================================================
// MapKey
// =============================================================================

/// A `Value` used as a map key.
#[derive(Clone)]
pub struct MapKey(Value);

impl MapKey {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_key(&self.0, state);
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        same_value_zero(&self.0, &other.0)
    }
}

impl Eq for MapKey {}

impl fmt::Debug for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Borrowed lookup key, avoids cloning the probe value.
struct KeyRef<'a>(&'a Value);

impl Hash for KeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_key(self.0, state);
    }
}

impl Equivalent<MapKey> for KeyRef<'_> {
    fn equivalent(&self, key: &MapKey) -> bool {
        same_value_zero(self.0, &key.0)
    }
}

fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        _ => a.same(b),
    }
}

fn hash_key<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Number(n) => {
            let bits = if n.is_nan() {
                f64::NAN.to_bits()
            } else if *n == 0.0 {
                0
            } else {
                n.to_bits()
            };
            bits.hash(state);
        }
        Value::String(s) => s.hash(state),
        Value::List(l) => Arc::as_ptr(l).hash(state),
        Value::Map(m) => Arc::as_ptr(m).hash(state),
        Value::Record(r) => Arc::as_ptr(r).hash(state),
        Value::Date(d) => Arc::as_ptr(d).hash(state),
        Value::Pattern(p) => Arc::as_ptr(p).hash(state),
        Value::Locator(l) => Arc::as_ptr(l).hash(state),
        Value::Opaque(o) => o.addr().hash(state),
    }
}

// =============================================================================
// OrderedMap
// =============================================================================

/// Insertion-ordered `Value -> Value` mapping.
///
/// Re-inserting an existing key replaces its value in place.
#[derive(Clone, Default)]
pub struct OrderedMap {
    entries: IndexMap<MapKey, Value, FxBuildHasher>,
}

impl OrderedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Insert or replace an entry, returning the previous value.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(MapKey(key.into()), value.into())
    }

    /// Builder form of [`OrderedMap::insert`].
    pub fn with(mut self, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(&KeyRef(key))
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(&KeyRef(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (&k.0, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.keys().map(|k| &k.0)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }
}

impl FromIterator<(Value, Value)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (MapKey(k), v)).collect(),
        }
    }
}

impl fmt::Debug for OrderedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;

    #[test]
    fn test_insertion_order() {
        let map = OrderedMap::new().with("b", 1).with("a", 2).with("c", 3);
        let keys: Vec<_> = map.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);

        // Re-insert keeps position
        let mut map = map;
        assert_eq!(map.insert("b", 9).and_then(|v| v.as_f64()), Some(1.0));
        let keys: Vec<_> = map.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(map.get(&Value::from("b")).and_then(Value::as_f64), Some(9.0));
    }

    #[test]
    fn test_number_keys_same_value_zero() {
        let map = OrderedMap::new().with(f64::NAN, "nan").with(0.0, "zero");
        assert_eq!(map.get(&Value::from(f64::NAN)).and_then(Value::as_str), Some("nan"));
        assert_eq!(map.get(&Value::from(-0.0)).and_then(Value::as_str), Some("zero"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_composite_keys_by_identity() {
        let key = list![1];
        let map = OrderedMap::new().with(key.clone(), "found");
        assert!(map.contains_key(&key));
        assert!(!map.contains_key(&list![1]));
    }

    #[test]
    fn test_collect() {
        let map: OrderedMap = [(Value::from(1), Value::from("one"))].into_iter().collect();
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
        assert_eq!(map.values().count(), 1);
    }
}
