//! Value tree types.
//!
//! `Value` is a closed sum over the categories the reuser understands.
//! Composite variants are shared through `Arc`, so two values can be told
//! apart by identity (`Value::same`) as well as by content (`Value::deep_eq`).
//!
//! # Identity
//!
//! | Variant        | `same` compares            |
//! |----------------|----------------------------|
//! | `Null`, `Bool`, `Number`, `String` | content (`NaN` never equals itself) |
//! | everything else | `Arc` pointer             |

mod list;
mod map;
mod record;
mod date;
mod pattern;
mod locator;
mod opaque;

pub use list::List;
pub use map::{MapKey, OrderedMap};
pub use record::{FieldKey, FieldRef, Proto, Record, Symbol};
pub use date::Timestamp;
pub use pattern::{Pattern, PatternFlags};
pub use locator::Locator;
pub use opaque::Opaque;

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

// =============================================================================
// Category
// =============================================================================

/// Structural kind of a value, used to select reuse logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `Null`, `Bool`, `Number`, `String`
    Primitive,
    /// Index-ordered sequence
    List,
    /// Insertion-ordered key/value mapping
    Map,
    /// Keyed-field record
    Record,
    /// Point in time
    Date,
    /// Regular expression
    Pattern,
    /// URI reference
    Locator,
    /// Anything else, compared by identity only
    Opaque,
}

impl Category {
    /// Whether values of this category are handled structurally.
    ///
    /// Primitives and opaque values never take part in structural reuse.
    #[inline]
    pub const fn is_composite(self) -> bool {
        !matches!(self, Category::Primitive | Category::Opaque)
    }

    /// Lowercase category name.
    pub const fn name(self) -> &'static str {
        match self {
            Category::Primitive => "primitive",
            Category::List => "list",
            Category::Map => "map",
            Category::Record => "record",
            Category::Date => "date",
            Category::Pattern => "pattern",
            Category::Locator => "locator",
            Category::Opaque => "opaque",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Value
// =============================================================================

/// Immutable value tree node.
///
/// Cloning is cheap: composites only bump a reference count, and the clone
/// is `same` as the original.
///
/// Trees must be acyclic. Reuse recurses once per nesting level.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(CompactString),
    List(Arc<List>),
    Map(Arc<OrderedMap>),
    Record(Arc<Record>),
    Date(Arc<Timestamp>),
    Pattern(Arc<Pattern>),
    Locator(Arc<Locator>),
    Opaque(Opaque),
}

impl Value {
    /// Build a list value from items.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(Arc::new(items.into_iter().collect()))
    }

    /// Build a map value from entries, keeping their order.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(Arc::new(entries.into_iter().collect()))
    }

    /// Wrap an arbitrary payload as an opaque value.
    pub fn opaque<T: std::any::Any + Send + Sync>(payload: T) -> Self {
        Value::Opaque(Opaque::new(payload))
    }

    /// Classify this value.
    pub fn category(&self) -> Category {
        match self {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Category::Primitive,
            Value::List(_) => Category::List,
            Value::Map(_) => Category::Map,
            Value::Record(_) => Category::Record,
            Value::Date(_) => Category::Date,
            Value::Pattern(_) => Category::Pattern,
            Value::Locator(_) => Category::Locator,
            Value::Opaque(_) => Category::Opaque,
        }
    }

    /// Strict identity.
    ///
    /// Primitives compare by content with IEEE semantics for numbers,
    /// everything else compares by allocation.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b),
            (Value::Date(a), Value::Date(b)) => Arc::ptr_eq(a, b),
            (Value::Pattern(a), Value::Pattern(b)) => Arc::ptr_eq(a, b),
            (Value::Locator(a), Value::Locator(b)) => Arc::ptr_eq(a, b),
            (Value::Opaque(a), Value::Opaque(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Structural equality.
    ///
    /// `NaN` equals `NaN` here, map keys match by `MapKey` rules, record
    /// fields match regardless of order, and opaque values only equal
    /// themselves.
    pub fn deep_eq(&self, other: &Value) -> bool {
        if self.same(other) {
            return true;
        }
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.is_nan() && b.is_nan(),
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.deep_eq(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, x)| b.get(key).is_some_and(|y| x.deep_eq(y)))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.proto() == b.proto()
                    && a.len() == b.len()
                    && a.fields().all(|(field, x)| b.get_field(field).is_some_and(|y| x.deep_eq(y)))
            }
            (Value::Date(a), Value::Date(b)) => a.millis() == b.millis(),
            (Value::Pattern(a), Value::Pattern(b)) => a.same_pattern(b),
            (Value::Locator(a), Value::Locator(b)) => a.href() == b.href(),
            _ => false,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&OrderedMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&Timestamp> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Value::Pattern(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_locator(&self) -> Option<&Locator> {
        match self {
            Value::Locator(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Value::Opaque(o) => Some(o),
            _ => None,
        }
    }
}

/// Content equality, see [`Value::deep_eq`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.deep_eq(other)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<CompactString> for Value {
    fn from(s: CompactString) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(Arc::new(list))
    }
}

impl From<OrderedMap> for Value {
    fn from(map: OrderedMap) -> Self {
        Value::Map(Arc::new(map))
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(Arc::new(record))
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::Date(Arc::new(ts))
    }
}

impl From<Pattern> for Value {
    fn from(pattern: Pattern) -> Self {
        Value::Pattern(Arc::new(pattern))
    }
}

impl From<Locator> for Value {
    fn from(locator: Locator) -> Self {
        Value::Locator(Arc::new(locator))
    }
}

impl From<Opaque> for Value {
    fn from(opaque: Opaque) -> Self {
        Value::Opaque(opaque)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{list, record};

    static_assertions::assert_impl_all!(Value: Send, Sync, Clone);

    #[test]
    fn test_category() {
        assert_eq!(Value::Null.category(), Category::Primitive);
        assert_eq!(Value::from("x").category(), Category::Primitive);
        assert_eq!(list![1].category(), Category::List);
        assert_eq!(record! { "a" => 1 }.category(), Category::Record);
        assert_eq!(Value::from(Timestamp::from_millis(0)).category(), Category::Date);
        assert_eq!(Value::opaque(5u8).category(), Category::Opaque);

        assert!(Category::List.is_composite());
        assert!(Category::Date.is_composite());
        assert!(!Category::Primitive.is_composite());
        assert!(!Category::Opaque.is_composite());
        assert_eq!(Category::Map.to_string(), "map");
    }

    #[test]
    fn test_same_primitives() {
        assert!(Value::from(42).same(&Value::from(42.0)));
        assert!(Value::from("a").same(&Value::from(String::from("a"))));
        assert!(Value::Null.same(&Value::Null));
        assert!(Value::from(0.0).same(&Value::from(-0.0)));
        assert!(!Value::from(f64::NAN).same(&Value::from(f64::NAN)));
        assert!(!Value::Null.same(&Value::from(false)));
    }

    #[test]
    fn test_same_composites_by_identity() {
        let a = list![1, 2];
        let b = list![1, 2];
        assert!(a.same(&a.clone()));
        assert!(!a.same(&b));
        assert!(a.deep_eq(&b));
    }

    #[test]
    fn test_deep_eq() {
        let a = record! { "x" => 1, "y" => list![f64::NAN] };
        let b = record! { "y" => list![f64::NAN], "x" => 1 };
        assert_eq!(a, b);

        let c = record! { "x" => 1 };
        assert_ne!(a, c);

        let bare = Value::from(Record::bare().with("x", 1));
        assert_ne!(c, bare);

        assert_ne!(list![1], Value::from(1));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert_eq!(list![1, 2].as_list().map(|l| l.len()), Some(2));
        assert!(Value::from(1).as_list().is_none());
        assert!(Value::default().is_null());
    }
}
