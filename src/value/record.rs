//! Keyed-field records.
//!
//! A record owns named fields and symbol fields. Enumeration order is fixed:
//! named fields first in declaration order, then symbol fields in
//! declaration order. The reuser relies on this order when it rebuilds a
//! record, and on `len()` for the extra-field check.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use compact_str::CompactString;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::Value;

// =============================================================================
// Symbol
// =============================================================================

#[derive(Debug)]
struct SymbolInner {
    description: Option<CompactString>,
}

/// Unique opaque field identifier.
///
/// Two symbols are the same key only when one is a clone of the other;
/// the description is informational.
#[derive(Clone)]
pub struct Symbol(Arc<SymbolInner>);

impl Symbol {
    /// Create a fresh symbol, distinct from every other.
    pub fn new() -> Self {
        Self(Arc::new(SymbolInner { description: None }))
    }

    /// Create a fresh symbol with a description.
    pub fn described(description: impl Into<CompactString>) -> Self {
        Self(Arc::new(SymbolInner {
            description: Some(description.into()),
        }))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(desc) => write!(f, "Symbol({desc})"),
            None => f.write_str("Symbol()"),
        }
    }
}

// =============================================================================
// Field keys
// =============================================================================

/// Owned field identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name(CompactString),
    Symbol(Symbol),
}

impl FieldKey {
    pub fn as_field(&self) -> FieldRef<'_> {
        match self {
            FieldKey::Name(name) => FieldRef::Name(name),
            FieldKey::Symbol(sym) => FieldRef::Symbol(sym),
        }
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        FieldKey::Name(name.into())
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        FieldKey::Name(name.into())
    }
}

impl From<CompactString> for FieldKey {
    fn from(name: CompactString) -> Self {
        FieldKey::Name(name)
    }
}

impl From<Symbol> for FieldKey {
    fn from(sym: Symbol) -> Self {
        FieldKey::Symbol(sym)
    }
}

impl From<&Symbol> for FieldKey {
    fn from(sym: &Symbol) -> Self {
        FieldKey::Symbol(sym.clone())
    }
}

impl From<FieldRef<'_>> for FieldKey {
    fn from(field: FieldRef<'_>) -> Self {
        field.to_key()
    }
}

/// Borrowed field identifier, as yielded by [`Record::fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    Name(&'a str),
    Symbol(&'a Symbol),
}

impl FieldRef<'_> {
    pub fn to_key(self) -> FieldKey {
        match self {
            FieldRef::Name(name) => FieldKey::Name(name.into()),
            FieldRef::Symbol(sym) => FieldKey::Symbol(sym.clone()),
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// Prototype tag of a record.
///
/// Records only reuse each other when their tags match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Proto {
    /// Ordinary record
    #[default]
    Plain,
    /// Record without a prototype
    Bare,
}

/// Record with named and symbol fields.
#[derive(Clone, Default)]
pub struct Record {
    proto: Proto,
    names: IndexMap<CompactString, Value, FxBuildHasher>,
    symbols: IndexMap<Symbol, Value, FxBuildHasher>,
}

impl Record {
    /// Create an empty plain record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record without a prototype.
    pub fn bare() -> Self {
        Self::with_proto(Proto::Bare)
    }

    pub fn with_proto(proto: Proto) -> Self {
        Self {
            proto,
            ..Self::default()
        }
    }

    pub fn proto(&self) -> Proto {
        self.proto
    }

    /// Set a field, returning its previous value.
    ///
    /// An existing field keeps its position.
    pub fn insert(&mut self, key: impl Into<FieldKey>, value: impl Into<Value>) -> Option<Value> {
        match key.into() {
            FieldKey::Name(name) => self.names.insert(name, value.into()),
            FieldKey::Symbol(sym) => self.symbols.insert(sym, value.into()),
        }
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, key: impl Into<FieldKey>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a named field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names.get(name)
    }

    /// Get a symbol field.
    pub fn get_symbol(&self, sym: &Symbol) -> Option<&Value> {
        self.symbols.get(sym)
    }

    pub fn get_field(&self, field: FieldRef<'_>) -> Option<&Value> {
        match field {
            FieldRef::Name(name) => self.get(name),
            FieldRef::Symbol(sym) => self.get_symbol(sym),
        }
    }

    pub fn has_field(&self, field: FieldRef<'_>) -> bool {
        match field {
            FieldRef::Name(name) => self.names.contains_key(name),
            FieldRef::Symbol(sym) => self.symbols.contains_key(sym),
        }
    }

    /// Number of own fields, named and symbol.
    pub fn len(&self) -> usize {
        self.names.len() + self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All own fields: names first, then symbols.
    pub fn fields(&self) -> impl Iterator<Item = (FieldRef<'_>, &Value)> {
        let names = self.names.iter().map(|(k, v)| (FieldRef::Name(k.as_str()), v));
        let symbols = self.symbols.iter().map(|(k, v)| (FieldRef::Symbol(k), v));
        names.chain(symbols)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.proto == Proto::Bare {
            f.write_str("[bare] ")?;
        }
        let mut map = f.debug_map();
        for (field, value) in self.fields() {
            match field {
                FieldRef::Name(name) => map.entry(&name, value),
                FieldRef::Symbol(sym) => map.entry(sym, value),
            };
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_before_symbols() {
        let sym = Symbol::described("tag");
        let record = Record::new()
            .with(&sym, 8)
            .with("foo", 42)
            .with("bar", 1);

        let order: Vec<FieldKey> = record.fields().map(|(f, _)| f.to_key()).collect();
        assert_eq!(
            order,
            vec![
                FieldKey::from("foo"),
                FieldKey::from("bar"),
                FieldKey::Symbol(sym.clone()),
            ]
        );
        assert_eq!(record.len(), 3);
        assert_eq!(record.get_symbol(&sym).and_then(Value::as_f64), Some(8.0));
    }

    #[test]
    fn test_reassign_keeps_position() {
        let mut record = Record::new().with("a", 1).with("b", 2);
        assert!(record.insert("a", 3).is_some());
        let names: Vec<FieldKey> = record.fields().map(|(f, _)| f.to_key()).collect();
        assert_eq!(names, vec![FieldKey::from("a"), FieldKey::from("b")]);
        assert_eq!(record.get("a").and_then(Value::as_f64), Some(3.0));
    }

    #[test]
    fn test_symbol_identity() {
        let a = Symbol::described("same");
        let b = Symbol::described("same");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());

        let record = Record::new().with(&a, 1);
        assert!(record.has_field(FieldRef::Symbol(&a)));
        assert!(!record.has_field(FieldRef::Symbol(&b)));
    }

    #[test]
    fn test_proto() {
        assert_eq!(Record::new().proto(), Proto::Plain);
        assert_eq!(Record::bare().proto(), Proto::Bare);
        assert!(Record::bare().is_empty());
    }

    #[test]
    fn test_debug() {
        let record = Record::new().with("x", 1).with(Symbol::described("s"), true);
        assert_eq!(format!("{record:?}"), r#"{"x": Number(1.0), Symbol(s): Bool(true)}"#);
    }
}
