//! Value construction macros
//!
//! Literal-style builders for lists, maps and records. Every item, key and
//! value goes through `Into`, so numbers, strings, symbols and nested values
//! mix freely.

// =============================================================================
// Value literal macros
// =============================================================================

/// Build a `Value::List`.
///
/// ```
/// use tola_reuse::list;
///
/// let v = list![1, "two", list![3.0]];
/// assert_eq!(v.as_list().unwrap().len(), 3);
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::Value::from($crate::List::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::list([$($crate::Value::from($item)),+])
    };
}

/// Build a `Value::Map`, keeping entry order.
///
/// ```
/// use tola_reuse::{map, Value};
///
/// let v = map! { "a" => 1, 2 => "b" };
/// assert_eq!(v.as_map().unwrap().get(&Value::from(2)).and_then(Value::as_str), Some("b"));
/// ```
#[macro_export]
macro_rules! map {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::OrderedMap::new();
        $( map.insert($key, $value); )*
        $crate::Value::from(map)
    }};
}

/// Build a plain `Value::Record`.
///
/// Keys are field names (`&str`, `String`) or symbols (`Symbol`, `&Symbol`).
///
/// ```
/// use tola_reuse::{record, Symbol};
///
/// let tag = Symbol::described("tag");
/// let v = record! { "foo" => 42, &tag => true };
/// assert_eq!(v.as_record().unwrap().len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut record = $crate::Record::new();
        $( record.insert($key, $value); )*
        $crate::Value::from(record)
    }};
}
