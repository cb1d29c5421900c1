//! tola-reuse - Structural reuse for immutable value trees
//!
//! Given a freshly computed value and the value it replaces, keep every
//! subtree of the old value that did not change. Unchanged data keeps its
//! identity, so change detection downstream is a pointer comparison.
//!
//! ## Core Concepts
//!
//! **Value trees**: `Value` is a closed sum over primitives, lists, ordered
//! maps, records, dates, patterns, locators and opaque payloads. Composites
//! are `Arc`-shared and compared by identity with `Value::same`.
//!
//! **Reuse**: `reuse(updated, old)` returns `old` when the trees are
//! equivalent, a fresh container mixing old and new children when they
//! partly match, and `updated` otherwise.
//!
//! **Fallback**: callers extend reuse to opaque payloads with a `Fallback`
//! strategy instead of touching the core.
//!
//! ## Modules
//! - `value`: `Value` and its category types
//! - `algo`: reuse algorithm and fallback strategies
//! - `error`: construction errors
//!
//! ## Usage
//!
//! ```
//! use tola_reuse::{list, record, reuse};
//!
//! let old = record! { "foo" => 42, "bar" => list![1, 6] };
//! let updated = record! { "foo" => 42, "bar" => list![1, 6] };
//!
//! let result = reuse(&updated, &old);
//! assert!(result.same(&old));
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Value tree types
pub mod value;

/// Algorithms: reuse, fallback
pub mod algo;

/// Error types
pub mod error;

/// Literal-style value builders
mod macros;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Value types
pub use value::{
    Category, FieldKey, FieldRef, List, Locator, MapKey, Opaque, OrderedMap, Pattern,
    PatternFlags, Proto, Record, Symbol, Timestamp, Value,
};

// Algorithms
pub use algo::{
    reuse, reuse_with, Fallback, FallbackScope, OpaqueEq, ReuseConfig, ReuseOutcome, ReuseStats,
    Reuser,
};

// Error types
pub use error::{ValueError, ValueResult};

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{list, record};

    #[test]
    fn test_demo_records_reuse() {
        let s = Symbol::new();
        let build = || {
            record! {
                "foo" => 42,
                "bar" => list![1, 6],
                "z" => Timestamp::from_millis(1_700_000_000_000),
                &s => 8,
            }
        };
        let x = build();
        let y = build();

        let yp = reuse(&y, &x);
        assert!(yp.same(&x));
        assert!(!yp.same(&y));
    }

    #[test]
    fn test_public_api_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Value>();
        assert_send_sync::<ReuseConfig>();
        assert_send_sync::<ReuseOutcome>();
    }
}
