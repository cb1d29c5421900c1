//! Prelude module for common imports.
//!
//! ```
//! use tola_reuse::prelude::*;
//!
//! let old = list![record! { "x" => 1 }];
//! assert!(reuse(&list![record! { "x" => 1 }], &old).same(&old));
//! ```

// Value types
pub use crate::value::{
    Category, FieldKey, FieldRef, List, Locator, Opaque, OrderedMap, Pattern, Proto, Record,
    Symbol, Timestamp, Value,
};

// Algorithms
pub use crate::algo::{
    reuse, reuse_with, Fallback, FallbackScope, OpaqueEq, ReuseConfig, ReuseOutcome, ReuseStats,
    Reuser,
};

// Macros
pub use crate::{list, map, record};

// Error
pub use crate::error::{ValueError, ValueResult};
