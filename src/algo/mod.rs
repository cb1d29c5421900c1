//! Algorithm implementations for value trees.
//!
//! - `reuse`: structural reuse of unchanged subtrees
//! - `fallback`: extension strategies for categories reuse does not know

mod fallback;
mod reuse;

pub use fallback::{Fallback, OpaqueEq};
pub use reuse::{
    reuse, reuse_with, FallbackScope, ReuseConfig, ReuseOutcome, ReuseStats, Reuser,
};
