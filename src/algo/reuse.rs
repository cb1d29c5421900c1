//! Structural reuse algorithm.
//!
//! Given an `updated` value and the `old` value it replaces, build a result
//! that is value-equal to `updated` while sharing as much of `old` as
//! possible. When the whole tree is equivalent the result *is* `old`, so
//! downstream identity checks (`Value::same`) see "no change".
//!
//! # Dispatch
//!
//! | `updated` / `old`        | Result                                                 |
//! |--------------------------|--------------------------------------------------------|
//! | list / list              | element-wise reuse; `old` if every slot reused        |
//! | map / map                | value-wise reuse per shared key; `old` if all reused   |
//! | record / record (same proto) | field-wise reuse; `old` if all reused, no extras   |
//! | date / date              | `old` if same instant                                  |
//! | pattern / pattern        | `old` if same source and flags                         |
//! | locator / locator        | `old` if same canonical href                           |
//! | anything else            | fallback, or `updated`                                 |
//!
//! Neither input is ever written to. Partially reused containers are always
//! freshly allocated.
//!
//! Inputs must be acyclic.

use std::sync::Arc;

use log::trace;

use crate::value::{List, OrderedMap, Record, Value};

use super::fallback::Fallback;

// =============================================================================
// Configuration
// =============================================================================

/// Where the fallback is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackScope {
    /// Only for the top-level pair. Nested pairs without a built-in rule
    /// resolve to `updated`.
    #[default]
    Root,
    /// For the top-level pair and every nested pair.
    Nested,
}

/// Configuration for reuse operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReuseConfig {
    /// Where the fallback applies.
    /// Default: `Root`
    pub fallback_scope: FallbackScope,
}

impl ReuseConfig {
    /// Create config with a custom fallback scope.
    pub fn new(fallback_scope: FallbackScope) -> Self {
        Self { fallback_scope }
    }

    /// Consult the fallback at every depth, e.g. for opaque payloads
    /// nested inside records. The fallback must then keep nested results
    /// value-equal to their `updated` side.
    pub fn nested() -> Self {
        Self::new(FallbackScope::Nested)
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Statistics from a reuse operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct ReuseStats {
    /// Composites returned as `old` unchanged
    pub reused: usize,
    /// Containers rebuilt from a mix of reused and new children
    pub rebuilt: usize,
    /// Pairs answered with `updated` itself
    pub replaced: usize,
    /// Fallback invocations
    pub fallbacks: usize,
}

impl ReuseStats {
    /// Total number of pairs visited.
    pub fn total(&self) -> usize {
        self.reused + self.rebuilt + self.replaced + self.fallbacks
    }
}

/// Result of a reuse operation with statistics.
#[derive(Debug, Clone)]
#[must_use]
pub struct ReuseOutcome {
    /// Value-equal to `updated`
    pub value: Value,
    /// Whether `value` is `old` itself
    pub unchanged: bool,
    /// Statistics about the traversal
    pub stats: ReuseStats,
}

// =============================================================================
// Reuser
// =============================================================================

/// Structural reuser with an optional fallback strategy.
///
/// # Example
///
/// ```
/// use tola_reuse::{list, record, Reuser};
///
/// let old = record! { "foo" => 42, "bar" => list![1, 6] };
/// let updated = record! { "foo" => 42, "bar" => list![1, 6] };
///
/// let result = Reuser::new().reuse(&updated, &old);
/// assert!(result.same(&old));
/// ```
#[derive(Clone, Copy, Default)]
pub struct Reuser<'f> {
    fallback: Option<FallbackRef<'f>>,
    config: ReuseConfig,
}

/// Borrowed fallback, remembering whether it may be shared across threads.
#[derive(Clone, Copy)]
enum FallbackRef<'f> {
    Local(&'f dyn Fallback),
    Shared(&'f (dyn Fallback + Sync)),
}

impl<'f> FallbackRef<'f> {
    fn get(self) -> &'f dyn Fallback {
        match self {
            Self::Local(fallback) => fallback,
            Self::Shared(fallback) => fallback,
        }
    }
}

impl<'f> Reuser<'f> {
    /// Reuser without fallback and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuser without fallback and a custom configuration.
    pub fn with_config(config: ReuseConfig) -> Self {
        Self {
            fallback: None,
            config,
        }
    }

    /// Set the fallback strategy.
    pub fn fallback(mut self, fallback: &'f dyn Fallback) -> Self {
        self.fallback = Some(FallbackRef::Local(fallback));
        self
    }

    /// Set a fallback that may be called from several threads at once.
    ///
    /// Only this kind lets [`Reuser::reuse_batch`] use the rayon pool.
    pub fn shared_fallback(mut self, fallback: &'f (dyn Fallback + Sync)) -> Self {
        self.fallback = Some(FallbackRef::Shared(fallback));
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &ReuseConfig {
        &self.config
    }

    /// Reuse `old` inside `updated` wherever equivalent.
    pub fn reuse(&self, updated: &Value, old: &Value) -> Value {
        self.context().reuse_value(updated, old)
    }

    /// Like [`Reuser::reuse`], also reporting what happened.
    pub fn reuse_with_stats(&self, updated: &Value, old: &Value) -> ReuseOutcome {
        let mut ctx = self.context();
        let value = ctx.reuse_value(updated, old);
        let unchanged = value.same(old);
        trace!("reuse finished: unchanged={unchanged} stats={:?}", ctx.stats);
        ReuseOutcome {
            value,
            unchanged,
            stats: ctx.stats,
        }
    }

    /// Reuse many independent `(updated, old)` pairs.
    ///
    /// Results are in input order. With the `parallel` feature the pairs run
    /// on the rayon pool, unless the fallback was set with
    /// [`Reuser::fallback`] and so may not be `Sync`.
    pub fn reuse_batch(&self, pairs: &[(Value, Value)]) -> Vec<Value> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let shared = match self.fallback {
                Some(FallbackRef::Local(_)) => return self.reuse_sequential(pairs),
                Some(FallbackRef::Shared(fallback)) => Some(fallback),
                None => None,
            };
            let config = self.config;
            pairs
                .par_iter()
                .map(|(updated, old)| {
                    let fallback = shared.map(|f| f as &dyn Fallback);
                    ReuseContext::new(fallback, config).reuse_value(updated, old)
                })
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.reuse_sequential(pairs)
        }
    }

    fn reuse_sequential(&self, pairs: &[(Value, Value)]) -> Vec<Value> {
        pairs
            .iter()
            .map(|(updated, old)| self.reuse(updated, old))
            .collect()
    }

    fn context(&self) -> ReuseContext<'f> {
        ReuseContext::new(self.fallback.map(FallbackRef::get), self.config)
    }
}

impl std::fmt::Debug for Reuser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reuser")
            .field("fallback", &self.fallback.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// Reuse `old` inside `updated` wherever equivalent.
///
/// ```
/// use tola_reuse::{list, reuse};
///
/// let old = list![list![1], list![2]];
/// let updated = list![list![1], list![3]];
/// let result = reuse(&updated, &old);
///
/// let (result, old) = (result.as_list().unwrap(), old.as_list().unwrap());
/// assert!(result[0].same(&old[0]));
/// assert!(!result[1].same(&old[1]));
/// ```
pub fn reuse(updated: &Value, old: &Value) -> Value {
    Reuser::new().reuse(updated, old)
}

/// Reuse with a fallback for pairs no built-in category handles.
pub fn reuse_with(updated: &Value, old: &Value, fallback: &dyn Fallback) -> Value {
    Reuser::new().fallback(fallback).reuse(updated, old)
}

// =============================================================================
// Internal Context
// =============================================================================

struct ReuseContext<'f> {
    fallback: Option<&'f dyn Fallback>,
    config: ReuseConfig,
    depth: usize,
    stats: ReuseStats,
}

impl<'f> ReuseContext<'f> {
    fn new(fallback: Option<&'f dyn Fallback>, config: ReuseConfig) -> Self {
        Self {
            fallback,
            config,
            depth: 0,
            stats: ReuseStats::default(),
        }
    }

    fn reuse_value(&mut self, updated: &Value, old: &Value) -> Value {
        match (updated, old) {
            (Value::List(u), Value::List(o)) => self.reuse_list(u, o),
            (Value::Map(u), Value::Map(o)) => self.reuse_map(u, o),
            (Value::Record(u), Value::Record(o)) if u.proto() == o.proto() => self.reuse_record(u, o),
            (Value::Date(u), Value::Date(o)) => self.keep_if(u.same_instant(**o), updated, old),
            (Value::Pattern(u), Value::Pattern(o)) => self.keep_if(u.same_pattern(o), updated, old),
            (Value::Locator(u), Value::Locator(o)) => self.keep_if(u.href() == o.href(), updated, old),
            _ => self.no_match(updated, old),
        }
    }

    fn reuse_list(&mut self, updated: &Arc<List>, old: &Arc<List>) -> Value {
        self.depth += 1;
        let items: List = updated
            .iter()
            .enumerate()
            .map(|(i, item)| match old.get(i) {
                Some(prev) => self.reuse_value(item, prev),
                None => item.clone(),
            })
            .collect();
        self.depth -= 1;

        let all_reused = items.len() == old.len()
            && items.iter().zip(old.iter()).all(|(item, prev)| item.same(prev));
        if all_reused {
            self.stats.reused += 1;
            Value::List(old.clone())
        } else {
            self.stats.rebuilt += 1;
            Value::List(Arc::new(items))
        }
    }

    fn reuse_map(&mut self, updated: &Arc<OrderedMap>, old: &Arc<OrderedMap>) -> Value {
        self.depth += 1;
        let mut entries = OrderedMap::with_capacity(updated.len());
        for (key, value) in updated.iter() {
            let next = match old.get(key) {
                Some(prev) => self.reuse_value(value, prev),
                None => value.clone(),
            };
            entries.insert(key.clone(), next);
        }
        self.depth -= 1;

        let all_reused = entries.len() == old.len()
            && entries
                .iter()
                .all(|(key, value)| old.get(key).is_some_and(|prev| value.same(prev)));
        if all_reused {
            self.stats.reused += 1;
            Value::Map(old.clone())
        } else {
            self.stats.rebuilt += 1;
            Value::Map(Arc::new(entries))
        }
    }

    fn reuse_record(&mut self, updated: &Arc<Record>, old: &Arc<Record>) -> Value {
        self.depth += 1;
        let mut fields = Record::with_proto(updated.proto());
        let mut all_reused = true;
        for (field, value) in updated.fields() {
            match old.get_field(field) {
                Some(prev) => {
                    let next = self.reuse_value(value, prev);
                    all_reused &= next.same(prev);
                    fields.insert(field, next);
                }
                None => {
                    all_reused = false;
                    fields.insert(field, value.clone());
                }
            }
        }
        self.depth -= 1;

        // Every field of `updated` exists in `old`, so a longer `old` has extras
        if all_reused && old.len() == updated.len() {
            self.stats.reused += 1;
            Value::Record(old.clone())
        } else {
            self.stats.rebuilt += 1;
            Value::Record(Arc::new(fields))
        }
    }

    fn keep_if(&mut self, equivalent: bool, updated: &Value, old: &Value) -> Value {
        if equivalent {
            self.stats.reused += 1;
            old.clone()
        } else {
            self.stats.replaced += 1;
            updated.clone()
        }
    }

    fn no_match(&mut self, updated: &Value, old: &Value) -> Value {
        let (u_cat, o_cat) = (updated.category(), old.category());
        if u_cat != o_cat && u_cat.is_composite() && o_cat.is_composite() {
            trace!("category mismatch at depth {}: {u_cat} vs {o_cat}", self.depth);
        }

        if let Some(fallback) = self.active_fallback() {
            trace!("fallback at depth {} for {u_cat}/{o_cat}", self.depth);
            self.stats.fallbacks += 1;
            return fallback.reuse(updated, old);
        }

        self.stats.replaced += 1;
        updated.clone()
    }

    fn active_fallback(&self) -> Option<&'f dyn Fallback> {
        match self.config.fallback_scope {
            FallbackScope::Nested => self.fallback,
            FallbackScope::Root if self.depth == 0 => self.fallback,
            FallbackScope::Root => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
