//! Index-ordered sequence of values.

use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;

use super::Value;

/// Inline capacity before a list spills to the heap.
const INLINE_ITEMS: usize = 4;

/// Ordered sequence of values.
///
/// Dereferences to `[Value]`, so slicing, `get` and iteration come for free.
#[derive(Clone, Default)]
pub struct List {
    items: SmallVec<[Value; INLINE_ITEMS]>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: SmallVec::with_capacity(capacity),
        }
    }

    /// Append an item.
    pub fn push(&mut self, item: impl Into<Value>) {
        self.items.push(item.into());
    }

    /// Builder form of [`List::push`].
    pub fn with(mut self, item: impl Into<Value>) -> Self {
        self.push(item);
        self
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }
}

impl Deref for List {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.items
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
