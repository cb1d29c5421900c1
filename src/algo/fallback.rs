//! Fallback strategies for pairs the reuser has no built-in handling for.

use crate::value::Value;

/// Decides the result for a pair no built-in category handles.
///
/// Called for primitives, opaque values, mismatched categories and records
/// with different prototypes. Any closure `Fn(&Value, &Value) -> Value`
/// is a fallback.
///
/// The result must be value-equal to `updated`; returning `old` is only
/// correct when the two are equivalent.
///
/// No thread-safety bound is required, so closures may capture `Cell` or
/// `Rc` state. Parallel batches need a `Fallback + Sync`.
pub trait Fallback {
    fn reuse(&self, updated: &Value, old: &Value) -> Value;
}

impl<F> Fallback for F
where
    F: Fn(&Value, &Value) -> Value,
{
    #[inline]
    fn reuse(&self, updated: &Value, old: &Value) -> Value {
        self(updated, old)
    }
}

/// Reuses opaque payloads of type `T` when they compare equal.
///
/// ```
/// use tola_reuse::{reuse_with, OpaqueEq, Value};
///
/// let old = Value::opaque(vec![1u8, 2, 3]);
/// let updated = Value::opaque(vec![1u8, 2, 3]);
/// let result = reuse_with(&updated, &old, &OpaqueEq::<Vec<u8>>::new());
/// assert!(result.same(&old));
/// ```
pub struct OpaqueEq<T>(std::marker::PhantomData<fn() -> T>);

impl<T> OpaqueEq<T> {
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T> Default for OpaqueEq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq + 'static> Fallback for OpaqueEq<T> {
    fn reuse(&self, updated: &Value, old: &Value) -> Value {
        let equal = match (updated.as_opaque(), old.as_opaque()) {
            (Some(u), Some(o)) => matches!(
                (u.downcast_ref::<T>(), o.downcast_ref::<T>()),
                (Some(a), Some(b)) if a == b
            ),
            _ => false,
        };
        if equal { old.clone() } else { updated.clone() }
    }
}
