//! Opaque values: payloads the reuser never looks inside.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an arbitrary payload, compared by identity only.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self::from_arc(Arc::new(payload))
    }

    /// Wrap an existing shared payload without reallocating.
    pub fn from_arc<T: Any + Send + Sync>(payload: Arc<T>) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: payload,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Same payload allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        self.addr() == other.addr()
    }

    /// Payload address, for identity hashing.
    #[inline]
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque<{}>", self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
    }

    #[test]
    fn test_identity() {
        let a = Opaque::new(Point { x: 1 });
        let b = Opaque::new(Point { x: 1 });
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_downcast() {
        let shared = Arc::new(Point { x: 7 });
        let opaque = Opaque::from_arc(shared);
        assert!(opaque.is::<Point>());
        assert_eq!(opaque.downcast_ref::<Point>(), Some(&Point { x: 7 }));
        assert!(opaque.downcast_ref::<String>().is_none());
        assert!(opaque.type_name().ends_with("Point"));
    }
}
