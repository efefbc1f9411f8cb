//! Ordering capability injected into a heap.

use core::cmp::Ordering;

/// Total order over heap elements.
///
/// The heap never looks at element contents itself; all ordering decisions go
/// through this trait. Implementations must be consistent: `compare(a, b)`
/// and `compare(b, a)` may never both report `Less`.
///
/// Any `Fn(&E, &E) -> Ordering` is a `Compare<E>`, so closures and plain
/// function pointers work directly.
///
/// # Example
///
/// ```
/// use triage_heap::Compare;
/// use std::cmp::Ordering;
///
/// let by_magnitude = |a: &i32, b: &i32| a.abs().cmp(&b.abs());
/// assert_eq!(by_magnitude.compare(&-3, &2), Ordering::Greater);
/// ```
pub trait Compare<E: ?Sized> {
    /// Compares two elements.
    fn compare(&self, a: &E, b: &E) -> Ordering;
}

impl<E: ?Sized, F> Compare<E> for F
where
    F: Fn(&E, &E) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &E, b: &E) -> Ordering {
        self(a, b)
    }
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<E: Ord + ?Sized> Compare<E> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &E, b: &E) -> Ordering {
        a.cmp(b)
    }
}
