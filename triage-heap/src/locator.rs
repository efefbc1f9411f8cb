//! Position tracking for heap elements.
//!
//! A heap needs to find an arbitrary element's array position in O(1) to
//! remove it in O(log n). Rather than embedding the position inside the
//! element (which would tie an element to a single heap), each heap owns a
//! side table that maps element identity to position. The same element can
//! then live in several heaps at once, each with its own locator.
//!
//! Positions are 1-based; `0` never names an occupied slot.

use std::collections::HashMap;
use std::hash::Hash;

/// Side table recording where each live element sits in one heap.
///
/// The heap calls [`set`](Locator::set) every time an element lands in a new
/// position, and [`unset`](Locator::unset) when it leaves. Between calls the
/// table must answer [`get`](Locator::get) with the last recorded position.
pub trait Locator<E: ?Sized> {
    /// Records that `element` now sits at `pos`.
    fn set(&mut self, element: &E, pos: usize);

    /// Returns the last recorded position of `element`, or `None` if it is
    /// not in the heap.
    fn get(&self, element: &E) -> Option<usize>;

    /// Forgets `element`. Subsequent `get` calls return `None`.
    fn unset(&mut self, element: &E);

    /// Forgets every element.
    fn clear(&mut self);

    /// Returns `false` if this table cannot record a position for `element`.
    ///
    /// Checked by the heap before inserting, so an element the table would
    /// fail to track is rejected without mutating anything.
    #[inline]
    fn can_track(&self, element: &E) -> bool {
        let _ = element;
        true
    }
}

// ============================================================================
// SlotLocator
// ============================================================================

/// Elements identified by a small dense integer (a slab slot, an array index).
///
/// [`SlotLocator`] keeps one table entry per slot up to the largest slot it
/// has seen, so slots must stay small: values at or above
/// [`SlotLocator::MAX_SLOTS`] are refused.
pub trait Slotted {
    /// Returns this element's identity slot.
    fn slot(&self) -> usize;
}

macro_rules! impl_slotted_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Slotted for $ty {
                #[inline]
                fn slot(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

impl_slotted_for_unsigned!(u8, u16, u32, u64, usize);

/// Dense locator backed by a `Vec` indexed by [`Slotted::slot`].
///
/// Uses position `0` as the "not in heap" sentinel, which is free because
/// heap positions start at 1. Grows on demand to cover the largest slot seen,
/// up to [`MAX_SLOTS`](Self::MAX_SLOTS).
///
/// # Example
///
/// ```
/// use triage_heap::{IndexedMinHeap, NaturalOrder, SlotLocator};
///
/// let mut heap = IndexedMinHeap::new(NaturalOrder, SlotLocator::new());
/// heap.insert(7usize).unwrap();
/// heap.insert(3usize).unwrap();
///
/// assert_eq!(heap.locator().position(3), Some(1));
/// assert_eq!(heap.locator().position(7), Some(2));
/// assert_eq!(heap.locator().position(9), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotLocator {
    positions: Vec<usize>,
}

impl SlotLocator {
    const NONE: usize = 0;

    /// Exclusive upper bound on trackable slots (64M entries, 512 MiB table).
    pub const MAX_SLOTS: usize = 1 << 26;

    /// Creates an empty locator.
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
        }
    }

    /// Creates a locator with room for slots `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: vec![Self::NONE; capacity],
        }
    }

    /// Returns the recorded position for `slot`, if any.
    #[inline]
    pub fn position(&self, slot: usize) -> Option<usize> {
        match self.positions.get(slot) {
            Some(&pos) if pos != Self::NONE => Some(pos),
            _ => None,
        }
    }
}

impl<E: Slotted + ?Sized> Locator<E> for SlotLocator {
    #[inline]
    fn set(&mut self, element: &E, pos: usize) {
        debug_assert_ne!(pos, Self::NONE, "heap positions are 1-based");
        let slot = element.slot();
        debug_assert!(slot < Self::MAX_SLOTS, "slot {slot} exceeds MAX_SLOTS");
        if slot >= self.positions.len() {
            self.positions.resize(slot + 1, Self::NONE);
        }
        self.positions[slot] = pos;
    }

    #[inline]
    fn get(&self, element: &E) -> Option<usize> {
        self.position(element.slot())
    }

    #[inline]
    fn unset(&mut self, element: &E) {
        if let Some(pos) = self.positions.get_mut(element.slot()) {
            *pos = Self::NONE;
        }
    }

    fn clear(&mut self) {
        self.positions.fill(Self::NONE);
    }

    #[inline]
    fn can_track(&self, element: &E) -> bool {
        element.slot() < Self::MAX_SLOTS
    }
}

// ============================================================================
// KeyedLocator
// ============================================================================

/// Elements identified by a hashable key (an order id, a name).
pub trait Keyed {
    /// Identity key type.
    type Key: Hash + Eq + Clone;

    /// Returns this element's identity key.
    fn key(&self) -> &Self::Key;
}

/// Sparse locator backed by a `HashMap` keyed by [`Keyed::key`].
///
/// Use when identities are not small dense integers.
#[derive(Debug, Clone)]
pub struct KeyedLocator<K> {
    positions: HashMap<K, usize>,
}

impl<K> Default for KeyedLocator<K> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq> KeyedLocator<K> {
    /// Creates an empty locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a locator with pre-allocated room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the recorded position for `key`, if any.
    #[inline]
    pub fn position(&self, key: &K) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Returns the number of tracked keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if no keys are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<E> Locator<E> for KeyedLocator<E::Key>
where
    E: Keyed + ?Sized,
{
    #[inline]
    fn set(&mut self, element: &E, pos: usize) {
        match self.positions.get_mut(element.key()) {
            Some(existing) => *existing = pos,
            None => {
                self.positions.insert(element.key().clone(), pos);
            }
        }
    }

    #[inline]
    fn get(&self, element: &E) -> Option<usize> {
        self.positions.get(element.key()).copied()
    }

    #[inline]
    fn unset(&mut self, element: &E) {
        self.positions.remove(element.key());
    }

    fn clear(&mut self) {
        self.positions.clear();
    }
}
