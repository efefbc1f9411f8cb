//! Queued items and the lightweight tickets the two queues order.

use std::cmp::Ordering;
use std::fmt;

use triage_heap::Slotted;

use crate::Timestamp;

/// An item that can be triaged: it has a priority and an arrival time, both
/// fixed for as long as it is queued.
///
/// Lower priority values are served first, so priority `1` outranks `3`.
///
/// # Example
///
/// ```
/// use triage::Triaged;
///
/// struct Patient {
///     name: String,
///     priority: u8,
///     arrived_at: u32,
/// }
///
/// impl Triaged for Patient {
///     type Priority = u8;
///     type Time = u32;
///
///     fn priority(&self) -> u8 { self.priority }
///     fn arrival(&self) -> u32 { self.arrived_at }
/// }
/// ```
pub trait Triaged {
    /// Urgency; smaller is more urgent.
    type Priority: Ord + Clone;
    /// Clock the arrival time is read from.
    type Time: Timestamp;

    /// Returns this item's priority.
    fn priority(&self) -> Self::Priority;

    /// Returns when this item arrived.
    fn arrival(&self) -> Self::Time;
}

/// Handle to a queued item, returned by [`Triage::add`](crate::Triage::add).
///
/// A ticket stays valid until its item is served or withdrawn; after that,
/// lookups with it fail even if the underlying storage slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicketId {
    pub(crate) slot: usize,
    pub(crate) seq: u64,
}

impl TicketId {
    /// Returns the insertion sequence number; earlier adds have smaller ones.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.seq)
    }
}

/// What each queue actually stores: the item's storage slot plus copies of
/// its sort keys, so comparisons never touch the item itself.
pub(crate) struct Ticket<T: Triaged> {
    pub(crate) slot: usize,
    pub(crate) seq: u64,
    pub(crate) priority: T::Priority,
    pub(crate) arrival: T::Time,
}

impl<T: Triaged> Ticket<T> {
    pub(crate) fn new(slot: usize, seq: u64, item: &T) -> Self {
        Self {
            slot,
            seq,
            priority: item.priority(),
            arrival: item.arrival(),
        }
    }

    pub(crate) fn id(&self) -> TicketId {
        TicketId {
            slot: self.slot,
            seq: self.seq,
        }
    }
}

impl<T: Triaged> Clone for Ticket<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot,
            seq: self.seq,
            priority: self.priority.clone(),
            arrival: self.arrival,
        }
    }
}

impl<T: Triaged> fmt::Debug for Ticket<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticket")
            .field("slot", &self.slot)
            .field("seq", &self.seq)
            .field("arrival", &self.arrival)
            .finish_non_exhaustive()
    }
}

impl<T: Triaged> Slotted for Ticket<T> {
    #[inline]
    fn slot(&self) -> usize {
        self.slot
    }
}

/// Comparator signature shared by both queues.
pub(crate) type TicketOrder<T> = fn(&Ticket<T>, &Ticket<T>) -> Ordering;

/// Most urgent first; first-come first-served among equals.
pub(crate) fn by_priority<T: Triaged>(a: &Ticket<T>, b: &Ticket<T>) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.seq.cmp(&b.seq))
}

/// Longest waiting first; first-come first-served among equal arrivals.
pub(crate) fn by_arrival<T: Triaged>(a: &Ticket<T>, b: &Ticket<T>) -> Ordering {
    a.arrival
        .cmp(&b.arrival)
        .then_with(|| a.seq.cmp(&b.seq))
}
