//! Two-queue triage scheduler.
//!
//! Every queued item sits in two [`IndexedMinHeap`]s at once: one ordered by
//! priority, one by arrival. Serving decides which ordering governs, draws
//! the head of that queue, and removes the same item from the other queue by
//! its tracked position, so both queues always hold exactly the same items.

use std::fmt;

use slab::Slab;
use tracing::{debug, trace};
use triage_heap::{Error, IndexedMinHeap, Result, SlotLocator};

use crate::item::{Ticket, TicketId, TicketOrder, by_arrival, by_priority};
use crate::{Timestamp, TriageConfig, Triaged};

/// Wait span measured by an item's clock.
pub type Wait<T> = <<T as Triaged>::Time as Timestamp>::Duration;

type Queue<T> = IndexedMinHeap<Ticket<T>, TicketOrder<T>, SlotLocator>;

/// Which ordering decided a serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    /// Nobody has waited past the threshold; the most urgent item is served.
    Priority,
    /// The longest-waiting item breached the threshold and is served first.
    Overdue,
}

struct Queued<T> {
    seq: u64,
    item: T,
}

/// Serves items by priority, unless the longest-waiting item has waited
/// longer than `max_wait`, in which case that item goes first.
///
/// # Example
///
/// ```
/// use triage::{Triage, Triaged};
///
/// struct Patient {
///     name: &'static str,
///     priority: u8,
///     arrived_at: u32,
/// }
///
/// impl Triaged for Patient {
///     type Priority = u8;
///     type Time = u32;
///     fn priority(&self) -> u8 { self.priority }
///     fn arrival(&self) -> u32 { self.arrived_at }
/// }
///
/// let mut triage = Triage::new(3u32);
/// triage.add(Patient { name: "sprain", priority: 5, arrived_at: 0 }).unwrap();
/// triage.add(Patient { name: "cardiac", priority: 1, arrived_at: 5 }).unwrap();
///
/// // The sprain has waited 9 > 3, so it is seen before the cardiac case
/// assert_eq!(triage.next(9).unwrap().name, "sprain");
/// assert_eq!(triage.next(9).unwrap().name, "cardiac");
/// ```
pub struct Triage<T: Triaged> {
    items: Slab<Queued<T>>,
    by_priority: Queue<T>,
    by_arrival: Queue<T>,
    max_wait: Wait<T>,
    next_seq: u64,
}

impl<T: Triaged> Triage<T> {
    /// Creates an empty scheduler with the given wait threshold.
    pub fn new(max_wait: Wait<T>) -> Self {
        Self::with_config(TriageConfig::new(max_wait))
    }

    /// Creates an empty scheduler from a config.
    pub fn with_config(config: TriageConfig<Wait<T>>) -> Self {
        let capacity = config.capacity;
        Self {
            items: Slab::with_capacity(capacity),
            by_priority: IndexedMinHeap::with_capacity(
                capacity,
                by_priority::<T> as TicketOrder<T>,
                SlotLocator::with_capacity(capacity),
            ),
            by_arrival: IndexedMinHeap::with_capacity(
                capacity,
                by_arrival::<T> as TicketOrder<T>,
                SlotLocator::with_capacity(capacity),
            ),
            max_wait: config.max_wait,
            next_seq: 0,
        }
    }

    /// Returns the number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.by_priority.len(), self.items.len());
        debug_assert_eq!(self.by_arrival.len(), self.items.len());
        self.items.len()
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current wait threshold.
    #[inline]
    pub fn max_wait(&self) -> Wait<T> {
        self.max_wait
    }

    /// Replaces the wait threshold. Takes effect from the next serve.
    pub fn set_max_wait(&mut self, max_wait: Wait<T>) {
        debug!(previous = ?self.max_wait, current = ?max_wait, "max wait changed");
        self.max_wait = max_wait;
    }

    /// Returns the queued item behind `ticket`, if it is still queued.
    pub fn get(&self, ticket: TicketId) -> Option<&T> {
        self.items
            .get(ticket.slot)
            .filter(|q| q.seq == ticket.seq)
            .map(|q| &q.item)
    }

    /// Returns `true` if `ticket`'s item is still queued.
    #[inline]
    pub fn contains(&self, ticket: TicketId) -> bool {
        self.get(ticket).is_some()
    }

    /// Queues an item in both orderings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either queue already tracks the
    /// storage slot the item would take, or the slot is past what the
    /// queues can track. Nothing is queued in that case.
    pub fn add(&mut self, item: T) -> Result<TicketId> {
        let slot = self.items.vacant_key();
        let seq = self.next_seq;
        let ticket = Ticket::new(slot, seq, &item);

        if self.by_priority.contains(&ticket) || self.by_arrival.contains(&ticket) {
            return Err(Error::InvalidArgument("storage slot is already queued"));
        }

        let id = ticket.id();
        self.by_priority.insert(ticket.clone())?;
        self.by_arrival.insert(ticket)?;
        self.items.insert(Queued { seq, item });
        self.next_seq += 1;

        trace!(ticket = %id, queued = self.items.len(), "item queued");
        Ok(id)
    }

    /// Decides which lane the next serve at `now` draws from, and how long
    /// the longest-waiting item has waited.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStructure`] if nothing is queued.
    pub fn lane(&self, now: T::Time) -> Result<(Lane, Wait<T>)> {
        let oldest = self.by_arrival.peek().ok_or(Error::EmptyStructure)?;
        let waited = now.elapsed_since(oldest.arrival);
        let lane = if waited > self.max_wait {
            Lane::Overdue
        } else {
            Lane::Priority
        };
        Ok((lane, waited))
    }

    /// Returns the item [`next`](Self::next) would serve at `now`, without
    /// removing it. Returns `None` if nothing is queued.
    pub fn peek_next(&self, now: T::Time) -> Option<&T> {
        let (lane, _) = self.lane(now).ok()?;
        let head = match lane {
            Lane::Priority => self.by_priority.peek()?,
            Lane::Overdue => self.by_arrival.peek()?,
        };
        self.items.get(head.slot).map(|q| &q.item)
    }

    /// Removes and returns the next item to serve at `now`.
    ///
    /// The most urgent item is served, unless the longest-waiting item has
    /// waited more than [`max_wait`](Self::max_wait), in which case it is
    /// served instead. Either way the item leaves both queues.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStructure`] if nothing is queued.
    pub fn next(&mut self, now: T::Time) -> Result<T> {
        self.next_with_lane(now).map(|(item, _)| item)
    }

    /// Like [`next`](Self::next), also reporting which lane served the item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStructure`] if nothing is queued.
    pub fn next_with_lane(&mut self, now: T::Time) -> Result<(T, Lane)> {
        let (lane, waited) = self.lane(now)?;

        let (drawn, other) = match lane {
            Lane::Priority => (&mut self.by_priority, &mut self.by_arrival),
            Lane::Overdue => (&mut self.by_arrival, &mut self.by_priority),
        };

        // Resolve the cross position before touching either queue
        let head = drawn.peek().ok_or(Error::EmptyStructure)?;
        let cross = other
            .position(head)
            .ok_or(Error::InvalidArgument("item missing from the other queue"))?;
        if !self.items.contains(head.slot) {
            return Err(Error::InvalidArgument("item missing from storage"));
        }

        let ticket = drawn.remove_min()?;
        other.remove_at(cross)?;
        let queued = self
            .items
            .try_remove(ticket.slot)
            .ok_or(Error::InvalidArgument("item missing from storage"))?;

        debug!(
            ticket = %ticket.id(),
            ?lane,
            ?waited,
            remaining = self.items.len(),
            "item served"
        );
        Ok((queued.item, lane))
    }

    /// Removes a queued item without serving it (for example, it left the
    /// queue on its own).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the ticket's item was already
    /// served or withdrawn.
    pub fn withdraw(&mut self, ticket: TicketId) -> Result<T> {
        if !self.contains(ticket) {
            return Err(Error::InvalidArgument("ticket is not queued"));
        }

        let not_tracked = Error::InvalidArgument("ticket is not tracked by both queues");
        let p = self
            .by_priority
            .locator()
            .position(ticket.slot)
            .ok_or(not_tracked)?;
        let a = self
            .by_arrival
            .locator()
            .position(ticket.slot)
            .ok_or(not_tracked)?;

        self.by_priority.remove_at(p)?;
        self.by_arrival.remove_at(a)?;
        let queued = self
            .items
            .try_remove(ticket.slot)
            .ok_or(Error::InvalidArgument("ticket is not queued"))?;

        trace!(ticket = %ticket, remaining = self.items.len(), "item withdrawn");
        Ok(queued.item)
    }

    /// Drops every queued item.
    pub fn clear(&mut self) {
        self.by_priority.clear();
        self.by_arrival.clear();
        self.items.clear();
    }
}

impl<T: Triaged> fmt::Debug for Triage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Triage")
            .field("len", &self.items.len())
            .field("max_wait", &self.max_wait)
            .finish_non_exhaustive()
    }
}
