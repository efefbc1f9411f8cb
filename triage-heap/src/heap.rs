//! Adaptable min-heap with O(log n) removal by position.
//!
//! Every element's current position is recorded in an injected [`Locator`],
//! kept in step with each structural change, so any element (not just the
//! minimum) can be found and removed in logarithmic time.

use crate::{Compare, Error, Locator, Result};

/// An array-backed binary min-heap that tracks element positions.
///
/// Ordering comes from the injected [`Compare`] capability and position
/// tracking from the injected [`Locator`]. Positions are 1-based: the
/// minimum sits at position 1, the children of position `i` are `2i` and
/// `2i + 1`, and its parent is `i / 2`.
///
/// After every operation returns, for each element `e` at position `p`,
/// `locator.get(e) == Some(p)`.
///
/// # Example
///
/// ```
/// use triage_heap::{IndexedMinHeap, Keyed, KeyedLocator};
///
/// struct Job {
///     id: &'static str,
///     cost: u32,
/// }
///
/// impl Keyed for Job {
///     type Key = &'static str;
///     fn key(&self) -> &&'static str { &self.id }
/// }
///
/// let mut heap = IndexedMinHeap::new(
///     |a: &Job, b: &Job| a.cost.cmp(&b.cost),
///     KeyedLocator::new(),
/// );
///
/// heap.insert(Job { id: "build", cost: 10 }).unwrap();
/// heap.insert(Job { id: "lint", cost: 1 }).unwrap();
/// heap.insert(Job { id: "test", cost: 5 }).unwrap();
///
/// // Remove an arbitrary element via its tracked position
/// let pos = heap.locator().position(&"test").unwrap();
/// assert_eq!(heap.remove_at(pos).unwrap().id, "test");
///
/// assert_eq!(heap.remove_min().unwrap().id, "lint");
/// assert_eq!(heap.remove_min().unwrap().id, "build");
/// assert!(heap.remove_min().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<E, C, L> {
    /// Heap-ordered elements. Slot `i` holds position `i + 1`.
    slots: Vec<E>,
    compare: C,
    locator: L,
}

impl<E, C, L> IndexedMinHeap<E, C, L>
where
    C: Compare<E>,
    L: Locator<E>,
{
    /// Creates an empty heap.
    #[inline]
    pub const fn new(compare: C, locator: L) -> Self {
        Self {
            slots: Vec::new(),
            compare,
            locator,
        }
    }

    /// Creates an empty heap with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize, compare: C, locator: L) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            compare,
            locator,
        }
    }

    /// Returns the number of elements in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the number of elements the heap can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the ordering capability.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.compare
    }

    /// Returns the position table.
    #[inline]
    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Returns the minimum element without removing it.
    ///
    /// Returns `None` if the heap is empty.
    #[inline]
    pub fn peek(&self) -> Option<&E> {
        self.slots.first()
    }

    /// Returns the element at `pos`, or `None` outside `1..=len`.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<&E> {
        pos.checked_sub(1).and_then(|slot| self.slots.get(slot))
    }

    /// Returns the recorded position of `element`, if it is in this heap.
    #[inline]
    pub fn position(&self, element: &E) -> Option<usize> {
        self.locator.get(element)
    }

    /// Returns `true` if the locator reports `element` in this heap.
    #[inline]
    pub fn contains(&self, element: &E) -> bool {
        self.position(element).is_some()
    }

    /// Inserts an element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the locator already reports the
    /// element as present in this heap, or cannot track it at all (for
    /// example a [`SlotLocator`](crate::SlotLocator) slot past its limit).
    pub fn insert(&mut self, element: E) -> Result<()> {
        if !self.locator.can_track(&element) {
            return Err(Error::InvalidArgument("locator cannot track the element"));
        }
        if self.locator.get(&element).is_some() {
            return Err(Error::InvalidArgument("element is already in the heap"));
        }

        let slot = self.slots.len();
        self.locator.set(&element, slot + 1);
        self.slots.push(element);
        self.sift_up(slot);
        Ok(())
    }

    /// Removes and returns the element at `pos`.
    ///
    /// The last element is moved into the vacated position and sifted in
    /// whichever direction restores heap order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] unless `1 <= pos <= len`.
    pub fn remove_at(&mut self, pos: usize) -> Result<E> {
        let len = self.slots.len();
        if pos == 0 || pos > len {
            return Err(Error::OutOfRange { pos, len });
        }

        let slot = pos - 1;
        let removed = self.slots.swap_remove(slot);
        self.locator.unset(&removed);

        if slot < self.slots.len() {
            self.locator.set(&self.slots[slot], pos);
            if self.sift_up(slot) == slot {
                self.sift_down(slot);
            }
        }

        Ok(removed)
    }

    /// Removes and returns the minimum element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStructure`] if the heap is empty.
    pub fn remove_min(&mut self) -> Result<E> {
        if self.slots.is_empty() {
            return Err(Error::EmptyStructure);
        }
        self.remove_at(1)
    }

    /// Removes `element` by looking up its position in the locator.
    ///
    /// Returns the stored element, which may be a distinct value sharing the
    /// same identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the locator does not know the
    /// element.
    pub fn remove(&mut self, element: &E) -> Result<E> {
        let pos = self
            .locator
            .get(element)
            .ok_or(Error::InvalidArgument("element is not in the heap"))?;
        self.remove_at(pos)
    }

    /// Removes every element, clearing the locator.
    pub fn clear(&mut self) {
        for element in &self.slots {
            self.locator.unset(element);
        }
        self.slots.clear();
    }

    /// Exchanges two slots and records both new positions.
    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.locator.set(&self.slots[a], a + 1);
        self.locator.set(&self.slots[b], b + 1);
    }

    /// Moves the element at `slot` towards the root while its parent is
    /// greater. Returns the slot it settles in.
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self
                .compare
                .compare(&self.slots[parent], &self.slots[slot])
                .is_gt()
            {
                self.swap(parent, slot);
                slot = parent;
            } else {
                break;
            }
        }
        slot
    }

    /// Moves the element at `slot` towards the leaves while a child is
    /// smaller. Returns the slot it settles in.
    fn sift_down(&mut self, mut slot: usize) -> usize {
        let len = self.slots.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }

            // Only consult the right child when it exists; prefer left on ties
            let right = left + 1;
            let smaller = if right < len
                && self
                    .compare
                    .compare(&self.slots[right], &self.slots[left])
                    .is_lt()
            {
                right
            } else {
                left
            };

            if self
                .compare
                .compare(&self.slots[smaller], &self.slots[slot])
                .is_lt()
            {
                self.swap(slot, smaller);
                slot = smaller;
            } else {
                break;
            }
        }
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Keyed, KeyedLocator, NaturalOrder, SlotLocator, Slotted};
    use std::cmp::Ordering;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Task {
        priority: u32,
        id: usize,
    }

    impl Task {
        fn new(priority: u32, id: usize) -> Self {
            Self { priority, id }
        }
    }

    impl Slotted for Task {
        fn slot(&self) -> usize {
            self.id
        }
    }

    impl Keyed for Task {
        type Key = usize;

        fn key(&self) -> &usize {
            &self.id
        }
    }

    fn by_priority(a: &Task, b: &Task) -> Ordering {
        a.priority.cmp(&b.priority)
    }

    type TaskHeap = IndexedMinHeap<Task, fn(&Task, &Task) -> Ordering, SlotLocator>;

    fn task_heap() -> TaskHeap {
        IndexedMinHeap::new(by_priority as fn(&Task, &Task) -> Ordering, SlotLocator::new())
    }

    /// Checks heap order and that every element's locator entry matches its
    /// actual position.
    fn assert_consistent<E, C, L>(heap: &IndexedMinHeap<E, C, L>)
    where
        E: std::fmt::Debug,
        C: Compare<E>,
        L: Locator<E>,
    {
        for pos in 1..=heap.len() {
            let element = heap.get(pos).unwrap();
            assert_eq!(
                heap.position(element),
                Some(pos),
                "locator out of step for {element:?}"
            );
            if pos > 1 {
                let parent = heap.get(pos / 2).unwrap();
                assert!(
                    heap.comparator().compare(parent, element).is_le(),
                    "heap order violated at position {pos}"
                );
            }
        }
    }

    #[test]
    fn new_is_empty() {
        let heap = task_heap();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert!(heap.peek().is_none());
        assert!(heap.get(1).is_none());
    }

    #[test]
    fn insert_remove_single() {
        let mut heap = task_heap();
        heap.insert(Task::new(5, 1)).unwrap();

        assert_eq!(heap.len(), 1);
        assert_eq!(heap.peek(), Some(&Task::new(5, 1)));
        assert_eq!(heap.locator().position(1), Some(1));

        let removed = heap.remove_min().unwrap();
        assert_eq!(removed, Task::new(5, 1));
        assert!(heap.is_empty());

        // Entry's position cleared
        assert_eq!(heap.locator().position(1), None);
    }

    #[test]
    fn min_heap_order() {
        let mut heap = task_heap();
        heap.insert(Task::new(10, 1)).unwrap();
        heap.insert(Task::new(1, 2)).unwrap();
        heap.insert(Task::new(5, 3)).unwrap();
        heap.insert(Task::new(3, 4)).unwrap();
        assert_consistent(&heap);

        // Should pop in priority order: 1, 3, 5, 10
        assert_eq!(heap.remove_min().unwrap().priority, 1);
        assert_eq!(heap.remove_min().unwrap().priority, 3);
        assert_eq!(heap.remove_min().unwrap().priority, 5);
        assert_eq!(heap.remove_min().unwrap().priority, 10);
    }

    #[test]
    fn remove_arbitrary() {
        let mut heap = task_heap();
        heap.insert(Task::new(10, 1)).unwrap();
        heap.insert(Task::new(1, 2)).unwrap();
        heap.insert(Task::new(5, 3)).unwrap();

        // Remove middle priority
        let pos = heap.locator().position(3).unwrap();
        assert_eq!(heap.remove_at(pos).unwrap().id, 3);
        assert_eq!(heap.locator().position(3), None);
        assert_eq!(heap.len(), 2);
        assert_consistent(&heap);

        // Remaining: 1, 10
        assert_eq!(heap.remove_min().unwrap().priority, 1);
        assert_eq!(heap.remove_min().unwrap().priority, 10);
    }

    #[test]
    fn remove_root_by_element() {
        let mut heap = task_heap();
        heap.insert(Task::new(10, 1)).unwrap();
        heap.insert(Task::new(1, 2)).unwrap();
        heap.insert(Task::new(5, 3)).unwrap();

        // Identity, not contents, selects the element
        let removed = heap.remove(&Task::new(99, 2)).unwrap();
        assert_eq!(removed, Task::new(1, 2));
        assert_eq!(heap.len(), 2);
        assert_consistent(&heap);

        // Remaining: 5, 10
        assert_eq!(heap.remove_min().unwrap().priority, 5);
        assert_eq!(heap.remove_min().unwrap().priority, 10);
    }

    #[test]
    fn remove_last_slot() {
        let mut heap = task_heap();
        heap.insert(Task::new(1, 0)).unwrap();
        heap.insert(Task::new(2, 1)).unwrap();
        heap.insert(Task::new(3, 2)).unwrap();

        assert_eq!(heap.remove_at(3).unwrap().id, 2);
        assert_eq!(heap.len(), 2);
        assert_consistent(&heap);
    }

    #[test]
    fn remove_at_sifts_up_when_tail_is_smaller() {
        // Tail element (4) moves into a hole under a larger parent in the
        // other subtree and must rise, not sink.
        let mut heap = task_heap();
        for (id, priority) in [1, 10, 2, 11, 12, 3, 4].into_iter().enumerate() {
            heap.insert(Task::new(priority, id)).unwrap();
        }
        assert_consistent(&heap);

        // Position 5 holds 12 (child of 10); tail is 4
        assert_eq!(heap.get(5).unwrap().priority, 12);
        heap.remove_at(5).unwrap();
        assert_consistent(&heap);
        assert_eq!(heap.get(2).unwrap().priority, 4);
    }

    #[test]
    fn remove_at_sifts_down_when_tail_is_larger() {
        let mut heap = task_heap();
        for (id, priority) in [1, 2, 20, 3, 4, 21, 22, 5].into_iter().enumerate() {
            heap.insert(Task::new(priority, id)).unwrap();
        }

        // Removing 2 at position 2 pulls tail 5 in, which must sink below 3
        assert_eq!(heap.get(2).unwrap().priority, 2);
        heap.remove_at(2).unwrap();
        assert_consistent(&heap);
        assert_eq!(heap.get(2).unwrap().priority, 3);
    }

    #[test]
    fn sift_down_with_only_left_child() {
        let mut heap = task_heap();
        heap.insert(Task::new(1, 0)).unwrap();
        heap.insert(Task::new(5, 1)).unwrap();
        heap.insert(Task::new(6, 2)).unwrap();
        heap.insert(Task::new(7, 3)).unwrap();

        // Root has two children; position 2 has only a left child
        heap.remove_min().unwrap();
        assert_consistent(&heap);
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek().unwrap().priority, 5);
    }

    #[test]
    fn out_of_range() {
        let mut heap = task_heap();
        assert_eq!(
            heap.remove_at(1),
            Err(Error::OutOfRange { pos: 1, len: 0 })
        );

        heap.insert(Task::new(1, 0)).unwrap();
        heap.insert(Task::new(2, 1)).unwrap();
        assert_eq!(
            heap.remove_at(0),
            Err(Error::OutOfRange { pos: 0, len: 2 })
        );
        assert_eq!(
            heap.remove_at(3),
            Err(Error::OutOfRange { pos: 3, len: 2 })
        );

        // Nothing changed
        assert_eq!(heap.len(), 2);
        assert_consistent(&heap);
    }

    #[test]
    fn remove_min_empty() {
        let mut heap = task_heap();
        assert_eq!(heap.remove_min(), Err(Error::EmptyStructure));
    }

    #[test]
    fn duplicate_insert_rejected() {
        let mut heap = task_heap();
        heap.insert(Task::new(3, 7)).unwrap();
        assert!(matches!(
            heap.insert(Task::new(1, 7)),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.peek().unwrap().priority, 3);
    }

    #[test]
    fn untrackable_slot_rejected() {
        let mut heap = IndexedMinHeap::new(NaturalOrder, SlotLocator::new());
        heap.insert(3usize).unwrap();

        for slot in [usize::MAX, 1 << 40, SlotLocator::MAX_SLOTS] {
            assert_eq!(
                heap.insert(slot),
                Err(Error::InvalidArgument("locator cannot track the element"))
            );
        }

        // Nothing changed
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.peek(), Some(&3));
        assert_eq!(heap.locator().position(usize::MAX), None);
    }

    #[test]
    fn remove_unknown_rejected() {
        let mut heap = task_heap();
        heap.insert(Task::new(3, 0)).unwrap();
        assert!(matches!(
            heap.remove(&Task::new(3, 1)),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        // Tie-break on id in the comparator; heap adds no reordering of its own
        let mut heap = IndexedMinHeap::new(
            |a: &Task, b: &Task| a.priority.cmp(&b.priority).then(a.id.cmp(&b.id)),
            SlotLocator::new(),
        );
        for id in 0..16 {
            heap.insert(Task::new((id % 2) as u32, id)).unwrap();
        }

        let order: Vec<usize> = std::iter::from_fn(|| heap.remove_min().ok())
            .map(|t| t.id)
            .collect();
        assert_eq!(
            order,
            vec![0, 2, 4, 6, 8, 10, 12, 14, 1, 3, 5, 7, 9, 11, 13, 15]
        );
    }

    #[test]
    fn clear() {
        let mut heap = task_heap();
        heap.insert(Task::new(10, 1)).unwrap();
        heap.insert(Task::new(1, 2)).unwrap();

        heap.clear();

        assert!(heap.is_empty());
        assert_eq!(heap.locator().position(1), None);
        assert_eq!(heap.locator().position(2), None);

        // Reusable after clear
        heap.insert(Task::new(4, 1)).unwrap();
        assert_eq!(heap.locator().position(1), Some(1));
    }

    #[test]
    fn keyed_locator_heap() {
        let mut heap = IndexedMinHeap::new(by_priority, KeyedLocator::new());
        heap.insert(Task::new(3, 100)).unwrap();
        heap.insert(Task::new(1, 200)).unwrap();
        heap.insert(Task::new(2, 300)).unwrap();
        assert_consistent(&heap);

        let pos = heap.locator().position(&300).unwrap();
        assert_eq!(heap.remove_at(pos).unwrap().id, 300);
        assert_eq!(heap.locator().len(), 2);
        assert_consistent(&heap);
    }

    #[test]
    fn natural_order_plain_slots() {
        let mut heap = IndexedMinHeap::new(NaturalOrder, SlotLocator::new());
        for v in [9usize, 4, 7, 1] {
            heap.insert(v).unwrap();
        }
        assert_eq!(heap.peek(), Some(&1));
        assert_eq!(heap.remove(&7), Ok(7));
        assert_eq!(heap.remove_min(), Ok(1));
        assert_eq!(heap.remove_min(), Ok(4));
        assert_eq!(heap.remove_min(), Ok(9));
    }

    #[test]
    fn stress_insert_remove() {
        let mut heap =
            IndexedMinHeap::with_capacity(1024, by_priority, SlotLocator::with_capacity(1024));

        // Insert 1000 items with random-ish priorities
        for i in 0..1000usize {
            let priority = ((i * 7 + 13) % 1000) as u32; // Deterministic scramble
            heap.insert(Task::new(priority, i)).unwrap();
        }
        assert_consistent(&heap);

        // Remove every third element from the middle
        for i in (0..1000usize).step_by(3) {
            let pos = heap.locator().position(i).unwrap();
            heap.remove_at(pos).unwrap();
        }
        assert_consistent(&heap);

        // Pop all and verify sorted order
        let mut last = 0;
        while let Ok(task) = heap.remove_min() {
            assert!(task.priority >= last, "heap order violated");
            assert_ne!(task.id % 3, 0);
            last = task.priority;
        }
    }
}
