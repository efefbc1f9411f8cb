//! Adaptable priority queue: a binary min-heap that knows where every
//! element lives.
//!
//! A plain binary heap can only remove its minimum. This crate's
//! [`IndexedMinHeap`] also removes *any* element in O(log n), because an
//! injected [`Locator`] records each element's array position and is kept in
//! step with every swap, insert and removal.
//!
//! # Design
//!
//! The heap owns its elements but delegates two decisions:
//!
//! ```text
//! Compare<E>  - total order over elements (closure, fn pointer, NaturalOrder)
//! Locator<E>  - element identity -> current 1-based position
//! ```
//!
//! Keeping the position table outside the element lets the same logical item
//! sit in several heaps at once, each ordered differently and each with its
//! own locator.
//!
//! | Locator | Identity | Backing | Use Case |
//! |---------|----------|---------|----------|
//! | [`SlotLocator`] | dense `usize` slot | `Vec` | Slab keys, array indices |
//! | [`KeyedLocator`] | hashable key | `HashMap` | Sparse ids, names |
//!
//! # Quick Start
//!
//! ```
//! use triage_heap::{IndexedMinHeap, NaturalOrder, SlotLocator};
//!
//! let mut heap = IndexedMinHeap::new(NaturalOrder, SlotLocator::new());
//! for v in [5usize, 1, 3] {
//!     heap.insert(v).unwrap();
//! }
//!
//! // O(log n) removal from anywhere
//! let pos = heap.locator().position(3).unwrap();
//! assert_eq!(heap.remove_at(pos), Ok(3));
//!
//! assert_eq!(heap.remove_min(), Ok(1));
//! assert_eq!(heap.peek(), Some(&5));
//! ```
//!
//! # Positions
//!
//! Positions are 1-based: the minimum is at 1, the children of `i` are at
//! `2i` and `2i + 1`. Position 0 is never occupied, which lets locators use it
//! as their "absent" sentinel.

#![warn(missing_docs)]

pub mod compare;
pub mod error;
pub mod heap;
pub mod locator;

pub use compare::{Compare, NaturalOrder};
pub use error::{Error, Result};
pub use heap::IndexedMinHeap;
pub use locator::{Keyed, KeyedLocator, Locator, SlotLocator, Slotted};
