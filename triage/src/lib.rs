//! Two-queue triage: serve the most urgent item, unless someone has waited
//! too long.
//!
//! A [`Triage`] keeps every queued item in two adaptable min-heaps from
//! [`triage_heap`], one ordered by priority and one by arrival. Each serve
//! reads both heads, picks a lane, and removes the chosen item from *both*
//! heaps in O(log n) using the position the other heap tracked for it.
//!
//! # Decision Rule
//!
//! ```text
//! waited = now - arrival(head of arrival queue)
//! waited >  max_wait  -> serve head of arrival queue   (Lane::Overdue)
//! waited <= max_wait  -> serve head of priority queue  (Lane::Priority)
//! ```
//!
//! Lower priority values are more urgent. Ties in either ordering are broken
//! first-come first-served.
//!
//! # Quick Start
//!
//! ```
//! use triage::{Lane, Triage, Triaged};
//!
//! struct Incident {
//!     summary: &'static str,
//!     severity: u8,
//!     opened_at: u64,
//! }
//!
//! impl Triaged for Incident {
//!     type Priority = u8;
//!     type Time = u64;
//!     fn priority(&self) -> u8 { self.severity }
//!     fn arrival(&self) -> u64 { self.opened_at }
//! }
//!
//! let mut queue = Triage::new(10);
//! queue.add(Incident { summary: "typo", severity: 3, opened_at: 0 }).unwrap();
//! queue.add(Incident { summary: "outage", severity: 1, opened_at: 1 }).unwrap();
//!
//! let (served, lane) = queue.next_with_lane(2).unwrap();
//! assert_eq!((served.summary, lane), ("outage", Lane::Priority));
//!
//! // Only the typo is left, and it has now waited past the threshold
//! let (served, lane) = queue.next_with_lane(20).unwrap();
//! assert_eq!((served.summary, lane), ("typo", Lane::Overdue));
//! ```
//!
//! # Threading
//!
//! A `Triage` is a plain single-threaded value. A serve reads both heaps and
//! then mutates both, so callers sharing one across threads must wrap the
//! whole scheduler in a single lock.
//!
//! # Feature Flags
//!
//! - `serde` - Derive `Serialize`/`Deserialize` for [`TriageConfig`]

#![warn(missing_docs)]

pub mod config;
pub mod item;
pub mod scheduler;
pub mod time;

pub use config::TriageConfig;
pub use item::{TicketId, Triaged};
pub use scheduler::{Lane, Triage, Wait};
pub use time::Timestamp;
pub use triage_heap::{Error, Result};
