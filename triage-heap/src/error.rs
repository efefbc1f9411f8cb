//! Error types for heap operations.

/// Failure reported by a heap (or scheduler) operation.
///
/// Every operation validates its arguments before touching the backing
/// store, so an `Err` means nothing was mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required argument is semantically absent: the element is already
    /// in the heap, or is not known to it.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A position outside the occupied range `1..=len`.
    #[error("position {pos} out of range 1..={len}")]
    OutOfRange {
        /// The rejected position.
        pos: usize,
        /// Number of occupied positions at the time of the call.
        len: usize,
    },

    /// Removal requested on a structure with no elements.
    #[error("structure is empty")]
    EmptyStructure,
}

/// Result alias for heap operations.
pub type Result<T> = core::result::Result<T, Error>;
