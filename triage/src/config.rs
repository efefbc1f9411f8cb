//! Scheduler configuration.

/// Settings for a [`Triage`](crate::Triage) scheduler.
///
/// `D` is the wait duration type of the clock in use (for example `u32`
/// ticks or [`std::time::Duration`]).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use triage::TriageConfig;
///
/// let config = TriageConfig::new(Duration::from_secs(30 * 60)).with_capacity(256);
/// assert_eq!(config.capacity, 256);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriageConfig<D> {
    /// Longest an item may wait before it is served ahead of priority order.
    pub max_wait: D,
    /// Number of items to pre-allocate room for. Queues still grow past it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: usize,
}

impl<D> TriageConfig<D> {
    /// Creates a config with the given wait threshold and no pre-allocation.
    pub const fn new(max_wait: D) -> Self {
        Self {
            max_wait,
            capacity: 0,
        }
    }

    /// Sets the pre-allocated capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
