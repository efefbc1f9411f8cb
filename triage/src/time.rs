//! Clock capability used to measure how long an item has waited.

use std::fmt;
use std::time::{Duration, Instant};

/// A point in time that can measure the span since an earlier point.
///
/// The scheduler never samples a clock itself; callers pass the current
/// time into each removal. Any totally ordered clock works: integer ticks,
/// [`Instant`], or a [`Duration`] since some simulation epoch.
///
/// # Example
///
/// ```
/// use triage::Timestamp;
///
/// assert_eq!(15u32.elapsed_since(10), 5);
/// // A clock reading earlier than the arrival counts as no wait
/// assert_eq!(10u32.elapsed_since(15), 0);
/// ```
pub trait Timestamp: Copy + Ord + fmt::Debug {
    /// Span between two timestamps. Signed integer clocks measure it in the
    /// unsigned type of the same width.
    type Duration: Copy + Ord + fmt::Debug;

    /// Returns the span from `earlier` to `self`, saturating at zero when
    /// `earlier` is actually later.
    fn elapsed_since(self, earlier: Self) -> Self::Duration;
}

macro_rules! impl_timestamp_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Timestamp for $ty {
                type Duration = $ty;

                #[inline]
                fn elapsed_since(self, earlier: Self) -> $ty {
                    self.saturating_sub(earlier)
                }
            }
        )*
    };
}

macro_rules! impl_timestamp_for_signed {
    ($($ty:ty => $wait:ty),*) => {
        $(
            // Waits are measured unsigned so the full span between any two
            // readings fits without clamping.
            impl Timestamp for $ty {
                type Duration = $wait;

                #[inline]
                fn elapsed_since(self, earlier: Self) -> $wait {
                    if self > earlier { self.abs_diff(earlier) } else { 0 }
                }
            }
        )*
    };
}

impl_timestamp_for_unsigned!(u16, u32, u64, u128, usize);
impl_timestamp_for_signed!(i32 => u32, i64 => u64, i128 => u128);

impl Timestamp for Instant {
    type Duration = Duration;

    #[inline]
    fn elapsed_since(self, earlier: Self) -> Duration {
        self.saturating_duration_since(earlier)
    }
}

impl Timestamp for Duration {
    type Duration = Duration;

    #[inline]
    fn elapsed_since(self, earlier: Self) -> Duration {
        self.saturating_sub(earlier)
    }
}
