//! Time abstraction traits for platform-agnostic timing.
//!
//! The transmission engine times its completion wait and the post-frame
//! reset gap against these traits; the sensor debouncer uses them for its
//! debounce window. Implement them once for your platform's monotonic timer
//! (e.g. a SysTick counter or `embassy_time::Instant`).

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
///
/// Microsecond resolution is required: the LED protocol's reset gap is
/// shorter than a millisecond. Millisecond accessors are provided on top
/// for coarser timing such as debounce windows.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to microseconds.
    fn as_micros(&self) -> u64;

    /// Creates duration from microseconds.
    fn from_micros(micros: u64) -> Self;

    /// Converts duration to whole milliseconds.
    fn as_millis(&self) -> u64 {
        self.as_micros() / 1000
    }

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self {
        Self::from_micros(millis * 1000)
    }
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}
