//! Debounced proximity sensor state machine.
//!
//! Converts a noisy boolean GPIO sample into a stable logical state plus
//! edge events. A candidate state must persist for the debounce window
//! before it is committed; shorter excursions are discarded outright (no
//! queued replay). Edge events are latched when a transition commits and
//! consumed exactly once by [`Debouncer::just_detected`] /
//! [`Debouncer::just_lost`], so an edge can never be observed twice or
//! silently lost between two queries.

use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Default debounce window in milliseconds.
pub const DEBOUNCE_WINDOW_MILLIS: u64 = 50;

/// Debounced detection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorState {
    /// No committed reading yet (startup).
    Unknown,

    /// No object within range.
    NoObject,

    /// Object within range.
    ObjectDetected,
}

/// A committed state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorEdge {
    /// Committed no-object → object-detected.
    Detected,

    /// Committed object-detected → no-object.
    Lost,
}

/// Raw boolean sample source for the sensor (true = object present).
///
/// An unreadable sensor is modeled by returning `false` — "no object" is
/// the policy for a silent sensor, not a fault. Revisit if your hardware
/// can report failure distinctly from absence.
///
/// Implemented for closures, so a GPIO read can be passed directly:
/// `Debouncer::new(|| pin.is_high(), &clock)`.
pub trait SampleSource {
    /// Reads the immediate, unfiltered sensor level.
    fn read_raw(&mut self) -> bool;
}

impl<F: FnMut() -> bool> SampleSource for F {
    fn read_raw(&mut self) -> bool {
        self()
    }
}

/// Debounces a proximity sensor against a monotonic clock.
///
/// Call [`poll`](Self::poll) on a periodic tick; every other method is a
/// query against the committed history and never samples the hardware.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `S` - Sample source implementation
/// * `I` - Time instant type
/// * `T` - Time source implementation
pub struct Debouncer<'t, S, I, T>
where
    S: SampleSource,
    I: TimeInstant,
    T: TimeSource<I>,
{
    source: S,
    time_source: &'t T,
    committed: SensorState,
    previous: SensorState,
    last_change: I,
    window: I::Duration,
    pending_edge: Option<SensorEdge>,
}

impl<'t, S, I, T> Debouncer<'t, S, I, T>
where
    S: SampleSource,
    I: TimeInstant,
    T: TimeSource<I>,
{
    /// Creates a debouncer with the default 50 ms window. Both the
    /// committed and previous states start as [`SensorState::Unknown`].
    pub fn new(source: S, time_source: &'t T) -> Self {
        Self::with_window(
            source,
            time_source,
            I::Duration::from_millis(DEBOUNCE_WINDOW_MILLIS),
        )
    }

    /// Creates a debouncer with a custom debounce window.
    pub fn with_window(source: S, time_source: &'t T, window: I::Duration) -> Self {
        Self {
            source,
            time_source,
            committed: SensorState::Unknown,
            previous: SensorState::Unknown,
            last_change: time_source.now(),
            window,
            pending_edge: None,
        }
    }

    /// Samples the sensor once and advances the state machine.
    ///
    /// A candidate agreeing with the committed state refreshes the change
    /// timestamp, so a noisy re-confirmation cannot later be mistaken for
    /// a long-standing disagreement. A disagreeing candidate commits only
    /// once the window has elapsed since the last refresh; otherwise it is
    /// discarded. Returns the committed state after the tick.
    pub fn poll(&mut self) -> SensorState {
        let candidate = if self.source.read_raw() {
            SensorState::ObjectDetected
        } else {
            SensorState::NoObject
        };
        let now = self.time_source.now();

        if candidate == self.committed {
            self.last_change = now;
        } else {
            let elapsed = now.duration_since(self.last_change);
            if elapsed.as_micros() >= self.window.as_micros() {
                self.previous = self.committed;
                self.committed = candidate;
                self.last_change = now;
                match (self.previous, self.committed) {
                    (SensorState::NoObject, SensorState::ObjectDetected) => {
                        self.pending_edge = Some(SensorEdge::Detected);
                    }
                    (SensorState::ObjectDetected, SensorState::NoObject) => {
                        self.pending_edge = Some(SensorEdge::Lost);
                    }
                    // Transitions out of Unknown establish a baseline, not
                    // an edge.
                    _ => {}
                }
            }
        }

        self.committed
    }

    /// The committed state. Idempotent; does not sample.
    #[must_use]
    pub fn state(&self) -> SensorState {
        self.committed
    }

    /// The committed state before the most recent transition.
    #[must_use]
    pub fn previous_state(&self) -> SensorState {
        self.previous
    }

    /// Whether an object is currently detected (debounced).
    #[must_use]
    pub fn is_object_detected(&self) -> bool {
        self.committed == SensorState::ObjectDetected
    }

    /// Consumes and returns the latched edge event, if any.
    pub fn take_edge(&mut self) -> Option<SensorEdge> {
        self.pending_edge.take()
    }

    /// True exactly once after a committed no-object → object-detected
    /// transition. Consumes the latched rising edge; a latched falling
    /// edge is left for [`just_lost`](Self::just_lost).
    pub fn just_detected(&mut self) -> bool {
        if self.pending_edge == Some(SensorEdge::Detected) {
            self.pending_edge = None;
            true
        } else {
            false
        }
    }

    /// True exactly once after a committed object-detected → no-object
    /// transition. Counterpart of [`just_detected`](Self::just_detected).
    pub fn just_lost(&mut self) -> bool {
        if self.pending_edge == Some(SensorEdge::Lost) {
            self.pending_edge = None;
            true
        } else {
            false
        }
    }
}
