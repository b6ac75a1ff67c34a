//! Completion synchronizer bridging a hardware interrupt to polling code.

use core::sync::atomic::{AtomicBool, Ordering};

/// Single-writer/single-reader completion flag.
///
/// The one handoff point between a transfer-complete interrupt and the
/// polling context awaiting it. Per transfer: the engine calls [`arm`]
/// before starting the hardware, the interrupt calls [`signal`] exactly
/// once on completion, and the engine polls [`is_signaled`] until it
/// observes the store. The Release store / Acquire load pairing makes the
/// completed transfer's memory effects visible to the poller.
///
/// Only load/store atomics are used, so the flag works on cores without
/// compare-and-swap (e.g. thumbv6-class parts). `const`-constructible so it
/// can live in a `static` shared with the interrupt handler:
///
/// ```
/// use strip_streamer::CompletionFlag;
///
/// static TRANSFER_DONE: CompletionFlag = CompletionFlag::new();
///
/// // engine, before programming the hardware:
/// TRANSFER_DONE.arm();
///
/// // interrupt handler, once, when the transfer finishes:
/// TRANSFER_DONE.signal();
///
/// // engine, waiting:
/// while !TRANSFER_DONE.is_signaled() { /* poll or yield */ }
/// ```
///
/// [`arm`]: CompletionFlag::arm
/// [`signal`]: CompletionFlag::signal
/// [`is_signaled`]: CompletionFlag::is_signaled
pub struct CompletionFlag(AtomicBool);

impl CompletionFlag {
    /// Creates a flag in the not-signaled state.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Clears the flag before starting a transfer. Engine context only.
    pub fn arm(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Marks the transfer complete. Interrupt context, at most once per
    /// armed transfer.
    pub fn signal(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns whether the armed transfer has completed.
    #[must_use]
    pub fn is_signaled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for CompletionFlag {
    fn default() -> Self {
        Self::new()
    }
}
