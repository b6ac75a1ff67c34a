//! LED strip driver: pixel staging plus the transmission engine.
//!
//! [`LedStrip`] owns the frame buffer and the hardware channel, which makes
//! the buffer's single-writer discipline structural: while
//! [`flush`](LedStrip::flush) runs it holds the exclusive borrow, so no
//! pixel write can race an in-flight transfer.
//!
//! A flush streams the whole frame, waits (bounded) for the channel to
//! report completion, stops the symbol clock, and then holds the data line
//! low for the reset gap — receiving LEDs latch the frame only after
//! observing that gap.

use crate::Rgb;
use crate::channel::{ChannelError, ChannelStatus, HardwareChannel};
use crate::frame::{ColorOrder, ConfigError, FrameBuffer, SYMBOLS_PER_PIXEL};
use crate::symbol::SymbolEncoding;
use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Documented protocol minimum for the post-frame reset gap, in
/// microseconds.
pub const RESET_GAP_FLOOR_MICROS: u64 = 80;

/// Default reset gap: a strict margin over [`RESET_GAP_FLOOR_MICROS`].
pub const RESET_GAP_DEFAULT_MICROS: u64 = 100;

/// Nominal symbol period in nanoseconds (~800 kHz symbol rate).
pub const SYMBOL_PERIOD_NANOS: u64 = 1250;

/// Transmission errors surfaced by [`LedStrip::flush`].
///
/// None of these are retried internally; a failed flush leaves the strip in
/// an undefined visual state and the caller decides whether to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitError {
    /// The channel already had a transfer outstanding.
    ChannelBusy,

    /// The hardware reported a transfer fault mid-frame.
    TransferFault,

    /// Completion was not observed within the configured bound. The symbol
    /// clock has been stopped.
    Timeout,
}

impl core::fmt::Display for TransmitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransmitError::ChannelBusy => {
                write!(f, "a transmission is already outstanding")
            }
            TransmitError::TransferFault => {
                write!(f, "hardware transfer fault")
            }
            TransmitError::Timeout => {
                write!(f, "transfer completion not observed within the timeout")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransmitError {}

impl From<ChannelError> for TransmitError {
    fn from(err: ChannelError) -> Self {
        match err {
            ChannelError::Busy => TransmitError::ChannelBusy,
            ChannelError::Fault => TransmitError::TransferFault,
        }
    }
}

/// Strip configuration.
///
/// `StripConfig::new` fills in protocol defaults; fields are public so
/// deployments can override them (a strip wired through a glitchy level
/// shifter wants `pad_symbols`, a slow fake channel in tests wants a longer
/// `completion_timeout`).
#[derive(Debug, Clone, Copy)]
pub struct StripConfig<D: TimeDuration> {
    /// Number of pixels on the strip.
    pub pixel_count: usize,

    /// Leading line-low symbols absorbing startup glitches. Default 0.
    pub pad_symbols: usize,

    /// Wire channel order. Default green-red-blue.
    pub color_order: ColorOrder,

    /// Upper bound on the completion wait. Default: twice the frame
    /// airtime plus 5 ms slack.
    pub completion_timeout: D,

    /// Line-low hold after each frame so the LEDs latch. Default
    /// [`RESET_GAP_DEFAULT_MICROS`].
    pub reset_gap: D,
}

impl<D: TimeDuration> StripConfig<D> {
    /// Creates a configuration with protocol defaults for `pixel_count`
    /// pixels.
    #[must_use]
    pub fn new(pixel_count: usize) -> Self {
        let airtime_micros =
            (pixel_count as u64 * SYMBOLS_PER_PIXEL as u64 * SYMBOL_PERIOD_NANOS) / 1000;
        Self {
            pixel_count,
            pad_symbols: 0,
            color_order: ColorOrder::default(),
            completion_timeout: D::from_micros(airtime_micros * 2 + 5_000),
            reset_gap: D::from_micros(RESET_GAP_DEFAULT_MICROS),
        }
    }
}

/// Drives a single addressable LED strip through a hardware channel.
///
/// Callers stage colors with [`set_pixel`](Self::set_pixel) /
/// [`fill`](Self::fill) / [`clear_all`](Self::clear_all), then push the
/// frame to the wire with [`flush`](Self::flush).
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `E` - Symbol encoding matching the channel's word type
/// * `C` - Hardware channel implementation
/// * `I` - Time instant type
/// * `T` - Time source implementation
/// * `CAP` - Symbol capacity of the frame buffer
pub struct LedStrip<'t, E, C, I, T, const CAP: usize>
where
    E: SymbolEncoding,
    C: HardwareChannel<Word = E::Word>,
    I: TimeInstant,
    T: TimeSource<I>,
{
    frame: FrameBuffer<E, CAP>,
    channel: C,
    time_source: &'t T,
    completion_timeout: I::Duration,
    reset_gap: I::Duration,
}

impl<'t, E, C, I, T, const CAP: usize> LedStrip<'t, E, C, I, T, CAP>
where
    E: SymbolEncoding,
    C: HardwareChannel<Word = E::Word>,
    I: TimeInstant,
    T: TimeSource<I>,
{
    /// Creates a strip driver with an all-idle frame buffer.
    ///
    /// # Errors
    /// * `ZeroPixels` - the configured pixel count is zero
    /// * `CapacityExceeded` - the strip does not fit in `CAP` symbols
    pub fn new(
        channel: C,
        time_source: &'t T,
        config: StripConfig<I::Duration>,
    ) -> Result<Self, ConfigError> {
        let frame = FrameBuffer::new(
            config.pixel_count,
            config.pad_symbols,
            config.color_order,
        )?;
        Ok(Self {
            frame,
            channel,
            time_source,
            completion_timeout: config.completion_timeout,
            reset_gap: config.reset_gap,
        })
    }

    /// Stages one pixel's color. Out-of-range indices are silently
    /// ignored (see [`FrameBuffer::set_pixel`]).
    pub fn set_pixel(&mut self, index: usize, color: Rgb) {
        self.frame.set_pixel(index, color);
    }

    /// Stages the same color on every pixel.
    pub fn fill(&mut self, color: Rgb) {
        for index in 0..self.frame.pixel_count() {
            self.frame.set_pixel(index, color);
        }
    }

    /// Stages black on every pixel.
    pub fn clear_all(&mut self) {
        self.frame.clear_all();
    }

    /// Number of pixels on the strip.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frame.pixel_count()
    }

    /// Always false: construction rejects zero-pixel strips.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame.pixel_count() == 0
    }

    /// The staged frame.
    #[must_use]
    pub fn frame(&self) -> &FrameBuffer<E, CAP> {
        &self.frame
    }

    /// The hardware channel.
    #[must_use]
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Streams the staged frame to the strip and waits for it to latch.
    ///
    /// Blocks the calling context until the channel reports completion (or
    /// the configured timeout expires), stops the symbol clock, and holds
    /// the line low for the reset gap before returning. On any error the
    /// symbol clock is stopped before the error propagates — the engine
    /// never leaves the channel running and never waits unbounded.
    ///
    /// # Errors
    /// * `ChannelBusy` - a transfer was already outstanding
    /// * `TransferFault` - the hardware reported a fault
    /// * `Timeout` - completion was not observed within the bound
    pub fn flush(&mut self) -> Result<(), TransmitError> {
        if self.channel.status() == ChannelStatus::InFlight {
            return Err(TransmitError::ChannelBusy);
        }

        if let Err(err) = self.channel.start(self.frame.symbols()) {
            // A Busy rejection means the outstanding transfer is not ours
            // to cancel; only a fault warrants halting the clock.
            if err == ChannelError::Fault {
                self.channel.stop();
            }
            return Err(err.into());
        }

        let started = self.time_source.now();
        loop {
            match self.channel.status() {
                ChannelStatus::Complete => break,
                ChannelStatus::Fault => {
                    self.channel.stop();
                    return Err(TransmitError::TransferFault);
                }
                ChannelStatus::InFlight => {
                    let waited = self.time_source.now().duration_since(started);
                    if waited.as_micros() >= self.completion_timeout.as_micros() {
                        self.channel.stop();
                        return Err(TransmitError::Timeout);
                    }
                }
            }
        }

        self.channel.stop();
        self.hold_reset_gap();
        Ok(())
    }

    /// Holds the data line low until the reset gap has elapsed. The LEDs
    /// latch the just-sent frame only after observing this gap, so a
    /// following `flush` cannot start early.
    fn hold_reset_gap(&self) {
        if self.reset_gap == I::Duration::ZERO {
            return;
        }
        let gap_start = self.time_source.now();
        while self
            .time_source
            .now()
            .duration_since(gap_start)
            .as_micros()
            < self.reset_gap.as_micros()
        {}
    }
}
