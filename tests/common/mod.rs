//! Shared test infrastructure for strip-streamer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};

use strip_streamer::{
    ChannelError, ChannelStatus, ColorOrder, CompletionFlag, FrameBuffer, HardwareChannel, Rgb,
    SYMBOLS_PER_PIXEL, SymbolEncoding, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps microseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_micros(&self) -> u64 {
        self.0
    }

    fn from_micros(micros: u64) -> Self {
        TestDuration(micros)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Clock
// ============================================================================

/// Mock time source with controllable time advancement.
///
/// An optional auto-tick advances the clock on every `now()` query, so code
/// that spin-waits on the time source (completion timeout, reset gap) makes
/// progress deterministically under test.
pub struct MockClock {
    now_micros: Cell<u64>,
    auto_tick_micros: Cell<u64>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            now_micros: Cell::new(0),
            auto_tick_micros: Cell::new(0),
        }
    }

    /// A clock that advances by `micros` every time it is queried.
    pub fn with_auto_tick(micros: u64) -> Self {
        let clock = Self::new();
        clock.auto_tick_micros.set(micros);
        clock
    }

    pub fn advance_micros(&self, micros: u64) {
        self.now_micros.set(self.now_micros.get() + micros);
    }

    pub fn advance_millis(&self, millis: u64) {
        self.advance_micros(millis * 1000);
    }

    /// Current time without consuming an auto-tick.
    pub fn raw_micros(&self) -> u64 {
        self.now_micros.get()
    }
}

impl TimeSource<TestInstant> for MockClock {
    fn now(&self) -> TestInstant {
        let now = self.now_micros.get();
        self.now_micros.set(now + self.auto_tick_micros.get());
        TestInstant(now)
    }
}

// ============================================================================
// Mock Hardware Channel
// ============================================================================

/// How a mock transfer progresses once started.
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Report `Complete` after this many in-flight status polls.
    CompleteAfterPolls(usize),
    /// Stay `InFlight` forever.
    NeverComplete,
    /// Report `Fault` after this many in-flight status polls.
    FaultAfterPolls(usize),
}

/// Fake hardware channel recording starts, stops and the streamed symbols.
///
/// Completion is bridged through a [`CompletionFlag`] exactly the way a
/// DMA-backed implementation would bridge its transfer-complete interrupt;
/// the scripted poll count stands in for the interrupt firing.
pub struct MockChannel<'c, W: Copy = u8> {
    clock: &'c MockClock,
    behavior: MockBehavior,
    completion: CompletionFlag,
    in_flight: Cell<bool>,
    faulted: Cell<bool>,
    polls: Cell<usize>,
    /// Pretend a transfer was already outstanding before the first start.
    pub pre_started: Cell<bool>,
    /// Clock timestamp of each accepted `start`.
    pub start_times: RefCell<Vec<u64>>,
    /// Symbols captured by the most recent `start`.
    pub captured: RefCell<Vec<W>>,
    pub stop_count: Cell<usize>,
}

impl<'c, W: Copy> MockChannel<'c, W> {
    pub fn new(clock: &'c MockClock) -> Self {
        Self::with_behavior(clock, MockBehavior::CompleteAfterPolls(0))
    }

    pub fn with_behavior(clock: &'c MockClock, behavior: MockBehavior) -> Self {
        Self {
            clock,
            behavior,
            completion: CompletionFlag::new(),
            in_flight: Cell::new(false),
            faulted: Cell::new(false),
            polls: Cell::new(0),
            pre_started: Cell::new(false),
            start_times: RefCell::new(Vec::new()),
            captured: RefCell::new(Vec::new()),
            stop_count: Cell::new(0),
        }
    }

    pub fn start_count(&self) -> usize {
        self.start_times.borrow().len()
    }
}

impl<'c, W: Copy> HardwareChannel for MockChannel<'c, W> {
    type Word = W;

    fn start(&mut self, symbols: &[W]) -> Result<(), ChannelError> {
        if self.pre_started.get() || self.in_flight.get() {
            return Err(ChannelError::Busy);
        }
        self.completion.arm();
        self.faulted.set(false);
        self.polls.set(0);
        self.start_times.borrow_mut().push(self.clock.raw_micros());
        *self.captured.borrow_mut() = symbols.to_vec();
        self.in_flight.set(true);
        Ok(())
    }

    fn status(&self) -> ChannelStatus {
        if self.faulted.get() {
            return ChannelStatus::Fault;
        }
        if self.pre_started.get() {
            return ChannelStatus::InFlight;
        }
        if !self.in_flight.get() {
            return ChannelStatus::Complete;
        }
        if self.completion.is_signaled() {
            self.in_flight.set(false);
            return ChannelStatus::Complete;
        }

        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        match self.behavior {
            MockBehavior::CompleteAfterPolls(n) if polls > n => {
                // Stand-in for the transfer-complete interrupt.
                self.completion.signal();
                self.in_flight.set(false);
                ChannelStatus::Complete
            }
            MockBehavior::FaultAfterPolls(n) if polls > n => {
                self.faulted.set(true);
                self.in_flight.set(false);
                ChannelStatus::Fault
            }
            _ => ChannelStatus::InFlight,
        }
    }

    fn stop(&mut self) {
        self.stop_count.set(self.stop_count.get() + 1);
        self.in_flight.set(false);
    }
}

// ============================================================================
// Symbol Decoding Helpers
// ============================================================================

/// Decodes 8 symbols back into one channel byte (MSB first).
pub fn decode_channel<E: SymbolEncoding>(words: &[E::Word]) -> u8 {
    words.iter().fold(0u8, |acc, &word| {
        let bit = word == E::symbol_for_bit(true);
        (acc << 1) | u8::from(bit)
    })
}

/// Decodes a raw symbol stream back into pixel colors.
pub fn decode_symbols<E: SymbolEncoding>(
    words: &[E::Word],
    pad: usize,
    pixel_count: usize,
    order: ColorOrder,
) -> Vec<Rgb> {
    (0..pixel_count)
        .map(|index| {
            let base = pad + index * SYMBOLS_PER_PIXEL;
            let c0 = decode_channel::<E>(&words[base..base + 8]);
            let c1 = decode_channel::<E>(&words[base + 8..base + 16]);
            let c2 = decode_channel::<E>(&words[base + 16..base + 24]);
            match order {
                ColorOrder::GreenRedBlue => Rgb::new(c1, c0, c2),
                ColorOrder::RedGreenBlue => Rgb::new(c0, c1, c2),
            }
        })
        .collect()
}

/// Decodes a frame buffer back into pixel colors.
pub fn decode_frame<E: SymbolEncoding, const CAP: usize>(frame: &FrameBuffer<E, CAP>) -> Vec<Rgb> {
    decode_symbols::<E>(
        frame.symbols(),
        frame.pad(),
        frame.pixel_count(),
        frame.color_order(),
    )
}
