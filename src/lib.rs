#![cfg_attr(not(feature = "std"), no_std)]

//! A no_std-compatible library for driving WS2812/SK6812 addressable LED
//! strips through precisely-timed symbol streams, plus a debounced
//! proximity-sensor state machine.
//!
//! The strip protocol is a single data wire with no clock: every color bit
//! becomes one timing symbol (~1.25 µs), distinguished only by pulse width.
//! This crate encodes pixels into a fixed frame buffer of such symbols,
//! streams the buffer through a hardware channel (PWM-compare via DMA, SPI
//! via DMA, or blocking SPI), and enforces the synchronization the protocol
//! demands: exclusive buffer ownership while a frame is in flight, a
//! bounded completion wait, and the post-frame reset gap that makes the
//! LEDs latch.
//!
//! # Core Concepts
//!
//! - **`SymbolEncoding`**: pure mapping from a color bit to a hardware
//!   timing word, with [`PwmSymbols`] and [`SpiSymbols`] realizations
//! - **`FrameBuffer`**: fixed-length encoded symbol sequence for a whole
//!   strip, with the pixel encoder (`set_pixel`, fail-soft bounds policy)
//! - **`HardwareChannel`**: trait to implement for your transmission
//!   hardware; [`SpiBlockingChannel`] ships as the portable variant
//! - **`CompletionFlag`**: the one flag bridging a transfer-complete
//!   interrupt to polling code, for DMA-backed channel implementations
//! - **`LedStrip`**: owns buffer and channel; `set_pixel` / `fill` /
//!   `clear_all` stage colors, `flush` transmits with timeout and reset gap
//! - **`Debouncer`**: noisy boolean sample → stable [`SensorState`] plus
//!   consume-once edge events
//! - **`TimeSource`**: trait to implement for your timing system
//!
//! Colors are 8-bit [`Rgb`] triples ([`smart_leds::RGB8`]); the wire order
//! (green-red-blue for SK6812-class strips) is applied by the encoder, not
//! by callers.

pub mod channel;
pub mod colors;
pub mod completion;
pub mod frame;
pub mod sensor;
pub mod strip;
pub mod symbol;
pub mod time;

/// RGB color representation re-exported from the `smart_leds` crate.
pub type Rgb = smart_leds::RGB8;

pub use channel::{ChannelError, ChannelStatus, HardwareChannel, SpiBlockingChannel};
pub use completion::CompletionFlag;
pub use frame::{ColorOrder, ConfigError, FrameBuffer, SYMBOLS_PER_PIXEL};
pub use sensor::{DEBOUNCE_WINDOW_MILLIS, Debouncer, SampleSource, SensorEdge, SensorState};
pub use strip::{
    LedStrip, RESET_GAP_DEFAULT_MICROS, RESET_GAP_FLOOR_MICROS, StripConfig, SYMBOL_PERIOD_NANOS,
    TransmitError,
};
pub use symbol::{PwmSymbols, SpiSymbols, SymbolEncoding};
pub use time::{TimeDuration, TimeInstant, TimeSource};
