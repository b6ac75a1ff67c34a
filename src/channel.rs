//! Hardware channel abstraction.
//!
//! A hardware channel accepts a symbol stream at the protocol's fixed
//! cadence and reports completion. The same contract covers every
//! transmission strategy — a PWM compare register fed by DMA, an SPI shift
//! register fed by DMA, or a manually-driven blocking SPI bus — so the
//! transmission engine is written once against [`HardwareChannel`] and each
//! strategy is a single implementation.
//!
//! DMA-backed implementations live in platform crates; they bridge their
//! transfer-complete interrupt to [`status`](HardwareChannel::status)
//! through a [`CompletionFlag`](crate::completion::CompletionFlag). The
//! blocking-SPI strategy is portable and ships here as
//! [`SpiBlockingChannel`].

use embedded_hal::spi::SpiBus;

/// State of the most recently started transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelStatus {
    /// A transfer is streaming symbols out.
    InFlight,

    /// No transfer is outstanding: the last one finished, or none was
    /// started since construction or the last `stop`.
    Complete,

    /// The hardware reported a transfer fault. Latched until the next
    /// `start`.
    Fault,
}

/// Errors reported when starting a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// A transfer is already outstanding; at most one may be in flight.
    Busy,

    /// The hardware rejected or aborted the transfer.
    Fault,
}

impl core::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChannelError::Busy => write!(f, "a transfer is already in flight"),
            ChannelError::Fault => write!(f, "hardware rejected the transfer"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChannelError {}

/// A hardware output channel streaming symbols at the protocol cadence.
///
/// Contract:
/// - `start` programs the transfer from symbol 0 and starts the symbol
///   clock; at most one transfer may be outstanding.
/// - `status` is cheap and side-effect free; it may be polled tightly.
/// - `stop` halts the symbol clock and leaves the data line low. Stopping
///   an idle channel is a no-op.
pub trait HardwareChannel {
    /// Symbol word type this channel consumes.
    type Word: Copy;

    /// Begins streaming `symbols` at the fixed symbol cadence.
    ///
    /// # Errors
    /// * `Busy` - a transfer is already outstanding
    /// * `Fault` - the hardware rejected the transfer
    fn start(&mut self, symbols: &[Self::Word]) -> Result<(), ChannelError>;

    /// Reports the state of the most recently started transfer.
    fn status(&self) -> ChannelStatus;

    /// Halts the symbol clock and leaves the data line low.
    fn stop(&mut self);
}

/// Manual blocking-SPI transmission strategy.
///
/// Streams the symbol bytes synchronously inside [`start`]; the transfer is
/// complete by the time `start` returns, so `status` never reports
/// [`ChannelStatus::InFlight`]. Suited to short strips or cores without a
/// spare DMA channel. The bus must be clocked so that one byte spans one
/// symbol period (~6.4 MHz for [`SpiSymbols`](crate::symbol::SpiSymbols)).
///
/// [`start`]: HardwareChannel::start
pub struct SpiBlockingChannel<SPI> {
    spi: SPI,
    faulted: bool,
}

impl<SPI: SpiBus> SpiBlockingChannel<SPI> {
    /// Wraps an SPI bus as a hardware channel.
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            faulted: false,
        }
    }

    /// The underlying SPI bus.
    pub fn bus(&self) -> &SPI {
        &self.spi
    }

    /// Releases the underlying SPI bus.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus> HardwareChannel for SpiBlockingChannel<SPI> {
    type Word = u8;

    fn start(&mut self, symbols: &[u8]) -> Result<(), ChannelError> {
        self.faulted = false;
        let result = match self.spi.write(symbols) {
            Ok(()) => self.spi.flush(),
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.faulted = true;
            return Err(ChannelError::Fault);
        }
        Ok(())
    }

    fn status(&self) -> ChannelStatus {
        if self.faulted {
            ChannelStatus::Fault
        } else {
            ChannelStatus::Complete
        }
    }

    fn stop(&mut self) {
        // Nothing to halt: the transfer completed inside `start` and an
        // idle SPI bus already holds MOSI low.
    }
}
