//! Shift-register bus abstraction
//!
//! This module provides the [`ShiftRegisterBus`] trait and the [`Interface`]
//! struct that bit-bangs it over three GPIO lines.
//!
//! ## Hardware Requirements
//!
//! The panel's pair of serial-in/parallel-out shift registers needs
//! 3 output pins:
//! - **DIO**: serial data
//! - **SCK**: shift clock, data is sampled on the rising edge
//! - **RCK**: latch, copies the shifted bits to the outputs on the rising edge
//!
//! Bits are shifted most significant first. The first byte shifted ends up
//! in the far register (digit select), the second in the near one (segments).
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use yl3::{Interface, ShiftRegisterBus};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! // Create interface with the data, clock and latch pins
//! let mut interface = Interface::new(MockPin, MockPin, MockPin);
//! let _ = interface.configure();
//!
//! // Select the left-most digit, then light every segment
//! let _ = interface.shift_out(0b0000_0001, 150, &mut delay);
//! let _ = interface.shift_out(0b1000_0000, 150, &mut delay);
//!
//! // Make it visible
//! let _ = interface.commit(150, &mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Lines that can be pulsed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    /// Shift clock (SCK)
    Clock,
    /// Storage latch (RCK)
    Latch,
}

/// Trait for the serial link to the panel's shift registers
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// GPIO implementation, or with a recording fake in tests.
///
/// ## Implementing
///
/// Implementors provide the three line primitives. [`shift_out`](Self::shift_out)
/// and [`commit`](Self::commit) are built on top of them and fix the bit
/// order the shift registers expect; they should not be overridden.
pub trait ShiftRegisterBus {
    /// Error type for bus operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Drive data, clock and latch low
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO write fails.
    fn configure(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Drive the data line to `high`
    ///
    /// # Errors
    ///
    /// Returns an error if the GPIO write fails.
    fn set_data(&mut self, high: bool) -> InterfaceResult<(), Self::Error>;

    /// Drive `line` high, wait `pulse_us` microseconds, drive it low
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO write fails.
    fn pulse<D: DelayNs>(
        &mut self,
        line: Line,
        pulse_us: u32,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error>;

    /// Shift one byte into the registers, most significant bit first
    ///
    /// For each bit the data line is set to the bit level and the clock is
    /// pulsed once.
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO write fails. Bits already clocked in stay
    /// in the registers.
    fn shift_out<D: DelayNs>(
        &mut self,
        value: u8,
        pulse_us: u32,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error> {
        for bit in (0..8).rev() {
            self.set_data(value & (1 << bit) != 0)?;
            self.pulse(Line::Clock, pulse_us, delay)?;
        }
        Ok(())
    }

    /// Pulse the latch so the shifted bits appear on the panel
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO write fails.
    fn commit<D: DelayNs>(
        &mut self,
        pulse_us: u32,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error> {
        self.pulse(Line::Latch, pulse_us, delay)
    }
}

/// Errors that can occur at the interface level
///
/// Generic over the GPIO error type.
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Bit-banged shift-register bus
///
/// Implements [`ShiftRegisterBus`] for any three embedded-hal v1.0 output pins.
///
/// ## Type Parameters
///
/// * `DATA` - Serial data pin (DIO) implementing [`OutputPin`]
/// * `CLK` - Shift clock pin (SCK) implementing [`OutputPin`]
/// * `LATCH` - Latch pin (RCK) implementing [`OutputPin`]
#[derive(Debug)]
pub struct Interface<DATA, CLK, LATCH> {
    /// Serial data
    data: DATA,
    /// Shift clock
    clock: CLK,
    /// Storage latch
    latch: LATCH,
}

impl<DATA, CLK, LATCH> Interface<DATA, CLK, LATCH>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
{
    /// Create a new Interface
    ///
    /// The pins must already be configured as push-pull outputs. No line is
    /// driven until [`ShiftRegisterBus::configure`] is called.
    pub fn new(data: DATA, clock: CLK, latch: LATCH) -> Self {
        Self { data, clock, latch }
    }

    /// Give the pins back
    pub fn release(self) -> (DATA, CLK, LATCH) {
        (self.data, self.clock, self.latch)
    }
}

impl<DATA, CLK, LATCH, PinErr> ShiftRegisterBus for Interface<DATA, CLK, LATCH>
where
    DATA: OutputPin<Error = PinErr>,
    CLK: OutputPin<Error = PinErr>,
    LATCH: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn configure(&mut self) -> InterfaceResult<(), Self::Error> {
        self.data.set_low().map_err(InterfaceError::Pin)?;
        self.clock.set_low().map_err(InterfaceError::Pin)?;
        self.latch.set_low().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    fn set_data(&mut self, high: bool) -> InterfaceResult<(), Self::Error> {
        if high {
            self.data.set_high().map_err(InterfaceError::Pin)
        } else {
            self.data.set_low().map_err(InterfaceError::Pin)
        }
    }

    fn pulse<D: DelayNs>(
        &mut self,
        line: Line,
        pulse_us: u32,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error> {
        match line {
            Line::Clock => {
                self.clock.set_high().map_err(InterfaceError::Pin)?;
                delay.delay_us(pulse_us);
                self.clock.set_low().map_err(InterfaceError::Pin)
            }
            Line::Latch => {
                self.latch.set_high().map_err(InterfaceError::Pin)?;
                delay.delay_us(pulse_us);
                self.latch.set_low().map_err(InterfaceError::Pin)
            }
        }
    }
}
