//! YL-3 8-Digit 7-Segment Display Driver
//!
//! A driver for 8-digit, 7-segment panels (often sold as "YL-3") built from two
//! 4-digit modules behind a pair of serial-in/parallel-out shift registers.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Bit-banged over any three output pins (DIO, SCK, RCK)
//! - Configurable pulse delay to trade brightness against throughput
//! - Canonical digit patterns plus single-segment helpers
//!
//! ## Protocol
//!
//! Each digit write shifts two bytes, most significant bit first, then pulses
//! the latch:
//!
//! 1. digit select, one-hot (`1 << position`, position 0 is left-most)
//! 2. segment pattern, active-low (bit 0 = lit)
//! 3. latch pulse, the outputs change all at once
//!
//! The panel is write-only; the driver keeps no copy of what is shown.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use yl3::{Builder, Display, Interface, digit};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let data = MockPin;
//! # let clock = MockPin;
//! # let latch = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(data, clock, latch);
//! let config = Builder::new().pulse_delay_us(150).build();
//!
//! let mut display = Display::new(interface, config);
//! if display.initialise().is_err() {
//!     return;
//! }
//!
//! // "0" on the left-most digit
//! let _ = display.write_digit(0, digit::DIGIT_0, &mut delay);
//!
//! // Right-aligned number across the whole panel
//! let _ = display.write_number(2024, &mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;
#[cfg(test)]
extern crate std;

/// Driver configuration types and builder
pub mod config;
/// 7-segment character patterns
pub mod digit;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Shift-register bus abstraction
pub mod interface;

pub use config::{Builder, Config, DEFAULT_PULSE_DELAY_US, DIGIT_COUNT};
pub use digit::{DIGITS, Digit, digits};
pub use display::{Display, MAX_NUMBER};
pub use error::Error;
pub use interface::{Interface, InterfaceError, Line, ShiftRegisterBus};
