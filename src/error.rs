//! Error types for the driver
//!
//! The panel gives no acknowledgement, so nothing here reports a failed
//! transfer. [`Error`] covers GPIO failures from the bus and caller contract
//! violations, which are rejected before any line is driven.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use yl3::{Config, Display, Error, Interface};
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let interface = Interface::new(MockPin, MockPin, MockPin);
//! let mut display = Display::new(interface, Config::default());
//!
//! // Writes before initialisation are rejected
//! let result = display.write_digit(0, 0xFF, &mut delay);
//! assert!(matches!(result, Err(Error::NotInitialised)));
//!
//! // So are positions past the right-most digit
//! let _ = display.initialise();
//! let result = display.write_digit(8, 0xFF, &mut delay);
//! assert!(matches!(result, Err(Error::InvalidPosition { position: 8 })));
//! ```

use crate::config::DIGIT_COUNT;
use crate::interface::ShiftRegisterBus;

/// Errors that can occur when driving the panel
///
/// Generic over the bus type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: ShiftRegisterBus> {
    /// Bus error (GPIO)
    ///
    /// Wraps the underlying hardware error from the [`ShiftRegisterBus`] implementation.
    Interface(I::Error),
    /// Digit position outside 0..=7
    InvalidPosition {
        /// Position requested
        position: u8,
    },
    /// Numeric value with no single-digit pattern (above 9)
    InvalidValue {
        /// Value requested
        value: u8,
    },
    /// Number has more digits than the panel
    NumberTooLarge {
        /// Number requested
        value: u32,
    },
    /// A write was attempted before [`Display::initialise`](crate::display::Display::initialise)
    NotInitialised,
}

impl<I: ShiftRegisterBus> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::InvalidPosition { position } => write!(
                f,
                "Invalid digit position {position} (panel has {DIGIT_COUNT} digits)"
            ),
            Self::InvalidValue { value } => write!(f, "No digit pattern for value {value}"),
            Self::NumberTooLarge { value } => {
                write!(f, "Number {value} does not fit in {DIGIT_COUNT} digits")
            }
            Self::NotInitialised => write!(f, "Display not initialised"),
        }
    }
}

impl<I: ShiftRegisterBus + core::fmt::Debug> core::error::Error for Error<I> {}
