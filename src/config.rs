//! Driver configuration types and builder

/// Number of digit positions on the panel (two 4-digit modules)
pub const DIGIT_COUNT: usize = 8;

/// Default hold time between driving a line high and low again, in microseconds
pub const DEFAULT_PULSE_DELAY_US: u32 = 150;

/// Driver configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Pulse hold time in microseconds
    ///
    /// Applied to every clock pulse and to the latch pulse. Longer pulses give
    /// a brighter, steadier panel at the cost of throughput; a digit write
    /// takes 17 pulses.
    pub pulse_delay_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Builder::new().build()
    }
}

/// Builder for constructing driver configuration
///
/// # Example
///
/// ```
/// use yl3::{Builder, DEFAULT_PULSE_DELAY_US};
///
/// let config = Builder::new().pulse_delay_us(50).build();
/// assert_eq!(config.pulse_delay_us, 50);
///
/// let config = Builder::new().build();
/// assert_eq!(config.pulse_delay_us, DEFAULT_PULSE_DELAY_US);
/// ```
#[must_use]
#[derive(Clone, Copy, Debug)]
pub struct Builder {
    /// Pulse hold time in microseconds
    pulse_delay_us: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            pulse_delay_us: DEFAULT_PULSE_DELAY_US,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pulse hold time in microseconds
    pub fn pulse_delay_us(mut self, micros: u32) -> Self {
        self.pulse_delay_us = micros;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            pulse_delay_us: self.pulse_delay_us,
        }
    }
}
