//! Core display operations

use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::config::{Config, DIGIT_COUNT};
use crate::digit::{DIGIT_OFF, DIGITS, Digit};
use crate::error::Error;
use crate::interface::ShiftRegisterBus;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Largest number [`Display::write_number`] can show
pub const MAX_NUMBER: u32 = 99_999_999;

/// Core display driver for YL-3 style panels
///
/// Owns the bus and the pulse configuration. Each write is a complete
/// transaction: digit select byte, pattern byte, latch pulse. Nothing about
/// the panel contents is cached.
///
/// Only the most recently latched digit is lit, so callers showing more than
/// one digit keep rewriting them in a loop.
///
/// Writes block for 17 pulse delays each and take `&mut self`, so a driver
/// shared between tasks must sit behind the caller's own mutex.
///
/// Bit order comes from the provided [`ShiftRegisterBus::shift_out`]; a bus
/// that overrides it must keep it most significant bit first.
pub struct Display<I>
where
    I: ShiftRegisterBus,
{
    /// Shift-register bus
    interface: I,
    /// Driver configuration
    config: Config,
    /// Whether the lines have been put in their idle state
    is_initialised: bool,
}

impl<I> Display<I>
where
    I: ShiftRegisterBus,
{
    /// Create a new Display instance
    ///
    /// No line is driven until [`initialise`](Self::initialise) is called.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            is_initialised: false,
        }
    }

    /// Drive data, clock and latch low and accept writes
    ///
    /// Calling this again is permitted and simply re-idles the lines.
    pub fn initialise(&mut self) -> DisplayResult<I> {
        self.interface.configure().map_err(Error::Interface)?;
        self.is_initialised = true;
        debug!(
            "yl3: initialised, pulse delay {}us",
            self.config.pulse_delay_us
        );
        Ok(())
    }

    /// Replace the configuration and initialise again
    pub fn reinitialise(&mut self, config: Config) -> DisplayResult<I> {
        debug!(
            "yl3: pulse delay {}us -> {}us",
            self.config.pulse_delay_us, config.pulse_delay_us
        );
        self.config = config;
        self.initialise()
    }

    /// Write a segment pattern to a single digit
    ///
    /// # Arguments
    ///
    /// * `position` - Digit index from 0 (left-most) to 7 (right-most)
    /// * `pattern` - Segment pattern, bit 0 = lit (see [`crate::digit`])
    /// * `delay` - Delay implementation for pulse timing
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialised`] before [`initialise`](Self::initialise),
    /// [`Error::InvalidPosition`] for positions above 7. Both are checked before
    /// any line is driven.
    pub fn write_digit<D: DelayNs>(
        &mut self,
        position: u8,
        pattern: u8,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.check_ready(position)?;
        trace!("yl3: digit {} <- {:#010b}", position, pattern);

        let pulse_us = self.config.pulse_delay_us;
        // Select register first, it is pushed through to the far end by the pattern
        self.interface
            .shift_out(1 << position, pulse_us, delay)
            .map_err(Error::Interface)?;
        self.interface
            .shift_out(pattern, pulse_us, delay)
            .map_err(Error::Interface)?;
        self.interface
            .commit(pulse_us, delay)
            .map_err(Error::Interface)
    }

    /// Write one of the canonical patterns to a single digit
    pub fn write_glyph<D: DelayNs>(
        &mut self,
        position: u8,
        digit: Digit,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.write_digit(position, digit.pattern(), delay)
    }

    /// Write a numeral 0-9 to a single digit
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] for values above 9.
    pub fn write_value<D: DelayNs>(
        &mut self,
        position: u8,
        value: u8,
        delay: &mut D,
    ) -> DisplayResult<I> {
        let digit = Digit::from_value(value).ok_or_else(|| {
            warn!("yl3: no pattern for value {}", value);
            Error::InvalidValue { value }
        })?;
        self.write_glyph(position, digit, delay)
    }

    /// Write all eight digits, left to right
    pub fn write_digits<D: DelayNs>(
        &mut self,
        patterns: &[u8; DIGIT_COUNT],
        delay: &mut D,
    ) -> DisplayResult<I> {
        for (position, pattern) in (0u8..).zip(patterns.iter()) {
            self.write_digit(position, *pattern, delay)?;
        }
        Ok(())
    }

    /// Blank every digit
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_digits(&[DIGIT_OFF; DIGIT_COUNT], delay)
    }

    /// Show a number right-aligned, with leading digits blank
    ///
    /// # Errors
    ///
    /// Returns [`Error::NumberTooLarge`] above [`MAX_NUMBER`].
    pub fn write_number<D: DelayNs>(&mut self, value: u32, delay: &mut D) -> DisplayResult<I> {
        if value > MAX_NUMBER {
            warn!("yl3: {} does not fit on the panel", value);
            return Err(Error::NumberTooLarge { value });
        }

        let mut patterns = [DIGIT_OFF; DIGIT_COUNT];
        let mut remaining = value;
        for slot in patterns.iter_mut().rev() {
            *slot = DIGITS[(remaining % 10) as usize];
            remaining /= 10;
            if remaining == 0 {
                break;
            }
        }
        self.write_digits(&patterns, delay)
    }

    /// Get the canonical pattern table
    pub fn digits(&self) -> &'static [u8; 12] {
        crate::digit::digits()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether [`initialise`](Self::initialise) has been called
    pub fn is_initialised(&self) -> bool {
        self.is_initialised
    }

    /// Give the bus back
    pub fn release(self) -> I {
        self.interface
    }

    fn check_ready(&self, position: u8) -> DisplayResult<I> {
        if !self.is_initialised {
            warn!("yl3: write before initialise");
            return Err(Error::NotInitialised);
        }
        if position as usize >= DIGIT_COUNT {
            warn!("yl3: digit position {} out of range", position);
            return Err(Error::InvalidPosition { position });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::digit::{DIGIT_0, DIGIT_7};
    use crate::interface::Line;
    use alloc::vec::Vec;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Event {
        Configure,
        Data(bool),
        Pulse(Line, u32),
    }

    #[derive(Debug)]
    struct MockInterface {
        events: Vec<Event>,
    }

    impl MockInterface {
        fn new() -> Self {
            Self { events: Vec::new() }
        }

        fn pulses(&self) -> Vec<(Line, u32)> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    Event::Pulse(line, us) => Some((*line, *us)),
                    _ => None,
                })
                .collect()
        }

        /// Rebuild the bytes clocked in since the last latch, one per 8 clocks
        fn transfers(&self) -> Vec<Vec<u8>> {
            let mut transfers = Vec::new();
            let mut bytes = Vec::new();
            let mut level = false;
            let mut current = 0u8;
            let mut bits = 0;
            for event in &self.events {
                match event {
                    Event::Configure => {}
                    Event::Data(high) => level = *high,
                    Event::Pulse(Line::Clock, _) => {
                        current = (current << 1) | u8::from(level);
                        bits += 1;
                        if bits == 8 {
                            bytes.push(current);
                            current = 0;
                            bits = 0;
                        }
                    }
                    Event::Pulse(Line::Latch, _) => {
                        transfers.push(core::mem::take(&mut bytes));
                    }
                }
            }
            transfers
        }
    }

    impl ShiftRegisterBus for MockInterface {
        type Error = core::convert::Infallible;

        fn configure(&mut self) -> Result<(), Self::Error> {
            self.events.push(Event::Configure);
            Ok(())
        }

        fn set_data(&mut self, high: bool) -> Result<(), Self::Error> {
            self.events.push(Event::Data(high));
            Ok(())
        }

        fn pulse<D: DelayNs>(
            &mut self,
            line: Line,
            pulse_us: u32,
            _delay: &mut D,
        ) -> Result<(), Self::Error> {
            self.events.push(Event::Pulse(line, pulse_us));
            Ok(())
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn test_display() -> Display<MockInterface> {
        let mut display = Display::new(MockInterface::new(), Config::default());
        display.initialise().unwrap();
        display
    }

    #[test]
    fn test_new_does_not_touch_lines() {
        let display = Display::new(MockInterface::new(), Config::default());
        assert!(!display.is_initialised());
        assert!(display.release().events.is_empty());
    }

    #[test]
    fn test_initialise_configures_bus() {
        let display = test_display();
        assert!(display.is_initialised());
        assert_eq!(display.release().events, [Event::Configure]);
    }

    #[test]
    fn test_write_before_initialise_returns_error() {
        let mut display = Display::new(MockInterface::new(), Config::default());
        let result = display.write_digit(0, DIGIT_0, &mut MockDelay);
        assert!(matches!(result, Err(Error::NotInitialised)));
        assert!(display.release().events.is_empty());
    }

    #[test]
    fn test_position_out_of_range_returns_error() {
        let mut display = test_display();
        for position in [8u8, 9, 31, 255] {
            let result = display.write_digit(position, DIGIT_0, &mut MockDelay);
            assert!(matches!(result, Err(Error::InvalidPosition { position: p }) if p == position));
        }
        assert_eq!(display.release().events, [Event::Configure]);
    }

    #[test]
    fn test_write_digit_emits_17_pulses_with_one_hot_address() {
        for position in 0..8u8 {
            let mut display = test_display();
            display.write_digit(position, DIGIT_7, &mut MockDelay).unwrap();
            let interface = display.release();

            let pulses = interface.pulses();
            assert_eq!(pulses.len(), 17);
            assert!(pulses[..16].iter().all(|(line, _)| *line == Line::Clock));
            assert_eq!(pulses[16].0, Line::Latch);

            let transfers = interface.transfers();
            assert_eq!(transfers.len(), 1);
            assert_eq!(transfers[0], [1u8 << position, DIGIT_7]);
            assert_eq!(transfers[0][0].count_ones(), 1);
        }
    }

    #[test]
    fn test_first_digit_zero_sequence() {
        let mut display = test_display();
        display.write_digit(0, 0b1100_0000, &mut MockDelay).unwrap();
        let interface = display.release();

        let mut expected = alloc::vec![Event::Configure];
        for byte in [0b0000_0001u8, 0b1100_0000] {
            for bit in (0..8).rev() {
                expected.push(Event::Data(byte & (1 << bit) != 0));
                expected.push(Event::Pulse(Line::Clock, 150));
            }
        }
        expected.push(Event::Pulse(Line::Latch, 150));
        assert_eq!(interface.events, expected);
    }

    #[test]
    fn test_repeated_write_is_identical() {
        let mut display = test_display();
        display.write_digit(3, DIGIT_7, &mut MockDelay).unwrap();
        display.write_digit(3, DIGIT_7, &mut MockDelay).unwrap();
        let events = display.release().events;

        let (first, second) = events[1..].split_at((events.len() - 1) / 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pulse_delay_applies_to_every_pulse() {
        let config = Builder::new().pulse_delay_us(50).build();
        let mut display = Display::new(MockInterface::new(), config);
        display.initialise().unwrap();
        display.write_digit(5, DIGIT_0, &mut MockDelay).unwrap();

        let pulses = display.release().pulses();
        assert_eq!(pulses.len(), 17);
        assert!(pulses.iter().all(|(_, us)| *us == 50));
    }

    #[test]
    fn test_reinitialise_changes_pulse_delay() {
        let mut display = test_display();
        display.reinitialise(Builder::new().pulse_delay_us(20).build()).unwrap();
        assert_eq!(display.config().pulse_delay_us, 20);
        display.write_digit(1, DIGIT_0, &mut MockDelay).unwrap();

        let interface = display.release();
        assert_eq!(interface.events[..2], [Event::Configure, Event::Configure]);
        assert!(interface.pulses().iter().all(|(_, us)| *us == 20));
    }

    #[test]
    fn test_write_value() {
        let mut display = test_display();
        display.write_value(2, 9, &mut MockDelay).unwrap();
        let result = display.write_value(2, 10, &mut MockDelay);
        assert!(matches!(result, Err(Error::InvalidValue { value: 10 })));

        let transfers = display.release().transfers();
        assert_eq!(transfers, [[0b0000_0100, DIGITS[9]]]);
    }

    #[test]
    fn test_clear_blanks_every_position() {
        let mut display = test_display();
        display.clear(&mut MockDelay).unwrap();

        let transfers = display.release().transfers();
        assert_eq!(transfers.len(), DIGIT_COUNT);
        for (position, transfer) in transfers.iter().enumerate() {
            assert_eq!(*transfer, [1u8 << position, DIGIT_OFF]);
        }
    }

    #[test]
    fn test_write_number_right_aligned() {
        let mut display = test_display();
        display.write_number(407, &mut MockDelay).unwrap();

        let patterns: Vec<u8> = display
            .release()
            .transfers()
            .iter()
            .map(|transfer| transfer[1])
            .collect();
        assert_eq!(
            patterns,
            [
                DIGIT_OFF, DIGIT_OFF, DIGIT_OFF, DIGIT_OFF, DIGIT_OFF, DIGITS[4], DIGITS[0],
                DIGITS[7],
            ]
        );
    }

    #[test]
    fn test_write_number_zero_and_limits() {
        let mut display = test_display();
        display.write_number(0, &mut MockDelay).unwrap();
        display.write_number(MAX_NUMBER, &mut MockDelay).unwrap();
        let result = display.write_number(MAX_NUMBER + 1, &mut MockDelay);
        assert!(matches!(result, Err(Error::NumberTooLarge { .. })));

        let transfers = display.release().transfers();
        assert_eq!(transfers.len(), 2 * DIGIT_COUNT);
        assert_eq!(transfers[7][1], DIGIT_0);
        assert!(transfers[..7].iter().all(|transfer| transfer[1] == DIGIT_OFF));
        assert!(transfers[8..].iter().all(|transfer| transfer[1] == DIGITS[9]));
    }

    #[test]
    fn test_digits_table() {
        let display = test_display();
        assert_eq!(display.digits()[10], 0b0111_1111);
        assert_eq!(display.digits()[11], 0b1111_1111);
    }

    mod over_pins {
        use super::super::*;
        use crate::digit::DIGIT_0;
        use crate::interface::{Interface, InterfaceError};
        use embedded_hal_mock::eh1::MockError;
        use embedded_hal_mock::eh1::delay::NoopDelay;
        use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

        fn byte_levels(value: u8) -> impl Iterator<Item = Transaction> {
            (0..8).rev().map(move |bit| {
                let state = if value & (1 << bit) != 0 {
                    State::High
                } else {
                    State::Low
                };
                Transaction::set(state)
            })
        }

        fn pin_display(
            data: &[Transaction],
            clock: &[Transaction],
            latch: &[Transaction],
        ) -> (Display<Interface<PinMock, PinMock, PinMock>>, [PinMock; 3]) {
            let pins = [PinMock::new(data), PinMock::new(clock), PinMock::new(latch)];
            let interface = Interface::new(pins[0].clone(), pins[1].clone(), pins[2].clone());
            (Display::new(interface, Config::default()), pins)
        }

        #[test]
        fn test_first_digit_zero_on_pins() {
            let mut data = alloc::vec![Transaction::set(State::Low)];
            data.extend(byte_levels(0b0000_0001));
            data.extend(byte_levels(DIGIT_0));
            let mut clock = alloc::vec![Transaction::set(State::Low)];
            for _ in 0..16 {
                clock.push(Transaction::set(State::High));
                clock.push(Transaction::set(State::Low));
            }
            let latch = [
                Transaction::set(State::Low),
                Transaction::set(State::High),
                Transaction::set(State::Low),
            ];

            let (mut display, mut pins) = pin_display(&data, &clock, &latch);
            display.initialise().unwrap();
            display.write_digit(0, DIGIT_0, &mut NoopDelay::new()).unwrap();

            for pin in &mut pins {
                pin.done();
            }
        }

        #[test]
        fn test_clock_failure_stops_before_latch() {
            // Idle, then the first address bit
            let data = [Transaction::set(State::Low), Transaction::set(State::Low)];
            let clock = [
                Transaction::set(State::Low),
                Transaction::set(State::High)
                    .with_error(MockError::Io(std::io::ErrorKind::NotConnected)),
            ];
            // Idle only, the latch never fires
            let latch = [Transaction::set(State::Low)];

            let (mut display, mut pins) = pin_display(&data, &clock, &latch);
            display.initialise().unwrap();
            let result = display.write_digit(3, DIGIT_0, &mut NoopDelay::new());
            assert!(matches!(
                result,
                Err(Error::Interface(InterfaceError::Pin(MockError::Io(_))))
            ));

            for pin in &mut pins {
                pin.done();
            }
        }

        #[test]
        fn test_error_over_pins_is_error_trait() {
            fn is_error<E: core::error::Error>() {}
            is_error::<Error<Interface<PinMock, PinMock, PinMock>>>();

            let (mut display, mut pins) = pin_display(&[], &[], &[]);
            let result = display.write_digit(0, DIGIT_0, &mut NoopDelay::new());
            let err = result.unwrap_err();
            assert_eq!(alloc::format!("{err}"), "Display not initialised");
            assert!(!alloc::format!("{err:?}").is_empty());

            for pin in &mut pins {
                pin.done();
            }
        }
    }
}
