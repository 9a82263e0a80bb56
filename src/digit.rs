//! 7-segment character patterns
//!
//! This module defines the segment patterns shifted into the panel's
//! pattern register. Panels are common cathode behind inverting logic, so a
//! segment is lit when its bit is **0**.
//!
//! ## Bit Layout
//!
//! | Bit | 7  | 6 | 5 | 4 | 3 | 2 | 1 | 0 |
//! |-----|----|---|---|---|---|---|---|---|
//! | Segment | DP | G (centre) | F (top left) | E | D (bottom) | C | B (top right) | A (top) |
//!
//! ## Example
//!
//! ```
//! use yl3::digit::{self, Digit};
//!
//! assert_eq!(digit::digits()[0], digit::DIGIT_0);
//! assert_eq!(Digit::Seven.pattern(), 0b1111_1000);
//!
//! // Light the decimal point next to a 3
//! assert_eq!(digit::with_decimal(digit::DIGIT_3), 0b0011_0000);
//! ```

// Numerals

/// Numeral 0 (all outer segments)
pub const DIGIT_0: u8 = 0b1100_0000;
/// Numeral 1 (B, C)
pub const DIGIT_1: u8 = 0b1111_1001;
/// Numeral 2
pub const DIGIT_2: u8 = 0b1010_0100;
/// Numeral 3
pub const DIGIT_3: u8 = 0b1011_0000;
/// Numeral 4
pub const DIGIT_4: u8 = 0b1001_1001;
/// Numeral 5
pub const DIGIT_5: u8 = 0b1001_0010;
/// Numeral 6
pub const DIGIT_6: u8 = 0b1000_0010;
/// Numeral 7 (A, B, C)
pub const DIGIT_7: u8 = 0b1111_1000;
/// Numeral 8 (every segment except the decimal point)
pub const DIGIT_8: u8 = 0b1000_0000;
/// Numeral 9
pub const DIGIT_9: u8 = 0b1001_0000;

// Non-numeric patterns

/// Decimal point only
///
/// AND it into another pattern to add the point, see [`with_decimal`].
pub const DIGIT_DECIMAL: u8 = 0b0111_1111;

/// Blank digit (every segment unlit)
///
/// Reads as `OFF` in hex.
pub const DIGIT_OFF: u8 = 0b1111_1111;

// Single segments

/// Top segment
pub const SEGMENT_A: u8 = !0x01;
/// Top right segment
pub const SEGMENT_B: u8 = !0x02;
/// Bottom right segment
pub const SEGMENT_C: u8 = !0x04;
/// Bottom segment
pub const SEGMENT_D: u8 = !0x08;
/// Bottom left segment
pub const SEGMENT_E: u8 = !0x10;
/// Top left segment
pub const SEGMENT_F: u8 = !0x20;
/// Centre segment
pub const SEGMENT_G: u8 = !0x40;
/// Decimal point
pub const SEGMENT_DP: u8 = !0x80;

/// Canonical pattern table, indexed 0-9 then decimal point then off
pub const DIGITS: [u8; 12] = [
    DIGIT_0,
    DIGIT_1,
    DIGIT_2,
    DIGIT_3,
    DIGIT_4,
    DIGIT_5,
    DIGIT_6,
    DIGIT_7,
    DIGIT_8,
    DIGIT_9,
    DIGIT_DECIMAL,
    DIGIT_OFF,
];

/// Index of the decimal point pattern in [`DIGITS`]
pub const DECIMAL_INDEX: usize = 10;

/// Index of the blank pattern in [`DIGITS`]
pub const OFF_INDEX: usize = 11;

/// Get the 12-entry canonical pattern table
pub fn digits() -> &'static [u8; 12] {
    &DIGITS
}

/// Look up a pattern by table index
///
/// Returns `None` for indices past the end of [`DIGITS`].
pub fn glyph(index: usize) -> Option<u8> {
    DIGITS.get(index).copied()
}

/// Add the decimal point to a pattern
///
/// ```
/// use yl3::digit::{with_decimal, DIGIT_OFF, DIGIT_DECIMAL};
///
/// assert_eq!(with_decimal(DIGIT_OFF), DIGIT_DECIMAL);
/// ```
pub fn with_decimal(pattern: u8) -> u8 {
    pattern & DIGIT_DECIMAL
}

/// Typed view of the canonical patterns
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Digit {
    /// 0
    Zero = 0,
    /// 1
    One,
    /// 2
    Two,
    /// 3
    Three,
    /// 4
    Four,
    /// 5
    Five,
    /// 6
    Six,
    /// 7
    Seven,
    /// 8
    Eight,
    /// 9
    Nine,
    /// Decimal point only
    Decimal,
    /// Blank
    Off,
}

impl Digit {
    /// Convert a numeric value 0-9 into its digit
    ///
    /// Returns `None` for anything above 9.
    pub fn from_value(value: u8) -> Option<Self> {
        let digit = match value {
            0 => Self::Zero,
            1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            5 => Self::Five,
            6 => Self::Six,
            7 => Self::Seven,
            8 => Self::Eight,
            9 => Self::Nine,
            _ => return None,
        };
        Some(digit)
    }

    /// Position of this digit in [`DIGITS`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Segment pattern for this digit
    pub fn pattern(self) -> u8 {
        DIGITS[self.index()]
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.pattern()
    }
}
