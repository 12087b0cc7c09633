//! Encoding/decoding between `f64` and logarithmic takums.
//!
//! A takum stores the base-sqrt(e) logarithm of a number's magnitude in a
//! tapered layout.  High bit to low bit:
//!
//! ```text
//! sign(1) | direction(1) | regime(3) | characteristic(r) | mantissa(bits - 5 - r)
//! ```
//!
//! The direction bit is set for magnitudes >= 1.  The regime `r` selects
//! which exponentially-sized range the integer part of the logarithm falls
//! in, and is also the width of the characteristic, which locates the
//! integer part within that range.  Whatever is left is mantissa: the
//! fractional part of the logarithm.  Small logarithms thus get more
//! mantissa bits than large ones.
//!
//! Widths of 8, 16, 32, and 64 bits are supported.  Takums are handled as
//! their two's-complement bit patterns sign-extended to `i64`, with two
//! special patterns: all zeros is zero, and the most negative value of the
//! width is NaR (Not a Real).
//!
//! Only conversion is provided, no arithmetic.

mod config;
mod decode;
mod encode;
mod regime;

pub use crate::config::{resolve, BitWidth, Config, OVERHEAD_BITS};
pub use crate::decode::{decode, unpack, Fields};
pub use crate::encode::{encode, encode_with, Rounding};
pub use crate::regime::{bias, characteristic_bits, mantissa_bits, regime_of, MAX_REGIME};

//----------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    /// A bit width other than 8, 16, 32, or 64.
    InvalidWidth(u32),
    /// A regime outside `[0, 7]`.
    OutOfRangeRegime(u32),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match *self {
            Error::InvalidWidth(bits) => write!(
                f,
                "unsupported takum width of {} bits (expected 8, 16, 32, or 64)",
                bits
            ),
            Error::OutOfRangeRegime(r) => write!(f, "regime {} is outside [0, 7]", r),
        }
    }
}

//----------------------------------------------------------------------------

/// The three kinds of takum.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Class {
    Zero,
    NaR,
    Finite,
}

/// Classifies a takum, looking only at the low `config.bits` bits.
#[inline]
pub fn classify(encoded: i64, config: &Config) -> Class {
    let word = to_unsigned(encoded, config.width);
    if word == 0 {
        Class::Zero
    } else if word == to_unsigned(config.nar_pattern, config.width) {
        Class::NaR
    } else {
        Class::Finite
    }
}

/// The raw `width`-bit pattern of a takum, zero-extended.
#[inline]
pub fn to_unsigned(encoded: i64, width: BitWidth) -> u64 {
    encoded as u64 & width.word_mask()
}

/// Reinterprets the low `width` bits of `word` as a signed takum.
#[inline]
pub fn from_unsigned(word: u64, width: BitWidth) -> i64 {
    let shift = 64 - width.bits();
    ((word << shift) as i64) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes() {
        let c = Config::new(BitWidth::W16);
        assert_eq!(classify(0, &c), Class::Zero);
        assert_eq!(classify(-0x8000, &c), Class::NaR);
        assert_eq!(classify(0x8000, &c), Class::NaR);
        assert_eq!(classify(0x4000, &c), Class::Finite);
        assert_eq!(classify(-1, &c), Class::Finite);
        // High bits beyond the width are ignored.
        assert_eq!(classify(0x1_0000, &c), Class::Zero);
    }

    #[test]
    fn classes_64() {
        let c = Config::new(BitWidth::W64);
        assert_eq!(classify(i64::MIN, &c), Class::NaR);
        assert_eq!(classify(i64::MAX, &c), Class::Finite);
    }

    #[test]
    fn unsigned_conversions() {
        assert_eq!(to_unsigned(-0x2000, BitWidth::W16), 0xE000);
        assert_eq!(to_unsigned(-1, BitWidth::W8), 0xFF);
        assert_eq!(to_unsigned(-1, BitWidth::W64), u64::MAX);
        assert_eq!(from_unsigned(0xE000, BitWidth::W16), -0x2000);
        assert_eq!(from_unsigned(0x7F, BitWidth::W8), 0x7F);
        assert_eq!(from_unsigned(0x80, BitWidth::W8), -128);
        assert_eq!(from_unsigned(0x1_0000_0001, BitWidth::W32), 1);
        assert_eq!(from_unsigned(u64::MAX, BitWidth::W64), -1);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            Error::InvalidWidth(12).to_string(),
            "unsupported takum width of 12 bits (expected 8, 16, 32, or 64)"
        );
        assert_eq!(
            Error::OutOfRangeRegime(9).to_string(),
            "regime 9 is outside [0, 7]"
        );
    }
}
