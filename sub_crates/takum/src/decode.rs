//! Takums to real numbers.

use crate::config::Config;
use crate::regime::{bias_unchecked, characteristic_bits, mantissa_bits};
use crate::{classify, to_unsigned, Class};

/// The fields of a takum word, high bit to low bit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Fields {
    pub sign: bool,
    /// Set for logarithms >= 0, i.e. magnitudes >= 1.
    pub direction: bool,
    pub regime: u32,
    pub characteristic: u64,
    pub characteristic_bits: u32,
    pub mantissa: u64,
    pub mantissa_bits: u32,
}

impl Fields {
    /// The base-sqrt(e) logarithm of the magnitude these fields describe.
    pub fn log(&self) -> f64 {
        let bias = bias_unchecked(self.regime);
        let c = self.characteristic as i64;
        let int = if self.direction {
            bias + c - (1 << self.regime)
        } else {
            bias - 1 - c
        };

        let frac = if self.mantissa_bits > 0 {
            self.mantissa as f64 / (1u64 << self.mantissa_bits) as f64
        } else {
            0.0
        };

        let magnitude = int as f64 + frac;
        if self.direction {
            magnitude
        } else {
            -magnitude
        }
    }
}

/// Slices a takum into its fields.
///
/// The regime is read first, and the widths of the characteristic and
/// mantissa follow from it.  Only the low `config.bits` bits of `encoded`
/// are looked at.  Zero and NaR are sliced like any other word.
pub fn unpack(encoded: i64, config: &Config) -> Fields {
    let bits = config.bits;
    let word = to_unsigned(encoded, config.width);

    let r = ((word >> (bits - 5)) & 0b111) as u32;
    let c_bits = characteristic_bits(bits, r);
    let m_bits = mantissa_bits(bits, r);

    Fields {
        sign: (word >> (bits - 1)) & 1 == 1,
        direction: (word >> (bits - 2)) & 1 == 1,
        regime: r,
        characteristic: (word >> m_bits) & ((1u64 << c_bits) - 1),
        characteristic_bits: c_bits,
        mantissa: word & ((1u64 << m_bits) - 1),
        mantissa_bits: m_bits,
    }
}

/// Decodes a takum into a real number.
///
/// NaR decodes to NaN and the zero pattern to `0.0`.  Every other pattern
/// decodes to a finite, non-zero value.
///
/// This operation cannot fail.  Only the low `config.bits` bits of
/// `encoded` are used, so both the sign-extended and the zero-extended
/// form of a word decode the same.
pub fn decode(encoded: i64, config: &Config) -> f64 {
    match classify(encoded, config) {
        Class::NaR => std::f64::NAN,
        Class::Zero => 0.0,
        Class::Finite => {
            let fields = unpack(encoded, config);
            let magnitude = (fields.log() * 0.5).exp();
            if fields.sign {
                -magnitude
            } else {
                magnitude
            }
        }
    }
}
