//! Per-width layout configuration.

use crate::{regime, Error};

/// Number of bits spent on sign, direction, and regime in every takum.
pub const OVERHEAD_BITS: u32 = 1 + 1 + 3;

/// The supported takum word sizes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BitWidth {
    W8,
    W16,
    W32,
    W64,
}

impl BitWidth {
    /// All supported widths, narrowest first.
    pub const ALL: [BitWidth; 4] = [BitWidth::W8, BitWidth::W16, BitWidth::W32, BitWidth::W64];

    /// Looks up the width for a bit count.
    pub fn from_bits(bits: u32) -> Result<BitWidth, Error> {
        match bits {
            8 => Ok(BitWidth::W8),
            16 => Ok(BitWidth::W16),
            32 => Ok(BitWidth::W32),
            64 => Ok(BitWidth::W64),
            _ => {
                log::debug!("rejected takum width of {} bits", bits);
                Err(Error::InvalidWidth(bits))
            }
        }
    }

    #[inline]
    pub fn bits(self) -> u32 {
        match self {
            BitWidth::W8 => 8,
            BitWidth::W16 => 16,
            BitWidth::W32 => 32,
            BitWidth::W64 => 64,
        }
    }

    /// Mask covering the low `bits()` bits of a `u64`.
    #[inline]
    pub fn word_mask(self) -> u64 {
        u64::MAX >> (64 - self.bits())
    }
}

/// The fixed field sizes and special patterns of one takum width.
///
/// Cheap to copy and never mutated once built, so a single instance can be
/// shared freely between threads.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Config {
    pub width: BitWidth,
    pub bits: u32,
    pub overhead_bits: u32,
    /// Mantissa width at regime 0, the widest it gets.
    pub max_mantissa_bits: u32,
    /// Largest regime whose characteristic still fits in the word.
    pub max_regime: u32,
    /// Largest integer magnitude of the logarithm the width can hold.
    pub max_log: u32,
    /// Not-a-Real: the most negative signed value of the width.
    pub nar_pattern: i64,
    /// The encoding of exactly 1.0.
    pub one_pattern: i64,
}

impl Config {
    pub fn new(width: BitWidth) -> Config {
        let bits = width.bits();
        let max_mantissa_bits = bits - OVERHEAD_BITS;
        let max_regime = max_mantissa_bits.min(regime::MAX_REGIME);

        Config {
            width,
            bits,
            overhead_bits: OVERHEAD_BITS,
            max_mantissa_bits,
            max_regime,
            max_log: (regime::bias_unchecked(max_regime) - 1) as u32,
            nar_pattern: i64::MIN >> (64 - bits),
            one_pattern: 1 << (bits - 2),
        }
    }

    /// Mantissa width for a regime, never negative.
    #[inline]
    pub fn mantissa_bits(&self, r: u32) -> u32 {
        regime::mantissa_bits(self.bits, r)
    }
}

/// Resolves the configuration for a raw bit count.
pub fn resolve(bits: u32) -> Result<Config, Error> {
    BitWidth::from_bits(bits).map(Config::new)
}
