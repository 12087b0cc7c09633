//! Regime selection, characteristic bias, and the field-width arithmetic
//! that hangs off of them.
//!
//! Regime `r` owns the integer logarithm magnitudes in
//! `[2^r - 1, 2^(r+1) - 2]`, i.e. exactly `2^r` values, which is what an
//! `r`-bit characteristic can address.  The top of that range is
//! `bias(r) - 1`.

use lazy_static::lazy_static;

use crate::config::OVERHEAD_BITS;
use crate::Error;

/// Largest regime the 3-bit regime field can express.
pub const MAX_REGIME: u32 = 7;

lazy_static! {
    static ref BIAS: [i64; MAX_REGIME as usize + 1] = {
        let mut table = [0i64; MAX_REGIME as usize + 1];
        for (r, b) in table.iter_mut().enumerate() {
            *b = (1 << (r + 1)) - 1;
        }
        table
    };
}

/// Characteristic bias of regime `r`: `2^(r+1) - 1`.
pub fn bias(r: u32) -> Result<i64, Error> {
    if r > MAX_REGIME {
        return Err(Error::OutOfRangeRegime(r));
    }
    Ok(BIAS[r as usize])
}

/// Table lookup for regimes the codec itself computed.
#[inline(always)]
pub(crate) fn bias_unchecked(r: u32) -> i64 {
    debug_assert!(r <= MAX_REGIME, "regime {} out of range", r);
    BIAS[r as usize]
}

/// Regime of an integer logarithm magnitude: `floor(log2(l_abs + 1))`,
/// clamped to `MAX_REGIME`.
#[inline]
pub fn regime_of(l_abs: u32) -> u32 {
    if l_abs == 0 {
        return 0;
    }
    (63 - (u64::from(l_abs) + 1).leading_zeros()).min(MAX_REGIME)
}

/// Bits of characteristic actually present in a word.
///
/// Equal to `r` for every regime the encoder produces.  Only a hand-built
/// narrow word whose regime field exceeds the remaining space has fewer.
#[inline]
pub fn characteristic_bits(bits: u32, r: u32) -> u32 {
    r.min(bits - OVERHEAD_BITS)
}

/// Bits left over for the mantissa, clamped at zero.
#[inline]
pub fn mantissa_bits(bits: u32, r: u32) -> u32 {
    bits.saturating_sub(OVERHEAD_BITS + r)
}
