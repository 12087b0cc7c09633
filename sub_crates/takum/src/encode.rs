//! Real numbers to takums.

use crate::config::Config;
use crate::from_unsigned;
use crate::regime::{bias_unchecked, regime_of};

/// How the fractional part of the logarithm is fitted into the mantissa.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Rounding {
    /// Drop the fraction bits that don't fit.
    Truncate,
    /// Round to the nearest representable logarithm.  A fraction that
    /// rounds up to one carries into the integer part.
    Nearest,
}

impl Default for Rounding {
    fn default() -> Rounding {
        Rounding::Truncate
    }
}

/// Encodes a real number as a takum, truncating the mantissa.
///
/// NaN and +/- infinity encode as NaR, and both zeros encode as zero.
/// Finite magnitudes beyond the range of the width saturate to the
/// largest-magnitude finite takum in the same direction, so a finite
/// non-zero input never produces zero or NaR.
///
/// The returned value is the takum's two's-complement pattern,
/// sign-extended to `i64`.
#[inline]
pub fn encode(value: f64, config: &Config) -> i64 {
    encode_with(value, config, Rounding::Truncate)
}

/// Encodes a real number as a takum with the given mantissa rounding.
pub fn encode_with(value: f64, config: &Config, rounding: Rounding) -> i64 {
    if value.is_nan() || value.is_infinite() {
        return config.nar_pattern;
    }
    if value == 0.0 {
        return 0;
    }

    let sign = if value > 0.0 { 0u64 } else { 1 };

    // Logarithm base sqrt(e).
    let log = 2.0 * value.abs().ln();
    let (magnitude, mantissa) = split_log(log.abs(), config, rounding);

    // A logarithm that rounds to zero is exactly 1.0, which lives on the
    // non-negative side.
    let direction = if log >= 0.0 || (magnitude == 0 && mantissa == 0) {
        1u64
    } else {
        0
    };

    let r = regime_of(magnitude);
    debug_assert!(r <= config.max_regime);
    let m_bits = config.mantissa_bits(r);
    let bias = bias_unchecked(r);
    let characteristic = if direction == 1 {
        // Offset below the bias, kept modulo 2^r.
        ((i64::from(magnitude) - bias) as u64) & ((1u64 << r) - 1)
    } else {
        (bias - 1 - i64::from(magnitude)) as u64
    };

    let bits = config.bits;
    let word = (sign << (bits - 1))
        | (direction << (bits - 2))
        | (u64::from(r) << (bits - 5))
        | (characteristic << m_bits)
        | mantissa;

    from_unsigned(word, config.width)
}

/// Splits a logarithm magnitude into its integer part and the mantissa
/// bits of its fraction.
///
/// The integer part is the floor of the magnitude, except when its regime
/// leaves no room for a mantissa, in which case the fraction is rounded
/// into it instead.
fn split_log(magnitude: f64, config: &Config, rounding: Rounding) -> (u32, u64) {
    if magnitude >= f64::from(config.max_log + 1) {
        log::trace!(
            "log magnitude {} saturates takum{}",
            magnitude,
            config.bits
        );
        return saturated(config);
    }

    let int = magnitude.floor() as u32;
    let m_bits = config.mantissa_bits(regime_of(int));
    let scaled = (magnitude - f64::from(int)) * (1u64 << m_bits) as f64;
    let mantissa = match rounding {
        Rounding::Truncate if m_bits > 0 => scaled.floor(),
        _ => scaled.round(),
    };
    let mantissa = mantissa as u64;

    if mantissa >> m_bits != 0 {
        // Carry into the next integer, which has an all-zero mantissa in
        // whatever regime it lands in.
        if int + 1 > config.max_log {
            return saturated(config);
        }
        return (int + 1, 0);
    }

    (int, mantissa)
}

/// Largest logarithm magnitude of the width, mantissa all ones.
fn saturated(config: &Config) -> (u32, u64) {
    let m_bits = config.mantissa_bits(regime_of(config.max_log));
    (config.max_log, (1u64 << m_bits) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BitWidth;

    fn takum16(value: f64) -> i64 {
        encode(value, &Config::new(BitWidth::W16))
    }

    #[test]
    fn reference_vectors_16() {
        assert_eq!(takum16(1.0), 0x4000);
        assert_eq!(takum16(-1.0), -0x4000);
        assert_eq!(takum16(0.0), 0x0000);
        assert_eq!(takum16(std::f64::consts::E), 0x4C00);
        assert_eq!(takum16(0.5f64.exp()), 0x4800);
        assert_eq!(takum16(std::f64::consts::PI), 0x4D28);
        assert_eq!(takum16(2.0), 0x498B);
        assert_eq!(takum16(0.5), 0x0D8B);
    }

    #[test]
    fn reciprocals_flip_direction() {
        // 1/e and 1/sqrt(e) sit in the same regime as e and sqrt(e), with
        // the characteristic reflected.
        assert_eq!(takum16(1.0 / std::f64::consts::E), 0x0800);
        assert_eq!(takum16(1.0 / 0.5f64.exp()), 0x0C00);
    }

    #[test]
    fn default_rounding_truncates() {
        let config = Config::new(BitWidth::W8);
        assert_eq!(Rounding::default(), Rounding::Truncate);
        assert_eq!(encode_with(2.0, &config, Rounding::default()), encode(2.0, &config));
    }

    #[test]
    fn one_pattern_matches_config() {
        for &width in BitWidth::ALL.iter() {
            let config = Config::new(width);
            assert_eq!(encode(1.0, &config), config.one_pattern);
            assert_eq!(encode_with(1.0, &config, Rounding::Nearest), config.one_pattern);
        }
    }

    #[test]
    fn specials() {
        for &width in BitWidth::ALL.iter() {
            let config = Config::new(width);
            assert_eq!(encode(std::f64::NAN, &config), config.nar_pattern);
            assert_eq!(encode(std::f64::INFINITY, &config), config.nar_pattern);
            assert_eq!(encode(std::f64::NEG_INFINITY, &config), config.nar_pattern);
            assert_eq!(encode(0.0, &config), 0);
            assert_eq!(encode(-0.0, &config), 0);
        }
    }

    #[test]
    fn negation_sets_sign_bit() {
        let config = Config::new(BitWidth::W32);
        for &v in &[0.001, 0.3, 1.0, 2.5, 77.0, 1.0e9] {
            let pos = encode(v, &config);
            let neg = encode(-v, &config);
            assert_eq!(neg, pos | config.nar_pattern);
        }
    }

    #[test]
    fn saturation_16() {
        assert_eq!(takum16(1.0e300), 0x7FFF);
        assert_eq!(takum16(-1.0e300), -1);
        assert_eq!(takum16(1.0e-300), 0x380F);
        assert_eq!(takum16(std::f64::MAX), 0x7FFF);
        assert_eq!(takum16(std::f64::MIN_POSITIVE), 0x380F);
    }

    #[test]
    fn saturation_never_hits_specials() {
        for &width in BitWidth::ALL.iter() {
            let config = Config::new(width);
            for &v in &[1.0e300, -1.0e300, 1.0e-300, -1.0e-300, 5.0e-324] {
                let t = encode(v, &config);
                assert_ne!(t, 0);
                assert_ne!(t, config.nar_pattern);
            }
        }
    }

    #[test]
    fn narrow_width_rounds_integer_part() {
        // At 8 bits regime 3 has no mantissa, so the logarithm is rounded
        // to the nearest integer: 7.6 -> 8.
        let config = Config::new(BitWidth::W8);
        let v = 3.8f64.exp();
        assert_eq!(encode(v, &config), 0x59);
        assert_eq!(encode_with(v, &config, Rounding::Nearest), 0x59);

        // 7.4 -> 7.
        assert_eq!(encode(3.7f64.exp(), &config), 0x58);
    }

    #[test]
    fn narrow_width_never_exceeds_regime_3() {
        let config = Config::new(BitWidth::W8);
        let mut v = 1.0e-10;
        while v < 1.0e10 {
            let word = encode(v, &config) as u64;
            let r = (word >> 3) & 0b111;
            assert!(r <= 3, "value {} gave regime {}", v, r);
            v *= 1.37;
        }
    }

    #[test]
    fn truncate_vs_nearest() {
        let config = Config::new(BitWidth::W8);
        // log magnitude 1.386: mantissa 1.545 of 4 steps.
        assert_eq!(encode_with(2.0, &config, Rounding::Truncate), 0x49);
        assert_eq!(encode_with(2.0, &config, Rounding::Nearest), 0x4A);
    }

    #[test]
    fn nearest_carries_into_integer() {
        let config = Config::new(BitWidth::W16);
        let v = std::f64::consts::E * (1.0 - 1.0e-12);
        assert_eq!(encode_with(v, &config, Rounding::Truncate), 0x4BFF);
        assert_eq!(encode_with(v, &config, Rounding::Nearest), 0x4C00);
    }

    #[test]
    fn top_regime_error_16() {
        // Regime 7 keeps 4 mantissa bits at 16 bits.  A logarithm just under
        // 201 truncates to 200 + 15/16, which is close to the worst case.
        let config = Config::new(BitWidth::W16);
        let x = (200.9999f64 / 2.0).exp();
        let t = encode(x, &config);
        let f = crate::unpack(t, &config);
        assert_eq!(f.regime, 7);
        assert_eq!(f.mantissa_bits, 4);
        assert_eq!(f.mantissa, 0b1111);

        let err = ((crate::decode(t, &config) - x) / x).abs();
        assert!(err > 0.03);
        assert!(err < (1.0f64 / 32.0).exp_m1());
    }

    #[test]
    fn values_rounding_to_one() {
        let config = Config::new(BitWidth::W16);
        // Just below one, with a log too small for the mantissa.
        assert_eq!(encode(1.0 - 1.0e-6, &config), config.one_pattern);
        assert_eq!(encode(-(1.0 - 1.0e-6), &config), config.one_pattern | config.nar_pattern);
    }
}
