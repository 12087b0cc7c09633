//! Self-checks of the codec, run from the command line.

use std::f64::consts::{E, LN_2, PI, SQRT_2};

use takum::{decode, encode, BitWidth, Config};

use crate::hex;

/// sqrt(e), the base of the takum logarithm.
const SQRT_E: f64 = 1.6487212707001282;

/// Values checked by the round-trip suite.
const ROUND_TRIP_VALUES: [f64; 12] = [
    0.0, 1.0, -1.0, SQRT_E, E, PI, 0.5, 2.0, 0.1, 10.0, 100.0, 0.01,
];

/// Values whose reciprocals are checked by the symmetry suite.
const SYMMETRY_VALUES: [f64; 6] = [2.0, 4.0, 10.0, SQRT_E, E, PI];

/// Well-known constants and their 16-bit takums.
const KNOWN_CONSTANTS: [(&str, f64, i64); 4] = [
    ("pi", PI, 0x4D28),
    ("e", E, 0x4C00),
    ("sqrt2", SQRT_2, 0x458B),
    ("ln2", LN_2, 0x05DD),
];

/// Largest relative round-trip error accepted at a width.
///
/// This is `2^-(bits - 8)`, except at 64 bits where the mantissa is finer
/// than an `f64` logarithm can resolve.
fn tolerance(config: &Config) -> f64 {
    (2.0f64).powi(-(config.bits as i32 - 8)).max(1.0e-13)
}

fn mark(passed: bool) -> char {
    if passed {
        '✓'
    } else {
        '✗'
    }
}

/// Encodes and decodes a spread of values, checking each comes back within
/// tolerance.  Zero must come back exactly.
pub fn round_trip(config: &Config, verbose: bool) -> bool {
    let tolerance = tolerance(config);
    let mut all_passed = true;
    let mut max_error = 0.0f64;

    for &value in ROUND_TRIP_VALUES.iter() {
        let encoded = encode(value, config);
        let decoded = decode(encoded, config);
        let passed = if value == 0.0 {
            decoded == 0.0
        } else {
            let error = ((decoded - value) / value).abs();
            max_error = max_error.max(error);
            error < tolerance
        };

        if verbose {
            println!(
                "  {} {:>12.6} -> {} -> {:>12.6}",
                mark(passed),
                value,
                hex::format(encoded, config.width),
                decoded
            );
        }
        all_passed &= passed;
    }

    if verbose {
        println!("  Max relative error: {:.2e}", max_error);
    }

    all_passed
}

/// Checks NaR, zero, one, and non-finite inputs.
pub fn special_values(config: &Config, verbose: bool) -> bool {
    let mut all_passed = true;

    let nar = decode(config.nar_pattern, config);
    let passed = nar.is_nan();
    if verbose {
        println!(
            "  {} NaR ({}) -> {}",
            mark(passed),
            hex::format(config.nar_pattern, config.width),
            nar
        );
    }
    all_passed &= passed;

    let zero = encode(0.0, config);
    let passed = zero == 0;
    if verbose {
        println!("  {} Zero: 0.0 -> {}", mark(passed), hex::format(zero, config.width));
    }
    all_passed &= passed;

    let one = encode(1.0, config);
    let one_decoded = decode(one, config);
    let passed = one == config.one_pattern && (one_decoded - 1.0).abs() < 0.01;
    if verbose {
        println!(
            "  {} One: 1.0 -> {} -> {:?}",
            mark(passed),
            hex::format(one, config.width),
            one_decoded
        );
    }
    all_passed &= passed;

    for &(name, value) in &[
        ("NaN", std::f64::NAN),
        ("+Inf", std::f64::INFINITY),
        ("-Inf", std::f64::NEG_INFINITY),
    ] {
        let encoded = encode(value, config);
        let passed = encoded == config.nar_pattern;
        if verbose {
            println!(
                "  {} {} input -> {} (NaR)",
                mark(passed),
                name,
                hex::format(encoded, config.width)
            );
        }
        all_passed &= passed;
    }

    all_passed
}

/// Checks that `x` and `1/x` decode to values whose product is near one.
pub fn symmetry(config: &Config, verbose: bool) -> bool {
    let mut all_passed = true;

    for &x in SYMMETRY_VALUES.iter() {
        let inv = 1.0 / x;
        let product = decode(encode(x, config), config) * decode(encode(inv, config), config);
        let passed = (product - 1.0).abs() < 0.1;
        if verbose {
            println!(
                "  {} {:.4} × {:.4} = {:.6} (expected ~1.0)",
                mark(passed),
                x,
                inv,
                product
            );
        }
        all_passed &= passed;
    }

    all_passed
}

/// Runs every suite at every width.
pub fn run_all(verbose: bool) -> bool {
    let mut all_passed = true;

    for &width in BitWidth::ALL.iter() {
        let config = Config::new(width);
        log::debug!("validating takum{}", config.bits);

        if verbose {
            println!("\n{}", "=".repeat(60));
            println!("Testing TAKUM{}", config.bits);
            println!("{}", "=".repeat(60));
            println!("\nRoundtrip encoding tests:");
        }
        all_passed &= round_trip(&config, verbose);

        if verbose {
            println!("\nSpecial value tests:");
        }
        all_passed &= special_values(&config, verbose);

        if verbose {
            println!("\nSymmetry tests (x × 1/x ≈ 1):");
        }
        all_passed &= symmetry(&config, verbose);
    }

    all_passed
}

/// Prints the known constants as 16-bit takums.  Returns whether every
/// constant encoded to its listed pattern.
pub fn constants() -> bool {
    let config = Config::new(BitWidth::W16);
    let mut all_passed = true;

    println!("Known Mathematical Constants:");
    println!("{}", "-".repeat(40));
    for &(name, value, expected) in KNOWN_CONSTANTS.iter() {
        let encoded = encode(value, &config);
        let decoded = decode(encoded, &config);
        let error = ((decoded - value) / value).abs() * 100.0;
        let passed = encoded == expected;

        println!("  {:8}: {:.10}", name, value);
        println!(
            "           -> {} {}",
            hex::format(encoded, config.width),
            mark(passed)
        );
        println!("           -> {:.10} ({:.4}% error)", decoded, error);
        all_passed &= passed;
    }

    all_passed
}
