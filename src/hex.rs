//! Hex literals for takum words.

use takum::{from_unsigned, to_unsigned, BitWidth};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HexError {
    Empty,
    InvalidDigit(char),
    /// More significant digits than fit in the width.
    TooWide(u32),
}

impl std::error::Error for HexError {}

impl std::fmt::Display for HexError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match *self {
            HexError::Empty => write!(f, "no hex digits"),
            HexError::InvalidDigit(c) => write!(f, "'{}' is not a hex digit", c),
            HexError::TooWide(bits) => write!(f, "value does not fit in {} bits", bits),
        }
    }
}

/// Formats a takum as its unsigned pattern, zero-padded to the width.
pub fn format(encoded: i64, width: BitWidth) -> String {
    format!(
        "0x{:0digits$X}",
        to_unsigned(encoded, width),
        digits = (width.bits() / 4) as usize
    )
}

/// Parses a hex literal as a takum of the given width.
///
/// Accepts an optional leading `-` and `0x` prefix, and `_` separators.
/// Unsigned patterns with the top bit set are reinterpreted as negative, so
/// `0xC000` and `-0x4000` are the same 16-bit takum.
pub fn parse(text: &str, width: BitWidth) -> Result<i64, HexError> {
    let text = text.trim();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    let mut word = 0u64;
    let mut seen_digit = false;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(16).ok_or(HexError::InvalidDigit(c))?;
        if word >> (width.bits() - 4) != 0 {
            return Err(HexError::TooWide(width.bits()));
        }
        word = (word << 4) | u64::from(d);
        seen_digit = true;
    }

    if !seen_digit {
        return Err(HexError::Empty);
    }

    if negative {
        word = word.wrapping_neg();
    }
    Ok(from_unsigned(word, width))
}
