//! Integer literal parsing and radix formatting

use crate::big_int::BigInt;
use crate::digits;
use crate::error::{ParseError, ParseResult};
use std::fmt;
use std::str::FromStr;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

const SEPARATOR: char = '_';

impl BigInt {
    /// Parse an integer literal in the given base
    ///
    /// `base` is either in `[2, 36]` or `0`. With `0` the base is inferred
    /// from a `0b`/`0o`/`0x` prefix (case-insensitive) and defaults to 10, in
    /// which case a non-zero literal may not start with `0`. With an explicit
    /// base of 2, 8 or 16 the matching prefix is accepted and skipped.
    ///
    /// The literal may be surrounded by whitespace, start with `+` or `-`,
    /// and use single `_` separators between digits.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for an unsupported base or a malformed literal.
    pub fn parse(text: &str, base: u32) -> ParseResult<Self> {
        if base != 0 && !(MIN_BASE..=MAX_BASE).contains(&base) {
            tracing::debug!(base, "rejected integer base");
            return Err(ParseError::InvalidBase(base));
        }
        let result = parse_literal(text, base);
        if let Err(error) = &result {
            tracing::debug!(text, base, %error, "rejected integer literal");
        }
        result
    }

    /// Render in the given base with lowercase letters and a leading `-` for
    /// negative values, without prefix
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidBase`] if `base` is outside `[2, 36]`.
    pub fn to_str_radix(&self, base: u32) -> ParseResult<String> {
        if !(MIN_BASE..=MAX_BASE).contains(&base) {
            return Err(ParseError::InvalidBase(base));
        }
        let mut result = String::new();
        if self.negative {
            result.push('-');
        }
        result.push_str(&magnitude_string(self, base));
        Ok(result)
    }
}

fn parse_literal(text: &str, base: u32) -> ParseResult<BigInt> {
    let text = text.trim();
    let (negative, body) = if let Some(stripped) = text.strip_prefix('-') {
        (true, stripped)
    } else if let Some(stripped) = text.strip_prefix('+') {
        (false, stripped)
    } else {
        (false, text)
    };

    let prefix_base = match body.as_bytes() {
        [b'0', b'b' | b'B', ..] => Some(2),
        [b'0', b'o' | b'O', ..] => Some(8),
        [b'0', b'x' | b'X', ..] => Some(16),
        _ => None,
    };
    let (base, body, inferred_decimal) = match (base, prefix_base) {
        (0, Some(prefix_base)) => (prefix_base, skip_prefix(body), false),
        (0, None) => (10, body, true),
        (base, Some(prefix_base)) if base == prefix_base => (base, skip_prefix(body), false),
        (base, _) => (base, body, false),
    };

    let values = parse_digits(body, base)?;
    if inferred_decimal && values[0] == 0 && values.iter().any(|&value| value != 0) {
        return Err(ParseError::RedundantLeadingZeros);
    }
    Ok(BigInt::from_parts(negative, digits::from_radix(&values, base)))
}

/// Drop a two-character base prefix and one separator right after it (`0x_ff`)
fn skip_prefix(body: &str) -> &str {
    let rest = &body[2..];
    rest.strip_prefix(SEPARATOR).unwrap_or(rest)
}

/// Validate digits and separators, returning digit values most significant first
fn parse_digits(body: &str, base: u32) -> ParseResult<Vec<u8>> {
    let mut values = Vec::with_capacity(body.len());
    let mut after_separator = false;
    for (i, character) in body.chars().enumerate() {
        if character == SEPARATOR {
            if i == 0 {
                return Err(ParseError::LeadingSeparator);
            }
            if after_separator {
                return Err(ParseError::ConsecutiveSeparators);
            }
            after_separator = true;
            continue;
        }
        let value = character
            .to_digit(MAX_BASE)
            .filter(|&value| value < base)
            .ok_or(ParseError::InvalidDigit {
                digit: character,
                base,
            })?;
        #[allow(clippy::cast_possible_truncation)]
        values.push(value as u8);
        after_separator = false;
    }
    if after_separator {
        return Err(ParseError::TrailingSeparator);
    }
    if values.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(values)
}

fn magnitude_string(value: &BigInt, base: u32) -> String {
    digits::to_radix(&value.magnitude, base)
        .into_iter()
        .map(|digit| char::from_digit(u32::from(digit), base).unwrap_or('?'))
        .collect()
}

impl FromStr for BigInt {
    type Err = ParseError;

    /// Parse a decimal literal, see [`BigInt::parse`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, 10)
    }
}

impl TryFrom<&str> for BigInt {
    type Error = ParseError;

    /// Parse with the base inferred from the literal's prefix
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value, 0)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "", &magnitude_string(self, 10))
    }
}

impl fmt::Binary for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "0b", &magnitude_string(self, 2))
    }
}

impl fmt::Octal for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "0o", &magnitude_string(self, 8))
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "0x", &magnitude_string(self, 16))
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = magnitude_string(self, 16).to_ascii_uppercase();
        f.pad_integral(!self.negative, "0x", &digits)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::BigInt;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    // Decimal text keeps arbitrary magnitudes intact in every format
    impl Serialize for BigInt {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for BigInt {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, base: u32) -> ParseResult<BigInt> {
        BigInt::parse(text, base)
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse("0", 10), Ok(BigInt::zero()));
        assert_eq!(parse("-0", 10), Ok(BigInt::zero()));
        assert_eq!(parse("  +42\n", 10), Ok(BigInt::from(42)));
        assert_eq!(parse("1_000_000", 10), Ok(BigInt::from(1_000_000)));
        assert_eq!(parse("007", 10), Ok(BigInt::from(7)));
        assert_eq!(
            parse("123456789012345678901234567890", 10).map(|v| v.to_string()),
            Ok("123456789012345678901234567890".to_string())
        );
    }

    #[test]
    fn test_parse_inferred_base() {
        assert_eq!(parse("-0x1A", 0), Ok(BigInt::from(-26)));
        assert_eq!(parse("0B101", 0), Ok(BigInt::from(5)));
        assert_eq!(parse("0o17", 0), Ok(BigInt::from(15)));
        assert_eq!(parse("0x_ff", 0), Ok(BigInt::from(255)));
        assert_eq!(parse("00", 0), Ok(BigInt::zero()));
        assert_eq!(parse("0_0", 0), Ok(BigInt::zero()));
        assert_eq!(parse("010", 0), Err(ParseError::RedundantLeadingZeros));
        assert_eq!(parse("0x", 0), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_explicit_prefixed_base() {
        assert_eq!(parse("0x1a", 16), Ok(BigInt::from(26)));
        // "b" is a hexadecimal digit, so no prefix is stripped here
        assert_eq!(parse("0b1", 16), Ok(BigInt::from(0xB1)));
        assert!(parse("0x1a", 10).is_err());
        assert_eq!(parse("zz", 36), Ok(BigInt::from(35 * 36 + 35)));
        assert_eq!(parse("ZZ", 36), Ok(BigInt::from(35 * 36 + 35)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse("", 10), Err(ParseError::Empty));
        assert_eq!(parse("-", 10), Err(ParseError::Empty));
        assert_eq!(parse("_1", 10), Err(ParseError::LeadingSeparator));
        assert_eq!(parse("1_", 10), Err(ParseError::TrailingSeparator));
        assert_eq!(parse("1__0", 10), Err(ParseError::ConsecutiveSeparators));
        assert_eq!(
            parse("12a", 10),
            Err(ParseError::InvalidDigit {
                digit: 'a',
                base: 10
            })
        );
        assert_eq!(parse("1 2", 10).unwrap_err().kind(), crate::ErrorKind::Parse);
        assert_eq!(parse("1", 1), Err(ParseError::InvalidBase(1)));
        assert_eq!(parse("1", 37), Err(ParseError::InvalidBase(37)));
    }

    #[test]
    fn test_display_and_radix_formatting() {
        let value = BigInt::from(-255);
        assert_eq!(value.to_string(), "-255");
        assert_eq!(format!("{value:x}"), "-ff");
        assert_eq!(format!("{value:#X}"), "-0xFF");
        assert_eq!(format!("{value:b}"), "-11111111");
        assert_eq!(format!("{:o}", BigInt::from(8)), "10");
        assert_eq!(format!("{:>6}", BigInt::from(42)), "    42");
        assert_eq!(value.to_str_radix(36), Ok("-73".to_string()));
        assert_eq!(BigInt::zero().to_str_radix(2), Ok("0".to_string()));
        assert!(value.to_str_radix(40).is_err());
    }

    #[test]
    fn test_from_str_and_try_from() {
        assert_eq!("-17".parse::<BigInt>(), Ok(BigInt::from(-17)));
        assert_eq!(BigInt::try_from("0x10"), Ok(BigInt::from(16)));
        assert!("0x10".parse::<BigInt>().is_err());
    }
}
