//! # bigrat
//!
//! Exact, unbounded-magnitude numbers: a signed arbitrary-precision integer
//! ([`BigInt`]) and a normalized rational built on it ([`Rational`]).
//!
//! - **Canonical values**: one representation per number (no negative zero,
//!   fractions always in lowest terms with a positive denominator)
//! - **Floor division**: `/`, `%` and `checked_div_rem` round the quotient
//!   toward negative infinity, and the remainder follows the divisor's sign
//! - **Two's-complement bitwise operations** on values of any size
//! - **Exact float interop**: floats become rationals without rounding, and
//!   conversions back to `f64` round to nearest, ties to even
//! - **Cross-type hashing**: an integer and the equal rational hash alike
//!
//! ## Examples
//!
//! ```rust
//! use bigrat::{BigInt, Endianness, Rational, TieBreaking};
//!
//! let value = BigInt::parse("-0x1A", 0).unwrap();
//! assert_eq!(value, BigInt::from(-26));
//! assert_eq!(&value / &BigInt::from(4), BigInt::from(-7));
//!
//! let bytes = value.to_bytes(Endianness::Big);
//! assert_eq!(BigInt::from_bytes(&bytes, Endianness::Big), value);
//!
//! let half: Rational = "1/3".parse::<Rational>().unwrap() + "1/6".parse::<Rational>().unwrap();
//! assert_eq!(half.to_string(), "1/2");
//! assert_eq!(half.hash_value(), Rational::try_from(0.5).unwrap().hash_value());
//!
//! let seven_halves = Rational::new(BigInt::from(7), BigInt::from(2)).unwrap();
//! assert_eq!(seven_halves.round(TieBreaking::ToEven), BigInt::from(4));
//! ```
//!
//! ## Errors
//!
//! Fallible operations return one of [`ParseError`], [`ArithmeticError`] or
//! [`ConversionError`]; each reports an [`ErrorKind`] for coarse matching.

pub(crate) mod big_int;
pub(crate) mod bitwise;
pub(crate) mod bytes;
pub(crate) mod digits;
pub(crate) mod enums;
pub(crate) mod error;
pub(crate) mod hash;
pub(crate) mod ops;
pub(crate) mod parse;
pub(crate) mod rational;

// Re-export main types and functions
pub use big_int::{BigInt, Power};
pub use enums::{Endianness, TieBreaking};
pub use error::{
    ArithmeticError, ArithmeticResult, ConversionError, ConversionResult, Error, ErrorKind,
    ParseError, ParseResult,
};
pub use hash::{HASH_INF, HASH_MODULUS};
pub use parse::{MAX_BASE, MIN_BASE};
pub use rational::{Fractional, Rational};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_rational_interoperate() {
        let n: BigInt = "123456789012345678901234567890".parse().unwrap();
        let r = Rational::from(n.clone());
        assert_eq!(r, n);
        assert_eq!(r.hash_value(), n.hash_value());
        assert_eq!(&r / &n, Rational::one());
    }

    #[test]
    fn test_negative_power_escapes_to_rational() {
        let power = BigInt::from(10).checked_pow(&BigInt::from(-2)).unwrap();
        let expected = Rational::new(BigInt::from(1), BigInt::from(100)).unwrap();
        assert_eq!(power, Power::Fractional(expected.clone()));
        assert_eq!(Rational::from(power), expected);
    }

    #[test]
    fn test_error_kinds_distinguish_failures() {
        let parse = BigInt::parse("12z", 10).unwrap_err();
        let zero = BigInt::from(1).checked_div(&BigInt::zero()).unwrap_err();
        assert_eq!(parse.kind(), ErrorKind::Parse);
        assert_eq!(zero.kind(), ErrorKind::DivisionByZero);
        assert_ne!(parse.kind(), zero.kind());
    }

    #[test]
    fn test_large_values_sort() {
        let mut values: Vec<BigInt> = ["-1e0", "5", "-99999999999999999999", "0", "1_0"]
            .iter()
            .filter_map(|text| BigInt::parse(text, 0).ok())
            .collect();
        values.sort();
        let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["-99999999999999999999", "0", "5", "10"]);
    }
}
