use crate::digits::{self, Digit, DIGIT_BITS};
use crate::error::{ArithmeticError, ArithmeticResult, ConversionError, ConversionResult};
use crate::rational::Rational;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Arbitrary-precision signed integer
///
/// Stored as a sign flag and a little-endian magnitude of `u32` limbs. The
/// representation is canonical:
/// - the magnitude never ends with a zero limb
/// - zero is the empty magnitude and is never negative
///
/// which lets [`PartialEq`], [`Eq`] and [`Hash`](std::hash::Hash) work on the
/// fields directly. Values are immutable; every operation returns a new one.
///
/// Division ([`checked_div_rem`](Self::checked_div_rem), `/`, `%`) uses floor
/// semantics: the quotient rounds toward negative infinity and the remainder
/// takes the sign of the divisor. Bitwise operations behave as if the value
/// were an infinitely sign-extended two's-complement integer.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BigInt {
    pub(crate) negative: bool,
    pub(crate) magnitude: Vec<Digit>,
}

/// Result of [`BigInt::checked_pow`]: negative exponents leave the integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Power {
    Integral(BigInt),
    Fractional(Rational),
}

impl From<Power> for Rational {
    fn from(value: Power) -> Self {
        match value {
            Power::Integral(integer) => Self::from(integer),
            Power::Fractional(fraction) => fraction,
        }
    }
}

impl BigInt {
    /// Build from a sign and an untrimmed magnitude, restoring the canonical form
    pub(crate) fn from_parts(negative: bool, mut magnitude: Vec<Digit>) -> Self {
        digits::trim(&mut magnitude);
        Self {
            negative: negative && !magnitude.is_empty(),
            magnitude,
        }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            magnitude: Vec::new(),
        }
    }

    #[must_use]
    pub fn one() -> Self {
        Self {
            negative: false,
            magnitude: vec![1],
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_empty()
    }

    #[must_use]
    pub fn is_one(&self) -> bool {
        !self.negative && self.magnitude == [1]
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.is_zero()
    }

    #[must_use]
    pub fn is_even(&self) -> bool {
        self.magnitude.first().map_or(true, |&low| low & 1 == 0)
    }

    #[must_use]
    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    /// `-1`, `0` or `1`
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.negative {
            -1
        } else {
            i8::from(!self.is_zero())
        }
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            magnitude: self.magnitude.clone(),
        }
    }

    /// Number of bits needed to represent the magnitude, `0` for zero
    #[must_use]
    pub fn bit_length(&self) -> usize {
        digits::bit_length(&self.magnitude)
    }

    /// Whether the value is a strictly positive power of two
    #[must_use]
    pub fn is_power_of_two(&self) -> bool {
        match self.magnitude.split_last() {
            Some((top, rest)) => {
                !self.negative && top.is_power_of_two() && rest.iter().all(|&d| d == 0)
            }
            None => false,
        }
    }

    /// Greatest common divisor, always non-negative; `gcd(0, 0) == 0`
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.magnitude.clone();
        let mut b = other.magnitude.clone();
        while !b.is_empty() {
            let (_, remainder) = digits::div_rem(&a, &b);
            a = b;
            b = remainder;
        }
        Self::from_parts(false, a)
    }

    /// Floor division and remainder (`divmod`)
    ///
    /// `quotient * divisor + remainder == self`, and the remainder is zero
    /// or has the sign of `divisor`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if `divisor` is zero.
    pub fn checked_div_rem(&self, divisor: &Self) -> ArithmeticResult<(Self, Self)> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let (quotient, remainder) = digits::div_rem(&self.magnitude, &divisor.magnitude);
        let signs_differ = self.negative != divisor.negative;
        let quotient = Self::from_parts(signs_differ, quotient);
        let remainder = Self::from_parts(self.negative, remainder);
        if signs_differ && !remainder.is_zero() {
            Ok((&quotient - &Self::one(), &remainder + divisor))
        } else {
            Ok((quotient, remainder))
        }
    }

    /// Floor division (`//`)
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if `divisor` is zero.
    pub fn checked_div(&self, divisor: &Self) -> ArithmeticResult<Self> {
        self.checked_div_rem(divisor).map(|(quotient, _)| quotient)
    }

    /// Floor remainder (`%`), with the sign of `divisor`
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if `divisor` is zero.
    pub fn checked_rem(&self, divisor: &Self) -> ArithmeticResult<Self> {
        self.checked_div_rem(divisor).map(|(_, remainder)| remainder)
    }

    /// Exact quotient of a division known to leave no remainder
    pub(crate) fn div_exact(&self, divisor: &Self) -> Self {
        debug_assert!(!divisor.is_zero());
        let (quotient, remainder) = digits::div_rem(&self.magnitude, &divisor.magnitude);
        debug_assert!(remainder.is_empty());
        Self::from_parts(self.negative != divisor.negative, quotient)
    }

    /// Raise to a non-negative power by repeated squaring
    #[must_use]
    pub fn pow(&self, exponent: u32) -> Self {
        self.pow_magnitude(&[exponent])
    }

    pub(crate) fn pow_magnitude(&self, exponent: &[Digit]) -> Self {
        let bits = digits::bit_length(exponent);
        let mut result = Self::one();
        let mut base = self.clone();
        for i in 0..bits {
            if (exponent[i / DIGIT_BITS] >> (i % DIGIT_BITS)) & 1 == 1 {
                result = &result * &base;
            }
            if i + 1 < bits {
                base = &base * &base;
            }
        }
        result
    }

    /// Raise to an arbitrary integer power
    ///
    /// Non-negative exponents stay integral; a negative exponent yields the
    /// rational `(1 / self) ^ -exponent`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] for a zero base with a
    /// negative exponent.
    pub fn checked_pow(&self, exponent: &Self) -> ArithmeticResult<Power> {
        let power = self.pow_magnitude(&exponent.magnitude);
        if exponent.negative {
            Rational::new(Self::one(), power).map(Power::Fractional)
        } else {
            Ok(Power::Integral(power))
        }
    }

    /// Modular exponentiation `self ^ exponent mod modulus`
    ///
    /// The result is zero or carries the sign of `modulus`. A negative
    /// exponent uses the modular inverse of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::ZeroModulus`] if `modulus` is zero and
    /// [`ArithmeticError::NotInvertible`] if the exponent is negative and
    /// `self` has no inverse modulo `modulus`.
    pub fn pow_mod(&self, exponent: &Self, modulus: &Self) -> ArithmeticResult<Self> {
        if modulus.is_zero() {
            return Err(ArithmeticError::ZeroModulus);
        }
        let modulus_abs = modulus.abs();
        let mut base = if exponent.negative {
            self.mod_inverse(&modulus_abs)?
        } else {
            self.checked_rem(&modulus_abs)?
        };
        let mut result = if modulus_abs.is_one() {
            Self::zero()
        } else {
            Self::one()
        };
        let bits = exponent.bit_length();
        for i in 0..bits {
            if (exponent.magnitude[i / DIGIT_BITS] >> (i % DIGIT_BITS)) & 1 == 1 {
                result = (&result * &base).checked_rem(&modulus_abs)?;
            }
            if i + 1 < bits {
                base = (&base * &base).checked_rem(&modulus_abs)?;
            }
        }
        if modulus.negative && !result.is_zero() {
            result = &result - &modulus_abs;
        }
        Ok(result)
    }

    /// Multiplicative inverse modulo `|modulus|`, in `[0, |modulus|)`
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::ZeroModulus`] if `modulus` is zero and
    /// [`ArithmeticError::NotInvertible`] if `gcd(self, modulus) != 1`.
    pub fn mod_inverse(&self, modulus: &Self) -> ArithmeticResult<Self> {
        if modulus.is_zero() {
            return Err(ArithmeticError::ZeroModulus);
        }
        let modulus = modulus.abs();
        let (mut old_remainder, mut remainder) = (self.checked_rem(&modulus)?, modulus.clone());
        let (mut old_coefficient, mut coefficient) = (Self::one(), Self::zero());
        while !remainder.is_zero() {
            let (quotient, next_remainder) = old_remainder.checked_div_rem(&remainder)?;
            old_remainder = std::mem::replace(&mut remainder, next_remainder);
            let next_coefficient = &old_coefficient - &(&quotient * &coefficient);
            old_coefficient = std::mem::replace(&mut coefficient, next_coefficient);
        }
        if !old_remainder.is_one() {
            tracing::debug!(value = %self, modulus = %modulus, "no modular inverse");
            return Err(ArithmeticError::NotInvertible);
        }
        old_coefficient.checked_rem(&modulus)
    }

    /// Round to a multiple of `10^-digits`, ties to even
    ///
    /// Non-negative `digits` leave the value unchanged.
    #[must_use]
    pub fn round_digits(&self, digits: i64) -> Self {
        if digits >= 0 {
            return self.clone();
        }
        Rational::from(self.clone()).round_digits(digits).into_parts().0
    }

    /// Nearest `f64`, ties to even
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Overflow`] if the magnitude exceeds the
    /// finite `f64` range.
    pub fn to_f64(&self) -> ConversionResult<f64> {
        div_to_f64(self.negative, &self.magnitude, &[1])
    }

    /// Magnitude as `u128` if it fits
    fn magnitude_u128(&self) -> Option<u128> {
        if self.magnitude.len() > 4 {
            return None;
        }
        Some(
            self.magnitude
                .iter()
                .rev()
                .fold(0u128, |acc, &d| (acc << DIGIT_BITS) | u128::from(d)),
        )
    }
}

/// Split a finite `f64` into `(negative, mantissa, exponent)` with
/// `|value| == mantissa * 2^exponent`.
pub(crate) fn decompose_f64(value: f64) -> ConversionResult<(bool, u64, i64)> {
    if value.is_nan() {
        tracing::debug!("rejecting NaN as an exact value");
        return Err(ConversionError::NaN);
    }
    if value.is_infinite() {
        tracing::debug!(value, "rejecting infinity as an exact value");
        return Err(ConversionError::Infinity);
    }
    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    #[allow(clippy::cast_possible_wrap)]
    let biased_exponent = ((bits >> 52) & 0x7FF) as i64;
    let fraction = bits & ((1 << 52) - 1);
    Ok(if biased_exponent == 0 {
        (negative, fraction, -1074)
    } else {
        (negative, fraction | (1 << 52), biased_exponent - 1075)
    })
}

/// Exact `2^exponent` for normal exponents
fn power_of_two(exponent: i64) -> f64 {
    debug_assert!((-1022..=1023).contains(&exponent));
    #[allow(clippy::cast_sign_loss)]
    let biased = (exponent + 1023) as u64;
    f64::from_bits(biased << 52)
}

/// `value * 2^exponent` without intermediate overflow or double rounding
fn scale(mut value: f64, mut exponent: i64) -> f64 {
    while exponent > 1000 {
        value *= power_of_two(1000);
        exponent -= 1000;
    }
    while exponent < -1000 {
        value *= power_of_two(-1000);
        exponent += 1000;
    }
    value * power_of_two(exponent)
}

/// Correctly rounded (ties to even) `numerator / denominator` as `f64`.
pub(crate) fn div_to_f64(
    negative: bool,
    numerator: &[Digit],
    denominator: &[Digit],
) -> ConversionResult<f64> {
    if numerator.is_empty() {
        return Ok(0.0);
    }
    #[allow(clippy::cast_possible_wrap)]
    let shift = 55 + digits::bit_length(denominator) as i64 - digits::bit_length(numerator) as i64;
    // The shifted quotient has 55 or 56 significant bits
    #[allow(clippy::cast_sign_loss)]
    let (quotient, remainder) = if shift >= 0 {
        digits::div_rem(&digits::shl(numerator, shift as usize), denominator)
    } else {
        digits::div_rem(numerator, &digits::shl(denominator, (-shift) as usize))
    };
    let quotient = quotient
        .iter()
        .rev()
        .fold(0u64, |acc, &d| (acc << DIGIT_BITS) | u64::from(d));
    let sticky = !remainder.is_empty();

    let quotient_bits = i64::from(u64::BITS - quotient.leading_zeros());
    let exponent = quotient_bits - 1 - shift;
    let overflow = ConversionError::Overflow { target: "f64" };
    if exponent > 1023 {
        return Err(overflow);
    }
    let precision = if exponent >= -1022 {
        53
    } else {
        53 - (-1022 - exponent)
    };
    let dropped = quotient_bits - precision;
    if dropped > 63 {
        return Ok(if negative { -0.0 } else { 0.0 });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let dropped = dropped as u32;
    let mut mantissa = quotient >> dropped;
    let rest = quotient & ((1 << dropped) - 1);
    let half = 1 << (dropped - 1);
    if rest > half || (rest == half && (sticky || mantissa & 1 == 1)) {
        mantissa += 1;
    }
    #[allow(clippy::cast_precision_loss)]
    let value = scale(mantissa as f64, i64::from(dropped) - shift);
    if value.is_infinite() {
        tracing::debug!(exponent, "value exceeds the f64 range");
        return Err(overflow);
    }
    Ok(if negative { -value } else { value })
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => digits::compare(&self.magnitude, &other.magnitude),
            (true, true) => digits::compare(&other.magnitude, &self.magnitude),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({self})")
    }
}

fn add_signed(negative_a: bool, a: &[Digit], negative_b: bool, b: &[Digit]) -> BigInt {
    if negative_a == negative_b {
        return BigInt::from_parts(negative_a, digits::add(a, b));
    }
    match digits::compare(a, b) {
        Ordering::Less => BigInt::from_parts(negative_b, digits::sub(b, a)),
        Ordering::Equal | Ordering::Greater => BigInt::from_parts(negative_a, digits::sub(a, b)),
    }
}

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;

    fn add(self, other: &BigInt) -> BigInt {
        add_signed(self.negative, &self.magnitude, other.negative, &other.magnitude)
    }
}

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;

    fn sub(self, other: &BigInt) -> BigInt {
        add_signed(self.negative, &self.magnitude, !other.negative, &other.magnitude)
    }
}

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mul(self, other: &BigInt) -> BigInt {
        BigInt::from_parts(
            self.negative != other.negative,
            digits::mul(&self.magnitude, &other.magnitude),
        )
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        BigInt::from_parts(!self.negative, self.magnitude.clone())
    }
}

impl Neg for BigInt {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_parts(!self.negative, self.magnitude)
    }
}

impl From<u128> for BigInt {
    fn from(mut value: u128) -> Self {
        let mut magnitude = Vec::with_capacity(4);
        while value != 0 {
            #[allow(clippy::cast_possible_truncation)]
            magnitude.push(value as Digit);
            value >>= DIGIT_BITS;
        }
        Self {
            negative: false,
            magnitude,
        }
    }
}

impl From<i128> for BigInt {
    fn from(value: i128) -> Self {
        // unsigned_abs handles i128::MIN without overflow
        let magnitude = Self::from(value.unsigned_abs()).magnitude;
        Self::from_parts(value < 0, magnitude)
    }
}

// Narrower types widen losslessly to the 128-bit impls
macro_rules! from_primitive_impl {
    ($wide:ty => $($narrow:ty)*) => ($(
        impl From<$narrow> for BigInt {
            fn from(value: $narrow) -> Self {
                #[allow(clippy::cast_lossless)]
                let wide = value as $wide;
                Self::from(wide)
            }
        }
    )*)
}

from_primitive_impl!(i128 => i8 i16 i32 i64 isize);
from_primitive_impl!(u128 => u8 u16 u32 u64 usize);

macro_rules! try_into_primitive_impl {
    ($($primitive:ty)*) => ($(
        impl TryFrom<&BigInt> for $primitive {
            type Error = ConversionError;

            fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
                let overflow = ConversionError::Overflow { target: stringify!($primitive) };
                let magnitude = value.magnitude_u128().ok_or(overflow)?;
                if value.negative {
                    let signed = if magnitude == 1 << 127 {
                        i128::MIN
                    } else {
                        i128::try_from(magnitude).map_err(|_| overflow)?.wrapping_neg()
                    };
                    <$primitive>::try_from(signed).map_err(|_| overflow)
                } else {
                    <$primitive>::try_from(magnitude).map_err(|_| overflow)
                }
            }
        }

        impl TryFrom<BigInt> for $primitive {
            type Error = ConversionError;

            fn try_from(value: BigInt) -> Result<Self, Self::Error> {
                Self::try_from(&value)
            }
        }
    )*)
}

try_into_primitive_impl!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl TryFrom<f64> for BigInt {
    type Error = ConversionError;

    /// Truncates toward zero; infinities and NaN are rejected.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let (negative, mantissa, exponent) = decompose_f64(value)?;
        let mantissa = Self::from(mantissa).magnitude;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let magnitude = if exponent >= 0 {
            digits::shl(&mantissa, exponent as usize)
        } else {
            digits::shr(&mantissa, (-exponent) as usize)
        };
        Ok(Self::from_parts(negative, magnitude))
    }
}

impl TryFrom<f32> for BigInt {
    type Error = ConversionError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::try_from(f64::from(value))
    }
}

impl TryFrom<&BigInt> for f64 {
    type Error = ConversionError;

    fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
        value.to_f64()
    }
}
