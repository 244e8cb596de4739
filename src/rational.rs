use crate::big_int::{decompose_f64, div_to_f64, BigInt};
use crate::enums::TieBreaking;
use crate::error::{ArithmeticError, ArithmeticResult, ConversionError, ConversionResult, Error};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Exact rational number
///
/// Always stored in lowest terms with a positive denominator, and zero is
/// `0/1`. Since every value has exactly one representation, equality and
/// hashing work on the fields directly.
#[derive(Clone, PartialEq, Eq)]
pub struct Rational {
    numerator: BigInt,
    denominator: BigInt,
}

/// A value with an exact numerator/denominator pair
///
/// Implemented by [`Rational`], [`BigInt`] and the primitive integers, which
/// lets [`Rational::from_fractional`] copy any of them.
pub trait Fractional {
    fn numerator(&self) -> BigInt;

    fn denominator(&self) -> BigInt;
}

impl Fractional for Rational {
    fn numerator(&self) -> BigInt {
        self.numerator.clone()
    }

    fn denominator(&self) -> BigInt {
        self.denominator.clone()
    }
}

impl Fractional for BigInt {
    fn numerator(&self) -> BigInt {
        self.clone()
    }

    fn denominator(&self) -> BigInt {
        Self::one()
    }
}

macro_rules! fractional_primitive_impl {
    ($($primitive:ty)*) => ($(
        impl Fractional for $primitive {
            fn numerator(&self) -> BigInt {
                BigInt::from(*self)
            }

            fn denominator(&self) -> BigInt {
                BigInt::one()
            }
        }

        impl From<$primitive> for Rational {
            fn from(value: $primitive) -> Self {
                Self::from(BigInt::from(value))
            }
        }
    )*)
}

fractional_primitive_impl!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl Rational {
    /// Build `numerator / denominator` in lowest terms
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if `denominator` is zero.
    pub fn new(numerator: BigInt, denominator: BigInt) -> ArithmeticResult<Self> {
        if denominator.is_zero() {
            tracing::debug!(%numerator, "rejected zero denominator");
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(Self::normalized(numerator, denominator))
    }

    /// Copy the numerator and denominator of any rational-like value
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if the value reports a
    /// zero denominator.
    pub fn from_fractional<T: Fractional + ?Sized>(value: &T) -> ArithmeticResult<Self> {
        Self::new(value.numerator(), value.denominator())
    }

    /// Reduce by the gcd and move the sign to the numerator; `denominator != 0`
    fn normalized(numerator: BigInt, denominator: BigInt) -> Self {
        let gcd = numerator.gcd(&denominator);
        let (mut numerator, mut denominator) = if gcd.is_one() {
            (numerator, denominator)
        } else {
            (numerator.div_exact(&gcd), denominator.div_exact(&gcd))
        };
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }
        Self {
            numerator,
            denominator,
        }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::from(BigInt::zero())
    }

    #[must_use]
    pub fn one() -> Self {
        Self::from(BigInt::one())
    }

    #[must_use]
    pub const fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    /// Always positive
    #[must_use]
    pub const fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    #[must_use]
    pub fn into_parts(self) -> (BigInt, BigInt) {
        (self.numerator, self.denominator)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.numerator.is_positive()
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
        }
    }

    /// `1 / self`
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] for zero.
    pub fn recip(&self) -> ArithmeticResult<Self> {
        if self.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        // Already coprime, only the sign may need moving
        let (numerator, denominator) = if self.is_negative() {
            (-&self.denominator, -&self.numerator)
        } else {
            (self.denominator.clone(), self.numerator.clone())
        };
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// True division
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if `divisor` is zero.
    pub fn checked_div(&self, divisor: &Self) -> ArithmeticResult<Self> {
        Ok(self * &divisor.recip()?)
    }

    /// Floor of the quotient (`//`)
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if `divisor` is zero.
    pub fn checked_div_floor(&self, divisor: &Self) -> ArithmeticResult<BigInt> {
        let dividend = &self.numerator * &divisor.denominator;
        dividend.checked_div(&(&self.denominator * &divisor.numerator))
    }

    /// Remainder of floor division (`%`), with the sign of `divisor`
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if `divisor` is zero.
    pub fn checked_rem_floor(&self, divisor: &Self) -> ArithmeticResult<Self> {
        self.checked_div_rem_floor(divisor)
            .map(|(_, remainder)| remainder)
    }

    /// Floor quotient and remainder (`divmod`)
    ///
    /// `quotient * divisor + remainder == self`, and the remainder is zero or
    /// has the sign of `divisor`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if `divisor` is zero.
    pub fn checked_div_rem_floor(&self, divisor: &Self) -> ArithmeticResult<(BigInt, Self)> {
        // Both sides over the common denominator self.den * divisor.den
        let dividend = &self.numerator * &divisor.denominator;
        let scaled_divisor = &self.denominator * &divisor.numerator;
        let (quotient, remainder) = dividend.checked_div_rem(&scaled_divisor)?;
        let denominator = &self.denominator * &divisor.denominator;
        Ok((quotient, Self::normalized(remainder, denominator)))
    }

    /// Integer power; a negative exponent inverts first
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] for zero raised to a
    /// negative power.
    pub fn checked_pow(&self, exponent: &BigInt) -> ArithmeticResult<Self> {
        let base = if exponent.is_negative() {
            self.recip()?
        } else {
            self.clone()
        };
        // Powers of coprime terms stay coprime
        Ok(Self {
            numerator: base.numerator.pow_magnitude(&exponent.magnitude),
            denominator: base.denominator.pow_magnitude(&exponent.magnitude),
        })
    }

    /// [`checked_pow`](Self::checked_pow) with a primitive exponent
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] for zero raised to a
    /// negative power.
    pub fn pow(&self, exponent: i64) -> ArithmeticResult<Self> {
        self.checked_pow(&BigInt::from(exponent))
    }

    /// Nearest integer, resolving exact halves with `tie_breaking`
    #[must_use]
    pub fn round(&self, tie_breaking: TieBreaking) -> BigInt {
        let (quotient, remainder) = self.floor_div_rem();
        let doubled = &remainder + &remainder;
        let round_up = match doubled.cmp(&self.denominator) {
            Ordering::Less => false,
            Ordering::Greater => true,
            Ordering::Equal => match tie_breaking {
                TieBreaking::AwayFromZero => !quotient.is_negative(),
                TieBreaking::ToEven => quotient.is_odd(),
                TieBreaking::ToOdd => quotient.is_even(),
                TieBreaking::TowardZero => quotient.is_negative(),
            },
        };
        if round_up {
            &quotient + &BigInt::one()
        } else {
            quotient
        }
    }

    /// Nearest integer, ties to even
    #[must_use]
    pub fn round_half_even(&self) -> BigInt {
        self.round(TieBreaking::ToEven)
    }

    /// Round to a multiple of `10^-digits`, ties to even
    #[must_use]
    pub fn round_digits(&self, digits: i64) -> Self {
        let exponent = BigInt::from(digits.unsigned_abs());
        let shift = BigInt::from(10).pow_magnitude(&exponent.magnitude);
        if digits > 0 {
            let scaled = Self {
                numerator: &self.numerator * &shift,
                denominator: self.denominator.clone(),
            };
            Self::normalized(scaled.round_half_even(), shift)
        } else {
            let scaled = Self::normalized(self.numerator.clone(), &self.denominator * &shift);
            Self::from(&scaled.round_half_even() * &shift)
        }
    }

    /// Largest integer not greater than the value
    #[must_use]
    pub fn floor(&self) -> BigInt {
        self.floor_div_rem().0
    }

    /// Smallest integer not less than the value
    #[must_use]
    pub fn ceil(&self) -> BigInt {
        -(-self).floor()
    }

    /// Integer part, rounding toward zero
    #[must_use]
    pub fn trunc(&self) -> BigInt {
        if self.is_negative() {
            self.ceil()
        } else {
            self.floor()
        }
    }

    fn floor_div_rem(&self) -> (BigInt, BigInt) {
        // The denominator is never zero
        self.numerator
            .checked_div_rem(&self.denominator)
            .unwrap_or_default()
    }

    /// Nearest `f64`, ties to even
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Overflow`] if the magnitude exceeds the
    /// finite `f64` range.
    pub fn to_f64(&self) -> ConversionResult<f64> {
        div_to_f64(
            self.is_negative(),
            &self.numerator.magnitude,
            &self.denominator.magnitude,
        )
    }
}

impl From<BigInt> for Rational {
    fn from(value: BigInt) -> Self {
        Self {
            numerator: value,
            denominator: BigInt::one(),
        }
    }
}

impl From<&BigInt> for Rational {
    fn from(value: &BigInt) -> Self {
        Self::from(value.clone())
    }
}

impl TryFrom<f64> for Rational {
    type Error = ConversionError;

    /// Exact value of a finite float; infinities and NaN are rejected.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let (negative, mantissa, exponent) = decompose_f64(value)?;
        let mantissa = BigInt::from(mantissa);
        let mantissa = if negative { -mantissa } else { mantissa };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = if exponent >= 0 {
            Self::from(mantissa << exponent as usize)
        } else {
            Self::normalized(mantissa, BigInt::one() << (-exponent) as usize)
        };
        Ok(value)
    }
}

impl TryFrom<f32> for Rational {
    type Error = ConversionError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::try_from(f64::from(value))
    }
}

impl TryFrom<&Rational> for f64 {
    type Error = ConversionError;

    fn try_from(value: &Rational) -> Result<Self, Self::Error> {
        value.to_f64()
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<BigInt> for Rational {
    fn eq(&self, other: &BigInt) -> bool {
        self.denominator.is_one() && self.numerator == *other
    }
}

impl PartialEq<Rational> for BigInt {
    fn eq(&self, other: &Rational) -> bool {
        other == self
    }
}

impl PartialOrd<BigInt> for Rational {
    fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
        Some(self.numerator.cmp(&(other * &self.denominator)))
    }
}

impl PartialOrd<Rational> for BigInt {
    fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

impl Add<&Rational> for &Rational {
    type Output = Rational;

    fn add(self, other: &Rational) -> Rational {
        let numerator =
            &(&self.numerator * &other.denominator) + &(&other.numerator * &self.denominator);
        Rational::normalized(numerator, &self.denominator * &other.denominator)
    }
}

impl Sub<&Rational> for &Rational {
    type Output = Rational;

    fn sub(self, other: &Rational) -> Rational {
        let numerator =
            &(&self.numerator * &other.denominator) - &(&other.numerator * &self.denominator);
        Rational::normalized(numerator, &self.denominator * &other.denominator)
    }
}

impl Mul<&Rational> for &Rational {
    type Output = Rational;

    fn mul(self, other: &Rational) -> Rational {
        // Cross-reduce first so the products are already in lowest terms
        let left = self.numerator.gcd(&other.denominator);
        let right = other.numerator.gcd(&self.denominator);
        Rational {
            numerator: &self.numerator.div_exact(&left) * &other.numerator.div_exact(&right),
            denominator: &self.denominator.div_exact(&right) * &other.denominator.div_exact(&left),
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator.is_one() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({}, {})", self.numerator, self.denominator)
    }
}

impl FromStr for Rational {
    type Err = Error;

    /// Parse `"n"` or `"n/d"`, both sides in base 10
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((numerator, denominator)) => {
                let numerator: BigInt = numerator.parse()?;
                let denominator: BigInt = denominator.parse()?;
                Ok(Self::new(numerator, denominator)?)
            }
            None => Ok(Self::from(s.parse::<BigInt>()?)),
        }
    }
}

impl TryFrom<&str> for Rational {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Rational;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Rational {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Rational {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(D::Error::custom)
        }
    }
}
