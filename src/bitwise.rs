//! Two's-complement bitwise operations and shifts.
//!
//! Operands are widened to a common limb count plus one sign limb, combined
//! limb by limb, then converted back to sign-magnitude form.

use crate::big_int::BigInt;
use crate::digits::{self, Digit};
use crate::error::{ArithmeticError, ArithmeticResult};
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

/// Two's-complement limbs of `value`, sign-extended to `len` limbs
fn to_twos_complement(value: &BigInt, len: usize) -> Vec<Digit> {
    let mut limbs = value.magnitude.clone();
    limbs.resize(len, 0);
    if value.negative {
        let mut carry = true;
        for limb in &mut limbs {
            let (sum, overflow) = (!*limb).overflowing_add(Digit::from(carry));
            *limb = sum;
            carry = overflow;
        }
    }
    limbs
}

fn from_twos_complement(mut limbs: Vec<Digit>) -> BigInt {
    let negative = limbs.last().is_some_and(|&top| top >> (Digit::BITS - 1) == 1);
    if negative {
        let mut carry = true;
        for limb in &mut limbs {
            let (sum, overflow) = (!*limb).overflowing_add(Digit::from(carry));
            *limb = sum;
            carry = overflow;
        }
    }
    BigInt::from_parts(negative, limbs)
}

fn combine(a: &BigInt, b: &BigInt, op: impl Fn(Digit, Digit) -> Digit) -> BigInt {
    let len = a.magnitude.len().max(b.magnitude.len()) + 1;
    let a = to_twos_complement(a, len);
    let b = to_twos_complement(b, len);
    from_twos_complement(a.iter().zip(&b).map(|(&x, &y)| op(x, y)).collect())
}

impl BigInt {
    /// Left shift by a count given as an integer
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::NegativeShift`] for a negative count,
    /// [`ArithmeticError::ShiftTooLarge`] if the result would exceed the
    /// largest addressable limb count and [`ArithmeticError::OutOfMemory`]
    /// if its limbs cannot be allocated.
    pub fn checked_shl(&self, shift: &Self) -> ArithmeticResult<Self> {
        if shift.negative {
            return Err(ArithmeticError::NegativeShift);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let shift = usize::try_from(shift).map_err(|_| ArithmeticError::ShiftTooLarge)?;
        let limbs = shift / digits::DIGIT_BITS + self.magnitude.len() + 1;
        if limbs > isize::MAX as usize / std::mem::size_of::<Digit>() {
            tracing::debug!(shift, "shift count exceeds addressable limbs");
            return Err(ArithmeticError::ShiftTooLarge);
        }
        let magnitude = digits::try_shl(&self.magnitude, shift).ok_or_else(|| {
            tracing::debug!(shift, "cannot allocate shifted limbs");
            ArithmeticError::OutOfMemory
        })?;
        Ok(Self::from_parts(self.negative, magnitude))
    }

    /// Arithmetic (flooring) right shift by a count given as an integer
    ///
    /// Counts beyond the bit length yield `0` or `-1`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::NegativeShift`] for a negative count.
    pub fn checked_shr(&self, shift: &Self) -> ArithmeticResult<Self> {
        if shift.negative {
            return Err(ArithmeticError::NegativeShift);
        }
        match usize::try_from(shift) {
            Ok(shift) => Ok(self >> shift),
            Err(_) if self.negative => Ok(Self::from(-1)),
            Err(_) => Ok(Self::zero()),
        }
    }
}

impl BitAnd<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitand(self, other: &BigInt) -> BigInt {
        combine(self, other, |x, y| x & y)
    }
}

impl BitOr<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitor(self, other: &BigInt) -> BigInt {
        combine(self, other, |x, y| x | y)
    }
}

impl BitXor<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitxor(self, other: &BigInt) -> BigInt {
        combine(self, other, |x, y| x ^ y)
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    /// `!x == -x - 1`
    fn not(self) -> BigInt {
        if self.negative {
            BigInt::from_parts(false, digits::sub(&self.magnitude, &[1]))
        } else {
            BigInt::from_parts(true, digits::add(&self.magnitude, &[1]))
        }
    }
}

impl Not for BigInt {
    type Output = Self;

    fn not(self) -> Self {
        !&self
    }
}

impl Shl<usize> for &BigInt {
    type Output = BigInt;

    fn shl(self, shift: usize) -> BigInt {
        BigInt::from_parts(self.negative, digits::shl(&self.magnitude, shift))
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    /// Rounds toward negative infinity, like `>>` on primitive signed integers
    fn shr(self, shift: usize) -> BigInt {
        if self.negative {
            // floor(x / 2^n) == -((|x| - 1) >> n) - 1 for negative x
            let decremented = digits::sub(&self.magnitude, &[1]);
            let shifted = digits::shr(&decremented, shift);
            BigInt::from_parts(true, digits::add(&shifted, &[1]))
        } else {
            BigInt::from_parts(false, digits::shr(&self.magnitude, shift))
        }
    }
}

impl Shl<usize> for BigInt {
    type Output = Self;

    fn shl(self, shift: usize) -> Self {
        &self << shift
    }
}

impl Shr<usize> for BigInt {
    type Output = Self;

    fn shr(self, shift: usize) -> Self {
        &self >> shift
    }
}
