//! Numeric hashing shared by [`BigInt`] and [`Rational`].
//!
//! Equal values hash equally across both types: an integer `n` and the
//! rational `n/1` produce the same [`hash_value`](BigInt::hash_value). The
//! scheme reduces `|numerator| * denominator^-1` modulo the Mersenne prime
//! `2^61 - 1`, which is the convention used by 64-bit CPython for `int`,
//! `fractions.Fraction` and `float`, so hashes agree bit-for-bit with it.

use crate::big_int::BigInt;
use crate::rational::Rational;
use std::hash::{Hash, Hasher};

/// Prime modulus of the hash, `2^61 - 1`
pub const HASH_MODULUS: i64 = (1 << 61) - 1;

/// Hash of values whose denominator is a multiple of [`HASH_MODULUS`]
pub const HASH_INF: i64 = 314_159;

/// Reserved "hash failed" value, never returned
const HASH_FAILED: i64 = -1;

fn modulus() -> BigInt {
    BigInt::from(HASH_MODULUS)
}

/// Apply sign and remap the reserved value
fn finish(reduced: &BigInt, negative: bool) -> i64 {
    // reduced lies in [0, HASH_MODULUS], so the conversion cannot fail
    let reduced = i64::try_from(reduced).unwrap_or(HASH_INF);
    let signed = if negative { -reduced } else { reduced };
    if signed == HASH_FAILED {
        -2
    } else {
        signed
    }
}

impl BigInt {
    /// Numeric hash, consistent with [`Rational::hash_value`]
    #[must_use]
    pub fn hash_value(&self) -> i64 {
        let reduced = self.abs().checked_rem(&modulus()).unwrap_or_default();
        finish(&reduced, self.negative)
    }
}

impl Rational {
    /// Numeric hash, consistent with equality across [`Rational`] and [`BigInt`]
    ///
    /// `denominator^-1 mod P` is computed as `denominator^(P - 2) mod P`
    /// (Fermat); a zero result means the denominator is a multiple of `P`
    /// and the value hashes to [`HASH_INF`].
    #[must_use]
    pub fn hash_value(&self) -> i64 {
        let modulus = modulus();
        let inverse = self
            .denominator()
            .pow_mod(&(&modulus - &BigInt::from(2)), &modulus)
            .unwrap_or_default();
        let reduced = if inverse.is_zero() {
            BigInt::from(HASH_INF)
        } else {
            (&self.numerator().abs() * &inverse)
                .checked_rem(&modulus)
                .unwrap_or_default()
        };
        finish(&reduced, self.is_negative())
    }
}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(self.hash_value());
    }
}

impl Hash for Rational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(self.hash_value());
    }
}
