//! Operator overloads.
//!
//! Each operator has one `&T op &U` implementation holding the logic; the
//! macros below forward owned and mixed borrowed operands to it. Integer
//! operands (`BigInt` or primitive) combine with [`Rational`] as `n/1`, and
//! primitives combine with [`BigInt`] after widening.
//!
//! `/` and `%` panic on a zero right-hand side, like the primitive integers.
//! Use the `checked_*` methods to get an [`ArithmeticError`] instead.

use crate::big_int::BigInt;
use crate::error::{ArithmeticError, ArithmeticResult};
use crate::rational::Rational;
use std::cmp::Ordering;
use std::iter::{Product, Sum};
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Rem, Sub};

fn or_panic<T>(result: ArithmeticResult<T>) -> T {
    result.unwrap_or_else(|error: ArithmeticError| panic!("{error}"))
}

/// Forward `T op U`, `T op &U` and `&T op U` to `&T op &U`
macro_rules! forward_binop {
    (impl $imp:ident, $method:ident for $lhs:ty, $rhs:ty => $out:ty) => {
        impl $imp<$rhs> for $lhs {
            type Output = $out;

            #[inline]
            fn $method(self, other: $rhs) -> $out {
                $imp::$method(&self, &other)
            }
        }

        impl $imp<&$rhs> for $lhs {
            type Output = $out;

            #[inline]
            fn $method(self, other: &$rhs) -> $out {
                $imp::$method(&self, other)
            }
        }

        impl $imp<$rhs> for &$lhs {
            type Output = $out;

            #[inline]
            fn $method(self, other: $rhs) -> $out {
                $imp::$method(self, &other)
            }
        }
    };
}

/// Primitive integers on either side of `$res`, widened with `From`
macro_rules! promote_scalars {
    (impl $imp:ident for $res:ty, $method:ident) => {
        promote_scalars!(
            impl $imp for $res, $method,
            i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
        );
    };
    (impl $imp:ident for $res:ty, $method:ident, $($scalar:ty),*) => {$(
        impl $imp<&$scalar> for &$res {
            type Output = $res;

            #[inline]
            fn $method(self, other: &$scalar) -> $res {
                $imp::$method(self, &<$res>::from(*other))
            }
        }

        impl $imp<&$res> for &$scalar {
            type Output = $res;

            #[inline]
            fn $method(self, other: &$res) -> $res {
                $imp::$method(&<$res>::from(*self), other)
            }
        }

        forward_binop!(impl $imp, $method for $res, $scalar => $res);
        forward_binop!(impl $imp, $method for $scalar, $res => $res);
    )*};
}

/// `BigInt` on either side of `Rational`, as `n/1`
macro_rules! promote_integer {
    (impl $imp:ident, $method:ident) => {
        impl $imp<&BigInt> for &Rational {
            type Output = Rational;

            #[inline]
            fn $method(self, other: &BigInt) -> Rational {
                $imp::$method(self, &Rational::from(other))
            }
        }

        impl $imp<&Rational> for &BigInt {
            type Output = Rational;

            #[inline]
            fn $method(self, other: &Rational) -> Rational {
                $imp::$method(&Rational::from(self), other)
            }
        }

        forward_binop!(impl $imp, $method for Rational, BigInt => Rational);
        forward_binop!(impl $imp, $method for BigInt, Rational => Rational);
    };
}

impl Div<&BigInt> for &BigInt {
    type Output = BigInt;

    /// Floor division
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    fn div(self, other: &BigInt) -> BigInt {
        or_panic(self.checked_div(other))
    }
}

impl Rem<&BigInt> for &BigInt {
    type Output = BigInt;

    /// Floor remainder, with the sign of `other`
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    fn rem(self, other: &BigInt) -> BigInt {
        or_panic(self.checked_rem(other))
    }
}

impl Div<&Rational> for &Rational {
    type Output = Rational;

    /// # Panics
    ///
    /// Panics if `other` is zero.
    fn div(self, other: &Rational) -> Rational {
        or_panic(self.checked_div(other))
    }
}

impl Rem<&Rational> for &Rational {
    type Output = Rational;

    /// Floor remainder, with the sign of `other`
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    fn rem(self, other: &Rational) -> Rational {
        or_panic(self.checked_rem_floor(other))
    }
}

forward_binop!(impl Add, add for BigInt, BigInt => BigInt);
forward_binop!(impl Sub, sub for BigInt, BigInt => BigInt);
forward_binop!(impl Mul, mul for BigInt, BigInt => BigInt);
forward_binop!(impl Div, div for BigInt, BigInt => BigInt);
forward_binop!(impl Rem, rem for BigInt, BigInt => BigInt);
forward_binop!(impl BitAnd, bitand for BigInt, BigInt => BigInt);
forward_binop!(impl BitOr, bitor for BigInt, BigInt => BigInt);
forward_binop!(impl BitXor, bitxor for BigInt, BigInt => BigInt);

promote_scalars!(impl Add for BigInt, add);
promote_scalars!(impl Sub for BigInt, sub);
promote_scalars!(impl Mul for BigInt, mul);
promote_scalars!(impl Div for BigInt, div);
promote_scalars!(impl Rem for BigInt, rem);
promote_scalars!(impl BitAnd for BigInt, bitand);
promote_scalars!(impl BitOr for BigInt, bitor);
promote_scalars!(impl BitXor for BigInt, bitxor);

forward_binop!(impl Add, add for Rational, Rational => Rational);
forward_binop!(impl Sub, sub for Rational, Rational => Rational);
forward_binop!(impl Mul, mul for Rational, Rational => Rational);
forward_binop!(impl Div, div for Rational, Rational => Rational);
forward_binop!(impl Rem, rem for Rational, Rational => Rational);

promote_integer!(impl Add, add);
promote_integer!(impl Sub, sub);
promote_integer!(impl Mul, mul);
promote_integer!(impl Div, div);
promote_integer!(impl Rem, rem);

promote_scalars!(impl Add for Rational, add);
promote_scalars!(impl Sub for Rational, sub);
promote_scalars!(impl Mul for Rational, mul);
promote_scalars!(impl Div for Rational, div);
promote_scalars!(impl Rem for Rational, rem);

/// Equality and ordering against primitive integers, in both directions
macro_rules! compare_scalars {
    ($res:ty: $($scalar:ty)*) => {$(
        impl PartialEq<$scalar> for $res {
            fn eq(&self, other: &$scalar) -> bool {
                *self == <$res>::from(*other)
            }
        }

        impl PartialEq<$res> for $scalar {
            fn eq(&self, other: &$res) -> bool {
                other == self
            }
        }

        impl PartialOrd<$scalar> for $res {
            fn partial_cmp(&self, other: &$scalar) -> Option<Ordering> {
                Some(self.cmp(&<$res>::from(*other)))
            }
        }

        impl PartialOrd<$res> for $scalar {
            fn partial_cmp(&self, other: &$res) -> Option<Ordering> {
                other.partial_cmp(self).map(Ordering::reverse)
            }
        }
    )*};
}

compare_scalars!(BigInt: i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);
compare_scalars!(Rational: i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

macro_rules! fold_impls {
    ($res:ty, $zero:expr, $one:expr) => {
        impl Sum for $res {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold($zero, |acc, value| &acc + &value)
            }
        }

        impl<'a> Sum<&'a $res> for $res {
            fn sum<I: Iterator<Item = &'a $res>>(iter: I) -> Self {
                iter.fold($zero, |acc, value| &acc + value)
            }
        }

        impl Product for $res {
            fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold($one, |acc, value| &acc * &value)
            }
        }

        impl<'a> Product<&'a $res> for $res {
            fn product<I: Iterator<Item = &'a $res>>(iter: I) -> Self {
                iter.fold($one, |acc, value| &acc * value)
            }
        }
    };
}

fold_impls!(BigInt, BigInt::zero(), BigInt::one());
fold_impls!(Rational, Rational::zero(), Rational::one());
