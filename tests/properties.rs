use bigrat::{BigInt, Endianness, Rational, TieBreaking};
use proptest::prelude::*;

/// Integers spanning several limbs, built from a sign and little-endian bytes
fn arb_bigint() -> impl Strategy<Value = BigInt> {
    (any::<bool>(), prop::collection::vec(any::<u8>(), 0..40)).prop_map(|(negative, bytes)| {
        let mut magnitude = bytes;
        magnitude.push(0);
        let value = BigInt::from_bytes(&magnitude, Endianness::Little);
        if negative {
            -value
        } else {
            value
        }
    })
}

fn arb_nonzero_bigint() -> impl Strategy<Value = BigInt> {
    arb_bigint().prop_filter("divisor must be non-zero", |value| !value.is_zero())
}

fn arb_rational() -> impl Strategy<Value = Rational> {
    (arb_bigint(), arb_nonzero_bigint())
        .prop_map(|(numerator, denominator)| Rational::new(numerator, denominator).unwrap())
}

fn arb_small_rational() -> impl Strategy<Value = Rational> {
    (-1_000_000_i64..1_000_000, 1_i64..1000).prop_map(|(numerator, denominator)| {
        Rational::new(BigInt::from(numerator), BigInt::from(denominator)).unwrap()
    })
}

fn arb_tie_breaking() -> impl Strategy<Value = TieBreaking> {
    prop::sample::select(TieBreaking::ALL.to_vec())
}

fn arb_endianness() -> impl Strategy<Value = Endianness> {
    prop::sample::select(Endianness::ALL.to_vec())
}

proptest! {
    #[test]
    fn normalization_holds(numerator in arb_bigint(), denominator in arb_nonzero_bigint()) {
        let value = Rational::new(numerator.clone(), denominator.clone()).unwrap();
        prop_assert!(value.denominator().is_positive());
        prop_assert!(value.numerator().gcd(value.denominator()).is_one());
        if numerator.is_zero() {
            prop_assert_eq!(value.into_parts(), (BigInt::zero(), BigInt::one()));
        } else {
            // n/d and the reduced pair describe the same value
            prop_assert_eq!(
                &numerator * value.denominator(),
                value.numerator() * &denominator
            );
        }
    }

    #[test]
    fn division_identity(a in arb_bigint(), b in arb_nonzero_bigint()) {
        let (quotient, remainder) = a.checked_div_rem(&b).unwrap();
        prop_assert_eq!(&(&quotient * &b) + &remainder, a.clone());
        prop_assert!(remainder.abs() < b.abs());
        prop_assert!(remainder.is_zero() || remainder.is_negative() == b.is_negative());
        prop_assert_eq!(&a / &b, quotient);
        prop_assert_eq!(&a % &b, remainder);
    }

    #[test]
    fn division_matches_primitive_floor(a in any::<i64>(), b in any::<i64>()) {
        prop_assume!(b != 0);
        let (x, y) = (BigInt::from(a), BigInt::from(b));
        let (a, b) = (i128::from(a), i128::from(b));
        // Euclidean and floor quotients differ by one for negative divisors
        let quotient = a.div_euclid(b) - i128::from(b < 0 && a.rem_euclid(b) != 0);
        prop_assert_eq!(&x / &y, BigInt::from(quotient));
        prop_assert_eq!(&x % &y, BigInt::from(a - b * quotient));
    }

    #[test]
    fn bytes_round_trip(value in arb_bigint(), endianness in arb_endianness()) {
        let bytes = value.to_bytes(endianness);
        prop_assert_eq!(BigInt::from_bytes(&bytes, endianness), value.clone());
        // Minimal: dropping a byte would change the value
        if bytes.len() > 1 {
            let shorter = match endianness {
                Endianness::Big => &bytes[1..],
                Endianness::Little => &bytes[..bytes.len() - 1],
            };
            prop_assert_ne!(BigInt::from_bytes(shorter, endianness), value);
        }
    }

    #[test]
    fn hash_respects_equality(a in arb_rational(), factor in arb_nonzero_bigint()) {
        let (numerator, denominator) = a.clone().into_parts();
        let scaled = Rational::new(&numerator * &factor, &denominator * &factor).unwrap();
        prop_assert_eq!(&scaled, &a);
        prop_assert_eq!(scaled.hash_value(), a.hash_value());
    }

    #[test]
    fn integer_hash_matches_rational(n in arb_bigint()) {
        prop_assert_eq!(n.hash_value(), Rational::from(n.clone()).hash_value());
    }

    #[test]
    fn small_integer_hash_is_identity(n in -1_000_000_000_i64..1_000_000_000) {
        let expected = if n == -1 { -2 } else { n };
        prop_assert_eq!(BigInt::from(n).hash_value(), expected);
    }

    #[test]
    fn rounding_bounds(value in arb_rational(), tie_breaking in arb_tie_breaking()) {
        let rounded = value.round(tie_breaking);
        let (floor, ceil) = (value.floor(), value.ceil());
        prop_assert!(floor <= rounded && rounded <= ceil);
        prop_assert!(rounded == floor || rounded == ceil);
        prop_assert!(Rational::from(floor.clone()) <= value && value <= Rational::from(ceil.clone()));
        prop_assert!(&ceil - &floor <= BigInt::one());
    }

    #[test]
    fn ordering_is_total(a in arb_rational(), b in arb_rational()) {
        let relations = [a < b, a == b, a > b];
        prop_assert_eq!(relations.iter().filter(|&&holds| holds).count(), 1);
    }

    #[test]
    fn ordering_agrees_with_floats(a in arb_small_rational(), b in arb_small_rational()) {
        let (x, y) = (a.to_f64().unwrap(), b.to_f64().unwrap());
        if x < y {
            prop_assert!(a < b);
        } else if x > y {
            prop_assert!(a > b);
        }
    }

    #[test]
    fn float_round_trip_is_exact(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        let value = Rational::try_from(x).unwrap();
        prop_assert_eq!(value.to_f64().unwrap(), x);
    }

    #[test]
    fn parse_display_round_trip(value in arb_bigint(), base in 2_u32..=36) {
        let text = value.to_str_radix(base).unwrap();
        prop_assert_eq!(BigInt::parse(&text, base).unwrap(), value.clone());
        prop_assert_eq!(value.to_string().parse::<BigInt>().unwrap(), value);
    }

    #[test]
    fn bitwise_identities(a in arb_bigint(), b in arb_bigint()) {
        prop_assert_eq!(!&a, &(-&a) - &BigInt::one());
        prop_assert_eq!(&(&a & &b) + &(&a | &b), &a + &b);
        prop_assert_eq!(&a ^ &b, &(&a | &b) - &(&a & &b));
    }

    #[test]
    fn shifts_are_floor_scaling(a in arb_bigint(), shift in 0_usize..200) {
        let scale = BigInt::one() << shift;
        prop_assert_eq!(&a << shift, &a * &scale);
        prop_assert_eq!(&a >> shift, &a / &scale);
    }

    #[test]
    fn rational_field_laws(a in arb_rational(), b in arb_rational()) {
        prop_assert_eq!(&(&a + &b) - &b, a.clone());
        if !b.is_zero() {
            prop_assert_eq!(&(&a * &b) / &b, a.clone());
            let (quotient, remainder) = a.checked_div_rem_floor(&b).unwrap();
            prop_assert_eq!(&(&Rational::from(quotient) * &b) + &remainder, a);
        }
    }
}
