//! Magnitude arithmetic on little-endian `u32` limb sequences.
//!
//! Every function here works on unsigned magnitudes and returns trimmed
//! vectors (no most-significant zero limbs); an empty vector is zero.
//! Signs are handled one layer up, in [`BigInt`](crate::BigInt).

use std::cmp::Ordering;

pub type Digit = u32;
type DoubleDigit = u64;

pub const DIGIT_BITS: usize = Digit::BITS as usize;

/// Drop most-significant zero limbs
pub fn trim(digits: &mut Vec<Digit>) {
    while digits.last() == Some(&0) {
        digits.pop();
    }
}

#[must_use]
pub fn compare(a: &[Digit], b: &[Digit]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

#[must_use]
pub fn add(a: &[Digit], b: &[Digit]) -> Vec<Digit> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut result = Vec::with_capacity(long.len() + 1);
    let mut carry: DoubleDigit = 0;
    for (i, &digit) in long.iter().enumerate() {
        let other = short.get(i).copied().unwrap_or(0);
        let sum = DoubleDigit::from(digit) + DoubleDigit::from(other) + carry;
        #[allow(clippy::cast_possible_truncation)]
        result.push(sum as Digit);
        carry = sum >> DIGIT_BITS;
    }
    if carry != 0 {
        #[allow(clippy::cast_possible_truncation)]
        result.push(carry as Digit);
    }
    result
}

/// `a - b`, requires `a >= b`
#[must_use]
pub fn sub(a: &[Digit], b: &[Digit]) -> Vec<Digit> {
    debug_assert!(compare(a, b) != Ordering::Less);
    let mut result = Vec::with_capacity(a.len());
    let mut borrow = false;
    for (i, &digit) in a.iter().enumerate() {
        let other = b.get(i).copied().unwrap_or(0);
        let (partial, first_overflow) = digit.overflowing_sub(other);
        let (difference, second_overflow) = partial.overflowing_sub(Digit::from(borrow));
        result.push(difference);
        borrow = first_overflow || second_overflow;
    }
    debug_assert!(!borrow);
    trim(&mut result);
    result
}

/// Schoolbook multiplication
#[must_use]
pub fn mul(a: &[Digit], b: &[Digit]) -> Vec<Digit> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut result = vec![0; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry: DoubleDigit = 0;
        for (j, &y) in b.iter().enumerate() {
            // (2^32 - 1)^2 + 2 * (2^32 - 1) == 2^64 - 1, so this never overflows
            let product = DoubleDigit::from(x) * DoubleDigit::from(y)
                + DoubleDigit::from(result[i + j])
                + carry;
            #[allow(clippy::cast_possible_truncation)]
            {
                result[i + j] = product as Digit;
            }
            carry = product >> DIGIT_BITS;
        }
        #[allow(clippy::cast_possible_truncation)]
        {
            result[i + b.len()] = carry as Digit;
        }
    }
    trim(&mut result);
    result
}

/// In-place `digits * factor + addend`
pub fn mul_add_digit(digits: &mut Vec<Digit>, factor: Digit, addend: Digit) {
    let mut carry = DoubleDigit::from(addend);
    for digit in digits.iter_mut() {
        let product = DoubleDigit::from(*digit) * DoubleDigit::from(factor) + carry;
        #[allow(clippy::cast_possible_truncation)]
        {
            *digit = product as Digit;
        }
        carry = product >> DIGIT_BITS;
    }
    if carry != 0 {
        #[allow(clippy::cast_possible_truncation)]
        digits.push(carry as Digit);
    }
    trim(digits);
}

/// Division by a single non-zero limb, returns `(quotient, remainder)`
#[must_use]
pub fn div_rem_digit(digits: &[Digit], divisor: Digit) -> (Vec<Digit>, Digit) {
    debug_assert!(divisor != 0);
    let divisor = DoubleDigit::from(divisor);
    let mut quotient = vec![0; digits.len()];
    let mut remainder: DoubleDigit = 0;
    for i in (0..digits.len()).rev() {
        let current = (remainder << DIGIT_BITS) | DoubleDigit::from(digits[i]);
        #[allow(clippy::cast_possible_truncation)]
        {
            quotient[i] = (current / divisor) as Digit;
        }
        remainder = current % divisor;
    }
    trim(&mut quotient);
    #[allow(clippy::cast_possible_truncation)]
    let remainder = remainder as Digit;
    (quotient, remainder)
}

/// Shift left by less than one limb; the result is one limb longer than the
/// input and may end with a zero limb.
fn shl_within_digit(digits: &[Digit], shift: usize) -> Vec<Digit> {
    debug_assert!(shift < DIGIT_BITS);
    let mut result = Vec::with_capacity(digits.len() + 1);
    if shift == 0 {
        result.extend_from_slice(digits);
        result.push(0);
        return result;
    }
    let mut carry: Digit = 0;
    for &digit in digits {
        result.push((digit << shift) | carry);
        carry = digit >> (DIGIT_BITS - shift);
    }
    result.push(carry);
    result
}

/// Shift right by less than one limb (untrimmed)
fn shr_within_digit(digits: &[Digit], shift: usize) -> Vec<Digit> {
    debug_assert!(shift < DIGIT_BITS);
    if shift == 0 {
        return digits.to_vec();
    }
    (0..digits.len())
        .map(|i| {
            let high = digits
                .get(i + 1)
                .map_or(0, |&next| next << (DIGIT_BITS - shift));
            (digits[i] >> shift) | high
        })
        .collect()
}

/// Multi-limb long division (Knuth, TAOCP vol. 2, algorithm D).
///
/// Returns `(quotient, remainder)`; `divisor` must be non-empty.
#[must_use]
pub fn div_rem(dividend: &[Digit], divisor: &[Digit]) -> (Vec<Digit>, Vec<Digit>) {
    debug_assert!(!divisor.is_empty());
    if compare(dividend, divisor) == Ordering::Less {
        return (Vec::new(), dividend.to_vec());
    }
    if divisor.len() == 1 {
        let (quotient, remainder) = div_rem_digit(dividend, divisor[0]);
        let remainder = if remainder == 0 {
            Vec::new()
        } else {
            vec![remainder]
        };
        return (quotient, remainder);
    }

    // Normalize so the top divisor limb has its high bit set
    let shift = divisor[divisor.len() - 1].leading_zeros() as usize;
    let mut v = shl_within_digit(divisor, shift);
    v.pop();
    let mut u = shl_within_digit(dividend, shift);

    let n = v.len();
    let m = u.len() - n - 1;
    let base: DoubleDigit = 1 << DIGIT_BITS;
    let v_top = DoubleDigit::from(v[n - 1]);
    let v_next = DoubleDigit::from(v[n - 2]);
    let mut quotient = vec![0; m + 1];

    for j in (0..=m).rev() {
        let numerator = (DoubleDigit::from(u[j + n]) << DIGIT_BITS) | DoubleDigit::from(u[j + n - 1]);
        let mut q_hat = (numerator / v_top).min(base - 1);
        let mut r_hat = numerator - q_hat * v_top;
        while r_hat < base
            && q_hat * v_next > ((r_hat << DIGIT_BITS) | DoubleDigit::from(u[j + n - 2]))
        {
            q_hat -= 1;
            r_hat += v_top;
        }

        // u[j..=j + n] -= q_hat * v
        let mut borrow: i64 = 0;
        let mut carry: DoubleDigit = 0;
        for i in 0..n {
            let product = q_hat * DoubleDigit::from(v[i]) + carry;
            carry = product >> DIGIT_BITS;
            let difference = i64::from(u[i + j]) - i64::from(product as Digit) + borrow;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                u[i + j] = difference as Digit;
            }
            borrow = difference >> DIGIT_BITS;
        }
        #[allow(clippy::cast_possible_wrap)]
        let mut top = i64::from(u[j + n]) - carry as i64 + borrow;

        while top < 0 {
            // q_hat was too large: add the divisor back
            q_hat -= 1;
            let mut carry: DoubleDigit = 0;
            for i in 0..n {
                let sum = DoubleDigit::from(u[i + j]) + DoubleDigit::from(v[i]) + carry;
                #[allow(clippy::cast_possible_truncation)]
                {
                    u[i + j] = sum as Digit;
                }
                carry = sum >> DIGIT_BITS;
            }
            #[allow(clippy::cast_possible_wrap)]
            {
                top += carry as i64;
            }
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            u[j + n] = top as Digit;
        }
        #[allow(clippy::cast_possible_truncation)]
        {
            quotient[j] = q_hat as Digit;
        }
    }

    trim(&mut quotient);
    let mut remainder = shr_within_digit(&u[..n], shift);
    trim(&mut remainder);
    (quotient, remainder)
}

/// Fallible [`shl`], `None` if the result cannot be allocated
pub fn try_shl(digits: &[Digit], bits: usize) -> Option<Vec<Digit>> {
    if digits.is_empty() {
        return Some(Vec::new());
    }
    let zeros = bits / DIGIT_BITS;
    let len = zeros.checked_add(digits.len())?.checked_add(1)?;
    if len > isize::MAX as usize / std::mem::size_of::<Digit>() {
        return None;
    }
    let mut result = Vec::new();
    result.try_reserve_exact(len).ok()?;
    result.resize(zeros, 0);
    result.extend(shl_within_digit(digits, bits % DIGIT_BITS));
    trim(&mut result);
    Some(result)
}

#[must_use]
pub fn shl(digits: &[Digit], bits: usize) -> Vec<Digit> {
    if digits.is_empty() {
        return Vec::new();
    }
    let mut result = vec![0; bits / DIGIT_BITS];
    result.extend(shl_within_digit(digits, bits % DIGIT_BITS));
    trim(&mut result);
    result
}

#[must_use]
pub fn shr(digits: &[Digit], bits: usize) -> Vec<Digit> {
    let skipped = bits / DIGIT_BITS;
    if skipped >= digits.len() {
        return Vec::new();
    }
    let mut result = shr_within_digit(&digits[skipped..], bits % DIGIT_BITS);
    trim(&mut result);
    result
}

/// Number of significant bits, `0` for zero
#[must_use]
pub fn bit_length(digits: &[Digit]) -> usize {
    digits.last().map_or(0, |&top| {
        (digits.len() - 1) * DIGIT_BITS + (DIGIT_BITS - top.leading_zeros() as usize)
    })
}

/// Largest power of `base` fitting in a limb, and its exponent
#[must_use]
pub fn chunk_base(base: u32) -> (Digit, usize) {
    let mut power: Digit = base;
    let mut count = 1;
    while let Some(next) = power.checked_mul(base) {
        power = next;
        count += 1;
    }
    (power, count)
}

/// Little-endian magnitude to big-endian digit values in `base`
#[must_use]
pub fn to_radix(digits: &[Digit], base: u32) -> Vec<u8> {
    debug_assert!((2..=36).contains(&base));
    if digits.is_empty() {
        return vec![0];
    }
    let (chunk, chunk_len) = chunk_base(base);
    let mut result = Vec::new();
    let mut rest = digits.to_vec();
    while !rest.is_empty() {
        let (quotient, mut remainder) = div_rem_digit(&rest, chunk);
        rest = quotient;
        for _ in 0..chunk_len {
            if rest.is_empty() && remainder == 0 {
                break;
            }
            #[allow(clippy::cast_possible_truncation)]
            result.push((remainder % base) as u8);
            remainder /= base;
        }
    }
    result.reverse();
    result
}

/// Big-endian digit values in `base` to a little-endian magnitude
#[must_use]
pub fn from_radix(values: &[u8], base: u32) -> Vec<Digit> {
    let (_, chunk_len) = chunk_base(base);
    let mut result = Vec::with_capacity(values.len() / chunk_len + 1);
    for group in values.chunks(chunk_len) {
        let mut factor: Digit = 1;
        let mut addend: Digit = 0;
        for &value in group {
            factor *= base;
            addend = addend * base + Digit::from(value);
        }
        mul_add_digit(&mut result, factor, addend);
    }
    result
}
