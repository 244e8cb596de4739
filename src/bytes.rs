//! Minimal signed two's-complement byte serialization.
//!
//! This is the only binary layout defined for [`BigInt`]: the shortest byte
//! string (at least one byte) holding the value as a signed two's-complement
//! integer, in the caller's byte order.

use crate::big_int::BigInt;
use crate::digits::{self, Digit};
use crate::enums::Endianness;

/// Negate a little-endian two's-complement byte string in place
fn negate_bytes(bytes: &mut [u8]) {
    let mut carry = true;
    for byte in bytes {
        let (sum, overflow) = (!*byte).overflowing_add(u8::from(carry));
        *byte = sum;
        carry = overflow;
    }
}

impl BigInt {
    /// Encode as the minimal signed two's-complement byte string
    #[must_use]
    pub fn to_bytes(&self, endianness: Endianness) -> Vec<u8> {
        // -2^(8k-1) fits in k bytes, so negative values need the bit length of |x| - 1
        let significant_bits = if self.negative {
            digits::bit_length(&digits::sub(&self.magnitude, &[1]))
        } else {
            self.bit_length()
        };
        let length = significant_bits / 8 + 1;

        let mut bytes: Vec<u8> = self
            .magnitude
            .iter()
            .flat_map(|digit| digit.to_le_bytes())
            .collect();
        bytes.resize(length, 0);
        if self.negative {
            negate_bytes(&mut bytes);
        }
        if endianness == Endianness::Big {
            bytes.reverse();
        }
        bytes
    }

    /// Decode a signed two's-complement byte string of any length
    ///
    /// An empty slice decodes to zero.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], endianness: Endianness) -> Self {
        let mut bytes = bytes.to_vec();
        if endianness == Endianness::Big {
            bytes.reverse();
        }
        let negative = bytes.last().is_some_and(|&top| top >= 0x80);
        if negative {
            negate_bytes(&mut bytes);
        }
        let magnitude = bytes
            .chunks(4)
            .map(|chunk| {
                let mut limb = [0u8; 4];
                limb[..chunk.len()].copy_from_slice(chunk);
                Digit::from_le_bytes(limb)
            })
            .collect();
        Self::from_parts(negative, magnitude)
    }
}
