//! Closed parameter sets for byte serialization and rounding.

use crate::error::{ParseError, ParseResult};
use std::fmt;

/// Byte order used by [`BigInt::to_bytes`](crate::BigInt::to_bytes) and
/// [`BigInt::from_bytes`](crate::BigInt::from_bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endianness {
    /// Most significant byte first
    Big,
    /// Least significant byte first
    Little,
}

/// Policy for values lying exactly halfway between two integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TieBreaking {
    AwayFromZero,
    ToEven,
    ToOdd,
    TowardZero,
}

impl Endianness {
    pub const ALL: [Self; 2] = [Self::Big, Self::Little];

    /// Stable integer identifier of the variant
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Big => 0,
            Self::Little => 1,
        }
    }

    /// Look a variant up by its [`value`](Self::value)
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidEnumValue`] for values outside `{0, 1}`.
    pub fn from_value(value: i64) -> ParseResult<Self> {
        match value {
            0 => Ok(Self::Big),
            1 => Ok(Self::Little),
            _ => Err(ParseError::InvalidEnumValue {
                name: "Endianness",
                value,
            }),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Big => "BIG",
            Self::Little => "LITTLE",
        }
    }
}

impl TieBreaking {
    pub const ALL: [Self; 4] = [
        Self::AwayFromZero,
        Self::ToEven,
        Self::ToOdd,
        Self::TowardZero,
    ];

    /// Stable integer identifier of the variant
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::AwayFromZero => 0,
            Self::ToEven => 1,
            Self::ToOdd => 2,
            Self::TowardZero => 3,
        }
    }

    /// Look a variant up by its [`value`](Self::value)
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidEnumValue`] for values outside `0..=3`.
    pub fn from_value(value: i64) -> ParseResult<Self> {
        match value {
            0 => Ok(Self::AwayFromZero),
            1 => Ok(Self::ToEven),
            2 => Ok(Self::ToOdd),
            3 => Ok(Self::TowardZero),
            _ => Err(ParseError::InvalidEnumValue {
                name: "TieBreaking",
                value,
            }),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::AwayFromZero => "AWAY_FROM_ZERO",
            Self::ToEven => "TO_EVEN",
            Self::ToOdd => "TO_ODD",
            Self::TowardZero => "TOWARD_ZERO",
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Endianness.{}", self.name())
    }
}

impl fmt::Display for TieBreaking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TieBreaking.{}", self.name())
    }
}

impl TryFrom<i64> for Endianness {
    type Error = ParseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl TryFrom<u8> for Endianness {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(i64::from(value))
    }
}

impl From<Endianness> for u8 {
    fn from(value: Endianness) -> Self {
        value.value()
    }
}

impl TryFrom<i64> for TieBreaking {
    type Error = ParseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl TryFrom<u8> for TieBreaking {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(i64::from(value))
    }
}

impl From<TieBreaking> for u8 {
    fn from(value: TieBreaking) -> Self {
        value.value()
    }
}

// Persisted as the integer value so the encoding survives variant renames.
#[cfg(feature = "serde")]
mod serde_impls {
    use super::{Endianness, TieBreaking};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Endianness {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_u8(self.value())
        }
    }

    impl<'de> Deserialize<'de> for Endianness {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let value = i64::deserialize(deserializer)?;
            Self::from_value(value).map_err(D::Error::custom)
        }
    }

    impl Serialize for TieBreaking {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_u8(self.value())
        }
    }

    impl<'de> Deserialize<'de> for TieBreaking {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let value = i64::deserialize(deserializer)?;
            Self::from_value(value).map_err(D::Error::custom)
        }
    }
}
