use thiserror::Error;

/// Coarse classification shared by every error in the crate.
///
/// Callers that only need to tell "bad input text" apart from "divided by
/// zero" can match on this instead of the concrete variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed literal, unsupported base or invalid enumeration value.
    Parse,
    /// Zero divisor, zero denominator or inverse of zero.
    DivisionByZero,
    /// Operand outside the mathematical domain of the operation.
    Domain,
    /// Value does not fit the requested representation.
    Range,
}

/// Errors that can occur while parsing integer literals or enumeration values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty literal: no digits found")]
    Empty,

    #[error("Invalid base: {0} is outside the range [2, 36] and is not 0")]
    InvalidBase(u32),

    #[error("Invalid digit: {digit:?} is not valid in base {base}")]
    InvalidDigit { digit: char, base: u32 },

    #[error("Invalid literal: starts with a digit separator")]
    LeadingSeparator,

    #[error("Invalid literal: ends with a digit separator")]
    TrailingSeparator,

    #[error("Invalid literal: consecutive digit separators")]
    ConsecutiveSeparators,

    #[error("Invalid literal: leading zeros in a non-zero literal with inferred base")]
    RedundantLeadingZeros,

    #[error("{value} is not a valid {name}")]
    InvalidEnumValue { name: &'static str, value: i64 },
}

/// Errors raised by arithmetic operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Negative shift count")]
    NegativeShift,

    #[error("Shift count is too large")]
    ShiftTooLarge,

    #[error("Not enough memory for the result")]
    OutOfMemory,

    #[error("Modulus should not be zero")]
    ZeroModulus,

    #[error("Base is not invertible for the given modulus")]
    NotInvertible,
}

/// Errors raised when converting to or from fixed-width numeric types
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Cannot convert infinity to an exact value")]
    Infinity,

    #[error("Cannot convert NaN to an exact value")]
    NaN,

    #[error("Value is too large to convert to {target}")]
    Overflow { target: &'static str },
}

/// Any error produced by this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl ParseError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Parse
    }
}

impl ArithmeticError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::NegativeShift | Self::ZeroModulus | Self::NotInvertible => ErrorKind::Domain,
            Self::ShiftTooLarge | Self::OutOfMemory => ErrorKind::Range,
        }
    }
}

impl ConversionError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Range
    }
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Arithmetic(e) => e.kind(),
            Self::Conversion(e) => e.kind(),
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for arithmetic operations
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Result type for numeric conversions
pub type ConversionResult<T> = Result<T, ConversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinguishable() {
        assert_eq!(ParseError::Empty.kind(), ErrorKind::Parse);
        assert_eq!(
            ArithmeticError::DivisionByZero.kind(),
            ErrorKind::DivisionByZero
        );
        assert_eq!(ArithmeticError::NegativeShift.kind(), ErrorKind::Domain);
        assert_eq!(ArithmeticError::NotInvertible.kind(), ErrorKind::Domain);
        assert_eq!(ArithmeticError::OutOfMemory.kind(), ErrorKind::Range);
        assert_eq!(ConversionError::NaN.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_umbrella_preserves_kind() {
        let err: Error = ArithmeticError::ZeroModulus.into();
        assert_eq!(err.kind(), ErrorKind::Domain);
        let err: Error = ParseError::InvalidBase(37).into();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(
            err.to_string(),
            "Invalid base: 37 is outside the range [2, 36] and is not 0"
        );
    }
}
