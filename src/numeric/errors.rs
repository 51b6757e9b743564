// ============================================================================
// Numeric Errors
// Error types for arbitrary-precision decimal operations
// ============================================================================

use std::fmt;

/// Errors that can occur during arbitrary-precision arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Argument outside the mathematical domain of the function
    DomainError(&'static str),
    /// Decimal literal could not be parsed
    InvalidFormat(&'static str),
    /// Precision context with zero significant digits (unlimited precision)
    UnsupportedConfiguration,
    /// Attempted division by zero
    DivisionByZero,
    /// Value does not fit the machine integer the algorithm needs
    Overflow,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DomainError(reason) => write!(f, "domain error: {}", reason),
            NumericError::InvalidFormat(reason) => write!(f, "invalid format: {}", reason),
            NumericError::UnsupportedConfiguration => write!(
                f,
                "unsupported configuration: unlimited precision is not supported"
            ),
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: value exceeded machine integer range")
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
