// ============================================================================
// Precision Context
// Significant-digit precision and rounding policy for bounded operations
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rounding policy applied when a result is truncated to a precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Away from zero
    Up,
    /// Toward zero (truncation)
    Down,
    /// Toward positive infinity
    Ceiling,
    /// Toward negative infinity
    Floor,
    /// Nearest neighbour, ties away from zero
    #[default]
    HalfUp,
    /// Nearest neighbour, ties toward zero
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour
    HalfEven,
}

/// Number of significant digits plus the rounding policy.
///
/// A context always has at least one significant digit; unlimited precision
/// cannot be expressed and is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MathContext {
    precision: u32,
    rounding: RoundingMode,
}

impl MathContext {
    /// Create a context with the given number of significant digits.
    ///
    /// # Errors
    /// Returns `UnsupportedConfiguration` if `precision` is zero.
    pub fn new(precision: u32, rounding: RoundingMode) -> NumericResult<Self> {
        if precision == 0 {
            return Err(NumericError::UnsupportedConfiguration);
        }
        Ok(Self {
            precision,
            rounding,
        })
    }

    /// Create a context with `HalfUp` rounding.
    ///
    /// # Errors
    /// Returns `UnsupportedConfiguration` if `precision` is zero.
    pub fn with_digits(precision: u32) -> NumericResult<Self> {
        Self::new(precision, RoundingMode::HalfUp)
    }

    #[inline]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    #[inline]
    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Same rounding, `extra` more digits. Used for guard digits.
    #[inline]
    pub fn with_extra_digits(&self, extra: u32) -> Self {
        Self {
            precision: self.precision.saturating_add(extra),
            rounding: self.rounding,
        }
    }

    /// Same rounding, a different precision (clamped to at least one digit).
    #[inline]
    pub fn with_precision(&self, precision: u32) -> Self {
        Self {
            precision: precision.max(1),
            rounding: self.rounding,
        }
    }

    /// Same rounding, twice the precision.
    #[inline]
    pub fn doubled(&self) -> Self {
        self.with_precision(self.precision.saturating_mul(2))
    }
}

impl fmt::Display for MathContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "precision={} rounding={:?}", self.precision, self.rounding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_precision_rejected() {
        assert_eq!(
            MathContext::new(0, RoundingMode::HalfUp),
            Err(NumericError::UnsupportedConfiguration)
        );
    }

    #[test]
    fn test_derived_contexts() {
        let mc = MathContext::new(10, RoundingMode::HalfEven).unwrap();
        assert_eq!(mc.with_extra_digits(6).precision(), 16);
        assert_eq!(mc.doubled().precision(), 20);
        assert_eq!(mc.with_precision(0).precision(), 1);
        assert_eq!(mc.with_extra_digits(6).rounding(), RoundingMode::HalfEven);
    }

    #[test]
    fn test_default_rounding() {
        assert_eq!(RoundingMode::default(), RoundingMode::HalfUp);
        let mc = MathContext::with_digits(5).unwrap();
        assert_eq!(mc.rounding(), RoundingMode::HalfUp);
        assert_eq!(mc.to_string(), "precision=5 rounding=HalfUp");
    }
}
