// ============================================================================
// Numerology Configuration
// ============================================================================

use crate::numeric::RoundingMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Digit string used in place of pi's fraction digits by
/// [`NumerologyMode::FixedDigits`](super::NumerologyMode::FixedDigits).
pub const DEFAULT_FIXED_DIGITS: &str = "1814666323";

/// Settings for a [`NumerologyReducer`](super::NumerologyReducer)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumerologyConfig {
    /// Literal fraction digits summed with e's in fixed-digits mode
    pub fixed_digits: String,

    /// Rounding used when pi and e are taken to `input + 1` digits
    pub rounding: RoundingMode,
}

impl NumerologyConfig {
    /// Largest input the presentation layer accepts. The reducer itself does
    /// not re-check it.
    pub const MAX_INPUT: u32 = 999;

    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set the fixed digit string
    pub fn with_fixed_digits(mut self, digits: impl Into<String>) -> Self {
        self.fixed_digits = digits.into();
        self
    }

    /// Builder method: Set the rounding mode for pi and e
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Whether `input` is inside the accepted `0..=MAX_INPUT` range.
    #[inline]
    pub fn is_valid_input(input: i64) -> bool {
        (0..=i64::from(Self::MAX_INPUT)).contains(&input)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fixed_digits.is_empty() {
            return Err("Fixed digits cannot be empty".to_string());
        }
        if !self.fixed_digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!(
                "Fixed digits must be decimal digits only: {:?}",
                self.fixed_digits
            ));
        }
        Ok(())
    }
}

impl Default for NumerologyConfig {
    fn default() -> Self {
        Self {
            fixed_digits: DEFAULT_FIXED_DIGITS.to_string(),
            rounding: RoundingMode::HalfUp,
        }
    }
}
