// ============================================================================
// Numerology Reducer
// Reduces the sum of pi and e fraction digits to a single numeral
// ============================================================================

use super::config::NumerologyConfig;
use super::primes::{count_prime_windows, reduce_to_numeral};
use crate::math::BigMath;
use crate::numeric::{MathContext, NumericError, NumericResult};
use num_bigint::BigUint;
use num_traits::Zero;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Source of the first digit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumerologyMode {
    /// Fraction digits of pi
    #[default]
    PiDigits,
    /// The configured literal digit string
    FixedDigits,
}

/// Every intermediate of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumerologyBreakdown {
    pub input: u32,
    pub mode: NumerologyMode,
    /// Significant digits pi and e were taken to (`input + 1`)
    pub precision: u32,
    pub leading_digits: String,
    /// e's fraction digits after the last-digit correction
    pub e_digits: String,
    pub sum: String,
    pub two_digit_primes: usize,
    pub three_digit_primes: usize,
    pub product: u64,
    /// Final result in `1..=9`
    pub numeral: u8,
}

/// Computes the numeral for an input in `0..=999`.
///
/// The input range is the caller's responsibility; see
/// [`NumerologyConfig::is_valid_input`].
#[derive(Debug, Clone)]
pub struct NumerologyReducer {
    math: BigMath,
    config: NumerologyConfig,
}

impl NumerologyReducer {
    pub fn new(math: BigMath, config: NumerologyConfig) -> Self {
        Self { math, config }
    }

    #[inline]
    pub fn math(&self) -> &BigMath {
        &self.math
    }

    #[inline]
    pub fn config(&self) -> &NumerologyConfig {
        &self.config
    }

    /// The numeral (`1..=9`) for `input`.
    ///
    /// # Errors
    /// Returns `Overflow` for `input == u32::MAX` and `InvalidFormat` if the
    /// configured fixed digits are not a digit string.
    pub fn evaluate(&self, input: u32, mode: NumerologyMode) -> NumericResult<u8> {
        self.evaluate_detailed(input, mode).map(|breakdown| breakdown.numeral)
    }

    /// Like [`evaluate`](Self::evaluate) but returns every intermediate.
    pub fn evaluate_detailed(&self, input: u32, mode: NumerologyMode) -> NumericResult<NumerologyBreakdown> {
        let precision = input.checked_add(1).ok_or(NumericError::Overflow)?;
        let mc = MathContext::new(precision, self.config.rounding)?;

        let leading_digits = match mode {
            NumerologyMode::PiDigits => self.math.pi(&mc)?.fraction_digits(),
            NumerologyMode::FixedDigits => self.config.fixed_digits.clone(),
        };
        let e_digits = correct_last_digit(self.math.e(&mc)?.fraction_digits());

        let sum = parse_digits(&leading_digits)? + parse_digits(&e_digits)?;
        let sum = sum.to_string();

        let two_digit_primes = count_prime_windows(&sum, 2);
        let three_digit_primes = count_prime_windows(&sum, 3);
        let product = (two_digit_primes as u64) * (three_digit_primes as u64);
        let numeral = reduce_to_numeral(product);

        let breakdown = NumerologyBreakdown {
            input,
            mode,
            precision,
            leading_digits,
            e_digits,
            sum,
            two_digit_primes,
            three_digit_primes,
            product,
            numeral,
        };
        tracing::debug!("Numerology breakdown: {:?}", breakdown);

        Ok(breakdown)
    }
}

/// Evaluate with the default configuration over `math`'s cache.
///
/// # Example
/// ```
/// use numerology_engine::math::BigMath;
/// use numerology_engine::numerology::{evaluate_numerology, NumerologyMode};
///
/// let math = BigMath::new();
/// let numeral = evaluate_numerology(&math, 10, NumerologyMode::FixedDigits).unwrap();
/// assert_eq!(numeral, 6);
/// ```
pub fn evaluate_numerology(math: &BigMath, input: u32, mode: NumerologyMode) -> NumericResult<u8> {
    NumerologyReducer::new(math.clone(), NumerologyConfig::default()).evaluate(input, mode)
}

/// A last digit of 5 or more is decremented by one; nothing else changes.
fn correct_last_digit(mut digits: String) -> String {
    if let Some(last) = digits.pop() {
        let corrected = match last.to_digit(10) {
            Some(d) if d >= 5 => char::from_digit(d - 1, 10).unwrap_or(last),
            _ => last,
        };
        digits.push(corrected);
    }
    digits
}

/// Digits as an integer; the empty string is zero.
fn parse_digits(digits: &str) -> NumericResult<BigUint> {
    if digits.is_empty() {
        return Ok(BigUint::zero());
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NumericError::InvalidFormat("digit string"));
    }
    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(NumericError::InvalidFormat("digit string"))
}
