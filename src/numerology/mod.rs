// ============================================================================
// Numerology Module
// Single-digit numeral derived from the digits of pi and e
// ============================================================================
//
// For an input i the reducer takes pi (or a fixed literal) and e to i + 1
// significant digits, sums their fraction digits as integers, counts prime
// 2- and 3-digit windows of the sum and reduces the product of the counts to
// a digit in 1..=9.

mod config;
mod primes;
mod reducer;

pub use config::{NumerologyConfig, DEFAULT_FIXED_DIGITS};
pub use primes::{count_prime_windows, digital_root, is_prime, reduce_to_numeral};
pub use reducer::{evaluate_numerology, NumerologyBreakdown, NumerologyMode, NumerologyReducer};
