// ============================================================================
// Numeric Module
// Arbitrary-precision decimal values and precision contexts
// ============================================================================
//
// This module provides:
// - BigDecimal: unbounded decimal value (unscaled integer x 10^-scale)
// - MathContext / RoundingMode: significant-digit precision and rounding
// - NumericError: error types for arithmetic and parsing
//
// Design principles:
// - Exact add/sub/mul, precision-bounded div and round
// - All fallible operations return Result (no panics)
// - Range membership is tested with booleans before conversion
// - Immutable values: every operation returns a new value

mod big_decimal;
mod context;
mod errors;
mod parse;

#[cfg(test)]
mod proptests;

pub use big_decimal::BigDecimal;
pub use context::{MathContext, RoundingMode};
pub use errors::{NumericError, NumericResult};
pub use parse::SPLIT_THRESHOLD;

pub(crate) use big_decimal::pow10;
