// ============================================================================
// Power
// Integer exponents by repeated squaring, real exponents via exp(y * log x)
// ============================================================================

use super::engine::BigMath;
use super::exp::integer_digits;
use crate::numeric::{BigDecimal, MathContext, NumericError, NumericResult};

/// Guard digits for repeated squaring.
const SQUARING_GUARD_DIGITS: u32 = 10;

/// Guard digits for the decimal halving loop of huge integral exponents.
const HALVING_GUARD_DIGITS: u32 = 30;

/// Guard digits for `exp(y * log x)`, on top of the integer digits of the
/// exponent.
const EXP_LOG_GUARD_DIGITS: u32 = 6;

/// Digits used to estimate the magnitude of `y * log x`.
const ESTIMATE_DIGITS: u32 = 10;

/// Largest decimal exponent an intermediate power may reach. Keeps the scale
/// of every product well inside `i64`.
const MAX_EXPONENT: u64 = (i64::MAX / 4) as u64;

/// `x^n` for a machine-integer exponent, rounded to `mc`.
///
/// Negative exponents take the reciprocal of the positive power.
///
/// # Errors
/// Returns `DivisionByZero` for `0^n` with `n < 0` and `Overflow` when the
/// result's decimal exponent does not fit.
pub(crate) fn pow_i64(x: &BigDecimal, n: i64, mc: &MathContext) -> NumericResult<BigDecimal> {
    let working = mc.with_extra_digits(SQUARING_GUARD_DIGITS);
    if n < 0 {
        let positive = pow_u64(x, n.unsigned_abs(), &working)?;
        return Ok(positive.reciprocal(&working)?.round(mc));
    }
    Ok(pow_u64(x, n as u64, &working)?.round(mc))
}

fn pow_u64(x: &BigDecimal, mut n: u64, working: &MathContext) -> NumericResult<BigDecimal> {
    let mut result = BigDecimal::one();
    let mut base = x.clone();
    while n > 0 {
        if n & 1 == 1 {
            result = checked_mul(&result, &base, working)?;
        }
        n >>= 1;
        if n > 0 {
            base = checked_mul(&base, &base, working)?;
        }
    }
    Ok(result)
}

/// `lhs * rhs` rounded to `mc`, or `Overflow` if the product's decimal
/// exponent would leave `±MAX_EXPONENT`.
fn checked_mul(lhs: &BigDecimal, rhs: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
    if lhs.is_zero() || rhs.is_zero() {
        return Ok(BigDecimal::zero());
    }
    let exponent = lhs.exponent().saturating_add(rhs.exponent()).saturating_add(1);
    if exponent.unsigned_abs() > MAX_EXPONENT {
        return Err(NumericError::Overflow);
    }
    Ok(lhs.mul_ctx(rhs, mc))
}

impl BigMath {
    /// `x^y` rounded to `mc`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for `0^y` with `y < 0`, `DomainError` for a
    /// negative base with a fractional exponent and `Overflow` when the
    /// result's decimal exponent does not fit.
    pub fn pow(&self, x: &BigDecimal, y: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        if x.is_zero() {
            return match y.signum() {
                0 => Ok(BigDecimal::one()),
                1 => Ok(BigDecimal::zero()),
                _ => Err(NumericError::DivisionByZero),
            };
        }

        if let Some(n) = y.to_i64_exact() {
            return pow_i64(x, n, mc);
        }

        if y.fractional_part().is_zero() {
            return self.pow_integer(x, y, mc);
        }

        // x^y = exp(y * log(x)). Every integer digit of the exponent costs one
        // digit of the result, so the log is taken that much wider.
        let estimate_mc = mc.with_precision(ESTIMATE_DIGITS);
        let estimate = y.mul_ctx(&self.log(x, &estimate_mc)?, &estimate_mc);
        let extra = match estimate.integral_part().to_i64_exact() {
            Some(integral) => EXP_LOG_GUARD_DIGITS + integer_digits(integral),
            None => return Err(NumericError::Overflow),
        };
        let working = mc.with_extra_digits(extra);
        let exponent = y.mul_ctx(&self.log(x, &working)?, &working);
        Ok(self.exp(&exponent, &working)?.round(mc))
    }

    /// `x^n` for a machine-integer exponent, rounded to `mc`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for `0^n` with `n < 0` and `Overflow` when the
    /// result's decimal exponent does not fit.
    #[inline]
    pub fn pow_i64(&self, x: &BigDecimal, n: i64, mc: &MathContext) -> NumericResult<BigDecimal> {
        pow_i64(x, n, mc)
    }

    /// Repeated squaring for integral exponents beyond the `i64` range. The
    /// exponent is halved by decimal division at a precision wide enough to
    /// keep every intermediate exponent exact.
    fn pow_integer(&self, x: &BigDecimal, y: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        if y.is_negative() {
            let positive = self.pow_integer(x, &-y, mc)?;
            return positive.reciprocal(mc);
        }

        let digits = u32::try_from(y.exponent() + 1).map_err(|_| NumericError::Overflow)?;
        let working = mc.with_precision(mc.precision().max(digits) + HALVING_GUARD_DIGITS);
        let two = BigDecimal::two();

        let mut exponent = y.clone();
        let mut base = x.clone();
        let mut result = BigDecimal::one();
        while exponent.signum() > 0 {
            let mut half = exponent.div(&two, &working)?;
            if !half.fractional_part().is_zero() {
                result = checked_mul(&result, &base, &working)?;
                exponent = exponent - BigDecimal::one();
                half = exponent.div(&two, &working)?;
            }
            if half.signum() > 0 {
                base = checked_mul(&base, &base, &working)?;
            }
            exponent = half;
        }

        Ok(result.round(mc))
    }
}
