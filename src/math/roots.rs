// ============================================================================
// Roots
// Square root and n-th root by Newton-Raphson with adaptive precision
// ============================================================================

use super::engine::BigMath;
use crate::numeric::{BigDecimal, MathContext, NumericError, NumericResult};

/// Digits a double-precision seed is trusted for.
pub(crate) const EXPECTED_INITIAL_PRECISION: u32 = 15;

/// Starting precision of the n-th root iteration.
const ROOT_INITIAL_PRECISION: u32 = 12;

/// `10^(exponent(reference) - precision - 1)`: the convergence tolerance
/// relative to the magnitude of the current iterate.
pub(crate) fn relative_tolerance(reference: &BigDecimal, precision: u32) -> BigDecimal {
    let exponent = if reference.is_zero() {
        0
    } else {
        reference.exponent()
    };
    BigDecimal::new(1.into(), i64::from(precision) + 1 - exponent)
}

/// Double-precision estimate of `sqrt(x)` taken from the mantissa, so the
/// seed is good even when `x` itself is outside the f64 range.
fn sqrt_seed(x: &BigDecimal) -> Option<BigDecimal> {
    let exponent = x.exponent();
    let mut mantissa = x.mantissa();
    if exponent.rem_euclid(2) == 1 {
        mantissa = mantissa.move_point_right(1);
    }
    let estimate = mantissa.to_f64().sqrt();
    if !estimate.is_finite() || estimate <= 0.0 {
        return None;
    }
    let seed = BigDecimal::from_f64(estimate).ok()?;
    Some(seed.move_point_right(exponent.div_euclid(2)))
}

/// Square root of `x` rounded to `mc`.
///
/// Newton's iteration `r' = (x/r + r) / 2` with the working precision doubled
/// each step up to `p + 6`.
pub(crate) fn sqrt(x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
    match x.signum() {
        0 => return Ok(BigDecimal::zero()),
        -1 => return Err(NumericError::DomainError("sqrt(x) for x < 0")),
        _ => {},
    }

    let max_precision = mc.precision() + 6;
    let (mut result, mut adaptive_precision) = match sqrt_seed(x) {
        Some(seed) => (seed, EXPECTED_INITIAL_PRECISION),
        None => (x.mul_ctx(&BigDecimal::half(), mc), 1),
    };

    if adaptive_precision < max_precision {
        // Early exit if x is a square number
        if &result * &result == *x {
            return Ok(result.round(mc));
        }

        let half = BigDecimal::half();
        let mut iterations = 0u32;
        loop {
            let last = result;
            adaptive_precision = (adaptive_precision * 2).min(max_precision);
            let working = mc.with_precision(adaptive_precision);
            result = (x.div(&last, &working)? + &last).mul_ctx(&half, &working);
            iterations += 1;

            if adaptive_precision >= max_precision
                && (&result - &last).abs() <= relative_tolerance(&result, mc.precision())
            {
                break;
            }
        }
        tracing::trace!(iterations, precision = mc.precision(), "sqrt converged");
    }

    Ok(result.round(mc))
}

impl BigMath {
    /// Square root of `x` rounded to `mc`.
    ///
    /// # Errors
    /// Returns `DomainError` for `x < 0`.
    pub fn sqrt(&self, x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        sqrt(x, mc)
    }

    /// The `n`-th root of `x` rounded to `mc`.
    ///
    /// # Errors
    /// Returns `DomainError` for `n <= 0` or `x < 0`.
    pub fn root(&self, x: &BigDecimal, n: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        if n.signum() <= 0 {
            return Err(NumericError::DomainError("root(x, n) for n <= 0"));
        }
        match x.signum() {
            0 => return Ok(BigDecimal::zero()),
            -1 => return Err(NumericError::DomainError("root(x, n) for x < 0")),
            _ => {},
        }

        if x.is_f64_value() && n.is_f64_value() {
            let estimate = x.to_f64().powf(1.0 / n.to_f64());
            if estimate.is_finite() && estimate > 0.0 {
                let initial = BigDecimal::from_f64(estimate)?;
                return self.root_newton(x, n, initial, mc);
            }
        }

        self.root_by_pow(x, n, mc)
    }

    fn root_by_pow(&self, x: &BigDecimal, n: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        let working = mc.with_extra_digits(6);
        let inverse = BigDecimal::one().div(n, &working)?;
        self.pow(x, &inverse, mc)
    }

    /// `r' = r + (x / r^(n-1) - r) / n` with the working precision tripled
    /// each step up to `2p`.
    fn root_newton(
        &self,
        x: &BigDecimal,
        n: &BigDecimal,
        initial: BigDecimal,
        mc: &MathContext,
    ) -> NumericResult<BigDecimal> {
        if *n <= BigDecimal::one() {
            return self.root_by_pow(x, n, mc);
        }

        let max_precision = mc.precision() * 2;
        let n_minus_one = n - &BigDecimal::one();
        let mut result = initial;
        let mut adaptive_precision = ROOT_INITIAL_PRECISION;

        if adaptive_precision < max_precision {
            loop {
                adaptive_precision = (adaptive_precision * 3).min(max_precision);
                let working = mc.with_precision(adaptive_precision);
                let power = self.pow(&result, &n_minus_one, &working)?;
                let step = (x.div(&power, &working)? - &result).div(n, &working)?;
                result = result + &step;

                if adaptive_precision >= max_precision
                    && step.abs() <= relative_tolerance(&result, mc.precision())
                {
                    break;
                }
            }
        }

        Ok(result.round(mc))
    }
}
