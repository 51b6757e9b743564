// ============================================================================
// Logarithms
// Newton refinement on a residual near 1 after two/three decomposition
// ============================================================================

use super::cache::Constant;
use super::engine::BigMath;
use super::exp::exp;
use super::roots::EXPECTED_INITIAL_PRECISION;
use crate::numeric::{BigDecimal, MathContext, NumericError, NumericResult};

/// Upper bounds (exclusive) of the value ranges between 0.1 and 10, with the
/// powers of two and three that move each range close to 1.
///
/// For example `[0.2, 0.3)` maps to `2^-2`: the value is multiplied by 4 and
/// `2 * log 2` is subtracted from the result.
const TWO_THREE_TABLE: [(f64, i32, i32); 13] = [
    (0.115, 0, -2),
    (0.14, -3, 0),
    (0.2, -1, -1),
    (0.3, -2, 0),
    (0.42, 0, -1),
    (0.7, -1, 0),
    (1.4, 0, 0),
    (2.5, 1, 0),
    (3.5, 0, 1),
    (5.0, 2, 0),
    (7.0, 1, 1),
    (8.5, 3, 0),
    (10.0, 0, 2),
];

/// Powers of two and three whose product is closest to `value`.
fn two_three_factors(value: f64) -> (i32, i32) {
    if value < 0.01 {
        return (0, 0);
    }
    if value < 0.1 {
        let mut value = value;
        let mut twos = 0;
        while value < 0.6 {
            value *= 2.0;
            twos -= 1;
        }
        return (twos, 0);
    }
    if let Some(&(_, twos, threes)) = TWO_THREE_TABLE.iter().find(|(bound, _, _)| value < *bound) {
        return (twos, threes);
    }

    let mut value = value;
    let mut twos = 0;
    while value > 1.4 {
        value /= 2.0;
        twos += 1;
    }
    (twos, 0)
}

impl BigMath {
    /// Natural logarithm of `x` rounded to `mc`.
    ///
    /// # Errors
    /// Returns `DomainError` for `x <= 0`.
    pub fn log(&self, x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        if x.signum() <= 0 {
            return Err(NumericError::DomainError("log(x) for x <= 0"));
        }
        if *x == BigDecimal::one() {
            return Ok(BigDecimal::zero());
        }

        let result = match x.cmp(&BigDecimal::ten()) {
            std::cmp::Ordering::Equal => self.log_ten(mc)?,
            std::cmp::Ordering::Greater => self.log_using_exponent(x, mc)?,
            std::cmp::Ordering::Less => self.log_using_two_three(x, mc)?,
        };
        Ok(result.round(mc))
    }

    /// Base-2 logarithm of `x` rounded to `mc`.
    ///
    /// # Errors
    /// Returns `DomainError` for `x <= 0`.
    pub fn log2(&self, x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        let working = mc.with_extra_digits(4);
        let result = self.log(x, &working)?.div(&self.log_two(&working)?, &working)?;
        Ok(result.round(mc))
    }

    /// Base-10 logarithm of `x` rounded to `mc`.
    ///
    /// # Errors
    /// Returns `DomainError` for `x <= 0`.
    pub fn log10(&self, x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        let working = mc.with_extra_digits(2);
        let result = self.log(x, &working)?.div(&self.log_ten(&working)?, &working)?;
        Ok(result.round(mc))
    }

    pub(crate) fn log_two(&self, mc: &MathContext) -> NumericResult<BigDecimal> {
        self.cache
            .get(Constant::Log2, mc, |working| log_using_newton(&BigDecimal::two(), working))
    }

    pub(crate) fn log_three(&self, mc: &MathContext) -> NumericResult<BigDecimal> {
        self.cache
            .get(Constant::Log3, mc, |working| log_using_newton(&BigDecimal::from(3), working))
    }

    pub(crate) fn log_ten(&self, mc: &MathContext) -> NumericResult<BigDecimal> {
        self.cache
            .get(Constant::Log10, mc, |working| log_using_newton(&BigDecimal::ten(), working))
    }

    /// `log(x) = log(mantissa) + exponent * log(10)`.
    fn log_using_exponent(&self, x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        let working = mc.with_extra_digits(4);
        let exponent = x.exponent();
        let mut result = self.log_using_two_three(&x.mantissa(), &working)?;
        if exponent != 0 {
            let log_ten = self.log_ten(&mc.doubled())?;
            result = result + BigDecimal::from(exponent).mul_ctx(&log_ten, &working);
        }
        Ok(result)
    }

    /// Rescale `x` by powers of two and three into a band around 1, then
    /// refine the residual with Newton's method.
    fn log_using_two_three(&self, x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        let (twos, threes) = two_three_factors(x.to_f64());
        if twos == 0 && threes == 0 {
            return log_using_newton(x, mc);
        }

        let working = mc.with_extra_digits(4);
        let constants_mc = mc.doubled();
        let mut corrected = x.clone();
        let mut result = BigDecimal::zero();

        if twos != 0 {
            let power = pow_of(2, twos.unsigned_abs());
            let correction = BigDecimal::from(twos).mul_ctx(&self.log_two(&constants_mc)?, &working);
            corrected = scale_by(&corrected, &power, twos > 0, &working)?;
            result = result + correction;
        }
        if threes != 0 {
            let power = pow_of(3, threes.unsigned_abs());
            let correction = BigDecimal::from(threes).mul_ctx(&self.log_three(&constants_mc)?, &working);
            corrected = scale_by(&corrected, &power, threes > 0, &working)?;
            result = result + correction;
        }

        let residual = log_using_newton(&corrected, &working)?;
        Ok(result.add_ctx(&residual, &working))
    }
}

fn pow_of(base: u64, exponent: u32) -> BigDecimal {
    BigDecimal::from(base.pow(exponent))
}

fn scale_by(
    value: &BigDecimal,
    power: &BigDecimal,
    divide: bool,
    mc: &MathContext,
) -> NumericResult<BigDecimal> {
    if divide {
        value.div(power, mc)
    } else {
        Ok(value.mul_ctx(power, mc))
    }
}

/// Newton's iteration `y' = y + 2(x - e^y)/(x + e^y)` with the working
/// precision tripled each step up to `p + 20`.
pub(crate) fn log_using_newton(x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
    let max_precision = mc.precision() + 20;
    let acceptable_error = BigDecimal::new(1.into(), i64::from(mc.precision()) + 1);

    let (mut result, mut adaptive_precision) = match log_seed(x) {
        Some(seed) => (seed, EXPECTED_INITIAL_PRECISION),
        None => (x.div(&BigDecimal::two(), mc)?, 1),
    };

    let two = BigDecimal::two();
    loop {
        adaptive_precision = (adaptive_precision * 3).min(max_precision);
        let working = mc.with_precision(adaptive_precision);
        let exp_y = exp(&result, &working)?;
        let step = (&two * (x - &exp_y)).div(&(x + &exp_y), &working)?;
        result = result + &step;

        if adaptive_precision >= max_precision && step.abs() <= acceptable_error {
            break;
        }
    }

    Ok(result)
}

/// Double-precision `ln(x)` from the mantissa and decimal exponent, so values
/// outside the f64 range still get a good seed.
fn log_seed(x: &BigDecimal) -> Option<BigDecimal> {
    let mantissa = x.mantissa().to_f64();
    if mantissa <= 0.0 || !mantissa.is_finite() {
        return None;
    }
    let estimate = mantissa.ln() + x.exponent() as f64 * std::f64::consts::LN_10;
    if !estimate.is_finite() {
        return None;
    }
    BigDecimal::from_f64(estimate).ok()
}
