// ============================================================================
// Exponential
// Taylor series with argument reduction by 256 and integral-part splitting
// ============================================================================

use super::engine::BigMath;
use super::power::pow_i64;
use crate::numeric::{BigDecimal, MathContext, NumericError, NumericResult};

/// The series argument is divided by this and the sum raised back to it.
const REDUCTION_FACTOR: i64 = 256;

/// Guard digits for the integral-part reduction, on top of the digits of the
/// integral part itself.
const INTEGRAL_GUARD_DIGITS: u32 = 10;

/// Decimal digits of `|n|`.
pub(crate) fn integer_digits(n: i64) -> u32 {
    n.unsigned_abs().checked_ilog10().map_or(1, |log| log + 1)
}

/// `e^x` rounded to `mc`.
///
/// Arguments with an integral part `i != 0` are rewritten as
/// `e^x = (e^z)^i` with `z = 1 + frac(x)/i`, so the series only ever sees
/// arguments in `(0, 2)`.
///
/// # Errors
/// Returns `Overflow` if the integral part of `x` does not fit in `i64`.
pub(crate) fn exp(x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
    if x.is_zero() {
        return Ok(BigDecimal::one());
    }

    let integral = x.integral_part();
    if integral.is_zero() {
        return exp_taylor(x, mc);
    }

    let power = integral.to_i64_exact().ok_or(NumericError::Overflow)?;
    let fractional = x - &integral;
    // Raising to the i-th power multiplies the relative error by |i|
    let working = mc.with_extra_digits(INTEGRAL_GUARD_DIGITS + integer_digits(power));
    let z = BigDecimal::one() + fractional.div(&integral, &working)?;
    let t = exp_taylor(&z, &working)?;
    Ok(pow_i64(&t, power, &working)?.round(mc))
}

fn exp_taylor(x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
    let working = mc.with_extra_digits(6);
    let reduced = x.div(&BigDecimal::from(REDUCTION_FACTOR), &working)?;
    let sum = exp_series(&reduced, &working)?;
    Ok(pow_i64(&sum, REDUCTION_FACTOR, &working)?.round(mc))
}

/// `sum(x^n / n!)` until a term drops to `10^-(p+1)`.
fn exp_series(x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
    let acceptable_error = BigDecimal::new(1.into(), i64::from(mc.precision()) + 1);
    let mut sum = BigDecimal::one();
    let mut term = BigDecimal::one();
    let mut n = 1u64;
    loop {
        term = term.mul_ctx(x, mc).div(&BigDecimal::from(n), mc)?;
        sum = sum + &term;
        if term.abs() <= acceptable_error {
            break;
        }
        n += 1;
    }
    tracing::trace!(terms = n, precision = mc.precision(), "exp series converged");
    Ok(sum.round(mc))
}

impl BigMath {
    /// `e^x` rounded to `mc`.
    ///
    /// # Errors
    /// Returns `Overflow` if the integral part of `x` does not fit in `i64`.
    pub fn exp(&self, x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        exp(x, mc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn ctx(precision: u32) -> MathContext {
        MathContext::with_digits(precision).unwrap()
    }

    /// `d.ddd… × 10^exponent`, for exponents the literal parser rejects.
    fn sci(digits: &str, exponent: i64) -> BigDecimal {
        BigDecimal::new(digits.parse().unwrap(), digits.len() as i64 - 1 - exponent)
    }

    #[test]
    fn test_exp_zero_is_one() {
        assert_eq!(exp(&BigDecimal::zero(), &ctx(5)).unwrap(), BigDecimal::one());
    }

    #[test]
    fn test_exp_one() {
        let result = exp(&BigDecimal::one(), &ctx(40)).unwrap();
        assert_eq!(result.to_string(), "2.718281828459045235360287471352662497757");
    }

    #[test]
    fn test_exp_fraction() {
        let result = exp(&dec("0.5"), &ctx(20)).unwrap();
        assert_eq!(result.to_string(), "1.6487212707001281468");
    }

    #[test]
    fn test_exp_negative() {
        let result = exp(&dec("-1"), &ctx(20)).unwrap();
        assert_eq!(result.to_string(), "0.36787944117144232160");

        let result = exp(&dec("-2.5"), &ctx(15)).unwrap();
        assert_eq!(result.to_string(), "0.0820849986238988");
    }

    #[test]
    fn test_exp_integral_and_fractional() {
        let result = exp(&dec("10.5"), &ctx(20)).unwrap();
        assert_eq!(result.to_string(), "36315.502674246637739");
    }

    #[test]
    fn test_exp_large_integral_part_keeps_precision() {
        let cases = [
            ("1000000.25", "38947256637824735883", 434_294),
            ("-2500000.75", "29479560805860847963", -1_085_737),
            ("1e12", "17857787515925593489", 434_294_481_903),
            ("123456789012345.5", "45901462843795842982", 53_616_602_221_555),
            ("-1e15", "14871297819043784805", -434_294_481_903_252),
        ];
        for (x, digits, exponent) in cases {
            assert_eq!(exp(&dec(x), &ctx(20)).unwrap(), sci(digits, exponent), "exp({})", x);
        }
    }

    #[test]
    fn test_integer_digits() {
        assert_eq!(integer_digits(0), 1);
        assert_eq!(integer_digits(-9), 1);
        assert_eq!(integer_digits(1_000_000), 7);
        assert_eq!(integer_digits(i64::MIN), 19);
    }

    #[test]
    fn test_exp_huge_argument_overflows() {
        assert_eq!(exp(&dec("1e30"), &ctx(10)), Err(NumericError::Overflow));
    }
}
