// ============================================================================
// Factorial and Gamma
// Exact integer factorials and Spouge's approximation for real arguments
// ============================================================================

use super::engine::BigMath;
use crate::numeric::{BigDecimal, MathContext, NumericError, NumericResult};
use num_bigint::BigInt;
use num_traits::One;
use std::sync::LazyLock;

/// Number of exact factorials precomputed at first use (`0!` through `99!`).
pub const FACTORIAL_TABLE_SIZE: usize = 100;

static FACTORIAL_TABLE: LazyLock<Vec<BigInt>> = LazyLock::new(|| {
    let mut table = Vec::with_capacity(FACTORIAL_TABLE_SIZE);
    let mut value = BigInt::one();
    table.push(value.clone());
    for i in 1..FACTORIAL_TABLE_SIZE as u32 {
        value *= i;
        table.push(value.clone());
    }
    table
});

/// Exact `n!`.
///
/// Values past the table are built from a balanced product tree over
/// `100..=n`, so no intermediate is much larger than it needs to be.
pub fn factorial_exact(n: u32) -> BigInt {
    let table = &*FACTORIAL_TABLE;
    if let Some(value) = table.get(n as usize) {
        return value.clone();
    }
    let last = FACTORIAL_TABLE_SIZE as u32 - 1;
    &table[last as usize] * factorial_recursion(last + 1, n)
}

fn factorial_recursion(n1: u32, n2: u32) -> BigInt {
    let threshold = if n1 > 200 { 80 } else { 150 };
    if n2 - n1 < threshold {
        return factorial_loop(n1, n2);
    }
    let mid = n1 + (n2 - n1) / 2;
    factorial_recursion(mid + 1, n2) * factorial_recursion(n1, mid)
}

/// Product of `n1..=n2`, collecting factors in an `i64` until the next one
/// could overflow it.
fn factorial_loop(n1: u32, n2: u32) -> BigInt {
    let limit = i64::MAX / i64::from(n2.max(1));
    let mut accumulator: i64 = 1;
    let mut result = BigInt::one();
    for n in n1..=n2 {
        if accumulator <= limit {
            accumulator *= i64::from(n);
        } else {
            result *= accumulator;
            accumulator = i64::from(n);
        }
    }
    result * accumulator
}

impl BigMath {
    /// `x!` rounded to `mc`.
    ///
    /// Integers are exact before rounding; other values use Spouge's
    /// approximation with `a = 1.3 * p`.
    ///
    /// # Errors
    /// Returns `DomainError` for negative integers.
    pub fn factorial(&self, x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        if x.is_i32_value() {
            let n = x
                .to_i64_exact()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or(NumericError::DomainError("factorial(x) for negative integer x"))?;
            return Ok(BigDecimal::from(factorial_exact(n)).round(mc));
        }

        let working = mc.doubled();
        let a = mc.precision() * 13 / 10;
        let coefficients = self.spouge_coefficients(a)?;

        let mut factor = coefficients[0].clone();
        for (k, coefficient) in coefficients.iter().enumerate().skip(1) {
            let shifted = x + &BigDecimal::from(k as u64);
            factor = factor + coefficient.div(&shifted, &working)?;
        }

        let big_a = BigDecimal::from(a);
        let base = x + &big_a;
        let exponent = x + &BigDecimal::half();
        let mut result = self.pow(&base, &exponent, &working)?;
        result = result.mul_ctx(&self.exp(&-(x + &big_a), &working)?, &working);
        result = result.mul_ctx(&factor, &working);

        Ok(result.round(mc))
    }

    /// `Γ(x) = (x - 1)!` rounded to `mc`.
    ///
    /// # Errors
    /// Returns `DomainError` for zero and negative integers.
    pub fn gamma(&self, x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        self.factorial(&(x - &BigDecimal::one()), mc)
    }

    /// Spouge coefficients `c_0..c_{a-1}` computed at `1.5 * a` digits and
    /// shared through the cache.
    pub(crate) fn spouge_coefficients(&self, a: u32) -> NumericResult<std::sync::Arc<[BigDecimal]>> {
        self.cache.spouge_coefficients(a, |a| {
            let mc = MathContext::with_digits((a * 15 / 10).max(1))?;
            let mut coefficients = Vec::with_capacity(a as usize);
            coefficients.push(self.sqrt(&self.pi(&mc)?.mul_ctx(&BigDecimal::two(), &mc), &mc)?);

            let mut negative = false;
            for k in 1..a {
                let delta = BigDecimal::from(a - k);
                let exponent = BigDecimal::from(k) - BigDecimal::half();
                let mut ck = self.pow(&delta, &exponent, &mc)?;
                ck = ck.mul_ctx(&self.exp(&delta, &mc)?, &mc);
                ck = ck.div(&BigDecimal::from(factorial_exact(k - 1)), &mc)?;
                if negative {
                    ck = -ck;
                }
                coefficients.push(ck);
                negative = !negative;
            }
            Ok(coefficients)
        })
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

    #[test]
    fn test_factorial_table() {
        assert_eq!(factorial_exact(0), BigInt::one());
        assert_eq!(factorial_exact(1), BigInt::one());
        assert_eq!(factorial_exact(5), BigInt::from(120));
        assert_eq!(factorial_exact(20), BigInt::from(2_432_902_008_176_640_000u64));
    }

    #[test]
    fn test_factorial_beyond_table_matches_iterative_product() {
        for n in [100u32, 101, 250, 400] {
            let expected = (1..=n).fold(BigInt::one(), |acc, i| acc * i);
            assert_eq!(factorial_exact(n), expected, "n = {}", n);
        }
    }

    #[test]
    fn test_factorial_of_integer_decimal() {
        let math = BigMath::new();
        let result = math.factorial(&dec("20"), &ctx(30)).unwrap();
        assert_eq!(result, dec("2432902008176640000"));

        let result = math.factorial(&dec("20"), &ctx(5)).unwrap();
        assert_eq!(result, dec("2.4329e18"));
    }

    #[test]
    fn test_factorial_negative_integer() {
        let math = BigMath::new();
        assert!(matches!(
            math.factorial(&dec("-3"), &ctx(10)),
            Err(NumericError::DomainError(_))
        ));
        assert!(math.gamma(&dec("0"), &ctx(10)).is_err());
    }

    #[test]
    fn test_factorial_half() {
        // (1/2)! = sqrt(pi) / 2
        let math = BigMath::new();
        let result = math.factorial(&dec("0.5"), &ctx(15)).unwrap();
        assert_eq!(result.to_string(), "0.886226925452758");
    }

    #[test]
    fn test_gamma() {
        let math = BigMath::new();
        assert_eq!(math.gamma(&dec("5"), &ctx(10)).unwrap(), dec("24"));

        let result = math.gamma(&dec("0.5"), &ctx(15)).unwrap();
        assert_eq!(result.to_string(), "1.77245385090552");

        let result = math.gamma(&dec("1.5"), &ctx(15)).unwrap();
        assert_eq!(result.to_string(), "0.886226925452758");
    }

    #[test]
    fn test_spouge_coefficients_are_cached() {
        let math = BigMath::new();
        let first = math.spouge_coefficients(13).unwrap();
        let second = math.spouge_coefficients(13).unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 13);
        assert_eq!(math.cache().spouge_sets(), 1);
    }

    #[test]
    fn factorial_recurrence() {
        fn prop(n: u8) -> bool {
            let n = u32::from(n);
            factorial_exact(n + 1) == factorial_exact(n) * (n + 1)
        }
        quickcheck::quickcheck(prop as fn(u8) -> bool);
    }
}
