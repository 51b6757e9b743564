// ============================================================================
// Pi and E
// Chudnovsky series for pi, exp(1) for e, both served through the cache
// ============================================================================

use super::cache::Constant;
use super::engine::BigMath;
use super::exp::exp;
use super::roots::sqrt;
use crate::numeric::{BigDecimal, MathContext, NumericResult};

/// `640320^3 / 24`
const CHUDNOVSKY_DIVISOR: u64 = 10_939_058_860_032_000;

/// Each Chudnovsky term contributes roughly this many digits.
const DIGITS_PER_TERM: u32 = 14;

/// Pi by the Chudnovsky series with `ceil((p + 10) / 14)` terms.
///
/// `pi = 426880 * sqrt(10005) / (13591409 * sum(a_k) + 545140134 * sum(k * a_k))`
/// where `a_k = a_{k-1} * -(6k-5)(2k-1)(6k-1) / (k^3 * 640320^3 / 24)`.
pub(crate) fn pi_chudnovsky(mc: &MathContext) -> NumericResult<BigDecimal> {
    let working = mc.with_extra_digits(10);
    let divisor = BigDecimal::from(CHUDNOVSKY_DIVISOR);

    let mut sum_a = BigDecimal::one();
    let mut sum_b = BigDecimal::zero();
    let mut a = BigDecimal::one();

    // -(6k - 5), 2k - 1 and 6k - 1 at k = 0
    let mut term1: i64 = 5;
    let mut term2: i64 = -1;
    let mut term3: i64 = -1;

    let iterations = (working.precision() + DIGITS_PER_TERM - 1) / DIGITS_PER_TERM;
    for k in 1..=u64::from(iterations) {
        term1 -= 6;
        term2 += 2;
        term3 += 6;
        let dividend = BigDecimal::from(term1 * term2 * term3);
        let k_cubed = BigDecimal::from(k.pow(3));
        let k_divisor = k_cubed.mul_ctx(&divisor, &working);

        a = (&a * &dividend).div(&k_divisor, &working)?;
        let b = BigDecimal::from(k).mul_ctx(&a, &working);
        sum_a = sum_a + &a;
        sum_b = sum_b + &b;
    }
    tracing::trace!(iterations, precision = mc.precision(), "chudnovsky series summed");

    let factor = BigDecimal::from(426_880u32) * sqrt(&BigDecimal::from(10_005u32), &working)?;
    let denominator = BigDecimal::from(13_591_409u32)
        .mul_ctx(&sum_a, &working)
        .add_ctx(&BigDecimal::from(545_140_134u32).mul_ctx(&sum_b, &working), &working);
    Ok(factor.div(&denominator, &working)?.round(mc))
}

impl BigMath {
    /// Pi rounded to `mc`, served from the cache.
    pub fn pi(&self, mc: &MathContext) -> NumericResult<BigDecimal> {
        self.cache.get(Constant::Pi, mc, pi_chudnovsky)
    }

    /// Euler's number rounded to `mc`, served from the cache.
    pub fn e(&self, mc: &MathContext) -> NumericResult<BigDecimal> {
        self.cache.get(Constant::E, mc, |working| exp(&BigDecimal::one(), working))
    }
}
