// ============================================================================
// Arbitrary-Precision Decimal
// Unbounded decimal value with precision-bounded rounding and division
// ============================================================================

use super::context::{MathContext, RoundingMode};
use super::errors::{NumericError, NumericResult};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

/// Arbitrary-precision decimal number.
///
/// Internally stores `unscaled × 10^-scale` where `unscaled` is an unbounded
/// integer. A negative scale multiplies by a power of ten.
///
/// Addition, subtraction and multiplication are exact. Division and the
/// `*_ctx` variants round to a [`MathContext`].
///
/// Equality and ordering are numeric: `2.0 == 2.00`.
///
/// # Example
/// ```
/// use numerology_engine::numeric::{BigDecimal, MathContext};
///
/// let third = BigDecimal::one()
///     .div(&BigDecimal::from(3), &MathContext::with_digits(5).unwrap())
///     .unwrap();
/// assert_eq!(third.to_string(), "0.33333");
/// ```
#[derive(Clone)]
pub struct BigDecimal {
    unscaled: BigInt,
    scale: i64,
}

/// Largest finite f64 as a decimal: 1.7976931348623157e308
const F64_MAX_MANTISSA: u64 = 17_976_931_348_623_157;
const F64_MAX_SCALE: i64 = -292;

/// Decimal digits used when converting to f64.
const F64_CONVERSION_DIGITS: u32 = 17;

/// Compute 10^n as a big integer.
pub(crate) fn pow10(n: u64) -> BigInt {
    BigInt::from(10u32).pow(u32::try_from(n).unwrap_or(u32::MAX))
}

/// Number of decimal digits of a magnitude (1 for zero).
fn digit_count(n: &BigUint) -> u64 {
    if let Some(small) = n.to_u64() {
        return small.checked_ilog10().map_or(1, |log| u64::from(log) + 1);
    }
    // 2^(bits-1) <= n < 2^bits bounds the digit count within one
    let bits = n.bits();
    let estimate = ((bits - 1) as f64 * std::f64::consts::LOG10_2) as u64 + 1;
    let lower = pow10(estimate - 1).magnitude().clone();
    if *n < lower {
        estimate - 1
    } else if *n >= lower * 10u32 {
        estimate + 1
    } else {
        estimate
    }
}

/// Divide by a positive power of ten and round according to `mode`.
fn divide_and_round(value: &BigInt, divisor: &BigInt, mode: RoundingMode) -> BigInt {
    let (quotient, remainder) = value.div_rem(divisor);
    if should_round_away_from_zero(mode, &quotient, &remainder, divisor) {
        if value.is_negative() {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

/// Whether a truncated quotient must be incremented away from zero for the
/// discarded remainder. `remainder` carries the sign of the dividend.
fn should_round_away_from_zero(
    mode: RoundingMode,
    quotient: &BigInt,
    remainder: &BigInt,
    divisor: &BigInt,
) -> bool {
    if remainder.is_zero() {
        return false;
    }

    match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => remainder.is_positive(),
        RoundingMode::Floor => remainder.is_negative(),
        RoundingMode::HalfUp => (remainder.abs() * 2) >= *divisor,
        RoundingMode::HalfDown => (remainder.abs() * 2) > *divisor,
        RoundingMode::HalfEven => {
            let doubled: BigInt = remainder.abs() * 2;
            match doubled.cmp(divisor) {
                Ordering::Greater => true,
                Ordering::Equal => quotient.is_odd(),
                Ordering::Less => false,
            }
        },
    }
}

impl BigDecimal {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from an unscaled integer and a scale: `unscaled × 10^-scale`.
    #[inline]
    pub fn new(unscaled: BigInt, scale: i64) -> Self {
        Self { unscaled, scale }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    #[inline]
    pub fn one() -> Self {
        Self::new(BigInt::one(), 0)
    }

    #[inline]
    pub fn two() -> Self {
        Self::from(2)
    }

    /// 0.5
    #[inline]
    pub fn half() -> Self {
        Self::new(BigInt::from(5), 1)
    }

    #[inline]
    pub fn ten() -> Self {
        Self::from(10)
    }

    /// Create from a double using its shortest round-trip decimal form.
    ///
    /// # Errors
    /// Returns `InvalidFormat` for NaN or infinite values.
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidFormat("non-finite floating-point value"));
        }
        format!("{:e}", value).parse()
    }

    /// Convert from rust_decimal::Decimal.
    ///
    /// This is intended for API boundaries only. The conversion is exact.
    pub fn from_decimal(d: rust_decimal::Decimal) -> Self {
        Self::new(BigInt::from(d.mantissa()), i64::from(d.scale()))
    }

    /// Convert to rust_decimal::Decimal.
    ///
    /// Rounds half-even to the 28 significant digits rust_decimal can hold.
    /// Returns `None` when the magnitude does not fit.
    pub fn to_decimal(&self) -> Option<rust_decimal::Decimal> {
        const MAX_DIGITS: u32 = 28;
        let mc = MathContext::new(MAX_DIGITS, RoundingMode::HalfEven).ok()?;
        let mut value = self.round(&mc);
        if value.scale < 0 {
            value = value.set_scale(0, RoundingMode::HalfEven);
        } else if value.scale > i64::from(MAX_DIGITS) {
            value = value.set_scale(i64::from(MAX_DIGITS), RoundingMode::HalfEven);
        }
        let mantissa = value.unscaled.to_i128()?;
        let scale = u32::try_from(value.scale).ok()?;
        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, scale).ok()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    #[inline]
    pub fn scale(&self) -> i64 {
        self.scale
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    /// Sign: -1, 0, or 1.
    #[inline]
    pub fn signum(&self) -> i8 {
        if self.unscaled.is_zero() {
            0
        } else if self.unscaled.is_negative() {
            -1
        } else {
            1
        }
    }

    /// Number of decimal digits in the unscaled value (1 for zero).
    #[inline]
    pub fn precision(&self) -> u64 {
        digit_count(self.unscaled.magnitude())
    }

    /// Decimal exponent of the scientific notation: `precision - scale - 1`.
    #[inline]
    pub fn exponent(&self) -> i64 {
        self.precision() as i64 - self.scale - 1
    }

    /// The value with its decimal exponent removed, i.e. in `[1, 10)` for
    /// non-zero values.
    pub fn mantissa(&self) -> Self {
        let exponent = self.exponent();
        if exponent == 0 {
            self.clone()
        } else {
            self.move_point_left(exponent)
        }
    }

    /// Count of significant digits once trailing zeros are removed.
    /// Integral zeros of a negative scale count as significant.
    pub fn significant_digits(&self) -> u64 {
        let stripped = self.strip_trailing_zeros();
        if stripped.scale >= 0 {
            stripped.precision()
        } else {
            stripped.precision() + stripped.scale.unsigned_abs()
        }
    }

    /// Integral part, truncated toward zero.
    pub fn integral_part(&self) -> Self {
        if self.scale <= 0 {
            return self.clone();
        }
        Self::new(&self.unscaled / pow10(self.scale as u64), 0)
    }

    /// `self - integral_part()`, carrying the sign of `self`.
    pub fn fractional_part(&self) -> Self {
        self - &self.integral_part()
    }

    // ========================================================================
    // Scaling
    // ========================================================================

    /// Shift the decimal point `n` places to the left. The result never has
    /// a negative scale.
    pub fn move_point_left(&self, n: i64) -> Self {
        let result = Self::new(self.unscaled.clone(), self.scale + n);
        if result.scale < 0 {
            result.set_scale(0, RoundingMode::Down)
        } else {
            result
        }
    }

    /// Shift the decimal point `n` places to the right. The result never has
    /// a negative scale.
    #[inline]
    pub fn move_point_right(&self, n: i64) -> Self {
        self.move_point_left(-n)
    }

    /// Change the scale, rounding with `mode` if digits are discarded.
    pub fn set_scale(&self, new_scale: i64, mode: RoundingMode) -> Self {
        match new_scale.cmp(&self.scale) {
            Ordering::Equal => self.clone(),
            Ordering::Greater => {
                let factor = pow10((new_scale - self.scale) as u64);
                Self::new(&self.unscaled * factor, new_scale)
            },
            Ordering::Less => {
                let divisor = pow10((self.scale - new_scale) as u64);
                Self::new(divide_and_round(&self.unscaled, &divisor, mode), new_scale)
            },
        }
    }

    /// Remove trailing zeros from the unscaled value. Zero becomes `0` with
    /// scale 0.
    pub fn strip_trailing_zeros(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        self.strip_zeros_to(i64::MIN)
    }

    /// Remove trailing zeros while the scale stays above `preferred_scale`.
    fn strip_zeros_to(&self, preferred_scale: i64) -> Self {
        let ten = BigInt::from(10u32);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        while scale > preferred_scale && !unscaled.is_zero() {
            let (quotient, remainder) = unscaled.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            unscaled = quotient;
            scale -= 1;
        }
        Self::new(unscaled, scale)
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Round to the context's number of significant digits.
    ///
    /// Values that already fit are returned unchanged (no zero padding).
    pub fn round(&self, mc: &MathContext) -> Self {
        let target = u64::from(mc.precision());
        let precision = self.precision();
        if precision <= target {
            return self.clone();
        }

        let drop = precision - target;
        let rounded = divide_and_round(&self.unscaled, &pow10(drop), mc.rounding());
        let result = Self::new(rounded, self.scale - drop as i64);

        // A carry (e.g. 9.99 -> 10.0) adds a digit, which is always a zero
        if result.precision() > target {
            Self::new(result.unscaled / 10u32, result.scale - 1)
        } else {
            result
        }
    }

    /// Round to exactly the context's number of significant digits, padding
    /// with trailing zeros when the value has fewer.
    pub fn round_with_trailing_zeros(&self, mc: &MathContext) -> Self {
        let target = u64::from(mc.precision());
        if self.is_zero() {
            return Self::new(BigInt::zero(), target as i64 - 1);
        }
        let rounded = self.round(mc);
        let precision = rounded.precision();
        if precision >= target {
            rounded
        } else {
            let padded_scale = rounded.scale + (target - precision) as i64;
            rounded.set_scale(padded_scale, mc.rounding())
        }
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Self::new(self.unscaled.abs(), self.scale)
    }

    /// Addition rounded to `mc`.
    #[inline]
    pub fn add_ctx(&self, rhs: &Self, mc: &MathContext) -> Self {
        (self + rhs).round(mc)
    }

    /// Subtraction rounded to `mc`.
    #[inline]
    pub fn sub_ctx(&self, rhs: &Self, mc: &MathContext) -> Self {
        (self - rhs).round(mc)
    }

    /// Multiplication rounded to `mc`.
    #[inline]
    pub fn mul_ctx(&self, rhs: &Self, mc: &MathContext) -> Self {
        (self * rhs).round(mc)
    }

    /// Division rounded to `mc`.
    ///
    /// Exact quotients drop trailing zeros down to the preferred scale
    /// `self.scale - divisor.scale`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `divisor` is zero.
    pub fn div(&self, divisor: &Self, mc: &MathContext) -> NumericResult<Self> {
        if divisor.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let preferred_scale = self.scale - divisor.scale;
        if self.is_zero() {
            return Ok(Self::new(BigInt::zero(), preferred_scale));
        }

        // Shift the dividend so the integer quotient has at least p + 1 digits
        let target = i64::from(mc.precision());
        let shift = (target + 1 + divisor.precision() as i64 - self.precision() as i64).max(0);
        let dividend = &self.unscaled * pow10(shift as u64);
        let (quotient, remainder) = dividend.div_rem(&divisor.unscaled);
        let scale = preferred_scale + shift;

        if remainder.is_zero() {
            let exact = Self::new(quotient, scale).round(mc);
            return Ok(exact.strip_zeros_to(preferred_scale));
        }

        // Append a sticky digit so the discarded remainder reads as non-zero
        // without ever forming an exact tie.
        let sticky = if quotient.is_negative() { -1 } else { 1 };
        let quotient = quotient * 10u32 + sticky;
        Ok(Self::new(quotient, scale + 1).round(mc))
    }

    /// `1 / self` rounded to `mc`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `self` is zero.
    #[inline]
    pub fn reciprocal(&self, mc: &MathContext) -> NumericResult<Self> {
        Self::one().div(self, mc)
    }

    // ========================================================================
    // Range Tests and Conversions
    // ========================================================================

    /// Exact integer value, if there is no fractional part.
    pub fn to_bigint_exact(&self) -> Option<BigInt> {
        if self.scale <= 0 {
            return Some(&self.unscaled * pow10(self.scale.unsigned_abs()));
        }
        let (quotient, remainder) = self.unscaled.div_rem(&pow10(self.scale as u64));
        remainder.is_zero().then_some(quotient)
    }

    /// Exact `i64` value, if the value is integral and in range.
    pub fn to_i64_exact(&self) -> Option<i64> {
        if self.is_zero() {
            return Some(0);
        }
        // i64::MAX has 19 digits
        if self.exponent() > 18 {
            return None;
        }
        self.to_bigint_exact()?.to_i64()
    }

    /// Whether the value is an integer that fits in `i32`.
    #[inline]
    pub fn is_i32_value(&self) -> bool {
        self.to_i64_exact()
            .is_some_and(|v| i32::try_from(v).is_ok())
    }

    /// Whether the value is an integer that fits in `i64`.
    #[inline]
    pub fn is_i64_value(&self) -> bool {
        self.to_i64_exact().is_some()
    }

    /// Whether the magnitude is within `f64::MAX`.
    pub fn is_f64_value(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        match self.exponent().cmp(&308) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => {
                let max = Self::new(BigInt::from(F64_MAX_MANTISSA), F64_MAX_SCALE);
                self.abs() <= max
            },
        }
    }

    /// Nearest `f64`. Values beyond the f64 range become infinite and tiny
    /// values become zero.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let mc = MathContext::new(F64_CONVERSION_DIGITS, RoundingMode::HalfEven);
        let rounded = match mc {
            Ok(mc) => self.round(&mc),
            Err(_) => self.clone(),
        };
        format!("{}e{}", rounded.unscaled, -rounded.scale)
            .parse()
            .unwrap_or(f64::NAN)
    }

    // ========================================================================
    // Formatting
    // ========================================================================

    /// The digits strictly after the decimal point of the plain string form.
    /// Empty when the value has no fractional digits.
    pub fn fraction_digits(&self) -> String {
        let plain = self.to_string();
        match plain.find('.') {
            Some(pos) => plain[pos + 1..].to_string(),
            None => String::new(),
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for BigDecimal {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for BigDecimal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigDecimal {}

impl PartialOrd for BigDecimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (lhs_sign, rhs_sign) = (self.signum(), other.signum());
        if lhs_sign != rhs_sign {
            return lhs_sign.cmp(&rhs_sign);
        }
        if lhs_sign == 0 {
            return Ordering::Equal;
        }

        // Same sign: a larger exponent means a larger magnitude
        let by_exponent = self.exponent().cmp(&other.exponent());
        if by_exponent != Ordering::Equal {
            return if lhs_sign > 0 {
                by_exponent
            } else {
                by_exponent.reverse()
            };
        }

        match self.scale.cmp(&other.scale) {
            Ordering::Equal => self.unscaled.cmp(&other.unscaled),
            Ordering::Less => {
                let lhs = &self.unscaled * pow10((other.scale - self.scale) as u64);
                lhs.cmp(&other.unscaled)
            },
            Ordering::Greater => {
                let rhs = &other.unscaled * pow10((self.scale - other.scale) as u64);
                self.unscaled.cmp(&rhs)
            },
        }
    }
}

impl Hash for BigDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let stripped = self.strip_trailing_zeros();
        stripped.unscaled.hash(state);
        stripped.scale.hash(state);
    }
}

impl Neg for BigDecimal {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.unscaled, self.scale)
    }
}

impl Neg for &BigDecimal {
    type Output = BigDecimal;

    #[inline]
    fn neg(self) -> Self::Output {
        BigDecimal::new(-&self.unscaled, self.scale)
    }
}

impl Add for &BigDecimal {
    type Output = BigDecimal;

    fn add(self, rhs: Self) -> Self::Output {
        match self.scale.cmp(&rhs.scale) {
            Ordering::Equal => BigDecimal::new(&self.unscaled + &rhs.unscaled, self.scale),
            Ordering::Less => {
                let lhs = &self.unscaled * pow10((rhs.scale - self.scale) as u64);
                BigDecimal::new(lhs + &rhs.unscaled, rhs.scale)
            },
            Ordering::Greater => {
                let rhs_unscaled = &rhs.unscaled * pow10((self.scale - rhs.scale) as u64);
                BigDecimal::new(&self.unscaled + rhs_unscaled, self.scale)
            },
        }
    }
}

impl Sub for &BigDecimal {
    type Output = BigDecimal;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self + &(-rhs)
    }
}

impl Mul for &BigDecimal {
    type Output = BigDecimal;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        BigDecimal::new(&self.unscaled * &rhs.unscaled, self.scale + rhs.scale)
    }
}

// Owned operands delegate to the reference implementations
macro_rules! forward_owned_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for BigDecimal {
            type Output = BigDecimal;

            #[inline]
            fn $method(self, rhs: BigDecimal) -> BigDecimal {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&BigDecimal> for BigDecimal {
            type Output = BigDecimal;

            #[inline]
            fn $method(self, rhs: &BigDecimal) -> BigDecimal {
                (&self).$method(rhs)
            }
        }

        impl $trait<BigDecimal> for &BigDecimal {
            type Output = BigDecimal;

            #[inline]
            fn $method(self, rhs: BigDecimal) -> BigDecimal {
                self.$method(&rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);

impl From<BigInt> for BigDecimal {
    #[inline]
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigDecimal {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::new(BigInt::from(value), 0)
                }
            }
        )*
    };
}

impl_from_primitive!(i32, u32, i64, u64);

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Display for BigDecimal {
    /// Plain notation, never scientific.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.unscaled.is_negative() { "-" } else { "" };
        let digits = self.unscaled.magnitude().to_string();

        if self.scale <= 0 {
            if self.is_zero() {
                return write!(f, "0");
            }
            let zeros = "0".repeat(self.scale.unsigned_abs() as usize);
            return write!(f, "{}{}{}", sign, digits, zeros);
        }

        let scale = self.scale as usize;
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{}{}.{}", sign, int_part, frac_part)
        } else {
            let zeros = "0".repeat(scale - digits.len());
            write!(f, "{}0.{}{}", sign, zeros, digits)
        }
    }
}

impl fmt::Debug for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BigDecimal({}, unscaled={}, scale={})",
            self, self.unscaled, self.scale
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

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
    fn test_precision_and_exponent() {
        assert_eq!(dec("0").precision(), 1);
        assert_eq!(dec("123.45").precision(), 5);
        assert_eq!(dec("123.45").exponent(), 2);
        assert_eq!(dec("0.00123").exponent(), -3);
        assert_eq!(dec("1e40").exponent(), 40);

        let big = BigDecimal::from(BigInt::from(10u32).pow(50));
        assert_eq!(big.precision(), 51);
        let nines = BigDecimal::from(BigInt::from(10u32).pow(50) - 1);
        assert_eq!(nines.precision(), 50);
    }

    #[test]
    fn test_mantissa() {
        assert_eq!(dec("12345").mantissa(), dec("1.2345"));
        assert_eq!(dec("0.00042").mantissa(), dec("4.2"));
        assert_eq!(dec("7").mantissa(), dec("7"));
    }

    #[test]
    fn test_significant_digits() {
        assert_eq!(dec("123.4500").significant_digits(), 5);
        assert_eq!(dec("1200").significant_digits(), 4);
        assert_eq!(dec("0.0012").significant_digits(), 2);
    }

    #[test]
    fn test_integral_and_fractional_parts() {
        assert_eq!(dec("12.75").integral_part(), dec("12"));
        assert_eq!(dec("12.75").fractional_part(), dec("0.75"));
        assert_eq!(dec("-12.75").integral_part(), dec("-12"));
        assert_eq!(dec("-12.75").fractional_part(), dec("-0.75"));
        assert!(dec("0.5").integral_part().is_zero());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(dec("3.14159").round(&ctx(3)).to_string(), "3.14");
        assert_eq!(dec("2.5").round(&ctx(1)).to_string(), "3");
        assert_eq!(dec("-2.5").round(&ctx(1)).to_string(), "-3");
        assert_eq!(dec("9.99").round(&ctx(2)).to_string(), "10");
        assert_eq!(dec("9.996").round(&ctx(3)).to_string(), "10.0");
    }

    #[test]
    fn test_round_modes() {
        let value = dec("2.5");
        let round = |mode| {
            value
                .round(&MathContext::new(1, mode).unwrap())
                .to_string()
        };
        assert_eq!(round(RoundingMode::HalfEven), "2");
        assert_eq!(round(RoundingMode::HalfDown), "2");
        assert_eq!(round(RoundingMode::Down), "2");
        assert_eq!(round(RoundingMode::Up), "3");
        assert_eq!(round(RoundingMode::Ceiling), "3");
        assert_eq!(round(RoundingMode::Floor), "2");

        let negative = dec("-2.1");
        let floor = MathContext::new(1, RoundingMode::Floor).unwrap();
        assert_eq!(negative.round(&floor).to_string(), "-3");
    }

    #[test]
    fn test_round_keeps_short_values() {
        assert_eq!(dec("1.5").round(&ctx(10)).to_string(), "1.5");
    }

    #[test]
    fn test_round_with_trailing_zeros() {
        assert_eq!(dec("1.5").round_with_trailing_zeros(&ctx(4)).to_string(), "1.500");
        assert_eq!(dec("0").round_with_trailing_zeros(&ctx(3)).to_string(), "0.00");
        assert_eq!(
            dec("2.71828").round_with_trailing_zeros(&ctx(3)).to_string(),
            "2.72"
        );
    }

    #[test]
    fn test_exact_arithmetic() {
        assert_eq!(dec("1.25") + dec("2.5"), dec("3.75"));
        assert_eq!(dec("1.25") - dec("2.5"), dec("-1.25"));
        assert_eq!(dec("1.5") * dec("-0.2"), dec("-0.3"));
        assert_eq!((dec("1.5") * dec("0.2")).scale(), 2);
    }

    #[test]
    fn test_division() {
        let third = BigDecimal::one().div(&BigDecimal::from(3), &ctx(10)).unwrap();
        assert_eq!(third.to_string(), "0.3333333333");

        let two_thirds = BigDecimal::two().div(&BigDecimal::from(3), &ctx(5)).unwrap();
        assert_eq!(two_thirds.to_string(), "0.66667");

        let exact = dec("10").div(&dec("4"), &ctx(20)).unwrap();
        assert_eq!(exact.to_string(), "2.5");

        let negative = dec("-1").div(&dec("8"), &ctx(2)).unwrap();
        assert_eq!(negative.to_string(), "-0.13");
    }

    #[test]
    fn test_division_sticky_rounding() {
        // 0.1250000...01 must round up at two digits even though the
        // truncated digits look like an exact tie
        let value = dec("1.000000000000000000001")
            .div(&dec("8"), &MathContext::new(2, RoundingMode::HalfEven).unwrap())
            .unwrap();
        assert_eq!(value.to_string(), "0.13");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            BigDecimal::one().div(&BigDecimal::zero(), &ctx(5)),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_comparison() {
        assert_eq!(dec("2.0"), dec("2.00"));
        assert!(dec("2.01") > dec("2.001"));
        assert!(dec("-3") < dec("-2.5"));
        assert!(dec("100") > dec("99.999"));
        assert!(dec("-100") < dec("-99.999"));
        assert!(dec("0") > dec("-0.0001"));
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(dec("1.50"));
        assert!(set.contains(&dec("1.5")));
    }

    #[test]
    fn test_range_checks() {
        assert!(dec("2147483647").is_i32_value());
        assert!(!dec("2147483648").is_i32_value());
        assert!(dec("2147483648").is_i64_value());
        assert!(!dec("9223372036854775808").is_i64_value());
        assert!(!dec("1.5").is_i64_value());
        assert!(dec("3.000").is_i32_value());
        assert!(dec("1e300").is_f64_value());
        assert!(!dec("1e309").is_f64_value());
        assert!(dec("1.7976931348623157e308").is_f64_value());
        assert!(!dec("1.7976931348623158e308").is_f64_value());
        assert_eq!(dec("0e100").to_i64_exact(), Some(0));
    }

    #[test]
    fn test_f64_conversion() {
        assert_eq!(BigDecimal::from_f64(0.1).unwrap(), dec("0.1"));
        assert_eq!(BigDecimal::from_f64(-2.5).unwrap(), dec("-2.5"));
        assert!(BigDecimal::from_f64(f64::NAN).is_err());
        assert_eq!(dec("1.4142135623730951").to_f64(), std::f64::consts::SQRT_2);
        assert_eq!(dec("1e400").to_f64(), f64::INFINITY);
    }

    #[test]
    fn test_move_point() {
        assert_eq!(dec("123.45").move_point_left(2).to_string(), "1.2345");
        assert_eq!(dec("1.5").move_point_right(3).to_string(), "1500");
        assert_eq!(dec("1.5").move_point_right(3).scale(), 0);
    }

    #[test]
    fn test_strip_trailing_zeros() {
        let stripped = dec("12.3400").strip_trailing_zeros();
        assert_eq!(stripped.scale(), 2);
        let stripped = dec("1200").strip_trailing_zeros();
        assert_eq!(stripped.scale(), -2);
        assert_eq!(stripped.to_string(), "1200");
    }

    #[test]
    fn test_display() {
        assert_eq!(dec("0.001").to_string(), "0.001");
        assert_eq!(dec("-0.5").to_string(), "-0.5");
        assert_eq!(dec("1.2e3").to_string(), "1200");
        assert_eq!(dec("0.000").to_string(), "0.000");
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(dec("3.14159").fraction_digits(), "14159");
        assert_eq!(dec("3").fraction_digits(), "");
        assert_eq!(dec("2.70").fraction_digits(), "70");
    }

    #[test]
    fn test_decimal_interop() {
        use rust_decimal::Decimal;

        let d = Decimal::new(12345, 2); // 123.45
        let x = BigDecimal::from_decimal(d);
        assert_eq!(x, dec("123.45"));
        assert_eq!(x.to_decimal(), Some(d));

        let third = BigDecimal::one().div(&BigDecimal::from(3), &ctx(40)).unwrap();
        let converted = third.to_decimal().unwrap();
        assert_eq!(converted.to_string(), "0.3333333333333333333333333333");

        assert_eq!(dec("1e40").to_decimal(), None);
    }
}
