// ============================================================================
// BigMath Engine Handle
// Owns the constant cache and exposes the transcendental functions
// ============================================================================

use super::cache::{Constant, ConstantCache};
use crate::numeric::{BigDecimal, MathContext, NumericResult};
use std::sync::Arc;

/// Entry point for every arbitrary-precision function.
///
/// The handle owns an `Arc<ConstantCache>`; cloning it is cheap and clones
/// share the cache. The functions themselves live in the sibling modules
/// (`roots`, `log`, `exp`, `power`, `factorial`, `pi`).
///
/// # Example
/// ```
/// use numerology_engine::math::BigMath;
/// use numerology_engine::numeric::MathContext;
///
/// let math = BigMath::new();
/// let mc = MathContext::with_digits(20).unwrap();
/// assert_eq!(math.pi(&mc).unwrap().to_string(), "3.1415926535897932385");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BigMath {
    pub(crate) cache: Arc<ConstantCache>,
}

impl BigMath {
    /// Create an engine with its own empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over an existing (possibly shared) cache.
    pub fn with_cache(cache: Arc<ConstantCache>) -> Self {
        Self { cache }
    }

    pub fn builder() -> BigMathBuilder {
        BigMathBuilder::new()
    }

    #[inline]
    pub fn cache(&self) -> &Arc<ConstantCache> {
        &self.cache
    }

    /// Any of the cached constants rounded to `mc`.
    pub fn constant(&self, constant: Constant, mc: &MathContext) -> NumericResult<BigDecimal> {
        match constant {
            Constant::Pi => self.pi(mc),
            Constant::E => self.e(mc),
            Constant::Log2 => self.log_two(mc),
            Constant::Log3 => self.log_three(mc),
            Constant::Log10 => self.log_ten(mc),
        }
    }

    /// `x` rounded to `mc`.
    #[inline]
    pub fn round(&self, x: &BigDecimal, mc: &MathContext) -> BigDecimal {
        x.round(mc)
    }

    /// `1 / x` rounded to `mc`.
    #[inline]
    pub fn reciprocal(&self, x: &BigDecimal, mc: &MathContext) -> NumericResult<BigDecimal> {
        x.reciprocal(mc)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`BigMath`] with an optional shared cache and constants to
/// compute up front.
#[derive(Debug, Default)]
pub struct BigMathBuilder {
    cache: Option<Arc<ConstantCache>>,
    prewarm: Vec<Constant>,
    prewarm_precision: Option<u32>,
}

impl BigMathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing cache instead of a fresh one.
    pub fn shared_cache(mut self, cache: Arc<ConstantCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Compute `constants` at `precision` digits when building.
    pub fn prewarm(mut self, constants: &[Constant], precision: u32) -> Self {
        self.prewarm.extend_from_slice(constants);
        self.prewarm_precision = Some(precision);
        self
    }

    /// Build the engine, computing any pre-warmed constants.
    ///
    /// # Errors
    /// Returns `UnsupportedConfiguration` if the pre-warm precision is zero.
    pub fn build(self) -> NumericResult<BigMath> {
        let math = BigMath::with_cache(self.cache.unwrap_or_default());

        if let Some(precision) = self.prewarm_precision {
            let mc = MathContext::with_digits(precision)?;
            for constant in self.prewarm {
                tracing::debug!(constant = constant.name(), precision, "pre-warming constant");
                math.constant(constant, &mc)?;
            }
        }

        Ok(math)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericError;

    #[test]
    fn test_clones_share_cache() {
        let math = BigMath::new();
        let clone = math.clone();
        assert!(Arc::ptr_eq(math.cache(), clone.cache()));
    }

    #[test]
    fn test_builder_prewarm() {
        let math = BigMath::builder()
            .prewarm(&[Constant::Pi, Constant::Log2], 30)
            .build()
            .unwrap();

        assert!(math.cache().achieved_precision(Constant::Pi).unwrap() >= 30);
        assert!(math.cache().achieved_precision(Constant::Log2).unwrap() >= 30);
        assert_eq!(math.cache().achieved_precision(Constant::E), None);
    }

    #[test]
    fn test_builder_shared_cache() {
        let cache = Arc::new(ConstantCache::new());
        let first = BigMath::builder()
            .shared_cache(Arc::clone(&cache))
            .prewarm(&[Constant::E], 15)
            .build()
            .unwrap();
        let second = BigMath::with_cache(Arc::clone(&cache));

        assert!(Arc::ptr_eq(first.cache(), second.cache()));
        assert!(second.cache().achieved_precision(Constant::E).is_some());
    }

    #[test]
    fn test_builder_rejects_zero_precision() {
        let result = BigMath::builder().prewarm(&[Constant::Pi], 0).build();
        assert_eq!(result.unwrap_err(), NumericError::UnsupportedConfiguration);
    }

    #[test]
    fn test_constant_dispatch() {
        let math = BigMath::new();
        let mc = MathContext::with_digits(10).unwrap();
        assert_eq!(math.constant(Constant::Pi, &mc).unwrap().to_string(), "3.141592654");
        assert_eq!(math.constant(Constant::E, &mc).unwrap().to_string(), "2.718281828");
        assert_eq!(math.constant(Constant::Log2, &mc).unwrap().to_string(), "0.6931471806");
        assert_eq!(math.constant(Constant::Log3, &mc).unwrap().to_string(), "1.098612289");
        assert_eq!(math.constant(Constant::Log10, &mc).unwrap().to_string(), "2.302585093");
    }
}
