// ============================================================================
// Numerology Engine Library
// Arbitrary-precision decimal math and a pi/e digit numerology reducer
// ============================================================================

//! # Numerology Engine
//!
//! Arbitrary-precision decimal arithmetic with the classic transcendental
//! functions, and a reducer that turns digits of pi and e into a numeral.
//!
//! ## Features
//!
//! - **BigDecimal** with exact add/sub/mul and precision-bounded division
//! - **Transcendentals** to any number of significant digits: sqrt, n-th
//!   root, log, exp, pow, factorial and gamma
//! - **Cached constants** (pi, e, log 2, log 3, log 10) shared across threads
//!   and only ever upgraded in precision
//! - **Numerology reducer** mapping an input in `0..=999` to a digit in `1..=9`
//!
//! ## Example
//!
//! ```rust
//! use numerology_engine::prelude::*;
//!
//! let math = BigMath::new();
//! let mc = MathContext::with_digits(30).unwrap();
//!
//! let two: BigDecimal = "2".parse().unwrap();
//! let root = math.sqrt(&two, &mc).unwrap();
//! assert_eq!(root.to_string(), "1.41421356237309504880168872421");
//!
//! let numeral = evaluate_numerology(&math, 20, NumerologyMode::PiDigits).unwrap();
//! assert!((1..=9).contains(&numeral));
//! ```

pub mod math;
pub mod numeric;
pub mod numerology;

// Re-exports for convenience
pub mod prelude {
    pub use crate::math::{BigMath, BigMathBuilder, Constant, ConstantCache};
    pub use crate::numeric::{BigDecimal, MathContext, NumericError, NumericResult, RoundingMode};
    pub use crate::numerology::{
        evaluate_numerology, NumerologyBreakdown, NumerologyConfig, NumerologyMode, NumerologyReducer,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::Arc;

    fn ctx(precision: u32) -> MathContext {
        MathContext::with_digits(precision).unwrap()
    }

    #[test]
    fn test_end_to_end_numerology() {
        let math = BigMath::builder()
            .prewarm(&[Constant::Pi, Constant::E], 60)
            .build()
            .unwrap();
        let reducer = NumerologyReducer::new(math.clone(), NumerologyConfig::default());

        let breakdown = reducer.evaluate_detailed(20, NumerologyMode::PiDigits).unwrap();
        assert_eq!(breakdown.leading_digits.len(), 20);
        assert_eq!(breakdown.sum, "85987448204883847381");
        assert_eq!(breakdown.numeral, 8);

        // The pre-warmed values were precise enough; nothing was recomputed
        assert_eq!(math.cache().achieved_precision(Constant::Pi), Some(66));
        assert_eq!(math.cache().achieved_precision(Constant::E), Some(66));
    }

    #[test]
    fn test_shared_cache_between_handles() {
        let cache = Arc::new(ConstantCache::new());
        let first = BigMath::with_cache(Arc::clone(&cache));
        let second = BigMath::with_cache(Arc::clone(&cache));

        let pi = first.pi(&ctx(40)).unwrap();
        assert_eq!(second.pi(&ctx(40)).unwrap(), pi);
        assert_eq!(cache.achieved_precision(Constant::Pi), Some(46));
    }

    #[test]
    fn test_functions_compose() {
        let math = BigMath::new();
        let mc = ctx(25);

        // log(e) = 1
        let e = math.e(&mc.with_extra_digits(5)).unwrap();
        assert_eq!(math.log(&e, &mc).unwrap(), BigDecimal::one());

        // sqrt(x)^2 = x
        let x: BigDecimal = "123.456".parse().unwrap();
        let root = math.sqrt(&x, &mc.with_extra_digits(5)).unwrap();
        assert_eq!(root.mul_ctx(&root, &mc), x);

        // gamma(n + 1) = n!
        let gamma = math.gamma(&BigDecimal::from(11), &mc).unwrap();
        assert_eq!(gamma, BigDecimal::from(3_628_800));

        // 2^10 through pow, pow_i64 and exp(10 log 2)
        let two = BigDecimal::two();
        assert_eq!(math.pow(&two, &BigDecimal::from(10), &mc).unwrap(), BigDecimal::from(1024));
        assert_eq!(math.pow_i64(&two, 10, &mc).unwrap(), BigDecimal::from(1024));
        let ten_log_two = BigDecimal::from(10).mul_ctx(&math.log(&two, &mc.doubled()).unwrap(), &mc.doubled());
        assert_eq!(math.exp(&ten_log_two, &mc).unwrap(), BigDecimal::from(1024));
    }

    #[test]
    fn test_errors_surface_as_results() {
        let math = BigMath::new();
        let minus_one: BigDecimal = "-1".parse().unwrap();
        assert!(matches!(math.sqrt(&minus_one, &ctx(10)), Err(NumericError::DomainError(_))));
        assert!(matches!(math.log(&minus_one, &ctx(10)), Err(NumericError::DomainError(_))));
        assert_eq!(MathContext::with_digits(0), Err(NumericError::UnsupportedConfiguration));
        assert!(matches!("1.2.3".parse::<BigDecimal>(), Err(NumericError::InvalidFormat(_))));
    }
}
