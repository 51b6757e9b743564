//! Property-based tests for decimal arithmetic and parsing.

use proptest::prelude::*;

use super::{BigDecimal, MathContext, RoundingMode};

// Strategy for decimal literals with up to 30 digits and a small exponent
fn decimal_literal() -> impl Strategy<Value = String> {
    (any::<bool>(), "[0-9]{1,15}", "[0-9]{0,15}", -20i32..20i32).prop_map(
        |(negative, int_part, frac_part, exp)| {
            let sign = if negative { "-" } else { "" };
            if frac_part.is_empty() {
                format!("{}{}e{}", sign, int_part, exp)
            } else {
                format!("{}{}.{}e{}", sign, int_part, frac_part, exp)
            }
        },
    )
}

fn rounding_mode() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![
        Just(RoundingMode::Up),
        Just(RoundingMode::Down),
        Just(RoundingMode::Ceiling),
        Just(RoundingMode::Floor),
        Just(RoundingMode::HalfUp),
        Just(RoundingMode::HalfDown),
        Just(RoundingMode::HalfEven),
    ]
}

proptest! {
    #[test]
    fn display_then_parse_preserves_value(literal in decimal_literal()) {
        let x: BigDecimal = literal.parse().unwrap();
        let reparsed: BigDecimal = x.to_string().parse().unwrap();
        prop_assert_eq!(x, reparsed);
    }

    #[test]
    fn add_then_sub_is_identity(a in decimal_literal(), b in decimal_literal()) {
        let a: BigDecimal = a.parse().unwrap();
        let b: BigDecimal = b.parse().unwrap();
        prop_assert_eq!(&(&a + &b) - &b, a);
    }

    #[test]
    fn mul_is_commutative(a in decimal_literal(), b in decimal_literal()) {
        let a: BigDecimal = a.parse().unwrap();
        let b: BigDecimal = b.parse().unwrap();
        prop_assert_eq!(&a * &b, &b * &a);
    }

    #[test]
    fn round_respects_precision(
        literal in decimal_literal(),
        precision in 1u32..25,
        mode in rounding_mode(),
    ) {
        let x: BigDecimal = literal.parse().unwrap();
        let mc = MathContext::new(precision, mode).unwrap();
        let rounded = x.round(&mc);
        prop_assert!(rounded.precision() <= u64::from(precision));

        // Rounding moves the value by less than one unit in the last place
        let ulp = BigDecimal::new(1.into(), rounded.scale());
        prop_assert!((&rounded - &x).abs() < ulp);
    }

    #[test]
    fn division_times_divisor_is_close(
        a in decimal_literal(),
        b in decimal_literal(),
        precision in 5u32..30,
    ) {
        let a: BigDecimal = a.parse().unwrap();
        let b: BigDecimal = b.parse().unwrap();
        prop_assume!(!b.is_zero() && !a.is_zero());
        let mc = MathContext::with_digits(precision).unwrap();
        let quotient = a.div(&b, &mc).unwrap();
        prop_assert!(quotient.precision() <= u64::from(precision));

        // Relative error of the quotient is bounded by one unit in the last place
        let back = &quotient * &b;
        let error = (&back - &a).abs();
        let tolerance = (&b * &BigDecimal::new(1.into(), quotient.scale())).abs();
        prop_assert!(error <= tolerance);
    }
}
