// ============================================================================
// Basic Usage Example
// ============================================================================
//
// Run with `cargo run --example basic_usage --features logging` to see the
// cache upgrades and numerology breakdowns logged at debug level.

use numerology_engine::numerology::NumerologyBreakdown;
use numerology_engine::prelude::*;

fn main() -> Result<(), NumericError> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Numerology Engine Example ===\n");

    let math = BigMath::builder()
        .prewarm(&[Constant::Pi, Constant::E], 50)
        .build()?;

    // Constants
    println!("=== Constants (50 digits) ===");
    let mc = MathContext::with_digits(50)?;
    for constant in Constant::ALL {
        println!("  {:>5} = {}", constant.name(), math.constant(constant, &mc)?);
    }

    // Functions
    println!("\n=== Functions (30 digits) ===");
    let mc = MathContext::with_digits(30)?;
    let two: BigDecimal = "2".parse()?;
    let half: BigDecimal = "0.5".parse()?;
    println!("  sqrt(2)     = {}", math.sqrt(&two, &mc)?);
    println!("  cbrt(2)     = {}", math.root(&two, &BigDecimal::from(3), &mc)?);
    println!("  log(2)      = {}", math.log(&two, &mc)?);
    println!("  log10(2)    = {}", math.log10(&two, &mc)?);
    println!("  exp(2)      = {}", math.exp(&two, &mc)?);
    println!("  2^0.5       = {}", math.pow(&two, &half, &mc)?);
    println!("  gamma(0.5)  = {}", math.gamma(&half, &mc)?);
    println!("  30!         = {}", math.factorial(&BigDecimal::from(30), &mc)?);

    // Numerology
    println!("\n=== Numerology ===");
    let reducer = NumerologyReducer::new(math.clone(), NumerologyConfig::default());
    for input in [0u32, 7, 42, 365, NumerologyConfig::MAX_INPUT] {
        let from_pi = reducer.evaluate_detailed(input, NumerologyMode::PiDigits)?;
        let fixed = reducer.evaluate_detailed(input, NumerologyMode::FixedDigits)?;
        print_breakdown(&from_pi);
        print_breakdown(&fixed);
    }

    println!("\n=== Cache ===");
    println!("  {:?}", math.cache());

    Ok(())
}

fn print_breakdown(breakdown: &NumerologyBreakdown) {
    println!(
        "  input {:>3} {:<12} primes {:>3} x {:>3} = {:>5} -> {}",
        breakdown.input,
        format!("{:?}", breakdown.mode),
        breakdown.two_digit_primes,
        breakdown.three_digit_primes,
        breakdown.product,
        breakdown.numeral
    );
}
