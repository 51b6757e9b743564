// ============================================================================
// Math Module
// Transcendental functions and cached constants over BigDecimal
// ============================================================================
//
// This module provides:
// - BigMath: engine handle exposing sqrt, root, log, exp, pow, gamma, pi, e
// - ConstantCache: per-constant memo with monotonic precision upgrades
// - factorial_exact: exact integer factorials
//
// Every function takes a MathContext and returns a value rounded to it.
// Functions that need a constant (pi, log 2, log 3, log 10) fetch it from the
// handle's cache at a precision above the request.

mod cache;
mod engine;
mod exp;
mod factorial;
mod log;
mod pi;
mod power;
mod roots;

pub use cache::{CachedConstant, Constant, ConstantCache, CACHE_GUARD_DIGITS};
pub use engine::{BigMath, BigMathBuilder};
pub use factorial::{factorial_exact, FACTORIAL_TABLE_SIZE};
