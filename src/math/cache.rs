// ============================================================================
// Constant Cache
// Thread-safe memoization of pi, e, log 2, log 3 and log 10
// ============================================================================
//
// Each constant has its own slot:
// - an atomic "achieved precision" read without locking (fast path)
// - a read/write lock around the stored value
// - an exclusive compute lock so only one thread upgrades a slot at a time
//
// Slots are independent: computing pi never blocks computing e. Values are
// only ever replaced by a strictly more precise one.

use crate::numeric::{pow10, BigDecimal, MathContext, NumericResult, RoundingMode};
use num_traits::Zero;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extra digits computed beyond the requested precision when a slot is
/// (re)filled.
pub const CACHE_GUARD_DIGITS: u32 = 6;

/// Largest guard tried before an ambiguous value is accepted as is.
const MAX_GUARD_DIGITS: u32 = 192;

/// The memoized constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    Pi,
    E,
    Log2,
    Log3,
    Log10,
}

impl Constant {
    pub const ALL: [Constant; 5] = [
        Constant::Pi,
        Constant::E,
        Constant::Log2,
        Constant::Log3,
        Constant::Log10,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
            Constant::Log2 => "log2",
            Constant::Log3 => "log3",
            Constant::Log10 => "log10",
        }
    }
}

/// A constant value together with the precision it is accurate to.
#[derive(Debug, Clone)]
pub struct CachedConstant {
    pub value: BigDecimal,
    pub achieved_precision: u32,
}

#[derive(Default)]
struct Slot {
    /// 0 while the slot is empty
    achieved: AtomicU32,
    entry: RwLock<Option<CachedConstant>>,
    compute: Mutex<()>,
}

impl Slot {
    fn read_if_sufficient(&self, mc: &MathContext) -> Option<BigDecimal> {
        if self.achieved.load(Ordering::Acquire) < mc.precision() {
            return None;
        }
        self.entry
            .read()
            .as_ref()
            .filter(|cached| cached.achieved_precision >= mc.precision())
            .filter(|cached| !rounding_is_ambiguous(&cached.value, mc))
            .map(|cached| cached.value.round(mc))
    }
}

/// Whether the digits of `value` past `mc.precision()` could be the result of
/// an earlier rounding that crossed the boundary `mc` rounds on, so that
/// rounding again could differ from rounding the exact constant.
///
/// Half modes are ambiguous on an exact half tail (`...5000`), directed modes
/// on an all-zero tail.
fn rounding_is_ambiguous(value: &BigDecimal, mc: &MathContext) -> bool {
    let digits = value.precision();
    let target = u64::from(mc.precision());
    if digits <= target {
        return false;
    }
    let modulus = pow10(digits - target);
    let modulus = modulus.magnitude();
    let tail = value.unscaled().magnitude() % modulus;
    match mc.rounding() {
        RoundingMode::HalfUp | RoundingMode::HalfDown | RoundingMode::HalfEven => tail * 2u32 == *modulus,
        _ => tail.is_zero(),
    }
}

/// Process-lifetime memo for the five constants and the Spouge coefficient
/// sets.
///
/// Owned by a [`BigMath`](crate::math::BigMath) handle; share one cache
/// between handles with `Arc`.
#[derive(Default)]
pub struct ConstantCache {
    slots: [Slot; 5],
    spouge: Mutex<HashMap<u32, Arc<[BigDecimal]>>>,
}

impl ConstantCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `constant` rounded to `mc`, computing it if the cached value is
    /// missing or less precise than requested.
    ///
    /// `compute` receives a context `CACHE_GUARD_DIGITS` above the request
    /// and must return the constant accurate to that precision. If the extra
    /// digits sit exactly on a rounding boundary the guard is doubled and the
    /// constant recomputed.
    pub fn get<F>(&self, constant: Constant, mc: &MathContext, compute: F) -> NumericResult<BigDecimal>
    where
        F: Fn(&MathContext) -> NumericResult<BigDecimal>,
    {
        let slot = &self.slots[constant.index()];

        if let Some(value) = slot.read_if_sufficient(mc) {
            return Ok(value);
        }

        let _guard = slot.compute.lock();

        // Another thread may have upgraded the slot while we waited
        if let Some(value) = slot.read_if_sufficient(mc) {
            return Ok(value);
        }

        let requested = mc.precision();
        let previous = slot.achieved.load(Ordering::Relaxed);
        let mut guard = CACHE_GUARD_DIGITS.max(previous.saturating_sub(requested) * 2);
        let (value, achieved) = loop {
            let working = mc.with_extra_digits(guard);
            let value = compute(&working)?;
            if guard >= MAX_GUARD_DIGITS || !rounding_is_ambiguous(&value, mc) {
                break (value, working.precision());
            }
            tracing::debug!(constant = constant.name(), guard, "widening guard digits");
            guard *= 2;
        };

        let result = value.round(mc);
        if achieved > previous {
            tracing::debug!(
                constant = constant.name(),
                previous,
                achieved,
                "upgrading cached constant"
            );
            *slot.entry.write() = Some(CachedConstant {
                value,
                achieved_precision: achieved,
            });
            slot.achieved.store(achieved, Ordering::Release);
        }

        Ok(result)
    }

    /// Precision the cached value of `constant` is accurate to, if any.
    pub fn achieved_precision(&self, constant: Constant) -> Option<u32> {
        match self.slots[constant.index()].achieved.load(Ordering::Acquire) {
            0 => None,
            precision => Some(precision),
        }
    }

    /// Snapshot of the cached entry for `constant`.
    pub fn cached(&self, constant: Constant) -> Option<CachedConstant> {
        self.slots[constant.index()].entry.read().clone()
    }

    /// Spouge coefficients for parameter `a`, computed once per distinct `a`.
    ///
    /// The lock is held while computing so concurrent callers asking for the
    /// same `a` wait for the first result instead of duplicating the work.
    pub fn spouge_coefficients<F>(&self, a: u32, compute: F) -> NumericResult<Arc<[BigDecimal]>>
    where
        F: FnOnce(u32) -> NumericResult<Vec<BigDecimal>>,
    {
        let mut sets = self.spouge.lock();
        if let Some(coefficients) = sets.get(&a) {
            return Ok(Arc::clone(coefficients));
        }

        tracing::debug!(a, "computing spouge coefficients");
        let coefficients: Arc<[BigDecimal]> = compute(a)?.into();
        sets.insert(a, Arc::clone(&coefficients));
        Ok(coefficients)
    }

    /// Number of distinct Spouge coefficient sets held.
    pub fn spouge_sets(&self) -> usize {
        self.spouge.lock().len()
    }
}

impl std::fmt::Debug for ConstantCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for constant in Constant::ALL {
            map.entry(&constant.name(), &self.achieved_precision(constant));
        }
        map.finish()
    }
}
