// ============================================================================
// Prime Windows and Digital Roots
// ============================================================================

/// Trial division by every `i` in `2..=num / 2`.
///
/// Nothing below 4 has a divisor in that range, so `0`, `1`, `2` and `3` all
/// count as prime here.
#[inline]
pub fn is_prime(num: u32) -> bool {
    (2..=num / 2).all(|i| num % i != 0)
}

/// Number of overlapping `width`-digit windows of `digits` whose integer value
/// is prime by [`is_prime`]. Leading zeros are dropped (`"02"` is 2).
///
/// Non-digit bytes are not expected; the input is the decimal string of a
/// non-negative integer.
pub fn count_prime_windows(digits: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    digits
        .as_bytes()
        .windows(width)
        .filter(|window| is_prime(window_value(window)))
        .count()
}

fn window_value(window: &[u8]) -> u32 {
    window
        .iter()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b.wrapping_sub(b'0')))
}

/// Repeated digit sum until a single digit remains.
pub fn digital_root(mut n: u64) -> u64 {
    while n > 9 {
        let mut sum = 0;
        while n > 0 {
            sum += n % 10;
            n /= 10;
        }
        n = sum;
    }
    n
}

/// Collapse a prime-count product to the final numeral: digital root above
/// 9, and 0 bumped to 1.
pub fn reduce_to_numeral(product: u64) -> u8 {
    let reduced = if product > 9 {
        digital_root(product)
    } else {
        product
    };
    match reduced {
        0 => 1,
        digit => digit as u8,
    }
}
