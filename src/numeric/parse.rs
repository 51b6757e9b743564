// ============================================================================
// Decimal Literal Parsing
// String to BigDecimal with divide-and-conquer digit parsing for long input
// ============================================================================
//
// Grammar: [sign] digits [ '.' digits ] [ ('e' | 'E') [sign] digits ]
//
// Literals of SPLIT_THRESHOLD characters or more are parsed by splitting the
// digit run into balanced halves, parsing each half independently and
// recombining with a scaled addition. This keeps the multi-thousand-digit
// strings produced internally sub-quadratic to parse.

use super::big_decimal::{pow10, BigDecimal};
use super::context::MathContext;
use super::errors::{NumericError, NumericResult};
use num_bigint::{BigInt, BigUint};

/// Literals at least this long use the divide-and-conquer parser.
pub const SPLIT_THRESHOLD: usize = 600;

/// Literals at least this long split into eighths instead of fifths.
const LARGE_LITERAL: usize = 10_000;

/// Scanned pieces of a literal.
struct Literal {
    negative: bool,
    digits: Vec<u8>,
    fraction_len: usize,
    exponent: i64,
}

impl BigDecimal {
    /// Parse a literal and round it to `mc`.
    ///
    /// # Errors
    /// Returns `InvalidFormat` for malformed input.
    pub fn parse_with_context(s: &str, mc: &MathContext) -> NumericResult<Self> {
        Ok(parse_literal(s)?.round(mc))
    }
}

impl std::str::FromStr for BigDecimal {
    type Err = NumericError;

    /// Parse a decimal literal exactly.
    ///
    /// # Examples
    /// - "123" -> 123
    /// - "-0.001" -> -0.001
    /// - "1.5E+3" -> 1500
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_literal(s.trim())
    }
}

fn parse_literal(s: &str) -> NumericResult<BigDecimal> {
    let len = s.len();
    let split_length = if len < SPLIT_THRESHOLD {
        None
    } else {
        Some(len / if len >= LARGE_LITERAL { 8 } else { 5 })
    };

    let literal = scan(s)?;

    let scale = literal.fraction_len as i64 - literal.exponent;
    if scale > i64::from(i32::MAX) || scale < i64::from(i32::MIN) {
        return Err(NumericError::InvalidFormat("scale out of range"));
    }

    let magnitude = digits_to_bigint(&literal.digits, split_length)?;
    let unscaled = if literal.negative {
        -magnitude
    } else {
        magnitude
    };
    Ok(BigDecimal::new(unscaled, scale))
}

fn scan(s: &str) -> NumericResult<Literal> {
    let mut negative = false;
    let mut number_has_sign = false;
    let mut dot_index: Option<usize> = None;
    let mut exp_index: Option<usize> = None;
    let mut exp_has_sign = false;
    let mut exp_negative = false;
    let mut digits = Vec::with_capacity(s.len());
    let mut fraction_len = 0usize;
    let mut exp_digits = String::new();

    for (i, c) in s.bytes().enumerate() {
        match c {
            b'+' | b'-' => {
                if let Some(exp) = exp_index {
                    if exp_has_sign {
                        return Err(NumericError::InvalidFormat("multiple signs in exponent"));
                    }
                    if i != exp + 1 {
                        return Err(NumericError::InvalidFormat("misplaced sign in exponent"));
                    }
                    exp_has_sign = true;
                    exp_negative = c == b'-';
                } else {
                    if number_has_sign {
                        return Err(NumericError::InvalidFormat("multiple signs in number"));
                    }
                    if i != 0 {
                        return Err(NumericError::InvalidFormat("misplaced sign in number"));
                    }
                    number_has_sign = true;
                    negative = c == b'-';
                }
            },
            b'e' | b'E' => {
                if exp_index.is_some() {
                    return Err(NumericError::InvalidFormat("multiple exponent markers"));
                }
                exp_index = Some(i);
            },
            b'.' => {
                if exp_index.is_some() {
                    return Err(NumericError::InvalidFormat("decimal point in exponent"));
                }
                if dot_index.is_some() {
                    return Err(NumericError::InvalidFormat("multiple decimal points"));
                }
                dot_index = Some(i);
            },
            b'0'..=b'9' => {
                if exp_index.is_some() {
                    exp_digits.push(c as char);
                } else {
                    digits.push(c);
                    if dot_index.is_some() {
                        fraction_len += 1;
                    }
                }
            },
            _ => return Err(NumericError::InvalidFormat("unexpected character")),
        }
    }

    if digits.is_empty() {
        return Err(NumericError::InvalidFormat("missing digits"));
    }

    let exponent = match exp_index {
        None => 0,
        Some(_) if exp_digits.is_empty() => {
            return Err(NumericError::InvalidFormat("missing exponent digits"));
        },
        Some(_) => {
            let magnitude: i64 = exp_digits
                .parse()
                .map_err(|_| NumericError::InvalidFormat("exponent out of range"))?;
            if exp_negative {
                -magnitude
            } else {
                magnitude
            }
        },
    };

    Ok(Literal {
        negative,
        digits,
        fraction_len,
        exponent,
    })
}

/// Parse a run of ASCII digits, splitting runs longer than `split_length`
/// into halves: `left × 10^len(right) + right`.
fn digits_to_bigint(digits: &[u8], split_length: Option<usize>) -> NumericResult<BigInt> {
    match split_length {
        Some(split) if digits.len() > split => {
            let mid = digits.len() / 2;
            let (left, right) = digits.split_at(mid);
            let high = digits_to_bigint(left, split_length)?;
            let low = digits_to_bigint(right, split_length)?;
            Ok(high * pow10(right.len() as u64) + low)
        },
        _ => BigUint::parse_bytes(digits, 10)
            .map(BigInt::from)
            .ok_or(NumericError::InvalidFormat("missing digits")),
    }
}
