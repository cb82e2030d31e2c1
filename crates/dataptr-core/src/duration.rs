//! Duration literals such as `5m`, `30s`, `1h30m` or `-1.5h`.
//!
//! Grammar: an optional `+`/`-` sign followed by one or more
//! `<number><unit>` tokens, where a number is decimal digits with an
//! optional fractional part. The bare literal `0` needs no unit.
//!
//! | Unit | Meaning |
//! |------|---------|
//! | `ns` | nanoseconds |
//! | `us`, `µs`, `μs` | microseconds |
//! | `ms` | milliseconds |
//! | `s` | seconds |
//! | `m` | minutes |
//! | `h` | hours |
//!
//! Values accumulate as signed 64-bit nanoseconds, so the longest
//! representable duration is roughly 292 years.

use chrono::TimeDelta;
use thiserror::Error;

/// Why a duration literal was rejected. Each variant carries the full input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration '{0}'")]
    Invalid(String),

    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),

    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit { unit: String, input: String },

    #[error("duration '{0}' overflows 64-bit nanoseconds")]
    Overflow(String),
}

const LIMIT: u64 = 1 << 63;

fn unit_nanos(unit: &str) -> Option<u64> {
    Some(match unit {
        "ns" => 1,
        "us" | "\u{00b5}s" | "\u{03bc}s" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        _ => return None,
    })
}

/// Parse a duration literal.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use dataptr::parse_duration;
///
/// assert_eq!(parse_duration("1h30m").unwrap(), TimeDelta::minutes(90));
/// assert_eq!(parse_duration("-250ms").unwrap(), TimeDelta::milliseconds(-250));
/// assert!(parse_duration("5").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<TimeDelta, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());
    let overflow = || DurationError::Overflow(input.to_string());

    if input.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(TimeDelta::zero());
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        let first = s.as_bytes()[0];
        if first != b'.' && !first.is_ascii_digit() {
            return Err(invalid());
        }

        let (whole, rest) = leading_int(s).ok_or_else(overflow)?;
        let has_whole = rest.len() != s.len();
        s = rest;

        let mut fraction = Fraction::default();
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let (parsed, rest_after) = leading_fraction(rest);
            has_fraction = rest_after.len() != rest.len();
            fraction = parsed;
            s = rest_after;
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_len = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let (unit, rest) = s.split_at(unit_len);
        s = rest;
        let per = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        if whole > LIMIT / per {
            return Err(overflow());
        }
        let mut value = whole * per;
        if fraction.digits > 0 {
            value += (fraction.digits as f64 * (per as f64 / fraction.scale)) as u64;
            if value > LIMIT {
                return Err(overflow());
            }
        }
        total = total
            .checked_add(value)
            .filter(|t| *t <= LIMIT)
            .ok_or_else(overflow)?;
    }

    if negative {
        // LIMIT itself maps onto i64::MIN.
        return Ok(TimeDelta::nanoseconds(0i64.wrapping_sub(total as i64)));
    }
    if total > i64::MAX as u64 {
        return Err(overflow());
    }
    Ok(TimeDelta::nanoseconds(total as i64))
}

/// Consume leading decimal digits. `None` on overflow past 2^63.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut x: u64 = 0;
    for b in s[..end].bytes() {
        if x > LIMIT / 10 {
            return None;
        }
        x = x * 10 + u64::from(b - b'0');
        if x > LIMIT {
            return None;
        }
    }
    Some((x, &s[end..]))
}

#[derive(Debug, Clone, Copy)]
struct Fraction {
    digits: u64,
    scale: f64,
}

impl Default for Fraction {
    fn default() -> Self {
        Self {
            digits: 0,
            scale: 1.0,
        }
    }
}

/// Consume fractional digits. Digits past u64 precision are dropped but
/// still consumed.
fn leading_fraction(s: &str) -> (Fraction, &str) {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut fraction = Fraction::default();
    let mut saturated = false;
    for b in s[..end].bytes() {
        if saturated {
            continue;
        }
        if fraction.digits > (LIMIT - 1) / 10 {
            saturated = true;
            continue;
        }
        let next = fraction.digits * 10 + u64::from(b - b'0');
        if next > LIMIT {
            saturated = true;
            continue;
        }
        fraction.digits = next;
        fraction.scale *= 10.0;
    }
    (fraction, &s[end..])
}
