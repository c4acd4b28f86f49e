//! Duration grammar: signed decimal numbers with unit suffixes.
//!
//! Accepted units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. Several
//! components may be chained (`1h30m`) and each may carry a fraction
//! (`1.5s`). A bare `0` is the only unitless value.

use std::time::Duration;

use super::{Kind, Scalar, ValueError};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_SECOND * 60),
        "h" => Some(NANOS_PER_SECOND * 3_600),
        _ => None,
    }
}

fn invalid(raw: &str, reason: impl Into<String>) -> ValueError {
    ValueError::InvalidDuration {
        value: raw.to_owned(),
        reason: reason.into(),
    }
}

/// Split the longest prefix whose characters satisfy `pred`.
fn take_while(input: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = input
        .char_indices()
        .find(|(_, ch)| !pred(*ch))
        .map_or(input.len(), |(idx, _)| idx);
    input.split_at(end)
}

fn digits_value(raw: &str, digits: &str) -> Result<u128, ValueError> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse::<u128>()
        .map_err(|_| invalid(raw, "number out of range"))
}

/// Parse a duration such as `300ms`, `1.5s` or `2h45m`.
///
/// # Errors
///
/// Returns [`ValueError::InvalidDuration`] for empty input, a missing or
/// unknown unit, a negative value, or a value too large to represent.
#[expect(clippy::integer_division, reason = "fractions truncate to whole nanoseconds")]
pub fn parse_duration(raw: &str) -> Result<Duration, ValueError> {
    let (negative, mut rest) = match raw.strip_prefix('-') {
        Some(tail) => (true, tail),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid(raw, "empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = take_while(rest, |ch| ch.is_ascii_digit());
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(after_dot) => take_while(after_dot, |ch| ch.is_ascii_digit()),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid(raw, "expected a number"));
        }
        let (unit, tail) = take_while(after_number, |ch| ch != '.' && !ch.is_ascii_digit());
        if unit.is_empty() {
            return Err(invalid(raw, "missing unit"));
        }
        let scale = unit_nanos(unit).ok_or_else(|| invalid(raw, format!("unknown unit '{unit}'")))?;

        // Fractions beyond nanosecond precision are truncated.
        let kept = fraction.get(..18).unwrap_or(fraction);
        let divisor = 10_u128.pow(u32::try_from(kept.len()).unwrap_or(18));
        let component = digits_value(raw, whole)?
            .checked_mul(scale)
            .and_then(|nanos| {
                let fractional = digits_value(raw, kept).ok()?.checked_mul(scale)? / divisor;
                nanos.checked_add(fractional)
            })
            .ok_or_else(|| invalid(raw, "duration out of range"))?;
        total = total
            .checked_add(component)
            .ok_or_else(|| invalid(raw, "duration out of range"))?;
        rest = tail;
    }

    if negative && total > 0 {
        return Err(invalid(raw, "negative durations are not supported"));
    }
    let nanos = u64::try_from(total).map_err(|_| invalid(raw, "duration out of range"))?;
    Ok(Duration::from_nanos(nanos))
}

fn push_fraction(out: &mut String, value: u128, width: usize) {
    if value == 0 {
        return;
    }
    let digits = format!("{value:0width$}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

/// Format a duration compactly, dropping zero components.
///
/// Durations under a second use the largest fitting sub-second unit
/// (`300ms`, `1.5µs`); longer ones chain hours, minutes and seconds
/// (`1h30m`, `1m30.5s`). Zero formats as `0s`.
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "unit decomposition is integer arithmetic by construction"
)]
pub fn format_duration(value: Duration) -> String {
    let total = value.as_nanos();
    if total == 0 {
        return "0s".to_owned();
    }
    let mut out = String::new();
    if total < NANOS_PER_SECOND {
        let (scale, unit, width) = if total < NANOS_PER_MICRO {
            (1, "ns", 0)
        } else if total < NANOS_PER_MILLI {
            (NANOS_PER_MICRO, "\u{b5}s", 3)
        } else {
            (NANOS_PER_MILLI, "ms", 6)
        };
        out.push_str(&(total / scale).to_string());
        push_fraction(&mut out, total % scale, width);
        out.push_str(unit);
        return out;
    }

    let secs = value.as_secs();
    let hours = secs / SECONDS_PER_HOUR;
    let minutes = (secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = secs % SECONDS_PER_MINUTE;
    let nanos = u128::from(value.subsec_nanos());
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 || nanos > 0 {
        out.push_str(&seconds.to_string());
        push_fraction(&mut out, nanos, 9);
        out.push('s');
    }
    out
}

impl Scalar for Duration {
    const LABEL: &'static str = "duration";

    fn kind() -> Kind {
        Kind::Duration
    }

    fn parse_scalar(raw: &str) -> Result<Option<Self>, ValueError> {
        parse_duration(raw).map(Some)
    }

    fn format_scalar(&self) -> String {
        format_duration(*self)
    }

    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
