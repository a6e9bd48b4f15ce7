//! Time-span notation for [`Duration`]
//!
//! Accepted: `d`, `[d.]hh:mm`, `[d.]hh:mm:ss`, `[d.]hh:mm:ss.fffffff`.
//! Fractions carry at most seven digits (100ns ticks).

use crate::error::ParseFailure;
use std::time::Duration;

const NANOS_PER_TICK: u32 = 100;
const MAX_FRACTION_DIGITS: usize = 7;

/// Parse time-span text into a [`Duration`]
pub fn parse_span(text: &str) -> Result<Duration, ParseFailure> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseFailure::new("empty time span"));
    }
    if text.starts_with('-') {
        return Err(ParseFailure::new("negative time spans are not supported"));
    }

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() == 1 {
        let days = parse_component(parts[0], "days", u64::MAX)?;
        return days_to_duration(days, 0, 0, 0, 0);
    }
    if parts.len() > 3 {
        return Err(ParseFailure::new("too many ':' separated components"));
    }

    let (days, hours) = match parts[0].split_once('.') {
        Some((d, h)) => (parse_component(d, "days", u64::MAX)?, h),
        None => (0, parts[0]),
    };
    let hours = parse_component(hours, "hours", 23)?;
    let minutes = parse_component(parts[1], "minutes", 59)?;

    let (seconds, nanos) = match parts.get(2) {
        None => (0, 0),
        Some(sec) => match sec.split_once('.') {
            Some((s, frac)) => (parse_component(s, "seconds", 59)?, parse_fraction(frac)?),
            None => (parse_component(sec, "seconds", 59)?, 0),
        },
    };

    days_to_duration(days, hours, minutes, seconds, nanos)
}

/// Render a [`Duration`] in time-span notation
pub fn format_span(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    let ticks = duration.subsec_nanos() / NANOS_PER_TICK;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if ticks > 0 {
        out.push_str(&format!(".{ticks:07}"));
    }
    out
}

fn parse_component(text: &str, name: &str, max: u64) -> Result<u64, ParseFailure> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseFailure::new(format!("{name} component '{text}' is not a number")));
    }
    let value: u64 = text
        .parse()
        .map_err(|_| ParseFailure::new(format!("{name} component '{text}' is too large")))?;
    if value > max {
        return Err(ParseFailure::new(format!("{name} must be at most {max}, got {value}")));
    }
    Ok(value)
}

fn parse_fraction(text: &str) -> Result<u32, ParseFailure> {
    if text.is_empty()
        || text.len() > MAX_FRACTION_DIGITS
        || !text.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseFailure::new(format!(
            "fraction '{text}' must be 1 to {MAX_FRACTION_DIGITS} digits"
        )));
    }
    let padded = format!("{text:0<width$}", width = MAX_FRACTION_DIGITS);
    let ticks: u32 = padded
        .parse()
        .map_err(|_| ParseFailure::new(format!("fraction '{text}' is not a number")))?;
    Ok(ticks * NANOS_PER_TICK)
}

fn days_to_duration(
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
    nanos: u32,
) -> Result<Duration, ParseFailure> {
    let secs = days
        .checked_mul(86_400)
        .and_then(|s| s.checked_add(hours * 3_600 + minutes * 60 + seconds))
        .ok_or_else(|| ParseFailure::new("time span is too large"))?;
    Ok(Duration::new(secs, nanos))
}
