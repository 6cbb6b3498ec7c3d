use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

/// Wall-clock source. Countdown logic takes `now` through this seam so timer
/// behavior can be driven deterministically in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Formats a millisecond remainder as zero-padded `HH:MM:SS`.
/// Hours are unbounded; a multi-day window keeps counting past 24.
pub fn format_hms(ms_left: i64) -> String {
    let total_seconds = ms_left.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parses a due duration into minutes: bare minutes (`"30"`) or with an
/// `m`/`h` suffix (`"45m"`, `"2h"`). Positivity is enforced by the store,
/// not here.
pub fn parse_due_minutes(input: &str) -> Result<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("empty due duration"));
    }

    let (num_str, unit) = match input.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&input[..idx], &input[idx..]),
        _ => (input, ""),
    };

    let num: i64 = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid due duration: {input}"))?;

    match unit.to_ascii_lowercase().as_str() {
        "" | "m" => Ok(num),
        "h" => Ok(num * 60),
        _ => Err(anyhow!("unknown duration unit: {unit}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms_zero_pads() {
        assert_eq!(format_hms(59_000), "00:00:59");
        assert_eq!(format_hms(60_000), "00:01:00");
        assert_eq!(format_hms(3_599_000), "00:59:59");
        assert_eq!(format_hms(3_600_000), "01:00:00");
    }

    #[test]
    fn test_format_hms_hours_are_unbounded() {
        // 90 hours and 30 seconds
        assert_eq!(format_hms((90 * 3600 + 30) * 1000), "90:00:30");
    }

    #[test]
    fn test_format_hms_floors_partial_seconds() {
        assert_eq!(format_hms(1_999), "00:00:01");
    }

    #[test]
    fn test_parse_due_minutes() {
        assert_eq!(parse_due_minutes("30").unwrap(), 30);
        assert_eq!(parse_due_minutes("45m").unwrap(), 45);
        assert_eq!(parse_due_minutes("2h").unwrap(), 120);
        assert_eq!(parse_due_minutes(" 10 ").unwrap(), 10);
    }

    #[test]
    fn test_parse_due_minutes_rejects_garbage() {
        assert!(parse_due_minutes("").is_err());
        assert!(parse_due_minutes("soon").is_err());
        assert!(parse_due_minutes("5d").is_err());
    }
}
