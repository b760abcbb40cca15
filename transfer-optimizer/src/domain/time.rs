//! Service time handling.
//!
//! Schedules store times as whole seconds since the start of the service
//! day. Trips running past midnight keep counting, so "25:10" is a valid time
//! on the same service day. This module parses and formats those times for
//! test fixtures, logs and debug output.

use chrono::Duration;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Parse a service time in "H:MM", "HH:MM" or "HH:MM:SS" format.
///
/// Hours may exceed 23 for trips running past midnight.
///
/// # Examples
///
/// ```
/// use transfer_optimizer::domain::parse_time;
///
/// assert_eq!(parse_time("10:00").unwrap(), 36_000);
/// assert_eq!(parse_time("9:05:30").unwrap(), 32_730);
/// assert_eq!(parse_time("25:10").unwrap(), 90_600);
///
/// assert!(parse_time("1000").is_err());
/// assert!(parse_time("10:6").is_err());
/// assert!(parse_time("10:60").is_err());
/// ```
pub fn parse_time(s: &str) -> Result<i32, TimeError> {
    let mut fields = s.split(':');

    let hour = fields
        .next()
        .and_then(|h| parse_digits(h, 1, 2))
        .ok_or_else(|| TimeError::new(s, "invalid hour digits"))?;
    let minute = fields
        .next()
        .ok_or_else(|| TimeError::new(s, "expected HH:MM format"))
        .and_then(|m| {
            parse_digits(m, 2, 2).ok_or_else(|| TimeError::new(s, "invalid minute digits"))
        })?;
    let second = match fields.next() {
        Some(sec) => {
            parse_digits(sec, 2, 2).ok_or_else(|| TimeError::new(s, "invalid second digits"))?
        }
        None => 0,
    };

    if fields.next().is_some() {
        return Err(TimeError::new(s, "too many fields"));
    }
    if minute > 59 {
        return Err(TimeError::new(s, "minute must be 0-59"));
    }
    if second > 59 {
        return Err(TimeError::new(s, "second must be 0-59"));
    }

    Ok(hour * 3600 + minute * 60 + second)
}

/// Parse a whitespace separated list of service times.
///
/// Used to write schedules compactly, e.g. `"10:00 10:12 10:30"`.
pub fn parse_time_sequence(s: &str) -> Result<Vec<i32>, TimeError> {
    s.split_whitespace().map(parse_time).collect()
}

/// Format a service time as "HH:MM", or "HH:MM:SS" when seconds are present.
///
/// # Examples
///
/// ```
/// use transfer_optimizer::domain::format_time;
///
/// assert_eq!(format_time(36_000), "10:00");
/// assert_eq!(format_time(36_005), "10:00:05");
/// assert_eq!(format_time(90_600), "25:10");
/// ```
pub fn format_time(time: i32) -> String {
    let sign = if time < 0 { "-" } else { "" };
    let t = time.unsigned_abs();
    let (hour, minute, second) = (t / 3600, (t / 60) % 60, t % 60);

    if second == 0 {
        format!("{sign}{hour:02}:{minute:02}")
    } else {
        format!("{sign}{hour:02}:{minute:02}:{second:02}")
    }
}

/// Format a duration in seconds compactly, e.g. "1h2m", "2m30s", "0s".
pub fn format_duration(seconds: i32) -> String {
    let duration = Duration::seconds(i64::from(seconds));
    if duration.is_zero() {
        return "0s".to_string();
    }

    let sign = if seconds < 0 { "-" } else { "" };
    let duration = duration.abs();
    let hours = duration.num_hours();
    let minutes = duration.num_minutes() % 60;
    let secs = duration.num_seconds() % 60;

    let mut out = sign.to_string();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if secs > 0 {
        out.push_str(&format!("{secs}s"));
    }
    out
}

/// Parse a field of ASCII digits with a length in `min_len..=max_len`.
fn parse_digits(s: &str, min_len: usize, max_len: usize) -> Option<i32> {
    if s.len() < min_len || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
