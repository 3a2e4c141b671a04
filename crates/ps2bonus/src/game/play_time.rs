//! Play-time string form.
//!
//! The library store keeps play-time in the constant TimeSpan layout
//! `[d.]hh:mm:ss[.fffffff]`, where the fraction is in 100ns ticks.

use std::time::Duration;

const SECS_PER_DAY: u64 = 24 * 60 * 60;
const NANOS_PER_TICK: u32 = 100;
const TICK_DIGITS: usize = 7;

/// Format a duration as `[d.]hh:mm:ss[.fffffff]`
pub fn format_play_time(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / SECS_PER_DAY;
    let hours = (total % SECS_PER_DAY) / 3600;
    let minutes = (total % 3600) / 60;
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

/// Parse a play-time string written by [`format_play_time`].
///
/// Also accepts `hh:mm` and a bare day count. Returns `None` for anything else.
pub fn parse_play_time(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let parts: Vec<&str> = s.split(':').collect();
    let (days, hours, minutes, seconds_part) = match parts.as_slice() {
        [days] => {
            return parse_number(days)
                .and_then(|d| d.checked_mul(SECS_PER_DAY))
                .map(Duration::from_secs);
        }
        [head, minutes] => {
            let (days, hours) = split_days(head)?;
            (days, hours, parse_number(minutes)?, None)
        }
        [head, minutes, seconds] => {
            let (days, hours) = split_days(head)?;
            (days, hours, parse_number(minutes)?, Some(*seconds))
        }
        _ => return None,
    };

    if hours >= 24 || minutes >= 60 {
        return None;
    }

    let (seconds, nanos) = match seconds_part {
        Some(part) => parse_seconds(part)?,
        None => (0, 0),
    };

    // Day counts too large for u64 seconds are treated as corrupt
    let total = days
        .checked_mul(SECS_PER_DAY)?
        .checked_add(hours * 3600 + minutes * 60 + seconds)?;
    Some(Duration::new(total, nanos))
}

fn split_days(head: &str) -> Option<(u64, u64)> {
    match head.split_once('.') {
        Some((days, hours)) => Some((parse_number(days)?, parse_number(hours)?)),
        None => Some((0, parse_number(head)?)),
    }
}

fn parse_seconds(part: &str) -> Option<(u64, u32)> {
    let (seconds, fraction) = match part.split_once('.') {
        Some((s, f)) => (parse_number(s)?, Some(f)),
        None => (parse_number(part)?, None),
    };
    if seconds >= 60 {
        return None;
    }

    let nanos = match fraction {
        Some(f) if f.is_empty() || f.len() > TICK_DIGITS => return None,
        Some(f) => {
            let padded = format!("{f:0<width$}", width = TICK_DIGITS);
            let ticks: u32 = padded.parse().ok()?;
            ticks * NANOS_PER_TICK
        }
        None => 0,
    };
    Some((seconds, nanos))
}

fn parse_number(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
