//! Seconds to SRT timestamp conversion and back

use crate::error::{ShortForgeError, ShortForgeResult};
use regex::Regex;
use std::sync::OnceLock;

fn time_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+):(\d+):(\d+),(\d+)\s*-->\s*(\d+):(\d+):(\d+),(\d+)")
            .expect("time range pattern is valid")
    })
}

/// Format seconds as a zero-padded `HH:MM:SS,mmm` timestamp.
///
/// Milliseconds are rounded to the nearest integer; a carry out of the
/// millisecond field (e.g. 1.9996s) rolls into the seconds so the field
/// stays exactly 3 digits. The hour field widens past two digits when
/// needed.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mut whole = seconds.floor() as u64;
    let mut ms = ((seconds - whole as f64) * 1000.0).round() as u64;
    if ms >= 1000 {
        whole += 1;
        ms -= 1000;
    }
    let s = whole % 60;
    let m = (whole / 60) % 60;
    let h = whole / 3600;
    format!("{:02}:{:02}:{:02},{:03}", h, m, s, ms)
}

/// Parse a single `HH:MM:SS,mmm` timestamp into seconds.
pub fn parse_timestamp(value: &str) -> ShortForgeResult<f64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2}),(\d{1,3})$").expect("timestamp pattern is valid")
    });

    let caps = re
        .captures(value.trim())
        .ok_or_else(|| ShortForgeError::InvalidTimestamp {
            value: value.to_string(),
        })?;

    let field = |i: usize| -> f64 { caps[i].parse::<u64>().unwrap_or(0) as f64 };
    Ok(field(1) * 3600.0 + field(2) * 60.0 + field(3) + field(4) / 1000.0)
}

/// Scan a line for a `start --> end` timestamp pair and return both ends
/// as seconds. Returns `None` when the line carries no such pair.
pub fn parse_time_range(line: &str) -> Option<(f64, f64)> {
    let caps = time_range_regex().captures(line)?;
    let field = |i: usize| -> f64 { caps[i].parse::<u64>().unwrap_or(0) as f64 };
    let start = field(1) * 3600.0 + field(2) * 60.0 + field(3) + field(4) / 1000.0;
    let end = field(5) * 3600.0 + field(6) * 60.0 + field(7) + field(8) / 1000.0;
    Some((start, end))
}
