//! Filename timestamp parsing
//!
//! Strategies are tried in a fixed order and the first success wins:
//! 1. An 8-digit YYYYMMDD run beginning with "20" anywhere in the name,
//!    parsed as a date at midnight.
//! 2. Exact stem match "YYYY-MM-DD HH-MM-SS".
//! 3. Exact stem match "YYYYMMDD_HHMMSS".
//!
//! The date-only rule deliberately outranks the exact patterns: a name
//! like "20240115_143000.mp4" resolves to 2024-01-15 00:00:00.

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

lazy_static! {
    /// Pattern: YYYYMMDD with the year starting at 20xx
    static ref PATTERN_DATE: Regex = Regex::new(r"(20\d{2})(\d{2})(\d{2})").unwrap();
}

/// Parse a timestamp from a filename
pub fn parse_filename_time(filename: &str) -> Option<NaiveDateTime> {
    if let Some(dt) = try_embedded_date(filename) {
        trace!(filename, "Matched embedded YYYYMMDD date");
        return Some(dt);
    }

    // Exact patterns apply to the stem, without the extension
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(filename);

    if let Ok(dt) = NaiveDateTime::parse_from_str(stem, "%Y-%m-%d %H-%M-%S") {
        trace!(filename, "Matched separated date-time stem");
        return Some(dt);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(stem, "%Y%m%d_%H%M%S") {
        trace!(filename, "Matched compact date-time stem");
        return Some(dt);
    }

    None
}

fn try_embedded_date(s: &str) -> Option<NaiveDateTime> {
    let caps = PATTERN_DATE.captures(s)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let day: u32 = caps.get(3)?.as_str().parse().ok()?;

    // Impossible calendar dates fall through to the exact patterns
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_embedded_date() {
        let dt = parse_filename_time("VID_20240115_sunset.mp4").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_embedded_date_outranks_exact_patterns() {
        // The YYYYMMDD rule fires first, so the time components are
        // dropped and the item lands at midnight
        let dt = parse_filename_time("20240115_143000.mp4").unwrap();
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.minute(), 0);
    }

    #[test]
    fn test_separated_stem() {
        let dt = parse_filename_time("2024-01-15 14-30-00.mov").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_compact_stem_without_20_prefix() {
        // Year outside 20xx misses the regex but matches the compact stem
        let dt = parse_filename_time("19991231_235959.avi").unwrap();
        assert_eq!(dt.year(), 1999);
        assert_eq!(dt.hour(), 23);
        assert_eq!(dt.second(), 59);
    }

    #[test]
    fn test_invalid_embedded_date_falls_through() {
        // "20241345" is not a real date; the stem then matches nothing
        assert!(parse_filename_time("clip_20241345.mp4").is_none());
    }

    #[test]
    fn test_no_match() {
        assert!(parse_filename_time("holiday_video.mp4").is_none());
        assert!(parse_filename_time("IMG_0001.jpg").is_none());
    }
}
