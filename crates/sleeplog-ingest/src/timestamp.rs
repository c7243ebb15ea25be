//! Diary timestamp parsing.
//!
//! Diaries arrive from spreadsheets in a handful of layouts. `Auto` tries
//! ISO-8601 first and falls back to the US `month/day/year` layouts that
//! spreadsheet exports produce.

use chrono::NaiveDateTime;

use sleeplog_model::TimestampFormat;

/// Layouts tried, in order, by [`TimestampFormat::Auto`].
pub const AUTO_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Parse a diary timestamp, returning a description of the failure.
pub fn parse_timestamp(raw: &str, format: &TimestampFormat) -> Result<NaiveDateTime, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("empty timestamp".to_string());
    }
    match format {
        TimestampFormat::Explicit(pattern) => NaiveDateTime::parse_from_str(value, pattern)
            .map_err(|error| format!("'{value}' does not match '{pattern}': {error}")),
        TimestampFormat::Auto => AUTO_FORMATS
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(value, pattern).ok())
            .ok_or_else(|| format!("'{value}' is not a recognised date/time")),
    }
}
