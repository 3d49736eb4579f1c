//! Conversions from raw field text to typed values.
//!
//! Every converter takes the field name (for error reporting) and the raw
//! captured text. Malformed input is always an [`ExtractionError::Format`];
//! nothing is defaulted.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::extraction::ExtractionError;

/// `Mon Jan 19 16:58:00 GMT-06:00 2026`
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S GMT%:z %Y";

/// `17:34`
pub const CLOCK_FORMAT: &str = "%H:%M";

fn format_error(field: &str, value: &str, expected: &'static str) -> ExtractionError {
    ExtractionError::Format {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// Parse a decimal number, dropping a trailing degree sign or hemisphere letter.
///
/// Hemisphere letters carry no sign: `20.6° S` is `20.6`.
pub fn decimal(field: &str, raw: &str) -> Result<f64, ExtractionError> {
    let trimmed = raw
        .trim()
        .trim_end_matches(['N', 'S', 'E', 'W'])
        .trim_end()
        .trim_end_matches('°')
        .trim();

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format_error(field, raw, "decimal number"))
}

/// Parse an integer that may contain thousands separators (`392,633`).
pub fn integer(field: &str, raw: &str) -> Result<i64, ExtractionError> {
    let digits: String = raw.trim().chars().filter(|c| *c != ',').collect();

    digits
        .parse::<i64>()
        .map_err(|_| format_error(field, raw, "integer"))
}

/// Parse a full timestamp with its explicit UTC offset.
pub fn timestamp(field: &str, raw: &str) -> Result<DateTime<FixedOffset>, ExtractionError> {
    DateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| format_error(field, raw, "timestamp like 'Mon Jan 19 16:58:00 GMT-06:00 2026'"))
}

/// Parse an `HH:MM` time of day.
pub fn clock(field: &str, raw: &str) -> Result<NaiveTime, ExtractionError> {
    NaiveTime::parse_from_str(raw.trim(), CLOCK_FORMAT)
        .map_err(|_| format_error(field, raw, "clock time HH:MM"))
}

/// Parse an `HH:MM` time of day and anchor it to `date`.
pub fn clock_on(field: &str, raw: &str, date: NaiveDate) -> Result<NaiveDateTime, ExtractionError> {
    clock(field, raw).map(|time| date.and_time(time))
}

/// Keep the raw text, trimmed; empty text is malformed.
pub fn text(field: &str, raw: &str) -> Result<String, ExtractionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format_error(field, raw, "non-empty text"));
    }
    Ok(trimmed.to_string())
}
