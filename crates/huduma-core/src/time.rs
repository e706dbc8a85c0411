use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("date cannot be empty")]
    Empty,
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid date format: expected RFC 3339, YYYY-MM-DD or YYYY-MM-DD HH:MM")]
    InvalidDateTime,
    #[error("invalid display format: {0}")]
    InvalidFormat(String),
}

/// Parses a stored date value into local wall-clock time.
///
/// RFC 3339 timestamps carry their own offset and are converted to local
/// time; bare dates and datetimes are taken as already local.
pub fn parse_display_date(input: &str) -> Result<NaiveDateTime, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .ok_or(TimeParseError::InvalidDate);
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }

    Err(TimeParseError::InvalidDateTime)
}

/// Rejects formats that cannot render a naive date, including offset
/// specifiers such as `%z` that parse but fail at render time.
pub fn validate_date_format(format: &str) -> Result<(), TimeParseError> {
    if format.trim().is_empty() {
        return Err(TimeParseError::InvalidFormat(format.to_string()));
    }
    render(&NaiveDateTime::default(), format).map(|_| ())
}

/// Renders a parsed date with `format`, e.g. `Jan 5, 2024` for the default.
pub fn format_display_date(value: &NaiveDateTime, format: &str) -> Result<String, TimeParseError> {
    validate_date_format(format)?;
    render(value, format)
}

fn render(value: &NaiveDateTime, format: &str) -> Result<String, TimeParseError> {
    let items = StrftimeItems::new(format);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        return Err(TimeParseError::InvalidFormat(format.to_string()));
    }
    let mut out = String::new();
    write!(&mut out, "{}", value.format_with_items(items))
        .map_err(|_| TimeParseError::InvalidFormat(format.to_string()))?;
    Ok(out)
}
