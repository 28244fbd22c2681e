//! Timestamp parsing shared by issue records and closed-date bounds
//!
//! Every value is normalised to UTC. A bare calendar date means midnight
//! UTC of that day, a naive date-time is read as UTC, and an RFC 3339
//! string keeps its explicit offset before being converted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const OFFSET_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a date or timestamp string into a UTC datetime
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty timestamp".to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    // ISO 8601 offsets without a colon, e.g. `+0000`
    if let Ok(dt) = DateTime::parse_from_str(input, OFFSET_DATETIME_FORMAT) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(format!("Invalid date or timestamp: {}", input))
}
