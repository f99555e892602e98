//! Storage layer: the SQLite pool, schema and one repository per table.
//!
//! Repositories are stateless and take a `&mut SqliteConnection`, so the same
//! query runs against a pooled connection or inside a transaction.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Calendar days are stored as `YYYY-MM-DD` text
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).with_context(|| format!("Invalid stored date: {}", value))
}

/// RFC 3339, UTC, fixed microsecond precision so text order matches time order
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid stored timestamp: {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "2024-01-05");
        assert_eq!(parse_date("2024-01-05").unwrap(), date);
        assert!(parse_date("01/05/2024").is_err());
    }

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap();
        let text = format_timestamp(at);
        assert_eq!(text, "2024-01-01T08:30:00.000000Z");
        assert_eq!(parse_timestamp(&text).unwrap(), at);
    }
}
