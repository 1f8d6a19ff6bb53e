//! Conversions between user-facing date strings and stored epoch seconds.
//! Only the command-line layer deals in strings; the store only sees seconds.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::fmt::Write;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Local midnight of `date`, as epoch seconds.
pub fn date_to_timestamp(date: NaiveDate) -> Option<i64> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp())
}

/// `YYYY-MM-DD` → epoch seconds. Empty or malformed input yields None.
pub fn date_str_to_timestamp(s: &str) -> Option<i64> {
    parse_date(s).and_then(date_to_timestamp)
}

/// True when every specifier in `format` is one chrono understands.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Epoch seconds → date string in `format` (local time).
/// None when the timestamp is out of range or `format` is invalid.
pub fn timestamp_to_date_str(ts: i64, format: &str) -> Option<String> {
    let local = DateTime::from_timestamp(ts, 0)?.with_timezone(&Local);

    let mut out = String::new();
    write!(out, "{}", local.format(format)).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_round_trips_through_timestamp() {
        let ts = date_str_to_timestamp("2024-03-15").expect("valid date");
        assert_eq!(
            timestamp_to_date_str(ts, DATE_FORMAT).as_deref(),
            Some("2024-03-15")
        );
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert_eq!(date_str_to_timestamp(""), None);
        assert_eq!(date_str_to_timestamp("15/03/2024"), None);
        assert_eq!(date_str_to_timestamp("2024-02-30"), None);
    }

    #[test]
    fn invalid_format_yields_none_instead_of_panicking() {
        assert!(!is_valid_date_format("%Q"));
        assert_eq!(timestamp_to_date_str(1_700_000_000, "%Q"), None);

        assert!(is_valid_date_format("%d/%m/%Y"));
        assert!(timestamp_to_date_str(1_700_000_000, "%d/%m/%Y").is_some());
    }
}
