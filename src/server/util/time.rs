//! Timestamp formatting.
//!
//! Refresh times are stored as naive UTC timestamps and reported to clients in a single
//! human-readable format without timezone suffix or fractional seconds.

use chrono::NaiveDateTime;

/// Format used for every timestamp reported by the API and on the summary image
pub static TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a UTC timestamp as `YYYY-MM-DD HH:MM:SS`
///
/// Sub-second precision is dropped, not rounded.
///
/// # Example
/// ```ignore
/// let ts = NaiveDate::from_ymd_opt(2025, 10, 22).unwrap().and_hms_milli_opt(18, 5, 9, 999).unwrap();
/// assert_eq!(format_timestamp(ts), "2025-10-22 18:05:09");
/// ```
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
