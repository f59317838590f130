//! Timestamp conventions for stored rows.
//!
//! Every timestamp is written as UTC text in SQLite's `datetime()` layout
//! (`YYYY-MM-DD HH:MM:SS`). The layout is fixed-width, so ordering and
//! range checks on the text column agree with chronological order.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Storage layout for timestamps.
pub const DB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a UTC instant for storage.
pub fn to_db_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(DB_TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp back into a UTC instant.
///
/// Returns `None` for anything that is not in the storage layout.
pub fn from_db_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, DB_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
