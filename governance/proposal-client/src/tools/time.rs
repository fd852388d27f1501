//! Unix timestamp helpers

use chrono::{DateTime, Utc};

/// Current time as seconds since the Unix epoch
pub fn unix_timestamp_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

/// Formats a Unix timestamp as an ISO-8601 date-time without a zone suffix
pub fn format_unix_timestamp(timestamp: u64) -> Option<String> {
    let timestamp = i64::try_from(timestamp).ok()?;
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|date| date.format("%Y-%m-%dT%H:%M:%S").to_string())
}
