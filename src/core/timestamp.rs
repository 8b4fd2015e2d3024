//! Timestamp rendering for log lines and the file header banner

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// strftime pattern used by the header banner, e.g. `2025-01-08 10:30:45 +0100`
pub const BANNER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Timestamp format options for formatted lines
///
/// # Examples
///
/// ```
/// use lockless_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let timestamp = TimestampFormat::Iso8601.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Local wall-clock time with offset: `2025-01-08 11:30:45 +0100`
    Local,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, rendered in UTC
    ///
    /// An invalid pattern falls back to ISO 8601 rather than failing.
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Local => datetime
                .with_timezone(&Local)
                .format(BANNER_TIME_FORMAT)
                .to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => Self::format_custom(datetime, format_str),
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }

    // chrono's `DelayedFormat` panics in `to_string` on bad specifiers, so
    // render through `fmt::Write` and fall back on error.
    fn format_custom(datetime: &DateTime<Utc>, format_str: &str) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        if write!(out, "{}", datetime.format(format_str)).is_err() {
            return TimestampFormat::Iso8601.format(datetime);
        }
        out
    }
}

/// Current local time rendered for the header banner
pub fn banner_timestamp() -> String {
    Local::now().format(BANNER_TIME_FORMAT).to_string()
}
