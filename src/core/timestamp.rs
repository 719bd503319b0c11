//! Timestamp formatting utilities
//!
//! Used by the console and file strategies to stamp each line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use log_facade::TimestampFormat;
/// use chrono::Utc;
///
/// let stamp = TimestampFormat::Iso8601.format(&Utc::now()).unwrap();
/// assert!(stamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// No timestamp at all
    None,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    ///
    /// Returns `None` for [`TimestampFormat::None`].
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> Option<String> {
        match self {
            TimestampFormat::None => None,
            TimestampFormat::Iso8601 => Some(datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
            TimestampFormat::Rfc3339 => Some(datetime.to_rfc3339()),
            TimestampFormat::UnixMillis => Some(datetime.timestamp_millis().to_string()),
            TimestampFormat::Custom(format_str) => Some(datetime.format(format_str).to_string()),
        }
    }

    /// Format the current time
    #[must_use]
    pub fn now(&self) -> Option<String> {
        self.format(&Utc::now())
    }
}
