//! Log level definitions
//!
//! Levels are ordered from most to least severe, so a "more verbose" level
//! always compares greater: `Fatal < Error < Warn < Info < Debug < Verbose`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Fatal = 0,
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Verbose = 5,
}

impl LogLevel {
    /// Every level, most severe first.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Verbose,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
        }
    }

    /// Whether `self` lets through everything `other` does.
    ///
    /// A logger with threshold `t` emits a message at `level` iff
    /// `t.is_at_least_as_verbose_as(level)`.
    #[inline]
    pub fn is_at_least_as_verbose_as(&self, other: LogLevel) -> bool {
        *self >= other
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Fatal => BrightRed,
            LogLevel::Error => Red,
            LogLevel::Warn => Yellow,
            LogLevel::Info => Green,
            LogLevel::Debug => Blue,
            LogLevel::Verbose => BrightBlack,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FATAL" => Ok(LogLevel::Fatal),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "VERBOSE" | "TRACE" => Ok(LogLevel::Verbose),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(LogLevel::Fatal < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Verbose);
    }

    #[test]
    fn test_is_at_least_as_verbose_as() {
        assert!(LogLevel::Info.is_at_least_as_verbose_as(LogLevel::Warn));
        assert!(LogLevel::Info.is_at_least_as_verbose_as(LogLevel::Info));
        assert!(!LogLevel::Info.is_at_least_as_verbose_as(LogLevel::Debug));
        assert!(LogLevel::Verbose.is_at_least_as_verbose_as(LogLevel::Fatal));
        assert!(!LogLevel::Fatal.is_at_least_as_verbose_as(LogLevel::Error));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("Trace".parse::<LogLevel>(), Ok(LogLevel::Verbose));
        assert_eq!(" info ".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(format!("{:<7}|", LogLevel::Warn), "WARN   |");
        assert_eq!(LogLevel::Verbose.to_string(), "VERBOSE");
    }

    #[test]
    fn test_serde_uppercase() {
        let json = serde_json::to_string(&LogLevel::Debug).unwrap();
        assert_eq!(json, "\"DEBUG\"");
        let level: LogLevel = serde_json::from_str("\"FATAL\"").unwrap();
        assert_eq!(level, LogLevel::Fatal);
    }
}
