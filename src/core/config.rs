//! Logger configuration
//!
//! A [`LoggerConfig`] describes a console-backed root logger. It can be read
//! from JSON or from `LOG_FACADE_*` environment variables.

use super::decoration::LevelPrefixDecoration;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::logger::Logger;
use super::timestamp::TimestampFormat;
use crate::strategies::ConsoleStrategy;
use serde::{Deserialize, Serialize};

/// Environment variable holding the threshold, e.g. `debug`
pub const ENV_LEVEL: &str = "LOG_FACADE_LEVEL";
/// Environment variable toggling colours, `true`/`false`/`1`/`0`
pub const ENV_COLORS: &str = "LOG_FACADE_COLORS";
/// Environment variable toggling the level prefix decoration
pub const ENV_LEVEL_PREFIX: &str = "LOG_FACADE_LEVEL_PREFIX";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: LogLevel,
    /// Add a [`LevelPrefixDecoration`] after the built-in decoration
    pub level_prefix: bool,
    pub colors: bool,
    pub timestamp: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            level_prefix: false,
            colors: true,
            timestamp: TimestampFormat::None,
        }
    }
}

impl LoggerConfig {
    /// Parse a JSON document; absent fields keep their defaults.
    ///
    /// ```
    /// use log_facade::{LoggerConfig, LogLevel};
    ///
    /// let config = LoggerConfig::from_json(r#"{"level": "DEBUG"}"#).unwrap();
    /// assert_eq!(config.level, LogLevel::Debug);
    /// assert!(config.colors);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`, starting from the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(ENV_LEVEL) {
            config.level = level
                .parse::<LogLevel>()
                .map_err(|message: String| LoggerError::config(ENV_LEVEL, message))?;
        }
        if let Some(colors) = lookup(ENV_COLORS) {
            config.colors = parse_flag(ENV_COLORS, &colors)?;
        }
        if let Some(prefix) = lookup(ENV_LEVEL_PREFIX) {
            config.level_prefix = parse_flag(ENV_LEVEL_PREFIX, &prefix)?;
        }

        Ok(config)
    }

    /// Build a console-backed root logger.
    pub fn build(&self) -> Logger {
        let console = ConsoleStrategy::with_colors(self.colors)
            .with_timestamp_format(self.timestamp.clone());
        let mut logger = Logger::new(self.level, console);
        if self.level_prefix {
            logger.add_decoration(LevelPrefixDecoration::new());
        }
        logger
    }
}

impl Logger {
    /// Create a root logger from a [`LoggerConfig`]
    pub fn from_config(config: &LoggerConfig) -> Logger {
        config.build()
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LoggerError::config(
            key,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert!(!config.level_prefix);
        assert_eq!(config.timestamp, TimestampFormat::None);
    }

    #[test]
    fn test_from_json_full() {
        let config = LoggerConfig::from_json(
            r#"{"level":"VERBOSE","level_prefix":true,"colors":false,"timestamp":"iso8601"}"#,
        )
        .unwrap();
        assert_eq!(config.level, LogLevel::Verbose);
        assert!(config.level_prefix);
        assert!(!config.colors);
        assert_eq!(config.timestamp, TimestampFormat::Iso8601);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = LoggerConfig::from_json(r#"{"lvl":"INFO"}"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_from_lookup() {
        let config = LoggerConfig::from_lookup(env(&[
            (ENV_LEVEL, "warning"),
            (ENV_COLORS, "0"),
            (ENV_LEVEL_PREFIX, "on"),
        ]))
        .unwrap();
        assert_eq!(config.level, LogLevel::Warn);
        assert!(!config.colors);
        assert!(config.level_prefix);
    }

    #[test]
    fn test_from_lookup_invalid_values() {
        let err = LoggerConfig::from_lookup(env(&[(ENV_LEVEL, "loud")])).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { ref component, .. } if component == ENV_LEVEL));

        let err = LoggerConfig::from_lookup(env(&[(ENV_COLORS, "maybe")])).unwrap_err();
        assert!(err.to_string().contains("expected a boolean"));
    }

    #[test]
    fn test_build_applies_level_and_prefix() {
        let config = LoggerConfig {
            level: LogLevel::Error,
            level_prefix: true,
            ..LoggerConfig::default()
        };
        let logger = Logger::from_config(&config);
        assert_eq!(logger.log_level(), LogLevel::Error);
        assert_eq!(logger.decorations().len(), 2);
        assert_eq!(logger.decorate(LogLevel::Error, "x".into()), "ERROR     x");
    }
}
