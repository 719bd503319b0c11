//! Console strategy implementation

use crate::core::{LogLevel, LogStrategy, TimestampFormat, UnifiedLog};
#[cfg(feature = "console")]
use colored::Colorize;
use std::error::Error;
use std::sync::Arc;

/// Writes to the terminal.
///
/// ERROR and FATAL lines go to stderr with the error appended, WARN also
/// goes to stderr, everything else to stdout. A category is shown as a
/// `[name]` prefix.
#[derive(Debug, Clone)]
pub struct ConsoleStrategy {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    category: Option<String>,
}

impl ConsoleStrategy {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
            timestamp_format: TimestampFormat::None,
            category: None,
        }
    }

    /// Colours only take effect with the `console` feature.
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set the timestamp format for this strategy
    ///
    /// # Examples
    ///
    /// ```
    /// use log_facade::strategies::ConsoleStrategy;
    /// use log_facade::TimestampFormat;
    ///
    /// let console = ConsoleStrategy::new()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// The line written for one message.
    pub(crate) fn render(&self, level: LogLevel, msg: &str, err: Option<&dyn Error>) -> String {
        let mut line = String::with_capacity(msg.len() + 32);

        if let Some(stamp) = self.timestamp_format.now() {
            line.push('[');
            line.push_str(&stamp);
            line.push_str("] ");
        }

        line.push_str(&self.level_label(level));
        line.push(' ');

        if let Some(ref category) = self.category {
            line.push('[');
            line.push_str(category);
            line.push_str("] ");
        }

        line.push_str(msg);

        if let Some(err) = err {
            line.push(' ');
            line.push_str(&err.to_string());
        }

        line
    }

    #[cfg(feature = "console")]
    fn level_label(&self, level: LogLevel) -> String {
        let label = format!("{:7}", level.to_str());
        if self.use_colors {
            label.color(level.color_code()).to_string()
        } else {
            label
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_label(&self, level: LogLevel) -> String {
        format!("{:7}", level.to_str())
    }
}

impl Default for ConsoleStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl LogStrategy for ConsoleStrategy {
    fn category(self: Arc<Self>, name: &str) -> Arc<dyn LogStrategy> {
        let category = match &self.category {
            Some(parent) => format!("{parent}.{name}"),
            None => name.to_string(),
        };
        Arc::new(ConsoleStrategy {
            category: Some(category),
            ..(*self).clone()
        })
    }

    fn verbose(&self, msg: &str) {
        self.log(LogLevel::Verbose, msg, None);
    }

    fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, msg, None);
    }

    fn info(&self, msg: &str) {
        self.log(LogLevel::Info, msg, None);
    }

    fn warn(&self, msg: &str, err: Option<&dyn Error>) {
        self.log(LogLevel::Warn, msg, err);
    }

    fn error(&self, msg: &str, err: Option<&dyn Error>) {
        self.log(LogLevel::Error, msg, err);
    }

    fn fatal(&self, msg: &str, err: Option<&dyn Error>) {
        self.log(LogLevel::Fatal, msg, err);
    }

    fn unified(&self) -> Option<&dyn UnifiedLog> {
        Some(self)
    }
}

impl UnifiedLog for ConsoleStrategy {
    fn log(&self, level: LogLevel, msg: &str, err: Option<&dyn Error>) {
        // Warn and above go to stderr, the rest to stdout
        match level {
            LogLevel::Fatal | LogLevel::Error | LogLevel::Warn => {
                eprintln!("{}", self.render(level, msg, err))
            }
            _ => println!("{}", self.render(level, msg, None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> ConsoleStrategy {
        ConsoleStrategy::with_colors(false)
    }

    #[test]
    fn test_render_plain() {
        assert_eq!(plain().render(LogLevel::Info, "ready", None), "INFO    ready");
    }

    #[test]
    fn test_render_error_appends_cause() {
        let io = std::io::Error::other("disk full");
        let line = plain().render(LogLevel::Error, "write failed", Some(&io));
        assert_eq!(line, "ERROR   write failed disk full");
    }

    #[test]
    fn test_category_prefix_nests() {
        let db = Arc::new(plain()).category("db").category("pool");
        db.info("category lines do not panic");

        let console = ConsoleStrategy {
            category: Some("db.pool".to_string()),
            ..plain()
        };
        assert_eq!(console.render(LogLevel::Debug, "q", None), "DEBUG   [db.pool] q");
    }

    #[test]
    fn test_render_with_timestamp() {
        let console = plain().with_timestamp_format(TimestampFormat::UnixMillis);
        let line = console.render(LogLevel::Warn, "w", None);
        assert!(line.starts_with('['));
        assert!(line.ends_with("WARN    w"));
    }
}
