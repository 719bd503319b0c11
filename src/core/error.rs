//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A category-logger looked up a name its cache never stored.
    ///
    /// Cache maintenance guarantees every name a category-logger reads is
    /// present, so this is an internal-consistency fault, never a user error.
    #[error("Category '{name}' missing from category cache")]
    MissingCategory { name: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File strategy error with path
    #[error("File strategy error for '{path}': {message}")]
    FileStrategyError { path: String, message: String },
}

impl LoggerError {
    /// Create a missing-category fault
    pub fn missing_category(name: impl Into<String>) -> Self {
        LoggerError::MissingCategory { name: name.into() }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file strategy error
    pub fn file_strategy(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileStrategyError {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::missing_category("db");
        assert!(matches!(err, LoggerError::MissingCategory { .. }));

        let err = LoggerError::config("LoggerConfig", "unknown level");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::file_strategy("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileStrategyError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::missing_category("db");
        assert_eq!(err.to_string(), "Category 'db' missing from category cache");

        let err = LoggerError::config("LoggerConfig", "unknown level 'loud'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for LoggerConfig: unknown level 'loud'"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening category file", "cannot open db.log", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening category file"));
        assert!(err.to_string().contains("cannot open db.log"));
    }
}
