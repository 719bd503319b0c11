//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. The message is
//! only formatted when the logger's threshold lets the level through.
//!
//! # Examples
//!
//! ```
//! use log_facade::prelude::*;
//! use log_facade::info;
//!
//! let logger = Logger::new(LogLevel::Info, MemoryStrategy::new());
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Derived loggers work too; `{{}}` survives formatting as an argument slot
//! info!(logger.tag("auth").add_argument("alice"), "user {{}} logged in from {}", "10.0.0.1");
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use log_facade::prelude::*;
/// # let logger = Logger::new(LogLevel::Info, MemoryStrategy::new());
/// use log_facade::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.should_log(level) {
            logger.log(level, format!($($arg)+));
        }
    }};
}

/// Log a verbose-level message.
///
/// # Examples
///
/// ```
/// # use log_facade::prelude::*;
/// # let logger = Logger::new(LogLevel::Verbose, MemoryStrategy::new());
/// use log_facade::verbose;
/// verbose!(logger, "Entering function: calculate()");
/// verbose!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Verbose, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use log_facade::prelude::*;
/// # let logger = Logger::new(LogLevel::Info, MemoryStrategy::new());
/// use log_facade::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
