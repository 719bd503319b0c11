//! Process-wide default logger
//!
//! Built on first use with an INFO threshold and a [`ConsoleStrategy`], then
//! lives for the rest of the process. Reconfigure it in place:
//!
//! ```
//! use log_facade::prelude::*;
//!
//! default_logger().write().set_log_level(LogLevel::Debug);
//! default_logger().read().tag("boot").debug("configured");
//! ```

use super::log_level::LogLevel;
use super::logger::Logger;
use crate::strategies::ConsoleStrategy;
use parking_lot::RwLock;
use std::sync::OnceLock;

static DEFAULT_LOGGER: OnceLock<RwLock<Logger>> = OnceLock::new();

pub fn default_logger() -> &'static RwLock<Logger> {
    DEFAULT_LOGGER.get_or_init(|| RwLock::new(Logger::new(LogLevel::Info, ConsoleStrategy::new())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logger_is_singleton() {
        let a = default_logger() as *const RwLock<Logger>;
        let b = default_logger() as *const RwLock<Logger>;
        assert_eq!(a, b);
        assert_eq!(default_logger().read().decorations().len(), 1);
    }
}
