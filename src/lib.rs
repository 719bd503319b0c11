//! # Log Facade
//!
//! A leveled logging facade. Application code logs through a [`Logger`],
//! which filters by threshold, runs a decoration pipeline and forwards the
//! result to a pluggable [`LogStrategy`].
//!
//! ## Features
//!
//! - **Derived loggers**: `tag`, `add_argument` and `category` produce child
//!   loggers without touching the logger they came from
//! - **Decorations**: ordered, prioritised message rewriting
//! - **Categories**: per-name sinks, cached and kept fresh when the sink is swapped
//! - **Synchronous**: no background work, delivery is the sink's concern
//!
//! ```
//! use log_facade::prelude::*;
//!
//! let sink = MemoryStrategy::new();
//! let logger = Logger::new(LogLevel::Info, sink.clone());
//!
//! logger.tag("DB").add_argument("42").info("id={}");
//! assert_eq!(sink.messages(), vec!["DB - id=42"]);
//! ```

pub mod core;
pub mod macros;
pub mod strategies;

pub mod prelude {
    pub use crate::core::{
        default_logger, FnDecoration, LevelPrefixDecoration, LogLevel, LogStrategy, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, MessageDecoration, Result,
        TagArgumentDecoration, TimestampFormat, UnifiedLog,
    };
    pub use crate::strategies::{ConsoleStrategy, MemoryRecord, MemoryStrategy};
    #[cfg(feature = "file")]
    pub use crate::strategies::FileStrategy;
}

pub use crate::core::{
    default_logger, dispatch, Argument, FnDecoration, LevelPrefixDecoration, LogLevel,
    LogStrategy, Logger, LoggerBuilder, LoggerConfig, LoggerError, MessageDecoration, Result,
    Tag, TagArgumentDecoration, TimestampFormat, UnifiedLog, DEFAULT_PLACEHOLDER,
    DEFAULT_TAG_SEPARATOR,
};
pub use strategies::{ConsoleStrategy, MemoryRecord, MemoryStrategy};
#[cfg(feature = "file")]
pub use strategies::FileStrategy;
