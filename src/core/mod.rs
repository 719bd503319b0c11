//! Core logger types and traits

pub(crate) mod category_cache;
pub mod config;
pub mod decoration;
pub mod default_logger;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod strategy;
pub mod timestamp;

pub use config::LoggerConfig;
pub use decoration::{FnDecoration, LevelPrefixDecoration, MessageDecoration, TagArgumentDecoration};
pub use default_logger::default_logger;
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use logger::{Argument, Logger, LoggerBuilder, Tag, DEFAULT_PLACEHOLDER, DEFAULT_TAG_SEPARATOR};
pub use strategy::{dispatch, LogStrategy, UnifiedLog};
pub use timestamp::TimestampFormat;
