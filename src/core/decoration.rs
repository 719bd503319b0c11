//! Message decorations
//!
//! A decoration rewrites a message before it reaches the sink. Each logger
//! keeps its decorations sorted by [`MessageDecoration::priority`], lowest
//! first, with ties kept in insertion order.

use super::log_level::LogLevel;
use super::logger::Logger;

pub trait MessageDecoration: Send + Sync {
    /// Sort key, lower runs earlier.
    fn priority(&self) -> i32 {
        0
    }

    fn decorate(&self, logger: &Logger, level: LogLevel, msg: String) -> String;
}

/// The decoration every logger starts with.
///
/// Prepends the active tag and its separator, then applies the argument
/// substitutions of the derivation chain, oldest first. An empty tag adds
/// nothing, separator included.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagArgumentDecoration;

impl MessageDecoration for TagArgumentDecoration {
    fn decorate(&self, logger: &Logger, _level: LogLevel, msg: String) -> String {
        let msg = match logger.current_tag() {
            Some(tag) if !tag.text().is_empty() => {
                let mut tagged =
                    String::with_capacity(tag.text().len() + tag.separator().len() + msg.len());
                tagged.push_str(tag.text());
                tagged.push_str(tag.separator());
                tagged.push_str(&msg);
                tagged
            }
            _ => msg,
        };
        logger.substitute_arguments(msg)
    }
}

/// Column width the level name is padded to.
pub const LEVEL_PREFIX_WIDTH: usize = 10;

/// Prefixes the level name, left-aligned in a ten-column field.
///
/// `WARN` becomes `"WARN      message"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelPrefixDecoration {
    priority: i32,
}

impl LevelPrefixDecoration {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl MessageDecoration for LevelPrefixDecoration {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn decorate(&self, _logger: &Logger, level: LogLevel, msg: String) -> String {
        format!("{:<width$}{}", level.to_str(), msg, width = LEVEL_PREFIX_WIDTH)
    }
}

/// Adapts a closure into a decoration.
///
/// ```
/// use log_facade::prelude::*;
///
/// let shout = FnDecoration::new(1, |_logger, _level, msg| msg.to_uppercase());
/// let mut logger = Logger::new(LogLevel::Info, MemoryStrategy::new());
/// logger.add_decoration(shout);
/// ```
pub struct FnDecoration<F> {
    priority: i32,
    f: F,
}

impl<F> FnDecoration<F>
where
    F: Fn(&Logger, LogLevel, String) -> String + Send + Sync,
{
    pub fn new(priority: i32, f: F) -> Self {
        Self { priority, f }
    }
}

impl<F> MessageDecoration for FnDecoration<F>
where
    F: Fn(&Logger, LogLevel, String) -> String + Send + Sync,
{
    fn priority(&self) -> i32 {
        self.priority
    }

    fn decorate(&self, logger: &Logger, level: LogLevel, msg: String) -> String {
        (self.f)(logger, level, msg)
    }
}
