//! Main logger implementation
//!
//! A [`Logger`] filters by threshold, runs its decoration pipeline and hands
//! the result to its [`LogStrategy`]. `tag`, `add_argument` and `category`
//! derive new loggers; none of them touches the logger they start from.

use super::{
    category_cache::{self, CategoryCache, SharedCache},
    decoration::{MessageDecoration, TagArgumentDecoration},
    error::{LoggerError, Result},
    log_level::LogLevel,
    strategy::{dispatch, LogStrategy},
};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Separator placed between a tag and the message by [`Logger::tag`].
pub const DEFAULT_TAG_SEPARATOR: &str = " - ";

/// Placeholder replaced by [`Logger::add_argument`].
pub const DEFAULT_PLACEHOLDER: &str = "{}";

/// The tag a logger prepends to every message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    text: String,
    separator: String,
}

impl Tag {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

/// One placeholder substitution contributed by [`Logger::add_argument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    value: String,
    placeholder: String,
}

impl Argument {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Replace the first occurrence of the placeholder. No occurrence is a no-op.
    fn apply(&self, msg: String) -> String {
        match msg.find(&self.placeholder) {
            Some(at) => {
                let mut out = String::with_capacity(msg.len() + self.value.len());
                out.push_str(&msg[..at]);
                out.push_str(&self.value);
                out.push_str(&msg[at + self.placeholder.len()..]);
                out
            }
            None => msg,
        }
    }
}

/// Link in the argument chain, newest at the head.
struct ArgumentLink {
    argument: Argument,
    previous: Option<Arc<ArgumentLink>>,
}

/// Apply `link` and everything before it, oldest first.
fn apply_chain(link: Option<&ArgumentLink>, msg: String) -> String {
    match link {
        Some(link) => link.argument.apply(apply_chain(link.previous.as_deref(), msg)),
        None => msg,
    }
}

pub struct Logger {
    log_level: LogLevel,
    decorations: Vec<Arc<dyn MessageDecoration>>,
    categories: SharedCache,
    /// False while the category cache is borrowed from the logger this one
    /// was derived from.
    owns_categories: bool,
    tag: Option<Arc<Tag>>,
    arguments: Option<Arc<ArgumentLink>>,
}

impl Logger {
    /// Create a root logger with the built-in tag/argument decoration.
    #[must_use]
    pub fn new<S: LogStrategy + 'static>(log_level: LogLevel, strategy: S) -> Self {
        Self::from_shared(log_level, Arc::new(strategy))
    }

    /// Create a root logger around a sink the caller keeps a handle to.
    #[must_use]
    pub fn from_shared(log_level: LogLevel, strategy: Arc<dyn LogStrategy>) -> Self {
        Self {
            log_level,
            decorations: vec![Arc::new(TagArgumentDecoration)],
            categories: CategoryCache::shared(strategy),
            owns_categories: true,
            tag: None,
            arguments: None,
        }
    }

    /// Create a root logger and register `decorations` after the built-in one.
    #[must_use]
    pub fn with_decorations<I>(log_level: LogLevel, strategy: Arc<dyn LogStrategy>, decorations: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn MessageDecoration>>,
    {
        let mut logger = Self::from_shared(log_level, strategy);
        for decoration in decorations {
            logger.add_shared_decoration(decoration);
        }
        logger
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    /// The sink messages from this logger currently go to.
    ///
    /// For a category-logger this is looked up by name on every call.
    ///
    /// # Panics
    ///
    /// Panics if the category cache lost an entry it must hold.
    pub fn strategy(&self) -> Arc<dyn LogStrategy> {
        self.try_strategy().unwrap_or_else(|e| consistency_fault(e))
    }

    /// Like [`Logger::strategy`], reporting a cache fault instead of panicking.
    pub fn try_strategy(&self) -> Result<Arc<dyn LogStrategy>> {
        category_cache::source(&self.categories)
    }

    pub fn set_strategy<S: LogStrategy + 'static>(&mut self, strategy: S) {
        self.set_shared_strategy(Arc::new(strategy));
    }

    /// Replace the sink and re-derive every cached category from it.
    ///
    /// Category-loggers already handed out observe the new sink on their
    /// next call. A derived logger that shared its cache with an ancestor
    /// moves onto a private copy first, leaving the ancestor untouched.
    pub fn set_shared_strategy(&mut self, strategy: Arc<dyn LogStrategy>) {
        if self.owns_categories {
            category_cache::replace_source(&self.categories, strategy);
        } else {
            self.categories = CategoryCache::detached(&self.categories, strategy);
            self.owns_categories = true;
        }
    }

    #[inline]
    pub fn should_log(&self, level: LogLevel) -> bool {
        self.log_level.is_at_least_as_verbose_as(level)
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_with_error(level, message, None);
    }

    /// Filter, decorate and dispatch one message.
    ///
    /// `err` is forwarded to the sink untouched.
    pub fn log_with_error(&self, level: LogLevel, message: impl Into<String>, err: Option<&dyn Error>) {
        if !self.should_log(level) {
            return;
        }

        let msg = self.decorate(level, message.into());
        dispatch(self.strategy().as_ref(), level, &msg, err);
    }

    #[inline]
    pub fn verbose(&self, message: impl Into<String>) {
        self.log(LogLevel::Verbose, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    pub fn warn_with_error(&self, message: impl Into<String>, err: &dyn Error) {
        self.log_with_error(LogLevel::Warn, message, Some(err));
    }

    pub fn error_with_error(&self, message: impl Into<String>, err: &dyn Error) {
        self.log_with_error(LogLevel::Error, message, Some(err));
    }

    pub fn fatal_with_error(&self, message: impl Into<String>, err: &dyn Error) {
        self.log_with_error(LogLevel::Fatal, message, Some(err));
    }

    /// Run the decoration pipeline over `msg`.
    pub fn decorate(&self, level: LogLevel, msg: String) -> String {
        self.decorations
            .iter()
            .fold(msg, |msg, decoration| decoration.decorate(self, level, msg))
    }

    /// Derive a logger that prefixes `text` and [`DEFAULT_TAG_SEPARATOR`].
    #[must_use]
    pub fn tag(&self, text: impl Into<String>) -> Logger {
        self.tag_with_separator(text, DEFAULT_TAG_SEPARATOR)
    }

    /// Derive a logger with its own tag. Replaces any inherited tag.
    #[must_use]
    pub fn tag_with_separator(&self, text: impl Into<String>, separator: impl Into<String>) -> Logger {
        let mut logger = self.derive();
        logger.tag = Some(Arc::new(Tag {
            text: text.into(),
            separator: separator.into(),
        }));
        logger
    }

    /// Derive a logger that replaces the next [`DEFAULT_PLACEHOLDER`] with `value`.
    #[must_use]
    pub fn add_argument(&self, value: impl Into<String>) -> Logger {
        self.add_argument_with_placeholder(value, DEFAULT_PLACEHOLDER)
    }

    /// Derive a logger with one more substitution.
    ///
    /// Substitutions run in the order they were chained and each consumes the
    /// first remaining occurrence of its placeholder.
    #[must_use]
    pub fn add_argument_with_placeholder(
        &self,
        value: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Logger {
        let mut logger = self.derive();
        logger.arguments = Some(Arc::new(ArgumentLink {
            argument: Argument {
                value: value.into(),
                placeholder: placeholder.into(),
            },
            previous: self.arguments.clone(),
        }));
        logger
    }

    /// Derive a logger writing to the `name` category, reusing a cached sink.
    ///
    /// # Panics
    ///
    /// Panics if the category cache lost an entry it must hold.
    #[must_use]
    pub fn category(&self, name: &str) -> Logger {
        self.category_with_cache(name, true)
    }

    /// Derive a category-logger, asking the sink afresh when `use_cache` is false.
    ///
    /// # Panics
    ///
    /// Panics if the category cache lost an entry it must hold.
    #[must_use]
    pub fn category_with_cache(&self, name: &str, use_cache: bool) -> Logger {
        self.try_category_with_cache(name, use_cache)
            .unwrap_or_else(|e| consistency_fault(e))
    }

    /// Fallible form of [`Logger::category_with_cache`].
    pub fn try_category_with_cache(&self, name: &str, use_cache: bool) -> Result<Logger> {
        category_cache::resolve(&self.categories, name, use_cache)?;
        let categories = CategoryCache::linked(&self.categories, name)?;

        Ok(Logger {
            log_level: self.log_level,
            decorations: self.decorations.clone(),
            categories,
            owns_categories: true,
            tag: self.tag.clone(),
            arguments: self.arguments.clone(),
        })
    }

    /// Names of the categories this logger has resolved so far.
    pub fn category_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.categories.read().names().map(str::to_string).collect();
        names.sort();
        names
    }

    /// Insert `decoration` after every decoration of equal or lower priority.
    pub fn add_decoration<D: MessageDecoration + 'static>(&mut self, decoration: D) -> &mut Self {
        self.add_shared_decoration(Arc::new(decoration))
    }

    pub fn add_shared_decoration(&mut self, decoration: Arc<dyn MessageDecoration>) -> &mut Self {
        let priority = decoration.priority();
        let at = self
            .decorations
            .partition_point(|existing| existing.priority() <= priority);
        self.decorations.insert(at, decoration);
        self
    }

    /// Remove every decoration, the built-in tag/argument one included.
    ///
    /// Tags and arguments stop appearing in output until a
    /// [`TagArgumentDecoration`] is added back.
    pub fn clear_decorations(&mut self) -> &mut Self {
        self.decorations.clear();
        self
    }

    pub fn decorations(&self) -> &[Arc<dyn MessageDecoration>] {
        &self.decorations
    }

    /// The tag nearest in the derivation chain, if any.
    pub fn current_tag(&self) -> Option<&Tag> {
        self.tag.as_deref()
    }

    /// Arguments of the derivation chain in application order, oldest first.
    pub fn arguments(&self) -> Vec<&Argument> {
        let mut chain = Vec::new();
        let mut link = self.arguments.as_deref();
        while let Some(current) = link {
            chain.push(&current.argument);
            link = current.previous.as_deref();
        }
        chain.reverse();
        chain
    }

    /// Apply the chain's substitutions to `msg`, oldest first.
    pub fn substitute_arguments(&self, msg: String) -> String {
        apply_chain(self.arguments.as_deref(), msg)
    }

    /// Child view sharing sink, cache and decorations as they are now.
    fn derive(&self) -> Logger {
        Logger {
            log_level: self.log_level,
            decorations: self.decorations.clone(),
            categories: Arc::clone(&self.categories),
            owns_categories: false,
            tag: self.tag.clone(),
            arguments: self.arguments.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn shares_categories_with(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.categories, &other.categories)
    }

    #[cfg(test)]
    pub(crate) fn evict_category(&self, name: &str) {
        self.categories.write().evict(name);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("log_level", &self.log_level)
            .field("tag", &self.current_tag())
            .field("arguments", &self.arguments())
            .field("decorations", &self.decorations.len())
            .field("categories", &self.category_names())
            .finish()
    }
}

/// Abort on a broken cache invariant.
#[cold]
fn consistency_fault(err: LoggerError) -> ! {
    panic!("logger internal consistency fault: {}", err)
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use log_facade::prelude::*;
///
/// let sink = MemoryStrategy::new();
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .strategy(sink.clone())
///     .decoration(LevelPrefixDecoration::new())
///     .build();
///
/// logger.debug("ready");
/// assert_eq!(sink.messages(), vec!["DEBUG     ready"]);
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    strategy: Option<Arc<dyn LogStrategy>>,
    decorations: Vec<Arc<dyn MessageDecoration>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            strategy: None,
            decorations: Vec::new(),
        }
    }

    /// Set the severity threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the sink
    #[must_use = "builder methods return a new value"]
    pub fn strategy<S: LogStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    /// Set a sink the caller keeps a handle to
    #[must_use = "builder methods return a new value"]
    pub fn shared_strategy(mut self, strategy: Arc<dyn LogStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Add a decoration after the built-in one
    #[must_use = "builder methods return a new value"]
    pub fn decoration<D: MessageDecoration + 'static>(mut self, decoration: D) -> Self {
        self.decorations.push(Arc::new(decoration));
        self
    }

    /// Build the Logger
    ///
    /// Without an explicit sink the logger writes to the console.
    pub fn build(self) -> Logger {
        let strategy = self
            .strategy
            .unwrap_or_else(|| Arc::new(crate::strategies::ConsoleStrategy::new()));
        Logger::with_decorations(self.level, strategy, self.decorations)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
