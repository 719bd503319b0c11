//! LogStrategy trait for log output destinations

use super::log_level::LogLevel;
use std::error::Error;
use std::sync::Arc;

/// A destination for fully decorated messages.
///
/// Implementors receive one call per emitted message. Warn, error and fatal
/// messages may carry an error value, which is forwarded untouched.
pub trait LogStrategy: Send + Sync {
    /// Fetch the sink for a named category.
    ///
    /// What a category means is up to the sink: a separate file, a prefix,
    /// or nothing at all. Returning `self` is valid for sinks that do not
    /// distinguish categories. The logger caches the result per name.
    fn category(self: Arc<Self>, name: &str) -> Arc<dyn LogStrategy>;

    fn verbose(&self, msg: &str);

    fn debug(&self, msg: &str);

    fn info(&self, msg: &str);

    fn warn(&self, msg: &str, err: Option<&dyn Error>);

    fn error(&self, msg: &str, err: Option<&dyn Error>);

    fn fatal(&self, msg: &str, err: Option<&dyn Error>);

    /// The unified entry point, if this sink has one.
    ///
    /// When present it is preferred over the per-level methods.
    fn unified(&self) -> Option<&dyn UnifiedLog> {
        None
    }
}

/// Optional single entry point a [`LogStrategy`] can expose.
pub trait UnifiedLog {
    fn log(&self, level: LogLevel, msg: &str, err: Option<&dyn Error>);
}

/// Hand a decorated message to `strategy`.
///
/// Uses the unified entry point when the sink offers one, otherwise the
/// matching per-level method. The error is dropped for levels whose method
/// takes none.
pub fn dispatch(strategy: &dyn LogStrategy, level: LogLevel, msg: &str, err: Option<&dyn Error>) {
    if let Some(unified) = strategy.unified() {
        unified.log(level, msg, err);
        return;
    }

    match level {
        LogLevel::Verbose => strategy.verbose(msg),
        LogLevel::Debug => strategy.debug(msg),
        LogLevel::Info => strategy.info(msg),
        LogLevel::Warn => strategy.warn(msg, err),
        LogLevel::Error => strategy.error(msg, err),
        LogLevel::Fatal => strategy.fatal(msg, err),
    }
}

/// Whether two sink handles point at the same sink object.
pub(crate) fn same_strategy(a: &Arc<dyn LogStrategy>, b: &Arc<dyn LogStrategy>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
