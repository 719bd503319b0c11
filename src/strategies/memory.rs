//! In-memory strategy
//!
//! Records every message it receives into a buffer shared by all clones and
//! categories. Handy for tests and for embedding log output elsewhere.

use crate::core::{LogLevel, LogStrategy, UnifiedLog};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

/// One message as the sink received it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Dotted category path, `None` for the root sink
    pub category: Option<String>,
    pub level: LogLevel,
    pub message: String,
    /// `Display` of the error passed alongside the message
    pub error: Option<String>,
}

impl MemoryRecord {
    pub fn new(
        category: Option<&str>,
        level: LogLevel,
        message: impl Into<String>,
        error: Option<&str>,
    ) -> Self {
        Self {
            category: category.map(str::to_string),
            level,
            message: message.into(),
            error: error.map(str::to_string),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStrategy {
    category: Option<String>,
    records: Arc<Mutex<Vec<MemoryRecord>>>,
    per_level_only: bool,
}

impl MemoryStrategy {
    /// Recording sink exposing the unified entry point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recording sink offering only the per-level methods.
    pub fn per_level() -> Self {
        Self {
            per_level_only: true,
            ..Self::default()
        }
    }

    /// Snapshot of everything recorded so far, across all categories.
    pub fn records(&self) -> Vec<MemoryRecord> {
        self.records.lock().clone()
    }

    /// Recorded messages in arrival order.
    pub fn messages(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    fn record(&self, level: LogLevel, msg: &str, err: Option<&dyn Error>) {
        self.records.lock().push(MemoryRecord {
            category: self.category.clone(),
            level,
            message: msg.to_string(),
            error: err.map(|e| e.to_string()),
        });
    }
}

impl LogStrategy for MemoryStrategy {
    fn category(self: Arc<Self>, name: &str) -> Arc<dyn LogStrategy> {
        let category = match &self.category {
            Some(parent) => format!("{parent}.{name}"),
            None => name.to_string(),
        };
        Arc::new(MemoryStrategy {
            category: Some(category),
            records: Arc::clone(&self.records),
            per_level_only: self.per_level_only,
        })
    }

    fn verbose(&self, msg: &str) {
        self.record(LogLevel::Verbose, msg, None);
    }

    fn debug(&self, msg: &str) {
        self.record(LogLevel::Debug, msg, None);
    }

    fn info(&self, msg: &str) {
        self.record(LogLevel::Info, msg, None);
    }

    fn warn(&self, msg: &str, err: Option<&dyn Error>) {
        self.record(LogLevel::Warn, msg, err);
    }

    fn error(&self, msg: &str, err: Option<&dyn Error>) {
        self.record(LogLevel::Error, msg, err);
    }

    fn fatal(&self, msg: &str, err: Option<&dyn Error>) {
        self.record(LogLevel::Fatal, msg, err);
    }

    fn unified(&self) -> Option<&dyn UnifiedLog> {
        if self.per_level_only {
            None
        } else {
            Some(self)
        }
    }
}

impl UnifiedLog for MemoryStrategy {
    fn log(&self, level: LogLevel, msg: &str, err: Option<&dyn Error>) {
        self.record(level, msg, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch;

    #[test]
    fn test_records_shared_across_clones() {
        let sink = MemoryStrategy::new();
        let clone = sink.clone();
        clone.info("hello");

        assert_eq!(sink.messages(), vec!["hello"]);
        assert_eq!(sink.len(), 1);
        sink.clear();
        assert!(clone.is_empty());
    }

    #[test]
    fn test_category_paths_nest() {
        let sink = MemoryStrategy::new();
        let db = Arc::new(sink.clone()).category("db");
        let pool = db.category("pool");
        pool.warn("slow", None);

        assert_eq!(
            sink.records(),
            vec![MemoryRecord::new(Some("db.pool"), LogLevel::Warn, "slow", None)]
        );
    }

    #[test]
    fn test_per_level_has_no_unified_entry() {
        assert!(MemoryStrategy::per_level().unified().is_none());
        assert!(MemoryStrategy::new().unified().is_some());

        let sink = MemoryStrategy::per_level();
        dispatch(&sink, LogLevel::Debug, "d", None);
        assert_eq!(sink.records()[0].level, LogLevel::Debug);
    }
}
