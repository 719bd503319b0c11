//! File strategy implementation
//!
//! Every category gets its own file next to the root one:
//! `FileStrategy::new("/var/log/app", "app")` writes `app.log`, its `db`
//! category writes `app.db.log`.

use crate::core::{LogLevel, LogStrategy, LoggerError, Result, TimestampFormat, UnifiedLog};
use fs2::FileExt;
use parking_lot::Mutex;
use std::error::Error;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

pub struct FileStrategy {
    dir: PathBuf,
    name: String,
    timestamp_format: TimestampFormat,
    file: Mutex<Option<File>>,
}

impl FileStrategy {
    /// Sink writing to `<dir>/<name>.log`. The directory is created if needed;
    /// the file is opened on first write.
    pub fn new(dir: impl Into<PathBuf>, name: &str) -> Result<Self> {
        let dir = dir.into();
        let name = sanitize(name);
        if name.is_empty() {
            return Err(LoggerError::config("FileStrategy", "file name must not be empty"));
        }

        fs::create_dir_all(&dir).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                format!("cannot create {}", dir.display()),
                e,
            )
        })?;

        Ok(Self {
            dir,
            name,
            timestamp_format: TimestampFormat::default(),
            file: Mutex::new(None),
        })
    }

    /// Set the timestamp format for this strategy
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use log_facade::strategies::FileStrategy;
    /// use log_facade::TimestampFormat;
    ///
    /// let strategy = FileStrategy::new("/var/log/app", "app")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.name))
    }

    fn write_line(&self, level: LogLevel, msg: &str, err: Option<&dyn Error>) -> Result<()> {
        let mut output = String::with_capacity(msg.len() + 48);
        if let Some(stamp) = self.timestamp_format.now() {
            output.push('[');
            output.push_str(&stamp);
            output.push_str("] ");
        }
        output.push_str(&format!("[{:7}] ", level.to_str()));
        // Keep one entry per line
        output.push_str(&escape_newlines(msg));
        if let Some(err) = err {
            output.push_str(" | ");
            output.push_str(&escape_newlines(&err.to_string()));
        }
        output.push('\n');

        let mut guard = self.file.lock();
        if guard.is_none() {
            let path = self.path();
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    LoggerError::file_strategy(path.display().to_string(), e.to_string())
                })?;
            *guard = Some(file);
        }

        let file = guard
            .as_mut()
            .ok_or_else(|| LoggerError::file_strategy(self.path().display().to_string(), "file not open"))?;

        // Categories re-derived after a sink swap may hold a second handle
        // on the same path
        FileExt::lock_exclusive(&*file)?;
        let written = file.write_all(output.as_bytes()).and_then(|_| file.flush());
        FileExt::unlock(&*file)?;
        written?;
        Ok(())
    }
}

impl LogStrategy for FileStrategy {
    fn category(self: Arc<Self>, name: &str) -> Arc<dyn LogStrategy> {
        Arc::new(FileStrategy {
            dir: self.dir.clone(),
            name: format!("{}.{}", self.name, sanitize(name)),
            timestamp_format: self.timestamp_format.clone(),
            file: Mutex::new(None),
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

impl UnifiedLog for FileStrategy {
    fn log(&self, level: LogLevel, msg: &str, err: Option<&dyn Error>) {
        if let Err(e) = self.write_line(level, msg, err) {
            eprintln!("[LOGGER ERROR] File strategy '{}' failed: {}", self.name, e);
        }
    }
}

/// Strip path separators so a category name cannot escape the log directory.
fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

fn escape_newlines(text: &str) -> String {
    text.replace('\n', "\\n").replace('\r', "\\r")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_root_file_path() {
        let dir = TempDir::new().unwrap();
        let strategy = FileStrategy::new(dir.path(), "app").unwrap();
        assert_eq!(strategy.path(), dir.path().join("app.log"));
    }

    #[test]
    fn test_category_gets_own_file() {
        let dir = TempDir::new().unwrap();
        let root = Arc::new(
            FileStrategy::new(dir.path(), "app")
                .unwrap()
                .with_timestamp_format(TimestampFormat::None),
        );
        let db = Arc::clone(&root).category("db");

        root.info("root line");
        db.warn("db line", None);

        let root_text = fs::read_to_string(dir.path().join("app.log")).unwrap();
        let db_text = fs::read_to_string(dir.path().join("app.db.log")).unwrap();
        assert_eq!(root_text, "[INFO   ] root line\n");
        assert_eq!(db_text, "[WARN   ] db line\n");
    }

    #[test]
    fn test_category_name_cannot_escape_dir() {
        let dir = TempDir::new().unwrap();
        let root = Arc::new(FileStrategy::new(dir.path(), "app").unwrap());
        Arc::clone(&root).category("../etc").info("x");

        assert!(dir.path().join("app..._etc.log").exists());
    }

    #[test]
    fn test_newlines_escaped() {
        let dir = TempDir::new().unwrap();
        let strategy = FileStrategy::new(dir.path(), "app")
            .unwrap()
            .with_timestamp_format(TimestampFormat::None);
        let io = std::io::Error::other("line1\nline2");
        strategy.error("a\nb", Some(&io));

        let text = fs::read_to_string(strategy.path()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("a\\nb | line1\\nline2"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let dir = TempDir::new().unwrap();
        let err = FileStrategy::new(dir.path(), "  ").err().expect("empty name");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
