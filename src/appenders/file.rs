//! File appender implementation

use crate::core::{Appender, AppenderCore, Formatter, LogEvent, LogLevel, Logger, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Writes rendered events to one file, truncated when opened.
///
/// Each record is on disk when `append` returns.
pub struct FileAppender {
    core: AppenderCore,
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileAppender {
    /// Open `path` for writing, truncating it.
    ///
    /// Fails with [`LoggerError::FileOpen`] if the file cannot be opened.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = Self::open(&path)?;

        Ok(Self {
            core: AppenderCore::new(),
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
        })
    }

    fn open(path: &Path) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|e| LoggerError::file_open(path.display().to_string(), e))
    }

    /// Set the minimum level this appender writes
    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.core.set_level(level);
        self
    }

    #[must_use]
    pub fn with_formatter(self, formatter: Arc<Formatter>) -> Self {
        self.core.set_formatter(formatter);
        self
    }

    /// Compile `pattern` and use it as this appender's formatter
    #[must_use]
    pub fn with_pattern(self, pattern: &str) -> Self {
        self.with_formatter(Formatter::new(pattern).shared())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file handle is currently usable
    pub fn is_open(&self) -> bool {
        self.writer.lock().is_some()
    }

    /// Close the current handle (flushing it) and open the path again,
    /// truncating it. On failure the appender is left without a handle and
    /// writes fail until a later reopen succeeds.
    pub fn reopen(&self) -> Result<()> {
        let mut writer = self.writer.lock();
        if let Some(mut old) = writer.take() {
            if let Err(e) = old.flush() {
                eprintln!(
                    "[LOGGER WARNING] Failed to flush '{}' before reopening: {}",
                    self.path.display(),
                    e
                );
            }
        }
        let file = Self::open(&self.path)?;
        *writer = Some(BufWriter::new(file));
        Ok(())
    }
}

impl Appender for FileAppender {
    fn core(&self) -> &AppenderCore {
        &self.core
    }

    fn append(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> Result<()> {
        if !self.core.accepts(level) {
            return Ok(());
        }

        let formatter = self.core.formatter();
        let mut guard = self.writer.lock();
        let writer = guard.as_mut().ok_or_else(|| {
            LoggerError::writer(format!("log file '{}' is not open", self.path.display()))
        })?;

        // Flushed per record; loggers held in statics are never dropped
        formatter
            .format_to(&mut *writer, logger, level, event)
            .and_then(|()| writer.flush())
            .map_err(|e| {
                LoggerError::io_operation("writing log file", self.path.display().to_string(), e)
            })
    }

    fn flush(&self) -> Result<()> {
        if let Some(ref mut writer) = *self.writer.lock() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        if let Err(e) = self.flush() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush '{}' on drop: {}",
                self.path.display(),
                e
            );
        }
    }
}
