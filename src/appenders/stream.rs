//! Stream appender: console output or any in-process `io::Write`

use crate::core::{Appender, AppenderCore, Formatter, LogEvent, LogLevel, Logger, LoggerError, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::{Mutex, MutexGuard};
use std::io::{self, Write};
use std::sync::Arc;

/// Writes rendered events to a stream.
///
/// The default stream is standard output, available as [`ConsoleAppender`].
pub struct StreamAppender<W: Write + Send = io::Stdout> {
    core: AppenderCore,
    writer: Mutex<W>,
    name: String,
    #[cfg(feature = "console")]
    use_colors: bool,
}

/// Stream appender bound to the process's standard output
pub type ConsoleAppender = StreamAppender<io::Stdout>;

impl StreamAppender<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout()).with_name("console")
    }
}

impl Default for StreamAppender<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> StreamAppender<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            core: AppenderCore::new(),
            writer: Mutex::new(writer),
            name: "stream".to_string(),
            #[cfg(feature = "console")]
            use_colors: false,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
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
    ///
    /// # Example
    ///
    /// ```
    /// use pattern_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::new().with_pattern("%d{%H:%M:%S} [%p] %m%n");
    /// ```
    #[must_use]
    pub fn with_pattern(self, pattern: &str) -> Self {
        self.with_formatter(Formatter::new(pattern).shared())
    }

    /// Colour each record by severity
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Exclusive access to the underlying stream
    pub fn writer(&self) -> MutexGuard<'_, W> {
        self.writer.lock()
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_event(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> io::Result<()> {
        let formatter = self.core.formatter();
        let mut writer = self.writer.lock();

        #[cfg(feature = "console")]
        if self.use_colors {
            let rendered = formatter.format(logger, level, event);
            let body = rendered.trim_end_matches('\n');
            let tail = &rendered[body.len()..];
            return write!(writer, "{}{}", body.color(level.color_code()), tail);
        }

        formatter.format_to(&mut *writer, logger, level, event)
    }
}

impl<W: Write + Send> Appender for StreamAppender<W> {
    fn core(&self) -> &AppenderCore {
        &self.core
    }

    fn append(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> Result<()> {
        if !self.core.accepts(level) {
            return Ok(());
        }
        self.write_event(logger, level, event)
            .map_err(|e| LoggerError::io_operation("writing to stream", self.name.clone(), e))
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
