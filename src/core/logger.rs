//! Main logger implementation

use super::{
    appender::Appender, error::Result, formatter::Formatter, log_event::LogEvent,
    log_level::LogLevel, metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// A named routing point with its own level and an ordered list of appenders.
///
/// Loggers are always handled through `Arc` so that events can refer back to
/// the logger that created them.
pub struct Logger {
    name: String,
    level: RwLock<LogLevel>,
    appenders: RwLock<Vec<Arc<dyn Appender>>>,
    /// Formatter handed to appenders configured without one
    formatter: RwLock<Option<Arc<Formatter>>>,
    /// Informational parent; events are not forwarded to it
    root: Option<Arc<Logger>>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger with level DEBUG and no appenders
    #[must_use]
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::unshared(name.into(), None))
    }

    pub(crate) fn with_root(name: impl Into<String>, root: Arc<Logger>) -> Arc<Self> {
        Arc::new(Self::unshared(name.into(), Some(root)))
    }

    fn unshared(name: String, root: Option<Arc<Logger>>) -> Self {
        Self {
            name,
            level: RwLock::new(LogLevel::Debug),
            appenders: RwLock::new(Vec::new()),
            formatter: RwLock::new(None),
            root,
            metrics: LoggerMetrics::new(),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use pattern_logger::prelude::*;
    ///
    /// let logger = Logger::builder("app")
    ///     .level(LogLevel::Info)
    ///     .appender(ConsoleAppender::new())
    ///     .build();
    /// assert_eq!(logger.appender_count(), 1);
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn root(&self) -> Option<&Arc<Logger>> {
        self.root.as_ref()
    }

    pub fn formatter(&self) -> Option<Arc<Formatter>> {
        self.formatter.read().clone()
    }

    pub fn set_formatter(&self, formatter: Arc<Formatter>) {
        *self.formatter.write() = Some(formatter);
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Append to the fan-out list; the same appender may be added twice
    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Remove the first occurrence of `appender` (compared by identity).
    /// Returns whether anything was removed.
    pub fn del_appender<A: Appender + ?Sized>(&self, appender: &Arc<A>) -> bool {
        let target = Arc::as_ptr(appender).cast::<()>();
        let mut appenders = self.appenders.write();
        match appenders
            .iter()
            .position(|a| Arc::as_ptr(a).cast::<()>() == target)
        {
            Some(idx) => {
                appenders.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear_appenders(&self) {
        self.appenders.write().clear();
    }

    /// Snapshot of the current appenders, in fan-out order
    pub fn appenders(&self) -> Vec<Arc<dyn Appender>> {
        self.appenders.read().clone()
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    /// Fan `event` out to every appender, in insertion order.
    ///
    /// Nothing happens when `level` is below this logger's level. Each
    /// appender applies its own threshold. A failing or panicking appender is
    /// reported on stderr and never keeps the remaining appenders from running.
    pub fn log(&self, level: LogLevel, event: &LogEvent) {
        if level < self.level() {
            return;
        }

        self.metrics.record_dispatched();

        // Dispatch from a snapshot so appenders can be changed while logging
        let appenders = self.appenders();
        for (idx, appender) in appenders.iter().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(self, level, event)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) of logger '{}' failed: {}",
                        idx,
                        appender.name(),
                        self.name,
                        e
                    );
                    self.metrics.record_failure();
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} ({}) panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        appender.name(),
                        panic_msg
                    );
                    self.metrics.record_failure();
                }
            }
        }
    }

    #[inline]
    pub fn debug(&self, event: &LogEvent) {
        self.log(LogLevel::Debug, event);
    }

    #[inline]
    pub fn info(&self, event: &LogEvent) {
        self.log(LogLevel::Info, event);
    }

    #[inline]
    pub fn warn(&self, event: &LogEvent) {
        self.log(LogLevel::Warn, event);
    }

    #[inline]
    pub fn error(&self, event: &LogEvent) {
        self.log(LogLevel::Error, event);
    }

    #[inline]
    pub fn fatal(&self, event: &LogEvent) {
        self.log(LogLevel::Fatal, event);
    }

    /// Flush every appender, returning the first error after trying them all
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for appender in self.appenders() {
            if let Err(e) = appender.flush() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let appenders: Vec<String> = self
            .appenders
            .read()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("appenders", &appenders)
            .field("root", &self.root.as_ref().map(|r| r.name().to_string()))
            .finish()
    }
}

/// Builder for constructing a Logger with a fluent API
pub struct LoggerBuilder {
    name: String,
    level: LogLevel,
    appenders: Vec<Arc<dyn Appender>>,
    formatter: Option<Arc<Formatter>>,
    root: Option<Arc<Logger>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::Debug,
            appenders: Vec::new(),
            formatter: None,
            root: None,
        }
    }

    /// Set the logger's own minimum level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Arc::new(appender));
        self
    }

    /// Add an appender that is shared with other loggers
    #[must_use = "builder methods return a new value"]
    pub fn shared_appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Set the logger-level formatter
    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Arc<Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Record `root` as this logger's parent
    #[must_use = "builder methods return a new value"]
    pub fn root(mut self, root: Arc<Logger>) -> Self {
        self.root = Some(root);
        self
    }

    pub fn build(self) -> Arc<Logger> {
        let logger = Logger::unshared(self.name, self.root);
        *logger.level.write() = self.level;
        *logger.formatter.write() = self.formatter;
        *logger.appenders.write() = self.appenders;
        Arc::new(logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::appender::AppenderCore;
    use crate::core::error::LoggerError;
    use parking_lot::Mutex;

    /// Records rendered output in memory
    struct Recording {
        core: AppenderCore,
        name: String,
        lines: Mutex<Vec<String>>,
    }

    impl Recording {
        fn new(name: &str, level: LogLevel) -> Arc<Self> {
            let core = AppenderCore::new();
            core.set_level(level);
            core.set_formatter(Formatter::new("%p %m").shared());
            Arc::new(Self {
                core,
                name: name.to_string(),
                lines: Mutex::new(Vec::new()),
            })
        }

        fn lines(&self) -> Vec<String> {
            self.lines.lock().clone()
        }
    }

    impl Appender for Recording {
        fn core(&self) -> &AppenderCore {
            &self.core
        }

        fn append(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> Result<()> {
            if self.core.accepts(level) {
                let line = self.formatter().format(logger, level, event);
                self.lines.lock().push(line);
            }
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    struct Failing {
        core: AppenderCore,
        panic: bool,
    }

    impl Appender for Failing {
        fn core(&self) -> &AppenderCore {
            &self.core
        }

        fn append(&self, _: &Logger, _: LogLevel, _: &LogEvent) -> Result<()> {
            if self.panic {
                panic!("sink exploded");
            }
            Err(LoggerError::writer("Simulated failure"))
        }

        fn flush(&self) -> Result<()> {
            Err(LoggerError::writer("Simulated flush failure"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn event(logger: &Arc<Logger>, level: LogLevel, message: &str) -> LogEvent {
        LogEvent::new(logger.clone(), level, file!(), line!()).with_message(message)
    }

    #[test]
    fn test_new_logger_defaults() {
        let logger = Logger::new("db");
        assert_eq!(logger.name(), "db");
        assert_eq!(logger.level(), LogLevel::Debug);
        assert_eq!(logger.appender_count(), 0);
        assert!(logger.root().is_none());
        assert!(logger.formatter().is_none());
    }

    #[test]
    fn test_logger_and_appender_thresholds() {
        let logger = Logger::new("thresholds");
        logger.set_level(LogLevel::Warn);
        let sink = Recording::new("sink", LogLevel::Error);
        logger.add_appender(sink.clone());

        logger.log(LogLevel::Info, &event(&logger, LogLevel::Info, "info"));
        assert!(sink.lines().is_empty());
        assert_eq!(logger.metrics().total_dispatched(), 0);

        logger.log(LogLevel::Warn, &event(&logger, LogLevel::Warn, "warn"));
        assert!(sink.lines().is_empty());
        assert_eq!(logger.metrics().total_dispatched(), 1);

        logger.log(LogLevel::Error, &event(&logger, LogLevel::Error, "error"));
        assert_eq!(sink.lines(), vec!["ERROR error".to_string()]);
    }

    #[test]
    fn test_fan_out_in_insertion_order() {
        let logger = Logger::new("fanout");
        let order = Arc::new(Mutex::new(Vec::new()));

        struct Ordered {
            core: AppenderCore,
            tag: &'static str,
            order: Arc<Mutex<Vec<&'static str>>>,
        }
        impl Appender for Ordered {
            fn core(&self) -> &AppenderCore {
                &self.core
            }
            fn append(&self, _: &Logger, _: LogLevel, _: &LogEvent) -> Result<()> {
                self.order.lock().push(self.tag);
                Ok(())
            }
            fn flush(&self) -> Result<()> {
                Ok(())
            }
            fn name(&self) -> &str {
                self.tag
            }
        }

        for tag in ["first", "second", "third"] {
            logger.add_appender(Arc::new(Ordered {
                core: AppenderCore::new(),
                tag,
                order: Arc::clone(&order),
            }));
        }

        logger.info(&event(&logger, LogLevel::Info, "x"));
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_convenience_wrappers_use_their_level() {
        let logger = Logger::new("sugar");
        let sink = Recording::new("sink", LogLevel::Debug);
        logger.add_appender(sink.clone());

        let e = event(&logger, LogLevel::Debug, "m");
        logger.debug(&e);
        logger.info(&e);
        logger.warn(&e);
        logger.error(&e);
        logger.fatal(&e);

        assert_eq!(
            sink.lines(),
            vec!["DEBUG m", "INFO m", "WARN m", "ERROR m", "FATAL m"]
        );
    }

    #[test]
    fn test_del_appender_removes_one_occurrence() {
        let logger = Logger::new("removal");
        let sink = Recording::new("sink", LogLevel::Debug);
        logger.add_appender(sink.clone());
        logger.add_appender(sink.clone());
        assert_eq!(logger.appender_count(), 2);

        assert!(logger.del_appender(&sink));
        assert_eq!(logger.appender_count(), 1);

        assert!(logger.del_appender(&sink));
        assert!(!logger.del_appender(&sink));
        assert_eq!(logger.appender_count(), 0);
    }

    #[test]
    fn test_del_appender_uses_identity() {
        let logger = Logger::new("identity");
        let a = Recording::new("same-name", LogLevel::Debug);
        let b = Recording::new("same-name", LogLevel::Debug);
        logger.add_appender(a.clone());

        assert!(!logger.del_appender(&b));
        assert!(logger.del_appender(&a));
    }

    #[test]
    fn test_clear_appenders() {
        let logger = Logger::new("cleared");
        let sink = Recording::new("sink", LogLevel::Debug);
        logger.add_appender(sink.clone());
        logger.clear_appenders();

        for level in LogLevel::ALL {
            logger.log(level, &event(&logger, level, "dropped"));
        }
        assert!(sink.lines().is_empty());
        assert_eq!(logger.metrics().appender_failures(), 0);
    }

    #[test]
    fn test_failing_appender_does_not_block_others() {
        let logger = Logger::new("isolation");
        logger.add_appender(Arc::new(Failing {
            core: AppenderCore::new(),
            panic: false,
        }));
        logger.add_appender(Arc::new(Failing {
            core: AppenderCore::new(),
            panic: true,
        }));
        let sink = Recording::new("sink", LogLevel::Debug);
        logger.add_appender(sink.clone());

        logger.error(&event(&logger, LogLevel::Error, "still delivered"));

        assert_eq!(sink.lines(), vec!["ERROR still delivered".to_string()]);
        assert_eq!(logger.metrics().appender_failures(), 2);
    }

    #[test]
    fn test_flush_reports_first_error() {
        let logger = Logger::new("flush");
        logger.add_appender(Recording::new("ok", LogLevel::Debug));
        assert!(logger.flush().is_ok());

        logger.add_appender(Arc::new(Failing {
            core: AppenderCore::new(),
            panic: false,
        }));
        assert!(logger.flush().is_err());
    }

    #[test]
    fn test_builder() {
        let root = Logger::new("");
        let logger = Logger::builder("svc")
            .level(LogLevel::Info)
            .formatter(Formatter::new("%m").shared())
            .shared_appender(Recording::new("sink", LogLevel::Debug))
            .root(root.clone())
            .build();

        assert_eq!(logger.name(), "svc");
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.appender_count(), 1);
        assert_eq!(logger.formatter().map(|f| f.pattern().to_string()), Some("%m".to_string()));
        assert!(Arc::ptr_eq(logger.root().expect("root set"), &root));
    }
}
