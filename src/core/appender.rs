//! Appender trait for log output destinations

use super::{
    error::Result, formatter::Formatter, log_event::LogEvent, log_level::LogLevel,
    logger::Logger,
};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

/// A sink pairing a destination with a [`Formatter`] and a minimum level.
///
/// Appenders are shared (`Arc<dyn Appender>`) between loggers, so every
/// method takes `&self`; implementations guard their own state.
pub trait Appender: Send + Sync {
    /// Level and formatter shared by every appender
    fn core(&self) -> &AppenderCore;

    /// Render and write `event` if `level` meets this appender's threshold.
    ///
    /// Events below the threshold are dropped silently and return `Ok(())`.
    fn append(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> Result<()>;

    fn flush(&self) -> Result<()>;

    fn name(&self) -> &str;

    fn level(&self) -> LogLevel {
        self.core().level()
    }

    fn set_level(&self, level: LogLevel) {
        self.core().set_level(level);
    }

    fn formatter(&self) -> Arc<Formatter> {
        self.core().formatter()
    }

    fn set_formatter(&self, formatter: Arc<Formatter>) {
        self.core().set_formatter(formatter);
    }

    /// Whether a formatter was set explicitly, rather than the library default
    fn has_formatter(&self) -> bool {
        self.core().has_formatter()
    }
}

/// The process-wide formatter for [`DEFAULT_PATTERN`], compiled once.
///
/// [`DEFAULT_PATTERN`]: super::formatter::DEFAULT_PATTERN
pub fn default_formatter() -> Arc<Formatter> {
    static DEFAULT: OnceLock<Arc<Formatter>> = OnceLock::new();
    Arc::clone(DEFAULT.get_or_init(|| Formatter::default().shared()))
}

/// Threshold and formatter state embedded in each appender.
#[derive(Debug)]
pub struct AppenderCore {
    level: RwLock<LogLevel>,
    formatter: RwLock<Option<Arc<Formatter>>>,
}

impl AppenderCore {
    pub fn new() -> Self {
        Self {
            level: RwLock::new(LogLevel::Debug),
            formatter: RwLock::new(None),
        }
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    /// The explicit formatter, or the library default
    pub fn formatter(&self) -> Arc<Formatter> {
        self.formatter.read().clone().unwrap_or_else(default_formatter)
    }

    pub fn set_formatter(&self, formatter: Arc<Formatter>) {
        *self.formatter.write() = Some(formatter);
    }

    pub fn has_formatter(&self) -> bool {
        self.formatter.read().is_some()
    }

    /// Inclusive threshold test: an event at exactly the configured level passes
    #[inline]
    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.level()
    }
}

impl Default for AppenderCore {
    fn default() -> Self {
        Self::new()
    }
}
