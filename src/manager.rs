//! Named logger registry
//!
//! The manager hands out one [`Logger`] per name. The logger with the empty
//! name is the root: it is created with a console appender, and every other
//! logger records it as its parent.

use crate::appenders::ConsoleAppender;
use crate::config::LogConfig;
use crate::core::{thread_info, Appender, Formatter, LogLevel, Logger, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Name reserved for the root logger
pub const ROOT_LOGGER_NAME: &str = "";

pub struct LoggerManager {
    root: Arc<Logger>,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LoggerManager {
    pub fn new() -> Self {
        thread_info::mark_start();

        let root = Logger::new(ROOT_LOGGER_NAME);
        root.add_appender(Arc::new(ConsoleAppender::new()));

        let mut loggers = HashMap::new();
        loggers.insert(ROOT_LOGGER_NAME.to_string(), Arc::clone(&root));

        Self {
            root,
            loggers: Mutex::new(loggers),
        }
    }

    /// The process-wide manager, created on first use
    pub fn global() -> &'static LoggerManager {
        static GLOBAL: OnceLock<LoggerManager> = OnceLock::new();
        GLOBAL.get_or_init(LoggerManager::new)
    }

    pub fn root(&self) -> &Arc<Logger> {
        &self.root
    }

    /// The logger called `name`, created at level DEBUG with no appenders if
    /// it does not exist yet
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        let mut loggers = self.loggers.lock();
        let logger = loggers
            .entry(name.to_string())
            .or_insert_with(|| Logger::with_root(name, Arc::clone(&self.root)));
        Arc::clone(logger)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.lock().contains_key(name)
    }

    /// Names of all known loggers, sorted
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Apply a declarative configuration.
    ///
    /// Every appender of every configured logger is built before any logger
    /// is touched, so a bad entry leaves all loggers as they were.
    pub fn configure(&self, config: &LogConfig) -> Result<()> {
        struct Planned {
            name: String,
            level: LogLevel,
            formatter: Option<Arc<Formatter>>,
            appenders: Vec<Arc<dyn Appender>>,
        }

        let mut plan = Vec::with_capacity(config.loggers.len());
        for logger_config in &config.loggers {
            let formatter = logger_config.build_formatter()?;
            let appenders = logger_config
                .appenders
                .iter()
                .map(|appender| appender.build(formatter.as_ref()))
                .collect::<Result<Vec<_>>>()?;
            plan.push(Planned {
                name: logger_config.name.clone(),
                level: logger_config.level,
                formatter,
                appenders,
            });
        }

        for planned in plan {
            let logger = self.get_logger(&planned.name);
            logger.set_level(planned.level);
            if let Some(formatter) = planned.formatter {
                logger.set_formatter(formatter);
            }
            logger.clear_appenders();
            for appender in planned.appenders {
                logger.add_appender(appender);
            }
        }
        Ok(())
    }
}

impl Default for LoggerManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortcut for `LoggerManager::global().get_logger(name)`
pub fn logger(name: &str) -> Arc<Logger> {
    LoggerManager::global().get_logger(name)
}

/// Shortcut for the global root logger
pub fn root_logger() -> Arc<Logger> {
    Arc::clone(LoggerManager::global().root())
}
