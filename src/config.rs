//! Declarative logger configuration
//!
//! ```
//! use pattern_logger::config::LogConfig;
//!
//! let config = LogConfig::from_json(r#"{
//!     "loggers": [{
//!         "name": "http",
//!         "level": "INFO",
//!         "formatter": "%d [%p] %m%n",
//!         "appenders": [
//!             { "type": "stdout" },
//!             { "type": "file", "path": "/tmp/http.log", "level": "ERROR" }
//!         ]
//!     }]
//! }"#).unwrap();
//! assert_eq!(config.loggers[0].appenders.len(), 2);
//! ```

use crate::appenders::{ConsoleAppender, FileAppender};
use crate::core::{Appender, Formatter, LogLevel, LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub loggers: Vec<LoggerConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: LogLevel,
    /// Pattern for appenders that do not set their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
    #[serde(default)]
    pub appenders: Vec<AppenderConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppenderType {
    Stdout,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppenderConfig {
    #[serde(rename = "type")]
    pub kind: AppenderType,
    /// Destination of a `file` appender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
}

fn default_level() -> LogLevel {
    LogLevel::Debug
}

impl LogConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading logger configuration", path.display().to_string(), e)
        })?;
        Self::from_json(&json)
    }
}

impl LoggerConfig {
    /// Compile the logger-level formatter, if any
    pub fn build_formatter(&self) -> Result<Option<Arc<Formatter>>> {
        self.formatter
            .as_deref()
            .map(|pattern| compile_pattern(&self.name, pattern))
            .transpose()
    }
}

impl AppenderConfig {
    /// Build the appender. Without its own pattern it takes `inherited`, and
    /// failing that the library default.
    pub fn build(&self, inherited: Option<&Arc<Formatter>>) -> Result<Arc<dyn Appender>> {
        let appender: Arc<dyn Appender> = match self.kind {
            AppenderType::Stdout => Arc::new(ConsoleAppender::new()),
            AppenderType::File => {
                let path = self
                    .path
                    .as_ref()
                    .ok_or_else(|| LoggerError::config("appender", "file appender requires a path"))?;
                Arc::new(FileAppender::new(path)?)
            }
        };

        if let Some(level) = self.level {
            appender.set_level(level);
        }
        match (&self.formatter, inherited) {
            (Some(pattern), _) => appender.set_formatter(compile_pattern("appender", pattern)?),
            (None, Some(formatter)) => appender.set_formatter(Arc::clone(formatter)),
            (None, None) => {}
        }
        Ok(appender)
    }
}

fn compile_pattern(component: &str, pattern: &str) -> Result<Arc<Formatter>> {
    let formatter = Formatter::new(pattern);
    if formatter.is_error() {
        return Err(LoggerError::config(
            component,
            format!("invalid formatter pattern {:?}", pattern),
        ));
    }
    Ok(formatter.shared())
}
