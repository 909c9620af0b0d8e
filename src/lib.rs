//! # Pattern Logger
//!
//! A named-logger framework with printf-like output patterns and pluggable
//! destinations.
//!
//! ## Features
//!
//! - **Pattern Formatting**: `%d{...} [%p] %c %f:%l %m%n` style layouts, compiled once
//! - **Fan-out**: one logger forwards each event to every attached appender
//! - **Thread Safe**: loggers and appenders are shared across threads
//! - **Extensible**: custom appenders and custom `%x` directives
//!
//! ## Example
//!
//! ```
//! use pattern_logger::prelude::*;
//! use pattern_logger::info;
//! use std::sync::Arc;
//!
//! let logger = Logger::new("app");
//! logger.add_appender(Arc::new(
//!     StreamAppender::with_writer(Vec::new()).with_pattern("[%p] %c: %m%n"),
//! ));
//! info!(logger, "started with {} workers", 4);
//! ```

pub mod appenders;
pub mod config;
pub mod core;
pub mod macros;
pub mod manager;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, StreamAppender};
    pub use crate::config::{AppenderConfig, AppenderType, LogConfig, LoggerConfig};
    pub use crate::core::{
        register_directive, Appender, AppenderCore, DirectiveRegistry, Formatter, LogEvent,
        LogEventGuard, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, RenderStep,
        Result, DEFAULT_PATTERN,
    };
    pub use crate::manager::{logger, root_logger, LoggerManager};
}

pub use crate::appenders::{ConsoleAppender, FileAppender, StreamAppender};
pub use crate::config::LogConfig;
pub use crate::core::{
    register_directive, Appender, AppenderCore, DirectiveRegistry, Formatter, LogEvent,
    LogEventGuard, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, RenderStep,
    Result, DEFAULT_PATTERN,
};
pub use crate::manager::LoggerManager;
