//! Core logger types and traits

pub mod appender;
pub mod directive;
pub mod error;
pub mod formatter;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod pattern;
pub mod thread_info;

pub use appender::{default_formatter, Appender, AppenderCore};
pub use directive::{
    global_registry, register_directive, DateTimeStep, DirectiveFactory, DirectiveRegistry,
    ErrorStep, LiteralStep, RenderStep, DEFAULT_DATE_FORMAT,
};
pub use error::{LoggerError, Result};
pub use formatter::{Formatter, DEFAULT_PATTERN};
pub use log_event::{LogEvent, LogEventGuard};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use pattern::{CompiledPattern, PatternToken, TokenKind, PATTERN_ERROR};
