//! Logging macros for call sites.
//!
//! Every macro checks the logger's own level first, so no event is built for
//! a severity the logger would reject. The event carries the caller's
//! `file!()` and `line!()` and is emitted exactly once.
//!
//! # Examples
//!
//! ```
//! use pattern_logger::prelude::*;
//! use pattern_logger::{info, log_scope};
//! use std::fmt::Write;
//!
//! let logger = Logger::new("app");
//!
//! // printf-style: the whole body is formatted up front
//! info!(logger, "Server listening on port {}", 8080);
//!
//! // stream-style: append to the body, emitted at end of scope
//! {
//!     let mut scope = log_scope!(logger, LogLevel::Warn);
//!     let _ = write!(scope, "retry {}", 3);
//!     let _ = write!(scope, " of {}", 5);
//! }
//! ```

/// Open an emission scope for `level` on `logger`.
///
/// Evaluates to a [`LogEventGuard`](crate::LogEventGuard) that implements
/// `fmt::Write`; the event is dispatched when the guard is dropped. When the
/// logger's level rejects `level`, the guard is disabled and writes are
/// discarded.
#[macro_export]
macro_rules! log_scope {
    ($logger:expr, $level:expr) => {{
        let logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.level() <= level {
            $crate::LogEventGuard::new($crate::LogEvent::new(
                ::std::sync::Arc::clone(logger),
                level,
                file!(),
                line!(),
            ))
        } else {
            $crate::LogEventGuard::disabled()
        }
    }};
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use pattern_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.level() <= level {
            let mut event = $crate::LogEvent::new(
                ::std::sync::Arc::clone(logger),
                level,
                file!(),
                line!(),
            );
            event.format(format_args!($($arg)+));
            $crate::LogEventGuard::new(event).emit();
        }
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use pattern_logger::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::StreamAppender;
    use crate::core::{Appender, LogLevel, Logger};
    use std::fmt::Write;
    use std::sync::Arc;

    fn capture(logger: &Arc<Logger>) -> Arc<StreamAppender<Vec<u8>>> {
        let appender = Arc::new(StreamAppender::with_writer(Vec::new()).with_pattern("%p %f %m%n"));
        logger.add_appender(appender.clone());
        appender
    }

    fn output(appender: &StreamAppender<Vec<u8>>) -> String {
        String::from_utf8(appender.writer().clone()).expect("utf8")
    }

    #[test]
    fn test_log_macro() {
        let logger = Logger::new("macros");
        let sink = capture(&logger);
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted: {}", 42);

        let expected = format!("INFO {0} Test message\nINFO {0} Formatted: 42\n", file!());
        assert_eq!(output(&sink), expected);
    }

    #[test]
    fn test_level_macros() {
        let logger = Logger::new("macros");
        let sink = capture(&logger);
        debug!(logger, "d");
        info!(logger, "i");
        warn!(logger, "w");
        error!(logger, "e {}", 1);
        fatal!(logger, "f");

        let levels: Vec<String> = output(&sink)
            .lines()
            .map(|line| line.split(' ').next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(levels, vec!["DEBUG", "INFO", "WARN", "ERROR", "FATAL"]);
    }

    #[test]
    fn test_logger_level_skips_event_construction() {
        let logger = Logger::new("macros");
        logger.set_level(LogLevel::Error);
        let sink = capture(&logger);

        info!(logger, "hidden");
        assert_eq!(logger.metrics().total_dispatched(), 0);
        error!(logger, "shown");
        assert_eq!(logger.metrics().total_dispatched(), 1);
        assert!(output(&sink).ends_with("shown\n"));
    }

    #[test]
    fn test_log_scope_emits_once_at_end_of_scope() {
        let logger = Logger::new("macros");
        let sink = capture(&logger);
        {
            let mut scope = log_scope!(logger, LogLevel::Warn);
            write!(scope, "part one").unwrap();
            assert!(output(&sink).is_empty());
            write!(scope, ", part two").unwrap();
        }

        assert_eq!(output(&sink), format!("WARN {} part one, part two\n", file!()));
        assert_eq!(logger.metrics().total_dispatched(), 1);
    }

    #[test]
    fn test_log_scope_disabled_below_logger_level() {
        let logger = Logger::new("macros");
        logger.set_level(LogLevel::Fatal);
        let sink = capture(&logger);
        {
            let mut scope = log_scope!(logger, LogLevel::Info);
            assert!(!scope.is_enabled());
            write!(scope, "ignored").unwrap();
        }
        assert!(output(&sink).is_empty());
        assert_eq!(sink.level(), LogLevel::Debug);
    }

    #[test]
    fn test_macros_accept_logger_reference() {
        let logger = Logger::new("macros");
        let sink = capture(&logger);
        let by_ref = &logger;
        info!(by_ref, "through a reference");
        assert!(output(&sink).ends_with("through a reference\n"));
    }
}
