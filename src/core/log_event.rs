//! Log event structure and the scope guard that emits it

use super::log_level::LogLevel;
use super::logger::Logger;
use super::thread_info;
use chrono::{DateTime, Local};
use std::fmt;
use std::sync::Arc;

/// One logging occurrence.
///
/// The event observes the [`Logger`] it was created for (to read its name and
/// to dispatch itself); it never owns appenders or outlives a log call in
/// practice. The message body may be appended to until the event is emitted.
#[derive(Debug, Clone)]
pub struct LogEvent {
    logger: Arc<Logger>,
    level: LogLevel,
    file: &'static str,
    line: u32,
    time: DateTime<Local>,
    elapse: u64,
    thread_id: u32,
    thread_name: String,
    fiber_id: u32,
    message: String,
}

impl LogEvent {
    pub fn new(logger: Arc<Logger>, level: LogLevel, file: &'static str, line: u32) -> Self {
        Self {
            logger,
            level,
            file,
            line,
            time: Local::now(),
            elapse: thread_info::elapsed_millis(),
            thread_id: thread_info::thread_id(),
            thread_name: thread_info::thread_name(),
            fiber_id: thread_info::fiber_id(),
            message: String::new(),
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_elapse(mut self, elapse: u64) -> Self {
        self.elapse = elapse;
        self
    }

    #[must_use]
    pub fn with_thread(mut self, thread_id: u32, thread_name: impl Into<String>) -> Self {
        self.thread_id = thread_id;
        self.thread_name = thread_name.into();
        self
    }

    #[must_use]
    pub fn with_fiber_id(mut self, fiber_id: u32) -> Self {
        self.fiber_id = fiber_id;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn file(&self) -> &str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn time(&self) -> &DateTime<Local> {
        &self.time
    }

    /// Milliseconds since the logging subsystem started
    pub fn elapse(&self) -> u64 {
        self.elapse
    }

    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    pub fn fiber_id(&self) -> u32 {
        self.fiber_id
    }

    /// The message body accumulated so far
    pub fn content(&self) -> &str {
        &self.message
    }

    /// Mutable access to the message body
    pub fn message_mut(&mut self) -> &mut String {
        &mut self.message
    }

    /// Append pre-formatted arguments to the message body.
    ///
    /// ```
    /// # use pattern_logger::prelude::*;
    /// # let logger = Logger::new("app");
    /// let mut event = LogEvent::new(logger, LogLevel::Info, file!(), line!());
    /// event.format(format_args!("{} of {}", 3, 5));
    /// assert_eq!(event.content(), "3 of 5");
    /// ```
    pub fn format(&mut self, args: fmt::Arguments<'_>) {
        // Writing into a String cannot fail
        let _ = fmt::Write::write_fmt(&mut self.message, args);
    }
}

impl fmt::Write for LogEvent {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.message.push_str(s);
        Ok(())
    }
}

/// RAII guard for one emission.
///
/// The guard hands out the event's message body for writing and, when it goes
/// out of scope on any path, forwards the event to
/// `event.logger().log(event.level(), &event)` exactly once.
///
/// # Example
///
/// ```
/// use pattern_logger::prelude::*;
/// use std::fmt::Write;
///
/// let logger = Logger::new("app");
/// {
///     let mut guard = LogEventGuard::new(LogEvent::new(
///         logger.clone(),
///         LogLevel::Info,
///         file!(),
///         line!(),
///     ));
///     write!(guard, "listening on port {}", 8080).unwrap();
/// } // emitted here
/// ```
#[must_use = "the event is emitted when the guard is dropped"]
pub struct LogEventGuard {
    event: Option<LogEvent>,
}

impl LogEventGuard {
    pub fn new(event: LogEvent) -> Self {
        Self { event: Some(event) }
    }

    /// A guard with no event: writes are discarded and nothing is emitted
    pub fn disabled() -> Self {
        Self { event: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.event.is_some()
    }

    /// The event being built
    pub fn event(&self) -> Option<&LogEvent> {
        self.event.as_ref()
    }

    pub fn event_mut(&mut self) -> Option<&mut LogEvent> {
        self.event.as_mut()
    }

    /// Append pre-formatted arguments to the message body
    pub fn format(&mut self, args: fmt::Arguments<'_>) {
        if let Some(event) = self.event.as_mut() {
            event.format(args);
        }
    }

    /// Emit now instead of at end of scope
    pub fn emit(mut self) {
        self.dispatch();
    }

    fn dispatch(&mut self) {
        if let Some(event) = self.event.take() {
            let logger = Arc::clone(event.logger());
            logger.log(event.level(), &event);
        }
    }
}

impl fmt::Write for LogEventGuard {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.event.as_mut() {
            Some(event) => event.write_str(s),
            None => Ok(()),
        }
    }
}

impl Drop for LogEventGuard {
    fn drop(&mut self) {
        self.dispatch();
    }
}
