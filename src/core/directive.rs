//! Render steps and the directive registry
//!
//! Every `%x` directive in a pattern is turned into a [`RenderStep`] by a
//! factory looked up in a [`DirectiveRegistry`]. The built-in directives are:
//!
//! | directive | renders                                         |
//! |-----------|-------------------------------------------------|
//! | `%m`      | message body                                    |
//! | `%p`      | severity name                                   |
//! | `%r`      | milliseconds since logging started              |
//! | `%c`      | logger name                                     |
//! | `%t`      | thread id                                       |
//! | `%N`      | thread name                                     |
//! | `%F`      | fiber id                                        |
//! | `%f`      | source file                                     |
//! | `%l`      | source line                                     |
//! | `%d{fmt}` | timestamp, strftime `fmt` (default `%Y-%m-%d %H:%M:%S`) |
//! | `%T`      | tab                                             |
//! | `%n`      | newline                                         |
//!
//! New directives can be added with [`register_directive`] (process-wide) or
//! by building a private registry for [`Formatter::with_registry`].
//!
//! [`Formatter::with_registry`]: super::formatter::Formatter::with_registry

use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::pattern::PATTERN_ERROR;
use chrono::format::{Item, StrftimeItems};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One compiled unit of a formatter's output.
pub trait RenderStep: Send + Sync {
    fn render(
        &self,
        out: &mut dyn fmt::Write,
        logger: &Logger,
        level: LogLevel,
        event: &LogEvent,
    ) -> fmt::Result;

    /// Whether this step stands in for a directive that failed to compile
    fn is_error(&self) -> bool {
        false
    }
}

/// Builds a render step from a directive's brace argument
pub type DirectiveFactory = Arc<dyn Fn(&str) -> Box<dyn RenderStep> + Send + Sync>;

pub struct LiteralStep(String);

impl LiteralStep {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl RenderStep for LiteralStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, _: &LogEvent) -> fmt::Result {
        out.write_str(&self.0)
    }
}

/// Literal marker for a directive that could not be compiled
pub struct ErrorStep(String);

impl ErrorStep {
    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }

    pub fn unknown_directive(name: &str) -> Self {
        Self(format!("<<error_format %{}>>", name))
    }
}

impl RenderStep for ErrorStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, _: &LogEvent) -> fmt::Result {
        out.write_str(&self.0)
    }

    fn is_error(&self) -> bool {
        true
    }
}

struct MessageStep;

impl RenderStep for MessageStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, event: &LogEvent) -> fmt::Result {
        out.write_str(event.content())
    }
}

struct LevelStep;

impl RenderStep for LevelStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, level: LogLevel, _: &LogEvent) -> fmt::Result {
        out.write_str(level.to_str())
    }
}

struct ElapseStep;

impl RenderStep for ElapseStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, event: &LogEvent) -> fmt::Result {
        write!(out, "{}", event.elapse())
    }
}

struct LoggerNameStep;

impl RenderStep for LoggerNameStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, event: &LogEvent) -> fmt::Result {
        out.write_str(event.logger().name())
    }
}

struct ThreadIdStep;

impl RenderStep for ThreadIdStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, event: &LogEvent) -> fmt::Result {
        write!(out, "{}", event.thread_id())
    }
}

struct ThreadNameStep;

impl RenderStep for ThreadNameStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, event: &LogEvent) -> fmt::Result {
        out.write_str(event.thread_name())
    }
}

struct FiberIdStep;

impl RenderStep for FiberIdStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, event: &LogEvent) -> fmt::Result {
        write!(out, "{}", event.fiber_id())
    }
}

struct FileStep;

impl RenderStep for FileStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, event: &LogEvent) -> fmt::Result {
        out.write_str(event.file())
    }
}

struct LineStep;

impl RenderStep for LineStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, event: &LogEvent) -> fmt::Result {
        write!(out, "{}", event.line())
    }
}

struct TabStep;

impl RenderStep for TabStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, _: &LogEvent) -> fmt::Result {
        out.write_char('\t')
    }
}

struct NewLineStep;

impl RenderStep for NewLineStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, _: &LogEvent) -> fmt::Result {
        out.write_char('\n')
    }
}

/// Timestamp rendered with a strftime sub-pattern.
///
/// The sub-pattern is checked once on construction; an invalid one renders
/// [`PATTERN_ERROR`] and reports itself as an error step.
pub struct DateTimeStep {
    format: String,
    valid: bool,
}

impl DateTimeStep {
    pub fn new(format: &str) -> Self {
        let format = if format.is_empty() {
            DEFAULT_DATE_FORMAT.to_string()
        } else {
            format.to_string()
        };
        let valid = !StrftimeItems::new(&format).any(|item| matches!(item, Item::Error));
        Self { format, valid }
    }

    pub fn format(&self) -> &str {
        &self.format
    }
}

impl RenderStep for DateTimeStep {
    fn render(&self, out: &mut dyn fmt::Write, _: &Logger, _: LogLevel, event: &LogEvent) -> fmt::Result {
        if !self.valid {
            return out.write_str(PATTERN_ERROR);
        }
        write!(out, "{}", event.time().format(&self.format))
    }

    fn is_error(&self) -> bool {
        !self.valid
    }
}

/// Maps directive names to render-step factories.
#[derive(Clone, Default)]
pub struct DirectiveRegistry {
    factories: HashMap<String, DirectiveFactory>,
}

impl DirectiveRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in directives
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("m", |_| Box::new(MessageStep));
        registry.register("p", |_| Box::new(LevelStep));
        registry.register("r", |_| Box::new(ElapseStep));
        registry.register("c", |_| Box::new(LoggerNameStep));
        registry.register("t", |_| Box::new(ThreadIdStep));
        registry.register("N", |_| Box::new(ThreadNameStep));
        registry.register("F", |_| Box::new(FiberIdStep));
        registry.register("f", |_| Box::new(FileStep));
        registry.register("l", |_| Box::new(LineStep));
        registry.register("d", |arg| Box::new(DateTimeStep::new(arg)));
        registry.register("T", |_| Box::new(TabStep));
        registry.register("n", |_| Box::new(NewLineStep));
        registry
    }

    /// Add or replace the factory for `name`
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&str) -> Box<dyn RenderStep> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build the step for `name` configured with `arg`, if `name` is registered
    pub fn build(&self, name: &str, arg: &str) -> Option<Box<dyn RenderStep>> {
        self.factories.get(name).map(|factory| factory(arg))
    }

    /// Registered directive names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("directives", &self.names())
            .finish()
    }
}

static GLOBAL_REGISTRY: OnceLock<RwLock<DirectiveRegistry>> = OnceLock::new();

/// The process-wide registry used by [`Formatter::new`].
///
/// [`Formatter::new`]: super::formatter::Formatter::new
pub fn global_registry() -> &'static RwLock<DirectiveRegistry> {
    GLOBAL_REGISTRY.get_or_init(|| RwLock::new(DirectiveRegistry::builtin()))
}

/// Register a directive process-wide. Formatters compiled afterwards see it.
///
/// # Example
///
/// ```
/// use pattern_logger::core::directive::{register_directive, LiteralStep};
/// use pattern_logger::Formatter;
///
/// register_directive("H", |_| Box::new(LiteralStep::new("web-01")));
/// assert!(!Formatter::new("%H %m").is_error());
/// ```
pub fn register_directive<F>(name: impl Into<String>, factory: F)
where
    F: Fn(&str) -> Box<dyn RenderStep> + Send + Sync + 'static,
{
    global_registry().write().register(name, factory);
}
