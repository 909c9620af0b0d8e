//! Pattern-driven formatter
//!
//! A [`Formatter`] compiles its pattern once into an ordered list of render
//! steps and then renders any number of events with it. Compilation never
//! fails: broken directives turn into visible markers in the output and set
//! [`Formatter::is_error`].

use super::directive::{global_registry, DirectiveRegistry, ErrorStep, LiteralStep, RenderStep};
use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::pattern::{self, TokenKind};
use std::fmt;
use std::io;
use std::sync::Arc;

/// Pattern used by appenders that were not given one
pub const DEFAULT_PATTERN: &str = "%d{%Y-%m-%d %H:%M:%S}\t%t\t%N\t%F\t[%p]\t[%c]\t%f:%l\t%m%n";

pub struct Formatter {
    pattern: String,
    steps: Vec<Box<dyn RenderStep>>,
    error: bool,
}

impl Formatter {
    /// Compile `pattern` against the process-wide directive registry
    pub fn new(pattern: impl Into<String>) -> Self {
        let registry = global_registry().read();
        Self::with_registry(pattern, &registry)
    }

    /// Compile `pattern` against a specific registry
    pub fn with_registry(pattern: impl Into<String>, registry: &DirectiveRegistry) -> Self {
        let pattern = pattern.into();
        let compiled = pattern::compile(&pattern);
        let mut error = compiled.error;

        let steps: Vec<Box<dyn RenderStep>> = compiled
            .tokens
            .into_iter()
            .map(|token| match token.kind {
                TokenKind::Literal => Box::new(LiteralStep::new(token.text)) as Box<dyn RenderStep>,
                TokenKind::Error => Box::new(ErrorStep::new(token.text)),
                TokenKind::Directive => registry
                    .build(&token.text, &token.arg)
                    .unwrap_or_else(|| Box::new(ErrorStep::unknown_directive(&token.text))),
            })
            .collect();

        error |= steps.iter().any(|step| step.is_error());
        if error {
            eprintln!("[LOGGER WARNING] Pattern parse error: {:?}", pattern);
        }

        Self {
            pattern,
            steps,
            error,
        }
    }

    /// Wrap this formatter in an Arc for sharing across appenders
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether any part of the pattern failed to compile
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Render `event` to a new string
    pub fn format(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> String {
        let mut out = String::with_capacity(self.pattern.len() + event.content().len() + 32);
        // Rendering into a String only fails if a custom step reports an error;
        // whatever was rendered up to that point is kept.
        let _ = self.render(&mut out, logger, level, event);
        out
    }

    /// Render `event` into any `fmt::Write` sink
    pub fn render(
        &self,
        out: &mut dyn fmt::Write,
        logger: &Logger,
        level: LogLevel,
        event: &LogEvent,
    ) -> fmt::Result {
        for step in &self.steps {
            step.render(out, logger, level, event)?;
        }
        Ok(())
    }

    /// Render `event` directly into an `io::Write` sink, without building an
    /// intermediate string.
    pub fn format_to<W: io::Write + ?Sized>(
        &self,
        writer: &mut W,
        logger: &Logger,
        level: LogLevel,
        event: &LogEvent,
    ) -> io::Result<()> {
        let mut adapter = IoAdapter {
            inner: writer,
            error: None,
        };
        match self.render(&mut adapter, logger, level, event) {
            Ok(()) => Ok(()),
            Err(fmt::Error) => Err(adapter
                .error
                .unwrap_or_else(|| io::Error::other("formatter step failed"))),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("pattern", &self.pattern)
            .field("steps", &self.steps.len())
            .field("error", &self.error)
            .finish()
    }
}

/// Bridges `fmt::Write` to `io::Write`, keeping the underlying io error.
struct IoAdapter<'a, W: io::Write + ?Sized> {
    inner: &'a mut W,
    error: Option<io::Error>,
}

impl<W: io::Write + ?Sized> fmt::Write for IoAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}
