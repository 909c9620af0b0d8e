//! Basic logger usage example
//!
//! Demonstrates a named logger with a console appender, the level macros and
//! the stream-style emission scope.
//!
//! Run with: cargo run --example basic_usage

use pattern_logger::prelude::*;
use pattern_logger::{debug, error, fatal, info, log_scope, warn};
use std::fmt::Write;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Pattern Logger - Basic Usage Example ===\n");

    let logger = Logger::new("basic");
    logger.add_appender(Arc::new(ConsoleAppender::new()));

    println!("1. Logging at different levels (default pattern):");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");
    fatal!(logger, "This is a fatal message");

    println!("\n2. Logger level set to INFO - debug won't show:");
    logger.set_level(LogLevel::Info);
    debug!(logger, "Debug message (hidden)");
    info!(logger, "Info message (visible)");

    println!("\n3. Custom pattern with colors:");
    logger.clear_appenders();
    logger.add_appender(Arc::new(
        ConsoleAppender::new()
            .with_pattern("%d{%H:%M:%S} [%p] %c (%N/%t) %f:%l %m%n")
            .with_colors(true),
    ));
    info!(logger, "Server listening on port {}", 8080);
    warn!(logger, "Cache hit ratio {:.1}% below target", 42.5);

    println!("\n4. Building a message across several statements:");
    {
        let mut scope = log_scope!(logger, LogLevel::Info);
        let _ = write!(scope, "loaded modules:");
        for module in ["auth", "billing", "search"] {
            let _ = write!(scope, " {}", module);
        }
    }

    println!("\n5. Broken patterns degrade to inline markers:");
    logger.clear_appenders();
    logger.add_appender(Arc::new(ConsoleAppender::new().with_pattern("%Q %d{%Y [%p] %m%n")));
    info!(logger, "still logged");

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
