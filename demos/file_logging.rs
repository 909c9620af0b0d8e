//! File logging example
//!
//! Demonstrates a file appender next to a console appender, per-appender
//! thresholds and reopening the file.
//!
//! Run with: cargo run --example file_logging

use pattern_logger::prelude::*;
use pattern_logger::{error, info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Pattern Logger - File Logging Example ===\n");

    let log_path = std::env::temp_dir().join("pattern_logger_demo.log");
    println!("Writing to {}", log_path.display());

    let file = Arc::new(FileAppender::new(&log_path)?.with_pattern("%d [%p] %c %f:%l %m%n"));
    let console = Arc::new(ConsoleAppender::new().with_level(LogLevel::Warn));

    let logger = Logger::builder("files")
        .level(LogLevel::Debug)
        .shared_appender(file.clone())
        .shared_appender(console)
        .build();

    for i in 0..5 {
        info!(logger, "Processing batch {}", i);
    }
    warn!(logger, "Batch 3 was slow");
    error!(logger, "Batch 4 failed: {}", "connection reset");
    logger.flush()?;

    let content = std::fs::read_to_string(&log_path)?;
    println!("\nFile has {} lines after the first run", content.lines().count());

    // Reopen truncates the file; external rotation tools rely on this
    file.reopen()?;
    info!(logger, "Fresh file after reopen");
    logger.flush()?;

    let content = std::fs::read_to_string(&log_path)?;
    println!("File has {} line(s) after reopen:\n{}", content.lines().count(), content);

    println!("=== Example completed successfully! ===");
    Ok(())
}
