//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Records from many threads reach a shared file appender intact
//! - Appenders can be added and removed while other threads are logging
//! - The named-logger registry hands out one logger per name under contention

use pattern_logger::appenders::{FileAppender, StreamAppender};
use pattern_logger::core::{LogLevel, Logger};
use pattern_logger::manager::LoggerManager;
use pattern_logger::{info, log_scope};
use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

/// Every record written concurrently must land as one whole line
#[test]
fn test_concurrent_file_logging_keeps_lines_intact() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.log");

    let logger = Logger::new("stress");
    let appender = FileAppender::new(&log_file)
        .expect("Failed to create appender")
        .with_pattern("%t %m%n");
    logger.add_appender(Arc::new(appender));

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    info!(logger, "worker={} seq={}", worker, i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    let unique: HashSet<&str> = lines
        .iter()
        .map(|line| line.split_once(' ').map(|(_, msg)| msg).unwrap_or_default())
        .collect();
    assert_eq!(unique.len(), THREADS * PER_THREAD);
    assert!(lines.iter().all(|line| line.contains("worker=") && line.contains(" seq=")));
    assert_eq!(logger.metrics().total_dispatched(), (THREADS * PER_THREAD) as u64);
    assert_eq!(logger.metrics().appender_failures(), 0);
}

/// Mutating the appender list never disturbs in-flight dispatch
#[test]
fn test_add_remove_appenders_while_logging() {
    let logger = Logger::new("churn");
    let stable = Arc::new(StreamAppender::with_writer(Vec::new()).with_pattern("%m%n"));
    logger.add_appender(stable.clone());

    let running = Arc::new(AtomicBool::new(true));
    let churner = {
        let logger = Arc::clone(&logger);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut cycles = 0usize;
            while running.load(Ordering::Relaxed) {
                let transient = Arc::new(StreamAppender::with_writer(Vec::new()));
                logger.add_appender(transient.clone());
                assert!(logger.del_appender(&transient));
                cycles += 1;
            }
            cycles
        })
    };

    let writers: Vec<_> = (0..4)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let mut scope = log_scope!(logger, LogLevel::Warn);
                    let _ = write!(scope, "{}:{}", worker, i);
                }
            })
        })
        .collect();

    for handle in writers {
        handle.join().expect("Thread panicked");
    }
    running.store(false, Ordering::Relaxed);
    churner.join().expect("Churner panicked");

    let output = String::from_utf8(stable.writer().clone()).expect("utf8");
    assert_eq!(output.lines().count(), 4 * PER_THREAD);
    assert_eq!(logger.appender_count(), 1);
    assert_eq!(logger.metrics().appender_failures(), 0);
}

/// Racing lookups of the same name all observe a single logger
#[test]
fn test_manager_get_logger_is_unique_under_contention() {
    let manager = Arc::new(LoggerManager::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let manager = Arc::clone(&manager);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                manager.get_logger("shared")
            })
        })
        .collect();

    let loggers: Vec<Arc<Logger>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .collect();

    assert!(loggers.iter().all(|logger| Arc::ptr_eq(logger, &loggers[0])));
    assert_eq!(manager.logger_names(), vec!["".to_string(), "shared".to_string()]);
}
