//! Logger metrics for observability
//!
//! Counts events a logger dispatched and appender writes that failed, so a
//! misbehaving sink can be noticed without interrupting the application.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use pattern_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_failure();
///
/// assert_eq!(metrics.total_dispatched(), 1);
/// assert_eq!(metrics.appender_failures(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Events that passed the logger's own level and were fanned out
    total_dispatched: AtomicU64,

    /// Appender writes that returned an error or panicked
    appender_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_dispatched: AtomicU64::new(0),
            appender_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_dispatched(&self) -> u64 {
        self.total_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn appender_failures(&self) -> u64 {
        self.appender_failures.load(Ordering::Relaxed)
    }

    /// Record a dispatched event; returns the previous count
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.total_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed appender write; returns the previous count
    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.appender_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed appender writes per dispatched event, as a percentage
    pub fn failure_rate(&self) -> f64 {
        let dispatched = self.total_dispatched();
        if dispatched == 0 {
            return 0.0;
        }
        (self.appender_failures() as f64 / dispatched as f64) * 100.0
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.total_dispatched.store(0, Ordering::Relaxed);
        self.appender_failures.store(0, Ordering::Relaxed);
    }
}
