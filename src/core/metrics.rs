//! Logger metrics for observability
//!
//! Counts what happened to records after the level gate let them through.
//! Sink failures are only counted here; nothing retries them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use jsonline::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.events_written(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records handed to the sink without error
    events_written: AtomicU64,

    /// Records the sink rejected
    write_failures: AtomicU64,

    /// Active events dropped without `msg` or `send`
    events_discarded: AtomicU64,

    /// Fatal records emitted
    fatal_events: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            events_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            events_discarded: AtomicU64::new(0),
            fatal_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_written(&self) -> u64 {
        self.events_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_discarded(&self) -> u64 {
        self.events_discarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fatal_events(&self) -> u64 {
        self.fatal_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.events_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_discarded(&self) -> u64 {
        self.events_discarded.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fatal(&self) -> u64 {
        self.fatal_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of records the sink rejected, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = self.events_written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.events_written.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.events_discarded.store(0, Ordering::Relaxed);
        self.fatal_events.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            events_written: AtomicU64::new(self.events_written()),
            write_failures: AtomicU64::new(self.write_failures()),
            events_discarded: AtomicU64::new(self.events_discarded()),
            fatal_events: AtomicU64::new(self.fatal_events()),
        }
    }
}
