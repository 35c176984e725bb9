//! Metrics hooks for filter service operations
//!
//! Provides instrumentation points for monitoring request volume, hit ratio
//! and operation latencies.
//!
//! ## Usage
//!
//! ```ignore
//! use bloombox_filters::metrics::{Metrics, MetricsRecorder};
//!
//! let metrics = Metrics::new();
//!
//! let start = std::time::Instant::now();
//! let found = filter.check(item);
//! metrics.record_lookup(start.elapsed(), found);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::FilterType;

/// Metrics collector for filter operations
///
/// Thread-safe counters for monitoring the service.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total filters created
    pub filters_created: AtomicU64,
    /// Creations that replaced an existing active filter
    pub filters_replaced: AtomicU64,
    /// Standard filters created
    pub standard_created: AtomicU64,
    /// Scalable filters created
    pub scalable_created: AtomicU64,
    /// Counting filters created
    pub counting_created: AtomicU64,
    /// Total items added
    pub elements_inserted: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Lookups that reported "maybe present"
    pub lookups_positive: AtomicU64,
    /// Remove requests that reached a counting filter
    pub removals_attempted: AtomicU64,
    /// Remove requests that decremented counters
    pub removals_succeeded: AtomicU64,
    /// Requests refused (bad config, no active filter, unsupported remove)
    pub requests_rejected: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative insert time in nanoseconds
    pub insert_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record filter creation
    ///
    /// # Arguments
    /// * `filter_type` - Variant that was built
    /// * `replaced` - Whether another filter was active before
    pub fn record_filter_created(&self, filter_type: FilterType, replaced: bool) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        let per_type = match filter_type {
            FilterType::Standard => &self.standard_created,
            FilterType::Scalable => &self.scalable_created,
            FilterType::Counting => &self.counting_created,
        };
        per_type.fetch_add(1, Ordering::Relaxed);
        if replaced {
            self.filters_replaced.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record item insertion
    pub fn record_insert(&self, duration: Duration) {
        self.elements_inserted.fetch_add(1, Ordering::Relaxed);
        self.insert_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record lookup operation
    ///
    /// # Arguments
    /// * `duration` - Time taken for lookup
    /// * `found` - Whether the item was reported present (possibly false positive)
    pub fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a remove against a counting filter
    pub fn record_remove(&self, removed: bool) {
        self.removals_attempted.fetch_add(1, Ordering::Relaxed);
        if removed {
            self.removals_succeeded.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a refused request
    pub fn record_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            filters_replaced: self.filters_replaced.load(Ordering::Relaxed),
            standard_created: self.standard_created.load(Ordering::Relaxed),
            scalable_created: self.scalable_created.load(Ordering::Relaxed),
            counting_created: self.counting_created.load(Ordering::Relaxed),
            elements_inserted: self.elements_inserted.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            removals_attempted: self.removals_attempted.load(Ordering::Relaxed),
            removals_succeeded: self.removals_succeeded.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            avg_lookup_ns: self.avg_lookup_time_ns(),
            avg_insert_ns: self.avg_insert_time_ns(),
        }
    }

    /// Calculate average lookup time in nanoseconds
    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookup_time_ns.load(Ordering::Relaxed);
        let count = self.lookups_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Calculate average insert time in nanoseconds
    pub fn avg_insert_time_ns(&self) -> u64 {
        let total = self.insert_time_ns.load(Ordering::Relaxed);
        let count = self.elements_inserted.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of positive lookups to total lookups
    ///
    /// Includes both true positives and false positives.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub filters_replaced: u64,
    pub standard_created: u64,
    pub scalable_created: u64,
    pub counting_created: u64,
    pub elements_inserted: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub removals_attempted: u64,
    pub removals_succeeded: u64,
    pub requests_rejected: u64,
    pub avg_lookup_ns: u64,
    pub avg_insert_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to integrate with external metrics systems
/// like Prometheus, StatsD, or OpenTelemetry.
pub trait MetricsRecorder: Send + Sync {
    /// Record filter creation
    fn record_filter_created(&self, filter_type: FilterType, replaced: bool);

    /// Record item insertion
    fn record_insert(&self, duration: Duration);

    /// Record lookup operation
    fn record_lookup(&self, duration: Duration, found: bool);

    /// Record a remove against a counting filter
    fn record_remove(&self, removed: bool);

    /// Record a refused request
    fn record_rejected(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: FilterType, _: bool) {}
    fn record_insert(&self, _: Duration) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
    fn record_remove(&self, _: bool) {}
    fn record_rejected(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, filter_type: FilterType, replaced: bool) {
        Metrics::record_filter_created(self, filter_type, replaced);
    }

    fn record_insert(&self, duration: Duration) {
        Metrics::record_insert(self, duration);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        Metrics::record_lookup(self, duration, found);
    }

    fn record_remove(&self, removed: bool) {
        Metrics::record_remove(self, removed);
    }

    fn record_rejected(&self) {
        Metrics::record_rejected(self);
    }
}
