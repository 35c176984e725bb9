//! Filter Service
//!
//! Holds the active filter and answers requests against it.
//!
//! ## Active filter handle
//!
//! The active filter lives in `RwLock<Option<Arc<dyn Filter>>>`. Request
//! handlers hold that lock only long enough to clone the `Arc`, then run the
//! filter operation with the lock released. Creating a new filter swaps the
//! `Arc`; operations that already cloned the old one complete against it, and
//! it is freed when the last of them drops its handle.
//!
//! The slot lock is separate from each filter's internal lock, so a replace
//! never waits on in-flight adds or checks.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::domain::{new_filter, CountingFilter, Filter, FilterConfig, FilterType};
use crate::error::FilterError;
use crate::events::{
    AddRequest, AddResponse, CheckRequest, CheckResponse, CreateFilterRequest,
    CreateFilterResponse, RemoveRequest, RemoveResponse,
};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::BloomServiceApi;

/// Filter service implementation
///
/// Implements the `BloomServiceApi` port. Thread-safe; share it via `Arc`.
pub struct FilterService {
    /// The filter requests are routed to, if one was created
    active: RwLock<Option<Arc<dyn Filter>>>,
    /// Metrics sink
    metrics: Arc<dyn MetricsRecorder>,
}

impl Default for FilterService {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterService {
    /// Create a service with no active filter and metrics disabled
    pub fn new() -> Self {
        Self::with_metrics(Arc::new(NoOpMetrics))
    }

    /// Create a service recording into the given metrics sink
    pub fn with_metrics(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            active: RwLock::new(None),
            metrics,
        }
    }

    /// Stable handle to the current active filter
    pub fn active_filter(&self) -> Option<Arc<dyn Filter>> {
        self.active.read().clone()
    }

    /// Build a filter and make it the active one
    ///
    /// Returns the variant that was built. On error the previous filter stays
    /// active.
    pub fn replace_filter(&self, config: &FilterConfig) -> Result<FilterType, FilterError> {
        let filter: Arc<dyn Filter> = Arc::from(new_filter(config)?);
        let filter_type = filter.filter_type();

        let previous = self.active.write().replace(filter);
        let replaced = previous.is_some();
        // `previous` is released here, outside the slot lock
        drop(previous);

        self.metrics.record_filter_created(filter_type, replaced);
        info!(%filter_type, replaced, "Active filter set");
        Ok(filter_type)
    }

    /// Add an item to the active filter
    pub fn try_add(&self, data: &[u8]) -> Result<(), FilterError> {
        let filter = self.active_filter().ok_or(FilterError::NoActiveFilter)?;

        let start = Instant::now();
        filter.add(data);
        self.metrics.record_insert(start.elapsed());
        Ok(())
    }

    /// Check an item against the active filter
    pub fn try_check(&self, data: &[u8]) -> Result<bool, FilterError> {
        let filter = self.active_filter().ok_or(FilterError::NoActiveFilter)?;

        let start = Instant::now();
        let found = filter.check(data);
        self.metrics.record_lookup(start.elapsed(), found);
        Ok(found)
    }

    /// Remove an item from the active filter
    ///
    /// `Ok(false)` means the item was definitely not present and nothing
    /// changed.
    pub fn try_remove(&self, data: &[u8]) -> Result<bool, FilterError> {
        let filter = self.active_filter().ok_or(FilterError::NoActiveFilter)?;

        let counting = filter.downcast_ref::<CountingFilter>().ok_or(
            FilterError::RemoveNotSupported {
                filter_type: filter.filter_type(),
            },
        )?;

        let removed = counting.remove(data);
        self.metrics.record_remove(removed);
        Ok(removed)
    }

    fn reject(&self, operation: &'static str, err: &FilterError) {
        self.metrics.record_rejected();
        warn!(operation, error = %err, "Request rejected");
    }
}

impl BloomServiceApi for FilterService {
    fn create_filter(&self, request: CreateFilterRequest) -> CreateFilterResponse {
        match self.replace_filter(&request.to_config()) {
            Ok(filter_type) => CreateFilterResponse {
                success: true,
                message: format!("{} filter created successfully", filter_type),
            },
            Err(err) => {
                self.reject("create_filter", &err);
                CreateFilterResponse {
                    success: false,
                    message: err.to_string(),
                }
            }
        }
    }

    fn add(&self, request: AddRequest) -> AddResponse {
        match self.try_add(&request.data) {
            Ok(()) => AddResponse { success: true },
            Err(err) => {
                self.reject("add", &err);
                AddResponse { success: false }
            }
        }
    }

    fn check(&self, request: CheckRequest) -> CheckResponse {
        match self.try_check(&request.data) {
            Ok(found) => CheckResponse { found },
            Err(err) => {
                self.reject("check", &err);
                CheckResponse { found: false }
            }
        }
    }

    fn remove(&self, request: RemoveRequest) -> RemoveResponse {
        match self.try_remove(&request.data) {
            Ok(true) => RemoveResponse {
                removed: true,
                message: String::new(),
            },
            Ok(false) => {
                debug!("Remove found no matching item");
                RemoveResponse {
                    removed: false,
                    message: "item not present".to_string(),
                }
            }
            Err(err) => {
                self.reject("remove", &err);
                RemoveResponse {
                    removed: false,
                    message: err.to_string(),
                }
            }
        }
    }
}
