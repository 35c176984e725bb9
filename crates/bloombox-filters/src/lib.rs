//! # BloomBox Filters
//!
//! Probabilistic set membership: create a filter with a variant and target
//! false positive rate, add byte-string items, check membership.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure filter logic
//!   - `StandardFilter`: fixed-size bit array
//!   - `CountingFilter`: saturating 8-bit counters, supports `remove`
//!   - `ScalableFilter`: grows by appending tighter, larger segments
//!   - `new_filter`: factory over the `Filter` contract
//!   - `FilterConfig` / `FilterConfigBuilder`: configuration with clamping
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `BloomServiceApi`: Driving port (inbound API)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `FilterService`: active filter handle, implements `BloomServiceApi`
//!
//! - **Events Layer** (`events/`): request/response messages
//!
//! ## Invariants
//!
//! - **No false negatives**: after `add(x)`, `check(x)` is true until `x` is
//!   removed (counting only) or the filter is replaced
//! - **Bounded FPR**: items never added are reported present with
//!   probability close to the configured rate
//! - **Counters**: never exceed 255, never go below 0
//!
//! ## Usage Example
//!
//! ```
//! use bloombox_filters::{new_filter, CountingFilter, FilterConfig, FilterType};
//!
//! let config = FilterConfig::new(FilterType::Counting, 100, 0.01);
//! let filter = new_filter(&config).unwrap();
//!
//! filter.add(b"apple");
//! assert!(filter.check(b"apple"));
//!
//! // Removal is a capability of the counting variant only
//! let counting = filter.downcast_ref::<CountingFilter>().unwrap();
//! assert!(counting.remove(b"apple"));
//! assert!(!filter.check(b"apple"));
//! ```

pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    new_filter, CountingFilter, Filter, FilterConfig, FilterConfigBuilder, FilterType,
    ScalableFilter, StandardFilter,
};
pub use error::FilterError;
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::BloomServiceApi;
pub use service::FilterService;
