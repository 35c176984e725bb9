//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Hash derivation shared by all variants
//! - Parameter estimation (m, k)
//! - The `Filter` contract
//! - Standard, counting and scalable filters
//! - Configuration and the factory
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Each filter synchronizes its own state

pub mod config;
pub mod counting_bloom;
pub mod factory;
pub mod filter;
pub mod hash_functions;
pub mod parameters;
pub mod scalable_bloom;
pub mod standard_bloom;

pub use config::{
    FilterConfig, FilterConfigBuilder, FilterType, DEFAULT_FALSE_POS_RATE,
    DEFAULT_GROWTH_FACTOR, DEFAULT_SCALABLE_CAPACITY, MAX_GROWTH_FACTOR,
};
pub use counting_bloom::{CountingFilter, MAX_COUNTER};
pub use factory::new_filter;
pub use filter::Filter;
pub use parameters::{
    calculate_fpr, calculate_optimal_parameters, BloomFilterParams, MAX_FILTER_SLOTS,
};
pub use scalable_bloom::{ScalableFilter, TIGHTENING_RATIO};
pub use standard_bloom::StandardFilter;
