//! Error types for the filter engine and service

use thiserror::Error;

use crate::domain::FilterType;

/// Errors that can occur when building or serving filters
///
/// Add and Check never fail; Remove reports "not present" through its
/// boolean result, not through this type.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unsupported filter type: {0}")]
    UnsupportedFilterType(String),

    #[error("no active filter, create one first")]
    NoActiveFilter,

    #[error("remove is not supported by {filter_type} filters")]
    RemoveNotSupported { filter_type: FilterType },
}
