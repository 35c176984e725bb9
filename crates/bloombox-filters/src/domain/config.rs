//! Filter configuration and normalization
//!
//! Out-of-range parameters are corrected, never rejected:
//! - `false_pos_rate` outside (0, 1) or non-finite → [`DEFAULT_FALSE_POS_RATE`]
//! - `growth_factor` <= 1.0 or non-finite → [`DEFAULT_GROWTH_FACTOR`],
//!   above [`MAX_GROWTH_FACTOR`] → [`MAX_GROWTH_FACTOR`]
//! - `expected_items` above [`MAX_FILTER_SLOTS`] → [`MAX_FILTER_SLOTS`]
//! - `expected_items` of 0 → 1 slot-worth for standard/counting,
//!   [`DEFAULT_SCALABLE_CAPACITY`] for scalable
//!
//! The only configuration error is an unknown filter type tag.
//!
//! # Example
//!
//! ```
//! use bloombox_filters::{new_filter, FilterConfigBuilder, FilterType};
//!
//! let config = FilterConfigBuilder::new()
//!     .filter_type(FilterType::Scalable)
//!     .expected_items(500)
//!     .false_pos_rate(0.01)
//!     .growth_factor(1.5)
//!     .build();
//!
//! let filter = new_filter(&config).unwrap();
//! filter.add(b"apple");
//! assert!(filter.check(b"apple"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parameters::MAX_FILTER_SLOTS;
use crate::error::FilterError;

/// Rate used when the requested one is unusable
pub const DEFAULT_FALSE_POS_RATE: f64 = 0.01;

/// Initial segment capacity of a scalable filter when none is given
pub const DEFAULT_SCALABLE_CAPACITY: usize = 1000;

/// Capacity multiplier of a scalable filter when none (or <= 1.0) is given
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

/// Largest capacity multiplier a scalable filter accepts
pub const MAX_GROWTH_FACTOR: f64 = 10.0;

/// Filter variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Fixed-size bit array
    Standard,
    /// Growing sequence of standard filters
    Scalable,
    /// Fixed-size array of saturating 8-bit counters, supports removal
    Counting,
}

impl FilterType {
    /// Wire tag of this variant
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Standard => "standard",
            FilterType::Scalable => "scalable",
            FilterType::Counting => "counting",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = FilterError;

    /// Parse a tag; case and surrounding whitespace are ignored.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(FilterType::Standard),
            "scalable" => Ok(FilterType::Scalable),
            "counting" => Ok(FilterType::Counting),
            _ => Err(FilterError::UnsupportedFilterType(tag.to_string())),
        }
    }
}

/// Correct a false positive rate into (0, 1).
pub fn sanitize_false_pos_rate(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 && rate < 1.0 {
        rate
    } else {
        DEFAULT_FALSE_POS_RATE
    }
}

/// Correct a growth factor into (1, [`MAX_GROWTH_FACTOR`]].
pub fn sanitize_growth_factor(factor: f64) -> f64 {
    if factor.is_finite() && factor > 1.0 {
        factor.min(MAX_GROWTH_FACTOR)
    } else {
        DEFAULT_GROWTH_FACTOR
    }
}

/// What is needed to build a new filter
///
/// `filter_type` is kept as the raw tag so an unsupported value coming from a
/// request reaches the factory and is reported with its original spelling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Variant tag: "standard", "scalable" or "counting"
    pub filter_type: String,
    /// Expected number of items (initial segment capacity for scalable)
    pub expected_items: usize,
    /// Target false positive rate, e.g. 0.01
    pub false_pos_rate: f64,
    /// Capacity multiplier per new segment (scalable only)
    pub growth_factor: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filter_type: FilterType::Standard.as_str().to_string(),
            expected_items: DEFAULT_SCALABLE_CAPACITY,
            false_pos_rate: DEFAULT_FALSE_POS_RATE,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl FilterConfig {
    /// Create a configuration for a known variant
    pub fn new(filter_type: FilterType, expected_items: usize, false_pos_rate: f64) -> Self {
        Self {
            filter_type: filter_type.as_str().to_string(),
            expected_items,
            false_pos_rate,
            ..Default::default()
        }
    }

    /// Parse the variant tag
    pub fn parsed_type(&self) -> Result<FilterType, FilterError> {
        self.filter_type.parse()
    }

    /// Copy with every numeric field corrected into its valid range
    ///
    /// `expected_items` is only capped here: the default for 0 depends on the
    /// variant and is applied by the variant's constructor.
    pub fn normalized(&self) -> Self {
        Self {
            filter_type: self.filter_type.clone(),
            expected_items: self.expected_items.min(MAX_FILTER_SLOTS),
            false_pos_rate: sanitize_false_pos_rate(self.false_pos_rate),
            growth_factor: sanitize_growth_factor(self.growth_factor),
        }
    }

    /// Builder-style method to set the growth factor
    pub fn with_growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = factor;
        self
    }
}

/// Builder for FilterConfig
///
/// # Example
///
/// ```ignore
/// let config = FilterConfigBuilder::new()
///     .filter_type(FilterType::Counting)
///     .expected_items(100)
///     .false_pos_rate(0.001)
///     .build();
/// ```
#[derive(Default)]
pub struct FilterConfigBuilder {
    filter_type: Option<String>,
    expected_items: Option<usize>,
    false_pos_rate: Option<f64>,
    growth_factor: Option<f64>,
}

impl FilterConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the variant
    pub fn filter_type(mut self, filter_type: FilterType) -> Self {
        self.filter_type = Some(filter_type.as_str().to_string());
        self
    }

    /// Set the variant from a raw tag (validated by the factory)
    pub fn filter_tag(mut self, tag: impl Into<String>) -> Self {
        self.filter_type = Some(tag.into());
        self
    }

    /// Set the expected number of items
    pub fn expected_items(mut self, items: usize) -> Self {
        self.expected_items = Some(items);
        self
    }

    /// Set the target false positive rate
    pub fn false_pos_rate(mut self, rate: f64) -> Self {
        self.false_pos_rate = Some(rate);
        self
    }

    /// Set the growth factor (scalable only)
    pub fn growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = Some(factor);
        self
    }

    /// Build the FilterConfig, filling unset fields from the defaults
    pub fn build(self) -> FilterConfig {
        let defaults = FilterConfig::default();

        FilterConfig {
            filter_type: self.filter_type.unwrap_or(defaults.filter_type),
            expected_items: self.expected_items.unwrap_or(defaults.expected_items),
            false_pos_rate: self.false_pos_rate.unwrap_or(defaults.false_pos_rate),
            growth_factor: self.growth_factor.unwrap_or(defaults.growth_factor),
        }
    }
}
