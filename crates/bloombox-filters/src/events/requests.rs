//! Request Messages
//!
//! Transport-neutral payloads accepted by the filter service. Item data is
//! opaque bytes of any length, including empty.

use serde::{Deserialize, Serialize};

use crate::domain::FilterConfig;

/// Request to create a new filter, replacing the active one
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateFilterRequest {
    /// Variant tag: "standard", "scalable" or "counting"
    pub filter_type: String,
    /// Expected number of items
    pub expected_items: u64,
    /// Target false positive rate
    pub false_pos_rate: f64,
    /// Capacity multiplier per segment (scalable only)
    pub growth_factor: f64,
}

impl CreateFilterRequest {
    /// Translate into a filter configuration
    pub fn to_config(&self) -> FilterConfig {
        FilterConfig {
            filter_type: self.filter_type.clone(),
            expected_items: usize::try_from(self.expected_items).unwrap_or(usize::MAX),
            false_pos_rate: self.false_pos_rate,
            growth_factor: self.growth_factor,
        }
    }
}

/// Request to add an item to the active filter
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AddRequest {
    pub data: Vec<u8>,
}

/// Request to check an item against the active filter
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub data: Vec<u8>,
}

/// Request to remove an item from the active filter (counting only)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoveRequest {
    pub data: Vec<u8>,
}
