//! Response Messages
//!
//! Failures are reported inside the response (`success`, `removed`), never
//! as a transport error.

use serde::{Deserialize, Serialize};

/// Result of a create request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateFilterResponse {
    /// Whether a new filter is now active
    pub success: bool,
    /// Confirmation or error description
    pub message: String,
}

/// Result of an add request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddResponse {
    /// False when no filter is active
    pub success: bool,
}

/// Result of a check request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckResponse {
    /// `false`: definitely absent. `true`: present or false positive.
    pub found: bool,
}

/// Result of a remove request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoveResponse {
    /// Whether counters were decremented
    pub removed: bool,
    /// Why nothing was removed, empty on success
    pub message: String,
}
