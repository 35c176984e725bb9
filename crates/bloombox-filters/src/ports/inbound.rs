//! Inbound Ports (Driving Ports)
//!
//! The API a transport (RPC server, HTTP handler, CLI) drives. Every
//! operation is synchronous and bounded by O(k) work per call.

use crate::events::{
    AddRequest, AddResponse, CheckRequest, CheckResponse, CreateFilterRequest,
    CreateFilterResponse, RemoveRequest, RemoveResponse,
};

/// Primary filter service API (Driving Port)
pub trait BloomServiceApi: Send + Sync {
    /// Build a filter from the request and make it the active filter
    ///
    /// Operations already holding the previous filter finish against it.
    fn create_filter(&self, request: CreateFilterRequest) -> CreateFilterResponse;

    /// Add an item to the active filter
    fn add(&self, request: AddRequest) -> AddResponse;

    /// Check an item against the active filter
    ///
    /// Reports not found when no filter is active.
    fn check(&self, request: CheckRequest) -> CheckResponse;

    /// Remove an item from the active filter
    ///
    /// Only counting filters support removal; other variants report failure.
    fn remove(&self, request: RemoveRequest) -> RemoveResponse;
}
