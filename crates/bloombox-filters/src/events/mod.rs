//! Events Layer - Request/response message types

pub mod requests;
pub mod responses;

pub use requests::{AddRequest, CheckRequest, CreateFilterRequest, RemoveRequest};
pub use responses::{AddResponse, CheckResponse, CreateFilterResponse, RemoveResponse};
