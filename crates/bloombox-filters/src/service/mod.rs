//! Service Layer
//!
//! Owns the active filter and implements the request handlers on top of the
//! domain layer.

pub mod filter_service;

pub use filter_service::FilterService;
