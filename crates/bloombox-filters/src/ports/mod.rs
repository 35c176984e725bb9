//! Ports Layer
//!
//! Defines the driving port external callers use. The engine has no driven
//! ports: filters own all of their state.

pub mod inbound;

pub use inbound::BloomServiceApi;
