//! # BloomBox Telemetry
//!
//! Structured logging setup for BloomBox services and test binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bloombox_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config).expect("Failed to init telemetry");
//!
//!     // tracing events from bloombox-filters are now emitted
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BLOOMBOX_SERVICE_NAME` | `bloombox` | Service name on the startup event |
//! | `BLOOMBOX_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `BLOOMBOX_CONSOLE_OUTPUT` | `true` | Emit to stdout |
//! | `BLOOMBOX_JSON_LOGS` | `false` | JSON formatted output |

mod config;
mod tracing_setup;

use std::sync::OnceLock;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the global tracing subscriber.
///
/// Returns a guard that logs shutdown when dropped. Fails if a subscriber
/// was already installed in this process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config, false)?;

    tracing::info!(
        service = %config.service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Install a quiet subscriber for tests, at most once per process.
///
/// Safe to call from every test; later calls are no-ops. Returns whether a
/// subscriber from this crate is active.
pub fn init_test_telemetry() -> bool {
    static INSTALLED: OnceLock<bool> = OnceLock::new();

    *INSTALLED.get_or_init(|| {
        tracing_setup::init_tracing(&TelemetryConfig::for_tests(), true).is_ok()
    })
}

/// Guard that keeps telemetry active for the lifetime of the application.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}
