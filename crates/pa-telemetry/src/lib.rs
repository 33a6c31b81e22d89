//! # PA Telemetry
//!
//! Structured logging for the validation core.
//!
//! Every crate logs through the `tracing` facade; this crate installs the
//! process-wide subscriber that renders those events.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pa_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() {
//!     init_tracing(&TelemetryConfig::from_env()).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PA_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `PA_JSON_LOGS` | `false` | JSON output |
//! | `PA_SERVICE_NAME` | `polyalgo-chain` | Service name |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{build_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{directive}': {reason}")]
    Filter { directive: String, reason: String },

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}
