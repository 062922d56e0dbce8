//! # Parish Telemetry
//!
//! Logging and metrics setup for the parish console runtime.
//!
//! Subsystem crates only emit `tracing` events. This crate installs the
//! subscriber and owns the Prometheus counters, which the runtime updates
//! from bus events.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use parish_telemetry::{init_telemetry, TelemetryConfig};
//!
//! init_telemetry(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PC_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `PC_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |
//! | `PC_LOG_SOURCE` | `false` | File and line in output |
//! | `PC_SERVICE_NAME` | `parish-console` | Service name |

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, AUDIT_FALLBACKS, AUDIT_UNSYNCED, BUS_EVENTS,
    CORRECTIONS_REVIEWED, NOTIFICATIONS_SENT, PAYMENT_COMPENSATIONS, PAYMENT_STATUS_CHANGES,
    TRANSACTIONS_RECORDED, TRANSACTIONS_VOIDED,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics, then install the log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
