//! Background tasks spawned by the runtime.
//!
//! Each worker has a `run` loop that exits when the shutdown channel flips
//! to `true`, and a single-step method the tests drive directly.

pub mod audit_resync;
pub mod metrics_listener;

pub use audit_resync::AuditResyncWorker;
pub use metrics_listener::MetricsListener;
