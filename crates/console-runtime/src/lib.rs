//! # Console Runtime Library
//!
//! Wiring, cross-subsystem flows and background workers for the parish
//! console. The `parish-console` binary in `main.rs` is a thin shell over it.
//!
//! - `container/` - `ConsoleConfig` and the `ParishConsole` container
//! - `adapters/` - one subsystem's port over another's API
//! - `flows/` - sagas spanning two aggregates
//! - `workers/` - audit resync, metrics listener

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod container;
pub mod flows;
pub mod workers;

pub use container::{ConfigError, ConsoleConfig, ParishConsole};
pub use flows::{PaymentFlow, PaymentFlowError, ServicePayment};
pub use workers::{AuditResyncWorker, MetricsListener};
