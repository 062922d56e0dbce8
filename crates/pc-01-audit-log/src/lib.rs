//! # Audit Log (pc-01)
//!
//! Append-only record of every financial and approval state change.
//!
//! ## Guarantees
//!
//! | Guarantee | Enforcement |
//! |-----------|-------------|
//! | Append never fails the caller | `service.rs` - `append()` returns the entry |
//! | No silent loss | sink → fallback queue → in-memory overflow |
//! | Ordered resync | `retry_unsynced()` drains oldest first, stops at first failure |
//! | Visible gap | `unsynced_count()` |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - `AuditLogEntry`, `NewAuditEntry`, errors
//! - `ports/` - `AuditLogApi` (inbound), `AuditSink` and `FallbackStore` (outbound)
//! - `adapters/` - in-memory sink/queue, JSON-lines file queue
//! - `service.rs` - `AuditLogger`

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryAuditSink, InMemoryFallbackStore, JsonLinesFallbackStore};
pub use domain::{AuditError, AuditLogEntry, AuditSinkError, NewAuditEntry, RetryReport};
pub use ports::{AuditLogApi, AuditSink, FallbackStore};
pub use service::{AuditDependencies, AuditLogger};
