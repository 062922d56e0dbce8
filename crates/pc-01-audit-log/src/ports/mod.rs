//! Ports layer (hexagonal architecture).

pub mod inbound;
pub mod outbound;

pub use inbound::AuditLogApi;
pub use outbound::{AuditSink, FallbackStore};
