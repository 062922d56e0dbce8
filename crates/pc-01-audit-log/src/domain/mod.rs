//! Audit log domain.

pub mod entities;
pub mod errors;

pub use entities::{AuditLogEntry, NewAuditEntry, RetryReport};
pub use errors::{AuditError, AuditSinkError};
