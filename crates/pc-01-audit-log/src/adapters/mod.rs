//! Adapters for the audit log's outbound ports.

pub mod file;
pub mod memory;

pub use file::JsonLinesFallbackStore;
pub use memory::{InMemoryAuditSink, InMemoryFallbackStore};
