//! Adapters for the reconciler's outbound ports.

pub mod memory;

pub use memory::{InMemoryServiceRequestRepository, StaticTransactionLookup};
