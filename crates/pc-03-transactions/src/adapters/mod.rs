//! Adapters for the ledger's outbound ports.

pub mod memory;

pub use memory::InMemoryTransactionRepository;
