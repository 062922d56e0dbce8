//! Ports layer (hexagonal architecture).

pub mod inbound;
pub mod outbound;

pub use inbound::TransactionStoreApi;
pub use outbound::TransactionRepository;
