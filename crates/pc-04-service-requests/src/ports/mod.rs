//! Ports layer (hexagonal architecture).

pub mod inbound;
pub mod outbound;

pub use inbound::ServiceRequestApi;
pub use outbound::{ServiceRequestRepository, TransactionLookup};
