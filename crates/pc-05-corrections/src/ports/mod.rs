//! Ports layer (hexagonal architecture).

pub mod inbound;
pub mod outbound;

pub use inbound::CorrectionApi;
pub use outbound::CorrectionRepository;
