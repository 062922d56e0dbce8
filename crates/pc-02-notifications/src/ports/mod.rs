//! Ports layer (hexagonal architecture).

pub mod inbound;
pub mod outbound;

pub use inbound::NotificationApi;
pub use outbound::NotificationRepository;
