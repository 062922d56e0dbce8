//! Adapters for the notification ports.

pub mod memory;

pub use memory::InMemoryNotificationRepository;
