//! Adapters for the correction workflow's outbound ports.

pub mod memory;

pub use memory::InMemoryCorrectionRepository;
