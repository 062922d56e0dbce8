//! # Console Container
//!
//! Central container holding all subsystem instances, wired to each other
//! through ports and to the shared bus through the notification dispatcher.

pub mod config;
pub mod console;

pub use config::{AuditConfig, BusConfig, ConfigError, ConsoleConfig, LedgerConfig, PollingConfig};
pub use console::ParishConsole;
