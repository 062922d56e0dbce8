//! # Notifications (pc-02)
//!
//! Per-user notifications (correction approved or rejected) and the single
//! entry point to the shared bus. Subsystems call [`NotificationApi::broadcast`]
//! after every successful write so open views re-fetch.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - `Notification`, `NotificationType`, errors
//! - `ports/` - `NotificationApi` (inbound), `NotificationRepository` (outbound)
//! - `adapters/` - in-memory repository
//! - `service.rs` - `NotificationDispatcher`

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryNotificationRepository;
pub use domain::{NewNotification, Notification, NotificationError, NotificationType};
pub use ports::{NotificationApi, NotificationRepository};
pub use service::NotificationDispatcher;
