//! Notification domain.

pub mod entities;
pub mod errors;

pub use entities::{NewNotification, Notification, NotificationType};
pub use errors::NotificationError;
