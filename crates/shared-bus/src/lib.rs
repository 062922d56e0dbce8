//! # Shared Bus - Cross-View Signal Channel
//!
//! Process-wide publish/subscribe channel used by the notification dispatcher
//! to tell every open view that something changed and it should re-fetch.
//!
//! ## Delivery Model
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Subsystem    │                    │ Open view    │
//! │ (mutation)   │    publish()       │ (listener)   │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │ event or poll tick
//!                  │  Event Bus   │          │
//!                  │              │ ──── RefreshSignal
//!                  └──────────────┘
//! ```
//!
//! - Events are a typed enum ([`ConsoleEvent`]), never string names.
//! - Every event travels in an [`EventEnvelope`] carrying a unique id, so a
//!   consumer can drop duplicates with [`SeenEventCache`] and the channel may
//!   be replaced by an at-least-once transport.
//! - Delivery on the in-memory bus is best-effort. Listeners use
//!   [`RefreshSignal`], which also fires on a poll interval, so a missed event
//!   converges within one interval.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod refresh;
pub mod seen_cache;
pub mod subscriber;

// Re-export main types
pub use events::{ConsoleEvent, EventEnvelope, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use refresh::{RefreshReason, RefreshSignal};
pub use seen_cache::SeenEventCache;
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the slowest one lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// Default poll interval for views that missed a broadcast.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
