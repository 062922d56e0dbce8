//! # Shared Types Crate
//!
//! Types that cross subsystem boundaries in the parish console core.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: ids, the acting identity and the audit
//!   vocabulary are defined once here.
//! - **Explicit Identity**: every state-changing operation receives an
//!   [`Actor`] from the caller. No subsystem keeps a "current user".
//! - **Injected Time**: subsystems read the clock through [`TimeSource`] so
//!   tests can pin timestamps.

pub mod audit;
pub mod entities;
pub mod errors;
pub mod time;

pub use audit::{AuditAction, AuditModule};
pub use entities::*;
pub use errors::StoreError;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource};
