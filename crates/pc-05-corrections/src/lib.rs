//! # Corrections (pc-05)
//!
//! Member profile fields are locked. A member files a correction request
//! naming the fields to unlock; an admin approves or rejects it; once the
//! member saves their edits the request completes and the fields lock again.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Non-empty field set, non-blank reason | `submit()` validation |
//! | At most one outstanding request per user | `submit()` returns `OutstandingRequest` |
//! | Editable = fields of the unused approved request | `editable_fields()` |
//! | Legacy rows grant nothing | `retire_legacy()` closes them on sight |
//! | One audit entry per transition | `commit()` |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - `CorrectionRequest`, `ProfileField` schema, errors
//! - `ports/` - `CorrectionApi` (inbound), `CorrectionRepository` (outbound)
//! - `adapters/` - in-memory repository
//! - `service/` - `CorrectionWorkflow`

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryCorrectionRepository;
pub use domain::{
    CorrectionError, CorrectionRequest, CorrectionStatus, ProfileField, SubmitCorrection,
};
pub use ports::{CorrectionApi, CorrectionRepository};
pub use service::{CorrectionDependencies, CorrectionWorkflow};
