//! # Service Requests (pc-04)
//!
//! Keeps `ServiceRequest.payment_status` consistent with the ledger.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Paid only by a live, linked transaction | `mark_paid()` checks voided + `is_linked_to` |
//! | One transaction settles one request | `mark_paid()` checks `find_paid_by_donation` |
//! | Revert clears the link | `mark_unpaid()` sets `donation_id = None` |
//! | Revert is staff-only and explained | `Role::can_manage_finances`, non-blank reason |
//! | One audit entry per change | `commit_payment_change()` |
//!
//! Voiding the funding transaction does not revert payment status.
//! `find_divergences()` lists the requests where the two disagree.
//!
//! ## Outbound Dependencies
//!
//! | Port | Purpose |
//! |------|---------|
//! | `TransactionLookup` | Funding transaction projection from the ledger |
//! | `ServiceRequestRepository` | Request persistence |

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryServiceRequestRepository, StaticTransactionLookup};
pub use domain::{
    DivergenceKind, FundingKind, FundingTransaction, PaymentDivergence, PaymentStatus,
    RequestStatus, ServiceRequest, ServiceRequestError,
};
pub use ports::{ServiceRequestApi, ServiceRequestRepository, TransactionLookup};
pub use service::{ReconcilerDependencies, ServiceRequestReconciler};
