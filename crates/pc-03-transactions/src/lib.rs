//! # Transactions (pc-03)
//!
//! The ledger of money received: envelope and walk-in donations, service and
//! event fees.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Void reason present iff voided | `Transaction::void: Option<VoidRecord>` |
//! | Void is one-way | `service/mod.rs` - `void()` returns `AlreadyVoided` |
//! | Voided never counted | `Aggregate::from_transactions` skips voided rows |
//! | Receipt numbers unique | `allocate_receipt()` + repository receipt index |
//! | One audit entry per change | `record_*` and `void` each append exactly once |
//!
//! The store never touches service requests; linking a payment to a request
//! is the reconciler's job (pc-04).
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - `Transaction`, vocabularies, filters, aggregates, receipt format
//! - `ports/` - `TransactionStoreApi` (inbound), `TransactionRepository` (outbound)
//! - `adapters/` - in-memory repository
//! - `service/` - `TransactionStore`

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryTransactionRepository;
pub use domain::{
    Aggregate, Category, KindFilter, PaymentDetails, PaymentMethod, PaymentType, ReceiptView,
    RecordDonationRequest, RecordPaymentRequest, Transaction, TransactionError, TransactionFilter,
    TransactionKind, TransactionStoreConfig, VoidRecord,
};
pub use ports::{TransactionRepository, TransactionStoreApi};
pub use service::{TransactionStore, TransactionStoreDependencies};
