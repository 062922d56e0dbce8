//! Ledger domain: entities, vocabularies, filters and aggregates.

pub mod entities;
pub mod errors;
pub mod query;
pub mod receipt;
pub mod value_objects;

pub use entities::{
    PaymentDetails, ReceiptView, RecordDonationRequest, RecordPaymentRequest, Transaction,
    TransactionKind, VoidRecord, ANONYMOUS_DONOR,
};
pub use errors::TransactionError;
pub use query::{Aggregate, KindFilter, TransactionFilter};
pub use value_objects::{Category, PaymentMethod, PaymentType, TransactionStoreConfig};
