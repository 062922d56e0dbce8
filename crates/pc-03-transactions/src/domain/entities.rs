//! # Ledger Entities
//!
//! A donation and a payment record share one shape; payments carry extra
//! [`PaymentDetails`]. A transaction is written once and only ever changed by
//! voiding it, which is one-way.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::{ServiceRequestId, TransactionId, UserId};

use super::value_objects::{Category, PaymentMethod, PaymentType};

/// Donor name used when none is given.
pub const ANONYMOUS_DONOR: &str = "Anonymous";

/// Payment-only fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub payment_type: PaymentType,
    /// Service request this payment settles, if any.
    pub service_request_id: Option<ServiceRequestId>,
    /// External reference (bank or e-wallet transaction number).
    pub reference_number: Option<String>,
    /// Whether the payer sees this record in their own history.
    pub visible_to_user: bool,
    pub payer_user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionKind {
    Donation,
    Payment(PaymentDetails),
}

/// Who voided a transaction, when and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidRecord {
    pub reason: String,
    pub voided_by: UserId,
    pub voided_by_name: String,
    pub voided_at: DateTime<Utc>,
}

/// A donation or payment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub donor: String,
    pub amount: Decimal,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub receipt_number: String,
    pub recorded_by: UserId,
    pub recorded_by_name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub kind: TransactionKind,
    /// Present iff the transaction is voided.
    pub void: Option<VoidRecord>,
}

impl Transaction {
    pub fn is_voided(&self) -> bool {
        self.void.is_some()
    }

    pub fn void_reason(&self) -> Option<&str> {
        self.void.as_ref().map(|v| v.reason.as_str())
    }

    pub fn voided_by(&self) -> Option<UserId> {
        self.void.as_ref().map(|v| v.voided_by)
    }

    pub fn voided_at(&self) -> Option<DateTime<Utc>> {
        self.void.as_ref().map(|v| v.voided_at)
    }

    pub fn payment(&self) -> Option<&PaymentDetails> {
        match &self.kind {
            TransactionKind::Payment(details) => Some(details),
            TransactionKind::Donation => None,
        }
    }

    pub fn is_payment(&self) -> bool {
        self.payment().is_some()
    }

    /// Service request the transaction is linked to (payments only).
    pub fn service_request_id(&self) -> Option<ServiceRequestId> {
        self.payment().and_then(|p| p.service_request_id)
    }

    /// Stable projection handed to the receipt printer.
    pub fn receipt_view(&self) -> ReceiptView {
        let payment = self.payment();
        ReceiptView {
            receipt_number: self.receipt_number.clone(),
            donor: self.donor.clone(),
            amount: self.amount,
            category: self.category,
            payment_method: self.payment_method,
            payment_type: payment.map(|p| p.payment_type),
            reference_number: payment.and_then(|p| p.reference_number.clone()),
            created_at: self.created_at,
            recorded_by: self.recorded_by_name.clone(),
            voided: self.is_voided(),
        }
    }
}

/// What the receipt/PDF collaborator prints.
///
/// Every field except `voided` is fixed once the transaction exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptView {
    pub receipt_number: String,
    pub donor: String,
    pub amount: Decimal,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub payment_type: Option<PaymentType>,
    pub reference_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub recorded_by: String,
    pub voided: bool,
}

/// Input to `record_donation`. Vocabulary fields are raw form text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDonationRequest {
    pub donor: Option<String>,
    pub amount: Decimal,
    pub category: String,
    pub payment_method: String,
    pub notes: Option<String>,
    /// Pre-printed receipt number; generated when absent.
    pub receipt_number: Option<String>,
}

/// Input to `record_payment`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPaymentRequest {
    pub donor: Option<String>,
    pub amount: Decimal,
    pub category: String,
    pub payment_method: String,
    pub notes: Option<String>,
    pub receipt_number: Option<String>,
    pub payment_type: String,
    pub service_request_id: Option<ServiceRequestId>,
    pub reference_number: Option<String>,
    pub visible_to_user: bool,
    pub payer_user_id: Option<UserId>,
}
