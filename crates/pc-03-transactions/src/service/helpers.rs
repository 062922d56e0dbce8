//! # Transaction Store - Helper Methods
//!
//! Input validation and receipt allocation shared by donations and payments.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

use super::TransactionStore;
use crate::domain::receipt::{format_receipt_number, normalize_supplied};
use crate::domain::{Category, PaymentMethod, Transaction, TransactionError, ANONYMOUS_DONOR};

/// Fields common to donations and payments, after validation.
pub(crate) struct ValidCommon {
    pub donor: String,
    pub amount: Decimal,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub receipt_number: String,
    pub created_at: DateTime<Utc>,
}

pub(crate) fn validate_amount(amount: Decimal) -> Result<(), TransactionError> {
    if amount <= Decimal::ZERO {
        return Err(TransactionError::validation(format!(
            "amount must be positive, got {amount}"
        )));
    }
    Ok(())
}

pub(crate) fn parse_vocab<T>(raw: &str, field: &str) -> Result<T, TransactionError>
where
    T: FromStr<Err = String>,
{
    if raw.trim().is_empty() {
        return Err(TransactionError::validation(format!("{field} is required")));
    }
    raw.parse().map_err(TransactionError::Validation)
}

pub(crate) fn donor_or_anonymous(donor: Option<&str>) -> String {
    donor
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(ANONYMOUS_DONOR)
        .to_string()
}

/// Trim optional free text; blank becomes `None`.
pub(crate) fn clean_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

pub(crate) fn audit_snapshot(tx: &Transaction) -> Value {
    serde_json::to_value(tx).unwrap_or_default()
}

impl TransactionStore {
    /// Use the supplied receipt number if free, otherwise generate a fresh one.
    pub(crate) async fn allocate_receipt(
        &self,
        supplied: Option<&str>,
        recorded_at: DateTime<Utc>,
    ) -> Result<String, TransactionError> {
        if let Some(receipt) = normalize_supplied(supplied) {
            if self.repository.receipt_exists(&receipt).await? {
                return Err(TransactionError::validation(format!(
                    "receipt number {receipt} already exists"
                )));
            }
            return Ok(receipt);
        }

        for attempt in 1..=self.config.max_receipt_attempts.max(1) {
            let candidate =
                format_receipt_number(&self.config.receipt_prefix, recorded_at, Uuid::new_v4());
            if !self.repository.receipt_exists(&candidate).await? {
                return Ok(candidate);
            }
            debug!(attempt, receipt = %candidate, "Receipt number collision, regenerating");
        }

        Err(TransactionError::validation(
            "could not allocate a unique receipt number",
        ))
    }
}
