//! # Ledger Lookup Adapter
//!
//! Gives the service request reconciler (pc-04) read access to the ledger
//! (pc-03), limited to the funding projection it needs.

use async_trait::async_trait;
use pc_03_transactions::{PaymentType, Transaction, TransactionError, TransactionStoreApi};
use pc_04_service_requests::{FundingKind, FundingTransaction, TransactionLookup};
use shared_types::{StoreError, TransactionId};
use std::sync::Arc;

/// `TransactionLookup` backed by the transaction store.
pub struct LedgerTransactionLookup {
    transactions: Arc<dyn TransactionStoreApi>,
}

impl LedgerTransactionLookup {
    pub fn new(transactions: Arc<dyn TransactionStoreApi>) -> Self {
        Self { transactions }
    }
}

#[async_trait]
impl TransactionLookup for LedgerTransactionLookup {
    async fn funding(&self, id: TransactionId) -> Result<Option<FundingTransaction>, StoreError> {
        match self.transactions.get(id).await {
            Ok(tx) => Ok(Some(FundingTransaction {
                id: tx.id,
                kind: funding_kind(&tx),
                amount: tx.amount,
                service_request_id: tx.service_request_id(),
                voided: tx.is_voided(),
            })),
            Err(TransactionError::NotFound(_)) => Ok(None),
            Err(TransactionError::Store(e)) => Err(e),
            Err(other) => Err(StoreError::Unavailable(other.to_string())),
        }
    }
}

fn funding_kind(tx: &Transaction) -> FundingKind {
    match tx.payment().map(|p| p.payment_type) {
        None => FundingKind::Donation,
        Some(PaymentType::ServiceFee | PaymentType::EventFee) => FundingKind::FeePayment,
        Some(PaymentType::Donation) => FundingKind::OtherPayment,
    }
}
