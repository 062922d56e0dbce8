//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use shared_types::{Actor, TransactionId, UserId};

use crate::domain::{
    Aggregate, ReceiptView, RecordDonationRequest, RecordPaymentRequest, Transaction,
    TransactionError, TransactionFilter,
};

/// Transaction store API.
#[async_trait]
pub trait TransactionStoreApi: Send + Sync {
    /// Record a walk-in or envelope donation.
    async fn record_donation(
        &self,
        actor: &Actor,
        request: RecordDonationRequest,
    ) -> Result<Transaction, TransactionError>;

    /// Record a payment. Does not touch service requests.
    async fn record_payment(
        &self,
        actor: &Actor,
        request: RecordPaymentRequest,
    ) -> Result<Transaction, TransactionError>;

    /// Void a transaction. One-way; the record is kept.
    async fn void(
        &self,
        id: TransactionId,
        reason: &str,
        actor: &Actor,
    ) -> Result<Transaction, TransactionError>;

    async fn get(&self, id: TransactionId) -> Result<Transaction, TransactionError>;

    /// Matching transactions, newest first.
    async fn list_active(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, TransactionError>;

    /// Totals over matching non-voided transactions.
    async fn aggregate(&self, filter: &TransactionFilter) -> Result<Aggregate, TransactionError>;

    async fn receipt_view(&self, id: TransactionId) -> Result<ReceiptView, TransactionError>;

    /// Payments a member may see in their own history, newest first.
    async fn list_for_payer(&self, user_id: UserId) -> Result<Vec<Transaction>, TransactionError>;
}
