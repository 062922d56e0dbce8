//! Outbound Ports (Driven Ports)

use async_trait::async_trait;
use shared_types::{StoreError, TransactionId};

use crate::domain::{Transaction, TransactionFilter};

/// Transaction persistence.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Insert a new transaction. `StoreError::Duplicate` if the id or the
    /// receipt number is taken.
    async fn insert(&self, tx: &Transaction) -> Result<(), StoreError>;

    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError>;

    /// Replace an existing transaction.
    async fn update(&self, tx: &Transaction) -> Result<(), StoreError>;

    async fn receipt_exists(&self, receipt_number: &str) -> Result<bool, StoreError>;

    /// Transactions matching `filter`, any order.
    async fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, StoreError>;
}
