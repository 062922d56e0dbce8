use async_trait::async_trait;
use shared_types::{StoreError, TransactionId};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

use crate::domain::{Transaction, TransactionFilter};
use crate::ports::outbound::TransactionRepository;

#[derive(Default)]
struct Tables {
    rows: HashMap<TransactionId, Transaction>,
    receipts: HashSet<String>,
}

/// In-memory ledger with a unique index on receipt numbers.
#[derive(Default)]
pub struct InMemoryTransactionRepository {
    tables: RwLock<Tables>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn insert(&self, tx: &Transaction) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.rows.contains_key(&tx.id) {
            return Err(StoreError::Duplicate(tx.id.to_string()));
        }
        if !tables.receipts.insert(tx.receipt_number.clone()) {
            return Err(StoreError::Duplicate(tx.receipt_number.clone()));
        }
        tables.rows.insert(tx.id, tx.clone());
        Ok(())
    }

    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        Ok(self.tables.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, tx: &Transaction) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        match tables.rows.get_mut(&tx.id) {
            Some(row) => {
                *row = tx.clone();
                Ok(())
            }
            None => Err(StoreError::Unavailable(format!("no row for {}", tx.id))),
        }
    }

    async fn receipt_exists(&self, receipt_number: &str) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.receipts.contains(receipt_number))
    }

    async fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .rows
            .values()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect())
    }
}
