use async_trait::async_trait;
use shared_types::{ServiceRequestId, StoreError, TransactionId};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::domain::{FundingTransaction, ServiceRequest};
use crate::ports::outbound::{ServiceRequestRepository, TransactionLookup};

/// In-memory service requests, numbered from 1.
pub struct InMemoryServiceRequestRepository {
    rows: RwLock<BTreeMap<ServiceRequestId, ServiceRequest>>,
    next: AtomicU64,
}

impl InMemoryServiceRequestRepository {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Continue numbering after existing requests.
    pub fn starting_at(first: u64) -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next: AtomicU64::new(first),
        }
    }
}

impl Default for InMemoryServiceRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceRequestRepository for InMemoryServiceRequestRepository {
    async fn next_id(&self) -> Result<ServiceRequestId, StoreError> {
        Ok(ServiceRequestId(self.next.fetch_add(1, Ordering::SeqCst)))
    }

    async fn insert(&self, request: &ServiceRequest) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&request.id) {
            return Err(StoreError::Duplicate(request.id.to_string()));
        }
        rows.insert(request.id, request.clone());
        Ok(())
    }

    async fn get(&self, id: ServiceRequestId) -> Result<Option<ServiceRequest>, StoreError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn update(&self, request: &ServiceRequest) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&request.id) {
            Some(row) => {
                *row = request.clone();
                Ok(())
            }
            None => Err(StoreError::Unavailable(format!("no row for {}", request.id))),
        }
    }

    async fn find_paid(&self) -> Result<Vec<ServiceRequest>, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|r| r.is_paid())
            .cloned()
            .collect())
    }

    async fn find_paid_by_donation(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Option<ServiceRequest>, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|r| r.is_paid() && r.donation_id == Some(transaction_id))
            .cloned())
    }
}

/// Fixed set of funding transactions, for tests and tools.
#[derive(Default)]
pub struct StaticTransactionLookup {
    rows: RwLock<HashMap<TransactionId, FundingTransaction>>,
}

impl StaticTransactionLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, funding: FundingTransaction) {
        self.rows.write().await.insert(funding.id, funding);
    }

    pub async fn remove(&self, id: TransactionId) {
        self.rows.write().await.remove(&id);
    }
}

#[async_trait]
impl TransactionLookup for StaticTransactionLookup {
    async fn funding(&self, id: TransactionId) -> Result<Option<FundingTransaction>, StoreError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }
}
