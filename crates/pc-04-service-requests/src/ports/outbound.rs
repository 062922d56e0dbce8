//! Outbound Ports (Driven Ports)

use async_trait::async_trait;
use shared_types::{ServiceRequestId, StoreError, TransactionId};

use crate::domain::{FundingTransaction, ServiceRequest};

/// Service request persistence.
#[async_trait]
pub trait ServiceRequestRepository: Send + Sync {
    /// Reserve the next sequential request number.
    async fn next_id(&self) -> Result<ServiceRequestId, StoreError>;

    async fn insert(&self, request: &ServiceRequest) -> Result<(), StoreError>;

    async fn get(&self, id: ServiceRequestId) -> Result<Option<ServiceRequest>, StoreError>;

    /// Replace an existing request.
    async fn update(&self, request: &ServiceRequest) -> Result<(), StoreError>;

    /// All requests currently marked paid.
    async fn find_paid(&self) -> Result<Vec<ServiceRequest>, StoreError>;

    /// The paid request settled by `transaction_id`, if any.
    async fn find_paid_by_donation(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Option<ServiceRequest>, StoreError>;
}

/// Read access to the ledger, limited to what reconciliation needs.
#[async_trait]
pub trait TransactionLookup: Send + Sync {
    async fn funding(&self, id: TransactionId) -> Result<Option<FundingTransaction>, StoreError>;
}
