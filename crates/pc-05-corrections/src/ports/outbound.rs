//! Outbound Ports (Driven Ports)

use async_trait::async_trait;
use shared_types::{CorrectionRequestId, StoreError, UserId};

use crate::domain::{CorrectionRequest, CorrectionStatus};

/// Correction request persistence.
#[async_trait]
pub trait CorrectionRepository: Send + Sync {
    async fn insert(&self, request: &CorrectionRequest) -> Result<(), StoreError>;

    async fn get(&self, id: CorrectionRequestId) -> Result<Option<CorrectionRequest>, StoreError>;

    /// Replace an existing request.
    async fn update(&self, request: &CorrectionRequest) -> Result<(), StoreError>;

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<CorrectionRequest>, StoreError>;

    async fn find_by_status(&self, status: CorrectionStatus) -> Result<Vec<CorrectionRequest>, StoreError>;
}
