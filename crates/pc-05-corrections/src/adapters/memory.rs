use async_trait::async_trait;
use shared_types::{CorrectionRequestId, StoreError, UserId};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::{CorrectionRequest, CorrectionStatus};
use crate::ports::outbound::CorrectionRepository;

/// In-memory correction requests.
#[derive(Default)]
pub struct InMemoryCorrectionRepository {
    data: RwLock<HashMap<CorrectionRequestId, CorrectionRequest>>,
}

impl InMemoryCorrectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed rows as loaded from an existing store, legacy shapes included.
    pub async fn seed(&self, rows: impl IntoIterator<Item = CorrectionRequest>) {
        let mut data = self.data.write().await;
        for row in rows {
            data.insert(row.id, row);
        }
    }
}

#[async_trait]
impl CorrectionRepository for InMemoryCorrectionRepository {
    async fn insert(&self, request: &CorrectionRequest) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        if data.contains_key(&request.id) {
            return Err(StoreError::Duplicate(request.id.to_string()));
        }
        data.insert(request.id, request.clone());
        Ok(())
    }

    async fn get(&self, id: CorrectionRequestId) -> Result<Option<CorrectionRequest>, StoreError> {
        Ok(self.data.read().await.get(&id).cloned())
    }

    async fn update(&self, request: &CorrectionRequest) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        match data.get_mut(&request.id) {
            Some(row) => {
                *row = request.clone();
                Ok(())
            }
            None => Err(StoreError::Unavailable(format!("no row for {}", request.id))),
        }
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<CorrectionRequest>, StoreError> {
        Ok(self
            .data
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_status(&self, status: CorrectionStatus) -> Result<Vec<CorrectionRequest>, StoreError> {
        Ok(self
            .data
            .read()
            .await
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect())
    }
}
