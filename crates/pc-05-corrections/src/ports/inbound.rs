//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use shared_types::{Actor, CorrectionRequestId, UserId};
use std::collections::BTreeSet;

use crate::domain::{CorrectionError, CorrectionRequest, ProfileField, SubmitCorrection};

/// Correction approval workflow API.
///
/// ```text
/// pending --approve--> approved --complete--> completed
/// pending --reject---> rejected
/// ```
#[async_trait]
pub trait CorrectionApi: Send + Sync {
    /// File a new request. Fails while the user has one outstanding.
    async fn submit(&self, request: SubmitCorrection) -> Result<CorrectionRequest, CorrectionError>;

    /// Approve a pending request and notify the member.
    async fn approve(
        &self,
        id: CorrectionRequestId,
        actor: &Actor,
    ) -> Result<CorrectionRequest, CorrectionError>;

    /// Reject a pending request, with an optional note for the member.
    async fn reject(
        &self,
        id: CorrectionRequestId,
        actor: &Actor,
        note: Option<&str>,
    ) -> Result<CorrectionRequest, CorrectionError>;

    /// Fields the member may edit now. Empty unless an approved request is unused.
    async fn editable_fields(&self, user_id: UserId) -> Result<BTreeSet<ProfileField>, CorrectionError>;

    /// Called once the member's profile edit is saved. Locks the fields again.
    async fn complete(&self, id: CorrectionRequestId) -> Result<CorrectionRequest, CorrectionError>;

    /// Fails with `FieldLocked` on the first changed field not currently editable.
    async fn check_profile_edit(
        &self,
        user_id: UserId,
        changed: &[ProfileField],
    ) -> Result<(), CorrectionError>;

    async fn get(&self, id: CorrectionRequestId) -> Result<CorrectionRequest, CorrectionError>;

    /// Pending requests, oldest first.
    async fn pending_queue(&self) -> Result<Vec<CorrectionRequest>, CorrectionError>;

    /// A member's requests, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CorrectionRequest>, CorrectionError>;
}
