//! # Correction Approval Workflow
//!
//! Implements `CorrectionApi`. Each transition is one write, one audit entry
//! and one broadcast, in that order. Review outcomes also create a
//! notification for the member.
//!
//! Rows stored before field selection existed have no `fields_to_edit`.
//! Whenever such a row is found outstanding it is closed as completed and
//! grants nothing.


use async_trait::async_trait;
use pc_01_audit_log::{AuditLogApi, NewAuditEntry};
use pc_02_notifications::{NewNotification, NotificationApi, NotificationType};
use serde_json::json;
use shared_bus::ConsoleEvent;
use shared_types::{
    Actor, AuditAction, AuditModule, CorrectionRequestId, SystemTimeSource, TimeSource, UserId,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    CorrectionError, CorrectionRequest, CorrectionStatus, ProfileField, SubmitCorrection,
};
use crate::ports::inbound::CorrectionApi;
use crate::ports::outbound::CorrectionRepository;

/// Dependencies for `CorrectionWorkflow`.
pub struct CorrectionDependencies {
    pub repository: Arc<dyn CorrectionRepository>,
    pub audit: Arc<dyn AuditLogApi>,
    pub notifier: Arc<dyn NotificationApi>,
    pub time_source: Arc<dyn TimeSource>,
}

impl CorrectionDependencies {
    pub fn new(
        repository: Arc<dyn CorrectionRepository>,
        audit: Arc<dyn AuditLogApi>,
        notifier: Arc<dyn NotificationApi>,
    ) -> Self {
        Self {
            repository,
            audit,
            notifier,
            time_source: Arc::new(SystemTimeSource),
        }
    }
}

pub struct CorrectionWorkflow {
    repository: Arc<dyn CorrectionRepository>,
    audit: Arc<dyn AuditLogApi>,
    notifier: Arc<dyn NotificationApi>,
    time_source: Arc<dyn TimeSource>,
}

/// Outcome of a review.
#[derive(Clone, Copy)]
enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn action(self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }
}

impl CorrectionWorkflow {
    pub fn new(deps: CorrectionDependencies) -> Self {
        Self {
            repository: deps.repository,
            audit: deps.audit,
            notifier: deps.notifier,
            time_source: deps.time_source,
        }
    }

    async fn load(&self, id: CorrectionRequestId) -> Result<CorrectionRequest, CorrectionError> {
        self.repository
            .get(id)
            .await?
            .ok_or(CorrectionError::NotFound(id))
    }

    /// Write, audit, broadcast.
    async fn commit(
        &self,
        request: &CorrectionRequest,
        entry: NewAuditEntry,
        event: ConsoleEvent,
    ) -> Result<(), CorrectionError> {
        self.repository.update(request).await?;
        self.audit.append(entry.record(request.id)).await;
        self.notifier.broadcast(event).await;
        Ok(())
    }

    /// Close a field-less row so it grants nothing and blocks nothing.
    async fn retire_legacy(&self, mut request: CorrectionRequest) -> Result<(), CorrectionError> {
        let before = request.state_label();
        request.completed = true;
        request.completed_at = Some(self.time_source.now());

        warn!(
            request_id = %request.id,
            user_id = %request.user_id,
            "Closing correction request stored without a field list"
        );

        let entry = NewAuditEntry::new(
            &Actor::system(),
            AuditAction::Complete,
            AuditModule::Corrections,
            "Closed legacy correction request without a field list",
        )
        .change(json!({ "state": before }), json!({ "state": "completed" }));

        self.commit(
            &request,
            entry,
            ConsoleEvent::CorrectionCompleted {
                request_id: request.id,
                user_id: request.user_id,
            },
        )
        .await
    }

    /// The user's requests after closing any legacy outstanding rows.
    async fn requests_for(&self, user_id: UserId) -> Result<Vec<CorrectionRequest>, CorrectionError> {
        let mut requests = self.repository.find_by_user(user_id).await?;
        for request in requests.iter_mut() {
            if request.is_legacy() && request.is_outstanding() {
                self.retire_legacy(request.clone()).await?;
                request.completed = true;
            }
        }
        Ok(requests)
    }

    async fn review(
        &self,
        id: CorrectionRequestId,
        actor: &Actor,
        decision: Decision,
        note: Option<&str>,
    ) -> Result<CorrectionRequest, CorrectionError> {
        let mut request = self.load(id).await?;
        if !actor.role.can_review_corrections() {
            return Err(CorrectionError::PermissionDenied {
                role: actor.role,
                action: "review correction requests",
            });
        }
        if request.status != CorrectionStatus::Pending || request.completed {
            return Err(CorrectionError::InvalidTransition {
                id,
                state: request.state_label(),
                action: decision.action(),
            });
        }
        if matches!(decision, Decision::Approve) && request.fields().is_empty() {
            return Err(CorrectionError::Validation(
                "request has no fields to unlock".to_string(),
            ));
        }

        let note = note.map(str::trim).filter(|n| !n.is_empty());
        let (status, action, notification_type) = match decision {
            Decision::Approve => (
                CorrectionStatus::Approved,
                AuditAction::Approve,
                NotificationType::CorrectionApproved,
            ),
            Decision::Reject => (
                CorrectionStatus::Rejected,
                AuditAction::Reject,
                NotificationType::CorrectionRejected,
            ),
        };

        request.status = status;
        request.reviewed_by = Some(actor.user_id);
        request.reviewed_by_name = Some(actor.user_name.clone());
        request.reviewed_at = Some(self.time_source.now());
        request.review_note = note.map(str::to_string);

        let entry = NewAuditEntry::new(
            actor,
            action,
            AuditModule::Corrections,
            format!(
                "{} correction request from {}",
                match decision {
                    Decision::Approve => "Approved",
                    Decision::Reject => "Rejected",
                },
                request.user_name
            ),
        )
        .change(
            json!({ "status": CorrectionStatus::Pending }),
            json!({
                "status": status,
                "fields_to_edit": request.fields_to_edit,
                "note": request.review_note,
            }),
        );

        self.commit(
            &request,
            entry,
            ConsoleEvent::CorrectionReviewed {
                request_id: id,
                user_id: request.user_id,
                approved: matches!(decision, Decision::Approve),
            },
        )
        .await?;

        let notification = review_notification(&request, notification_type);
        if let Err(e) = self.notifier.notify(notification).await {
            // Review is already committed.
            warn!(request_id = %id, error = %e, "Failed to create review notification");
        }

        info!(
            request_id = %id,
            user_id = %request.user_id,
            status = %status,
            actor = %actor.user_name,
            "Correction request reviewed"
        );
        Ok(request)
    }
}

fn review_notification(
    request: &CorrectionRequest,
    notification_type: NotificationType,
) -> NewNotification {
    let (title, message) = match notification_type {
        NotificationType::CorrectionApproved => (
            "Correction Request Approved",
            format!(
                "Your correction request was approved. You may now edit: {}.",
                request.field_labels()
            ),
        ),
        _ => (
            "Correction Request Rejected",
            match &request.review_note {
                Some(note) => format!("Your correction request was rejected. Note: {note}"),
                None => "Your correction request was rejected.".to_string(),
            },
        ),
    };
    NewNotification::new(request.user_id, notification_type, title, message).about(request.id)
}

#[async_trait]
impl CorrectionApi for CorrectionWorkflow {
    async fn submit(&self, input: SubmitCorrection) -> Result<CorrectionRequest, CorrectionError> {
        if input.fields_to_edit.is_empty() {
            return Err(CorrectionError::Validation(
                "select at least one field to edit".to_string(),
            ));
        }
        let reason = input.reason.trim();
        if reason.is_empty() {
            return Err(CorrectionError::Validation(
                "a reason for the correction is required".to_string(),
            ));
        }

        if let Some(open) = self
            .requests_for(input.user_id)
            .await?
            .into_iter()
            .find(CorrectionRequest::is_outstanding)
        {
            return Err(CorrectionError::OutstandingRequest(open.id));
        }

        let request = CorrectionRequest {
            id: CorrectionRequestId::new(),
            user_id: input.user_id,
            user_name: input.user_name,
            user_email: input.user_email,
            member_id: input.member_id,
            request: reason.to_string(),
            fields_to_edit: Some(input.fields_to_edit),
            status: CorrectionStatus::Pending,
            completed: false,
            reviewed_by: None,
            reviewed_by_name: None,
            reviewed_at: None,
            review_note: None,
            created_at: self.time_source.now(),
            completed_at: None,
        };
        self.repository.insert(&request).await?;

        self.audit
            .append(
                NewAuditEntry::new(
                    &request.requester(),
                    AuditAction::Submit,
                    AuditModule::Corrections,
                    format!("Requested correction of {}", request.field_labels()),
                )
                .record(request.id)
                .created(json!({
                    "fields_to_edit": request.fields_to_edit,
                    "request": request.request,
                })),
            )
            .await;
        self.notifier
            .broadcast(ConsoleEvent::CorrectionSubmitted {
                request_id: request.id,
                user_id: request.user_id,
            })
            .await;

        info!(
            request_id = %request.id,
            user_id = %request.user_id,
            fields = request.fields().len(),
            "Correction request submitted"
        );
        Ok(request)
    }

    async fn approve(
        &self,
        id: CorrectionRequestId,
        actor: &Actor,
    ) -> Result<CorrectionRequest, CorrectionError> {
        self.review(id, actor, Decision::Approve, None).await
    }

    async fn reject(
        &self,
        id: CorrectionRequestId,
        actor: &Actor,
        note: Option<&str>,
    ) -> Result<CorrectionRequest, CorrectionError> {
        self.review(id, actor, Decision::Reject, note).await
    }

    async fn editable_fields(&self, user_id: UserId) -> Result<BTreeSet<ProfileField>, CorrectionError> {
        Ok(self
            .requests_for(user_id)
            .await?
            .into_iter()
            .filter(CorrectionRequest::is_active_grant)
            .max_by_key(|r| r.reviewed_at)
            .map(|r| r.fields())
            .unwrap_or_default())
    }

    async fn complete(&self, id: CorrectionRequestId) -> Result<CorrectionRequest, CorrectionError> {
        let mut request = self.load(id).await?;
        if !request.is_active_grant() {
            return Err(CorrectionError::InvalidTransition {
                id,
                state: request.state_label(),
                action: "complete",
            });
        }

        request.completed = true;
        request.completed_at = Some(self.time_source.now());

        let entry = NewAuditEntry::new(
            &request.requester(),
            AuditAction::Complete,
            AuditModule::Corrections,
            format!("Saved profile corrections to {}", request.field_labels()),
        )
        .change(json!({ "completed": false }), json!({ "completed": true }));

        self.commit(
            &request,
            entry,
            ConsoleEvent::CorrectionCompleted {
                request_id: id,
                user_id: request.user_id,
            },
        )
        .await?;

        info!(request_id = %id, user_id = %request.user_id, "Correction request completed");
        Ok(request)
    }

    async fn check_profile_edit(
        &self,
        user_id: UserId,
        changed: &[ProfileField],
    ) -> Result<(), CorrectionError> {
        let editable = self.editable_fields(user_id).await?;
        match changed.iter().find(|field| !editable.contains(field)) {
            Some(field) => Err(CorrectionError::FieldLocked(*field)),
            None => Ok(()),
        }
    }

    async fn get(&self, id: CorrectionRequestId) -> Result<CorrectionRequest, CorrectionError> {
        self.load(id).await
    }

    async fn pending_queue(&self) -> Result<Vec<CorrectionRequest>, CorrectionError> {
        let mut pending = Vec::new();
        for request in self.repository.find_by_status(CorrectionStatus::Pending).await? {
            if request.completed {
                continue;
            }
            // Nothing to unlock; an approval would fail.
            if request.is_legacy() {
                self.retire_legacy(request).await?;
                continue;
            }
            pending.push(request);
        }
        pending.sort_by_key(|r| r.created_at);
        Ok(pending)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CorrectionRequest>, CorrectionError> {
        let mut requests = self.repository.find_by_user(user_id).await?;
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }
}
