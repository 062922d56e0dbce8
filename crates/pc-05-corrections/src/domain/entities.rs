//! Correction request entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{Actor, CorrectionRequestId, Role, UserId};
use std::collections::BTreeSet;

use super::value_objects::{CorrectionStatus, ProfileField};

/// A member's request to unlock profile fields for self-editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRequest {
    pub id: CorrectionRequestId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub member_id: Option<String>,
    /// The member's free-text reason.
    pub request: String,
    /// `None` only for requests stored before field selection existed.
    #[serde(default)]
    pub fields_to_edit: Option<BTreeSet<ProfileField>>,
    pub status: CorrectionStatus,
    #[serde(default)]
    pub completed: bool,
    pub reviewed_by: Option<UserId>,
    pub reviewed_by_name: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Optional note from the reviewer, shown on rejection.
    pub review_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl CorrectionRequest {
    /// Pending, or approved and not yet used.
    pub fn is_outstanding(&self) -> bool {
        !self.completed
            && matches!(
                self.status,
                CorrectionStatus::Pending | CorrectionStatus::Approved
            )
    }

    /// Approved and not yet used: the member may edit the granted fields.
    pub fn is_active_grant(&self) -> bool {
        self.status == CorrectionStatus::Approved && !self.completed
    }

    /// Stored without a field list.
    pub fn is_legacy(&self) -> bool {
        self.fields_to_edit.is_none()
    }

    /// Granted fields, empty for legacy rows.
    pub fn fields(&self) -> BTreeSet<ProfileField> {
        self.fields_to_edit.clone().unwrap_or_default()
    }

    /// Label used in transition errors.
    pub fn state_label(&self) -> &'static str {
        if self.completed {
            "completed"
        } else {
            self.status.as_str()
        }
    }

    /// The member as an actor, for entries they cause.
    pub fn requester(&self) -> Actor {
        Actor::new(self.user_id, self.user_name.clone(), Role::Member)
    }

    /// Comma-separated member-facing labels of the granted fields.
    pub fn field_labels(&self) -> String {
        self.fields()
            .iter()
            .map(ProfileField::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Input to `submit`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitCorrection {
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub member_id: Option<String>,
    pub fields_to_edit: BTreeSet<ProfileField>,
    pub reason: String,
}
