//! Audit log entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Actor, AuditAction, AuditEntryId, AuditModule, Role, UserId};

/// One immutable line of the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: AuditEntryId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_role: Role,
    pub action: AuditAction,
    pub module: AuditModule,
    /// Human-readable summary shown on the audit screen.
    pub details: String,
    /// Id of the audited record, rendered as text (uuid or `#42`).
    pub record_id: Option<String>,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub timestamp: DateTime<Utc>,
    /// False while the entry lives only in the local fallback queue.
    pub synced: bool,
}

/// Caller-supplied part of an audit entry. The logger stamps id and time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub actor: Actor,
    pub action: AuditAction,
    pub module: AuditModule,
    pub details: String,
    pub record_id: Option<String>,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

impl NewAuditEntry {
    pub fn new(
        actor: &Actor,
        action: AuditAction,
        module: AuditModule,
        details: impl Into<String>,
    ) -> Self {
        Self {
            actor: actor.clone(),
            action,
            module,
            details: details.into(),
            record_id: None,
            old_value: None,
            new_value: None,
        }
    }

    /// Attach the audited record id.
    #[must_use]
    pub fn record(mut self, record_id: impl ToString) -> Self {
        self.record_id = Some(record_id.to_string());
        self
    }

    /// Attach the before/after snapshot of the change.
    #[must_use]
    pub fn change(mut self, old_value: Value, new_value: Value) -> Self {
        self.old_value = Some(old_value);
        self.new_value = Some(new_value);
        self
    }

    /// Attach only the resulting state (creations).
    #[must_use]
    pub fn created(mut self, new_value: Value) -> Self {
        self.new_value = Some(new_value);
        self
    }

    pub(crate) fn stamp(self, id: AuditEntryId, timestamp: DateTime<Utc>) -> AuditLogEntry {
        AuditLogEntry {
            id,
            user_id: self.actor.user_id,
            user_name: self.actor.user_name,
            user_role: self.actor.role,
            action: self.action,
            module: self.module,
            details: self.details,
            record_id: self.record_id,
            old_value: self.old_value,
            new_value: self.new_value,
            timestamp,
            synced: true,
        }
    }
}

/// Outcome of draining the fallback queue into the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryReport {
    /// Entries written to the sink during this pass.
    pub synced: usize,
    /// Entries still waiting.
    pub remaining: usize,
}
