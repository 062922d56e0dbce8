//! # Audit Vocabulary
//!
//! Action and module names recorded on every audit log entry. Kept here so
//! every subsystem writes the same strings the admin audit screen filters on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to the audited record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Void,
    Approve,
    Reject,
    Payment,
    Submit,
    Complete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::Void => "VOID",
            AuditAction::Approve => "APPROVE",
            AuditAction::Reject => "REJECT",
            AuditAction::Payment => "PAYMENT",
            AuditAction::Submit => "SUBMIT",
            AuditAction::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Console module the audited record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditModule {
    Donations,
    Payments,
    ServiceRequests,
    Corrections,
}

impl AuditModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditModule::Donations => "donations",
            AuditModule::Payments => "payments",
            AuditModule::ServiceRequests => "service_requests",
            AuditModule::Corrections => "corrections",
        }
    }
}

impl fmt::Display for AuditModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
