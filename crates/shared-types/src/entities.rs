//! # Core Entities
//!
//! Identifiers and the acting identity supplied by the identity collaborator.
//!
//! ## Clusters
//!
//! - **Identifiers**: `UserId`, `TransactionId`, `ServiceRequestId`,
//!   `CorrectionRequestId`, `NotificationId`, `AuditEntryId`
//! - **Identity**: `Actor`, `Role`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// IDENTIFIERS
// =============================================================================

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random id.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a console user (member, staff or clergy).
    UserId
);
uuid_id!(
    /// Identifier of a donation or payment record.
    TransactionId
);
uuid_id!(
    /// Identifier of a profile correction request.
    CorrectionRequestId
);
uuid_id!(
    /// Identifier of a user-visible notification.
    NotificationId
);
uuid_id!(
    /// Identifier of an audit log entry.
    AuditEntryId
);

/// Identifier of a service request.
///
/// Service requests are numbered sequentially (`#42`) by the persistence
/// collaborator, unlike the other entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceRequestId(pub u64);

impl fmt::Display for ServiceRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ServiceRequestId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Console role of the acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Parish secretary: records payments and manages requests.
    Secretary,
    /// Clergy: reviews requests, read access to finances.
    Priest,
    /// Parish member using the self-service pages.
    Member,
}

impl Role {
    /// Whether this role may void transactions and revert payment status.
    #[must_use]
    pub fn can_manage_finances(&self) -> bool {
        matches!(self, Role::Admin | Role::Secretary)
    }

    /// Whether this role may approve or reject correction requests.
    #[must_use]
    pub fn can_review_corrections(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Secretary => "secretary",
            Role::Priest => "priest",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "secretary" => Ok(Role::Secretary),
            "priest" => Ok(Role::Priest),
            "member" | "user" => Ok(Role::Member),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The acting user, as supplied by the identity collaborator.
///
/// The core trusts this value and does not authenticate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub user_name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: UserId, user_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            role,
        }
    }

    /// Internal actor used for automatic actions (legacy guards, saga compensation).
    #[must_use]
    pub fn system() -> Self {
        Self {
            user_id: UserId(Uuid::nil()),
            user_name: "system".to_string(),
            role: Role::Admin,
        }
    }
}
