//! Correction workflow error types.

use shared_types::{CorrectionRequestId, Role, StoreError};
use thiserror::Error;

use super::value_objects::ProfileField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrectionError {
    /// Input rejected before any write.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Correction request not found: {0}")]
    NotFound(CorrectionRequestId),

    /// The user already has a pending or unused approved request.
    #[error("Correction request {0} is still outstanding")]
    OutstandingRequest(CorrectionRequestId),

    #[error("Cannot {action} correction request {id}: it is {state}")]
    InvalidTransition {
        id: CorrectionRequestId,
        state: &'static str,
        action: &'static str,
    },

    #[error("Role {role} may not {action}")]
    PermissionDenied { role: Role, action: &'static str },

    #[error("Profile field {0} is locked")]
    FieldLocked(ProfileField),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_locked_names_field() {
        let err = CorrectionError::FieldLocked(ProfileField::BirthDate);
        assert_eq!(err.to_string(), "Profile field birth_date is locked");
    }
}
