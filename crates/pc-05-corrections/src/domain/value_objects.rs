//! The fixed member profile schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A member profile field that is locked unless a correction grants it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FirstName,
    MiddleName,
    LastName,
    BirthDate,
    Gender,
    CivilStatus,
    Address,
    ContactNumber,
    Email,
    BaptismDate,
    BaptismParish,
    ConfirmationDate,
    MarriageDate,
}

impl ProfileField {
    pub const ALL: [ProfileField; 13] = [
        ProfileField::FirstName,
        ProfileField::MiddleName,
        ProfileField::LastName,
        ProfileField::BirthDate,
        ProfileField::Gender,
        ProfileField::CivilStatus,
        ProfileField::Address,
        ProfileField::ContactNumber,
        ProfileField::Email,
        ProfileField::BaptismDate,
        ProfileField::BaptismParish,
        ProfileField::ConfirmationDate,
        ProfileField::MarriageDate,
    ];

    /// Stored key, as used in the profile record.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::FirstName => "first_name",
            ProfileField::MiddleName => "middle_name",
            ProfileField::LastName => "last_name",
            ProfileField::BirthDate => "birth_date",
            ProfileField::Gender => "gender",
            ProfileField::CivilStatus => "civil_status",
            ProfileField::Address => "address",
            ProfileField::ContactNumber => "contact_number",
            ProfileField::Email => "email",
            ProfileField::BaptismDate => "baptism_date",
            ProfileField::BaptismParish => "baptism_parish",
            ProfileField::ConfirmationDate => "confirmation_date",
            ProfileField::MarriageDate => "marriage_date",
        }
    }

    /// Label shown to members.
    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::FirstName => "First Name",
            ProfileField::MiddleName => "Middle Name",
            ProfileField::LastName => "Last Name",
            ProfileField::BirthDate => "Birth Date",
            ProfileField::Gender => "Gender",
            ProfileField::CivilStatus => "Civil Status",
            ProfileField::Address => "Address",
            ProfileField::ContactNumber => "Contact Number",
            ProfileField::Email => "Email",
            ProfileField::BaptismDate => "Baptism Date",
            ProfileField::BaptismParish => "Baptism Parish",
            ProfileField::ConfirmationDate => "Confirmation Date",
            ProfileField::MarriageDate => "Marriage Date",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = String;

    /// Accepts the stored key or the member-facing label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        ProfileField::ALL
            .into_iter()
            .find(|field| field.as_str() == key)
            .ok_or_else(|| format!("unknown profile field: {}", s.trim()))
    }
}

/// Correction request review state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionStatus {
    Pending,
    Approved,
    Rejected,
}

impl CorrectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionStatus::Pending => "pending",
            CorrectionStatus::Approved => "approved",
            CorrectionStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CorrectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
