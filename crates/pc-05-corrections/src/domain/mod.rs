//! Correction domain: requests, the profile schema, errors.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{CorrectionRequest, SubmitCorrection};
pub use errors::CorrectionError;
pub use value_objects::{CorrectionStatus, ProfileField};
