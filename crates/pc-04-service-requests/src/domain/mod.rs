//! Service request domain.

pub mod entities;
pub mod errors;

pub use entities::{
    DivergenceKind, FundingKind, FundingTransaction, PaymentDivergence, PaymentStatus,
    RequestStatus, ServiceRequest,
};
pub use errors::ServiceRequestError;
