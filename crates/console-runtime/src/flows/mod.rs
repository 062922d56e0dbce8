//! Operations that span more than one subsystem.

pub mod payment;

pub use payment::{PaymentFlow, PaymentFlowError, ServicePayment};
