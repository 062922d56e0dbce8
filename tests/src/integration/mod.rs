//! # Integration Tests
//!
//! Every test builds a full `ParishConsole` and drives it through its public
//! APIs only.

pub mod audit_outage;
pub mod corrections;
pub mod ledger;
pub mod payments;
pub mod refresh;

use console_runtime::{ConsoleConfig, ParishConsole};
use pc_03_transactions::{RecordDonationRequest, RecordPaymentRequest};
use rust_decimal::Decimal;
use shared_types::{Actor, Role, ServiceRequestId, UserId};

/// Console with default configuration.
pub fn console() -> ParishConsole {
    ParishConsole::new(ConsoleConfig::default()).expect("default config is valid")
}

pub fn secretary() -> Actor {
    Actor::new(UserId::new(), "Maria Santos", Role::Secretary)
}

pub fn admin() -> Actor {
    Actor::new(UserId::new(), "Fr. Jose Reyes", Role::Admin)
}

pub fn priest() -> Actor {
    Actor::new(UserId::new(), "Fr. Miguel Cruz", Role::Priest)
}

pub fn donation(category: &str, amount: Decimal) -> RecordDonationRequest {
    RecordDonationRequest {
        donor: Some("Juan dela Cruz".into()),
        amount,
        category: category.into(),
        payment_method: "cash".into(),
        ..Default::default()
    }
}

pub fn service_fee(request: ServiceRequestId, amount: Decimal) -> RecordPaymentRequest {
    RecordPaymentRequest {
        donor: Some("Ana Reyes".into()),
        amount,
        category: "Other".into(),
        payment_method: "gcash".into(),
        payment_type: "service_fee".into(),
        service_request_id: Some(request),
        reference_number: Some("GC-7781".into()),
        visible_to_user: true,
        ..Default::default()
    }
}
