//! Service request entities.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::{ServiceRequestId, TransactionId, UserId};
use std::fmt;

/// Whether the fee for a request has been settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        })
    }
}

/// Request lifecycle. Independent of payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Scheduled,
    Completed,
    Cancelled,
}

/// A member's request for a sacrament or parish service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: ServiceRequestId,
    pub user_id: UserId,
    /// Free text, e.g. "Baptism".
    pub service_type: String,
    pub service_fee: Decimal,
    pub payment_status: PaymentStatus,
    /// Transaction that settled the fee, while paid.
    pub donation_id: Option<TransactionId>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceRequest {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

/// What a ledger transaction was recorded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundingKind {
    /// A plain donation. Never settles a fee.
    Donation,
    /// A service or event fee payment.
    FeePayment,
    /// Any other payment, e.g. a donation made through the payment form.
    OtherPayment,
}

/// The slice of a ledger transaction the reconciler needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingTransaction {
    pub id: TransactionId,
    pub kind: FundingKind,
    pub amount: Decimal,
    pub service_request_id: Option<ServiceRequestId>,
    pub voided: bool,
}

impl FundingTransaction {
    /// Whether this transaction may settle `request`.
    ///
    /// Linked explicitly by id, or (older event-fee flows) an unlinked fee
    /// payment with an amount equal to the fee.
    pub fn is_linked_to(&self, request: &ServiceRequest) -> bool {
        match self.service_request_id {
            Some(id) => id == request.id,
            None => self.kind == FundingKind::FeePayment && self.amount == request.service_fee,
        }
    }
}

/// Why a paid request no longer matches the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceKind {
    /// The funding transaction was voided after the request was marked paid.
    FundingVoided,
    /// The funding transaction no longer exists.
    FundingMissing,
    /// Marked paid without a funding transaction on record.
    NoFundingLink,
}

/// A paid request whose funding is not a live transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDivergence {
    pub service_request_id: ServiceRequestId,
    pub donation_id: Option<TransactionId>,
    pub kind: DivergenceKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(fee: Decimal) -> ServiceRequest {
        let now = Utc::now();
        ServiceRequest {
            id: ServiceRequestId(42),
            user_id: UserId::new(),
            service_type: "Baptism".into(),
            service_fee: fee,
            payment_status: PaymentStatus::Unpaid,
            donation_id: None,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    fn funding(link: Option<u64>, amount: Decimal) -> FundingTransaction {
        FundingTransaction {
            id: TransactionId::new(),
            kind: FundingKind::FeePayment,
            amount,
            service_request_id: link.map(ServiceRequestId),
            voided: false,
        }
    }

    #[test]
    fn test_explicit_link() {
        let req = request(dec!(500));
        assert!(funding(Some(42), dec!(1)).is_linked_to(&req));
        assert!(!funding(Some(43), dec!(500)).is_linked_to(&req));
    }

    #[test]
    fn test_legacy_link_by_amount() {
        let req = request(dec!(500));
        assert!(funding(None, dec!(500.00)).is_linked_to(&req));
        assert!(!funding(None, dec!(450)).is_linked_to(&req));
    }

    #[test]
    fn test_legacy_link_needs_fee_payment() {
        let req = request(dec!(500));
        let tithe = FundingTransaction {
            kind: FundingKind::Donation,
            ..funding(None, dec!(500))
        };
        assert!(!tithe.is_linked_to(&req));

        let gift = FundingTransaction {
            kind: FundingKind::OtherPayment,
            ..funding(None, dec!(500))
        };
        assert!(!gift.is_linked_to(&req));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentStatus::Paid).unwrap(), "\"paid\"");
        assert_eq!(
            serde_json::to_string(&RequestStatus::Scheduled).unwrap(),
            "\"scheduled\""
        );
    }
}
