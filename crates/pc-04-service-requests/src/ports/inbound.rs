//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared_types::{Actor, ServiceRequestId, TransactionId, UserId};

use crate::domain::{PaymentDivergence, PaymentStatus, ServiceRequest, ServiceRequestError};

/// Service request reconciliation API.
#[async_trait]
pub trait ServiceRequestApi: Send + Sync {
    /// Open a new request, unpaid and pending.
    async fn open_request(
        &self,
        user_id: UserId,
        service_type: &str,
        service_fee: Decimal,
    ) -> Result<ServiceRequest, ServiceRequestError>;

    /// Mark a request paid by a linked, non-voided transaction.
    async fn mark_paid(
        &self,
        id: ServiceRequestId,
        transaction_id: TransactionId,
        actor: &Actor,
    ) -> Result<ServiceRequest, ServiceRequestError>;

    /// Revert a paid request to unpaid. The funding transaction is not touched.
    async fn mark_unpaid(
        &self,
        id: ServiceRequestId,
        actor: &Actor,
        reason: &str,
    ) -> Result<ServiceRequest, ServiceRequestError>;

    /// The stored payment status. Does not consult the ledger.
    async fn payment_status(&self, id: ServiceRequestId) -> Result<PaymentStatus, ServiceRequestError>;

    async fn get(&self, id: ServiceRequestId) -> Result<ServiceRequest, ServiceRequestError>;

    /// Paid requests whose funding transaction is voided or gone.
    async fn find_divergences(&self) -> Result<Vec<PaymentDivergence>, ServiceRequestError>;
}
