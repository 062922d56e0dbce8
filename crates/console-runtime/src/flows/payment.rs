//! # Service Payment Flow
//!
//! Recording a service fee touches two aggregates: the ledger gets a payment,
//! then the service request is marked paid. There is no transaction spanning
//! both, so the flow is a saga:
//!
//! ```text
//! record_payment ──ok──→ mark_paid ──ok──→ done
//!       │                    │
//!      err                  err
//!       ↓                    ↓
//!   return error      void(payment) ──→ return RolledBack
//!                            │
//!                           err ──→ return CompensationFailed
//! ```

use parish_telemetry::log_tx_event;
use pc_03_transactions::{RecordPaymentRequest, Transaction, TransactionError, TransactionStoreApi};
use pc_04_service_requests::{ServiceRequest, ServiceRequestApi, ServiceRequestError};
use shared_types::{Actor, ServiceRequestId, TransactionId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Result of a completed flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePayment {
    pub transaction: Transaction,
    pub request: ServiceRequest,
}

#[derive(Debug, Error)]
pub enum PaymentFlowError {
    #[error("payment is not linked to a service request")]
    Unlinked,

    /// Nothing was written.
    #[error(transparent)]
    Ledger(#[from] TransactionError),

    /// The payment was recorded, then voided because the request could not be marked paid.
    #[error("payment {transaction_id} was voided: service request {service_request_id} not marked paid: {source}")]
    RolledBack {
        transaction_id: TransactionId,
        service_request_id: ServiceRequestId,
        source: ServiceRequestError,
    },

    /// The payment is recorded and live, but the request is not paid.
    #[error("payment {transaction_id} recorded but neither linked nor voided: {source}; void failed: {void_error}")]
    CompensationFailed {
        transaction_id: TransactionId,
        service_request_id: ServiceRequestId,
        source: ServiceRequestError,
        void_error: TransactionError,
    },
}

/// Record-then-mark-paid with a compensating void.
pub struct PaymentFlow {
    transactions: Arc<dyn TransactionStoreApi>,
    requests: Arc<dyn ServiceRequestApi>,
}

impl PaymentFlow {
    pub fn new(transactions: Arc<dyn TransactionStoreApi>, requests: Arc<dyn ServiceRequestApi>) -> Self {
        Self {
            transactions,
            requests,
        }
    }

    pub async fn record_service_payment(
        &self,
        actor: &Actor,
        payment: RecordPaymentRequest,
    ) -> Result<ServicePayment, PaymentFlowError> {
        let service_request_id = payment.service_request_id.ok_or(PaymentFlowError::Unlinked)?;

        let transaction = self.transactions.record_payment(actor, payment).await?;

        match self
            .requests
            .mark_paid(service_request_id, transaction.id, actor)
            .await
        {
            Ok(request) => {
                log_tx_event!(
                    info,
                    "Service payment recorded",
                    transaction.id,
                    service_request_id = %service_request_id,
                    actor = %actor.user_name
                );
                Ok(ServicePayment {
                    transaction,
                    request,
                })
            }
            Err(source) => self.compensate(actor, transaction.id, service_request_id, source).await,
        }
    }

    /// Void the orphan payment as the system actor; the caller may not hold
    /// void rights.
    async fn compensate(
        &self,
        actor: &Actor,
        transaction_id: TransactionId,
        service_request_id: ServiceRequestId,
        source: ServiceRequestError,
    ) -> Result<ServicePayment, PaymentFlowError> {
        warn!(
            transaction_id = %transaction_id,
            service_request_id = %service_request_id,
            error = %source,
            "Marking request paid failed, voiding payment"
        );

        let reason = format!(
            "Compensation: service request {service_request_id} could not be marked paid \
             (payment recorded by {})",
            actor.user_name
        );
        match self.transactions.void(transaction_id, &reason, &Actor::system()).await {
            Ok(_) => {
                parish_telemetry::PAYMENT_COMPENSATIONS.inc();
                Err(PaymentFlowError::RolledBack {
                    transaction_id,
                    service_request_id,
                    source,
                })
            }
            Err(void_error) => {
                error!(
                    transaction_id = %transaction_id,
                    service_request_id = %service_request_id,
                    error = %void_error,
                    "Compensating void failed; payment and request disagree"
                );
                Err(PaymentFlowError::CompensationFailed {
                    transaction_id,
                    service_request_id,
                    source,
                    void_error,
                })
            }
        }
    }
}
