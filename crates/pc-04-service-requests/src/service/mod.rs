//! # Service Request Reconciler
//!
//! Implements `ServiceRequestApi`. Payment status is a stored field, changed
//! only by `mark_paid` and `mark_unpaid`; voiding the funding transaction does
//! not revert it. `find_divergences` reports requests where the two disagree.


use async_trait::async_trait;
use pc_01_audit_log::{AuditLogApi, NewAuditEntry};
use pc_02_notifications::NotificationApi;
use rust_decimal::Decimal;
use serde_json::json;
use shared_bus::ConsoleEvent;
use shared_types::{
    Actor, AuditAction, AuditModule, ServiceRequestId, SystemTimeSource, TimeSource,
    TransactionId, UserId,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    DivergenceKind, PaymentDivergence, PaymentStatus, RequestStatus, ServiceRequest,
    ServiceRequestError,
};
use crate::ports::inbound::ServiceRequestApi;
use crate::ports::outbound::{ServiceRequestRepository, TransactionLookup};

/// Dependencies for `ServiceRequestReconciler`.
pub struct ReconcilerDependencies {
    pub repository: Arc<dyn ServiceRequestRepository>,
    pub transactions: Arc<dyn TransactionLookup>,
    pub audit: Arc<dyn AuditLogApi>,
    pub notifier: Arc<dyn NotificationApi>,
    pub time_source: Arc<dyn TimeSource>,
}

impl ReconcilerDependencies {
    pub fn new(
        repository: Arc<dyn ServiceRequestRepository>,
        transactions: Arc<dyn TransactionLookup>,
        audit: Arc<dyn AuditLogApi>,
        notifier: Arc<dyn NotificationApi>,
    ) -> Self {
        Self {
            repository,
            transactions,
            audit,
            notifier,
            time_source: Arc::new(SystemTimeSource),
        }
    }
}

pub struct ServiceRequestReconciler {
    repository: Arc<dyn ServiceRequestRepository>,
    transactions: Arc<dyn TransactionLookup>,
    audit: Arc<dyn AuditLogApi>,
    notifier: Arc<dyn NotificationApi>,
    time_source: Arc<dyn TimeSource>,
}

impl ServiceRequestReconciler {
    pub fn new(deps: ReconcilerDependencies) -> Self {
        Self {
            repository: deps.repository,
            transactions: deps.transactions,
            audit: deps.audit,
            notifier: deps.notifier,
            time_source: deps.time_source,
        }
    }

    async fn load(&self, id: ServiceRequestId) -> Result<ServiceRequest, ServiceRequestError> {
        self.repository
            .get(id)
            .await?
            .ok_or(ServiceRequestError::NotFound(id))
    }

    /// Persist the change, audit it, and tell open views.
    async fn commit_payment_change(
        &self,
        before: &ServiceRequest,
        after: &ServiceRequest,
        actor: &Actor,
        details: String,
        reason: Option<&str>,
    ) -> Result<(), ServiceRequestError> {
        self.repository.update(after).await?;

        let mut new_value = json!({
            "payment_status": after.payment_status,
            "donation_id": after.donation_id,
        });
        if let Some(reason) = reason {
            new_value["reason"] = json!(reason);
        }

        self.audit
            .append(
                NewAuditEntry::new(actor, AuditAction::Update, AuditModule::ServiceRequests, details)
                    .record(after.id)
                    .change(
                        json!({
                            "payment_status": before.payment_status,
                            "donation_id": before.donation_id,
                        }),
                        new_value,
                    ),
            )
            .await;

        self.notifier
            .broadcast(ConsoleEvent::PaymentUpdated {
                service_request_id: after.id,
                paid: after.is_paid(),
            })
            .await;
        Ok(())
    }
}

#[async_trait]
impl ServiceRequestApi for ServiceRequestReconciler {
    async fn open_request(
        &self,
        user_id: UserId,
        service_type: &str,
        service_fee: Decimal,
    ) -> Result<ServiceRequest, ServiceRequestError> {
        let service_type = service_type.trim();
        if service_type.is_empty() {
            return Err(ServiceRequestError::Validation(
                "service type is required".to_string(),
            ));
        }
        if service_fee < Decimal::ZERO {
            return Err(ServiceRequestError::Validation(format!(
                "service fee cannot be negative, got {service_fee}"
            )));
        }

        let now = self.time_source.now();
        let request = ServiceRequest {
            id: self.repository.next_id().await?,
            user_id,
            service_type: service_type.to_string(),
            service_fee,
            payment_status: PaymentStatus::Unpaid,
            donation_id: None,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.repository.insert(&request).await?;

        info!(
            service_request_id = %request.id,
            service_type = %request.service_type,
            fee = %request.service_fee,
            "Service request opened"
        );
        Ok(request)
    }

    async fn mark_paid(
        &self,
        id: ServiceRequestId,
        transaction_id: TransactionId,
        actor: &Actor,
    ) -> Result<ServiceRequest, ServiceRequestError> {
        let before = self.load(id).await?;
        if before.is_paid() {
            return Err(ServiceRequestError::AlreadyPaid(id));
        }

        let funding = self
            .transactions
            .funding(transaction_id)
            .await?
            .ok_or(ServiceRequestError::TransactionNotFound(transaction_id))?;
        if funding.voided {
            return Err(ServiceRequestError::Validation(format!(
                "transaction {transaction_id} is voided"
            )));
        }
        if !funding.is_linked_to(&before) {
            return Err(ServiceRequestError::Validation(format!(
                "transaction {transaction_id} is not linked to service request {id}"
            )));
        }
        if let Some(settled) = self.repository.find_paid_by_donation(transaction_id).await? {
            return Err(ServiceRequestError::Validation(format!(
                "transaction {transaction_id} already settles service request {}",
                settled.id
            )));
        }

        let mut after = before.clone();
        after.payment_status = PaymentStatus::Paid;
        after.donation_id = Some(transaction_id);
        after.updated_at = self.time_source.now();

        self.commit_payment_change(
            &before,
            &after,
            actor,
            format!("Marked service request {id} paid by transaction {transaction_id}"),
            None,
        )
        .await?;

        info!(
            service_request_id = %id,
            transaction_id = %transaction_id,
            actor = %actor.user_name,
            "Service request marked paid"
        );
        Ok(after)
    }

    async fn mark_unpaid(
        &self,
        id: ServiceRequestId,
        actor: &Actor,
        reason: &str,
    ) -> Result<ServiceRequest, ServiceRequestError> {
        if !actor.role.can_manage_finances() {
            return Err(ServiceRequestError::PermissionDenied {
                role: actor.role,
                action: "revert payment status",
            });
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ServiceRequestError::Validation(
                "a reason is required to revert payment status".to_string(),
            ));
        }

        let before = self.load(id).await?;
        if !before.is_paid() {
            return Err(ServiceRequestError::NotPaid(id));
        }
        if let Some(donation_id) = before.donation_id {
            if self.transactions.funding(donation_id).await?.is_none() {
                return Err(ServiceRequestError::TransactionNotFound(donation_id));
            }
        }

        let mut after = before.clone();
        after.payment_status = PaymentStatus::Unpaid;
        after.donation_id = None;
        after.updated_at = self.time_source.now();

        self.commit_payment_change(
            &before,
            &after,
            actor,
            format!("Reverted service request {id} to unpaid: {reason}"),
            Some(reason),
        )
        .await?;

        info!(
            service_request_id = %id,
            actor = %actor.user_name,
            reason,
            "Service request reverted to unpaid"
        );
        Ok(after)
    }

    async fn payment_status(&self, id: ServiceRequestId) -> Result<PaymentStatus, ServiceRequestError> {
        Ok(self.load(id).await?.payment_status)
    }

    async fn get(&self, id: ServiceRequestId) -> Result<ServiceRequest, ServiceRequestError> {
        self.load(id).await
    }

    async fn find_divergences(&self) -> Result<Vec<PaymentDivergence>, ServiceRequestError> {
        let mut divergences = Vec::new();

        for request in self.repository.find_paid().await? {
            let kind = match request.donation_id {
                None => Some(DivergenceKind::NoFundingLink),
                Some(donation_id) => match self.transactions.funding(donation_id).await? {
                    None => Some(DivergenceKind::FundingMissing),
                    Some(funding) if funding.voided => Some(DivergenceKind::FundingVoided),
                    Some(_) => None,
                },
            };

            if let Some(kind) = kind {
                divergences.push(PaymentDivergence {
                    service_request_id: request.id,
                    donation_id: request.donation_id,
                    kind,
                });
            }
        }

        if !divergences.is_empty() {
            warn!(count = divergences.len(), "Paid service requests diverge from ledger");
        }
        Ok(divergences)
    }
}
