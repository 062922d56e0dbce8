//! # Transaction Store Service
//!
//! The service implementing `TransactionStoreApi`.
//!
//! Every mutating operation follows the same order:
//! 1. Validate input and read current state (no writes yet)
//! 2. Write the single record change
//! 3. Append one audit entry
//! 4. Broadcast one `ConsoleEvent`

mod helpers;

use async_trait::async_trait;
use pc_01_audit_log::{AuditLogApi, NewAuditEntry};
use pc_02_notifications::NotificationApi;
use serde_json::json;
use shared_bus::ConsoleEvent;
use shared_types::{
    Actor, AuditAction, AuditModule, StoreError, SystemTimeSource, TimeSource, TransactionId,
    UserId,
};
use std::sync::Arc;
use tracing::info;

use crate::domain::{
    Aggregate, KindFilter, PaymentDetails, PaymentType, ReceiptView, RecordDonationRequest,
    RecordPaymentRequest, Transaction, TransactionError, TransactionFilter, TransactionKind,
    TransactionStoreConfig, VoidRecord,
};
use crate::ports::inbound::TransactionStoreApi;
use crate::ports::outbound::TransactionRepository;
use helpers::{
    audit_snapshot, clean_notes, donor_or_anonymous, parse_vocab, validate_amount, ValidCommon,
};

/// Dependencies for `TransactionStore`.
pub struct TransactionStoreDependencies {
    pub repository: Arc<dyn TransactionRepository>,
    pub audit: Arc<dyn AuditLogApi>,
    pub notifier: Arc<dyn NotificationApi>,
    pub time_source: Arc<dyn TimeSource>,
}

impl TransactionStoreDependencies {
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        audit: Arc<dyn AuditLogApi>,
        notifier: Arc<dyn NotificationApi>,
    ) -> Self {
        Self {
            repository,
            audit,
            notifier,
            time_source: Arc::new(SystemTimeSource),
        }
    }
}

/// The donation and payment ledger.
pub struct TransactionStore {
    pub(crate) repository: Arc<dyn TransactionRepository>,
    pub(crate) audit: Arc<dyn AuditLogApi>,
    pub(crate) notifier: Arc<dyn NotificationApi>,
    pub(crate) time_source: Arc<dyn TimeSource>,
    pub(crate) config: TransactionStoreConfig,
}

impl TransactionStore {
    pub fn new(deps: TransactionStoreDependencies, config: TransactionStoreConfig) -> Self {
        Self {
            repository: deps.repository,
            audit: deps.audit,
            notifier: deps.notifier,
            time_source: deps.time_source,
            config,
        }
    }

    pub fn config(&self) -> &TransactionStoreConfig {
        &self.config
    }

    async fn validate_common(
        &self,
        donor: Option<&str>,
        amount: rust_decimal::Decimal,
        category: &str,
        payment_method: &str,
        notes: Option<&str>,
        receipt_number: Option<&str>,
    ) -> Result<ValidCommon, TransactionError> {
        validate_amount(amount)?;
        let category = parse_vocab(category, "category")?;
        let payment_method = parse_vocab(payment_method, "payment method")?;
        let created_at = self.time_source.now();
        let receipt_number = self.allocate_receipt(receipt_number, created_at).await?;

        Ok(ValidCommon {
            donor: donor_or_anonymous(donor),
            amount,
            category,
            payment_method,
            notes: clean_notes(notes),
            receipt_number,
            created_at,
        })
    }

    async fn insert_recorded(
        &self,
        actor: &Actor,
        common: ValidCommon,
        kind: TransactionKind,
    ) -> Result<Transaction, TransactionError> {
        let tx = Transaction {
            id: TransactionId::new(),
            donor: common.donor,
            amount: common.amount,
            category: common.category,
            payment_method: common.payment_method,
            receipt_number: common.receipt_number,
            recorded_by: actor.user_id,
            recorded_by_name: actor.user_name.clone(),
            notes: common.notes,
            created_at: common.created_at,
            kind,
            void: None,
        };
        match self.repository.insert(&tx).await {
            Ok(()) => Ok(tx),
            // Another writer took the receipt number after it was checked.
            Err(StoreError::Duplicate(_)) => Err(TransactionError::validation(format!(
                "receipt number {} already exists",
                tx.receipt_number
            ))),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl TransactionStoreApi for TransactionStore {
    async fn record_donation(
        &self,
        actor: &Actor,
        request: RecordDonationRequest,
    ) -> Result<Transaction, TransactionError> {
        let common = self
            .validate_common(
                request.donor.as_deref(),
                request.amount,
                &request.category,
                &request.payment_method,
                request.notes.as_deref(),
                request.receipt_number.as_deref(),
            )
            .await?;

        let tx = self
            .insert_recorded(actor, common, TransactionKind::Donation)
            .await?;

        info!(
            transaction_id = %tx.id,
            receipt = %tx.receipt_number,
            amount = %tx.amount,
            category = %tx.category,
            actor = %actor.user_name,
            "Donation recorded"
        );

        self.audit
            .append(
                NewAuditEntry::new(
                    actor,
                    AuditAction::Create,
                    AuditModule::Donations,
                    format!(
                        "Recorded {} donation {} of {} from {}",
                        tx.category, tx.receipt_number, tx.amount, tx.donor
                    ),
                )
                .record(tx.id)
                .created(audit_snapshot(&tx)),
            )
            .await;

        self.notifier
            .broadcast(ConsoleEvent::TransactionRecorded {
                transaction_id: tx.id,
                service_request_id: None,
            })
            .await;

        Ok(tx)
    }

    async fn record_payment(
        &self,
        actor: &Actor,
        request: RecordPaymentRequest,
    ) -> Result<Transaction, TransactionError> {
        let payment_type: PaymentType = parse_vocab(&request.payment_type, "payment type")?;
        let common = self
            .validate_common(
                request.donor.as_deref(),
                request.amount,
                &request.category,
                &request.payment_method,
                request.notes.as_deref(),
                request.receipt_number.as_deref(),
            )
            .await?;

        let details = PaymentDetails {
            payment_type,
            service_request_id: request.service_request_id,
            reference_number: clean_notes(request.reference_number.as_deref()),
            visible_to_user: request.visible_to_user,
            payer_user_id: request.payer_user_id,
        };
        let tx = self
            .insert_recorded(actor, common, TransactionKind::Payment(details))
            .await?;

        info!(
            transaction_id = %tx.id,
            receipt = %tx.receipt_number,
            amount = %tx.amount,
            payment_type = %payment_type,
            service_request_id = ?request.service_request_id,
            actor = %actor.user_name,
            "Payment recorded"
        );

        let target = match request.service_request_id {
            Some(id) => format!(" for service request {id}"),
            None => String::new(),
        };
        self.audit
            .append(
                NewAuditEntry::new(
                    actor,
                    AuditAction::Payment,
                    AuditModule::Payments,
                    format!(
                        "Recorded {} payment {} of {}{}",
                        payment_type, tx.receipt_number, tx.amount, target
                    ),
                )
                .record(tx.id)
                .created(audit_snapshot(&tx)),
            )
            .await;

        self.notifier
            .broadcast(ConsoleEvent::TransactionRecorded {
                transaction_id: tx.id,
                service_request_id: tx.service_request_id(),
            })
            .await;

        Ok(tx)
    }

    async fn void(
        &self,
        id: TransactionId,
        reason: &str,
        actor: &Actor,
    ) -> Result<Transaction, TransactionError> {
        let mut tx = self
            .repository
            .get(id)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        if !actor.role.can_manage_finances() {
            return Err(TransactionError::PermissionDenied {
                role: actor.role,
                action: "void transactions",
            });
        }
        if tx.is_voided() {
            return Err(TransactionError::AlreadyVoided(id));
        }

        let reason = reason.trim();
        let min = self.config.min_void_reason_len;
        if reason.chars().count() < min {
            return Err(TransactionError::validation(format!(
                "void reason must be at least {min} characters"
            )));
        }

        tx.void = Some(VoidRecord {
            reason: reason.to_string(),
            voided_by: actor.user_id,
            voided_by_name: actor.user_name.clone(),
            voided_at: self.time_source.now(),
        });
        self.repository.update(&tx).await?;

        info!(
            transaction_id = %tx.id,
            receipt = %tx.receipt_number,
            actor = %actor.user_name,
            reason,
            "Transaction voided"
        );

        let module = if tx.is_payment() {
            AuditModule::Payments
        } else {
            AuditModule::Donations
        };
        self.audit
            .append(
                NewAuditEntry::new(
                    actor,
                    AuditAction::Void,
                    module,
                    format!("Voided {} ({}): {}", tx.receipt_number, tx.amount, reason),
                )
                .record(tx.id)
                .change(
                    json!({ "is_voided": false }),
                    json!({
                        "is_voided": true,
                        "void_reason": reason,
                        "voided_by": actor.user_name,
                    }),
                ),
            )
            .await;

        self.notifier
            .broadcast(ConsoleEvent::TransactionVoided {
                transaction_id: tx.id,
                service_request_id: tx.service_request_id(),
            })
            .await;

        Ok(tx)
    }

    async fn get(&self, id: TransactionId) -> Result<Transaction, TransactionError> {
        self.repository
            .get(id)
            .await?
            .ok_or(TransactionError::NotFound(id))
    }

    async fn list_active(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, TransactionError> {
        let mut rows = self.repository.find(filter).await?;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn aggregate(&self, filter: &TransactionFilter) -> Result<Aggregate, TransactionError> {
        let mut active_only = filter.clone();
        active_only.include_voided = false;
        let rows = self.repository.find(&active_only).await?;
        Ok(Aggregate::from_transactions(&rows))
    }

    async fn receipt_view(&self, id: TransactionId) -> Result<ReceiptView, TransactionError> {
        Ok(self.get(id).await?.receipt_view())
    }

    async fn list_for_payer(&self, user_id: UserId) -> Result<Vec<Transaction>, TransactionError> {
        let filter = TransactionFilter::new().kind(KindFilter::Payment).include_voided();
        let mut rows: Vec<Transaction> = self
            .repository
            .find(&filter)
            .await?
            .into_iter()
            .filter(|tx| {
                tx.payment()
                    .is_some_and(|p| p.visible_to_user && p.payer_user_id == Some(user_id))
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
