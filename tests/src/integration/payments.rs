//! # Payment Flows
//!
//! Service fees across the ledger and the service request reconciler:
//! the payment saga, a staff reversal, and divergence reporting after a void.

#[cfg(test)]
mod tests {
    use super::super::*;
    use console_runtime::adapters::LedgerTransactionLookup;
    use console_runtime::{PaymentFlow, PaymentFlowError};
    use pc_03_transactions::TransactionFilter;
    use pc_04_service_requests::{
        DivergenceKind, InMemoryServiceRequestRepository, PaymentStatus, ReconcilerDependencies,
        ServiceRequestApi, ServiceRequestError, ServiceRequestReconciler,
    };
    use rust_decimal_macros::dec;
    use shared_types::{AuditAction, ServiceRequestId, UserId};
    use std::sync::Arc;

    /// Console ledger plus a reconciler whose ids start at `first`.
    struct Parish {
        console: ParishConsole,
        requests: Arc<dyn ServiceRequestApi>,
        payments: PaymentFlow,
    }

    fn parish_numbered_from(first: u64) -> Parish {
        let console = console();
        let requests: Arc<dyn ServiceRequestApi> =
            Arc::new(ServiceRequestReconciler::new(ReconcilerDependencies::new(
                Arc::new(InMemoryServiceRequestRepository::starting_at(first)),
                Arc::new(LedgerTransactionLookup::new(console.transactions.clone())),
                console.audit.clone(),
                console.notifications.clone(),
            )));
        let payments = PaymentFlow::new(console.transactions.clone(), requests.clone());
        Parish {
            console,
            requests,
            payments,
        }
    }

    // =============================================================================
    // REQUEST #42
    // =============================================================================

    #[tokio::test]
    async fn test_request_42_paid_then_reverted() {
        let parish = parish_numbered_from(42);
        let secretary = secretary();

        let request = parish
            .requests
            .open_request(UserId::new(), "Baptism", dec!(500))
            .await
            .unwrap();
        assert_eq!(request.id, ServiceRequestId(42));
        assert_eq!(
            parish.requests.payment_status(request.id).await.unwrap(),
            PaymentStatus::Unpaid
        );

        let paid = parish
            .payments
            .record_service_payment(&secretary, service_fee(ServiceRequestId(42), dec!(500)))
            .await
            .unwrap();
        assert_eq!(
            parish.requests.payment_status(ServiceRequestId(42)).await.unwrap(),
            PaymentStatus::Paid
        );

        let reverted = parish
            .requests
            .mark_unpaid(ServiceRequestId(42), &secretary, "correction")
            .await
            .unwrap();
        assert_eq!(reverted.payment_status, PaymentStatus::Unpaid);
        assert_eq!(reverted.donation_id, None);

        let payment = parish.console.transactions.get(paid.transaction.id).await.unwrap();
        assert!(!payment.is_voided());
        assert_eq!(payment, paid.transaction);

        let trail = parish.console.audit.entries_for_record("#42").await.unwrap();
        assert_eq!(trail.len(), 2);
        assert!(trail.iter().all(|e| e.action == AuditAction::Update));
        assert_eq!(trail[1].new_value.as_ref().unwrap()["reason"], "correction");
    }

    #[tokio::test]
    async fn test_priest_cannot_revert_payment() {
        let parish = parish_numbered_from(42);
        let request = parish
            .requests
            .open_request(UserId::new(), "Wedding", dec!(3000))
            .await
            .unwrap();
        parish
            .payments
            .record_service_payment(&secretary(), service_fee(request.id, dec!(3000)))
            .await
            .unwrap();

        let err = parish
            .requests
            .mark_unpaid(request.id, &priest(), "correction")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceRequestError::PermissionDenied { .. }));
        assert_eq!(
            parish.requests.payment_status(request.id).await.unwrap(),
            PaymentStatus::Paid
        );
    }

    // =============================================================================
    // SAGA
    // =============================================================================

    #[tokio::test]
    async fn test_failed_link_rolls_back_payment() {
        let parish = parish_numbered_from(42);

        let err = parish
            .payments
            .record_service_payment(&secretary(), service_fee(ServiceRequestId(7), dec!(500)))
            .await
            .unwrap_err();

        let PaymentFlowError::RolledBack { transaction_id, .. } = err else {
            panic!("expected rollback, got {err:?}");
        };
        let payment = parish.console.transactions.get(transaction_id).await.unwrap();
        assert!(payment.is_voided());

        let trail = parish
            .console
            .audit
            .entries_for_record(&transaction_id.to_string())
            .await
            .unwrap();
        let actions: Vec<_> = trail.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![AuditAction::Payment, AuditAction::Void]);
    }

    #[tokio::test]
    async fn test_priest_payment_for_unknown_request_leaves_no_live_money() {
        let parish = parish_numbered_from(42);

        let err = parish
            .payments
            .record_service_payment(&priest(), service_fee(ServiceRequestId(999), dec!(300)))
            .await
            .unwrap_err();

        let PaymentFlowError::RolledBack { transaction_id, .. } = err else {
            panic!("expected rollback, got {err:?}");
        };
        assert!(parish
            .console
            .transactions
            .get(transaction_id)
            .await
            .unwrap()
            .is_voided());
        let totals = parish
            .console
            .transactions
            .aggregate(&TransactionFilter::default())
            .await
            .unwrap();
        assert_eq!(totals.total, dec!(0));
    }

    // =============================================================================
    // FUNDING LINKS
    // =============================================================================

    #[tokio::test]
    async fn test_tithe_cannot_settle_fee_by_amount() {
        let parish = parish_numbered_from(1);
        let secretary = secretary();
        let request = parish
            .requests
            .open_request(UserId::new(), "Baptism", dec!(500))
            .await
            .unwrap();
        let gift = parish
            .console
            .transactions
            .record_donation(&secretary, donation("Tithes", dec!(500)))
            .await
            .unwrap();

        let err = parish
            .requests
            .mark_paid(request.id, gift.id, &secretary)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceRequestError::Validation(_)));
        assert_eq!(
            parish.requests.payment_status(request.id).await.unwrap(),
            PaymentStatus::Unpaid
        );
    }

    #[tokio::test]
    async fn test_one_fee_payment_cannot_settle_two_requests() {
        let parish = parish_numbered_from(1);
        let secretary = secretary();
        let first = parish
            .requests
            .open_request(UserId::new(), "Baptism", dec!(500))
            .await
            .unwrap();
        let second = parish
            .requests
            .open_request(UserId::new(), "Baptism", dec!(500))
            .await
            .unwrap();
        let mut legacy_fee = service_fee(first.id, dec!(500));
        legacy_fee.service_request_id = None;
        let fee = parish
            .console
            .transactions
            .record_payment(&secretary, legacy_fee)
            .await
            .unwrap();

        parish
            .requests
            .mark_paid(first.id, fee.id, &secretary)
            .await
            .unwrap();
        let err = parish
            .requests
            .mark_paid(second.id, fee.id, &secretary)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceRequestError::Validation(_)));
        assert_eq!(
            parish.requests.payment_status(second.id).await.unwrap(),
            PaymentStatus::Unpaid
        );
    }

    // =============================================================================
    // DIVERGENCE
    // =============================================================================

    #[tokio::test]
    async fn test_voided_funding_reported_as_divergence() {
        let parish = parish_numbered_from(42);
        let secretary = secretary();
        let request = parish
            .requests
            .open_request(UserId::new(), "Funeral mass", dec!(1000))
            .await
            .unwrap();
        let paid = parish
            .payments
            .record_service_payment(&secretary, service_fee(request.id, dec!(1000)))
            .await
            .unwrap();

        parish
            .console
            .transactions
            .void(paid.transaction.id, "Bounced bank transfer", &secretary)
            .await
            .unwrap();

        // Voiding does not revert the request.
        assert_eq!(
            parish.requests.payment_status(request.id).await.unwrap(),
            PaymentStatus::Paid
        );
        let divergences = parish.requests.find_divergences().await.unwrap();
        assert_eq!(divergences.len(), 1);
        assert_eq!(divergences[0].service_request_id, request.id);
        assert_eq!(divergences[0].kind, DivergenceKind::FundingVoided);

        parish
            .requests
            .mark_unpaid(request.id, &secretary, "Bounced bank transfer")
            .await
            .unwrap();
        assert!(parish.requests.find_divergences().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_member_payment_history_keeps_voided_rows() {
        let console = console();
        let secretary = secretary();
        let member = UserId::new();
        let request = console
            .service_requests
            .open_request(member, "Baptism", dec!(500))
            .await
            .unwrap();
        let mut fee = service_fee(request.id, dec!(500));
        fee.payer_user_id = Some(member);
        let paid = console
            .payments
            .record_service_payment(&secretary, fee)
            .await
            .unwrap();
        console
            .transactions
            .void(paid.transaction.id, "Paid twice at the counter", &secretary)
            .await
            .unwrap();

        let history = console.transactions.list_for_payer(member).await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].is_voided());
    }
}
