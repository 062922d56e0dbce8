//! # Ledger Flows
//!
//! Recording, voiding and totals through the wired console, with the audit
//! trail and bus traffic each step leaves behind.

#[cfg(test)]
mod tests {
    use super::super::*;
    use pc_03_transactions::{Category, KindFilter, TransactionError, TransactionFilter};
    use rust_decimal_macros::dec;
    use shared_bus::{ConsoleEvent, EventFilter, EventTopic};
    use shared_types::AuditAction;

    // =============================================================================
    // WALK-IN DONATION, THEN VOID
    // =============================================================================

    #[tokio::test]
    async fn test_offerings_donation_void_lifecycle() {
        let console = console();
        let secretary = secretary();
        let mut events = console
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::Transactions]));

        let tx = console
            .transactions
            .record_donation(&secretary, donation("Offerings", dec!(1500)))
            .await
            .unwrap();

        let listed = console
            .transactions
            .list_active(&TransactionFilter::new())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, tx.id);
        let totals = console
            .transactions
            .aggregate(&TransactionFilter::new())
            .await
            .unwrap();
        assert_eq!(totals.total, dec!(1500));

        console
            .transactions
            .void(tx.id, "Payment cancelled by donor", &secretary)
            .await
            .unwrap();

        let totals = console
            .transactions
            .aggregate(&TransactionFilter::new())
            .await
            .unwrap();
        assert_eq!(totals.total, dec!(0));
        assert_eq!(totals.count, 0);

        assert!(console
            .transactions
            .list_active(&TransactionFilter::new())
            .await
            .unwrap()
            .is_empty());
        let with_voided = console
            .transactions
            .list_active(&TransactionFilter::new().include_voided())
            .await
            .unwrap();
        assert_eq!(with_voided.len(), 1);
        assert_eq!(with_voided[0].void_reason(), Some("Payment cancelled by donor"));

        let trail = console
            .audit
            .entries_for_record(&tx.id.to_string())
            .await
            .unwrap();
        let voids: Vec<_> = trail.iter().filter(|e| e.action == AuditAction::Void).collect();
        assert_eq!(voids.len(), 1);
        assert_eq!(voids[0].user_name, "Maria Santos");
        assert_eq!(voids[0].new_value.as_ref().unwrap()["void_reason"], "Payment cancelled by donor");

        assert!(matches!(
            events.recv().await.unwrap().event,
            ConsoleEvent::TransactionRecorded { .. }
        ));
        assert!(matches!(
            events.recv().await.unwrap().event,
            ConsoleEvent::TransactionVoided { transaction_id, .. } if transaction_id == tx.id
        ));
    }

    #[tokio::test]
    async fn test_second_void_leaves_single_audit_entry() {
        let console = console();
        let secretary = secretary();
        let tx = console
            .transactions
            .record_donation(&secretary, donation("Offerings", dec!(1500)))
            .await
            .unwrap();
        console
            .transactions
            .void(tx.id, "Payment cancelled by donor", &secretary)
            .await
            .unwrap();

        let err = console
            .transactions
            .void(tx.id, "Duplicate entry on the ledger", &admin())
            .await
            .unwrap_err();
        assert_eq!(err, TransactionError::AlreadyVoided(tx.id));

        let trail = console
            .audit
            .entries_for_record(&tx.id.to_string())
            .await
            .unwrap();
        assert_eq!(trail.iter().filter(|e| e.action == AuditAction::Void).count(), 1);
    }

    #[tokio::test]
    async fn test_priest_cannot_void() {
        let console = console();
        let tx = console
            .transactions
            .record_donation(&secretary(), donation("Tithes", dec!(200)))
            .await
            .unwrap();

        let err = console
            .transactions
            .void(tx.id, "Recorded under the wrong donor", &priest())
            .await
            .unwrap_err();
        assert!(matches!(err, TransactionError::PermissionDenied { .. }));
        assert!(!console.transactions.get(tx.id).await.unwrap().is_voided());
    }

    // =============================================================================
    // TOTALS ACROSS KINDS
    // =============================================================================

    #[tokio::test]
    async fn test_totals_by_category_and_kind() {
        let console = console();
        let secretary = secretary();
        for (category, amount) in [("Offerings", dec!(1500)), ("Offerings", dec!(500)), ("Tithes", dec!(1000))] {
            console
                .transactions
                .record_donation(&secretary, donation(category, amount))
                .await
                .unwrap();
        }
        let request = console
            .service_requests
            .open_request(shared_types::UserId::new(), "Baptism", dec!(750))
            .await
            .unwrap();
        console
            .payments
            .record_service_payment(&secretary, service_fee(request.id, dec!(750)))
            .await
            .unwrap();

        let all = console
            .transactions
            .aggregate(&TransactionFilter::new())
            .await
            .unwrap();
        assert_eq!(all.total, dec!(3750));
        assert_eq!(all.count, 4);
        assert_eq!(all.total_by_category[&Category::Offerings], dec!(2000));
        assert_eq!(all.average_by_category[&Category::Offerings], dec!(1000));

        let donations_only = console
            .transactions
            .aggregate(&TransactionFilter::new().kind(KindFilter::Donation))
            .await
            .unwrap();
        assert_eq!(donations_only.total, dec!(3000));
    }

    #[tokio::test]
    async fn test_receipt_view_reflects_void() {
        let console = console();
        let secretary = secretary();
        let tx = console
            .transactions
            .record_donation(&secretary, donation("Offerings", dec!(1500)))
            .await
            .unwrap();

        let before = console.transactions.receipt_view(tx.id).await.unwrap();
        assert!(!before.voided);
        assert_eq!(before.receipt_number, tx.receipt_number);

        console
            .transactions
            .void(tx.id, "Payment cancelled by donor", &secretary)
            .await
            .unwrap();
        let after = console.transactions.receipt_view(tx.id).await.unwrap();
        assert!(after.voided);
        assert_eq!(after.amount, before.amount);
        assert_eq!(after.receipt_number, before.receipt_number);
    }
}
