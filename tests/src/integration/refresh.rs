//! # View Refresh
//!
//! An open view re-fetches on the next matching event, and falls back to the
//! poll interval when the event never reaches it.

#[cfg(test)]
mod tests {
    use super::super::*;
    use pc_04_service_requests::PaymentStatus;
    use pc_05_corrections::{ProfileField, SubmitCorrection};
    use rust_decimal_macros::dec;
    use shared_bus::{ConsoleEvent, EventFilter, RefreshReason};
    use shared_types::UserId;
    use std::collections::BTreeSet;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_member_view_refreshes_on_review() {
        let console = console();
        let member = UserId::new();
        let submitted = console
            .corrections
            .submit(SubmitCorrection {
                user_id: member,
                user_name: "Ana Reyes".into(),
                user_email: "ana.reyes@example.com".into(),
                fields_to_edit: BTreeSet::from([ProfileField::Address]),
                reason: "Moved to Barangay San Roque".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let mut view = console.refresh_signal(EventFilter::user(member));
        console.corrections.approve(submitted.id, &admin()).await.unwrap();

        let RefreshReason::Event(envelope) = view.next().await else {
            panic!("expected an event-driven refresh");
        };
        assert!(matches!(
            envelope.event,
            ConsoleEvent::CorrectionReviewed { approved: true, .. }
        ));
        assert!(console
            .corrections
            .editable_fields(member)
            .await
            .unwrap()
            .contains(&ProfileField::Address));
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_opened_late_converges_by_polling() {
        let console = console();
        let secretary = secretary();
        let request = console
            .service_requests
            .open_request(UserId::new(), "Baptism", dec!(500))
            .await
            .unwrap();
        console
            .payments
            .record_service_payment(&secretary, service_fee(request.id, dec!(500)))
            .await
            .unwrap();

        // The PaymentUpdated event went out before this view subscribed.
        let mut view = console.refresh_signal(EventFilter::service_request(request.id));
        let started = Instant::now();
        assert_eq!(view.next().await, RefreshReason::Poll);
        assert!(started.elapsed() <= console.config.polling.poll_interval() + Duration::from_millis(1));

        assert_eq!(
            console.service_requests.payment_status(request.id).await.unwrap(),
            PaymentStatus::Paid
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_members_events_do_not_wake_view() {
        let console = console();
        let member = UserId::new();
        let someone_else = UserId::new();
        let mut view = console.refresh_signal(EventFilter::user(member));

        console
            .corrections
            .submit(SubmitCorrection {
                user_id: someone_else,
                user_name: "Pedro Santos".into(),
                user_email: "pedro@example.com".into(),
                fields_to_edit: BTreeSet::from([ProfileField::ContactNumber]),
                reason: "New mobile number".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(view.next().await, RefreshReason::Poll);
    }
}
