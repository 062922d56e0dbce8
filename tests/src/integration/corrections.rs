//! # Correction Flows
//!
//! A member's locked profile fields opened by an approved correction request
//! and locked again once the edit is saved.

#[cfg(test)]
mod tests {
    use super::super::*;
    use pc_02_notifications::NotificationType;
    use pc_05_corrections::{CorrectionError, CorrectionStatus, ProfileField, SubmitCorrection};
    use shared_bus::{ConsoleEvent, EventFilter};
    use shared_types::{AuditAction, UserId};
    use std::collections::BTreeSet;

    fn civil_status_request(user_id: UserId) -> SubmitCorrection {
        SubmitCorrection {
            user_id,
            user_name: "Ana Reyes".into(),
            user_email: "ana.reyes@example.com".into(),
            member_id: Some("M-0192".into()),
            fields_to_edit: BTreeSet::from([ProfileField::CivilStatus, ProfileField::LastName]),
            reason: "Married last June, surname changed".into(),
        }
    }

    #[tokio::test]
    async fn test_approved_fields_open_then_lock_again() {
        let console = console();
        let member = UserId::new();
        let mut member_events = console.event_bus.subscribe(EventFilter::user(member));

        assert!(console.corrections.editable_fields(member).await.unwrap().is_empty());
        assert_eq!(
            console
                .corrections
                .check_profile_edit(member, &[ProfileField::LastName])
                .await,
            Err(CorrectionError::FieldLocked(ProfileField::LastName))
        );

        let submitted = console
            .corrections
            .submit(civil_status_request(member))
            .await
            .unwrap();
        assert_eq!(console.corrections.pending_queue().await.unwrap().len(), 1);

        console.corrections.approve(submitted.id, &admin()).await.unwrap();

        let editable = console.corrections.editable_fields(member).await.unwrap();
        assert_eq!(
            editable,
            BTreeSet::from([ProfileField::CivilStatus, ProfileField::LastName])
        );
        console
            .corrections
            .check_profile_edit(member, &[ProfileField::LastName, ProfileField::CivilStatus])
            .await
            .unwrap();
        assert_eq!(
            console
                .corrections
                .check_profile_edit(member, &[ProfileField::Email])
                .await,
            Err(CorrectionError::FieldLocked(ProfileField::Email))
        );

        let notifications = console.notifications.list_for_user(member).await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].notification_type, NotificationType::CorrectionApproved);
        assert_eq!(notifications[0].request_id, Some(submitted.id));

        let completed = console.corrections.complete(submitted.id).await.unwrap();
        assert!(completed.completed);
        assert!(console.corrections.editable_fields(member).await.unwrap().is_empty());

        let trail = console
            .audit
            .entries_for_record(&submitted.id.to_string())
            .await
            .unwrap();
        let actions: Vec<_> = trail.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![AuditAction::Submit, AuditAction::Approve, AuditAction::Complete]
        );

        let mut seen = Vec::new();
        while let Ok(Some(envelope)) = member_events.try_recv() {
            seen.push(envelope.event);
        }
        assert!(seen.iter().any(|e| matches!(e, ConsoleEvent::CorrectionReviewed { approved: true, .. })));
        assert!(seen.iter().any(|e| matches!(e, ConsoleEvent::NotificationCreated { .. })));
        assert!(matches!(seen.last(), Some(ConsoleEvent::CorrectionCompleted { .. })));
    }

    #[tokio::test]
    async fn test_rejected_request_grants_nothing() {
        let console = console();
        let member = UserId::new();
        let submitted = console
            .corrections
            .submit(civil_status_request(member))
            .await
            .unwrap();

        let rejected = console
            .corrections
            .reject(submitted.id, &admin(), Some("Please bring the marriage certificate"))
            .await
            .unwrap();
        assert_eq!(rejected.status, CorrectionStatus::Rejected);
        assert!(console.corrections.editable_fields(member).await.unwrap().is_empty());

        let notifications = console.notifications.list_for_user(member).await.unwrap();
        assert_eq!(notifications[0].notification_type, NotificationType::CorrectionRejected);
        assert!(notifications[0].message.contains("marriage certificate"));

        // Free to try again once the previous request is closed.
        console
            .corrections
            .submit(civil_status_request(member))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_one_outstanding_request_per_member() {
        let console = console();
        let member = UserId::new();
        let first = console
            .corrections
            .submit(civil_status_request(member))
            .await
            .unwrap();

        let err = console
            .corrections
            .submit(civil_status_request(member))
            .await
            .unwrap_err();
        assert_eq!(err, CorrectionError::OutstandingRequest(first.id));

        console.corrections.approve(first.id, &admin()).await.unwrap();
        // Approved but not yet used is still outstanding.
        assert!(console
            .corrections
            .submit(civil_status_request(member))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_only_admin_reviews() {
        let console = console();
        let submitted = console
            .corrections
            .submit(civil_status_request(UserId::new()))
            .await
            .unwrap();

        for reviewer in [secretary(), priest()] {
            let err = console
                .corrections
                .approve(submitted.id, &reviewer)
                .await
                .unwrap_err();
            assert!(matches!(err, CorrectionError::PermissionDenied { .. }));
        }
        assert_eq!(
            console.corrections.get(submitted.id).await.unwrap().status,
            CorrectionStatus::Pending
        );
    }
}
