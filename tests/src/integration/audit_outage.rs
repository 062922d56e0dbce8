//! # Audit Outage
//!
//! The durable audit sink goes away mid-shift. Operations keep succeeding,
//! entries queue in the JSON-lines fallback file, and the resync worker
//! drains them once the sink is back.

#[cfg(test)]
mod tests {
    use super::super::*;
    use console_runtime::{ConsoleConfig, ParishConsole};
    use pc_01_audit_log::InMemoryAuditSink;
    use rust_decimal_macros::dec;
    use shared_bus::{ConsoleEvent, EventFilter, EventTopic};
    use shared_types::{AuditAction, UserId};
    use std::sync::Arc;

    fn console_with_disk_fallback(dir: &tempfile::TempDir) -> (ParishConsole, Arc<InMemoryAuditSink>) {
        let mut config = ConsoleConfig::default();
        config.audit.fallback_path = Some(dir.path().join("audit-fallback.jsonl"));
        let sink = Arc::new(InMemoryAuditSink::new());
        let console = ParishConsole::with_audit_sink(config, sink.clone()).unwrap();
        (console, sink)
    }

    #[tokio::test]
    async fn test_operations_survive_sink_outage() {
        let dir = tempfile::tempdir().unwrap();
        let (console, sink) = console_with_disk_fallback(&dir);
        let secretary = secretary();
        let mut audit_events = console
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::Audit]));
        let worker = console.audit_resync_worker();

        sink.set_online(false);
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

        // record + void + payment + mark paid
        assert_eq!(console.audit.unsynced_count().await, 4);
        let queued = std::fs::read_to_string(dir.path().join("audit-fallback.jsonl")).unwrap();
        assert_eq!(queued.lines().count(), 4);

        let report = worker.resync_once().await;
        assert_eq!(report.remaining, 4);
        assert_eq!(
            audit_events.recv().await.unwrap().event,
            ConsoleEvent::AuditSyncDegraded { unsynced: 4 }
        );

        sink.set_online(true);
        let report = worker.resync_once().await;
        assert_eq!(report.synced, 4);
        assert_eq!(console.audit.unsynced_count().await, 0);

        let written = sink.entries().await;
        let actions: Vec<_> = written.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                AuditAction::Create,
                AuditAction::Void,
                AuditAction::Payment,
                AuditAction::Update,
            ]
        );
        assert!(written.iter().all(|e| e.synced));
    }

    #[tokio::test]
    async fn test_queue_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let (console, sink) = console_with_disk_fallback(&dir);
            sink.set_online(false);
            console
                .transactions
                .record_donation(&secretary(), donation("Tithes", dec!(800)))
                .await
                .unwrap();
            assert_eq!(console.audit.unsynced_count().await, 1);
        }

        // New process, same fallback file, sink reachable again.
        let (console, sink) = console_with_disk_fallback(&dir);
        assert_eq!(console.audit.unsynced_count().await, 1);

        let report = console.audit_resync_worker().resync_once().await;
        assert_eq!(report.synced, 1);
        assert_eq!(sink.entries().await.len(), 1);
    }
}
