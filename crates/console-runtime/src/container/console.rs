//! # Parish Console
//!
//! Holds every service and the shared bus.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: Event bus
//! Level 1: Audit logger, notification dispatcher (publishes to the bus)
//! Level 2: Transaction store, correction workflow
//! Level 3: Service request reconciler (reads the ledger through an adapter)
//! Level 4: Payment flow (ledger + reconciler)
//! ```

use std::sync::Arc;

use pc_01_audit_log::{
    AuditDependencies, AuditLogApi, AuditLogger, AuditSink, FallbackStore, InMemoryAuditSink,
    InMemoryFallbackStore, JsonLinesFallbackStore,
};
use pc_02_notifications::{InMemoryNotificationRepository, NotificationApi, NotificationDispatcher};
use pc_03_transactions::{
    InMemoryTransactionRepository, TransactionStore, TransactionStoreApi,
    TransactionStoreDependencies,
};
use pc_04_service_requests::{
    InMemoryServiceRequestRepository, ReconcilerDependencies, ServiceRequestApi,
    ServiceRequestReconciler,
};
use pc_05_corrections::{
    CorrectionApi, CorrectionDependencies, CorrectionWorkflow, InMemoryCorrectionRepository,
};
use shared_bus::{EventFilter, InMemoryEventBus, RefreshSignal};
use tracing::{info, instrument};

use crate::adapters::LedgerTransactionLookup;
use crate::container::config::{ConfigError, ConsoleConfig};
use crate::flows::PaymentFlow;
use crate::workers::{AuditResyncWorker, MetricsListener};

/// Central container holding all subsystem instances.
pub struct ParishConsole {
    pub audit: Arc<dyn AuditLogApi>,
    pub notifications: Arc<dyn NotificationApi>,
    pub transactions: Arc<dyn TransactionStoreApi>,
    pub service_requests: Arc<dyn ServiceRequestApi>,
    pub corrections: Arc<dyn CorrectionApi>,
    pub payments: Arc<PaymentFlow>,
    pub event_bus: Arc<InMemoryEventBus>,
    /// Immutable after initialization.
    pub config: ConsoleConfig,
}

impl ParishConsole {
    /// Build with an in-memory audit sink.
    pub fn new(config: ConsoleConfig) -> Result<Self, ConfigError> {
        Self::with_audit_sink(config, Arc::new(InMemoryAuditSink::new()))
    }

    /// Build with the given durable audit sink.
    #[instrument(name = "console_init", skip_all)]
    pub fn with_audit_sink(config: ConsoleConfig, sink: Arc<dyn AuditSink>) -> Result<Self, ConfigError> {
        config.validate()?;
        info!("Initializing parish console");

        let event_bus = Arc::new(InMemoryEventBus::with_capacity(config.bus.channel_capacity));

        let fallback: Arc<dyn FallbackStore> = match &config.audit.fallback_path {
            Some(path) => {
                info!(path = %path.display(), "Audit fallback queue on disk");
                Arc::new(JsonLinesFallbackStore::new(path))
            }
            None => Arc::new(InMemoryFallbackStore::new()),
        };
        let audit: Arc<dyn AuditLogApi> =
            Arc::new(AuditLogger::new(AuditDependencies::new(sink, fallback)));

        let notifications: Arc<dyn NotificationApi> = Arc::new(NotificationDispatcher::new(
            Arc::new(InMemoryNotificationRepository::new()),
            event_bus.clone(),
        ));

        let transactions: Arc<dyn TransactionStoreApi> = Arc::new(TransactionStore::new(
            TransactionStoreDependencies::new(
                Arc::new(InMemoryTransactionRepository::new()),
                audit.clone(),
                notifications.clone(),
            ),
            config.ledger.store_config(),
        ));

        let corrections: Arc<dyn CorrectionApi> =
            Arc::new(CorrectionWorkflow::new(CorrectionDependencies::new(
                Arc::new(InMemoryCorrectionRepository::new()),
                audit.clone(),
                notifications.clone(),
            )));

        let service_requests: Arc<dyn ServiceRequestApi> =
            Arc::new(ServiceRequestReconciler::new(ReconcilerDependencies::new(
                Arc::new(InMemoryServiceRequestRepository::new()),
                Arc::new(LedgerTransactionLookup::new(transactions.clone())),
                audit.clone(),
                notifications.clone(),
            )));

        let payments = Arc::new(PaymentFlow::new(transactions.clone(), service_requests.clone()));

        info!("Parish console initialized");
        Ok(Self {
            audit,
            notifications,
            transactions,
            service_requests,
            corrections,
            payments,
            event_bus,
            config,
        })
    }

    /// Trigger for an open view: matching events, or the poll interval.
    pub fn refresh_signal(&self, filter: EventFilter) -> RefreshSignal {
        RefreshSignal::new(self.event_bus.subscribe(filter), self.config.polling.poll_interval())
            .with_dedup_window(self.config.bus.dedup_window())
    }

    pub fn audit_resync_worker(&self) -> AuditResyncWorker {
        AuditResyncWorker::new(
            self.audit.clone(),
            self.notifications.clone(),
            self.config.audit.retry_interval(),
        )
    }

    pub fn metrics_listener(&self) -> MetricsListener {
        MetricsListener::new(self.event_bus.subscribe(EventFilter::all()))
    }
}
