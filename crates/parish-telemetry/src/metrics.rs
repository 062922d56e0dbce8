//! Prometheus metrics for the parish console.
//!
//! Naming: `pc_<area>_<metric>[_total]`.

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // LEDGER
    // =========================================================================

    /// Transactions recorded, by link (service_request/none)
    pub static ref TRANSACTIONS_RECORDED: CounterVec = CounterVec::new(
        Opts::new("pc_ledger_transactions_recorded_total", "Donations and payments recorded"),
        &["link"]
    ).expect("metric creation failed");

    /// Transactions voided
    pub static ref TRANSACTIONS_VOIDED: Counter = Counter::new(
        "pc_ledger_transactions_voided_total",
        "Transactions voided"
    ).expect("metric creation failed");

    /// Payment flows rolled back by a compensating void
    pub static ref PAYMENT_COMPENSATIONS: Counter = Counter::new(
        "pc_ledger_payment_compensations_total",
        "Service payments voided because the request could not be marked paid"
    ).expect("metric creation failed");

    // =========================================================================
    // SERVICE REQUESTS
    // =========================================================================

    /// Payment status changes, by new status (paid/unpaid)
    pub static ref PAYMENT_STATUS_CHANGES: CounterVec = CounterVec::new(
        Opts::new("pc_requests_payment_status_changes_total", "Service request payment status changes"),
        &["status"]
    ).expect("metric creation failed");

    // =========================================================================
    // CORRECTIONS
    // =========================================================================

    /// Correction reviews, by outcome (approved/rejected)
    pub static ref CORRECTIONS_REVIEWED: CounterVec = CounterVec::new(
        Opts::new("pc_corrections_reviewed_total", "Correction requests reviewed"),
        &["outcome"]
    ).expect("metric creation failed");

    // =========================================================================
    // NOTIFICATIONS & AUDIT
    // =========================================================================

    /// Notifications created
    pub static ref NOTIFICATIONS_SENT: Counter = Counter::new(
        "pc_notifications_sent_total",
        "Notifications created for members"
    ).expect("metric creation failed");

    /// Times the audit sink was found unreachable with entries queued locally
    pub static ref AUDIT_FALLBACKS: Counter = Counter::new(
        "pc_audit_fallbacks_total",
        "Audit sync degraded reports"
    ).expect("metric creation failed");

    /// Audit entries waiting in the local queue
    pub static ref AUDIT_UNSYNCED: Gauge = Gauge::new(
        "pc_audit_unsynced_entries",
        "Audit entries not yet written to the durable sink"
    ).expect("metric creation failed");

    // =========================================================================
    // EVENT BUS
    // =========================================================================

    /// Events observed on the bus, by topic
    pub static ref BUS_EVENTS: CounterVec = CounterVec::new(
        Opts::new("pc_bus_events_total", "Console events observed on the bus"),
        &["topic"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry. Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRANSACTIONS_RECORDED.clone()),
        Box::new(TRANSACTIONS_VOIDED.clone()),
        Box::new(PAYMENT_COMPENSATIONS.clone()),
        Box::new(PAYMENT_STATUS_CHANGES.clone()),
        Box::new(CORRECTIONS_REVIEWED.clone()),
        Box::new(NOTIFICATIONS_SENT.clone()),
        Box::new(AUDIT_FALLBACKS.clone()),
        Box::new(AUDIT_UNSYNCED.clone()),
        Box::new(BUS_EVENTS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
