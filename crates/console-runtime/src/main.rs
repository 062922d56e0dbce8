//! # Parish Console
//!
//! Entry point for the parish finance and approval console.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logging + metrics registry)
//! 2. Load and validate configuration from `PC_*` variables
//! 3. Initialize subsystems in dependency order
//! 4. Spawn background workers (audit resync, metrics listener)
//! 5. Wait for Ctrl+C, then signal shutdown

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use console_runtime::{ConsoleConfig, ParishConsole};
use parish_telemetry::{init_telemetry, TelemetryConfig};

/// Console plus the worker tasks running against it.
struct ConsoleRuntime {
    console: Arc<ParishConsole>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    workers: Vec<JoinHandle<()>>,
}

impl ConsoleRuntime {
    fn new(config: ConsoleConfig) -> Result<Self> {
        let console = ParishConsole::new(config).context("invalid console configuration")?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Ok(Self {
            console: Arc::new(console),
            shutdown_tx,
            shutdown_rx,
            workers: Vec::new(),
        })
    }

    fn start(&mut self) {
        info!("===========================================");
        info!("  Parish Console v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let resync = self.console.audit_resync_worker();
        self.workers.push(tokio::spawn(resync.run(self.shutdown_rx.clone())));

        let listener = self.console.metrics_listener();
        self.workers.push(tokio::spawn(listener.run(self.shutdown_rx.clone())));

        let config = &self.console.config;
        info!(
            receipt_prefix = %config.ledger.receipt_prefix,
            audit_retry_secs = config.audit.retry_interval_secs,
            poll_interval_secs = config.polling.poll_interval_secs,
            "Background workers started"
        );
    }

    async fn shutdown(self) {
        info!("Initiating graceful shutdown...");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
        for worker in self.workers {
            if let Err(e) = worker.await {
                error!("Worker task failed: {}", e);
            }
        }

        let unsynced = self.console.audit.unsynced_count().await;
        if unsynced > 0 {
            error!(unsynced, "Shutting down with audit entries not yet in the durable log");
        }
        info!("Shutdown complete");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_telemetry(&telemetry).context("failed to initialize telemetry")?;

    let config = ConsoleConfig::from_env().context("failed to load configuration")?;

    let mut runtime = ConsoleRuntime::new(config)?;
    runtime.start();

    info!("Console is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}
