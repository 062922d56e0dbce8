//! Subscriber setup.
//!
//! JSON lines carry `timestamp`, `level`, `target`, `fields` and the span
//! stack, which is what log shippers expect. Pretty output is for local runs.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("bad log filter: {e}")))?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        json = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}

/// Log with the console module attached as a structured field.
#[macro_export]
macro_rules! log_event {
    (info, $module:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(module = $module, $($($field)*,)? $msg)
    };
    (warn, $module:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(module = $module, $($($field)*,)? $msg)
    };
    (error, $module:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(module = $module, $($($field)*,)? $msg)
    };
    (debug, $module:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(module = $module, $($($field)*,)? $msg)
    };
}

/// Log a ledger event with the transaction id attached.
#[macro_export]
macro_rules! log_tx_event {
    ($level:ident, $msg:expr, $transaction_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            module = "ledger",
            transaction_id = %$transaction_id,
            $($($field)*,)?
            $msg
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_filter_is_config_error() {
        let config = TelemetryConfig {
            log_level: "pc_03=notalevel".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(init_logging(&config), Err(TelemetryError::Config(_))));
    }

    #[test]
    fn test_macros_expand() {
        log_event!(info, "corrections", "request reviewed", approved = true);
        log_tx_event!(debug, "voided", "a1b2", reason = "duplicate");
    }
}
