//! # Console Configuration
//!
//! Unified configuration for all subsystems and runtime workers.
//!
//! Every value has a default; `from_env` overrides from `PC_*` variables and
//! `validate` rejects values the services cannot run with.

use pc_03_transactions::TransactionStoreConfig;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Complete console configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Ledger rules.
    pub ledger: LedgerConfig,
    /// Audit fallback and resync.
    pub audit: AuditConfig,
    /// Event bus sizing and dedup.
    pub bus: BusConfig,
    /// View polling.
    pub polling: PollingConfig,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid value: {value:?}")]
    InvalidVar { var: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("receipt prefix must be 1-8 ASCII letters or digits, got {0:?}")]
    ReceiptPrefix(String),
}

/// Ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Minimum void reason length after trimming.
    pub min_void_reason_len: usize,
    /// Prefix of generated receipt numbers.
    pub receipt_prefix: String,
    /// Attempts at a fresh receipt number before giving up.
    pub max_receipt_attempts: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        let defaults = TransactionStoreConfig::default();
        Self {
            min_void_reason_len: defaults.min_void_reason_len,
            receipt_prefix: defaults.receipt_prefix,
            max_receipt_attempts: defaults.max_receipt_attempts,
        }
    }
}

impl LedgerConfig {
    pub fn store_config(&self) -> TransactionStoreConfig {
        TransactionStoreConfig {
            min_void_reason_len: self.min_void_reason_len,
            receipt_prefix: self.receipt_prefix.clone(),
            max_receipt_attempts: self.max_receipt_attempts,
        }
    }
}

/// Audit configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// JSON-lines file for entries the sink could not take. In memory when unset.
    pub fallback_path: Option<PathBuf>,
    /// How often the resync worker retries the queue, in seconds.
    pub retry_interval_secs: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            fallback_path: None,
            retry_interval_secs: 30,
        }
    }
}

impl AuditConfig {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }
}

/// Event bus configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    /// Events buffered per subscriber.
    pub channel_capacity: usize,
    /// How long listeners remember handled event ids, in seconds.
    pub dedup_window_secs: u64,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
            dedup_window_secs: 120,
        }
    }
}

impl BusConfig {
    pub fn dedup_window(&self) -> Duration {
        Duration::from_secs(self.dedup_window_secs)
    }
}

/// View polling configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingConfig {
    /// Interval between polls of correction and notification state, in seconds.
    pub poll_interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: shared_bus::DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl PollingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl ConsoleConfig {
    /// Defaults overridden by environment variables.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `PC_MIN_VOID_REASON_LEN` | `ledger.min_void_reason_len` |
    /// | `PC_RECEIPT_PREFIX` | `ledger.receipt_prefix` |
    /// | `PC_AUDIT_FALLBACK_PATH` | `audit.fallback_path` |
    /// | `PC_AUDIT_RETRY_SECS` | `audit.retry_interval_secs` |
    /// | `PC_BUS_CAPACITY` | `bus.channel_capacity` |
    /// | `PC_DEDUP_WINDOW_SECS` | `bus.dedup_window_secs` |
    /// | `PC_POLL_INTERVAL_SECS` | `polling.poll_interval_secs` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as `from_env` with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        override_parsed(&lookup, "PC_MIN_VOID_REASON_LEN", &mut config.ledger.min_void_reason_len)?;
        if let Some(prefix) = lookup("PC_RECEIPT_PREFIX") {
            config.ledger.receipt_prefix = prefix.trim().to_string();
        }
        if let Some(path) = lookup("PC_AUDIT_FALLBACK_PATH").filter(|p| !p.trim().is_empty()) {
            config.audit.fallback_path = Some(PathBuf::from(path.trim()));
        }
        override_parsed(&lookup, "PC_AUDIT_RETRY_SECS", &mut config.audit.retry_interval_secs)?;
        override_parsed(&lookup, "PC_BUS_CAPACITY", &mut config.bus.channel_capacity)?;
        override_parsed(&lookup, "PC_DEDUP_WINDOW_SECS", &mut config.bus.dedup_window_secs)?;
        override_parsed(&lookup, "PC_POLL_INTERVAL_SECS", &mut config.polling.poll_interval_secs)?;

        Ok(config)
    }

    /// Reject values the services cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.ledger.receipt_prefix;
        if prefix.is_empty() || prefix.len() > 8 || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::ReceiptPrefix(prefix.clone()));
        }

        let positive = [
            ("ledger.min_void_reason_len", self.ledger.min_void_reason_len as u64),
            ("ledger.max_receipt_attempts", self.ledger.max_receipt_attempts as u64),
            ("audit.retry_interval_secs", self.audit.retry_interval_secs),
            ("bus.channel_capacity", self.bus.channel_capacity as u64),
            ("bus.dedup_window_secs", self.bus.dedup_window_secs),
            ("polling.poll_interval_secs", self.polling.poll_interval_secs),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::Zero { field });
            }
        }
        Ok(())
    }
}

fn override_parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    target: &mut T,
) -> Result<(), ConfigError> {
    if let Some(value) = lookup(var) {
        *target = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { var, value })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ConsoleConfig::default();
        assert_eq!(config.ledger.min_void_reason_len, 10);
        assert_eq!(config.ledger.receipt_prefix, "RCPT");
        assert_eq!(config.polling.poll_interval(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            ("PC_RECEIPT_PREFIX", " OR "),
            ("PC_AUDIT_FALLBACK_PATH", "/var/lib/parish/audit.jsonl"),
            ("PC_POLL_INTERVAL_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.ledger.receipt_prefix, "OR");
        assert_eq!(
            config.audit.fallback_path,
            Some(PathBuf::from("/var/lib/parish/audit.jsonl"))
        );
        assert_eq!(config.polling.poll_interval_secs, 3);
        assert_eq!(config.ledger.store_config().receipt_prefix, "OR");
    }

    #[test]
    fn test_unparseable_var() {
        let err = ConsoleConfig::from_lookup(lookup(&[("PC_BUS_CAPACITY", "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidVar {
                var: "PC_BUS_CAPACITY",
                value: "lots".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_rejects_zero_and_bad_prefix() {
        let mut config = ConsoleConfig::default();
        config.polling.poll_interval_secs = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Zero {
                field: "polling.poll_interval_secs"
            })
        );

        let mut config = ConsoleConfig::default();
        config.ledger.receipt_prefix = "OR-".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::ReceiptPrefix(_))));
    }
}
