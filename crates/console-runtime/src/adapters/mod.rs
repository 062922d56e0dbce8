//! # Cross-Subsystem Adapters
//!
//! Implementations of one subsystem's outbound port over another subsystem's
//! inbound API. Subsystem crates never depend on each other's services; the
//! runtime connects them here.

pub mod ledger_lookup;

pub use ledger_lookup::LedgerTransactionLookup;
