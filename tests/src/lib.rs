//! # Parish Console Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── ledger_benchmarks.rs   # recording + aggregation throughput
//! └── src/
//!     └── integration/           # flows across subsystems, wired by ParishConsole
//!         ├── ledger.rs          # record, void, totals, audit trail
//!         ├── payments.rs        # payment saga, unpaid reversal, divergences
//!         ├── corrections.rs     # submit, review, edit, lock again
//!         ├── audit_outage.rs    # sink down, disk fallback, resync
//!         └── refresh.rs         # event-driven and polled view refresh
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pc-tests
//! cargo test -p pc-tests integration::payments
//! cargo bench -p pc-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
