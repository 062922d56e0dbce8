//! Receipt number format: `{PREFIX}-YYYYMMDD-XXXXXXXX`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Build a receipt number from the recording date and a random token.
///
/// The suffix is the first 8 hex digits of `token`, uppercased.
pub fn format_receipt_number(prefix: &str, recorded_at: DateTime<Utc>, token: Uuid) -> String {
    let simple = token.simple().to_string().to_uppercase();
    let suffix = simple.get(..8).unwrap_or(&simple);
    format!("{}-{}-{}", prefix, recorded_at.format("%Y%m%d"), suffix)
}

/// Normalize a hand-entered receipt number; blank means "generate one".
pub fn normalize_supplied(receipt: Option<&str>) -> Option<String> {
    receipt
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_uppercase)
}
