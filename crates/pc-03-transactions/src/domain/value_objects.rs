//! # Value Objects
//!
//! Closed vocabularies of the ledger (category, payment method, payment
//! type) and the store configuration.
//!
//! The vocabularies arrive as free text from entry forms; parsing is lenient
//! about case, spaces and underscores, and anything else is a validation
//! error before any write.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowercase and collapse separators so "Building Fund", "building_fund" and
/// "BUILDING-FUND" compare equal.
fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Donation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Tithes,
    Offerings,
    #[serde(rename = "Building Fund")]
    BuildingFund,
    #[serde(rename = "Mass Intentions")]
    MassIntentions,
    #[serde(rename = "Special Collection")]
    SpecialCollection,
    Candles,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Tithes,
        Category::Offerings,
        Category::BuildingFund,
        Category::MassIntentions,
        Category::SpecialCollection,
        Category::Candles,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tithes => "Tithes",
            Category::Offerings => "Offerings",
            Category::BuildingFund => "Building Fund",
            Category::MassIntentions => "Mass Intentions",
            Category::SpecialCollection => "Special Collection",
            Category::Candles => "Candles",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Category::ALL
            .into_iter()
            .find(|c| normalize(c.as_str()) == wanted)
            .ok_or_else(|| format!("unknown category: {}", s.trim()))
    }
}

/// How the money was handed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Check,
    BankTransfer,
    Gcash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Check => "check",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Gcash => "gcash",
            PaymentMethod::Card => "card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "check" | "cheque" => Ok(PaymentMethod::Check),
            "bank_transfer" | "bank" => Ok(PaymentMethod::BankTransfer),
            "gcash" => Ok(PaymentMethod::Gcash),
            "card" | "credit_card" | "debit_card" => Ok(PaymentMethod::Card),
            _ => Err(format!("unknown payment method: {}", s.trim())),
        }
    }
}

/// What a payment record pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    ServiceFee,
    EventFee,
    Donation,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::ServiceFee => "service_fee",
            PaymentType::EventFee => "event_fee",
            PaymentType::Donation => "donation",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "service_fee" => Ok(PaymentType::ServiceFee),
            "event_fee" => Ok(PaymentType::EventFee),
            "donation" => Ok(PaymentType::Donation),
            _ => Err(format!("unknown payment type: {}", s.trim())),
        }
    }
}

/// Configuration for the transaction store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionStoreConfig {
    /// Minimum length of a void reason, after trimming (default: 10).
    pub min_void_reason_len: usize,
    /// Prefix of generated receipt numbers (default: `RCPT`).
    pub receipt_prefix: String,
    /// Attempts at a fresh receipt number before giving up (default: 5).
    pub max_receipt_attempts: usize,
}

impl Default for TransactionStoreConfig {
    fn default() -> Self {
        Self {
            min_void_reason_len: 10,
            receipt_prefix: "RCPT".to_string(),
            max_receipt_attempts: 5,
        }
    }
}
