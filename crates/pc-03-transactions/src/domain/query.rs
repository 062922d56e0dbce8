//! Listing filters and aggregates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::entities::Transaction;
use super::value_objects::Category;

/// Donation or payment, for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindFilter {
    Donation,
    Payment,
}

/// Criteria for `list_active` and `aggregate`. All set criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Inclusive lower bound on `created_at`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub to: Option<DateTime<Utc>>,
    pub category: Option<Category>,
    /// Case-insensitive substring of the donor name.
    pub donor: Option<String>,
    /// Substring of the receipt number.
    pub receipt: Option<String>,
    pub kind: Option<KindFilter>,
    /// Also list voided entries. Never affects aggregates.
    pub include_voided: bool,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn donor(mut self, needle: impl Into<String>) -> Self {
        self.donor = Some(needle.into());
        self
    }

    #[must_use]
    pub fn receipt(mut self, needle: impl Into<String>) -> Self {
        self.receipt = Some(needle.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: KindFilter) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn include_voided(mut self) -> Self {
        self.include_voided = true;
        self
    }

    /// Whether `tx` passes every criterion, the voided check included.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if tx.is_voided() && !self.include_voided {
            return false;
        }
        self.matches_fields(tx)
    }

    /// Criteria other than the voided check.
    pub fn matches_fields(&self, tx: &Transaction) -> bool {
        if self.from.is_some_and(|from| tx.created_at < from) {
            return false;
        }
        if self.to.is_some_and(|to| tx.created_at > to) {
            return false;
        }
        if self.category.is_some_and(|c| c != tx.category) {
            return false;
        }
        if let Some(needle) = non_blank(&self.donor) {
            if !tx.donor.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(needle) = non_blank(&self.receipt) {
            if !tx
                .receipt_number
                .to_uppercase()
                .contains(&needle.to_uppercase())
            {
                return false;
            }
        }
        match self.kind {
            Some(KindFilter::Donation) if tx.is_payment() => false,
            Some(KindFilter::Payment) if !tx.is_payment() => false,
            _ => true,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Totals over non-voided transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub total: Decimal,
    pub count: usize,
    pub total_by_category: BTreeMap<Category, Decimal>,
    /// Mean amount per category, rounded to centavos.
    pub average_by_category: BTreeMap<Category, Decimal>,
}

impl Aggregate {
    /// Fold transactions into totals, skipping voided ones unconditionally.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut aggregate = Aggregate::default();
        let mut counts: BTreeMap<Category, u32> = BTreeMap::new();

        for tx in transactions.into_iter().filter(|tx| !tx.is_voided()) {
            aggregate.total += tx.amount;
            aggregate.count += 1;
            *aggregate
                .total_by_category
                .entry(tx.category)
                .or_insert(Decimal::ZERO) += tx.amount;
            *counts.entry(tx.category).or_insert(0) += 1;
        }

        for (category, sum) in &aggregate.total_by_category {
            let n = counts.get(category).copied().unwrap_or(1).max(1);
            aggregate
                .average_by_category
                .insert(*category, (*sum / Decimal::from(n)).round_dp(2));
        }
        aggregate
    }
}
