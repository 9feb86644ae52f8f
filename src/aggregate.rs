// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart-ready summaries over a snapshot of transactions.
//!
//! Amounts are assumed non-negative; negative records are dropped at ingestion
//! (see `api::ApiClient::fetch_transactions`).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{TransactionRecord, TxType};

/// Number of most recent months kept by [`monthly`].
pub const MONTHLY_WINDOW: usize = 12;

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Vi,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Vi => "vi",
        }
    }

    /// Short `month year` label, e.g. `Mar 2024` or `thg 3, 2024`.
    pub fn month_label(&self, year: i32, month: u32) -> String {
        match self {
            Locale::En => {
                let idx = month.clamp(1, 12) as usize - 1;
                format!("{} {}", MONTHS_EN[idx], year)
            }
            Locale::Vi => format!("thg {}, {}", month, year),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "vi" | "vi-vn" => Ok(Locale::Vi),
            other => Err(anyhow!("Unsupported locale '{}', expected en|vi", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    pub amount: Decimal,
    /// Percent of the breakdown total, unrounded.
    pub percentage: Decimal,
}

impl Share {
    pub fn percent_display(&self) -> String {
        format!(
            "{:.1}%",
            self.percentage
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub buckets: Vec<Share>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    /// `YYYY-MM`
    pub key: String,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

impl MonthBucket {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub buckets: Vec<MonthBucket>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    All,
    Only(TxType),
}

impl FromStr for KindFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(KindFilter::All)
        } else {
            Ok(KindFilter::Only(s.parse()?))
        }
    }
}

fn expense_breakdown<F>(transactions: &[TransactionRecord], key: F) -> Breakdown
where
    F: Fn(&TransactionRecord) -> &str,
{
    let mut groups: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.r#type == TxType::Expense) {
        *groups.entry(key(t)).or_insert(Decimal::ZERO) += t.amount;
    }
    let total: Decimal = groups.values().copied().sum();

    let mut buckets: Vec<Share> = groups
        .into_iter()
        .map(|(label, amount)| Share {
            label: label.to_string(),
            amount,
            percentage: if total.is_zero() {
                Decimal::ZERO
            } else {
                amount / total * Decimal::ONE_HUNDRED
            },
        })
        .collect();
    // stable: equal amounts keep label order
    buckets.sort_by(|a, b| b.amount.cmp(&a.amount));
    Breakdown { buckets, total }
}

/// Expense totals per category name, largest first.
pub fn by_category(transactions: &[TransactionRecord]) -> Breakdown {
    expense_breakdown(transactions, |t| t.category_name.as_str())
}

/// Expense totals per wallet name, largest first.
pub fn by_wallet(transactions: &[TransactionRecord]) -> Breakdown {
    expense_breakdown(transactions, |t| t.wallet_name.as_str())
}

/// Income and expense per calendar month, oldest first, limited to the
/// [`MONTHLY_WINDOW`] latest months that have any transaction.
pub fn monthly(transactions: &[TransactionRecord], locale: Locale) -> MonthlySummary {
    let mut months: BTreeMap<String, MonthBucket> = BTreeMap::new();
    for t in transactions {
        let (year, month) = (t.occurred_at.year(), t.occurred_at.month());
        let key = format!("{:04}-{:02}", year, month);
        let bucket = months.entry(key.clone()).or_insert_with(|| MonthBucket {
            key,
            label: locale.month_label(year, month),
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        });
        match t.r#type {
            TxType::Income => bucket.income += t.amount,
            TxType::Expense => bucket.expense += t.amount,
        }
    }

    let mut buckets: Vec<MonthBucket> = months.into_values().collect();
    if buckets.len() > MONTHLY_WINDOW {
        let skip = buckets.len() - MONTHLY_WINDOW;
        buckets = buckets.split_off(skip);
    }
    let total_income: Decimal = buckets.iter().map(|b| b.income).sum();
    let total_expense: Decimal = buckets.iter().map(|b| b.expense).sum();
    MonthlySummary {
        buckets,
        total_income,
        total_expense,
        net: total_income - total_expense,
    }
}

/// Income and expense over the whole list, as shown above the history.
pub fn totals(transactions: &[TransactionRecord]) -> Totals {
    transactions.iter().fold(
        Totals {
            count: transactions.len(),
            ..Totals::default()
        },
        |mut acc, t| {
            match t.r#type {
                TxType::Income => acc.income += t.amount,
                TxType::Expense => acc.expense += t.amount,
            }
            acc
        },
    )
}

pub fn filter_by_kind(transactions: &[TransactionRecord], filter: KindFilter) -> Vec<&TransactionRecord> {
    transactions
        .iter()
        .filter(|t| match filter {
            KindFilter::All => true,
            KindFilter::Only(kind) => t.r#type == kind,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_labels() {
        assert_eq!(Locale::En.month_label(2024, 3), "Mar 2024");
        assert_eq!(Locale::Vi.month_label(2024, 3), "thg 3, 2024");
    }

    #[test]
    fn kind_filter_parses_all() {
        assert_eq!("ALL".parse::<KindFilter>().unwrap(), KindFilter::All);
        assert_eq!(
            "income".parse::<KindFilter>().unwrap(),
            KindFilter::Only(TxType::Income)
        );
    }
}
