// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::WalletOverview;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    pub income_count: u64,
    pub expense_count: u64,
    pub avg_income: Decimal,
    pub avg_expense: Decimal,
}

fn average(total: Decimal, count: u64) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

/// Fills absent totals with zero and derives the averages.
///
/// A `netBalance` sent by the backend is kept as-is; otherwise it is income minus
/// expense.
pub fn derive_overview(raw: &WalletOverview) -> Overview {
    let total_income = raw.total_income.unwrap_or_default();
    let total_expense = raw.total_expense.unwrap_or_default();
    let income_count = raw.income_count.unwrap_or_default();
    let expense_count = raw.expense_count.unwrap_or_default();
    Overview {
        total_income,
        total_expense,
        net_balance: raw.net_balance.unwrap_or(total_income - total_expense),
        income_count,
        expense_count,
        avg_income: average(total_income, income_count),
        avg_expense: average(total_expense, expense_count),
    }
}
