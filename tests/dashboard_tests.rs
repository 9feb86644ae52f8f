// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chitieu::aggregate::Locale;
use chitieu::dashboard::{Dashboard, Snapshot};
use chitieu::models::{TransactionRecord, TxType, WalletOverview};
use chitieu::overview::derive_overview;
use chitieu::range::{DateRange, Granularity, Step};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn expense(id: i64, amount: i64, category: &str) -> TransactionRecord {
    TransactionRecord {
        id,
        amount: Decimal::from(amount),
        r#type: TxType::Expense,
        description: None,
        category_name: category.to_string(),
        wallet_name: "Cash".to_string(),
        occurred_at: d(2024, 3, 10).and_hms_opt(9, 0, 0).unwrap(),
    }
}

fn snapshot(range: Option<DateRange>, txs: Vec<TransactionRecord>) -> Snapshot {
    Snapshot {
        range,
        transactions: txs,
        overview: WalletOverview::default(),
    }
}

#[test]
fn latest_load_wins() {
    let mut board = Dashboard::new(d(2024, 3, 15), Granularity::Month, Locale::En);
    let (first, march) = board.begin();
    let (second, april) = board.navigate(Step::Next);
    assert_eq!(april.label(), "01/04 - 30/04");
    assert!(!board.is_current(first));
    assert!(board.is_current(second));

    assert!(board.apply(second, snapshot(Some(april), vec![expense(2, 20, "Rent")])));
    // the slow response for the old range arrives late
    assert!(!board.apply(first, snapshot(Some(march), vec![expense(1, 10, "Food")])));
    assert_eq!(board.snapshot().transactions[0].id, 2);
    assert_eq!(board.report().label.as_deref(), Some("01/04 - 30/04"));
}

#[test]
fn older_ticket_applies_when_nothing_newer_has() {
    let mut board = Dashboard::new(d(2024, 3, 15), Granularity::Week, Locale::En);
    let (first, week) = board.begin();
    let (_second, _) = board.set_granularity(Granularity::Day);
    assert!(board.apply(first, snapshot(Some(week), vec![expense(1, 10, "Food")])));
    assert!(!board.apply(first, snapshot(Some(week), Vec::new())));
    assert_eq!(board.snapshot().transactions.len(), 1);

    // the report describes the week that was loaded, not the day now selected
    let report = board.report();
    assert_eq!(report.range, Some(week));
    assert_eq!(report.label.as_deref(), Some("11/03 - 17/03"));
}

#[test]
fn unbounded_load_reports_no_range() {
    let mut board = Dashboard::new(d(2024, 3, 15), Granularity::Month, Locale::En);
    let (ticket, _) = board.begin();
    board.apply(ticket, snapshot(None, vec![expense(1, 10, "Food")]));

    let report = board.report();
    assert!(report.range.is_none());
    assert!(report.label.is_none());
    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("range").is_none());
    assert!(json.get("label").is_none());
    assert_eq!(json["totals"]["count"], 1);
}

#[test]
fn report_reflects_applied_snapshot() {
    let mut board = Dashboard::new(d(2024, 3, 15), Granularity::Month, Locale::Vi);
    let (ticket, range) = board.begin();
    board.apply(
        ticket,
        Snapshot {
            range: Some(range),
            transactions: vec![expense(1, 150, "Food"), expense(2, 25, "Transport")],
            overview: WalletOverview {
                total_expense: Some(Decimal::from(175)),
                expense_count: Some(2),
                ..WalletOverview::default()
            },
        },
    );
    let report = board.report();
    assert_eq!(report.label.as_deref(), Some("01/03 - 31/03"));
    assert_eq!(report.by_category.total, Decimal::from(175));
    assert_eq!(report.by_wallet.buckets.len(), 1);
    assert_eq!(report.monthly.buckets[0].label, "thg 3, 2024");
    assert_eq!(report.overview.avg_expense, Decimal::new(875, 1));
    assert_eq!(report.totals.count, 2);
}

#[test]
fn overview_defaults_and_averages() {
    let o = derive_overview(&WalletOverview::default());
    assert_eq!(o.total_income, Decimal::ZERO);
    assert_eq!(o.avg_expense, Decimal::ZERO);
    assert_eq!(o.net_balance, Decimal::ZERO);

    let o = derive_overview(&WalletOverview {
        total_income: Some(Decimal::from(3000)),
        total_expense: Some(Decimal::from(900)),
        income_count: Some(2),
        expense_count: Some(0),
        net_balance: None,
    });
    assert_eq!(o.avg_income, Decimal::from(1500));
    assert_eq!(o.avg_expense, Decimal::ZERO);
    assert_eq!(o.net_balance, Decimal::from(2100));
}

#[test]
fn reported_net_balance_is_kept() {
    let o = derive_overview(&WalletOverview {
        total_income: Some(Decimal::from(100)),
        total_expense: Some(Decimal::from(40)),
        net_balance: Some(Decimal::from(75)),
        ..WalletOverview::default()
    });
    assert_eq!(o.net_balance, Decimal::from(75));
}
