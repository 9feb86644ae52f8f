// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, Breakdown, Locale, MonthlySummary};
use crate::api::ApiClient;
use crate::commands::{range_from_matches, today};
use crate::dashboard::{Dashboard, Snapshot};
use crate::overview::{derive_overview, Overview};
use crate::range::Granularity;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, share_bar};
use anyhow::{anyhow, Result};

const BAR_WIDTH: usize = 20;

pub fn handle(client: &ApiClient, locale: Locale, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("range", sub)) => range(sub)?,
        Some(("by-category", sub)) => {
            let txs = client.fetch_transactions(range_from_matches(sub, today())?.as_ref())?;
            print_breakdown(sub, "Category", &aggregate::by_category(&txs))?;
        }
        Some(("by-wallet", sub)) => {
            let txs = client.fetch_transactions(range_from_matches(sub, today())?.as_ref())?;
            print_breakdown(sub, "Wallet", &aggregate::by_wallet(&txs))?;
        }
        Some(("monthly", sub)) => {
            let txs = client.fetch_transactions(range_from_matches(sub, today())?.as_ref())?;
            let summary = aggregate::monthly(&txs, locale);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
                print_monthly(&summary);
            }
        }
        Some(("overview", sub)) => {
            let overview = derive_overview(&client.wallet_overview()?);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &overview)? {
                println!("{}", pretty_table(&["Metric", "Value"], overview_rows(&overview)));
            }
        }
        Some(("dashboard", sub)) => dashboard(client, locale, sub)?,
        _ => {}
    }
    Ok(())
}

fn range(sub: &clap::ArgMatches) -> Result<()> {
    let r = range_from_matches(sub, today())?
        .ok_or_else(|| anyhow!("--granularity is required"))?;
    let rows = vec![vec![
        r.granularity.to_string(),
        r.start.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        r.end.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        r.label(),
    ]];
    println!("{}", pretty_table(&["Granularity", "Start", "End", "Label"], rows));
    Ok(())
}

pub fn breakdown_rows(b: &Breakdown) -> Vec<Vec<String>> {
    b.buckets
        .iter()
        .map(|s| {
            vec![
                s.label.clone(),
                fmt_money(&s.amount),
                s.percent_display(),
                share_bar(s.percentage, BAR_WIDTH),
            ]
        })
        .collect()
}

fn print_breakdown(sub: &clap::ArgMatches, dimension: &str, b: &Breakdown) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), b)? {
        return Ok(());
    }
    if b.buckets.is_empty() {
        println!("No expenses in this period");
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(&[dimension, "Spent", "Share", ""], breakdown_rows(b))
    );
    println!("Total spent: {}", fmt_money(&b.total));
    Ok(())
}

pub fn monthly_rows(summary: &MonthlySummary) -> Vec<Vec<String>> {
    summary
        .buckets
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                fmt_money(&b.income),
                fmt_money(&b.expense),
                fmt_money(&b.net()),
            ]
        })
        .collect()
}

fn print_monthly(summary: &MonthlySummary) {
    if summary.buckets.is_empty() {
        println!("No transactions");
        return;
    }
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Net"], monthly_rows(summary))
    );
    println!(
        "Income {}   Expense {}   Net {}",
        fmt_money(&summary.total_income),
        fmt_money(&summary.total_expense),
        fmt_money(&summary.net)
    );
}

pub fn overview_rows(o: &Overview) -> Vec<Vec<String>> {
    vec![
        vec!["Total expense".into(), fmt_money(&o.total_expense)],
        vec!["Expense transactions".into(), o.expense_count.to_string()],
        vec!["Total income".into(), fmt_money(&o.total_income)],
        vec!["Income transactions".into(), o.income_count.to_string()],
        vec!["Average expense".into(), fmt_money(&o.avg_expense)],
        vec!["Average income".into(), fmt_money(&o.avg_income)],
        vec!["Net balance".into(), fmt_money(&o.net_balance)],
    ]
}

/// Loads transactions and the overview side by side, then prints every view.
fn dashboard(client: &ApiClient, locale: Locale, sub: &clap::ArgMatches) -> Result<()> {
    let range = range_from_matches(sub, today())?;
    let (anchor, granularity) = match &range {
        Some(r) => (r.start.date(), r.granularity),
        None => (today(), Granularity::Month),
    };
    let mut board = Dashboard::new(anchor, granularity, locale);
    let (ticket, _) = board.begin();

    let (txs, raw) = std::thread::scope(|s| {
        let txs = s.spawn(|| client.fetch_transactions(range.as_ref()));
        let raw = s.spawn(|| client.wallet_overview());
        (txs.join(), raw.join())
    });
    let transactions = txs.map_err(|_| anyhow!("transaction loader panicked"))??;
    let overview = raw.map_err(|_| anyhow!("overview loader panicked"))??;
    board.apply(
        ticket,
        Snapshot {
            range,
            transactions,
            overview,
        },
    );

    let report = board.report();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    if let Some(r) = &report.range {
        println!("{} {}", r.granularity, r.label());
    }
    println!("{}", pretty_table(&["Metric", "Value"], overview_rows(&report.overview)));
    if !report.by_category.buckets.is_empty() {
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Share", ""], breakdown_rows(&report.by_category))
        );
    }
    if !report.by_wallet.buckets.is_empty() {
        println!(
            "{}",
            pretty_table(&["Wallet", "Spent", "Share", ""], breakdown_rows(&report.by_wallet))
        );
    }
    print_monthly(&report.monthly);
    Ok(())
}
