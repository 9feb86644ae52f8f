// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, KindFilter};
use crate::api::ApiClient;
use crate::commands::{range_from_matches, today};
use crate::models::{TransactionRecord, TransactionRequest, TxType};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::{bail, Context, Result};
use serde::Serialize;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn build_request(sub: &clap::ArgMatches) -> Result<TransactionRequest> {
    let raw = sub.get_one::<String>("amount").unwrap();
    let amount = parse_amount(raw).with_context(|| format!("Invalid amount '{}'", raw))?;
    if amount.is_zero() {
        bail!("Amount must be greater than zero");
    }
    let r#type: TxType = sub.get_one::<String>("type").unwrap().parse()?;
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    Ok(TransactionRequest {
        amount,
        description,
        wallet_id: *sub.get_one::<i64>("wallet_id").unwrap(),
        category_id: *sub.get_one::<i64>("category_id").unwrap(),
        r#type,
    })
}

fn add(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let req = build_request(sub)?;
    client.create_transaction(&req)?;
    println!(
        "Recorded {} {} (wallet {}, category {})",
        req.r#type,
        fmt_money(&req.amount),
        req.wallet_id,
        req.category_id
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: TxType,
    pub amount: String,
    pub category: String,
    pub wallet: String,
    pub description: String,
}

/// Newest first, filtered by kind and optionally truncated.
pub fn history_rows(
    records: &[TransactionRecord],
    filter: KindFilter,
    limit: Option<usize>,
) -> Vec<TransactionRow> {
    let mut shown = aggregate::filter_by_kind(records, filter);
    shown.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at).then(b.id.cmp(&a.id)));
    shown
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|t| TransactionRow {
            id: t.id,
            date: t.occurred_at.format("%Y-%m-%d %H:%M").to_string(),
            r#type: t.r#type,
            amount: match t.r#type {
                TxType::Income => format!("+{}", fmt_money(&t.amount)),
                TxType::Expense => format!("-{}", fmt_money(&t.amount)),
            },
            category: t.category_name.clone(),
            wallet: t.wallet_name.clone(),
            description: t.description.clone().unwrap_or_default(),
        })
        .collect()
}

fn list(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let range = range_from_matches(sub, today())?;
    let filter: KindFilter = sub.get_one::<String>("type").unwrap().parse()?;
    let limit = sub.get_one::<usize>("limit").copied();

    let records = client.fetch_transactions(range.as_ref())?;
    let data = history_rows(&records, filter, limit);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }

    let totals = aggregate::totals(&records);
    if let Some(r) = &range {
        println!("{} {}", r.granularity, r.label());
    }
    println!(
        "Income +{}   Expense -{}   Records {}",
        fmt_money(&totals.income),
        fmt_money(&totals.expense),
        totals.count
    );
    let rows: Vec<Vec<String>> = data
        .into_iter()
        .map(|r| vec![r.date, r.category, r.wallet, r.amount, r.description])
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Category", "Wallet", "Amount", "Description"], rows)
    );
    Ok(())
}
