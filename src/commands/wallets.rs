// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::models::{Wallet, WalletRequest, WalletType};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::{bail, Context, Result};

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let wallets = client.wallets()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &wallets)? {
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Name", "Type", "Balance", "Description"],
                        wallet_rows(&wallets)
                    )
                );
            }
        }
        Some(("add", sub)) => {
            let req = build_request(sub)?;
            let created = client.create_wallet(&req)?;
            println!(
                "Added wallet '{}' ({}, balance {})",
                created.name,
                created.r#type,
                fmt_money(&created.balance)
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete_wallet(id)?;
            println!("Removed wallet {} and its transactions", id);
        }
        _ => {}
    }
    Ok(())
}

pub fn build_request(sub: &clap::ArgMatches) -> Result<WalletRequest> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    if name.is_empty() {
        bail!("Wallet name must not be empty");
    }
    let raw_balance = sub.get_one::<String>("balance").unwrap();
    let balance = parse_amount(raw_balance)
        .with_context(|| format!("Invalid opening balance '{}'", raw_balance))?;
    let r#type: WalletType = sub.get_one::<String>("type").unwrap().parse()?;
    let optional = |key: &str| {
        sub.get_one::<String>(key)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    };
    Ok(WalletRequest {
        name,
        balance,
        r#type,
        icon_url: optional("icon_url"),
        description: optional("description"),
    })
}

pub fn wallet_rows(wallets: &[Wallet]) -> Vec<Vec<String>> {
    wallets
        .iter()
        .map(|w| {
            vec![
                w.id.to_string(),
                w.name.clone(),
                w.r#type.to_string(),
                fmt_money(&w.balance),
                w.description.clone().unwrap_or_default(),
            ]
        })
        .collect()
}
