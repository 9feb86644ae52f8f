// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::commands::{range_from_matches, today};
use crate::models::TransactionRecord;
use anyhow::{bail, Result};
use serde_json::json;
use std::path::Path;
use tracing::info;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(client, sub),
        _ => Ok(()),
    }
}

fn export_transactions(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let range = range_from_matches(sub, today())?;

    let mut records = client.fetch_transactions(range.as_ref())?;
    records.sort_by(|a, b| a.occurred_at.cmp(&b.occurred_at).then(a.id.cmp(&b.id)));
    write_transactions(&records, &fmt, Path::new(out))?;
    println!("Exported {} transactions to {}", records.len(), out);
    Ok(())
}

/// Writes records oldest first as `csv` or `json`.
pub fn write_transactions(records: &[TransactionRecord], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "type", "amount", "category", "wallet", "description",
            ])?;
            for t in records {
                wtr.write_record([
                    t.id.to_string(),
                    t.occurred_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    t.r#type.to_string(),
                    t.amount.to_string(),
                    t.category_name.clone(),
                    t.wallet_name.clone(),
                    t.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = records
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.occurred_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
                        "type": t.r#type,
                        "amount": t.amount.to_string(),
                        "category": t.category_name,
                        "wallet": t.wallet_name,
                        "description": t.description,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    info!(path = %out.display(), count = records.len(), "transactions exported");
    Ok(())
}
