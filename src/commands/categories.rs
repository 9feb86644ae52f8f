// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::KindFilter;
use crate::api::ApiClient;
use crate::models::{Category, CategoryRequest};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{anyhow, bail, Result};

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let filter: KindFilter = sub.get_one::<String>("type").unwrap().parse()?;
            let shown = filter_categories(client.categories()?, filter);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shown)? {
                let rows = shown
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.clone(),
                            c.r#type.to_string(),
                            if c.is_system() { "system" } else { "custom" }.to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "Type", "Owner"], rows));
            }
        }
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            if name.is_empty() {
                bail!("Category name must not be empty");
            }
            let r#type = sub.get_one::<String>("type").unwrap().parse()?;
            let created = client.create_category(&CategoryRequest { name, r#type })?;
            println!("Added category '{}' ({})", created.name, created.r#type);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let all = client.categories()?;
            ensure_deletable(&all, id)?;
            client.delete_category(id)?;
            println!("Removed category {}", id);
        }
        _ => {}
    }
    Ok(())
}

pub fn filter_categories(categories: Vec<Category>, filter: KindFilter) -> Vec<Category> {
    match filter {
        KindFilter::All => categories,
        KindFilter::Only(kind) => categories.into_iter().filter(|c| c.r#type == kind).collect(),
    }
}

/// System categories (no owner) belong to every user and cannot be removed.
pub fn ensure_deletable(categories: &[Category], id: i64) -> Result<()> {
    let cat = categories
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| anyhow!("Category {} not found", id))?;
    if cat.is_system() {
        bail!("Category '{}' is a default category and cannot be removed", cat.name);
    }
    Ok(())
}
