// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::Locale;
use crate::settings::{set_setting, Settings, KEY_API_BASE, KEY_LOCALE};
use crate::utils::pretty_table;
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(conn)?,
        Some(("set-api", sub)) => {
            let url = set_api(conn, sub.get_one::<String>("url").unwrap())?;
            println!("API base set to {}", url);
        }
        Some(("set-locale", sub)) => {
            let locale: Locale = sub.get_one::<String>("locale").unwrap().parse()?;
            set_setting(conn, KEY_LOCALE, locale.as_str())?;
            println!("Locale set to {}", locale);
        }
        _ => {}
    }
    Ok(())
}

/// Stores a trimmed base URL without its trailing slash.
pub fn set_api(conn: &Connection, raw: &str) -> Result<String> {
    let url = raw.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("API base '{}' must start with http:// or https://", url);
    }
    set_setting(conn, KEY_API_BASE, url)?;
    Ok(url.to_string())
}

fn show(conn: &Connection) -> Result<()> {
    let s = Settings::load(conn)?;
    let rows = vec![
        vec!["api_base".to_string(), s.api_base.clone()],
        vec![
            "user".to_string(),
            s.username.clone().unwrap_or_else(|| "(not logged in)".into()),
        ],
        vec![
            "session".to_string(),
            if s.credential.is_some() { "active" } else { "none" }.to_string(),
        ],
        vec!["locale".to_string(), s.locale.to_string()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
