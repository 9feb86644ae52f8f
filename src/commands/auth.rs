// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::settings::{clear_session, save_session};
use crate::utils::pretty_table;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let username = sub.get_one::<String>("username").unwrap().trim();
            let password = sub.get_one::<String>("password").unwrap();
            let credential = client
                .login(username, password)
                .with_context(|| format!("Login as '{}' failed", username))?;
            save_session(conn, username, &credential)?;
            println!("Logged in as {} ({})", username, client.base_url());
        }
        Some(("register", sub)) => {
            let email = sub.get_one::<String>("email").unwrap().trim();
            let username = sub.get_one::<String>("username").unwrap().trim();
            let password = sub.get_one::<String>("password").unwrap();
            client
                .register(email, username, password)
                .context("Registration failed")?;
            println!("Registered '{}'; run `chitieu auth login` to start a session", username);
        }
        Some(("logout", _)) => {
            clear_session(conn)?;
            println!("Logged out");
        }
        Some(("whoami", _)) => {
            let me = client.profile()?;
            let rows = vec![vec![
                me.id.to_string(),
                me.username,
                me.fullname.unwrap_or_default(),
                me.email.unwrap_or_default(),
                me.role.unwrap_or_default(),
            ]];
            println!(
                "{}",
                pretty_table(&["ID", "Username", "Full name", "Email", "Role"], rows)
            );
        }
        _ => {}
    }
    Ok(())
}
