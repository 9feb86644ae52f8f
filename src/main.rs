// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use chitieu::api::ApiClient;
use chitieu::settings::Settings;
use chitieu::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let settings = Settings::load(&conn)?;
    let client = ApiClient::new(settings.client_config())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("auth", sub)) => commands::auth::handle(&conn, &client, sub)?,
        Some(("wallet", sub)) => commands::wallets::handle(&client, sub)?,
        Some(("category", sub)) => commands::categories::handle(&client, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&client, sub)?,
        Some(("report", sub)) => commands::reports::handle(&client, settings.locale, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&client, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
