// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key/value settings kept between invocations: backend URL, session and locale.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

use crate::aggregate::Locale;
use crate::api::{ClientConfig, Credential, DEFAULT_API_BASE};
use crate::utils::DEFAULT_TIMEOUT;

pub const KEY_API_BASE: &str = "api_base";
pub const KEY_TOKEN: &str = "token";
pub const KEY_USERNAME: &str = "username";
pub const KEY_LOCALE: &str = "locale";

pub const ENV_API_BASE: &str = "CHITIEU_API_BASE";

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

pub fn clear_setting(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base: String,
    pub credential: Option<Credential>,
    pub username: Option<String>,
    pub locale: Locale,
}

impl Settings {
    /// Reads stored settings. `CHITIEU_API_BASE` wins over the stored URL.
    pub fn load(conn: &Connection) -> Result<Self> {
        let api_base = match std::env::var(ENV_API_BASE) {
            Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => get_setting(conn, KEY_API_BASE)?.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        };
        let locale = match get_setting(conn, KEY_LOCALE)? {
            Some(raw) => raw.parse::<Locale>().unwrap_or_else(|e| {
                warn!(%raw, error = %e, "ignoring stored locale");
                Locale::default()
            }),
            None => Locale::default(),
        };
        Ok(Self {
            api_base,
            credential: get_setting(conn, KEY_TOKEN)?.map(Credential::new),
            username: get_setting(conn, KEY_USERNAME)?,
            locale,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base.clone(),
            credential: self.credential.clone(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub fn save_session(conn: &Connection, username: &str, credential: &Credential) -> Result<()> {
    set_setting(conn, KEY_TOKEN, credential.token())?;
    set_setting(conn, KEY_USERNAME, username)?;
    Ok(())
}

pub fn clear_session(conn: &Connection) -> Result<()> {
    clear_setting(conn, KEY_TOKEN)?;
    clear_setting(conn, KEY_USERNAME)?;
    Ok(())
}
