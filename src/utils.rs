// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::ops::RangeInclusive;
use std::sync::Once;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

const UA: &str = concat!(
    "chitieu/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/chitieu)"
);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

static TRACING_INIT: Once = Once::new();

/// Installs the fmt subscriber; `RUST_LOG` overrides the default `chitieu=warn`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("chitieu=warn"));
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}

pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// Years accepted on the command line.
pub const DATE_YEARS: RangeInclusive<i32> = 1..=9999;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let d = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))?;
    if !DATE_YEARS.contains(&d.year()) {
        bail!(
            "Date '{}' is out of range, years {}-{} are supported",
            s.trim(),
            DATE_YEARS.start(),
            DATE_YEARS.end()
        );
    }
    Ok(d)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,
    #[error("Invalid amount '{0}'")]
    InvalidFormat(String),
    #[error("Amount must not be negative (got {0})")]
    Negative(Decimal),
}

// Characters an amount field accepts while typing.
static AMOUNT_MASK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\d.,-]").expect("amount mask is a valid pattern"));

/// Parses a typed amount such as `1,250,000` or `45.5 đ`.
///
/// Currency symbols and spaces are ignored and `,` is read as a grouping
/// separator. Anything left that is not a plain decimal is rejected.
pub fn parse_amount(input: &str) -> Result<Decimal, AmountError> {
    let masked = AMOUNT_MASK.replace_all(input, "");
    let cleaned: String = masked.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(AmountError::Empty);
    }
    let value = cleaned
        .parse::<Decimal>()
        .map_err(|_| AmountError::InvalidFormat(input.trim().to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountError::Negative(value));
    }
    Ok(value)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d)
}

/// Horizontal bar for a percentage in `0..=100`.
pub fn share_bar(percentage: Decimal, width: usize) -> String {
    let pct = percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (pct * Decimal::from(width) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    format!("{}{}", "█".repeat(filled), "·".repeat(width - filled))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(share_bar(Decimal::new(50, 0), 10), "█████·····");
        assert_eq!(share_bar(Decimal::ZERO, 4), "····");
        assert_eq!(share_bar(Decimal::new(250, 0), 4), "████");
    }

    #[test]
    fn amount_accepts_grouping_and_symbols() {
        assert_eq!(parse_amount("1,250,000").unwrap(), Decimal::new(1_250_000, 0));
        assert_eq!(parse_amount(" 45.5 đ").unwrap(), Decimal::new(455, 1));
        assert_eq!(parse_amount("-0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn amount_rejections() {
        assert_eq!(parse_amount("  "), Err(AmountError::Empty));
        assert_eq!(parse_amount("abc"), Err(AmountError::Empty));
        assert_eq!(
            parse_amount("1.000.000"),
            Err(AmountError::InvalidFormat("1.000.000".into()))
        );
        assert!(matches!(parse_amount("-12"), Err(AmountError::Negative(_))));
    }

    #[test]
    fn dates_outside_supported_years_are_rejected() {
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("+262142-12-31").is_err());
        assert!(parse_date("10000-01-01").is_err());
        assert!(parse_date("0000-12-31").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn money_has_two_places() {
        assert_eq!(fmt_money(&Decimal::new(150, 0)), "150.00");
    }
}
