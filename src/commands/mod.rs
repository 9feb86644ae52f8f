// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod categories;
pub mod config;
pub mod exporter;
pub mod reports;
pub mod transactions;
pub mod wallets;

use anyhow::Result;
use chrono::NaiveDate;

use crate::range::{self, DateRange, Granularity};
use crate::utils::parse_date;

/// Resolves `--granularity/--anchor/--offset`. `None` when no granularity was given.
pub fn range_from_matches(sub: &clap::ArgMatches, today: NaiveDate) -> Result<Option<DateRange>> {
    let Some(raw) = sub.get_one::<String>("granularity") else {
        return Ok(None);
    };
    let granularity: Granularity = raw.parse()?;
    let anchor = match sub.get_one::<String>("anchor") {
        Some(s) => parse_date(s)?,
        None => today,
    };
    let offset = sub.get_one::<i32>("offset").copied().unwrap_or(0);
    let anchor = range::shift_by(anchor, granularity, offset);
    Ok(Some(range::resolve(anchor, granularity)))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
