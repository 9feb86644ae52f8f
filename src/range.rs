// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar ranges for the statistics and history views.
//!
//! A range is resolved from an anchor date and a granularity. Both ends are
//! inclusive local wall-clock instants with millisecond precision.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Granularity::Day => "DAY",
            Granularity::Week => "WEEK",
            Granularity::Month => "MONTH",
            Granularity::Year => "YEAR",
        };
        f.write_str(s)
    }
}

impl FromStr for Granularity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            other => Err(anyhow!(
                "Invalid granularity '{}', expected day|week|month|year",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub granularity: Granularity,
}

impl DateRange {
    /// `DD/MM - DD/MM` from the first and last day of the range.
    pub fn label(&self) -> String {
        format!("{} - {}", self.start.format("%d/%m"), self.end.format("%d/%m"))
    }

    /// Inclusive `YYYY-MM-DD` bounds sent to the backend. Time of day is dropped.
    pub fn query_dates(&self) -> (String, String) {
        (
            self.start.date().format("%Y-%m-%d").to_string(),
            self.end.date().format("%Y-%m-%d").to_string(),
        )
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn day_end(date: NaiveDate) -> NaiveDateTime {
    day_start(date)
        .checked_add_signed(Duration::days(1) - Duration::milliseconds(1))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Ranges at the edges of chrono's calendar are cut at `NaiveDate::MIN`/`MAX`.
pub fn resolve(anchor: NaiveDate, granularity: Granularity) -> DateRange {
    let (first, last) = match granularity {
        Granularity::Day => (anchor, anchor),
        Granularity::Week => {
            // 0 = Sunday, so Monday is (weekday + 6) % 7 days back
            let back = (anchor.weekday().num_days_from_sunday() + 6) % 7;
            let monday = anchor
                .checked_sub_signed(Duration::days(back as i64))
                .unwrap_or(NaiveDate::MIN);
            let sunday = monday
                .checked_add_signed(Duration::days(6))
                .unwrap_or(NaiveDate::MAX);
            (monday, sunday)
        }
        Granularity::Month => {
            let first = anchor.with_day(1).unwrap_or(anchor);
            let last = first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(NaiveDate::MAX);
            (first, last)
        }
        Granularity::Year => {
            let first = NaiveDate::from_ymd_opt(anchor.year(), 1, 1).unwrap_or(NaiveDate::MIN);
            let last = NaiveDate::from_ymd_opt(anchor.year(), 12, 31).unwrap_or(NaiveDate::MAX);
            (first, last)
        }
    };
    DateRange {
        start: day_start(first),
        end: day_end(last),
        granularity,
    }
}

fn unit_days(granularity: Granularity) -> Option<i64> {
    match granularity {
        Granularity::Day => Some(1),
        Granularity::Week => Some(7),
        Granularity::Month | Granularity::Year => None,
    }
}

fn unit_months(granularity: Granularity) -> u32 {
    match granularity {
        Granularity::Year => 12,
        _ => 1,
    }
}

/// Moves the anchor one unit of `granularity`.
///
/// Months and years clamp to the last valid day, so Jan 31 + 1 month is the end of
/// February and Feb 29 + 1 year is Feb 28. A result outside chrono's calendar leaves
/// the anchor unchanged.
pub fn shift(anchor: NaiveDate, granularity: Granularity, step: Step) -> NaiveDate {
    let offset = match step {
        Step::Prev => -1,
        Step::Next => 1,
    };
    shift_by(anchor, granularity, offset)
}

/// Moves the anchor `offset` units in one calendar step, backwards for negative
/// offsets. Jan 31 + 2 months is Mar 31; out-of-range results leave the anchor
/// unchanged.
pub fn shift_by(anchor: NaiveDate, granularity: Granularity, offset: i32) -> NaiveDate {
    let shifted = match unit_days(granularity) {
        Some(days) => Duration::try_days(offset as i64 * days)
            .and_then(|delta| anchor.checked_add_signed(delta)),
        None => offset
            .unsigned_abs()
            .checked_mul(unit_months(granularity))
            .and_then(|n| {
                if offset < 0 {
                    anchor.checked_sub_months(Months::new(n))
                } else {
                    anchor.checked_add_months(Months::new(n))
                }
            }),
    };
    shifted.unwrap_or(anchor)
}
