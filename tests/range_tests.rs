// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chitieu::range::{resolve, shift, shift_by, Granularity, Step};
use chrono::{Duration, NaiveDate, NaiveDateTime};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.3f").unwrap()
}

#[test]
fn week_of_friday_runs_monday_to_sunday() {
    let r = resolve(d(2024, 3, 15), Granularity::Week);
    assert_eq!(r.start, at("2024-03-11 00:00:00.000"));
    assert_eq!(r.end, at("2024-03-17 23:59:59.999"));
    assert_eq!(r.label(), "11/03 - 17/03");
}

#[test]
fn month_and_year_bounds() {
    let feb = resolve(d(2024, 2, 10), Granularity::Month);
    assert_eq!(feb.start, at("2024-02-01 00:00:00.000"));
    assert_eq!(feb.end, at("2024-02-29 23:59:59.999"));

    let year = resolve(d(2023, 7, 4), Granularity::Year);
    assert_eq!(year.start, at("2023-01-01 00:00:00.000"));
    assert_eq!(year.end, at("2023-12-31 23:59:59.999"));

    let day = resolve(d(2024, 3, 15), Granularity::Day);
    assert_eq!(day.label(), "15/03 - 15/03");
    assert_eq!(
        day.query_dates(),
        ("2024-03-15".to_string(), "2024-03-15".to_string())
    );
}

#[test]
fn every_anchor_lies_inside_its_range() {
    let mut date = d(2023, 12, 1);
    let last = d(2025, 3, 1);
    while date <= last {
        for g in [
            Granularity::Day,
            Granularity::Week,
            Granularity::Month,
            Granularity::Year,
        ] {
            let r = resolve(date, g);
            assert!(r.start <= r.end, "{} {}", g, date);
            assert!(r.contains(date.and_hms_opt(0, 0, 0).unwrap()), "{} {}", g, date);
            assert!(r.contains(date.and_hms_milli_opt(23, 59, 59, 999).unwrap()));
            // next range starts exactly one millisecond after this one ends
            let next = resolve(shift(date, g, Step::Next), g);
            assert_eq!(next.start, r.end + Duration::milliseconds(1), "{} {}", g, date);
        }
        date += Duration::days(1);
    }
}

#[test]
fn day_and_week_shifts_round_trip() {
    let anchor = d(2024, 3, 1);
    for g in [Granularity::Day, Granularity::Week] {
        let there = shift(anchor, g, Step::Next);
        assert_eq!(shift(there, g, Step::Prev), anchor);
    }
    assert_eq!(shift(anchor, Granularity::Day, Step::Prev), d(2024, 2, 29));
}

#[test]
fn month_shift_clamps_to_month_end() {
    assert_eq!(shift(d(2024, 1, 31), Granularity::Month, Step::Next), d(2024, 2, 29));
    assert_eq!(shift(d(2023, 1, 31), Granularity::Month, Step::Next), d(2023, 2, 28));
    assert_eq!(shift(d(2024, 3, 31), Granularity::Month, Step::Prev), d(2024, 2, 29));
    assert_eq!(shift(d(2024, 2, 29), Granularity::Year, Step::Next), d(2025, 2, 28));
}

#[test]
fn offset_applies_repeated_steps() {
    assert_eq!(shift_by(d(2024, 3, 15), Granularity::Week, -1), d(2024, 3, 8));
    assert_eq!(shift_by(d(2024, 3, 15), Granularity::Month, 10), d(2025, 1, 15));
    assert_eq!(shift_by(d(2024, 3, 15), Granularity::Day, 0), d(2024, 3, 15));
}

#[test]
fn granularity_parses_case_insensitively() {
    assert_eq!("Week".parse::<Granularity>().unwrap(), Granularity::Week);
    assert!("quarter".parse::<Granularity>().is_err());
}

#[test]
fn calendar_edges_resolve_without_overflow() {
    for anchor in [NaiveDate::MIN, NaiveDate::MAX] {
        for g in [
            Granularity::Day,
            Granularity::Week,
            Granularity::Month,
            Granularity::Year,
        ] {
            let r = resolve(anchor, g);
            assert!(r.start <= r.end, "{} {}", g, anchor);
            assert!(r.contains(anchor.and_hms_opt(12, 0, 0).unwrap()), "{} {}", g, anchor);
        }
    }
    let dec = resolve(NaiveDate::MAX - Duration::days(26), Granularity::Month);
    assert_eq!(dec.end.date(), NaiveDate::MAX);
    assert_eq!(resolve(NaiveDate::MIN, Granularity::Week).start.date(), NaiveDate::MIN);
}

#[test]
fn shift_at_edges_keeps_anchor() {
    assert_eq!(shift(NaiveDate::MAX, Granularity::Day, Step::Next), NaiveDate::MAX);
    assert_eq!(shift(NaiveDate::MIN, Granularity::Month, Step::Prev), NaiveDate::MIN);
}

#[test]
fn large_offsets_are_a_single_step() {
    let anchor = d(2024, 3, 15);
    assert_eq!(shift_by(anchor, Granularity::Month, 200_000_000), anchor);
    assert_eq!(shift_by(anchor, Granularity::Year, i32::MIN), anchor);
    assert_eq!(shift_by(anchor, Granularity::Day, i32::MAX), anchor);
    assert_eq!(shift_by(d(2024, 1, 31), Granularity::Month, 2), d(2024, 3, 31));
    assert_eq!(shift_by(d(2024, 1, 31), Granularity::Month, 1), d(2024, 2, 29));
    assert_eq!(shift_by(anchor, Granularity::Week, -3), d(2024, 2, 23));
}
