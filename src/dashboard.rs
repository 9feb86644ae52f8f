// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Statistics view state with last-request-wins loading.
//!
//! Every load is tagged with a [`Ticket`]. A result is only applied when no newer
//! ticket has already been applied, so a slow response for an old range can never
//! replace data for a range the user moved to afterwards.

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{self, Breakdown, Locale, MonthlySummary, Totals};
use crate::models::{TransactionRecord, WalletOverview};
use crate::overview::{derive_overview, Overview};
use crate::range::{self, DateRange, Granularity, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Data loaded for one ticket. `range` is the range the load was issued for, `None`
/// when every transaction was requested.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub range: Option<DateRange>,
    pub transactions: Vec<TransactionRecord>,
    pub overview: WalletOverview,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub overview: Overview,
    pub totals: Totals,
    pub by_category: Breakdown,
    pub by_wallet: Breakdown,
    pub monthly: MonthlySummary,
}

#[derive(Debug)]
pub struct Dashboard {
    anchor: NaiveDate,
    granularity: Granularity,
    locale: Locale,
    issued: u64,
    applied: u64,
    snapshot: Snapshot,
}

impl Dashboard {
    pub fn new(anchor: NaiveDate, granularity: Granularity, locale: Locale) -> Self {
        Self {
            anchor,
            granularity,
            locale,
            issued: 0,
            applied: 0,
            snapshot: Snapshot::default(),
        }
    }

    pub fn range(&self) -> DateRange {
        range::resolve(self.anchor, self.granularity)
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Starts a load for the current range.
    pub fn begin(&mut self) -> (Ticket, DateRange) {
        self.issued += 1;
        (Ticket(self.issued), self.range())
    }

    pub fn navigate(&mut self, step: Step) -> (Ticket, DateRange) {
        self.anchor = range::shift(self.anchor, self.granularity, step);
        self.begin()
    }

    pub fn set_granularity(&mut self, granularity: Granularity) -> (Ticket, DateRange) {
        self.granularity = granularity;
        self.begin()
    }

    /// Stores `snapshot` unless a newer load has already been applied.
    pub fn apply(&mut self, ticket: Ticket, snapshot: Snapshot) -> bool {
        if ticket.0 <= self.applied {
            tracing::debug!(ticket = ticket.0, applied = self.applied, "discarding superseded load");
            return false;
        }
        self.applied = ticket.0;
        self.snapshot = snapshot;
        true
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn report(&self) -> Report {
        let range = self.snapshot.range;
        let txs = &self.snapshot.transactions;
        Report {
            label: range.as_ref().map(DateRange::label),
            range,
            overview: derive_overview(&self.snapshot.overview),
            totals: aggregate::totals(txs),
            by_category: aggregate::by_category(txs),
            by_wallet: aggregate::by_wallet(txs),
            monthly: aggregate::monthly(txs, self.locale),
        }
    }
}
