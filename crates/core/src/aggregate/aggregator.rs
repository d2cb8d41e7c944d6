//! Streaming aggregation of ledger entries into grouped rows.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::group::{GroupBy, GroupKey};
use crate::aging::{AgingBuckets, AgingClass};
use crate::dimension::{DimensionFilter, DimensionResolver, Share};
use crate::filter::EntryPredicate;
use crate::ledger::{LedgerEntry, LedgerError};
use crate::reports::{AggregateRow, ReportError};

/// Inclusive reporting period; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// First day of the period.
    pub from: Option<NaiveDate>,
    /// Last day of the period.
    pub to: Option<NaiveDate>,
}

/// Column an entry's amount accumulates into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Before the period start.
    Opening,
    /// Within the period.
    Period,
}

impl Period {
    /// Creates a period.
    #[must_use]
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Column for a date, or `None` if the date is after the period.
    #[must_use]
    pub fn locate(&self, date: NaiveDate) -> Option<Column> {
        if self.to.is_some_and(|to| date > to) {
            return None;
        }
        if self.from.is_some_and(|from| date < from) {
            Some(Column::Opening)
        } else {
            Some(Column::Period)
        }
    }
}

/// How one entry contributes to the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    /// Opening or period column.
    pub column: Column,
    /// Aging class, when aging is configured.
    pub aging: Option<AgingClass>,
    /// Row keys and the share each receives.
    pub parts: Vec<(GroupKey, Share)>,
}

/// Groups entries and accumulates opening, period, and aging sums.
///
/// The predicate and resolver are injected, so variant behavior is chosen
/// by composition. Amounts are `Decimal`, so sums are exact and do not
/// depend on entry order; rows come back in `GroupKey` order.
pub struct Aggregator<P, R> {
    predicate: P,
    resolver: R,
    group_by: GroupBy,
    dimensions: DimensionFilter,
    period: Period,
    aging: Option<(AgingBuckets, NaiveDate)>,
}

impl<P, R> Aggregator<P, R>
where
    P: EntryPredicate,
    R: DimensionResolver,
{
    /// Creates an aggregator.
    #[must_use]
    pub fn new(
        predicate: P,
        resolver: R,
        group_by: GroupBy,
        dimensions: DimensionFilter,
        period: Period,
    ) -> Self {
        Self {
            predicate,
            resolver,
            group_by,
            dimensions,
            period,
            aging: None,
        }
    }

    /// Enables aging against `reference_date`.
    #[must_use]
    pub fn with_aging(mut self, buckets: AgingBuckets, reference_date: NaiveDate) -> Self {
        self.aging = Some((buckets, reference_date));
        self
    }

    /// Grouping dimension.
    #[must_use]
    pub const fn group_by(&self) -> GroupBy {
        self.group_by
    }

    /// Reporting period.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Aging buckets, when aging is configured.
    #[must_use]
    pub fn buckets(&self) -> Option<&AgingBuckets> {
        self.aging.as_ref().map(|(buckets, _)| buckets)
    }

    /// Works out how one entry contributes, or `None` if it does not.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidEntry` if a matching entry violates the
    /// amount or percentage invariants, or its dimension share overflows.
    pub fn attribute(&self, entry: &LedgerEntry) -> Result<Option<Attribution>, ReportError> {
        if !self.predicate.matches(entry) {
            return Ok(None);
        }
        entry.validate()?;
        if entry.is_empty() {
            return Ok(None);
        }
        let Some(column) = self.period.locate(entry.entry_date) else {
            return Ok(None);
        };

        let parts: Vec<(GroupKey, Share)> = match self.group_by {
            GroupBy::Account | GroupBy::Partner => {
                let share = self.resolver.resolve(entry, &self.dimensions)?;
                vec![(GroupKey::of_entry(entry, self.group_by), share)]
            }
            GroupBy::Dimension => self
                .resolver
                .split(entry, &self.dimensions)?
                .into_iter()
                .map(|(key, share)| {
                    (key.map_or(GroupKey::Ungrouped, |k| GroupKey::key(k.into_inner())), share)
                })
                .collect(),
        };
        let parts: Vec<(GroupKey, Share)> =
            parts.into_iter().filter(|(_, share)| !share.is_zero()).collect();
        if parts.is_empty() {
            return Ok(None);
        }

        let aging = self
            .aging
            .as_ref()
            .map(|(buckets, reference)| buckets.classify(entry, *reference));

        Ok(Some(Attribution {
            column,
            aging,
            parts,
        }))
    }

    /// Consumes `entries` once and returns one row per group key.
    ///
    /// The sequence must be finite; it is iterated exactly once.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidEntry` on the first matching entry that
    /// violates the amount or percentage invariants, or whose amounts push a
    /// row column out of the `Decimal` range.
    pub fn aggregate<I>(&self, entries: I) -> Result<BTreeMap<GroupKey, AggregateRow>, ReportError>
    where
        I: IntoIterator,
        I::Item: Borrow<LedgerEntry>,
    {
        let bucket_count = self.buckets().map_or(0, AgingBuckets::count);
        let mut rows: BTreeMap<GroupKey, AggregateRow> = BTreeMap::new();
        let mut scanned = 0usize;
        let mut attributed = 0usize;

        for item in entries {
            scanned += 1;
            let entry = item.borrow();
            let Some(attribution) = self.attribute(entry)? else {
                continue;
            };
            attributed += 1;

            for (key, share) in attribution.parts {
                rows.entry(key)
                    .or_insert_with_key(|key| AggregateRow::new(key.clone(), bucket_count))
                    .apply(attribution.column, share, attribution.aging)
                    .ok_or(LedgerError::AmountOverflow { entry_id: entry.id })?;
            }
        }

        debug!(
            scanned,
            attributed,
            rows = rows.len(),
            group_by = ?self.group_by,
            "Aggregated ledger entries"
        );

        Ok(rows)
    }
}
