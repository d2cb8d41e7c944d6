//! Report specification: the immutable input of one report run.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use ledgerview_shared::types::{AccountKey, DimensionKey, JournalKey};

use super::error::SpecificationError;
use crate::dimension::{DimensionFilter, UntaggedPolicy};
use crate::ledger::AccountKind;
use crate::reports::DisplayMode;

/// Largest accepted number of aging buckets.
pub const MAX_AGING_BUCKETS: i64 = 1000;

/// Checks bucket width and count, returning the count as a length.
///
/// Width must be positive and count within `1..=MAX_AGING_BUCKETS`. The
/// start of the oldest bucket, `(count - 1) * width` days, must fit in `i64`.
pub(crate) fn check_bucket_range(
    width_days: i64,
    count: i64,
) -> Result<usize, SpecificationError> {
    if width_days <= 0 {
        return Err(SpecificationError::InvalidBucketWidth(width_days));
    }
    if !(1..=MAX_AGING_BUCKETS).contains(&count) {
        return Err(SpecificationError::InvalidBucketCount(count));
    }
    (count - 1)
        .checked_mul(width_days)
        .ok_or(SpecificationError::AgingRangeOverflow {
            width: width_days,
            count,
        })?;
    usize::try_from(count).map_err(|_| SpecificationError::InvalidBucketCount(count))
}

/// Aging configuration for aged balance reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgingParams {
    /// Date against which days overdue are counted.
    pub reference_date: NaiveDate,
    /// Width of each bucket in days.
    pub bucket_width_days: i64,
    /// Number of buckets; the last is open-ended.
    pub bucket_count: i64,
}

impl AgingParams {
    /// Creates aging parameters.
    #[must_use]
    pub const fn new(reference_date: NaiveDate, bucket_width_days: i64, bucket_count: i64) -> Self {
        Self {
            reference_date,
            bucket_width_days,
            bucket_count,
        }
    }

    /// Checks that width is positive, count is within `1..=MAX_AGING_BUCKETS`
    /// and the oldest bucket boundary fits in a day count.
    pub fn validate(&self) -> Result<(), SpecificationError> {
        check_bucket_range(self.bucket_width_days, self.bucket_count).map(|_| ())
    }
}

/// What to include in a report and how to present it.
///
/// Empty key sets mean "match all", never "match none".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSpecification {
    /// Inclusive lower bound on `entry_date`.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on `entry_date`.
    pub date_to: Option<NaiveDate>,
    /// Accounts to include (empty = all).
    pub account_keys: BTreeSet<AccountKey>,
    /// Journals to include (empty = all).
    pub journal_keys: BTreeSet<JournalKey>,
    /// Account kinds to include (empty = all).
    pub account_kinds: BTreeSet<AccountKind>,
    /// Only count entries of posted transactions.
    pub posted_only: bool,
    /// Dimension filter; inactive when it has no keys.
    pub dimensions: DimensionFilter,
    /// Accumulate entries before `date_from` into the opening balance.
    ///
    /// When false those entries are excluded altogether.
    pub with_opening_balance: bool,
    /// Post-aggregation row filter.
    pub display_mode: DisplayMode,
    /// Aging configuration, for aged balance reports only.
    pub aging: Option<AgingParams>,
}

impl Default for ReportSpecification {
    fn default() -> Self {
        Self {
            date_from: None,
            date_to: None,
            account_keys: BTreeSet::new(),
            journal_keys: BTreeSet::new(),
            account_kinds: BTreeSet::new(),
            posted_only: true,
            dimensions: DimensionFilter::default(),
            with_opening_balance: true,
            display_mode: DisplayMode::All,
            aging: None,
        }
    }
}

impl ReportSpecification {
    /// Creates a specification matching every posted entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive date range.
    #[must_use]
    pub const fn with_period(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Adds an account to the account filter.
    #[must_use]
    pub fn with_account(mut self, key: impl Into<AccountKey>) -> Self {
        self.account_keys.insert(key.into());
        self
    }

    /// Adds a journal to the journal filter.
    #[must_use]
    pub fn with_journal(mut self, key: impl Into<JournalKey>) -> Self {
        self.journal_keys.insert(key.into());
        self
    }

    /// Adds an account kind to the kind filter.
    #[must_use]
    pub fn with_account_kind(mut self, kind: AccountKind) -> Self {
        self.account_kinds.insert(kind);
        self
    }

    /// Sets whether only posted entries count.
    #[must_use]
    pub const fn posted_only(mut self, posted_only: bool) -> Self {
        self.posted_only = posted_only;
        self
    }

    /// Adds a dimension value to the dimension filter.
    #[must_use]
    pub fn with_dimension(mut self, key: impl Into<DimensionKey>) -> Self {
        self.dimensions.keys.insert(key.into());
        self
    }

    /// Sets the untagged policy of the dimension filter.
    #[must_use]
    pub const fn with_untagged_policy(mut self, policy: UntaggedPolicy) -> Self {
        self.dimensions.untagged = policy;
        self
    }

    /// Sets whether entries before `date_from` form an opening balance.
    #[must_use]
    pub const fn with_opening_balance(mut self, enabled: bool) -> Self {
        self.with_opening_balance = enabled;
        self
    }

    /// Sets the display mode.
    #[must_use]
    pub const fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    /// Sets the aging parameters.
    #[must_use]
    pub const fn with_aging(mut self, aging: AgingParams) -> Self {
        self.aging = Some(aging);
        self
    }

    /// Checks the specification before any entry is scanned.
    ///
    /// # Errors
    ///
    /// Returns an error if `date_from > date_to`, or the aging buckets are
    /// rejected by [`AgingParams::validate`].
    pub fn validate(&self) -> Result<(), SpecificationError> {
        if let (Some(start), Some(end)) = (self.date_from, self.date_to) {
            if start > end {
                return Err(SpecificationError::InvalidDateRange { start, end });
            }
        }
        if let Some(aging) = &self.aging {
            aging.validate()?;
        }
        Ok(())
    }
}
