//! Reference-date aging classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::specification::check_bucket_range;
use crate::filter::{AgingParams, SpecificationError};
use crate::ledger::LedgerEntry;

/// Label of the bucket holding amounts not yet past due.
pub const NOT_DUE_LABEL: &str = "Not due";

/// Where an entry falls relative to the aging reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingClass {
    /// Due date is after the reference date.
    NotDue,
    /// Index of the overdue bucket; the last index is the open-ended catch-all.
    Bucket(usize),
}

/// Fixed-width aging buckets, computed once per report run.
///
/// Bucket `i` holds amounts `i * width` to `(i + 1) * width - 1` days
/// overdue; the last bucket holds everything older.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgingBuckets {
    width_days: i64,
    count: usize,
    labels: Vec<String>,
}

impl AgingBuckets {
    /// Creates the buckets and their labels.
    ///
    /// # Errors
    ///
    /// Returns an error if width is not positive, count is outside
    /// `1..=MAX_AGING_BUCKETS`, or the oldest bucket start overflows `i64`.
    pub fn new(width_days: i64, count: i64) -> Result<Self, SpecificationError> {
        let count = check_bucket_range(width_days, count)?;

        // (count - 1) * width fits, so every bucket end below does too.
        let mut labels = Vec::with_capacity(count);
        let mut lo = 0_i64;
        for _ in 1..count {
            let next = lo + width_days;
            labels.push(format!("{lo}-{}", next - 1));
            lo = next;
        }
        labels.push(format!("{lo}+"));

        debug!(width_days, count, "Computed aging buckets");

        Ok(Self {
            width_days,
            count,
            labels,
        })
    }

    /// Creates the buckets described by aging parameters.
    pub fn from_params(params: &AgingParams) -> Result<Self, SpecificationError> {
        Self::new(params.bucket_width_days, params.bucket_count)
    }

    /// Bucket width in days.
    #[must_use]
    pub const fn width_days(&self) -> i64 {
        self.width_days
    }

    /// Number of overdue buckets.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Labels of the overdue buckets, in index order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of a class.
    #[must_use]
    pub fn label(&self, class: AgingClass) -> &str {
        match class {
            AgingClass::NotDue => NOT_DUE_LABEL,
            AgingClass::Bucket(i) => self.labels.get(i).map_or(NOT_DUE_LABEL, String::as_str),
        }
    }

    /// Classifies a due date against the reference date.
    #[must_use]
    pub fn classify_date(&self, reference_date: NaiveDate, due_date: NaiveDate) -> AgingClass {
        let days_overdue = (reference_date - due_date).num_days();
        if days_overdue < 0 {
            return AgingClass::NotDue;
        }
        let index = usize::try_from(days_overdue / self.width_days).unwrap_or(usize::MAX);
        AgingClass::Bucket(index.min(self.count - 1))
    }

    /// Classifies an entry by its due date, falling back to its entry date.
    #[must_use]
    pub fn classify(&self, entry: &LedgerEntry, reference_date: NaiveDate) -> AgingClass {
        self.classify_date(reference_date, entry.effective_due_date())
    }
}

/// Classifies one entry with ad-hoc bucket settings.
///
/// Report runs build [`AgingBuckets`] once and reuse it; this is the
/// one-shot form.
///
/// # Errors
///
/// Returns an error if the bucket settings are rejected by [`AgingBuckets::new`].
pub fn classify(
    entry: &LedgerEntry,
    reference_date: NaiveDate,
    bucket_width_days: i64,
    bucket_count: i64,
) -> Result<AgingClass, SpecificationError> {
    Ok(AgingBuckets::new(bucket_width_days, bucket_count)?.classify(entry, reference_date))
}
