//! Translation of a report specification into an entry predicate.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use ledgerview_shared::types::{AccountKey, JournalKey};
use tracing::debug;

use super::specification::ReportSpecification;
use crate::dimension::DimensionFilter;
use crate::ledger::{AccountKind, LedgerEntry};
use crate::reports::ReportError;

/// Boolean test deciding whether an entry takes part in a report run.
pub trait EntryPredicate {
    /// Returns true if the entry should be aggregated.
    fn matches(&self, entry: &LedgerEntry) -> bool;
}

impl<F> EntryPredicate for F
where
    F: Fn(&LedgerEntry) -> bool,
{
    fn matches(&self, entry: &LedgerEntry) -> bool {
        self(entry)
    }
}

/// Predicate built from a [`ReportSpecification`].
///
/// Checks run cheapest first: dates, posted flag, then set membership,
/// then dimension tags.
#[derive(Debug, Clone)]
pub struct SpecPredicate {
    lower_bound: Option<NaiveDate>,
    upper_bound: Option<NaiveDate>,
    posted_only: bool,
    accounts: BTreeSet<AccountKey>,
    journals: BTreeSet<JournalKey>,
    kinds: BTreeSet<AccountKind>,
    dimensions: DimensionFilter,
}

impl EntryPredicate for SpecPredicate {
    fn matches(&self, entry: &LedgerEntry) -> bool {
        if self.lower_bound.is_some_and(|from| entry.entry_date < from) {
            return false;
        }
        if self.upper_bound.is_some_and(|to| entry.entry_date > to) {
            return false;
        }
        if self.posted_only && !entry.posted {
            return false;
        }
        if !self.accounts.is_empty() && !self.accounts.contains(&entry.account_key) {
            return false;
        }
        if !self.journals.is_empty()
            && !entry
                .journal_key
                .as_ref()
                .is_some_and(|j| self.journals.contains(j))
        {
            return false;
        }
        if !self.kinds.is_empty() && !self.kinds.contains(&entry.account_kind) {
            return false;
        }
        self.dimensions.admits(entry)
    }
}

/// Builds entry predicates from report specifications.
pub struct PredicateBuilder;

impl PredicateBuilder {
    /// Validates `spec` and converts it into a predicate.
    ///
    /// Entries before `date_from` are kept when the opening balance is
    /// enabled; the aggregator routes them to the opening column.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidSpecification` before any entry is scanned
    /// if the specification is invalid.
    pub fn build(spec: &ReportSpecification) -> Result<SpecPredicate, ReportError> {
        spec.validate()?;

        let lower_bound = if spec.with_opening_balance {
            None
        } else {
            spec.date_from
        };

        debug!(
            date_from = ?spec.date_from,
            date_to = ?spec.date_to,
            accounts = spec.account_keys.len(),
            journals = spec.journal_keys.len(),
            dimensions = spec.dimensions.keys.len(),
            posted_only = spec.posted_only,
            "Built entry predicate"
        );

        Ok(SpecPredicate {
            lower_bound,
            upper_bound: spec.date_to,
            posted_only: spec.posted_only,
            accounts: spec.account_keys.clone(),
            journals: spec.journal_keys.clone(),
            kinds: spec.account_kinds.clone(),
            dimensions: spec.dimensions.clone(),
        })
    }
}
