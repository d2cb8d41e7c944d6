//! Attribution of entry amounts to dimension values.

use std::ops::{Add, AddAssign, Sub};

use ledgerview_shared::types::{CurrencyPrecision, DimensionKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::allocation::allocate_by_weights;
use super::filter::{DimensionFilter, UntaggedPolicy};
use crate::ledger::{LedgerEntry, LedgerError};

/// Debit and credit attributable to one aggregate after dimension resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// Attributable debit.
    pub debit: Decimal,
    /// Attributable credit.
    pub credit: Decimal,
}

impl Share {
    /// A share carrying nothing.
    pub const ZERO: Self = Self {
        debit: Decimal::ZERO,
        credit: Decimal::ZERO,
    };

    /// Creates a share.
    #[must_use]
    pub const fn new(debit: Decimal, credit: Decimal) -> Self {
        Self { debit, credit }
    }

    /// The entry's full debit and credit.
    #[must_use]
    pub fn full(entry: &LedgerEntry) -> Self {
        Self::new(entry.debit, entry.credit)
    }

    /// Debit minus credit.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns true if both sides are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }
}

impl Add for Share {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.debit + rhs.debit, self.credit + rhs.credit)
    }
}

impl AddAssign for Share {
    fn add_assign(&mut self, rhs: Self) {
        self.debit += rhs.debit;
        self.credit += rhs.credit;
    }
}

impl Sub for Share {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.debit - rhs.debit, self.credit - rhs.credit)
    }
}

/// Interprets an entry's dimension distribution under a filter.
///
/// This is the single point where distributions are read; the aggregator
/// calls it for every entry so filtered and unfiltered runs share one path.
///
/// Both methods fail with `LedgerError::AmountOverflow` when a scaled
/// amount does not fit in a `Decimal`.
pub trait DimensionResolver {
    /// Debit and credit of `entry` attributable to the filter's keys.
    fn resolve(&self, entry: &LedgerEntry, filter: &DimensionFilter)
    -> Result<Share, LedgerError>;

    /// Splits `entry` across individual dimension values.
    ///
    /// `None` stands for the ungrouped remainder. Parts sum to the entry's
    /// full amount when the filter is inactive.
    fn split(
        &self,
        entry: &LedgerEntry,
        filter: &DimensionFilter,
    ) -> Result<Vec<(Option<DimensionKey>, Share)>, LedgerError>;
}

/// `amount * percentage / 100`, or `None` if the result does not fit.
fn percent_of(amount: Decimal, percentage: Decimal) -> Option<Decimal> {
    // Multiply before dividing so the percentage is never truncated.
    match amount.checked_mul(percentage) {
        Some(product) => Some(product / Decimal::ONE_HUNDRED),
        None => amount.checked_mul(percentage / Decimal::ONE_HUNDRED),
    }
}

/// Resolver applying the distribution percentages proportionally, without normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalResolver {
    precision: CurrencyPrecision,
}

impl ProportionalResolver {
    /// Creates a resolver rounding shares to `precision`.
    #[must_use]
    pub const fn new(precision: CurrencyPrecision) -> Self {
        Self { precision }
    }

    /// Precision shares are rounded to.
    #[must_use]
    pub const fn precision(&self) -> CurrencyPrecision {
        self.precision
    }

    fn scaled(&self, entry: &LedgerEntry, percentage: Decimal) -> Result<Share, LedgerError> {
        let scale = |amount| {
            percent_of(amount, percentage)
                .map(|scaled| self.precision.round(scaled))
                .ok_or(LedgerError::AmountOverflow { entry_id: entry.id })
        };
        Ok(Share::new(scale(entry.debit)?, scale(entry.credit)?))
    }
}

impl DimensionResolver for ProportionalResolver {
    fn resolve(
        &self,
        entry: &LedgerEntry,
        filter: &DimensionFilter,
    ) -> Result<Share, LedgerError> {
        if !filter.is_active() {
            return Ok(Share::full(entry));
        }
        match &entry.dimension_distribution {
            Some(distribution) if !distribution.is_empty() => {
                self.scaled(entry, distribution.matching_percentage(&filter.keys))
            }
            _ => Ok(match filter.untagged {
                UntaggedPolicy::Exclude => Share::ZERO,
                UntaggedPolicy::IncludeFull => Share::full(entry),
            }),
        }
    }

    fn split(
        &self,
        entry: &LedgerEntry,
        filter: &DimensionFilter,
    ) -> Result<Vec<(Option<DimensionKey>, Share)>, LedgerError> {
        let full = Share::full(entry);

        let Some(distribution) = entry
            .dimension_distribution
            .as_ref()
            .filter(|d| !d.is_empty())
        else {
            return Ok(if filter.is_active() && filter.untagged == UntaggedPolicy::Exclude {
                vec![]
            } else {
                vec![(None, full)]
            });
        };

        let weighted: Vec<(&DimensionKey, Decimal)> = if filter.is_active() {
            distribution.matching(&filter.keys).collect()
        } else {
            distribution.iter().collect()
        };
        if weighted.is_empty() {
            return Ok(vec![]);
        }

        let assigned = if filter.is_active() {
            self.resolve(entry, filter)?
        } else {
            self.scaled(entry, distribution.total_percentage())?
        };

        let weights: Vec<Decimal> = weighted.iter().map(|(_, p)| *p).collect();
        let places = self.precision.decimal_places();
        let debits = allocate_by_weights(assigned.debit, &weights, places);
        let credits = allocate_by_weights(assigned.credit, &weights, places);

        let mut parts: Vec<(Option<DimensionKey>, Share)> = weighted
            .iter()
            .zip(debits.into_iter().zip(credits))
            .map(|((key, _), (debit, credit))| (Some((*key).clone()), Share::new(debit, credit)))
            .collect();

        if !filter.is_active() {
            let residue = full - assigned;
            if !residue.is_zero() {
                parts.push((None, residue));
            }
        }
        Ok(parts)
    }
}
