//! Report data types.

use chrono::NaiveDate;
use ledgerview_shared::types::{AccountKey, CurrencyPrecision, EntryId, JournalKey, PartnerKey};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{Column, GroupKey};
use crate::aging::AgingClass;
use crate::dimension::Share;
use crate::ledger::RunningBalance;

/// Grouped monetary summary for one account, partner, or dimension value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    /// What the row represents.
    pub group_key: GroupKey,
    /// Net of entries strictly before the period start.
    pub opening_balance: Decimal,
    /// Debits within the period.
    pub period_debit: Decimal,
    /// Credits within the period.
    pub period_credit: Decimal,
    /// `opening_balance + period_debit - period_credit`.
    pub ending_balance: Decimal,
    /// Signed sums per overdue bucket (aged reports only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aging_buckets: Vec<Decimal>,
    /// Signed sum not yet past the reference date (aged reports only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_due: Option<Decimal>,
}

impl AggregateRow {
    /// Creates an empty row with `bucket_count` aging buckets.
    ///
    /// The not-due column exists only when `bucket_count > 0`.
    #[must_use]
    pub fn new(group_key: GroupKey, bucket_count: usize) -> Self {
        Self {
            group_key,
            opening_balance: Decimal::ZERO,
            period_debit: Decimal::ZERO,
            period_credit: Decimal::ZERO,
            ending_balance: Decimal::ZERO,
            aging_buckets: vec![Decimal::ZERO; bucket_count],
            not_due: (bucket_count > 0).then_some(Decimal::ZERO),
        }
    }

    /// Adds one share to the row.
    ///
    /// Returns `None` if a column would overflow; the row is then unusable.
    #[must_use = "an overflowed row must not be reported"]
    pub fn apply(&mut self, column: Column, share: Share, aging: Option<AgingClass>) -> Option<()> {
        match column {
            Column::Opening => {
                self.opening_balance = self.opening_balance.checked_add(share.net())?;
            }
            Column::Period => {
                self.period_debit = self.period_debit.checked_add(share.debit)?;
                self.period_credit = self.period_credit.checked_add(share.credit)?;
            }
        }
        match aging {
            Some(AgingClass::NotDue) => {
                if let Some(not_due) = self.not_due.as_mut() {
                    *not_due = not_due.checked_add(share.net())?;
                }
            }
            Some(AgingClass::Bucket(i)) => {
                if let Some(bucket) = self.aging_buckets.get_mut(i) {
                    *bucket = bucket.checked_add(share.net())?;
                }
            }
            None => {}
        }
        self.finalize()
    }

    /// Recomputes the ending balance from the other columns.
    ///
    /// Returns `None` if the ending balance does not fit in a `Decimal`.
    #[must_use = "an overflowed row must not be reported"]
    pub fn finalize(&mut self) -> Option<()> {
        // Both period columns are non-negative, so their difference cannot overflow.
        self.ending_balance = self
            .opening_balance
            .checked_add(self.period_debit - self.period_credit)?;
        Some(())
    }

    /// Sum of the not-due amount and all aging buckets, or `None` on overflow.
    #[must_use]
    pub fn aging_total(&self) -> Option<Decimal> {
        self.aging_buckets
            .iter()
            .try_fold(self.not_due.unwrap_or_default(), |acc, bucket| acc.checked_add(*bucket))
    }

    /// Returns true if the ending balance rounds to zero.
    #[must_use]
    pub fn is_zero_balance(&self, precision: CurrencyPrecision) -> bool {
        precision.is_zero(self.ending_balance)
    }

    /// Returns true if the row has period debits or credits.
    #[must_use]
    pub fn has_movement(&self, precision: CurrencyPrecision) -> bool {
        !precision.is_zero(self.period_debit) || !precision.is_zero(self.period_credit)
    }
}

/// Column totals of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    /// Sum of opening balances.
    pub total_opening: Decimal,
    /// Sum of period debits.
    pub total_debit: Decimal,
    /// Sum of period credits.
    pub total_credit: Decimal,
    /// Sum of ending balances.
    pub total_ending: Decimal,
    /// Whether period debits equal period credits at currency precision.
    pub is_balanced: bool,
}

impl ReportTotals {
    /// Sums the rows' columns, or returns `None` if a total overflows.
    #[must_use]
    pub fn from_rows<'a>(
        rows: impl IntoIterator<Item = &'a AggregateRow>,
        precision: CurrencyPrecision,
    ) -> Option<Self> {
        let mut totals = rows.into_iter().try_fold(Self::default(), |acc, row| {
            Some(Self {
                total_opening: acc.total_opening.checked_add(row.opening_balance)?,
                total_debit: acc.total_debit.checked_add(row.period_debit)?,
                total_credit: acc.total_credit.checked_add(row.period_credit)?,
                total_ending: acc.total_ending.checked_add(row.ending_balance)?,
                is_balanced: false,
            })
        })?;
        totals.is_balanced = precision.is_zero(totals.total_debit - totals.total_credit);
        Some(totals)
    }
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize)]
pub struct TrialBalanceReport {
    /// Report type identifier.
    pub report_type: String,
    /// Period start.
    pub date_from: Option<NaiveDate>,
    /// Period end.
    pub date_to: Option<NaiveDate>,
    /// One row per account.
    pub rows: Vec<AggregateRow>,
    /// Totals over the displayed rows.
    pub totals: ReportTotals,
}

/// Dimension balance report.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionBalanceReport {
    /// Report type identifier.
    pub report_type: String,
    /// Period start.
    pub date_from: Option<NaiveDate>,
    /// Period end.
    pub date_to: Option<NaiveDate>,
    /// Dimension values selected, empty when unfiltered.
    pub dimensions: Vec<String>,
    /// One row per dimension value.
    pub rows: Vec<AggregateRow>,
    /// Totals over the displayed rows.
    pub totals: ReportTotals,
}

/// Aging totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgedBalanceTotals {
    /// Sum of not-due amounts.
    pub not_due: Decimal,
    /// Sum per overdue bucket.
    pub buckets: Vec<Decimal>,
    /// Grand total of all buckets.
    pub total: Decimal,
}

impl AgedBalanceTotals {
    /// Sums the rows' aging columns, or returns `None` if a total overflows.
    #[must_use]
    pub fn from_rows<'a>(
        rows: impl IntoIterator<Item = &'a AggregateRow>,
        bucket_count: usize,
    ) -> Option<Self> {
        let mut totals = Self {
            buckets: vec![Decimal::ZERO; bucket_count],
            ..Self::default()
        };
        for row in rows {
            totals.not_due = totals.not_due.checked_add(row.not_due.unwrap_or_default())?;
            for (total, amount) in totals.buckets.iter_mut().zip(&row.aging_buckets) {
                *total = total.checked_add(*amount)?;
            }
        }
        totals.total = totals
            .buckets
            .iter()
            .try_fold(totals.not_due, |acc, bucket| acc.checked_add(*bucket))?;
        Some(totals)
    }
}

/// Aged partner balance report.
#[derive(Debug, Clone, Serialize)]
pub struct AgedBalanceReport {
    /// Report type identifier.
    pub report_type: String,
    /// Date days overdue are counted against.
    pub reference_date: NaiveDate,
    /// Label of the not-due column.
    pub not_due_label: String,
    /// Labels of the overdue buckets.
    pub bucket_labels: Vec<String>,
    /// One row per partner.
    pub rows: Vec<AggregateRow>,
    /// Aging totals over the displayed rows.
    pub totals: AgedBalanceTotals,
}

/// One detail line of the general ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralLedgerLine {
    /// Source entry.
    pub entry_id: EntryId,
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Counterparty.
    pub partner_key: Option<PartnerKey>,
    /// Journal.
    pub journal_key: Option<JournalKey>,
    /// Entry label.
    pub label: Option<String>,
    /// Attributable debit.
    pub debit: Decimal,
    /// Attributable credit.
    pub credit: Decimal,
    /// Balance before and after this line.
    pub balance: RunningBalance,
}

/// One account section of the general ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralLedgerAccount {
    /// The account.
    pub account_key: AccountKey,
    /// Net before the period start.
    pub opening_balance: Decimal,
    /// Period lines ordered by date then entry id.
    pub lines: Vec<GeneralLedgerLine>,
    /// Sum of line debits.
    pub period_debit: Decimal,
    /// Sum of line credits.
    pub period_credit: Decimal,
    /// Balance after the last line.
    pub ending_balance: Decimal,
}

/// General ledger report.
#[derive(Debug, Clone, Serialize)]
pub struct GeneralLedgerReport {
    /// Report type identifier.
    pub report_type: String,
    /// Period start.
    pub date_from: Option<NaiveDate>,
    /// Period end.
    pub date_to: Option<NaiveDate>,
    /// Account sections in account order.
    pub accounts: Vec<GeneralLedgerAccount>,
    /// Totals over the displayed accounts.
    pub totals: ReportTotals,
}
