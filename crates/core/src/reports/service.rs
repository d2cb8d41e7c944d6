//! Report generation service.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use ledgerview_shared::types::{AccountKey, CurrencyPrecision, EntryId, JournalKey, PartnerKey};
use tracing::{info, warn};

use super::error::ReportError;
use super::formatter::{ResultFormatter, RowOrder};
use super::types::{
    AgedBalanceReport, AgedBalanceTotals, AggregateRow, DimensionBalanceReport,
    GeneralLedgerAccount, GeneralLedgerLine, GeneralLedgerReport, ReportTotals,
    TrialBalanceReport,
};
use crate::aggregate::{Aggregator, Column, GroupBy, GroupKey, Period};
use crate::aging::{AgingBuckets, NOT_DUE_LABEL};
use crate::dimension::{ProportionalResolver, Share};
use crate::filter::{PredicateBuilder, ReportSpecification, SpecPredicate, SpecificationError};
use crate::ledger::{LedgerEntry, LedgerError, RunningBalance};

/// Period line collected during the single pass of the general ledger.
struct PendingLine {
    entry_id: EntryId,
    entry_date: NaiveDate,
    partner_key: Option<PartnerKey>,
    journal_key: Option<JournalKey>,
    label: Option<String>,
    share: Share,
}

/// Service for generating financial reports from a stream of ledger entries.
///
/// Every report validates the specification, builds the entry predicate,
/// aggregates in one pass over `entries`, then formats the rows.
#[derive(Debug, Clone, Copy)]
pub struct ReportService {
    precision: CurrencyPrecision,
}

impl ReportService {
    /// Creates a service rounding and comparing amounts at `precision`.
    #[must_use]
    pub const fn new(precision: CurrencyPrecision) -> Self {
        Self { precision }
    }

    /// Currency precision used for splits and zero checks.
    #[must_use]
    pub const fn precision(&self) -> CurrencyPrecision {
        self.precision
    }

    fn aggregator(
        &self,
        spec: &ReportSpecification,
        group_by: GroupBy,
        period: Period,
    ) -> Result<Aggregator<SpecPredicate, ProportionalResolver>, ReportError> {
        let predicate = PredicateBuilder::build(spec)?;
        Ok(Aggregator::new(
            predicate,
            ProportionalResolver::new(self.precision),
            group_by,
            spec.dimensions.clone(),
            period,
        ))
    }

    fn period(spec: &ReportSpecification) -> Period {
        Period::new(spec.date_from, spec.date_to)
    }

    /// Aggregates and formats rows for an arbitrary grouping.
    ///
    /// Rows come back in group key order with the display mode applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the specification is invalid, a matching entry
    /// has a negative amount or an out-of-range dimension percentage, or an
    /// amount or total leaves the `Decimal` range.
    pub fn aggregate<I>(
        &self,
        entries: I,
        spec: &ReportSpecification,
        group_by: GroupBy,
    ) -> Result<Vec<AggregateRow>, ReportError>
    where
        I: IntoIterator,
        I::Item: Borrow<LedgerEntry>,
    {
        let rows = self
            .aggregator(spec, group_by, Self::period(spec))?
            .aggregate(entries)?;
        Ok(ResultFormatter::new(self.precision).format(
            rows.into_values(),
            spec.display_mode,
            RowOrder::GroupKey,
        ))
    }

    /// Generates a trial balance: one row per account plus totals.
    ///
    /// # Errors
    ///
    /// See [`ReportService::aggregate`].
    pub fn trial_balance<I>(
        &self,
        entries: I,
        spec: &ReportSpecification,
    ) -> Result<TrialBalanceReport, ReportError>
    where
        I: IntoIterator,
        I::Item: Borrow<LedgerEntry>,
    {
        let rows = self.aggregate(entries, spec, GroupBy::Account)?;
        let totals =
            ReportTotals::from_rows(&rows, self.precision).ok_or(ReportError::TotalsOverflow)?;

        if !totals.is_balanced {
            warn!(
                total_debit = %totals.total_debit,
                total_credit = %totals.total_credit,
                "Trial balance is not balanced"
            );
        }
        info!(accounts = rows.len(), "Generated trial balance");

        Ok(TrialBalanceReport {
            report_type: "trial_balance".to_string(),
            date_from: spec.date_from,
            date_to: spec.date_to,
            rows,
            totals,
        })
    }

    /// Generates an aged partner balance as of the aging reference date.
    ///
    /// Entries dated after the reference date are left out unless
    /// `date_to` says otherwise. Rows are ordered largest balance first.
    ///
    /// # Errors
    ///
    /// Returns `SpecificationError::MissingAgingParameters` if the
    /// specification carries no aging parameters, otherwise see
    /// [`ReportService::aggregate`].
    pub fn aged_balance<I>(
        &self,
        entries: I,
        spec: &ReportSpecification,
    ) -> Result<AgedBalanceReport, ReportError>
    where
        I: IntoIterator,
        I::Item: Borrow<LedgerEntry>,
    {
        let aging = spec.aging.ok_or(SpecificationError::MissingAgingParameters)?;
        let period = Period::new(spec.date_from, spec.date_to.or(Some(aging.reference_date)));
        let aggregator = self.aggregator(spec, GroupBy::Partner, period)?;
        let buckets = AgingBuckets::from_params(&aging)?;
        let bucket_count = buckets.count();
        let bucket_labels = buckets.labels().to_vec();

        let rows = aggregator
            .with_aging(buckets, aging.reference_date)
            .aggregate(entries)?;
        let rows = ResultFormatter::new(self.precision).format(
            rows.into_values(),
            spec.display_mode,
            RowOrder::MagnitudeDesc,
        );
        let totals =
            AgedBalanceTotals::from_rows(&rows, bucket_count).ok_or(ReportError::TotalsOverflow)?;

        info!(
            partners = rows.len(),
            reference_date = %aging.reference_date,
            "Generated aged balance"
        );

        Ok(AgedBalanceReport {
            report_type: "aged_balance".to_string(),
            reference_date: aging.reference_date,
            not_due_label: NOT_DUE_LABEL.to_string(),
            bucket_labels,
            rows,
            totals,
        })
    }

    /// Generates a balance per dimension value.
    ///
    /// With a dimension filter, only the selected values get rows; included
    /// untagged entries go to the ungrouped row. Without a filter, every value
    /// gets a row and unassigned amounts land in the ungrouped row.
    ///
    /// # Errors
    ///
    /// See [`ReportService::aggregate`].
    pub fn dimension_balance<I>(
        &self,
        entries: I,
        spec: &ReportSpecification,
    ) -> Result<DimensionBalanceReport, ReportError>
    where
        I: IntoIterator,
        I::Item: Borrow<LedgerEntry>,
    {
        let rows = self.aggregate(entries, spec, GroupBy::Dimension)?;
        let totals =
            ReportTotals::from_rows(&rows, self.precision).ok_or(ReportError::TotalsOverflow)?;

        info!(dimensions = rows.len(), "Generated dimension balance");

        Ok(DimensionBalanceReport {
            report_type: "dimension_balance".to_string(),
            date_from: spec.date_from,
            date_to: spec.date_to,
            dimensions: spec.dimensions.keys.iter().map(ToString::to_string).collect(),
            rows,
            totals,
        })
    }

    /// Generates a general ledger: per account, the opening balance, the
    /// period lines with a running balance, and the closing balance.
    ///
    /// Lines are ordered by entry date then entry id. The display mode is
    /// applied per account.
    ///
    /// # Errors
    ///
    /// See [`ReportService::aggregate`].
    pub fn general_ledger<I>(
        &self,
        entries: I,
        spec: &ReportSpecification,
    ) -> Result<GeneralLedgerReport, ReportError>
    where
        I: IntoIterator,
        I::Item: Borrow<LedgerEntry>,
    {
        let aggregator = self.aggregator(spec, GroupBy::Account, Self::period(spec))?;
        let mut rows: BTreeMap<GroupKey, AggregateRow> = BTreeMap::new();
        let mut pending: BTreeMap<GroupKey, Vec<PendingLine>> = BTreeMap::new();

        for item in entries {
            let entry = item.borrow();
            let Some(attribution) = aggregator.attribute(entry)? else {
                continue;
            };
            for (key, share) in attribution.parts {
                if attribution.column == Column::Period {
                    pending.entry(key.clone()).or_default().push(PendingLine {
                        entry_id: entry.id,
                        entry_date: entry.entry_date,
                        partner_key: entry.partner_key.clone(),
                        journal_key: entry.journal_key.clone(),
                        label: entry.label.clone(),
                        share,
                    });
                }
                rows.entry(key)
                    .or_insert_with_key(|key| AggregateRow::new(key.clone(), 0))
                    .apply(attribution.column, share, None)
                    .ok_or(LedgerError::AmountOverflow { entry_id: entry.id })?;
            }
        }

        let rows = ResultFormatter::new(self.precision).format(
            rows.into_values(),
            spec.display_mode,
            RowOrder::GroupKey,
        );
        let totals =
            ReportTotals::from_rows(&rows, self.precision).ok_or(ReportError::TotalsOverflow)?;

        let mut accounts = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(account) = row.group_key.as_str() else {
                continue;
            };
            let mut lines = pending.remove(&row.group_key).unwrap_or_default();
            lines.sort_by_key(|line| (line.entry_date, line.entry_id));
            accounts.push(Self::ledger_account(AccountKey::new(account), &row, lines)?);
        }

        info!(accounts = accounts.len(), "Generated general ledger");

        Ok(GeneralLedgerReport {
            report_type: "general_ledger".to_string(),
            date_from: spec.date_from,
            date_to: spec.date_to,
            accounts,
            totals,
        })
    }

    fn ledger_account(
        account_key: AccountKey,
        row: &AggregateRow,
        pending: Vec<PendingLine>,
    ) -> Result<GeneralLedgerAccount, LedgerError> {
        let mut balance = RunningBalance::opening(row.opening_balance);
        let mut lines = Vec::with_capacity(pending.len());
        for line in pending {
            balance = balance
                .next(line.share.net())
                .ok_or(LedgerError::AmountOverflow { entry_id: line.entry_id })?;
            lines.push(GeneralLedgerLine {
                entry_id: line.entry_id,
                entry_date: line.entry_date,
                partner_key: line.partner_key,
                journal_key: line.journal_key,
                label: line.label,
                debit: line.share.debit,
                credit: line.share.credit,
                balance,
            });
        }
        debug_assert_eq!(balance.current_balance, row.ending_balance);

        Ok(GeneralLedgerAccount {
            account_key,
            opening_balance: row.opening_balance,
            period_debit: row.period_debit,
            period_credit: row.period_credit,
            ending_balance: balance.current_balance,
            lines,
        })
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new(CurrencyPrecision::default())
    }
}

