//! Ledger entry domain types.

use chrono::NaiveDate;
use ledgerview_shared::types::{AccountKey, DimensionKey, EntryId, JournalKey, PartnerKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use crate::dimension::DimensionDistribution;

/// Classification of the account an entry posts to.
///
/// Aged balance reports select entries by kind: customers owe on
/// receivable accounts, suppliers are owed on payable accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Amounts owed by customers.
    Receivable,
    /// Amounts owed to suppliers.
    Payable,
    /// Any other account.
    #[default]
    Other,
}

/// A single posted (or draft) line of the ledger, as supplied by the entry source.
///
/// Entries are immutable snapshots for the duration of a report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Identifier assigned by the entry source.
    pub id: EntryId,
    /// The account this entry posts to.
    pub account_key: AccountKey,
    /// Kind of the account.
    #[serde(default)]
    pub account_kind: AccountKind,
    /// Counterparty, if any.
    #[serde(default)]
    pub partner_key: Option<PartnerKey>,
    /// Journal the entry was posted through.
    #[serde(default)]
    pub journal_key: Option<JournalKey>,
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Maturity date; `entry_date` is used when absent.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Debit amount (non-negative).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (non-negative).
    #[serde(default)]
    pub credit: Decimal,
    /// Whether the entry belongs to a finalized transaction.
    pub posted: bool,
    /// Proportional split across dimension values.
    #[serde(default)]
    pub dimension_distribution: Option<DimensionDistribution>,
    /// Free-text label shown on general ledger lines.
    #[serde(default)]
    pub label: Option<String>,
}

impl LedgerEntry {
    /// Creates a posted entry with zero amounts.
    #[must_use]
    pub fn new(id: u64, account_key: impl Into<AccountKey>, entry_date: NaiveDate) -> Self {
        Self {
            id: EntryId(id),
            account_key: account_key.into(),
            account_kind: AccountKind::Other,
            partner_key: None,
            journal_key: None,
            entry_date,
            due_date: None,
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            posted: true,
            dimension_distribution: None,
            label: None,
        }
    }

    /// Sets the debit amount.
    #[must_use]
    pub fn with_debit(mut self, debit: Decimal) -> Self {
        self.debit = debit;
        self
    }

    /// Sets the credit amount.
    #[must_use]
    pub fn with_credit(mut self, credit: Decimal) -> Self {
        self.credit = credit;
        self
    }

    /// Sets the partner.
    #[must_use]
    pub fn with_partner(mut self, partner: impl Into<PartnerKey>) -> Self {
        self.partner_key = Some(partner.into());
        self
    }

    /// Sets the journal.
    #[must_use]
    pub fn with_journal(mut self, journal: impl Into<JournalKey>) -> Self {
        self.journal_key = Some(journal.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the account kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: AccountKind) -> Self {
        self.account_kind = kind;
        self
    }

    /// Marks the entry as draft.
    #[must_use]
    pub const fn draft(mut self) -> Self {
        self.posted = false;
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Adds one dimension key with its percentage to the distribution.
    #[must_use]
    pub fn with_dimension(mut self, key: impl Into<DimensionKey>, percentage: Decimal) -> Self {
        self.dimension_distribution
            .get_or_insert_with(DimensionDistribution::default)
            .insert(key.into(), percentage);
        self
    }

    /// Due date used for aging, falling back to the entry date.
    #[must_use]
    pub fn effective_due_date(&self) -> NaiveDate {
        self.due_date.unwrap_or(self.entry_date)
    }

    /// Net amount: debit minus credit.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns true if the entry contributes nothing to any aggregate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }

    /// Returns true if the entry carries at least one dimension tag.
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        self.dimension_distribution
            .as_ref()
            .is_some_and(|d| !d.is_empty())
    }

    /// Checks the amount and distribution invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if debit or credit is negative, or a percentage lies
    /// outside `0..=100`.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.debit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount {
                entry_id: self.id,
                side: "debit",
                amount: self.debit,
            });
        }
        if self.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount {
                entry_id: self.id,
                side: "credit",
                amount: self.credit,
            });
        }
        if let Some(distribution) = &self.dimension_distribution {
            if let Some((key, percentage)) = distribution.out_of_range() {
                return Err(LedgerError::InvalidPercentage {
                    entry_id: self.id,
                    key: key.clone(),
                    percentage,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_effective_due_date_falls_back_to_entry_date() {
        let entry = LedgerEntry::new(1, "121000", date(2024, 1, 5));
        assert_eq!(entry.effective_due_date(), date(2024, 1, 5));

        let entry = entry.with_due_date(date(2024, 2, 4));
        assert_eq!(entry.effective_due_date(), date(2024, 2, 4));
    }

    #[test]
    fn test_net_and_empty() {
        let entry = LedgerEntry::new(1, "400100", date(2024, 1, 5))
            .with_debit(dec!(100))
            .with_credit(dec!(0.01));
        assert_eq!(entry.net(), dec!(99.99));
        assert!(!entry.is_empty());
        assert!(LedgerEntry::new(2, "400100", date(2024, 1, 5)).is_empty());
    }

    #[test]
    fn test_is_tagged() {
        let entry = LedgerEntry::new(1, "600000", date(2024, 1, 5));
        assert!(!entry.is_tagged());
        let entry = entry.with_dimension("WH-A", dec!(100));
        assert!(entry.is_tagged());
    }

    #[test]
    fn test_validate_rejects_negative_amounts() {
        let entry = LedgerEntry::new(7, "400100", date(2024, 1, 5)).with_debit(dec!(-1));
        let err = entry.validate().unwrap_err();
        assert_eq!(err.error_code(), "NEGATIVE_AMOUNT");
        assert_eq!(
            err.to_string(),
            "Entry 7 has a negative debit amount: -1"
        );

        let entry = LedgerEntry::new(8, "400100", date(2024, 1, 5)).with_credit(dec!(-0.5));
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_percentage() {
        let entry = LedgerEntry::new(9, "600000", date(2024, 1, 5))
            .with_debit(dec!(10))
            .with_dimension("WH-A", dec!(120));
        let err = entry.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PERCENTAGE");
    }

    #[test]
    fn test_validate_accepts_partial_distribution() {
        let entry = LedgerEntry::new(10, "600000", date(2024, 1, 5))
            .with_debit(dec!(10))
            .with_dimension("WH-A", dec!(30))
            .with_dimension("WH-B", dec!(20));
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "id": 3,
            "account_key": "121000",
            "entry_date": "2024-01-05",
            "debit": "150.00",
            "posted": true,
            "dimension_distribution": {"WH-A": "60", "WH-B": 40}
        }"#;
        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, EntryId(3));
        assert_eq!(entry.account_kind, AccountKind::Other);
        assert_eq!(entry.debit, dec!(150.00));
        assert_eq!(entry.credit, Decimal::ZERO);
        assert!(entry.partner_key.is_none());
        let distribution = entry.dimension_distribution.unwrap();
        assert_eq!(distribution.percentage("WH-B"), Some(dec!(40)));
    }
}
