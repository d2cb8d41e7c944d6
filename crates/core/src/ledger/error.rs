//! Ledger entry error types.

use ledgerview_shared::types::{DimensionKey, EntryId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when a ledger entry violates an engine invariant.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Debit or credit is below zero.
    #[error("Entry {entry_id} has a negative {side} amount: {amount}")]
    NegativeAmount {
        /// The offending entry.
        entry_id: EntryId,
        /// `debit` or `credit`.
        side: &'static str,
        /// The negative amount.
        amount: Decimal,
    },

    /// A distribution percentage lies outside `0..=100`.
    #[error("Entry {entry_id} assigns {percentage}% to dimension {key}")]
    InvalidPercentage {
        /// The offending entry.
        entry_id: EntryId,
        /// The dimension key carrying the percentage.
        key: DimensionKey,
        /// The out-of-range percentage.
        percentage: Decimal,
    },

    /// Adding the entry to a report column exceeds the `Decimal` range.
    #[error("Entry {entry_id} overflows the report amounts")]
    AmountOverflow {
        /// The entry whose amount could not be added.
        entry_id: EntryId,
    },
}

impl LedgerError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::InvalidPercentage { .. } => "INVALID_PERCENTAGE",
            Self::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
        }
    }

    /// Returns the entry the error refers to.
    #[must_use]
    pub fn entry_id(&self) -> EntryId {
        match self {
            Self::NegativeAmount { entry_id, .. }
            | Self::InvalidPercentage { entry_id, .. }
            | Self::AmountOverflow { entry_id } => *entry_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        let err = LedgerError::NegativeAmount {
            entry_id: EntryId(1),
            side: "credit",
            amount: dec!(-5),
        };
        assert_eq!(err.error_code(), "NEGATIVE_AMOUNT");
        assert_eq!(err.entry_id(), EntryId(1));

        let err = LedgerError::InvalidPercentage {
            entry_id: EntryId(2),
            key: DimensionKey::new("WH-A"),
            percentage: dec!(-10),
        };
        assert_eq!(err.error_code(), "INVALID_PERCENTAGE");
        assert_eq!(err.entry_id(), EntryId(2));

        let err = LedgerError::AmountOverflow { entry_id: EntryId(3) };
        assert_eq!(err.error_code(), "AMOUNT_OVERFLOW");
        assert_eq!(err.entry_id(), EntryId(3));
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::InvalidPercentage {
            entry_id: EntryId(2),
            key: DimensionKey::new("WH-A"),
            percentage: dec!(150),
        };
        assert_eq!(err.to_string(), "Entry 2 assigns 150% to dimension WH-A");
    }
}
