//! Report error types.

use thiserror::Error;

use crate::filter::SpecificationError;
use crate::ledger::LedgerError;

/// Errors that can occur during report generation.
///
/// Runs are deterministic and side-effect free: a failed run returns no
/// partial result and can simply be re-run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The specification was rejected before any entry was scanned.
    #[error("Invalid report specification: {0}")]
    InvalidSpecification(#[from] SpecificationError),

    /// A matching entry violated an engine invariant.
    #[error("Invalid ledger entry: {0}")]
    InvalidEntry(#[from] LedgerError),

    /// A report total exceeds the `Decimal` range.
    #[error("Report totals overflow")]
    TotalsOverflow,
}

impl ReportError {
    /// Returns the error code of the underlying cause.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSpecification(err) => err.error_code(),
            Self::InvalidEntry(err) => err.error_code(),
            Self::TotalsOverflow => "TOTALS_OVERFLOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_error_display() {
        let err = ReportError::from(SpecificationError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        });
        assert_eq!(
            err.to_string(),
            "Invalid report specification: \
             Invalid date range: start 2024-02-01 is after end 2024-01-01"
        );
        assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
    }

    #[test]
    fn test_error_code_delegates() {
        let err = ReportError::from(SpecificationError::InvalidBucketCount(0));
        assert_eq!(err.error_code(), "INVALID_BUCKET_COUNT");
        let err = ReportError::from(SpecificationError::MissingAgingParameters);
        assert_eq!(err.error_code(), "MISSING_AGING_PARAMETERS");
        let err = ReportError::from(SpecificationError::AgingRangeOverflow {
            width: i64::MAX,
            count: 3,
        });
        assert_eq!(err.error_code(), "AGING_RANGE_OVERFLOW");
        assert_eq!(ReportError::TotalsOverflow.error_code(), "TOTALS_OVERFLOW");
    }
}
