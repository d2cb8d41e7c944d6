//! Specification error types.

use chrono::NaiveDate;
use thiserror::Error;

use super::specification::MAX_AGING_BUCKETS;

/// Reasons a report specification is rejected before any entry is scanned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecificationError {
    /// `date_from` is after `date_to`.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Aging bucket width is zero or negative.
    #[error("Aging bucket width must be positive, got {0} days")]
    InvalidBucketWidth(i64),

    /// Aging bucket count is zero, negative, or above the supported maximum.
    #[error("Aging bucket count must be between 1 and {max}, got {0}", max = MAX_AGING_BUCKETS)]
    InvalidBucketCount(i64),

    /// The oldest bucket would start beyond the representable number of days.
    #[error("Aging buckets of {width} days x {count} overflow the day range")]
    AgingRangeOverflow {
        /// Bucket width in days.
        width: i64,
        /// Bucket count.
        count: i64,
    },

    /// An aging report was requested without aging parameters.
    #[error("Aging parameters are required for an aged balance report")]
    MissingAgingParameters,
}

impl SpecificationError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::InvalidBucketWidth(_) => "INVALID_BUCKET_WIDTH",
            Self::InvalidBucketCount(_) => "INVALID_BUCKET_COUNT",
            Self::AgingRangeOverflow { .. } => "AGING_RANGE_OVERFLOW",
            Self::MissingAgingParameters => "MISSING_AGING_PARAMETERS",
        }
    }
}
