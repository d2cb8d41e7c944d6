//! Display filtering and ordering of aggregate rows.

use std::cmp::Reverse;

use ledgerview_shared::types::CurrencyPrecision;
use serde::{Deserialize, Serialize};

use super::types::AggregateRow;

/// Post-aggregation row filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Every row, including zero-balance groups.
    #[default]
    All,
    /// Rows whose ending balance is not zero at currency precision.
    NonZero,
    /// Rows with period debits or credits, whatever their ending balance.
    WithMovement,
}

impl DisplayMode {
    /// Returns true if the row is shown under this mode.
    #[must_use]
    pub fn shows(self, row: &AggregateRow, precision: CurrencyPrecision) -> bool {
        match self {
            Self::All => true,
            Self::NonZero => !row.is_zero_balance(precision),
            Self::WithMovement => row.has_movement(precision),
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::NonZero => write!(f, "non_zero"),
            Self::WithMovement => write!(f, "with_movement"),
        }
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "non_zero" | "non-zero" => Ok(Self::NonZero),
            "with_movement" | "with-movement" => Ok(Self::WithMovement),
            _ => Err(format!("Unknown display mode: {s}")),
        }
    }
}

/// Order of formatted rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrder {
    /// Natural order of the group key; the ungrouped row comes last.
    #[default]
    GroupKey,
    /// Largest absolute ending balance first, ties in group key order.
    MagnitudeDesc,
}

/// Applies the display mode and produces the final row sequence.
#[derive(Debug, Clone, Copy)]
pub struct ResultFormatter {
    precision: CurrencyPrecision,
}

impl ResultFormatter {
    /// Creates a formatter comparing amounts at `precision`.
    #[must_use]
    pub const fn new(precision: CurrencyPrecision) -> Self {
        Self { precision }
    }

    /// Filters and orders rows.
    #[must_use]
    pub fn format(
        &self,
        rows: impl IntoIterator<Item = AggregateRow>,
        mode: DisplayMode,
        order: RowOrder,
    ) -> Vec<AggregateRow> {
        let mut rows: Vec<AggregateRow> = rows
            .into_iter()
            .filter(|row| mode.shows(row, self.precision))
            .collect();

        rows.sort_by(|a, b| a.group_key.cmp(&b.group_key));
        if order == RowOrder::MagnitudeDesc {
            rows.sort_by_key(|row| Reverse(row.ending_balance.abs()));
        }
        rows
    }
}
