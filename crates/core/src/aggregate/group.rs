//! Grouping dimensions and keys.

use serde::{Deserialize, Serialize, Serializer};

use crate::ledger::LedgerEntry;

/// Dimension rows are grouped by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// One row per account.
    #[default]
    Account,
    /// One row per partner; entries without a partner are ungrouped.
    Partner,
    /// One row per dimension value; untagged amounts and unassigned residue are ungrouped.
    Dimension,
}

/// Key of an aggregate row.
///
/// Keys order naturally (lexically, which is account-code order); the
/// ungrouped row sorts last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    /// A concrete account, partner, or dimension value.
    Key(String),
    /// Amounts whose entries have no value for the grouping dimension.
    Ungrouped,
}

impl GroupKey {
    /// Creates a concrete key.
    #[must_use]
    pub fn key(value: impl Into<String>) -> Self {
        Self::Key(value.into())
    }

    /// Returns the key as a string, `None` for the ungrouped row.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Key(k) => Some(k),
            Self::Ungrouped => None,
        }
    }

    /// Returns true for the ungrouped row.
    #[must_use]
    pub const fn is_ungrouped(&self) -> bool {
        matches!(self, Self::Ungrouped)
    }

    /// Key of an entry under account or partner grouping.
    ///
    /// Dimension grouping splits entries and is handled by the resolver.
    #[must_use]
    pub fn of_entry(entry: &LedgerEntry, group_by: GroupBy) -> Self {
        match group_by {
            GroupBy::Account => Self::key(entry.account_key.as_str()),
            GroupBy::Partner => entry
                .partner_key
                .as_ref()
                .map_or(Self::Ungrouped, |p| Self::key(p.as_str())),
            GroupBy::Dimension => Self::Ungrouped,
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Ungrouped => f.write_str("(ungrouped)"),
        }
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Key(k) => serializer.serialize_str(k),
            Self::Ungrouped => serializer.serialize_none(),
        }
    }
}
