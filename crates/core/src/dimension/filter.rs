//! Dimensional filtering for reports.

use std::collections::BTreeSet;

use ledgerview_shared::types::DimensionKey;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerEntry;

/// How entries without any dimension tag are treated when a dimension filter is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UntaggedPolicy {
    /// Untagged entries contribute nothing (unassigned overhead).
    #[default]
    Exclude,
    /// Untagged entries count at full value (they belong to everything).
    IncludeFull,
}

impl std::str::FromStr for UntaggedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exclude" => Ok(Self::Exclude),
            "include_full" | "include-full" => Ok(Self::IncludeFull),
            _ => Err(format!("Unknown untagged policy: {s}")),
        }
    }
}

/// Filter for dimensional queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionFilter {
    /// Dimension values whose share of each entry is counted.
    pub keys: BTreeSet<DimensionKey>,
    /// Treatment of untagged entries.
    #[serde(default)]
    pub untagged: UntaggedPolicy,
}

impl DimensionFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dimension value to the filter.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<DimensionKey>) -> Self {
        self.keys.insert(key.into());
        self
    }

    /// Sets the untagged policy.
    #[must_use]
    pub const fn with_untagged(mut self, policy: UntaggedPolicy) -> Self {
        self.untagged = policy;
        self
    }

    /// Returns true if dimension filtering is in effect.
    ///
    /// An empty key set means no filtering: every entry counts in full.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Returns true if the entry can contribute to a dimension-filtered aggregate.
    #[must_use]
    pub fn admits(&self, entry: &LedgerEntry) -> bool {
        if !self.is_active() {
            return true;
        }
        match &entry.dimension_distribution {
            Some(distribution) if !distribution.is_empty() => distribution.intersects(&self.keys),
            _ => self.untagged == UntaggedPolicy::IncludeFull,
        }
    }
}
