//! Proportional dimension distribution carried by a ledger entry.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use ledgerview_shared::types::DimensionKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mapping from dimension value to the percentage (0-100) of the entry it carries.
///
/// Percentages need not sum to 100. Partial distributions leave an
/// unassigned residue; overlapping ones are taken as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionDistribution(BTreeMap<DimensionKey, Decimal>);

impl DimensionDistribution {
    /// Creates an empty distribution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the percentage for a key, replacing any previous value.
    pub fn insert(&mut self, key: DimensionKey, percentage: Decimal) {
        self.0.insert(key, percentage);
    }

    /// Returns the percentage assigned to a key.
    #[must_use]
    pub fn percentage(&self, key: &str) -> Option<Decimal> {
        self.0.get(key).copied()
    }

    /// Returns true if no key is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over keys and percentages in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&DimensionKey, Decimal)> {
        self.0.iter().map(|(k, p)| (k, *p))
    }

    /// Sum of all percentages.
    #[must_use]
    pub fn total_percentage(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    /// Iterates over the entries whose key is in `keys`, in key order.
    pub fn matching<'a>(
        &'a self,
        keys: &'a BTreeSet<DimensionKey>,
    ) -> impl Iterator<Item = (&'a DimensionKey, Decimal)> + 'a {
        self.iter().filter(move |(k, _)| keys.contains(*k))
    }

    /// Sum of the percentages of keys in `keys`.
    #[must_use]
    pub fn matching_percentage(&self, keys: &BTreeSet<DimensionKey>) -> Decimal {
        self.matching(keys).map(|(_, p)| p).sum()
    }

    /// Returns true if any key is in `keys`.
    #[must_use]
    pub fn intersects(&self, keys: &BTreeSet<DimensionKey>) -> bool {
        self.matching(keys).next().is_some()
    }

    /// First key whose percentage lies outside `0..=100`.
    #[must_use]
    pub fn out_of_range(&self) -> Option<(&DimensionKey, Decimal)> {
        self.iter()
            .find(|(_, p)| *p < Decimal::ZERO || *p > Decimal::ONE_HUNDRED)
    }
}

impl FromIterator<(DimensionKey, Decimal)> for DimensionDistribution {
    fn from_iter<T: IntoIterator<Item = (DimensionKey, Decimal)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn keys(values: &[&str]) -> BTreeSet<DimensionKey> {
        values.iter().map(|v| DimensionKey::new(*v)).collect()
    }

    fn distribution(pairs: &[(&str, Decimal)]) -> DimensionDistribution {
        pairs
            .iter()
            .map(|(k, p)| (DimensionKey::new(*k), *p))
            .collect()
    }

    #[test]
    fn test_matching_percentage() {
        let dist = distribution(&[("WH-A", dec!(60)), ("WH-B", dec!(40))]);
        assert_eq!(dist.matching_percentage(&keys(&["WH-A"])), dec!(60));
        assert_eq!(dist.matching_percentage(&keys(&["WH-A", "WH-B"])), dec!(100));
        assert_eq!(dist.matching_percentage(&keys(&["WH-C"])), Decimal::ZERO);
    }

    #[test]
    fn test_intersects() {
        let dist = distribution(&[("WH-A", dec!(60))]);
        assert!(dist.intersects(&keys(&["WH-A", "WH-C"])));
        assert!(!dist.intersects(&keys(&["WH-C"])));
    }

    #[test]
    fn test_total_percentage_partial_and_overlapping() {
        assert_eq!(
            distribution(&[("A", dec!(30)), ("B", dec!(20))]).total_percentage(),
            dec!(50)
        );
        assert_eq!(
            distribution(&[("A", dec!(80)), ("B", dec!(70))]).total_percentage(),
            dec!(150)
        );
    }

    #[test]
    fn test_out_of_range() {
        assert!(distribution(&[("A", dec!(0)), ("B", dec!(100))]).out_of_range().is_none());
        let dist = distribution(&[("A", dec!(50)), ("B", dec!(-1))]);
        let (key, pct) = dist.out_of_range().unwrap();
        assert_eq!(key.as_str(), "B");
        assert_eq!(pct, dec!(-1));
    }

    #[test]
    fn test_deserialize_from_json_map() {
        let dist: DimensionDistribution =
            serde_json::from_str(r#"{"12": 60.5, "7": "39.5"}"#).unwrap();
        assert_eq!(dist.percentage("12"), Some(dec!(60.5)));
        assert_eq!(dist.percentage("7"), Some(dec!(39.5)));
        assert_eq!(dist.total_percentage(), dec!(100));
    }
}
