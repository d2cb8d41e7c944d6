//! Running balance calculations for general ledger lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running balance information for one general ledger line.
///
/// - `sequence`: 1-based position of the line within its account
/// - `previous_balance`: balance before this line
/// - `current_balance`: balance after this line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Line position within the account (monotonically increasing).
    pub sequence: u64,
    /// Balance before this line.
    pub previous_balance: Decimal,
    /// Balance after this line.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Starts a chain at the account's opening balance.
    ///
    /// The opening itself is sequence 0; the first detail line is 1.
    #[must_use]
    pub const fn opening(balance: Decimal) -> Self {
        Self {
            sequence: 0,
            previous_balance: balance,
            current_balance: balance,
        }
    }

    /// Creates the running balance for the line following `self`.
    ///
    /// - current_balance[N] = previous_balance[N] + change
    /// - previous_balance[N] = current_balance[N-1]
    ///
    /// Returns `None` if the balance leaves the `Decimal` range.
    #[must_use]
    pub fn next(&self, change: Decimal) -> Option<Self> {
        Some(Self {
            sequence: self.sequence.checked_add(1)?,
            previous_balance: self.current_balance,
            current_balance: self.current_balance.checked_add(change)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    /// Strategy for generating balance changes (can be positive or negative)
    fn balance_change_strategy() -> impl Strategy<Value = Decimal> {
        (-100_000i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    /// Strategy for generating a sequence of balance changes
    fn balance_changes_strategy(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
        prop::collection::vec(balance_change_strategy(), 1..=max_len)
    }

    fn build_chain(opening: Decimal, changes: &[Decimal]) -> RunningBalance {
        changes
            .iter()
            .fold(RunningBalance::opening(opening), |current, change| {
                current.next(*change).unwrap()
            })
    }

    #[test]
    fn test_opening_is_sequence_zero() {
        let rb = RunningBalance::opening(dec!(100));
        assert_eq!(rb.sequence, 0);
        assert_eq!(rb.previous_balance, dec!(100));
        assert_eq!(rb.current_balance, dec!(100));
    }

    #[test]
    fn test_next_line() {
        let rb = RunningBalance::opening(dec!(100)).next(dec!(-40)).unwrap();
        assert_eq!(rb.sequence, 1);
        assert_eq!(rb.previous_balance, dec!(100));
        assert_eq!(rb.current_balance, dec!(60));
    }

    #[test]
    fn test_next_overflow() {
        let rb = RunningBalance::opening(Decimal::MAX);
        assert_eq!(rb.next(dec!(1)), None);
        assert_eq!(rb.next(dec!(-1)).map(|rb| rb.current_balance), Some(Decimal::MAX - dec!(1)));
        assert_eq!(RunningBalance::opening(Decimal::MIN).next(dec!(-1)), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Previous balance of line N equals current balance of line N-1.
        #[test]
        fn prop_previous_equals_prior_current(
            opening in balance_change_strategy(),
            change1 in balance_change_strategy(),
            change2 in balance_change_strategy(),
        ) {
            let rb1 = RunningBalance::opening(opening).next(change1).unwrap();
            let rb2 = rb1.next(change2).unwrap();

            prop_assert_eq!(rb2.previous_balance, rb1.current_balance);
            prop_assert_eq!(rb2.current_balance, rb2.previous_balance + change2);
        }

        /// The final balance equals the opening plus the sum of all changes.
        #[test]
        fn prop_final_balance_equals_opening_plus_changes(
            opening in balance_change_strategy(),
            changes in balance_changes_strategy(20),
        ) {
            let current = build_chain(opening, &changes);
            let expected: Decimal = opening + changes.iter().copied().sum::<Decimal>();

            prop_assert_eq!(current.current_balance, expected);
        }

        /// The final sequence equals the number of lines.
        #[test]
        fn prop_sequence_equals_line_count(
            changes in balance_changes_strategy(20),
        ) {
            let current = build_chain(Decimal::ZERO, &changes);

            prop_assert_eq!(current.sequence, changes.len() as u64);
        }
    }
}
