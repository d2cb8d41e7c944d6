//! Amount allocation using the Largest Remainder Method.
//!
//! Splitting an entry across several dimension values must not create or
//! lose minor units: the allocated parts always sum to the input total.
//!
//! The Largest Remainder Method works by:
//! 1. Calculate exact allocations
//! 2. Round each allocation toward zero
//! 3. Calculate the remainder (total - sum of rounded)
//! 4. Distribute remainder units to items with largest fractional parts

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Allocates `total` proportionally to `weights` at `decimal_places` precision.
///
/// The weights need not sum to 100; each part is `total * w / sum(w)`.
/// The sum of the result is exactly `total` rounded to `decimal_places`.
/// Ties between equal remainders go to the earlier weight, so the result is
/// deterministic for a given input order.
///
/// Returns all zeros when the weights sum to zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use ledgerview_core::dimension::allocate_by_weights;
///
/// // 100.01 split 60/40
/// let parts = allocate_by_weights(dec!(100.01), &[dec!(60), dec!(40)], 2);
/// assert_eq!(parts, vec![dec!(60.01), dec!(40.00)]);
/// ```
#[must_use]
pub fn allocate_by_weights(
    total: Decimal,
    weights: &[Decimal],
    decimal_places: u32,
) -> Vec<Decimal> {
    if weights.is_empty() {
        return vec![];
    }

    let weight_sum: Decimal = weights.iter().copied().sum();
    if weight_sum.is_zero() {
        return vec![Decimal::ZERO; weights.len()];
    }

    // Allocate the magnitude and restore the sign at the end.
    let negative = total.is_sign_negative();
    let magnitude = total.abs();
    let unit = Decimal::new(1, decimal_places);

    // Round total to target precision first
    let total_rounded =
        magnitude.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);

    // Calculate exact allocations; near the top of the range scale by the
    // weight fraction, which is at most one.
    let exact: Vec<Decimal> = weights
        .iter()
        .map(|w| {
            total_rounded
                .checked_mul(*w)
                .map_or_else(|| total_rounded * (*w / weight_sum), |product| product / weight_sum)
        })
        .collect();

    // Round down each
    let mut rounded: Vec<Decimal> = exact
        .iter()
        .map(|a| a.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero))
        .collect();

    // Calculate remainder to distribute
    let sum_rounded: Decimal = rounded.iter().copied().sum();
    let remainder = total_rounded - sum_rounded;

    // How many units to distribute
    let units_to_distribute = (remainder / unit)
        .round_dp_with_strategy(0, RoundingStrategy::ToZero)
        .to_u64()
        .unwrap_or(0);
    let units_to_distribute = usize::try_from(units_to_distribute).unwrap_or(0);

    if units_to_distribute > 0 {
        // Calculate fractional remainders for each allocation
        let mut remainders: Vec<(usize, Decimal)> = exact
            .iter()
            .zip(rounded.iter())
            .enumerate()
            .map(|(i, (e, r))| (i, *e - *r))
            .collect();

        // Largest remainder first; stable sort keeps input order on ties
        remainders.sort_by(|a, b| b.1.cmp(&a.1));

        for (idx, _) in remainders.iter().take(units_to_distribute) {
            rounded[*idx] += unit;
        }
    }

    if negative {
        rounded.iter_mut().for_each(|part| *part = -*part);
    }
    rounded
}
