//! Currency precision for monetary comparisons.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal`; "zero" is decided at the currency's
//! minor-unit precision, never by exact equality on raw sums.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Indonesian Rupiah
    Idr,
    /// Pakistani Rupee
    Pkr,
    /// Singapore Dollar
    Sgd,
    /// Japanese Yen
    Jpy,
    /// Kuwaiti Dinar
    Kwd,
}

impl Currency {
    /// Number of minor-unit decimal places for this currency.
    #[must_use]
    pub const fn decimal_places(self) -> u32 {
        match self {
            Self::Jpy => 0,
            Self::Kwd => 3,
            Self::Usd | Self::Eur | Self::Idr | Self::Pkr | Self::Sgd => 2,
        }
    }

    /// Returns the precision used to round and compare amounts in this currency.
    #[must_use]
    pub const fn precision(self) -> CurrencyPrecision {
        CurrencyPrecision::new(self.decimal_places())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Idr => write!(f, "IDR"),
            Self::Pkr => write!(f, "PKR"),
            Self::Sgd => write!(f, "SGD"),
            Self::Jpy => write!(f, "JPY"),
            Self::Kwd => write!(f, "KWD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "IDR" => Ok(Self::Idr),
            "PKR" => Ok(Self::Pkr),
            "SGD" => Ok(Self::Sgd),
            "JPY" => Ok(Self::Jpy),
            "KWD" => Ok(Self::Kwd),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

/// Rounding precision of a currency, in decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyPrecision {
    decimal_places: u32,
}

impl CurrencyPrecision {
    /// Creates a precision with the given number of decimal places.
    #[must_use]
    pub const fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    /// Number of decimal places.
    #[must_use]
    pub const fn decimal_places(self) -> u32 {
        self.decimal_places
    }

    /// Rounds an amount half-up (away from zero) to this precision.
    #[must_use]
    pub fn round(self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Returns true if the amount rounds to zero at this precision.
    #[must_use]
    pub fn is_zero(self, amount: Decimal) -> bool {
        self.round(amount).is_zero()
    }

    /// Compares two amounts at this precision.
    #[must_use]
    pub fn compare(self, a: Decimal, b: Decimal) -> std::cmp::Ordering {
        self.round(a).cmp(&self.round(b))
    }
}

impl Default for CurrencyPrecision {
    fn default() -> Self {
        Currency::Usd.precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Idr.to_string(), "IDR");
        assert_eq!(Currency::Eur.to_string(), "EUR");
        assert_eq!(Currency::Pkr.to_string(), "PKR");
        assert_eq!(Currency::Sgd.to_string(), "SGD");
        assert_eq!(Currency::Jpy.to_string(), "JPY");
        assert_eq!(Currency::Kwd.to_string(), "KWD");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("PKR").unwrap(), Currency::Pkr);
        assert_eq!(Currency::from_str("JPY").unwrap(), Currency::Jpy);

        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }

    #[rstest]
    #[case(Currency::Usd, 2)]
    #[case(Currency::Jpy, 0)]
    #[case(Currency::Kwd, 3)]
    fn test_currency_decimal_places(#[case] currency: Currency, #[case] places: u32) {
        assert_eq!(currency.decimal_places(), places);
        assert_eq!(currency.precision().decimal_places(), places);
    }

    #[rstest]
    #[case(2, dec!(0.004), true)]
    #[case(2, dec!(-0.004), true)]
    #[case(2, dec!(0.005), false)]
    #[case(2, dec!(0.01), false)]
    #[case(0, dec!(0.49), true)]
    #[case(3, dec!(0.0004), true)]
    #[case(3, dec!(0.001), false)]
    fn test_precision_is_zero(#[case] places: u32, #[case] amount: Decimal, #[case] zero: bool) {
        assert_eq!(CurrencyPrecision::new(places).is_zero(amount), zero);
    }

    #[test]
    fn test_precision_round_half_up() {
        let precision = CurrencyPrecision::new(2);
        assert_eq!(precision.round(dec!(10.005)), dec!(10.01));
        assert_eq!(precision.round(dec!(-10.005)), dec!(-10.01));
        assert_eq!(precision.round(dec!(10.004)), dec!(10.00));
    }

    #[test]
    fn test_precision_compare() {
        let precision = CurrencyPrecision::new(2);
        assert_eq!(
            precision.compare(dec!(1.001), dec!(1.004)),
            std::cmp::Ordering::Equal
        );
        assert_eq!(
            precision.compare(dec!(1.00), dec!(1.01)),
            std::cmp::Ordering::Less
        );
    }

    #[test]
    fn test_default_precision_is_two_places() {
        assert_eq!(CurrencyPrecision::default().decimal_places(), 2);
    }
}
