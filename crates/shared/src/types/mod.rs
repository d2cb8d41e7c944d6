//! Common types used across the application.

pub mod key;
pub mod money;

pub use key::*;
pub use money::{Currency, CurrencyPrecision};
