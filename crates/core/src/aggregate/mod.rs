//! Grouped aggregation of ledger entries.

pub mod aggregator;
pub mod group;

pub use aggregator::{Aggregator, Attribution, Column, Period};
pub use group::{GroupBy, GroupKey};
