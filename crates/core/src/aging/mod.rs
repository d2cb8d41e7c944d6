//! Aging of outstanding balances by days past due.

pub mod classifier;

pub use classifier::{AgingBuckets, AgingClass, NOT_DUE_LABEL, classify};
