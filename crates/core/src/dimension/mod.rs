//! Dimensional reporting and filtering.
//!
//! - `distribution` - percentage split carried by an entry
//! - `filter` - which dimension values a report counts
//! - `resolver` - attribution of entry amounts under a filter
//! - `allocation` - exact splitting across several values

pub mod allocation;
pub mod distribution;
pub mod filter;
pub mod resolver;

pub use allocation::allocate_by_weights;
pub use distribution::DimensionDistribution;
pub use filter::{DimensionFilter, UntaggedPolicy};
pub use resolver::{DimensionResolver, ProportionalResolver, Share};
