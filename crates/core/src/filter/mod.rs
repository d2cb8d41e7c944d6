//! Report specification and the entry predicate built from it.

pub mod error;
pub mod predicate;
pub mod specification;

pub use error::SpecificationError;
pub use predicate::{EntryPredicate, PredicateBuilder, SpecPredicate};
pub use specification::{AgingParams, MAX_AGING_BUCKETS, ReportSpecification};
