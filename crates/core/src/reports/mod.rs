//! Report generation.
//!
//! Pure business logic turning a stream of ledger entries and a
//! [`ReportSpecification`](crate::filter::ReportSpecification) into:
//! - Trial Balance
//! - Aged Partner Balance
//! - Dimension Balance
//! - General Ledger

pub mod error;
pub mod formatter;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use formatter::{DisplayMode, ResultFormatter, RowOrder};
pub use service::ReportService;
pub use types::*;
