//! Ledger aggregation engine for Ledgerview.
//!
//! This crate contains pure business logic with ZERO I/O dependencies.
//! It turns a stream of posted ledger entries and a report specification
//! into grouped monetary summaries.
//!
//! # Modules
//!
//! - `ledger` - Ledger entries and running balances
//! - `filter` - Report specification and entry predicates
//! - `dimension` - Dimension distributions, filters and proportional splits
//! - `aggregate` - Grouping and single-pass aggregation
//! - `aging` - Reference-date aging buckets
//! - `reports` - Display formatting and the report service
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use ledgerview_core::filter::ReportSpecification;
//! use ledgerview_core::ledger::LedgerEntry;
//! use ledgerview_core::reports::ReportService;
//! use ledgerview_shared::types::CurrencyPrecision;
//! use rust_decimal::Decimal;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let entries = vec![
//!     LedgerEntry::new(1, "400100", day(5)).with_debit(Decimal::from(100)),
//!     LedgerEntry::new(2, "400100", day(20)).with_credit(Decimal::from(40)),
//! ];
//! let spec = ReportSpecification::new().with_period(Some(day(1)), Some(day(31)));
//!
//! let report = ReportService::new(CurrencyPrecision::new(2))
//!     .trial_balance(&entries, &spec)
//!     .unwrap();
//! assert_eq!(report.rows[0].ending_balance, Decimal::from(60));
//! ```

pub mod aggregate;
pub mod aging;
pub mod dimension;
pub mod filter;
pub mod ledger;
pub mod reports;
