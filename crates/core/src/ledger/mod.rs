//! Ledger input model.
//!
//! This module defines what the engine reads from the external entry source:
//! - Ledger entries (debits, credits, dates, dimension tags)
//! - Account kinds used by aged balance reports
//! - Running balances for general ledger lines
//! - Error types for entry invariants

pub mod balance;
pub mod entry;
pub mod error;

pub use balance::RunningBalance;
pub use entry::{AccountKind, LedgerEntry};
pub use error::LedgerError;
