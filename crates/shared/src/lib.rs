//! Shared types, errors, and configuration for Ledgerview.
//!
//! This crate provides common types used across all other crates:
//! - Typed keys for accounts, partners, journals, and dimensions
//! - Currency precision for zero checks and rounding
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
