//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input data (entries file, arguments) could not be read or parsed.
    #[error("Invalid input: {0}")]
    Input(String),

    /// The report specification was rejected before aggregation.
    #[error("Invalid report specification: {0}")]
    InvalidSpecification(String),

    /// A ledger entry violated an engine invariant.
    #[error("Invalid ledger entry: {0}")]
    InvalidEntry(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) | Self::InvalidSpecification(_) | Self::InvalidEntry(_) => 2,
            Self::Config(_) => 3,
            Self::Io(_) => 4,
            Self::Internal(_) => 1,
        }
    }

    /// Returns the stable error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Input(_) => "INVALID_INPUT",
            Self::InvalidSpecification(_) => "INVALID_SPECIFICATION",
            Self::InvalidEntry(_) => "INVALID_ENTRY",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
