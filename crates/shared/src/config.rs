//! Application configuration management.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::{Currency, CurrencyPrecision};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Report defaults.
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults applied to report runs when the caller does not override them.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Ledger currency code (ISO 4217).
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Overrides the currency's minor-unit precision.
    #[serde(default)]
    pub decimal_places: Option<u32>,
    /// Width of each aging bucket in days.
    #[serde(default = "default_bucket_width")]
    pub aging_bucket_width_days: i64,
    /// Number of aging buckets, the last one open-ended.
    #[serde(default = "default_bucket_count")]
    pub aging_bucket_count: i64,
    /// Row filter: `all`, `non_zero` or `with_movement`.
    #[serde(default = "default_display_mode")]
    pub display_mode: String,
    /// Untagged entries under a dimension filter: `exclude` or `include_full`.
    #[serde(default = "default_untagged_policy")]
    pub untagged_policy: String,
    /// Only count entries of posted transactions.
    #[serde(default = "default_posted_only")]
    pub posted_only: bool,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_bucket_width() -> i64 {
    30
}

fn default_bucket_count() -> i64 {
    5
}

fn default_display_mode() -> String {
    "all".to_string()
}

fn default_untagged_policy() -> String {
    "exclude".to_string()
}

fn default_posted_only() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            decimal_places: None,
            aging_bucket_width_days: default_bucket_width(),
            aging_bucket_count: default_bucket_count(),
            display_mode: default_display_mode(),
            untagged_policy: default_untagged_policy(),
            posted_only: default_posted_only(),
        }
    }
}

impl ReportConfig {
    /// Resolves the precision used for zero checks and dimension shares.
    ///
    /// An explicit `decimal_places` wins over the currency's minor units.
    pub fn precision(&self) -> AppResult<CurrencyPrecision> {
        if let Some(places) = self.decimal_places {
            return Ok(CurrencyPrecision::new(places));
        }
        Currency::from_str(&self.currency)
            .map(Currency::precision)
            .map_err(AppError::Config)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "ledgerview=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERVIEW").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.report.currency, "USD");
        assert_eq!(config.report.aging_bucket_width_days, 30);
        assert_eq!(config.report.aging_bucket_count, 5);
        assert_eq!(config.report.display_mode, "all");
        assert_eq!(config.report.untagged_policy, "exclude");
        assert!(config.report.posted_only);
        assert_eq!(config.logging.filter, "ledgerview=info");
    }

    #[test]
    fn test_precision_from_currency() {
        let report = ReportConfig {
            currency: "JPY".to_string(),
            ..ReportConfig::default()
        };
        assert_eq!(report.precision().unwrap().decimal_places(), 0);
    }

    #[test]
    fn test_precision_override_wins() {
        let report = ReportConfig {
            currency: "JPY".to_string(),
            decimal_places: Some(4),
            ..ReportConfig::default()
        };
        assert_eq!(report.precision().unwrap().decimal_places(), 4);
    }

    #[test]
    fn test_precision_unknown_currency() {
        let report = ReportConfig {
            currency: "ZZZ".to_string(),
            ..ReportConfig::default()
        };
        let err = report.precision().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("LEDGERVIEW__REPORT__CURRENCY", Some("EUR")),
                ("LEDGERVIEW__REPORT__AGING_BUCKET_WIDTH_DAYS", Some("15")),
                ("LEDGERVIEW__LOGGING__FILTER", Some("ledgerview=debug")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.report.currency, "EUR");
                assert_eq!(config.report.aging_bucket_width_days, 15);
                assert_eq!(config.report.aging_bucket_count, 5);
                assert_eq!(config.logging.filter, "ledgerview=debug");
            },
        );
    }
}
