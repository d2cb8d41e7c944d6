//! Ledgerview command line.
//!
//! Reads posted ledger entries from a JSON file and prints a report as
//! pretty JSON on stdout. Logs go to stderr.

mod args;
mod input;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerview_core::reports::{ReportError, ReportService};
use ledgerview_shared::config::LoggingConfig;
use ledgerview_shared::{AppConfig, AppError};

use crate::args::{Cli, Command};
use crate::input::load_entries;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration is loaded before tracing so the configured filter applies.
    let config = AppConfig::load();
    let filter = config
        .as_ref()
        .map_or_else(|_| LoggingConfig::default().filter, |c| c.logging.filter.clone());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = config
        .map_err(|err| anyhow::Error::from(AppError::from(err)))
        .and_then(|config| run(cli, &config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (code, exit) = err
                .downcast_ref::<AppError>()
                .map_or(("INTERNAL_ERROR", 1), |e| (e.error_code(), e.exit_code()));
            error!(error_code = code, exit_code = exit, "{err:#}");
            ExitCode::from(u8::try_from(exit).unwrap_or(1))
        }
    }
}

fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let service = ReportService::new(config.report.precision()?);
    let today = chrono::Utc::now().date_naive();

    let json = match cli.command {
        Command::TrialBalance(args) => {
            let spec = args.specification(&config.report)?;
            let entries = load_entries(&args.entries)?;
            render(&service.trial_balance(&entries, &spec).map_err(app_error)?)?
        }
        Command::AgedBalance(args) => {
            let spec = args.specification(&config.report, today)?;
            let entries = load_entries(&args.common.entries)?;
            render(&service.aged_balance(&entries, &spec).map_err(app_error)?)?
        }
        Command::DimensionBalance(args) => {
            let spec = args.specification(&config.report)?;
            let entries = load_entries(&args.entries)?;
            render(&service.dimension_balance(&entries, &spec).map_err(app_error)?)?
        }
        Command::GeneralLedger(args) => {
            let spec = args.specification(&config.report)?;
            let entries = load_entries(&args.entries)?;
            render(&service.general_ledger(&entries, &spec).map_err(app_error)?)?
        }
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").map_err(AppError::from)?;
    info!(bytes = json.len(), "Report written");
    Ok(())
}

fn render<T: Serialize>(report: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(report).map_err(|err| AppError::Internal(err.to_string()))
}

fn app_error(err: ReportError) -> AppError {
    match err {
        ReportError::InvalidSpecification(e) => AppError::InvalidSpecification(e.to_string()),
        ReportError::InvalidEntry(e) => AppError::InvalidEntry(e.to_string()),
        ReportError::TotalsOverflow => AppError::Input(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerview_core::filter::SpecificationError;
    use ledgerview_core::ledger::LedgerError;
    use ledgerview_shared::types::EntryId;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    #[test]
    fn test_report_errors_map_to_app_errors() {
        let err = app_error(ReportError::from(SpecificationError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }));
        assert_eq!(err.error_code(), "INVALID_SPECIFICATION");
        assert_eq!(err.exit_code(), 2);

        let err = app_error(ReportError::from(LedgerError::NegativeAmount {
            entry_id: EntryId(9),
            side: "debit",
            amount: Decimal::NEGATIVE_ONE,
        }));
        assert_eq!(err.error_code(), "INVALID_ENTRY");
        assert!(err.to_string().contains("Entry 9"));

        let err = app_error(ReportError::from(LedgerError::AmountOverflow {
            entry_id: EntryId(4),
        }));
        assert_eq!(err.error_code(), "INVALID_ENTRY");
        assert_eq!(err.exit_code(), 2);

        let err = app_error(ReportError::TotalsOverflow);
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_render_failure_is_internal() {
        let mut report = BTreeMap::new();
        report.insert((1, 2), "not a JSON object key");
        let err = render(&report).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(err.exit_code(), 1);

        let json = render(&BTreeMap::from([("rows", 0)])).unwrap();
        assert_eq!(json, "{\n  \"rows\": 0\n}");
    }
}
