//! Command line arguments and their translation into report specifications.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ledgerview_core::dimension::UntaggedPolicy;
use ledgerview_core::filter::{AgingParams, ReportSpecification};
use ledgerview_core::ledger::AccountKind;
use ledgerview_core::reports::DisplayMode;
use ledgerview_shared::config::ReportConfig;
use ledgerview_shared::{AppError, AppResult};

/// Generate ledger reports from a JSON file of posted entries.
#[derive(Parser, Debug)]
#[command(name = "ledgerview", version, about, long_about = None)]
pub struct Cli {
    /// The report to generate
    #[command(subcommand)]
    pub command: Command,
}

/// Available reports.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Balance per account with opening, period and ending columns
    TrialBalance(CommonArgs),
    /// Receivable/payable balance per partner split into aging buckets
    AgedBalance(AgedArgs),
    /// Balance per analytic dimension value
    DimensionBalance(CommonArgs),
    /// Per-account detail lines with a running balance
    GeneralLedger(CommonArgs),
}

/// Options shared by every report.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// JSON array of ledger entries
    #[arg(long, value_name = "FILE")]
    pub entries: PathBuf,

    /// First day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Restrict to this account (repeatable)
    #[arg(long = "account", value_name = "KEY")]
    pub accounts: Vec<String>,

    /// Restrict to this journal (repeatable)
    #[arg(long = "journal", value_name = "KEY")]
    pub journals: Vec<String>,

    /// Restrict to this dimension value (repeatable)
    #[arg(long = "dimension", value_name = "KEY")]
    pub dimensions: Vec<String>,

    /// Include draft entries
    #[arg(long)]
    pub all_moves: bool,

    /// Rows to show: all, non_zero or with_movement
    #[arg(long, value_name = "MODE")]
    pub display: Option<String>,

    /// Count untagged entries at full value under a dimension filter
    #[arg(long)]
    pub include_untagged: bool,
}

/// Partner scope of an aged balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PartnerScope {
    /// Customers
    Receivable,
    /// Suppliers
    Payable,
    /// Customers and suppliers
    #[default]
    Both,
}

impl PartnerScope {
    fn kinds(self) -> &'static [AccountKind] {
        match self {
            Self::Receivable => &[AccountKind::Receivable],
            Self::Payable => &[AccountKind::Payable],
            Self::Both => &[AccountKind::Receivable, AccountKind::Payable],
        }
    }
}

/// Options of the aged balance report.
#[derive(Args, Debug, Clone)]
pub struct AgedArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Reference date days overdue are counted against (default: today)
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Width of each aging bucket in days
    #[arg(long, value_name = "DAYS")]
    pub bucket_width: Option<i64>,

    /// Number of aging buckets; the last is open-ended
    #[arg(long, value_name = "N")]
    pub bucket_count: Option<i64>,

    /// Which partners to age
    #[arg(long, value_enum, default_value_t = PartnerScope::Both)]
    pub kind: PartnerScope,
}

impl CommonArgs {
    /// Builds the specification, falling back to `config` for unset options.
    pub fn specification(&self, config: &ReportConfig) -> AppResult<ReportSpecification> {
        let display_mode = match &self.display {
            Some(mode) => DisplayMode::from_str(mode).map_err(AppError::Input)?,
            None => DisplayMode::from_str(&config.display_mode).map_err(AppError::Config)?,
        };
        let untagged = if self.include_untagged {
            UntaggedPolicy::IncludeFull
        } else {
            UntaggedPolicy::from_str(&config.untagged_policy).map_err(AppError::Config)?
        };

        let mut spec = ReportSpecification::new()
            .with_period(self.from, self.to)
            .posted_only(config.posted_only && !self.all_moves)
            .with_display_mode(display_mode)
            .with_untagged_policy(untagged);
        for account in &self.accounts {
            spec = spec.with_account(account.as_str());
        }
        for journal in &self.journals {
            spec = spec.with_journal(journal.as_str());
        }
        for dimension in &self.dimensions {
            spec = spec.with_dimension(dimension.as_str());
        }
        Ok(spec)
    }
}

impl AgedArgs {
    /// Builds the aged balance specification as of `today` unless `--as-of` is given.
    pub fn specification(
        &self,
        config: &ReportConfig,
        today: NaiveDate,
    ) -> AppResult<ReportSpecification> {
        let mut spec = self.common.specification(config)?.with_aging(AgingParams::new(
            self.as_of.unwrap_or(today),
            self.bucket_width.unwrap_or(config.aging_bucket_width_days),
            self.bucket_count.unwrap_or(config.aging_bucket_count),
        ));
        for kind in self.kind.kinds() {
            spec = spec.with_account_kind(*kind);
        }
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ledgerview").chain(args.iter().copied())).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trial_balance_arguments() {
        let cli = parse(&[
            "trial-balance",
            "--entries",
            "entries.json",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
            "--account",
            "400100",
            "--account",
            "400200",
            "--display",
            "non_zero",
        ]);
        let Command::TrialBalance(args) = cli.command else {
            panic!("expected trial-balance");
        };
        let spec = args.specification(&ReportConfig::default()).unwrap();

        assert_eq!(spec.date_from, Some(date(2024, 1, 1)));
        assert_eq!(spec.date_to, Some(date(2024, 1, 31)));
        assert_eq!(spec.account_keys.len(), 2);
        assert_eq!(spec.display_mode, DisplayMode::NonZero);
        assert!(spec.posted_only);
    }

    #[test]
    fn test_config_fallbacks() {
        let cli = parse(&["dimension-balance", "--entries", "e.json", "--dimension", "WH-A"]);
        let Command::DimensionBalance(args) = cli.command else {
            panic!("expected dimension-balance");
        };
        let config = ReportConfig {
            display_mode: "with_movement".to_string(),
            untagged_policy: "include_full".to_string(),
            posted_only: false,
            ..ReportConfig::default()
        };
        let spec = args.specification(&config).unwrap();

        assert_eq!(spec.display_mode, DisplayMode::WithMovement);
        assert_eq!(spec.dimensions.untagged, UntaggedPolicy::IncludeFull);
        assert!(spec.dimensions.keys.contains("WH-A"));
        assert!(!spec.posted_only);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "general-ledger",
            "--entries",
            "e.json",
            "--all-moves",
            "--include-untagged",
        ]);
        let Command::GeneralLedger(args) = cli.command else {
            panic!("expected general-ledger");
        };
        let spec = args.specification(&ReportConfig::default()).unwrap();
        assert!(!spec.posted_only);
        assert_eq!(spec.dimensions.untagged, UntaggedPolicy::IncludeFull);
    }

    #[test]
    fn test_invalid_display_mode() {
        let cli = parse(&["trial-balance", "--entries", "e.json", "--display", "sometimes"]);
        let Command::TrialBalance(args) = cli.command else {
            panic!("expected trial-balance");
        };
        let err = args.specification(&ReportConfig::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[rstest]
    #[case("receivable", &[AccountKind::Receivable])]
    #[case("payable", &[AccountKind::Payable])]
    #[case("both", &[AccountKind::Receivable, AccountKind::Payable])]
    fn test_aged_balance_arguments(#[case] kind: &str, #[case] expected: &[AccountKind]) {
        let cli = parse(&[
            "aged-balance",
            "--entries",
            "e.json",
            "--as-of",
            "2024-03-01",
            "--bucket-width",
            "15",
            "--kind",
            kind,
        ]);
        let Command::AgedBalance(args) = cli.command else {
            panic!("expected aged-balance");
        };
        let spec = args.specification(&ReportConfig::default(), date(2030, 1, 1)).unwrap();
        let aging = spec.aging.unwrap();

        assert_eq!(aging.reference_date, date(2024, 3, 1));
        assert_eq!(aging.bucket_width_days, 15);
        assert_eq!(aging.bucket_count, 5);
        assert_eq!(spec.account_kinds.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_aged_balance_defaults_to_today() {
        let cli = parse(&["aged-balance", "--entries", "e.json"]);
        let Command::AgedBalance(args) = cli.command else {
            panic!("expected aged-balance");
        };
        let spec = args.specification(&ReportConfig::default(), date(2024, 6, 30)).unwrap();
        assert_eq!(spec.aging.unwrap().reference_date, date(2024, 6, 30));
    }
}
