//! Entry source: a JSON array of ledger entries on disk.

use std::path::Path;

use ledgerview_core::ledger::LedgerEntry;
use ledgerview_shared::{AppError, AppResult};
use tracing::debug;

/// Reads and parses the entries file.
pub fn load_entries(path: &Path) -> AppResult<Vec<LedgerEntry>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| AppError::Io(format!("{}: {err}", path.display())))?;
    let entries = parse_entries(&raw)
        .map_err(|err| AppError::Input(format!("{}: {err}", path.display())))?;
    debug!(path = %path.display(), entries = entries.len(), "Loaded ledger entries");
    Ok(entries)
}

/// Parses a JSON array of entries.
pub fn parse_entries(raw: &str) -> Result<Vec<LedgerEntry>, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_entries() {
        let raw = r#"[
            {"id": 1, "account_key": "400100", "entry_date": "2024-01-05", "debit": "100", "credit": "0", "posted": true},
            {"id": 2, "account_key": "121000", "account_kind": "receivable", "partner_key": "ACME",
             "entry_date": "2024-01-06", "due_date": "2024-02-05", "debit": "0", "credit": "40.5",
             "posted": false, "dimension_distribution": {"WH-A": "60", "WH-B": "40"}}
        ]"#;
        let entries = parse_entries(raw).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].debit, dec!(100));
        assert_eq!(entries[1].credit, dec!(40.5));
        assert!(!entries[1].posted);
        assert!(entries[1].is_tagged());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_entries(r#"[{"id": 1}]"#).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_entries(Path::new("/nonexistent/ledgerview/entries.json")).unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
