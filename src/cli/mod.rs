//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod category;
pub mod config;
pub mod export;
pub mod report;
pub mod transaction;

pub use audit::{handle_audit_command, AuditArgs};
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, handle_init_command, ConfigArgs, InitArgs};
pub use export::{handle_export_command, ExportArgs};
pub use report::{handle_months_command, handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{DuoError, DuoResult};
use crate::models::{parse_iso_date, Buyer, Money, MonthKey};

/// Parse `--month`, defaulting to the current month
pub(crate) fn parse_month(month: Option<&str>) -> DuoResult<MonthKey> {
    match month {
        Some(s) => MonthKey::parse(s).map_err(|e| {
            DuoError::Validation(format!("{}. Use YYYY-MM (e.g., 2024-03)", e))
        }),
        None => Ok(MonthKey::current()),
    }
}

/// Parse a `YYYY-MM-DD` date, defaulting to today
pub(crate) fn parse_date(date: Option<&str>) -> DuoResult<NaiveDate> {
    match date {
        Some(s) => parse_iso_date(s.trim()).ok_or_else(|| {
            DuoError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub(crate) fn parse_amount(amount: &str) -> DuoResult<Money> {
    Money::parse(amount)
        .map_err(|e| DuoError::Validation(format!("Invalid amount '{}': {}", amount, e)))
}

pub(crate) fn parse_buyer(settings: &Settings, buyer: &str) -> DuoResult<Buyer> {
    settings.parse_buyer(buyer).ok_or_else(|| {
        DuoError::Validation(format!(
            "Unknown buyer '{}'. Use a, b, joint, '{}' or '{}'",
            buyer, settings.party_a_name, settings.party_b_name
        ))
    })
}

/// Open an output file for a CSV export
pub(crate) fn create_output_file(path: &Path) -> DuoResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        DuoError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month(Some("2024-03")).unwrap().to_string(), "2024-03");
        assert_eq!(parse_month(None).unwrap(), MonthKey::current());
        assert!(parse_month(Some("2024-3")).unwrap_err().is_validation());
        assert!(parse_month(Some("2024-13")).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2024-03-22")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 22).unwrap()
        );
        assert!(parse_date(Some("22/03/2024")).is_err());
        assert!(parse_date(Some("2024-02-30")).is_err());
        assert!(parse_date(Some("2024-3-22")).unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount_and_buyer() {
        assert_eq!(parse_amount("150.00").unwrap().cents(), 15000);
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert!(parse_amount("--5.50").unwrap_err().is_validation());
        assert!(parse_amount("99999999999999999").unwrap_err().is_validation());

        let settings = Settings::default();
        assert_eq!(parse_buyer(&settings, "Partner B").unwrap(), Buyer::PartyB);
        assert!(parse_buyer(&settings, "nobody").is_err());
    }
}
