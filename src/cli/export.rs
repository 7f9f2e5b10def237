//! CLI command for data export

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::DuoResult;
use crate::export::export_transactions_csv;
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

use super::{create_output_file, parse_month};

/// Arguments for `duo export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path
    pub output: PathBuf,

    /// Only transactions from this month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,
}

/// Write transaction history to a CSV file
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    args: ExportArgs,
) -> DuoResult<()> {
    let mut filter = TransactionFilter::new();
    if let Some(month) = args.month.as_deref() {
        filter = filter.month(parse_month(Some(month))?);
    }

    let transactions = TransactionService::new(storage).list(filter)?;
    let categories = storage.categories.get_all()?;

    let mut writer = create_output_file(&args.output)?;
    let count = export_transactions_csv(&transactions, &categories, settings, &mut writer)?;

    println!("Exported {} transactions to: {}", count, args.output.display());

    Ok(())
}
