//! CLI commands for reports
//!
//! The monthly dashboard and the settlement between the two parties.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::DuoResult;
use crate::reports::{months_with_activity, settle, MonthlyOverview};
use crate::storage::Storage;

use super::{create_output_file, parse_month};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spend against limits per category
    #[command(alias = "dashboard")]
    Overview {
        /// Month to report on (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Who owes whom for shared spending
    #[command(alias = "settle")]
    Balance {
        /// Month to settle (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> DuoResult<()> {
    match cmd {
        ReportCommands::Overview { month, output } => {
            handle_overview_report(storage, settings, month, output)
        }
        ReportCommands::Balance { month, output } => {
            handle_balance_report(storage, settings, month, output)
        }
    }
}

fn handle_overview_report(
    storage: &Storage,
    settings: &Settings,
    month: Option<String>,
    output: Option<PathBuf>,
) -> DuoResult<()> {
    let month = parse_month(month.as_deref())?;
    let transactions = storage.transactions.get_all()?;
    let categories = storage.categories.get_all()?;

    let report = MonthlyOverview::generate(&transactions, &categories, month);

    if let Some(path) = output {
        let mut writer = create_output_file(&path)?;
        report.export_csv(&mut writer)?;
        println!("Overview exported to: {}", path.display());
    } else {
        println!("{}", report.format_terminal(settings));
    }

    Ok(())
}

fn handle_balance_report(
    storage: &Storage,
    settings: &Settings,
    month: Option<String>,
    output: Option<PathBuf>,
) -> DuoResult<()> {
    let month = parse_month(month.as_deref())?;
    let transactions = storage.transactions.get_all()?;
    let categories = storage.categories.get_all()?;

    let balance = settle(&transactions, &categories, month);

    if let Some(path) = output {
        let mut writer = create_output_file(&path)?;
        balance.export_csv(settings, &mut writer)?;
        println!("Balance exported to: {}", path.display());
    } else {
        println!("{}", balance.format_terminal(settings));
    }

    Ok(())
}

/// List the months that can be reported on, newest first
pub fn handle_months_command(storage: &Storage) -> DuoResult<()> {
    let transactions = storage.transactions.get_all()?;

    for month in months_with_activity(&transactions).iter().rev() {
        let count = transactions.iter().filter(|t| t.is_in_month(*month)).count();
        println!("{}  {:<16} {:>4} transactions", month, month.label(), count);
    }

    Ok(())
}
