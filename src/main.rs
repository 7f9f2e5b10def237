use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use duo_budget::cli::{
    handle_audit_command, handle_category_command, handle_config_command, handle_export_command,
    handle_init_command, handle_months_command, handle_report_command,
    handle_transaction_command, AuditArgs, CategoryCommands, ConfigArgs, ExportArgs, InitArgs,
    ReportCommands, TransactionCommands,
};
use duo_budget::config::{DuoPaths, Settings};
use duo_budget::storage::Storage;

#[derive(Parser)]
#[command(
    name = "duo",
    version,
    about = "Shared household expense tracker for two",
    long_about = "duo-budget tracks the spending of a two-person household against \
                  monthly category limits, and works out who owes whom for shared \
                  expenses at the end of the month."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up a new household budget
    Init(InitArgs),

    /// Show or change configuration
    Config(ConfigArgs),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Monthly reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// List months with recorded spending
    Months,

    /// Export transactions to CSV
    Export(ExportArgs),

    /// Show recent changes from the audit log
    Audit(AuditArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = DuoPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths)?;
    storage.load_all()?;

    let Some(command) = cli.command else {
        println!("duo-budget - shared household expenses for two");
        println!();
        println!("Run 'duo --help' for usage information.");
        if !storage.is_initialized() {
            println!("Run 'duo init' to get started.");
        }
        return Ok(());
    };

    let needs_data = !matches!(command, Commands::Init(_) | Commands::Config(_));
    if needs_data && !storage.is_initialized() {
        bail!("duo-budget is not initialized. Run 'duo init' first.");
    }

    match command {
        Commands::Init(args) => handle_init_command(&storage, &mut settings, args)?,
        Commands::Config(args) => handle_config_command(&storage, &mut settings, args)?,
        Commands::Category(cmd) => handle_category_command(&storage, &settings, cmd)?,
        Commands::Transaction(cmd) => handle_transaction_command(&storage, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Months => handle_months_command(&storage)?,
        Commands::Export(args) => handle_export_command(&storage, &settings, args)?,
        Commands::Audit(args) => handle_audit_command(&storage, args)?,
    }

    Ok(())
}
