//! CLI command for reading the audit log

use clap::Args;

use crate::error::DuoResult;
use crate::storage::Storage;

/// Arguments for `duo audit`
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Number of recent entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub count: usize,
}

/// Show the most recent audit log entries, oldest first
pub fn handle_audit_command(storage: &Storage, args: AuditArgs) -> DuoResult<()> {
    let entries = storage.audit().read_recent(args.count)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
