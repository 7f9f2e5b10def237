//! Category CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::category::{format_category_details, format_category_list};
use crate::error::DuoResult;
use crate::services::CategoryService;
use crate::storage::Storage;

use super::parse_amount;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their monthly limits
    List,

    /// Add a new category
    Add {
        /// Category name
        name: String,
        /// Monthly limit (e.g., "400" or "400.00")
        #[arg(short, long)]
        limit: String,
        /// Spend is personal and not split between the two of you
        #[arg(long)]
        personal: bool,
        /// Icon shown next to the name
        #[arg(short, long)]
        emoji: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> DuoResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories, settings));
        }

        CategoryCommands::Add {
            name,
            limit,
            personal,
            emoji,
        } => {
            let limit = parse_amount(&limit)?;
            let category = service.create(&name, limit, !personal, emoji.as_deref())?;
            println!(
                "Created category #{}: {} ({} per month, {})",
                category.id,
                category.display_name(),
                settings.format_money(category.limit),
                if category.shared { "shared" } else { "personal" }
            );
        }

        CategoryCommands::Show { category } => {
            let category = service.resolve(&category)?;
            print!("{}", format_category_details(&category, settings));
        }
    }

    Ok(())
}
