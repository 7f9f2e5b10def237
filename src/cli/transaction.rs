//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{DuoError, DuoResult};
use crate::models::Transaction;
use crate::services::{
    CategoryService, CreateTransactionInput, TransactionFilter, TransactionService,
};
use crate::storage::Storage;

use super::{parse_amount, parse_buyer, parse_date, parse_month};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a purchase
    Add {
        /// Amount spent (e.g., "150.00")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Who paid: a, b, joint, or a party name
        #[arg(short, long)]
        buyer: String,
        /// Purchase date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Where the purchase was made
        #[arg(short, long)]
        location: Option<String>,
        /// Notes
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Show transaction history, newest first
    List {
        /// Only this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
        /// Only this category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
        /// Only purchases by this buyer
        #[arg(short, long)]
        buyer: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show transaction details
    Show {
        /// Transaction ID (full or short form)
        id: String,
    },

    /// Edit a transaction; fields not given keep their value
    Edit {
        /// Transaction ID (full or short form)
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        buyer: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short form)
        id: String,
    },
}

fn find_transaction(service: &TransactionService, id: &str) -> DuoResult<Transaction> {
    service
        .find(id)?
        .ok_or_else(|| DuoError::transaction_not_found(id))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> DuoResult<()> {
    let service = TransactionService::new(storage);
    let category_service = CategoryService::new(storage);

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            buyer,
            date,
            location,
            description,
        } => {
            let input = CreateTransactionInput {
                date: parse_date(date.as_deref())?,
                amount: parse_amount(&amount)?,
                category_id: category_service.resolve(&category)?.id,
                buyer: parse_buyer(settings, &buyer)?,
                location,
                description,
            };

            let txn = service.create(input)?;
            println!(
                "Recorded {} on {} paid by {} ({})",
                settings.format_money(txn.amount),
                txn.date,
                settings.buyer_label(txn.buyer),
                txn.id.short()
            );
        }

        TransactionCommands::List {
            month,
            category,
            buyer,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(month) = month {
                filter = filter.month(parse_month(Some(month.as_str()))?);
            }
            if let Some(category) = category {
                filter = filter.category(category_service.resolve(&category)?.id);
            }
            if let Some(buyer) = buyer {
                filter = filter.buyer(parse_buyer(settings, &buyer)?);
            }

            let transactions = service.list(filter)?;
            let categories = category_service.list()?;
            print!("{}", format_transaction_list(&transactions, &categories, settings));
        }

        TransactionCommands::Show { id } => {
            let txn = find_transaction(&service, &id)?;
            let categories = category_service.list()?;
            print!("{}", format_transaction_details(&txn, &categories, settings));
        }

        TransactionCommands::Edit {
            id,
            amount,
            category,
            buyer,
            date,
            location,
            description,
        } => {
            let txn = find_transaction(&service, &id)?;

            let mut input = CreateTransactionInput::from_transaction(&txn);
            if let Some(amount) = amount {
                input.amount = parse_amount(&amount)?;
            }
            if let Some(category) = category {
                input.category_id = category_service.resolve(&category)?.id;
            }
            if let Some(buyer) = buyer {
                input.buyer = parse_buyer(settings, &buyer)?;
            }
            if date.is_some() {
                input.date = parse_date(date.as_deref())?;
            }
            if location.is_some() {
                input.location = location;
            }
            if description.is_some() {
                input.description = description;
            }

            let updated = service.replace(txn.id, input)?;
            println!("Updated transaction {}", updated.id.short());
        }

        TransactionCommands::Delete { id } => {
            let txn = find_transaction(&service, &id)?;
            service.delete(txn.id)?;
            println!(
                "Deleted {} from {} ({})",
                settings.format_money(txn.amount),
                txn.date,
                txn.id.short()
            );
        }
    }

    Ok(())
}
