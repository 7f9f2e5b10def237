//! Transaction display formatting

use crate::config::Settings;
use crate::models::{Category, Transaction};

use super::report::{separator, truncate};

fn category_label(categories: &[Category], txn: &Transaction) -> String {
    categories
        .iter()
        .find(|c| c.id == txn.category_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("(unknown #{})", txn.category_id))
}

/// Format a single transaction as a table row
pub fn format_transaction_row(txn: &Transaction, categories: &[Category], settings: &Settings) -> String {
    format!(
        "{:12} {:10} {:24} {:12} {:>12}  {}",
        txn.id.short(),
        txn.date.format("%Y-%m-%d"),
        truncate(&category_label(categories, txn), 24),
        truncate(settings.buyer_label(txn.buyer), 12),
        settings.format_money(txn.amount),
        truncate(&txn.description, 30)
    )
}

/// Format a list of transactions as a table
pub fn format_transaction_list(
    transactions: &[Transaction],
    categories: &[Category],
    settings: &Settings,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:24} {:12} {:>12}  {}\n",
        "ID", "Date", "Category", "Paid by", "Amount", "Description"
    ));
    output.push_str(&separator(90));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, categories, settings));
        output.push('\n');
    }

    output.push_str(&format!("\n{} transaction(s)\n", transactions.len()));
    output
}

/// Format every field of one transaction
pub fn format_transaction_details(
    txn: &Transaction,
    categories: &[Category],
    settings: &Settings,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("  Amount:      {}\n", settings.format_money(txn.amount)));
    output.push_str(&format!("  Category:    {}\n", category_label(categories, txn)));
    output.push_str(&format!("  Paid by:     {}\n", settings.buyer_label(txn.buyer)));

    if !txn.location.is_empty() {
        output.push_str(&format!("  Location:    {}\n", txn.location));
    }
    if !txn.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", txn.description));
    }

    output.push_str(&format!(
        "  Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if txn.updated_at != txn.created_at {
        output.push_str(&format!(
            "  Updated:     {}\n",
            txn.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}
