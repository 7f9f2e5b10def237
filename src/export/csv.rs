//! CSV export of transaction history

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::config::Settings;
use crate::error::DuoResult;
use crate::models::{Category, CategoryId, Transaction};

/// One exported row
#[derive(Debug, Serialize)]
struct TransactionRecord<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Shared")]
    shared: bool,
    #[serde(rename = "Paid By")]
    paid_by: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
}

/// Write transactions as CSV with a header row
///
/// Rows keep the order of `transactions`. Party names come from `settings`.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    categories: &[Category],
    settings: &Settings,
    writer: W,
) -> DuoResult<usize> {
    let lookup: HashMap<CategoryId, &Category> = categories.iter().map(|c| (c.id, c)).collect();
    let mut csv = csv::Writer::from_writer(writer);

    for txn in transactions {
        let category = lookup.get(&txn.category_id);
        csv.serialize(TransactionRecord {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            category: category.map(|c| c.name.as_str()).unwrap_or("Unknown"),
            shared: category.map(|c| c.shared).unwrap_or(false),
            paid_by: settings.buyer_label(txn.buyer),
            amount: format!("{:.2}", txn.amount.as_units()),
            location: &txn.location,
            description: &txn.description,
        })?;
    }

    csv.flush()?;
    Ok(transactions.len())
}
