//! Export module for duo-budget
//!
//! Spreadsheet-friendly CSV export of the transaction history. Monthly
//! report CSVs live with the reports themselves.

pub mod csv;

pub use self::csv::export_transactions_csv;
