//! Core data models for duo-budget
//!
//! This module contains the data structures that represent the household
//! budgeting domain: categories, transactions, money, months and the two
//! parties sharing the budget.

pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod party;
pub mod transaction;

pub use category::{Category, CategoryValidationError};
pub use ids::{CategoryId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthKeyParseError};
pub use party::{Buyer, Party};
pub use transaction::{parse_iso_date, Transaction, TransactionValidationError};
