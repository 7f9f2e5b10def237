//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models as tables and detail views.

pub mod category;
pub mod report;
pub mod transaction;

pub use category::{format_category_details, format_category_list};
pub use transaction::{format_transaction_details, format_transaction_list};
