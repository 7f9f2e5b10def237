//! Service layer for duo-budget
//!
//! The service layer provides business logic on top of the storage layer:
//! validation at the boundary, immediate persistence and audit logging.

pub mod category;
pub mod transaction;

pub use category::CategoryService;
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService};
