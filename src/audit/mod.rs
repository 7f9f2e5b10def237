//! Audit logging for duo-budget
//!
//! Every create, update and delete of a transaction or category (and every
//! settings change) is appended to `audit.log` as one JSON line, with the
//! entity's state before and after. This is the application's operational
//! log: `duo audit` prints the most recent entries.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
