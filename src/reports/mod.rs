//! Reports module for duo-budget
//!
//! The two calculations the rest of the application is built around:
//! per-category monthly rollups and the settlement between the parties.

pub mod rollup;
pub mod settlement;

pub use rollup::{
    available_budget, months_with_activity, months_with_activity_as_of, rollup_for_month,
    BudgetStatus, CategoryRollup, MonthlyOverview,
};
pub use settlement::{settle, BalanceInfo, SETTLEMENT_TOLERANCE};
