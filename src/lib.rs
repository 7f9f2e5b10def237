//! duo-budget - shared household expense tracker
//!
//! This library provides the core of the `duo` command line tool. Two people
//! share a set of monthly spending categories; every purchase is recorded
//! with who paid for it, and at the end of the month the shared spending is
//! split evenly to work out who owes whom.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (money, months, categories, transactions)
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging of every change
//! - `services`: Business logic layer
//! - `reports`: Monthly rollups and the settlement calculation
//! - `display`: Terminal formatting
//! - `export`: CSV export
//! - `cli`: Command handlers for the `duo` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use duo_budget::config::{DuoPaths, Settings};
//! use duo_budget::models::MonthKey;
//! use duo_budget::reports::settle;
//! use duo_budget::storage::Storage;
//!
//! let paths = DuoPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let transactions = storage.transactions.get_all()?;
//! let categories = storage.categories.get_all()?;
//! let balance = settle(&transactions, &categories, MonthKey::current());
//! println!("{}", balance.summary(&settings));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{DuoError, DuoResult};
