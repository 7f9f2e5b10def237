//! Storage initialization
//!
//! Handles first-run setup and the default category set

use crate::config::paths::DuoPaths;
use crate::config::settings::Settings;
use crate::error::DuoError;
use crate::models::{Category, CategoryId, Money};

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// The starter categories for a new household
///
/// Four shared categories split between both parties, and one personal
/// category for each party named after them.
pub fn default_categories(settings: &Settings) -> Vec<Category> {
    let personal_a = format!("Personal ({})", settings.party_a_name);
    let personal_b = format!("Personal ({})", settings.party_b_name);

    let defaults: [(&str, &str, i64, bool); 6] = [
        ("📆", "Monthly Bills", 2000, true),
        ("🛒", "Groceries & Pharmacy", 800, true),
        ("🍽️", "Eating Out & Entertainment", 400, true),
        ("🧹", "Household Items", 300, true),
        ("👤", &personal_a, 500, false),
        ("👤", &personal_b, 500, false),
    ];

    defaults
        .iter()
        .zip(1u32..)
        .map(|(&(emoji, name, dollars, shared), id)| {
            Category::with_emoji(
                CategoryId::new(id),
                name,
                emoji,
                Money::from_dollars_cents(dollars, 0),
                shared,
            )
        })
        .collect()
}

/// Initialize storage for a fresh installation
///
/// Creates the data directory and writes the default categories unless a
/// categories file already exists.
pub fn initialize_storage(paths: &DuoPaths, settings: &Settings) -> Result<(), DuoError> {
    paths.ensure_directories()?;

    if !paths.categories_file().exists() {
        let data = CategoryData {
            categories: default_categories(settings),
        };
        write_json_atomic(paths.categories_file(), &data)?;
    }

    Ok(())
}
