//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DuoError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

/// Repository for category persistence
///
/// Categories are kept ordered by id, which is also the display order.
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<BTreeMap<CategoryId, Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load categories from disk
    ///
    /// Fails if two stored categories share an id.
    pub fn load(&self) -> Result<(), DuoError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self
            .categories
            .write()
            .map_err(|e| DuoError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.clear();
        for category in file_data.categories {
            let id = category.id;
            if categories.insert(id, category).is_some() {
                return Err(DuoError::Storage(format!(
                    "Duplicate category id {} in {}",
                    id,
                    self.path.display()
                )));
            }
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), DuoError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| DuoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = CategoryData {
            categories: categories.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, DuoError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| DuoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.get(&id).cloned())
    }

    /// Get all categories ordered by id
    pub fn get_all(&self) -> Result<Vec<Category>, DuoError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| DuoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.values().cloned().collect())
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, DuoError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| DuoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(categories
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// The id a newly created category should receive
    pub fn next_id(&self) -> Result<CategoryId, DuoError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| DuoError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories
            .keys()
            .next_back()
            .map(CategoryId::next)
            .unwrap_or(CategoryId::new(1)))
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), DuoError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| DuoError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.insert(category.id, category);
        Ok(())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, DuoError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| DuoError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(categories.len())
    }
}
