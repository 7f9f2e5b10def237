//! Category service
//!
//! Categories are configured up front and never deleted; this service only
//! creates and looks them up.

use crate::audit::EntityType;
use crate::error::{DuoError, DuoResult};
use crate::models::{Category, CategoryId, Money};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category with the next free id
    pub fn create(&self, name: &str, limit: Money, shared: bool, emoji: Option<&str>) -> DuoResult<Category> {
        let name = name.trim();

        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(DuoError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let id = self.storage.categories.next_id()?;
        let category = Category::with_emoji(id, name, emoji.unwrap_or("").trim(), limit, shared);

        category
            .validate()
            .map_err(|e| DuoError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> DuoResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name or id (`3` or `#3`)
    pub fn find(&self, identifier: &str) -> DuoResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), but a miss is an error
    pub fn resolve(&self, identifier: &str) -> DuoResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| DuoError::category_not_found(identifier))
    }

    /// All categories ordered by id
    pub fn list(&self) -> DuoResult<Vec<Category>> {
        self.storage.categories.get_all()
    }
}
