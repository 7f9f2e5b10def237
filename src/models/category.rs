//! Spending category model
//!
//! Categories are configuration-time reference data: each has a monthly
//! spending limit and a flag saying whether its cost is split between the
//! two parties. Transactions reference categories but never modify them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;

/// A spending category with a monthly limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Optional icon shown next to the name
    #[serde(default)]
    pub emoji: String,

    /// Monthly spending limit
    pub limit: Money,

    /// Whether spend in this category is split 50/50 for settlement
    #[serde(default)]
    pub shared: bool,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(id: CategoryId, name: impl Into<String>, limit: Money, shared: bool) -> Self {
        Self {
            id,
            name: name.into(),
            emoji: String::new(),
            limit,
            shared,
            created_at: Utc::now(),
        }
    }

    /// Create a new category with an icon
    pub fn with_emoji(
        id: CategoryId,
        name: impl Into<String>,
        emoji: impl Into<String>,
        limit: Money,
        shared: bool,
    ) -> Self {
        let mut category = Self::new(id, name, limit, shared);
        category.emoji = emoji.into();
        category
    }

    /// Name with the icon prefixed, if there is one
    pub fn display_name(&self) -> String {
        if self.emoji.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.emoji, self.name)
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if self.limit.is_negative() {
            return Err(CategoryValidationError::NegativeLimit);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeLimit,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::NegativeLimit => write!(f, "Spending limit cannot be negative"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
