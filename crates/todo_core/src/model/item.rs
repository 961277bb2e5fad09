//! To-do item domain model.
//!
//! # Invariants
//! - Every item references exactly one category for its whole lifetime.
//! - `done` starts as `false` and only changes through toggling.

use crate::model::category::CategoryId;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for items.
pub type ItemId = Uuid;

/// One to-do entry inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub uuid: ItemId,
    pub category_id: CategoryId,
    pub title: String,
    pub done: bool,
    /// Unix epoch milliseconds, assigned by storage.
    pub created_at: i64,
    /// Unix epoch milliseconds of the last toggle (or creation).
    pub updated_at: i64,
}

impl Item {
    /// Creates an unsaved, not-done item under `category_id`.
    pub fn new(category_id: CategoryId, title: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            category_id,
            title: title.into(),
            done: false,
            created_at: 0,
            updated_at: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyItemTitle);
        }
        Ok(())
    }
}
