//! To-do use-case service.
//!
//! # Responsibility
//! - Provide the entry points a list screen needs: add/list/remove
//!   categories, add/list/search/toggle/remove items.
//! - Pick a display color when the caller does not supply one.
//! - Emit metadata-only log events for every mutation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Errors are returned to the caller, never logged and swallowed.
//! - Log lines carry IDs and error codes only, never names or titles.

use crate::model::category::{palette_color_for, Category, CategoryId};
use crate::model::item::{Item, ItemId};
use crate::repo::category_repo::{CategoryDeletePolicy, CategoryRepository};
use crate::repo::error::RepoResult;
use crate::repo::item_repo::{ItemQuery, ItemRepository};
use log::{debug, info, warn};

/// Use-case facade over category and item repositories.
pub struct TodoService<C: CategoryRepository, I: ItemRepository> {
    categories: C,
    items: I,
}

impl<C: CategoryRepository, I: ItemRepository> TodoService<C, I> {
    /// Creates a service using the provided repository implementations.
    pub fn new(categories: C, items: I) -> Self {
        Self { categories, items }
    }

    /// Adds a category; without `color_tag` a palette color is picked.
    pub fn add_category(&self, name: &str, color_tag: Option<&str>) -> RepoResult<Category> {
        let mut category = Category::new(name, "");
        category.color_tag = match color_tag {
            Some(tag) => tag.to_string(),
            None => palette_color_for(&category.uuid).to_string(),
        };

        let result = self.categories.insert_category(&category);
        log_outcome("category_create", &category.uuid.to_string(), &result);
        result
    }

    /// All categories in insertion order.
    pub fn categories(&self) -> RepoResult<Vec<Category>> {
        self.categories.list_categories()
    }

    pub fn category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        self.categories.get_category(id)
    }

    /// Removes a category together with its items.
    pub fn remove_category(&self, id: CategoryId) -> RepoResult<u64> {
        self.remove_category_with_policy(id, CategoryDeletePolicy::Cascade)
    }

    pub fn remove_category_with_policy(
        &self,
        id: CategoryId,
        policy: CategoryDeletePolicy,
    ) -> RepoResult<u64> {
        let result = self.categories.delete_category_with_policy(id, policy);
        if let Ok(removed_items) = &result {
            debug!(
                "event=category_delete module=service id={} policy={:?} removed_items={}",
                id, policy, removed_items
            );
        }
        log_outcome("category_delete", &id.to_string(), &result);
        result
    }

    /// Adds a not-done item to an existing category.
    pub fn add_item(&self, category_id: CategoryId, title: &str) -> RepoResult<Item> {
        let item = Item::new(category_id, title);
        let result = self.items.insert_item(&item);
        log_outcome("item_create", &item.uuid.to_string(), &result);
        result
    }

    /// Items of a category, optionally filtered by a search text.
    ///
    /// `None` and `Some("")` both return the insertion-ordered listing, so
    /// clearing a search box restores the original order.
    pub fn items(&self, category_id: CategoryId, search: Option<&str>) -> RepoResult<Vec<Item>> {
        let query = ItemQuery {
            category_id,
            text: search.map(str::to_string),
        };
        self.items.list_items(&query)
    }

    pub fn item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        self.items.get_item(id)
    }

    /// Flips an item's done flag and returns the updated record.
    pub fn toggle_item(&self, id: ItemId) -> RepoResult<Item> {
        let result = self.items.toggle_done(id);
        log_outcome("item_toggle", &id.to_string(), &result);
        result
    }

    pub fn remove_item(&self, id: ItemId) -> RepoResult<()> {
        let result = self.items.delete_item(id);
        log_outcome("item_delete", &id.to_string(), &result);
        result
    }
}

fn log_outcome<T>(event: &str, id: &str, result: &RepoResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=service status=ok id={id}"),
        Err(err) => warn!(
            "event={event} module=service status=error id={id} error_code={}",
            err.code()
        ),
    }
}
