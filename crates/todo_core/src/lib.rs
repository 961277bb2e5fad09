//! Core domain logic for the to-do list.
//! Categories own items; both live in an embedded SQLite store.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId, DEFAULT_COLOR_TAG, FLAT_PALETTE};
pub use model::item::{Item, ItemId};
pub use model::validation::ValidationError;
pub use repo::category_repo::{CategoryDeletePolicy, CategoryRepository, SqliteCategoryRepository};
pub use repo::error::{RepoError, RepoResult};
pub use repo::item_repo::{ItemQuery, ItemRepository, SqliteItemRepository};
pub use search::fold::fold_text;
pub use service::todo_service::TodoService;
pub use store::{SqliteTodoService, TodoStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
