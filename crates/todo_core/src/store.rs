//! Explicit store handle owning the SQLite connection.
//!
//! # Responsibility
//! - Own one migrated connection for the lifetime chosen by the entry point.
//! - Hand out repositories and services borrowing that connection.
//!
//! # Invariants
//! - There is no process-global connection; callers pass the handle down.
//! - All repositories built from one store see the same data.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::repo::category_repo::SqliteCategoryRepository;
use crate::repo::error::RepoResult;
use crate::repo::item_repo::SqliteItemRepository;
use crate::service::todo_service::TodoService;
use rusqlite::Connection;
use std::path::Path;

/// Service type produced by [`TodoStore::service`].
pub type SqliteTodoService<'conn> =
    TodoService<SqliteCategoryRepository<'conn>, SqliteItemRepository<'conn>>;

pub struct TodoStore {
    conn: Connection,
}

impl TodoStore {
    /// Opens (creating if needed) and migrates a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    pub fn categories(&self) -> RepoResult<SqliteCategoryRepository<'_>> {
        SqliteCategoryRepository::try_new(&self.conn)
    }

    pub fn items(&self) -> RepoResult<SqliteItemRepository<'_>> {
        SqliteItemRepository::try_new(&self.conn)
    }

    /// Builds the use-case service over this store.
    pub fn service(&self) -> RepoResult<SqliteTodoService<'_>> {
        Ok(TodoService::new(self.categories()?, self.items()?))
    }

    /// Raw connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
