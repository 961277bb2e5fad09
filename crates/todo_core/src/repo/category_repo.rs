//! Category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/get/delete over the `categories` table.
//! - Own the delete policy for categories that still have items.
//!
//! # Invariants
//! - Listing order is insertion order (`seq ASC`).
//! - Deleting a category never leaves orphaned items behind: either the
//!   items are removed in the same transaction or the delete is refused.

use crate::model::category::{normalize_color_tag, Category, CategoryId};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::{ensure_connection_ready, parse_uuid};
use rusqlite::{params, Connection, OptionalExtension, Row};

const CATEGORY_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    color_tag,
    created_at
FROM categories";

/// What to do with a category's items when the category is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryDeletePolicy {
    /// Remove the category together with all of its items.
    #[default]
    Cascade,
    /// Refuse with `CategoryNotEmpty` while the category owns items.
    RejectIfNotEmpty,
}

/// Repository interface for category operations.
pub trait CategoryRepository {
    /// Persists a prepared category and returns the stored record.
    fn insert_category(&self, category: &Category) -> RepoResult<Category>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    /// Lists all categories in insertion order.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Number of items owned by the category.
    fn count_items(&self, id: CategoryId) -> RepoResult<u64>;
    /// Deletes a category and returns how many items were removed with it.
    fn delete_category_with_policy(
        &self,
        id: CategoryId,
        policy: CategoryDeletePolicy,
    ) -> RepoResult<u64>;

    /// Creates a category with a generated ID.
    fn create_category(&self, name: &str, color_tag: &str) -> RepoResult<Category> {
        self.insert_category(&Category::new(name, color_tag))
    }

    /// Deletes a category using the default cascade policy.
    fn delete_category(&self, id: CategoryId) -> RepoResult<u64> {
        self.delete_category_with_policy(id, CategoryDeletePolicy::Cascade)
    }
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn insert_category(&self, category: &Category) -> RepoResult<Category> {
        category.validate()?;
        let color_tag = normalize_color_tag(&category.color_tag)?;

        self.conn.execute(
            "INSERT INTO categories (uuid, name, color_tag) VALUES (?1, ?2, ?3);",
            params![
                category.uuid.to_string(),
                category.name.as_str(),
                color_tag
            ],
        )?;

        self.get_category(category.uuid)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "category {} missing on read-back after insert",
                category.uuid
            ))
        })
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }
        Ok(None)
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn count_items(&self, id: CategoryId) -> RepoResult<u64> {
        count_items_in(self.conn, id)
    }

    fn delete_category_with_policy(
        &self,
        id: CategoryId,
        policy: CategoryDeletePolicy,
    ) -> RepoResult<u64> {
        let id_text = id.to_string();
        // Connection is borrowed shared; nested transactions are not used here.
        let tx = self.conn.unchecked_transaction()?;

        let exists = tx
            .query_row(
                "SELECT 1 FROM categories WHERE uuid = ?1;",
                [id_text.as_str()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .is_some();
        if !exists {
            return Err(RepoError::CategoryNotFound(id));
        }

        let item_count = count_items_in(&tx, id)?;

        if policy == CategoryDeletePolicy::RejectIfNotEmpty && item_count > 0 {
            return Err(RepoError::CategoryNotEmpty { id, item_count });
        }

        tx.execute("DELETE FROM items WHERE category_uuid = ?1;", [id_text.as_str()])?;
        tx.execute("DELETE FROM categories WHERE uuid = ?1;", [id_text.as_str()])?;
        tx.commit()?;

        Ok(item_count)
    }
}

fn count_items_in(conn: &Connection, id: CategoryId) -> RepoResult<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM items WHERE category_uuid = ?1;",
        [id.to_string()],
        |row| row.get(0),
    )?;
    u64::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("negative item count {count}")))
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let uuid_text: String = row.get("uuid")?;
    let category = Category {
        uuid: parse_uuid(&uuid_text, "categories.uuid")?,
        name: row.get("name")?,
        color_tag: row.get("color_tag")?,
        created_at: row.get("created_at")?,
    };
    category.validate()?;
    Ok(category)
}
