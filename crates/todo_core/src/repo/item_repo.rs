//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/search/toggle/delete over the `items` table.
//! - Keep title folding and ordering rules inside the SQL boundary.
//!
//! # Invariants
//! - Unfiltered listing is insertion order (`seq ASC`).
//! - Filtered listing matches on `todo_fold(title)` and is ordered by
//!   `todo_fold(title) ASC, title ASC, seq ASC`.
//! - An empty filter is the unfiltered listing, including its order.
//! - Items can only be created under an existing category.

use crate::model::category::CategoryId;
use crate::model::item::{Item, ItemId};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::{bool_to_int, ensure_connection_ready, parse_uuid};
use crate::search::fold::fold_text;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const ITEM_SELECT_SQL: &str = "SELECT
    uuid,
    category_uuid,
    title,
    done,
    created_at,
    updated_at
FROM items";

/// Typed list/search parameters for items of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub category_id: CategoryId,
    /// Substring filter; `None` or `""` lists everything in insertion order.
    pub text: Option<String>,
}

impl ItemQuery {
    /// All items of a category, insertion order.
    pub fn all(category_id: CategoryId) -> Self {
        Self {
            category_id,
            text: None,
        }
    }

    /// Items of a category whose title contains `text`.
    pub fn matching(category_id: CategoryId, text: impl Into<String>) -> Self {
        Self {
            category_id,
            text: Some(text.into()),
        }
    }

    /// Folded filter text, or `None` when the query is unfiltered.
    ///
    /// Text that folds to nothing (e.g. a lone combining accent) is unfiltered.
    pub fn folded_filter(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(fold_text)
            .filter(|folded| !folded.is_empty())
    }
}

/// Repository interface for item operations.
pub trait ItemRepository {
    /// Persists a prepared item and returns the stored record.
    ///
    /// Fails with `CategoryNotFound` when `item.category_id` is unknown.
    fn insert_item(&self, item: &Item) -> RepoResult<Item>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    /// Lists items of one category; unknown category is `CategoryNotFound`.
    fn list_items(&self, query: &ItemQuery) -> RepoResult<Vec<Item>>;
    /// Flips `done` and returns the updated record.
    fn toggle_done(&self, id: ItemId) -> RepoResult<Item>;
    fn delete_item(&self, id: ItemId) -> RepoResult<()>;

    /// Creates a not-done item under `category_id`.
    fn create_item(&self, category_id: CategoryId, title: &str) -> RepoResult<Item> {
        self.insert_item(&Item::new(category_id, title))
    }

    fn list_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Item>> {
        self.list_items(&ItemQuery::all(category_id))
    }

    fn search_items(&self, category_id: CategoryId, text: &str) -> RepoResult<Vec<Item>> {
        self.list_items(&ItemQuery::matching(category_id, text))
    }
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn category_exists(&self, category_id: CategoryId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE uuid = ?1);",
            [category_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn insert_item(&self, item: &Item) -> RepoResult<Item> {
        item.validate()?;

        // Parent check and insert in one statement.
        let inserted = self.conn.execute(
            "INSERT INTO items (uuid, category_uuid, title, done)
             SELECT ?1, ?2, ?3, ?4
             WHERE EXISTS (SELECT 1 FROM categories WHERE uuid = ?2);",
            params![
                item.uuid.to_string(),
                item.category_id.to_string(),
                item.title.as_str(),
                bool_to_int(item.done),
            ],
        )?;
        if inserted == 0 {
            return Err(RepoError::CategoryNotFound(item.category_id));
        }

        self.get_item(item.uuid)?.ok_or_else(|| {
            RepoError::InvalidData(format!("item {} missing on read-back after insert", item.uuid))
        })
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }
        Ok(None)
    }

    fn list_items(&self, query: &ItemQuery) -> RepoResult<Vec<Item>> {
        if !self.category_exists(query.category_id)? {
            return Err(RepoError::CategoryNotFound(query.category_id));
        }

        let mut sql = format!("{ITEM_SELECT_SQL} WHERE category_uuid = ?");
        let mut bind_values: Vec<Value> = vec![Value::Text(query.category_id.to_string())];

        match query.folded_filter() {
            Some(needle) => {
                sql.push_str(
                    " AND instr(todo_fold(title), ?) > 0 \
                     ORDER BY todo_fold(title) ASC, title ASC, seq ASC",
                );
                bind_values.push(Value::Text(needle));
            }
            None => sql.push_str(" ORDER BY seq ASC"),
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn toggle_done(&self, id: ItemId) -> RepoResult<Item> {
        let changed = self.conn.execute(
            "UPDATE items
             SET
                done = 1 - done,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::ItemNotFound(id));
        }

        self.get_item(id)?.ok_or(RepoError::ItemNotFound(id))
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::ItemNotFound(id));
        }
        Ok(())
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let uuid_text: String = row.get("uuid")?;
    let category_text: String = row.get("category_uuid")?;

    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in items.done"
            )));
        }
    };

    let item = Item {
        uuid: parse_uuid(&uuid_text, "items.uuid")?,
        category_id: parse_uuid(&category_text, "items.category_uuid")?,
        title: row.get("title")?,
        done,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    item.validate()?;
    Ok(item)
}
