//! Case and diacritic folding for title search.
//!
//! # Invariants
//! - Folding is deterministic and idempotent: `fold(fold(x)) == fold(x)`.
//! - Only canonical combining marks are removed; base letters are kept.

use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::Connection;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// SQL name of the folding function registered on every connection.
pub const FOLD_SQL_FUNCTION: &str = "todo_fold";

/// Folds text for case-insensitive and diacritic-insensitive matching.
///
/// `"Café"` and `"CAFE"` both fold to `"cafe"`.
pub fn fold_text(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .to_lowercase()
}

/// Registers [`fold_text`] as the deterministic SQL function `todo_fold(text)`.
pub fn register_fold_function(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_SQL_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx: &Context<'_>| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|text| fold_text(&text)))
        },
    )
}
