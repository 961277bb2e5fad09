//! Category domain model.
//!
//! # Responsibility
//! - Define the named grouping that owns to-do items.
//! - Normalize and validate display color tags.
//!
//! # Invariants
//! - `uuid` is generated once and never reused for another category.
//! - `name` is stored verbatim but must not be blank.
//! - `color_tag` is always six uppercase hex digits without `#`.

use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for categories.
pub type CategoryId = Uuid;

/// Color tag used when no usable color is available.
pub const DEFAULT_COLOR_TAG: &str = "61BBFF";

/// Flat palette used for automatic color assignment.
pub const FLAT_PALETTE: &[&str] = &[
    "E74C3C", "E67E22", "F1C40F", "2ECC71", "1ABC9C", "3498DB", "9B59B6", "34495E", "16A085",
    "27AE60", "2980B9", "8E44AD", "F39C12", "D35400", "C0392B", "7F8C8D",
];

static COLOR_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").expect("valid color tag regex"));

/// Named grouping of items carrying a display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub uuid: CategoryId,
    /// User-provided display name, kept exactly as entered.
    pub name: String,
    /// Display-only color, `RRGGBB`.
    pub color_tag: String,
    /// Unix epoch milliseconds, assigned by storage.
    pub created_at: i64,
}

impl Category {
    /// Creates an unsaved category with a generated ID.
    ///
    /// `created_at` is `0` until the record is read back from storage.
    pub fn new(name: impl Into<String>, color_tag: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            color_tag: color_tag.into(),
            created_at: 0,
        }
    }

    /// Validates write-path invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        normalize_color_tag(&self.color_tag)?;
        Ok(())
    }
}

/// Normalizes `#aabbcc` / `AABBCC` style input to `AABBCC`.
pub fn normalize_color_tag(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    COLOR_TAG_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|hex| hex.as_str().to_ascii_uppercase())
        .ok_or_else(|| ValidationError::InvalidColorTag(value.to_string()))
}

/// Picks a palette color from the random bytes of a category ID.
///
/// Gives a varied but reproducible color for each category without a
/// separate random source.
pub fn palette_color_for(id: &CategoryId) -> &'static str {
    let bytes = id.as_bytes();
    let seed = bytes.iter().fold(0usize, |acc, byte| {
        acc.wrapping_mul(31).wrapping_add(usize::from(*byte))
    });
    FLAT_PALETTE
        .get(seed % FLAT_PALETTE.len())
        .copied()
        .unwrap_or(DEFAULT_COLOR_TAG)
}
