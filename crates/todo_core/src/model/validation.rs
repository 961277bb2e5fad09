//! Write-path validation errors shared by category and item models.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reasons for records that must never reach storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Category name is empty or whitespace-only.
    EmptyCategoryName,
    /// Item title is empty or whitespace-only.
    EmptyItemTitle,
    /// Color tag is not six hex digits (optionally prefixed by `#`).
    InvalidColorTag(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCategoryName => write!(f, "category name cannot be blank"),
            Self::EmptyItemTitle => write!(f, "item title cannot be blank"),
            Self::InvalidColorTag(value) => {
                write!(f, "invalid color tag `{value}`; expected RRGGBB hex")
            }
        }
    }
}

impl Error for ValidationError {}
