//! Text matching helpers for item search.
//!
//! # Responsibility
//! - Fold titles and queries so matching ignores case and diacritics.
//! - Expose the folding to SQL so filtering stays inside the store query.

pub mod fold;
