//! Domain model for categories and their to-do items.
//!
//! # Responsibility
//! - Define the records shared by repositories and services.
//! - Own write-path validation rules.
//!
//! # Invariants
//! - Every record is identified by a stable UUID generated in core.
//! - Records are validated before any SQL mutation.

pub mod category;
pub mod item;
pub mod validation;
