//! Storage module for persisting harvested listings
//!
//! Listings end up as rows of a named sheet. This module handles:
//! - SQLite database initialization and schema management
//! - Sheet creation and lookup by name
//! - Ordered row storage

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{SheetStore, StorageError, StorageResult};

use crate::HarvestError;
use std::path::Path;

/// Initializes or opens a storage database
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(HarvestError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStorage, HarvestError> {
    SqliteStorage::new(path)
}

/// Represents a sheet in the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRecord {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}
