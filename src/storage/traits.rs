//! Storage traits and error types
//!
//! This module defines the trait interface for sheet backends and
//! associated error types.

use crate::storage::SheetRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A row-oriented, named-sheet store
///
/// This is the persistence seam the harvest writes listings through.
/// Rows keep the order they were appended in.
pub trait SheetStore {
    /// Opens the sheet called `name`, creating it when missing
    fn open_or_create(&mut self, name: &str) -> StorageResult<SheetRecord>;

    /// Looks a sheet up by name
    fn find_sheet(&self, name: &str) -> StorageResult<Option<SheetRecord>>;

    /// Lists all sheets, oldest first
    fn list_sheets(&self) -> StorageResult<Vec<SheetRecord>>;

    /// Removes every row of a sheet
    fn clear(&mut self, sheet_id: i64) -> StorageResult<()>;

    /// Appends one row after the last one
    fn append_row(&mut self, sheet_id: i64, cells: &[String]) -> StorageResult<()>;

    /// Appends several rows at once, all or nothing
    ///
    /// # Returns
    ///
    /// The number of rows written
    fn append_rows(&mut self, sheet_id: i64, rows: &[Vec<String>]) -> StorageResult<usize>;

    /// Reads all rows in order
    fn rows(&self, sheet_id: i64) -> StorageResult<Vec<Vec<String>>>;

    /// Counts the rows of a sheet
    fn row_count(&self, sheet_id: i64) -> StorageResult<u64>;
}
