//! Output types
//!
//! This module defines the error type for output operations and the
//! sheet summary that reports are rendered from.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Title of the column holding harvested emails
pub const EMAILS_COLUMN: &str = "Emails";

/// A sheet's content, ready to be rendered
#[derive(Debug, Clone, Default)]
pub struct SheetSummary {
    pub sheet_name: String,
    pub created_at: String,
    pub updated_at: String,

    /// First row of the sheet, if any
    pub header: Vec<String>,

    /// Remaining rows
    pub rows: Vec<Vec<String>>,
}

impl SheetSummary {
    /// Number of data rows (header excluded)
    pub fn listing_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of rows with a non-empty Emails cell
    pub fn listings_with_email(&self) -> usize {
        let Some(column) = self.header.iter().position(|h| h == EMAILS_COLUMN) else {
            return 0;
        };

        self.rows
            .iter()
            .filter(|row| row.get(column).is_some_and(|cell| !cell.trim().is_empty()))
            .count()
    }
}
