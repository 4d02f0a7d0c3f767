//! Output module for generating sheet summaries and reports
//!
//! This module handles:
//! - Loading a sheet from storage into a summary
//! - Rendering that summary as markdown

mod markdown;
mod traits;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use traits::{OutputError, OutputResult, SheetSummary, EMAILS_COLUMN};

use crate::storage::{SheetStore, StorageError};
use crate::HarvestError;

/// Generates a sheet summary from storage
///
/// # Arguments
///
/// * `storage` - The storage backend holding the sheet
/// * `sheet_name` - Name of the sheet to summarize
///
/// # Returns
///
/// * `Ok(SheetSummary)` - Successfully generated summary
/// * `Err(HarvestError)` - The sheet does not exist or could not be read
pub fn generate_summary(
    storage: &dyn SheetStore,
    sheet_name: &str,
) -> Result<SheetSummary, HarvestError> {
    let sheet = storage
        .find_sheet(sheet_name)?
        .ok_or_else(|| StorageError::SheetNotFound(sheet_name.to_string()))?;

    let mut rows = storage.rows(sheet.id)?.into_iter();
    let header = rows.next().unwrap_or_default();

    Ok(SheetSummary {
        sheet_name: sheet.name,
        created_at: sheet.created_at,
        updated_at: sheet.updated_at,
        header,
        rows: rows.collect(),
    })
}
