//! Markdown summary generation
//!
//! Renders a sheet as a markdown document: a short header block followed by
//! the sheet itself as a table.

use crate::output::traits::{OutputResult, SheetSummary};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of a sheet to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &SheetSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a sheet summary as markdown
pub fn format_markdown_summary(summary: &SheetSummary) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", escape_cell(&summary.sheet_name)));

    md.push_str(&format!("- **Created**: {}\n", summary.created_at));
    md.push_str(&format!("- **Updated**: {}\n", summary.updated_at));
    md.push_str(&format!("- **Listings**: {}\n", summary.listing_count()));
    md.push_str(&format!(
        "- **Listings with email**: {}\n\n",
        summary.listings_with_email()
    ));

    if summary.header.is_empty() {
        md.push_str("_This sheet is empty._\n");
        return md;
    }

    let width = summary
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(summary.header.len()))
        .max()
        .unwrap_or(0);

    md.push_str(&format_row(&summary.header, width));
    md.push_str(&format!("|{}\n", "---|".repeat(width)));
    for row in &summary.rows {
        md.push_str(&format_row(row, width));
    }

    md
}

/// Formats one table row, padding short rows with empty cells
fn format_row(cells: &[String], width: usize) -> String {
    let mut line = String::from("|");
    for i in 0..width {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push_str(&format!(" {} |", escape_cell(cell)));
    }
    line.push('\n');
    line
}

/// Escapes characters that would break a markdown table cell
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\r', '\n'], " ")
}
