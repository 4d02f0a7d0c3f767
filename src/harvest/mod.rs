//! Harvest orchestration
//!
//! Ties the pieces together for one run: search the Places API once per zip
//! code, look up each unique listing, crawl its website for emails, and write
//! one row per listing to the configured sheet.

mod listing;

pub use listing::{emails_cell, header_row, listing_row, unique_place_names, HEADER};

use crate::config::Config;
use crate::crawler::{build_http_client, EmailCrawler};
use crate::output::{generate_markdown_summary, generate_summary};
use crate::places::PlacesClient;
use crate::storage::SheetStore;
use crate::HarvestError;
use std::path::Path;
use std::time::Duration;

/// Timeout for a single Places API request
const PLACES_TIMEOUT: Duration = Duration::from_secs(30);

/// Counts describing one harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Zip codes the query was run for
    pub zip_codes_searched: usize,

    /// Distinct listings found across all searches
    pub unique_places: usize,

    /// Listing rows written (header excluded)
    pub rows_written: usize,

    /// Rows with a non-empty Emails cell
    pub listings_with_email: usize,
}

/// Runs a full harvest and writes the results to `store`
///
/// The sheet is cleared first, so a run always leaves exactly one header row
/// followed by the listings it found. Failures for a single zip code, place
/// or website are logged and skipped; only configuration, client setup and
/// storage failures abort the run.
///
/// # Returns
///
/// * `Ok(HarvestReport)` - The run completed
/// * `Err(HarvestError)` - Missing API key, client setup or storage failure
pub async fn run_harvest(
    config: &Config,
    store: &mut dyn SheetStore,
) -> Result<HarvestReport, HarvestError> {
    let places_http = build_http_client(&config.user_agent, PLACES_TIMEOUT)?;
    let places = PlacesClient::new(&config.places, places_http)?;
    let crawler = EmailCrawler::new(&config.crawler, &config.user_agent)?;

    let sheet = store.open_or_create(&config.output.sheet_name)?;
    store.clear(sheet.id)?;
    store.append_row(sheet.id, &header_row())?;
    tracing::info!("Writing listings to sheet '{}'", sheet.name);

    let zip_codes = config.places.effective_zip_codes();
    let mut hits = Vec::new();
    for zip in &zip_codes {
        let query = format!("{} {}", config.places.query, zip);
        match places.search_text(&query).await {
            Ok(found) => {
                tracing::info!("Search '{}': {} results", query, found.len());
                hits.extend(found);
            }
            Err(e) => tracing::warn!("Search '{}' failed: {}", query, e),
        }
    }

    let names = unique_place_names(&hits);
    tracing::info!(
        "{} unique listings across {} zip codes",
        names.len(),
        zip_codes.len()
    );

    let mut rows = Vec::with_capacity(names.len());
    let mut listings_with_email = 0;
    for name in &names {
        let details = match places.place_details(name).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!("Details for {} failed: {}", name, e);
                continue;
            }
        };

        let emails = match details.website_uri.as_deref().map(str::trim) {
            Some(website) if !website.is_empty() => match crawler.crawl(website).await {
                Ok(report) => emails_cell(&report.emails),
                Err(e) => {
                    tracing::warn!("Skipping website of {}: {}", details.title(), e);
                    String::new()
                }
            },
            _ => {
                tracing::debug!("{} has no website", details.title());
                String::new()
            }
        };

        if !emails.is_empty() {
            listings_with_email += 1;
        }
        rows.push(listing_row(&details, &emails));
    }

    let rows_written = store.append_rows(sheet.id, &rows)?;

    if let Some(summary_path) = &config.output.summary_path {
        let summary = generate_summary(&*store, &config.output.sheet_name)?;
        generate_markdown_summary(&summary, Path::new(summary_path))?;
        tracing::info!("Summary written to {}", summary_path);
    }

    let report = HarvestReport {
        zip_codes_searched: zip_codes.len(),
        unique_places: names.len(),
        rows_written,
        listings_with_email,
    };

    tracing::info!(
        "Harvest finished: {} rows written, {} with emails",
        report.rows_written,
        report.listings_with_email
    );

    Ok(report)
}
