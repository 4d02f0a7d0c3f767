//! Crawler module for email harvesting
//!
//! This module contains the crawl-and-extract pipeline:
//! - HTTP fetching with a bounded timeout
//! - Pattern-based email and link extraction
//! - The FIFO frontier with its page budget
//! - The crawl loop itself

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{CrawlReport, EmailCrawler, PageVisit};
pub use fetcher::{build_http_client, fetch_url, format_user_agent, FetchResult, DEFAULT_FETCH_TIMEOUT};
pub use frontier::Frontier;
pub use parser::{decode_entities, extract_emails, extract_hrefs, parse_page, ParsedPage};

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::HarvestError;
use std::collections::HashSet;

/// Default number of pages fetched per crawl
pub const DEFAULT_PAGE_BUDGET: usize = 10;

/// Crawls one website and returns the email addresses found on it
///
/// This is the plain entry point used by the command line: a fresh crawler
/// with the default user agent and a 5 second fetch timeout.
///
/// # Arguments
///
/// * `seed_url` - The starting page; its host confines the crawl
/// * `page_budget` - Maximum number of distinct pages to fetch
///
/// # Returns
///
/// * `Ok(HashSet<String>)` - Emails found; empty is a valid outcome
/// * `Err(HarvestError)` - The seed URL is malformed or no client could be built
pub async fn crawl(seed_url: &str, page_budget: usize) -> Result<HashSet<String>, HarvestError> {
    let config = CrawlerConfig {
        page_budget,
        ..CrawlerConfig::default()
    };
    let crawler = EmailCrawler::new(&config, &UserAgentConfig::default())?;
    let report = crawler.crawl(seed_url).await?;
    Ok(report.emails)
}
