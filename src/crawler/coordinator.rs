//! Crawler coordinator - the crawl-and-extract loop
//!
//! One `crawl` call owns its frontier, visited set and result set; nothing is
//! carried over between seeds. Pages are fetched strictly one after another:
//! each page is fetched, scanned for emails and links, and only then is the
//! next frontier entry attempted.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_page;
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::state::PageState;
use crate::url::{parse_seed_url, same_site};
use crate::{HarvestError, UrlError};
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;

/// One fetch attempt made during a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageVisit {
    /// The URL that was attempted
    pub url: String,

    /// How the attempt ended
    pub state: PageState,
}

/// Everything one crawl produced
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Unique email addresses found across all fetched pages
    pub emails: HashSet<String>,

    /// Fetch attempts in the order they were made
    pub pages: Vec<PageVisit>,
}

impl CrawlReport {
    /// Number of distinct URLs attempted
    pub fn pages_attempted(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages whose content was scanned
    pub fn pages_processed(&self) -> usize {
        self.pages.iter().filter(|p| p.state.is_success()).count()
    }

    /// Emails in lexical order, for stable output
    pub fn sorted_emails(&self) -> Vec<String> {
        let mut emails: Vec<String> = self.emails.iter().cloned().collect();
        emails.sort();
        emails
    }
}

/// Breadth-first, single-host email crawler
///
/// The crawler holds only its HTTP client and page budget, so one instance
/// can be reused for any number of seeds.
#[derive(Debug, Clone)]
pub struct EmailCrawler {
    client: Client,
    page_budget: usize,
}

impl EmailCrawler {
    /// Creates a crawler from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(EmailCrawler)` - Crawler with a configured HTTP client
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: &CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self, HarvestError> {
        let client = build_http_client(
            user_agent,
            Duration::from_secs(config.fetch_timeout_secs),
        )?;
        Ok(Self::with_client(client, config.page_budget))
    }

    /// Creates a crawler around an existing HTTP client
    pub fn with_client(client: Client, page_budget: usize) -> Self {
        Self {
            client,
            page_budget,
        }
    }

    /// Maximum number of pages one crawl may fetch
    pub fn page_budget(&self) -> usize {
        self.page_budget
    }

    /// Crawls the site of `seed_url` and collects email addresses
    ///
    /// # Algorithm
    ///
    /// 1. Pop the oldest frontier URL, skipping ones already visited
    /// 2. Fetch it; failures are logged and the URL still counts as visited
    /// 3. Add every email-shaped substring of the body to the result
    /// 4. Queue every resolved link on the seed's host while
    ///    queued + visited stays below the page budget
    /// 5. Stop when the frontier is empty or the budget is spent
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl ran; the email set may be empty
    /// * `Err(UrlError)` - The seed is not an absolute HTTP(S) URL with a host
    pub async fn crawl(&self, seed_url: &str) -> Result<CrawlReport, UrlError> {
        let seed = parse_seed_url(seed_url)?;
        let mut frontier = Frontier::new(seed.clone(), self.page_budget);
        let mut report = CrawlReport::default();

        tracing::info!("Crawling {} (page budget {})", seed, self.page_budget);

        while let Some(url) = frontier.next_url() {
            tracing::debug!("Fetching {}", url);

            let result = fetch_url(&self.client, url.as_str()).await;
            frontier.mark_visited(&url);
            let state = result.state();

            match result {
                FetchResult::Success {
                    final_url, body, ..
                } => {
                    if final_url != url.as_str() {
                        tracing::debug!("{} redirected to {}", url, final_url);
                    }

                    let parsed = parse_page(&body, &url);
                    tracing::debug!(
                        "{}: {} emails, {} links",
                        url,
                        parsed.emails.len(),
                        parsed.links.len()
                    );
                    report.emails.extend(parsed.emails);

                    for link in parsed.links {
                        if !same_site(&seed, &link) {
                            tracing::trace!("Not following off-site link {}", link);
                            continue;
                        }
                        frontier.enqueue(link);
                    }
                }
                FetchResult::OffSiteRedirect { location } => {
                    tracing::warn!("Error fetching {}: redirects off-site to {}", url, location);
                }
                FetchResult::HttpError { status_code, .. } => {
                    tracing::warn!("Error fetching {}: HTTP {}", url, status_code);
                }
                FetchResult::NetworkError { error, .. } => {
                    tracing::warn!("Error fetching {}: {}", url, error);
                }
            }

            report.pages.push(PageVisit {
                url: url.to_string(),
                state,
            });
        }

        tracing::info!(
            "Crawl of {} finished: {} pages attempted, {} emails found",
            seed,
            report.pages_attempted(),
            report.emails.len()
        );

        Ok(report)
    }
}
