use serde::Deserialize;

/// Default Places API v1 endpoint
pub const DEFAULT_PLACES_ENDPOINT: &str = "https://places.googleapis.com/v1";

/// Main configuration structure for Mail-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub places: PlacesConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of distinct pages fetched per website
    #[serde(rename = "page-budget", default = "default_page_budget")]
    pub page_budget: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_budget: default_page_budget(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_page_budget() -> usize {
    crate::crawler::DEFAULT_PAGE_BUDGET
}

fn default_fetch_timeout_secs() -> u64 {
    crate::crawler::DEFAULT_FETCH_TIMEOUT.as_secs()
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "MailRipple".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/mail-ripple".to_string(),
            contact_email: "crawler@example.com".to_string(),
        }
    }
}

/// Places search configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesConfig {
    /// API key sent with every Places request
    #[serde(rename = "api-key", default)]
    pub api_key: String,

    /// Free-text search query (e.g., "avvocati")
    pub query: String,

    /// Zip codes the query is repeated for; empty means the default range
    #[serde(rename = "zip-codes", default)]
    pub zip_codes: Vec<String>,

    /// Page size for text search (1-20)
    #[serde(rename = "max-result-count", default = "default_max_result_count")]
    pub max_result_count: u32,

    /// Base URL of the Places API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl PlacesConfig {
    /// Returns the configured zip codes, or the default range when none are set
    pub fn effective_zip_codes(&self) -> Vec<String> {
        if self.zip_codes.is_empty() {
            default_zip_codes()
        } else {
            self.zip_codes.clone()
        }
    }
}

/// Default search subdivisions: zip codes 22010 through 22100
pub fn default_zip_codes() -> Vec<String> {
    (10..=100).map(|i| format!("22{:03}", i)).collect()
}

fn default_max_result_count() -> u32 {
    20
}

fn default_endpoint() -> String {
    DEFAULT_PLACES_ENDPOINT.to_string()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database holding the sheets
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Name of the sheet the listings are written to
    #[serde(rename = "sheet-name")]
    pub sheet_name: String,

    /// Optional path for a markdown export of the sheet
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}
