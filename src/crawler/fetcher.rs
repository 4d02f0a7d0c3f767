//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests to fetch page content
//! - Redirect handling that never leaves the requested host
//! - Error classification into page states

use crate::config::UserAgentConfig;
use crate::state::PageState;
use crate::url::same_site;
use reqwest::header::LOCATION;
use reqwest::{redirect::Policy, Client};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Default per-request timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum number of redirects followed for one fetch
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content, whatever its Content-Type
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
        /// The page state this error maps to
        state: PageState,
    },

    /// A redirect pointed at a different host and was not followed
    OffSiteRedirect {
        /// Where the redirect wanted to go
        location: String,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// The page state this error maps to
        state: PageState,
    },
}

impl FetchResult {
    /// The page state this result records for the fetched URL
    pub fn state(&self) -> PageState {
        match self {
            Self::Success { .. } => PageState::Processed,
            Self::OffSiteRedirect { .. } => PageState::Failed,
            Self::HttpError { state, .. } | Self::NetworkError { state, .. } => *state,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self::NetworkError {
            error: error.into(),
            state: PageState::Failed,
        }
    }
}

/// Formats the user agent string sent with every request
///
/// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn format_user_agent(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Upper bound for one whole request
///
/// # Example
///
/// ```no_run
/// use mail_ripple::config::UserAgentConfig;
/// use mail_ripple::crawler::{build_http_client, DEFAULT_FETCH_TIMEOUT};
///
/// let config = UserAgentConfig {
///     crawler_name: "MailRipple".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, DEFAULT_FETCH_TIMEOUT).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format_user_agent(config))
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::none()) // Handle redirects manually
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// Redirects are followed by hand, at most 10 hops, and only while they stay
/// on the host and port of `url`. A hop to another host ends the fetch with
/// `OffSiteRedirect`; nothing is requested from that host.
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | Success with the body text |
/// | HTTP 3xx to the same host | Follow the Location |
/// | HTTP 3xx to another host | OffSiteRedirect → Failed |
/// | Redirect loop / chain > 10 / no Location | NetworkError → Failed |
/// | HTTP 404 / 410 | HttpError → DeadLink |
/// | HTTP 429 | HttpError → RateLimited |
/// | Other non-2xx | HttpError → Failed |
/// | Timeout | NetworkError → Unreachable |
/// | Connection refused / DNS | NetworkError → Unreachable |
/// | Anything else | NetworkError → Failed |
///
/// No retries are attempted; the caller moves on to its next URL.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let requested = match Url::parse(url) {
        Ok(requested) => requested,
        Err(e) => return FetchResult::failed(format!("Invalid URL {}: {}", url, e)),
    };

    let mut current = requested.clone();
    let mut hops = HashSet::from([requested.to_string()]);

    loop {
        let response = match client.get(current.clone()).send().await {
            Ok(response) => response,
            Err(e) => return classify_request_error(e),
        };
        let status = response.status();

        if status.is_redirection() {
            let Some(location) = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
            else {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                    state: PageState::Failed,
                };
            };

            let next = match current.join(location) {
                Ok(next) => next,
                Err(e) => {
                    return FetchResult::failed(format!("Bad redirect target {}: {}", location, e))
                }
            };

            if !same_site(&requested, &next) {
                return FetchResult::OffSiteRedirect {
                    location: next.to_string(),
                };
            }
            if hops.len() > MAX_REDIRECTS {
                return FetchResult::failed(format!("More than {} redirects", MAX_REDIRECTS));
            }
            if !hops.insert(next.to_string()) {
                return FetchResult::failed(format!("Redirect loop at {}", next));
            }

            tracing::trace!("{} redirects to {}", current, next);
            current = next;
            continue;
        }

        if !status.is_success() {
            return FetchResult::HttpError {
                status_code: status.as_u16(),
                state: PageState::from_status(status.as_u16()),
            };
        }

        return match response.text().await {
            Ok(body) => FetchResult::Success {
                final_url: current.to_string(),
                status_code: status.as_u16(),
                body,
            },
            Err(e) => FetchResult::NetworkError {
                error: e.to_string(),
                state: if e.is_timeout() {
                    PageState::Unreachable
                } else {
                    PageState::Failed
                },
            },
        };
    }
}

fn classify_request_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            state: PageState::Unreachable,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
            state: PageState::Unreachable,
        }
    } else {
        FetchResult::failed(e.to_string())
    }
}
