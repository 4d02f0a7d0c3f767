/// Page state definitions for tracking crawl progress
///
/// Every URL the crawler attempts ends in exactly one of these states.
use std::fmt;

/// Represents the outcome of one page fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Page was fetched and scanned for emails and links
    Processed,

    /// Page returned HTTP 404 or 410
    DeadLink,

    /// Page returned HTTP 429
    RateLimited,

    /// Page could not be reached (connection refused, DNS failure, timeout)
    Unreachable,

    /// Page fetch failed for other reasons (other non-2xx status, unreadable body)
    Failed,
}

impl PageState {
    /// Returns true if the page content was scanned
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Maps an unsuccessful HTTP status code to a page state
    pub fn from_status(status_code: u16) -> Self {
        match status_code {
            404 | 410 => Self::DeadLink,
            429 => Self::RateLimited,
            _ => Self::Failed,
        }
    }

    /// Short lowercase label used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::DeadLink => "dead_link",
            Self::RateLimited => "rate_limited",
            Self::Unreachable => "unreachable",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
