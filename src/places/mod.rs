//! Places API collaborator
//!
//! A thin client for the two Places API v1 calls the harvest needs:
//! paginated text search and per-place details.

mod client;
mod types;

pub use client::{PlacesClient, DETAILS_FIELD_MASK, SEARCH_FIELD_MASK};
pub use types::{LocalizedText, PlaceDetails, PlaceSummary};

use thiserror::Error;

/// Errors that can occur while talking to the Places API
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("No Places API key configured")]
    MissingApiKey,

    #[error("Places request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Places API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse Places response: {0}")]
    Parse(String),
}

/// Result type for Places operations
pub type PlacesResult<T> = Result<T, PlacesError>;
