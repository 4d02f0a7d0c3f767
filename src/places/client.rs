use crate::config::PlacesConfig;
use crate::places::types::{PlaceDetails, PlaceSummary, SearchTextRequest, SearchTextResponse};
use crate::places::{PlacesError, PlacesResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// Fields requested from text search
pub const SEARCH_FIELD_MASK: &str = "places.name,places.displayName,nextPageToken";

/// Fields requested from the details lookup
pub const DETAILS_FIELD_MASK: &str =
    "name,displayName,rating,userRatingCount,formattedAddress,internationalPhoneNumber,websiteUri";

/// Upper bound on result pages followed for one query
const MAX_SEARCH_PAGES: usize = 50;

/// Places API v1 client
///
/// The API key travels with the client value; nothing is read from the
/// process environment.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: Client,
    endpoint: String,
    api_key: String,
    max_result_count: u32,
}

impl PlacesClient {
    /// Creates a client from the places configuration
    ///
    /// # Returns
    ///
    /// * `Ok(PlacesClient)` - Ready to issue requests
    /// * `Err(PlacesError::MissingApiKey)` - The configuration carries no key
    pub fn new(config: &PlacesConfig, client: Client) -> PlacesResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(PlacesError::MissingApiKey);
        }

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.trim().to_string(),
            max_result_count: config.max_result_count,
        })
    }

    /// Runs a text search and follows `nextPageToken` until the last page
    pub async fn search_text(&self, query: &str) -> PlacesResult<Vec<PlaceSummary>> {
        let mut places = Vec::new();
        let mut page_token: Option<String> = None;

        for page in 1..=MAX_SEARCH_PAGES {
            let response = self.search_page(query, page_token.as_deref()).await?;
            tracing::debug!(
                "Search '{}' page {}: {} results",
                query,
                page,
                response.places.len()
            );
            places.extend(response.places);

            match response.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => return Ok(places),
            }
        }

        tracing::warn!(
            "Search '{}' still had more results after {} pages; stopping",
            query,
            MAX_SEARCH_PAGES
        );
        Ok(places)
    }

    /// Fetches the details of one place by resource name
    pub async fn place_details(&self, resource_name: &str) -> PlacesResult<PlaceDetails> {
        let response = self
            .client
            .get(format!("{}/{}", self.endpoint, resource_name))
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", DETAILS_FIELD_MASK)
            .send()
            .await?;

        parse_json(response).await
    }

    async fn search_page(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> PlacesResult<SearchTextResponse> {
        let body = SearchTextRequest {
            text_query: query,
            max_result_count: self.max_result_count,
            page_token,
        };

        let response = self
            .client
            .post(format!("{}/places:searchText", self.endpoint))
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", SEARCH_FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        parse_json(response).await
    }
}

/// Checks the status and decodes a JSON body
async fn parse_json<T: DeserializeOwned>(response: Response) -> PlacesResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(PlacesError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| PlacesError::Parse(e.to_string()))
}
