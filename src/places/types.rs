use serde::{Deserialize, Serialize};

/// Localized text as returned by the Places API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocalizedText {
    pub text: String,
    #[serde(rename = "languageCode", default)]
    pub language_code: Option<String>,
}

/// Body of a text search request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchTextRequest<'a> {
    pub text_query: &'a str,
    pub max_result_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
}

/// One page of text search results
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<PlaceSummary>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A search hit: just enough to request the details later
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSummary {
    /// Resource name, e.g. `places/ChIJN1t_tDeuEmsRUsoyG83frY4`
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
}

/// Full listing details
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    /// Resource name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_rating_count: Option<u32>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub website_uri: Option<String>,
}

impl PlaceDetails {
    /// Human-readable name, falling back to the resource name
    pub fn title(&self) -> &str {
        self.display_name
            .as_ref()
            .map(|d| d.text.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(self.name.as_str())
    }
}
