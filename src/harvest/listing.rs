//! Sheet row layout for one listing

use crate::places::{PlaceDetails, PlaceSummary};
use std::collections::HashSet;

/// Column titles, in sheet order
pub const HEADER: [&str; 7] = [
    "Name", "Rating", "Reviews", "Address", "Phone", "Website", "Emails",
];

/// Returns the header row as owned cells
pub fn header_row() -> Vec<String> {
    HEADER.iter().map(|h| h.to_string()).collect()
}

/// Builds the sheet row for a listing and the emails found on its website
pub fn listing_row(details: &PlaceDetails, emails: &str) -> Vec<String> {
    vec![
        details.title().to_string(),
        details.rating.map(|r| r.to_string()).unwrap_or_default(),
        details
            .user_rating_count
            .map(|c| c.to_string())
            .unwrap_or_default(),
        details.formatted_address.clone().unwrap_or_default(),
        details.international_phone_number.clone().unwrap_or_default(),
        details.website_uri.clone().unwrap_or_default(),
        emails.to_string(),
    ]
}

/// Sorts emails and joins them into a single cell
pub fn emails_cell(emails: &HashSet<String>) -> String {
    let mut sorted: Vec<&str> = emails.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(", ")
}

/// Collects resource names across search results, dropping repeats
///
/// First-seen order is kept. Hits without a resource name cannot be looked
/// up and are skipped.
pub fn unique_place_names<'a, I>(places: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a PlaceSummary>,
{
    let mut seen = HashSet::new();
    places
        .into_iter()
        .filter_map(|p| p.name.as_deref())
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(str::to_string)
        .collect()
}
