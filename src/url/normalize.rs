use crate::UrlError;
use url::Url;

/// Schemes whose links never lead to a crawlable page
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Parses and validates a crawl seed
///
/// The seed must parse as an absolute `http` or `https` URL with a host;
/// anything else is a caller error and the crawl should not start.
///
/// # Examples
///
/// ```
/// use mail_ripple::url::parse_seed_url;
///
/// let url = parse_seed_url("http://example.test").unwrap();
/// assert_eq!(url.as_str(), "http://example.test/");
///
/// assert!(parse_seed_url("not a url").is_err());
/// ```
pub fn parse_seed_url(seed: &str) -> Result<Url, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(seed.to_string()));
    }

    Ok(url)
}

/// Resolves a link href against the page it was found on
///
/// Returns None if the link should be excluded:
/// - empty values and fragment-only links (same page anchors)
/// - javascript:, mailto:, tel: and data: links
/// - values that cannot be joined to the base URL
/// - non-HTTP(S) URLs after resolution
///
/// The fragment of the resolved URL is dropped.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url)
}
