//! Pattern-based extraction of emails and links
//!
//! Pages are scanned as raw text, whatever their Content-Type:
//! - Email addresses anywhere in the content
//! - `href` attribute values, resolved against the page URL

use crate::url::resolve_link;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;
use url::Url;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email pattern")
});

// Double-quoted, single-quoted or bare attribute value after `href=`.
// The attribute name must start the text or follow whitespace, a quote or `/`.
static HREF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|[\s"'/])href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'<>`=]+))"#)
        .expect("valid href pattern")
});

/// Extracted information from a fetched page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Unique email-shaped substrings of the content
    pub emails: HashSet<String>,

    /// Resolved absolute links, in document order
    pub links: Vec<Url>,
}

/// Scans page content for emails and links
///
/// # Arguments
///
/// * `content` - The raw page body
/// * `base_url` - The URL the content was fetched from, for resolving links
///
/// # Example
///
/// ```
/// use mail_ripple::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<p>Write to info@example.test</p><a href="/about">About</a>"#;
/// let base_url = Url::parse("http://example.test/").unwrap();
/// let parsed = parse_page(html, &base_url);
/// assert!(parsed.emails.contains("info@example.test"));
/// assert_eq!(parsed.links[0].as_str(), "http://example.test/about");
/// ```
pub fn parse_page(content: &str, base_url: &Url) -> ParsedPage {
    let links = extract_hrefs(content)
        .into_iter()
        .filter_map(|href| resolve_link(&decode_entities(href), base_url))
        .collect();

    ParsedPage {
        emails: extract_emails(content),
        links,
    }
}

/// Returns every email-shaped substring of `content`
///
/// Local part of letters, digits and `._%+-`, then `@`, a domain of letters,
/// digits, `.` and `-`, a dot and a top-level segment of two or more letters.
pub fn extract_emails(content: &str) -> HashSet<String> {
    EMAIL_RE
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Returns the raw `href` attribute values of `content`, in document order
pub fn extract_hrefs(content: &str) -> Vec<&str> {
    HREF_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str())
        .collect()
}

/// Decodes the character references that commonly appear in attribute values
///
/// Handles `&amp;`, `&quot;`, `&apos;`, `&lt;`, `&gt;` and decimal or hex
/// numeric references. Anything else is left as written.
pub fn decode_entities(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }

    let mut decoded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        rest = &rest[start..];

        let decoded_char = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_reference(&rest[1..end]).map(|c| (c, end)));

        match decoded_char {
            Some((c, end)) => {
                decoded.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }
    decoded.push_str(rest);

    Cow::Owned(decoded)
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "lt" => Some('<'),
        "gt" => Some('>'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
