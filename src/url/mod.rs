//! URL handling module for Mail-Ripple
//!
//! This module provides seed validation, link resolution and the same-site
//! check that confines a crawl to one network host.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, same_site};
pub use normalize::{parse_seed_url, resolve_link};
