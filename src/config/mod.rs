//! Configuration module for Mail-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use mail_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling at most {} pages per site", config.crawler.page_budget);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_zip_codes, Config, CrawlerConfig, OutputConfig, PlacesConfig, UserAgentConfig,
    DEFAULT_PLACES_ENDPOINT,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
