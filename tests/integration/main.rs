//! Integration tests for Mail-Ripple
//!
//! These tests run the crawler and the harvest against wiremock servers.

mod crawl_tests;
mod harvest_tests;
