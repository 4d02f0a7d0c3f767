//! State module for tracking crawl progress
//!
//! - `PageState`: the outcome of one fetch attempt during a crawl

mod page_state;

pub use page_state::PageState;
