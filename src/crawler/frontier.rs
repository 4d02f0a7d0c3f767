//! Frontier for a single-site, budget-bounded crawl
//!
//! The frontier owns the FIFO queue of URLs still to fetch together with the
//! set of URLs already attempted. Both live behind one owner, so the
//! "check visited, then mark visited" sequence can never interleave with
//! another fetch.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Breadth-first frontier with a page budget
#[derive(Debug)]
pub struct Frontier {
    /// URLs waiting for a fetch attempt, in discovery order
    queue: VecDeque<Url>,

    /// URLs already attempted, successful or not
    visited: HashSet<String>,

    /// Maximum number of distinct URLs ever attempted
    page_budget: usize,
}

impl Frontier {
    /// Creates a frontier holding only the seed URL
    pub fn new(seed: Url, page_budget: usize) -> Self {
        Self {
            queue: VecDeque::from([seed]),
            visited: HashSet::new(),
            page_budget,
        }
    }

    /// Pops the next URL to fetch
    ///
    /// URLs already visited are discarded on the way. Returns None once the
    /// queue is empty or the page budget has been spent.
    pub fn next_url(&mut self) -> Option<Url> {
        while !self.budget_spent() {
            let url = self.queue.pop_front()?;
            if self.is_visited(&url) {
                tracing::trace!("Skipping already visited URL: {}", url);
                continue;
            }
            return Some(url);
        }
        None
    }

    /// Records a fetch attempt for `url`
    pub fn mark_visited(&mut self, url: &Url) {
        self.visited.insert(url.as_str().to_string());
    }

    /// Appends a discovered URL if it is new and the budget leaves room
    ///
    /// Room means queued plus visited URLs stay below the page budget.
    /// Returns true when the URL was queued.
    pub fn enqueue(&mut self, url: Url) -> bool {
        if self.is_visited(&url) || self.queue.len() + self.visited.len() >= self.page_budget {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    /// Returns true if `url` has already been attempted
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Number of URLs attempted so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs waiting in the queue
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    fn budget_spent(&self) -> bool {
        self.visited.len() >= self.page_budget
    }
}
