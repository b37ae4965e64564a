//! Frontier queue and visited set for the breadth-first crawl
//!
//! The frontier is a FIFO of normalized URL strings. Two sets guard it:
//! - `visited`: URLs that have been dequeued and attempted (fetched or discarded)
//! - `queued`: every URL ever enqueued, so each URL enters the queue at most once
//!
//! Both sets only grow during a run. Insertion is test-and-set
//! (`HashSet::insert`), which is the check a concurrent variant would need
//! to make atomic.

use std::collections::{HashSet, VecDeque};

/// FIFO frontier with at-most-once enqueue semantics
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs awaiting a fetch attempt, in discovery order
    queue: VecDeque<String>,

    /// URLs that have ever been enqueued
    queued: HashSet<String>,

    /// URLs that have been dequeued and attempted
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier seeded with a single URL
    pub fn with_seed(url: impl Into<String>) -> Self {
        let mut frontier = Self::new();
        frontier.enqueue(url);
        frontier
    }

    /// Enqueues a normalized URL unless it was visited or enqueued before
    ///
    /// # Returns
    ///
    /// `true` if the URL was added to the queue
    pub fn enqueue(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.visited.contains(&url) || !self.queued.insert(url.clone()) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    /// Removes the oldest URL from the queue
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Marks a URL as visited
    ///
    /// # Returns
    ///
    /// `false` if it had already been visited
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Number of URLs waiting in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if no URLs are waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
