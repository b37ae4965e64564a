//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: The run-level state machine (running, why it stopped, done)
//! - `PageOutcome`: What happened to each URL taken off the frontier

mod crawl_phase;
mod page_state;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use page_state::PageOutcome;
