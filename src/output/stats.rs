//! Crawl statistics and the end-of-run summary
//!
//! Counts every URL taken off the frontier by its `PageOutcome`, and
//! renders the three-line stdout summary plus a log breakdown.

use crate::crawler::CrawlReport;
use crate::state::PageOutcome;
use std::collections::HashMap;
use std::path::Path;

/// Per-outcome counters for one crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    counts: HashMap<PageOutcome, u64>,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one URL outcome
    pub fn record(&mut self, outcome: PageOutcome) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Number of URLs that ended with `outcome`
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of requests sent (every non-discard outcome)
    pub fn fetch_attempts(&self) -> u64 {
        self.counts
            .iter()
            .filter(|(outcome, _)| outcome.is_fetch_attempt())
            .map(|(_, count)| count)
            .sum()
    }

    /// Number of URLs dropped without a request
    pub fn discards(&self) -> u64 {
        self.counts
            .iter()
            .filter(|(outcome, _)| outcome.is_discard())
            .map(|(_, count)| count)
            .sum()
    }

    /// Non-zero counts in reporting order
    pub fn breakdown(&self) -> Vec<(PageOutcome, u64)> {
        PageOutcome::all_outcomes()
            .into_iter()
            .map(|outcome| (outcome, self.count(outcome)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Renders the three summary lines printed after a run
pub fn format_summary(report: &CrawlReport, csv_path: &Path) -> String {
    format!(
        "Crawled pages: {}\nFound product URLs: {}\nWrote: {}",
        report.pages_crawled,
        report.product_urls.len(),
        csv_path.display()
    )
}

/// Prints the summary to stdout
pub fn print_summary(report: &CrawlReport, csv_path: &Path) {
    println!("{}", format_summary(report, csv_path));
}

/// Logs the per-outcome breakdown and timing of a finished run
pub fn log_statistics(report: &CrawlReport) {
    let elapsed = report.finished_at - report.started_at;

    tracing::info!(
        "Crawl finished ({}) after {} fetches and {} discards in {:.1}s: {} product URLs",
        report.stop_reason,
        report.pages_crawled,
        report.stats.discards(),
        elapsed.num_milliseconds() as f64 / 1000.0,
        report.product_urls.len()
    );

    for (outcome, count) in report.stats.breakdown() {
        tracing::info!("  {}: {}", outcome, count);
    }
}
