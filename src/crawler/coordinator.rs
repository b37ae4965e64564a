//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop that ties together:
//! - The frontier and visited set
//! - Site scope and robots.txt checks at dequeue time
//! - Fetching, classification and link expansion
//! - Page budget accounting and the politeness delay
//!
//! The loop is sequential: one request in flight at a time. Budget is
//! consumed only when a request is actually sent; visited, off-site and
//! robots-denied discards are free.

use crate::config::Config;
use crate::crawler::classifier::product_signal;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_html;
use crate::output::CrawlStats;
use crate::robots::{fetch_robots, is_allowed, robots_token, robots_url_for, ParsedRobots};
use crate::state::{CrawlPhase, PageOutcome};
use crate::url::{normalize_in_scope, normalize_url, SiteScope};
use crate::Result;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use url::Url;

/// Progress is logged after this many fetch attempts
const PROGRESS_INTERVAL: u64 = 10;

/// Result of a finished crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Number of fetch attempts made (successful or not)
    pub pages_crawled: u64,

    /// Canonical product URLs, sorted and deduplicated
    pub product_urls: Vec<String>,

    /// Why the loop stopped (`BudgetExhausted` or `FrontierEmpty`)
    pub stop_reason: CrawlPhase,

    /// Per-outcome counts for every URL taken off the frontier
    pub stats: CrawlStats,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Main crawler coordinator structure
///
/// Owns all per-run state. Nothing here outlives a run.
pub struct Coordinator {
    client: Client,
    start_url: Url,
    scope: SiteScope,
    robots: ParsedRobots,
    user_agent: String,
    max_pages: u64,
    delay: Duration,
    frontier: Frontier,
    products: BTreeSet<String>,
    stats: CrawlStats,
    phase: CrawlPhase,
    pages_crawled: u64,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Normalizes the start URL, derives the allowed hosts and builds the
    /// HTTP client. No network access happens until [`Coordinator::run`].
    ///
    /// # Arguments
    ///
    /// * `config` - A validated crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlerError)` - Unusable start URL or client construction failure
    pub fn new(config: &Config) -> Result<Self> {
        let start_url = normalize_url(&config.crawler.start_url)?;
        let scope = SiteScope::for_start_url(&start_url)?;
        let client = build_http_client(&config.http)?;

        tracing::debug!(
            "Allowed hosts: {}",
            scope.hosts().collect::<Vec<_>>().join(", ")
        );

        Ok(Self {
            client,
            frontier: Frontier::with_seed(start_url.as_str()),
            start_url,
            scope,
            robots: ParsedRobots::allow_all(),
            user_agent: config.http.user_agent.clone(),
            max_pages: config.crawler.max_pages,
            delay: config.crawler.delay(),
            products: BTreeSet::new(),
            stats: CrawlStats::new(),
            phase: CrawlPhase::Running,
            pages_crawled: 0,
        })
    }

    /// Runs the crawl loop to completion
    ///
    /// 1. Load robots.txt once (best-effort)
    /// 2. Until the budget is spent or the frontier drains:
    ///    a. Dequeue a URL, skip it if already visited, mark it visited
    ///    b. Discard it if off-site or denied by robots.txt
    ///    c. Fetch it (consumes budget)
    ///    d. On a 200 HTML response, classify it and enqueue its links
    ///    e. Sleep the politeness delay
    /// 3. Return the report
    ///
    /// Per-URL failures are recorded as outcomes, never returned as errors.
    pub async fn run(&mut self) -> Result<CrawlReport> {
        let started_at = Utc::now();
        let clock = Instant::now();

        tracing::info!(
            "Starting crawl at {} (budget {} pages, delay {:?})",
            self.start_url,
            self.max_pages,
            self.delay
        );

        self.load_robots().await;

        let stop_reason = loop {
            if self.pages_crawled >= self.max_pages {
                tracing::info!("Page budget of {} exhausted", self.max_pages);
                break CrawlPhase::BudgetExhausted;
            }

            let Some(url) = self.frontier.pop() else {
                tracing::info!("Frontier is empty, crawl complete");
                break CrawlPhase::FrontierEmpty;
            };

            let outcome = self.process_url(&url).await;
            self.stats.record(outcome);

            if !outcome.is_fetch_attempt() {
                continue;
            }

            if self.pages_crawled % PROGRESS_INTERVAL == 0 {
                let elapsed = clock.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages crawled, {} queued, {} products, {:.2} pages/sec",
                    self.pages_crawled,
                    self.frontier.len(),
                    self.products.len(),
                    self.pages_crawled as f64 / elapsed.max(f64::EPSILON)
                );
            }

            // Applies after every fetch attempt, transport failures included
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        };

        self.transition(stop_reason);
        self.transition(CrawlPhase::Done);
        debug_assert_eq!(self.stats.fetch_attempts(), self.pages_crawled);

        let report = CrawlReport {
            pages_crawled: self.pages_crawled,
            product_urls: self.products.iter().cloned().collect(),
            stop_reason,
            stats: self.stats.clone(),
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Crawl completed: {} pages crawled, {} URLs visited, {} product URLs in {:?}",
            report.pages_crawled,
            self.frontier.visited_count(),
            report.product_urls.len(),
            clock.elapsed()
        );

        Ok(report)
    }

    /// Current run phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Effective politeness delay (configured or robots Crawl-delay, whichever is larger)
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Loads robots.txt for the start URL's origin and applies its Crawl-delay
    async fn load_robots(&mut self) {
        let robots_url = robots_url_for(&self.start_url);
        self.robots = fetch_robots(&self.client, &robots_url).await;

        if let Some(crawl_delay) = self.robots.crawl_delay(robots_token(&self.user_agent)) {
            if crawl_delay > self.delay {
                tracing::info!(
                    "robots.txt Crawl-delay {:?} raises politeness delay from {:?}",
                    crawl_delay,
                    self.delay
                );
                self.delay = crawl_delay;
            }
        }
    }

    /// Takes one dequeued URL through to its outcome
    async fn process_url(&mut self, url_str: &str) -> PageOutcome {
        if !self.frontier.mark_visited(url_str) {
            tracing::debug!("Skipping already visited {}", url_str);
            return PageOutcome::AlreadyVisited;
        }

        // Frontier entries are normalized already; this only drops
        // something that no longer parses
        let Ok(url) = Url::parse(url_str) else {
            tracing::debug!("Skipping unparseable {}", url_str);
            return PageOutcome::OffSite;
        };

        if !self.scope.contains(&url) {
            tracing::debug!("Skipping off-site {}", url);
            return PageOutcome::OffSite;
        }

        if !is_allowed(&self.robots, url.as_str(), &self.user_agent) {
            tracing::debug!("URL {} disallowed by robots.txt", url);
            return PageOutcome::RobotsDenied;
        }

        self.pages_crawled += 1;

        let result = fetch_url(&self.client, url.as_str()).await;
        match result {
            FetchResult::NetworkError { error, kind } => {
                tracing::warn!("Fetch failed for {} ({:?}): {}", url, kind, error);
                PageOutcome::TransportFailed
            }

            FetchResult::Response { status_code, .. }
                if status_code != StatusCode::OK.as_u16() =>
            {
                tracing::debug!("HTTP {} for {}", status_code, url);
                PageOutcome::HttpError
            }

            FetchResult::Response {
                body, content_type, ..
            } if body.is_empty() => {
                tracing::debug!("No HTML body for {} (content-type '{}')", url, content_type);
                PageOutcome::NotHtml
            }

            FetchResult::Response {
                final_url, body, ..
            } => self.handle_page(&final_url, &body),
        }
    }

    /// Classifies a fetched HTML page and expands its links
    ///
    /// Kept synchronous so the parsed document never lives across an await.
    fn handle_page(&mut self, page_url: &Url, body: &str) -> PageOutcome {
        let parsed = parse_html(body, page_url);

        let outcome = match product_signal(body) {
            Some(signal) => {
                if self.scope.contains(&parsed.canonical) {
                    tracing::debug!("Product page {} ({:?})", parsed.canonical, signal);
                    self.products.insert(parsed.canonical.to_string());
                } else {
                    tracing::debug!(
                        "Product page {} has off-site canonical {}, not recorded",
                        page_url,
                        parsed.canonical
                    );
                }
                PageOutcome::Product
            }
            None => PageOutcome::Processed,
        };

        let mut enqueued = 0;
        for link in &parsed.links {
            if let Some(normalized) = normalize_in_scope(link, &self.scope) {
                if self.frontier.enqueue(normalized.as_str()) {
                    enqueued += 1;
                }
            }
        }

        tracing::debug!(
            "Processed {}: {} links, {} newly queued",
            page_url,
            parsed.links.len(),
            enqueued
        );

        outcome
    }

    fn transition(&mut self, next: CrawlPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "invalid crawl phase transition {} -> {}",
            self.phase,
            next
        );
        tracing::debug!("Crawl phase {} -> {}", self.phase, next);
        self.phase = next;
    }
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use product_crawler::{crawl, Config};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = crawl(&Config::default()).await?;
/// println!("{} product URLs", report.product_urls.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> Result<CrawlReport> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
