//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a single attempt per URL
//! - HTML parsing, link extraction and canonical resolution
//! - Product page classification
//! - The frontier queue and visited set
//! - Overall crawl coordination

mod classifier;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use classifier::{is_product_page, product_signal, ProductSignal};
pub use coordinator::{crawl, Coordinator, CrawlReport};
pub use fetcher::{
    build_http_client, fetch_url, is_html_content_type, FetchResult, NetworkErrorKind,
    ACCEPT_HTML,
};
pub use frontier::Frontier;
pub use parser::{canonical_url, extract_links, parse_html, ParsedPage};
