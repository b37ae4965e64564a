//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with User-Agent, Accept header and timeout
//! - Single GET requests with no retry
//! - Content-Type filtering (non-HTML bodies are dropped)
//! - Error classification

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Accept header sent with every request
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

/// Maximum redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// A response was received (any status code)
    Response {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value (empty if absent)
        content_type: String,
        /// Page body; empty unless the Content-Type is HTML
        body: String,
    },

    /// Network error (DNS failure, connection refused, timeout, ...)
    NetworkError {
        /// Error description
        error: String,
        /// What kind of failure it was
        kind: NetworkErrorKind,
    },
}

/// Classification of transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Timeout,
    Connect,
    Redirect,
    Body,
    Other,
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```
/// use product_crawler::config::HttpConfig;
/// use product_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

    let timeout = config.timeout();

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true if a Content-Type header value denotes HTML or XHTML
pub fn is_html_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("text/html") || content_type.contains("application/xhtml")
}

/// Fetches a URL with a single GET request
///
/// # Request Flow
///
/// 1. Send GET (redirects followed, bounded by the client policy)
/// 2. Read the Content-Type header
///    - If not HTML → body is left empty, status still reported
/// 3. Read the body as text
///
/// No retries: a transport failure is returned as `NetworkError` and the
/// caller moves on.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return network_error(e),
    };

    let status_code = response.status().as_u16();
    let final_url = response.url().clone();

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html_content_type(&content_type) {
        return FetchResult::Response {
            final_url,
            status_code,
            content_type,
            body: String::new(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Response {
            final_url,
            status_code,
            content_type,
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
            kind: NetworkErrorKind::Body,
        },
    }
}

/// Classifies a reqwest error
fn network_error(e: reqwest::Error) -> FetchResult {
    let kind = if e.is_timeout() {
        NetworkErrorKind::Timeout
    } else if e.is_connect() {
        NetworkErrorKind::Connect
    } else if e.is_redirect() {
        NetworkErrorKind::Redirect
    } else {
        NetworkErrorKind::Other
    };

    FetchResult::NetworkError {
        error: e.to_string(),
        kind,
    }
}
