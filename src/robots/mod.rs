//! Robots.txt handling module
//!
//! This module provides functionality for fetching and querying robots.txt.
//! The policy is loaded once per crawl and never refreshed.

mod parser;

pub use parser::ParsedRobots;

use reqwest::{Client, StatusCode};
use url::Url;

/// Builds the robots.txt URL (`scheme://host[:port]/robots.txt`) for a site URL
pub fn robots_url_for(site_url: &Url) -> Url {
    let mut robots_url = site_url.clone();
    robots_url.set_path("/robots.txt");
    robots_url.set_query(None);
    robots_url.set_fragment(None);
    robots_url
}

/// Derives the robots.txt product token from a full User-Agent header
///
/// Robots groups name products, not full header values, so
/// `Mozilla/5.0 (compatible; ...)` matches groups for `Mozilla`.
/// Falls back to `*` when the header starts with no token characters.
pub fn robots_token(user_agent: &str) -> &str {
    let end = user_agent
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '_' || c == '-'))
        .unwrap_or(user_agent.len());

    if end == 0 {
        "*"
    } else {
        &user_agent[..end]
    }
}

/// Fetches and parses robots.txt, best-effort
///
/// Any transport failure, non-200 status or unreadable body yields the
/// permissive policy. This never fails.
pub async fn fetch_robots(client: &Client, robots_url: &Url) -> ParsedRobots {
    tracing::debug!("Fetching robots.txt from {}", robots_url);

    let response = match client.get(robots_url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(
                "Could not fetch {}: {}; crawling without robots.txt",
                robots_url,
                e
            );
            return ParsedRobots::allow_all();
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!(
            "robots.txt at {} returned HTTP {}; crawling without robots.txt",
            robots_url,
            status.as_u16()
        );
        return ParsedRobots::allow_all();
    }

    match response.text().await {
        Ok(body) => {
            tracing::info!("Loaded robots.txt from {} ({} bytes)", robots_url, body.len());
            ParsedRobots::from_content(&body)
        }
        Err(e) => {
            tracing::warn!("Failed to read robots.txt body from {}: {}", robots_url, e);
            ParsedRobots::allow_all()
        }
    }
}

/// Checks if a URL is allowed by robots.txt
///
/// # Arguments
///
/// * `robots` - The parsed robots.txt data
/// * `url` - The URL to check
/// * `user_agent` - The full User-Agent header; its product token is matched
pub fn is_allowed(robots: &ParsedRobots, url: &str, user_agent: &str) -> bool {
    robots.is_allowed(url, robots_token(user_agent))
}
