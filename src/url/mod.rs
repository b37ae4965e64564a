//! URL handling module
//!
//! This module provides URL normalization, host extraction, registrable
//! domain lookup and the on-site scope used to keep a crawl on one site.

mod domain;
mod normalize;
mod scope;

// Re-export main functions
pub use domain::{extract_domain, registrable_domain};
pub use normalize::normalize_url;
pub use scope::{allowed_hosts, SiteScope};

use url::Url;

/// Normalizes a URL and keeps it only if it falls inside the scope
///
/// Returns `None` for malformed URLs, non-HTTP(S) schemes and off-site hosts.
pub fn normalize_in_scope(url_str: &str, scope: &SiteScope) -> Option<Url> {
    normalize_url(url_str).ok().filter(|url| scope.contains(url))
}
