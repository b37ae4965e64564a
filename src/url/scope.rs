use crate::url::domain::{extract_domain, registrable_domain};
use crate::UrlError;
use std::collections::BTreeSet;
use url::Url;

/// Computes the set of hostnames considered on-site for a start URL
///
/// The set always contains the start URL's own host plus, when the host has
/// a registrable domain, the bare apex and its `www.` variant. That gives one
/// to three entries: a `www.` start collapses onto its own `www.` variant.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use product_crawler::url::allowed_hosts;
///
/// let start = Url::parse("https://shop.example.com/").unwrap();
/// let hosts = allowed_hosts(&start).unwrap();
/// assert!(hosts.contains("shop.example.com"));
/// assert!(hosts.contains("example.com"));
/// assert!(hosts.contains("www.example.com"));
/// ```
pub fn allowed_hosts(start_url: &Url) -> Result<BTreeSet<String>, UrlError> {
    let host = extract_domain(start_url).ok_or(UrlError::MissingDomain)?;

    let mut hosts = BTreeSet::new();
    if let Some(root) = registrable_domain(start_url) {
        hosts.insert(format!("www.{}", root));
        hosts.insert(root);
    }
    hosts.insert(host);

    Ok(hosts)
}

/// The fixed set of hosts a crawl may visit
///
/// Matching is exact on the lowercase host and ignores the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteScope {
    hosts: BTreeSet<String>,
}

impl SiteScope {
    /// Builds the scope for a crawl starting at `start_url`
    pub fn for_start_url(start_url: &Url) -> Result<Self, UrlError> {
        Ok(Self {
            hosts: allowed_hosts(start_url)?,
        })
    }

    /// Returns true if the URL's host is one of the allowed hosts
    pub fn contains(&self, url: &Url) -> bool {
        extract_domain(url).is_some_and(|host| self.hosts.contains(&host))
    }

    /// Returns the allowed hosts in sorted order
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }

    /// Number of allowed hosts
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Always false for a scope built from a valid start URL
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
