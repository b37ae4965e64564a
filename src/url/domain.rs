use url::{Host, Url};

/// Extracts the host from a URL
///
/// This function retrieves the host portion of a URL (without port) and
/// converts it to lowercase. If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use product_crawler::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM:8443/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}

/// Returns the registrable domain (public suffix plus one label) of a host
///
/// IP addresses and hosts that are themselves a public suffix (or unknown
/// single labels such as `localhost`) have no registrable domain.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use product_crawler::url::registrable_domain;
///
/// let url = Url::parse("https://shop.www.hardrace.co.uk/").unwrap();
/// assert_eq!(registrable_domain(&url), Some("hardrace.co.uk".to_string()));
/// ```
pub fn registrable_domain(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(host) => {
            let host = host.to_lowercase();
            psl::domain_str(&host)
                .filter(|domain| domain.contains('.'))
                .map(str::to_string)
        }
        Host::Ipv4(_) | Host::Ipv6(_) => None,
    }
}
