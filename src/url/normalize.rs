use crate::UrlError;
use url::Url;

/// Normalizes a URL into the canonical form used for deduplication
///
/// # Normalization Steps
///
/// 1. Default a missing scheme to `https`
/// 2. Parse the URL; reject if malformed or not HTTP(S)
/// 3. Lowercase the scheme and host (path and query case is untouched)
/// 4. Empty path becomes `/`
/// 5. Remove trailing slash (except for root `/`)
/// 6. Drop the query string and fragment entirely
///
/// The result is idempotent: normalizing an already-normalized URL returns
/// it unchanged.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or normalize the URL
///
/// # Examples
///
/// ```
/// use product_crawler::url::normalize_url;
///
/// let url = normalize_url("HTTP://Example.COM/Page/?id=1#top").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/Page");
///
/// let url = normalize_url("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let with_scheme = default_scheme(url_str.trim());

    // Step 2: Parse the URL
    let mut url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    // Step 3: the url crate lowercases scheme and host of special schemes
    // while parsing, so only the presence of a host needs checking here
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    // Steps 4 & 5
    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    // Step 6
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Prefixes `https://` when the input carries no scheme
fn default_scheme(url_str: &str) -> String {
    if url_str.starts_with("//") {
        format!("https:{}", url_str)
    } else if has_scheme(url_str) {
        url_str.to_string()
    } else {
        format!("https://{}", url_str)
    }
}

/// Returns true if the string starts with a URI scheme
///
/// `host:port` inputs such as `localhost:8080/x` are not treated as schemes.
fn has_scheme(url_str: &str) -> bool {
    let Some(idx) = url_str.find(':') else {
        return false;
    };

    let scheme = &url_str[..idx];
    let valid_scheme = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return false;
    }

    let rest = &url_str[idx + 1..];
    rest.starts_with("//") || !rest.starts_with(|c: char| c.is_ascii_digit())
}

/// Ensures a non-empty path and strips trailing slashes, keeping root `/`
fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
