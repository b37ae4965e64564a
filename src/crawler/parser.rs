//! HTML parser for extracting links and the canonical URL
//!
//! This module handles parsing HTML content to extract:
//! - Outbound links to follow (from `<a href>` tags)
//! - The page's declared canonical URL (`<link rel="canonical">`)

use crate::url::normalize_url;
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// All links found on the page (absolute URLs, not deduplicated)
    pub links: Vec<String>,

    /// Normalized canonical URL, falling back to the normalized page URL
    pub canonical: Url,
}

/// Parses HTML content once and extracts links and the canonical URL
///
/// # Example
///
/// ```
/// use product_crawler::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<link rel="canonical" href="/p"><a href="/brakes">Brakes</a>"#;
/// let page_url = Url::parse("https://site.com/p?ref=abc").unwrap();
/// let parsed = parse_html(html, &page_url);
/// assert_eq!(parsed.canonical.as_str(), "https://site.com/p");
/// assert_eq!(parsed.links, vec!["https://site.com/brakes".to_string()]);
/// ```
pub fn parse_html(html: &str, page_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        links: collect_links(&document, page_url),
        canonical: resolve_canonical(&document, page_url),
    }
}

/// Extracts every followable link from the HTML, resolved against `base_url`
///
/// Fragment-only, `mailto:` and `tel:` links are skipped, as is anything
/// that cannot be resolved or does not resolve to HTTP(S). Duplicates are
/// kept; deduplication happens against the visited set.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    collect_links(&document, base_url)
}

/// Resolves the page's canonical URL
///
/// Returns the normalized `<link rel="canonical">` target when present and
/// resolvable, otherwise the normalized `fetched_url`.
pub fn canonical_url(html: &str, fetched_url: &Url) -> Url {
    let document = Html::parse_document(html);
    resolve_canonical(&document, fetched_url)
}

fn collect_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

fn resolve_canonical(document: &Html, fetched_url: &Url) -> Url {
    if let Ok(selector) = Selector::parse("link[rel][href]") {
        for element in document.select(&selector) {
            let is_canonical = element
                .value()
                .attr("rel")
                .is_some_and(|rel| {
                    rel.split_ascii_whitespace()
                        .any(|token| token.eq_ignore_ascii_case("canonical"))
                });
            if !is_canonical {
                continue;
            }

            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let resolved = fetched_url
                .join(href.trim())
                .ok()
                .and_then(|url| normalize_url(url.as_str()).ok());

            match resolved {
                Some(url) => return url,
                None => {
                    tracing::debug!("Ignoring unresolvable canonical '{}' on {}", href, fetched_url)
                }
            }
        }
    }

    // The fetched URL is already absolute HTTP(S), so this only fails on
    // pathological inputs; keep it as-is then
    normalize_url(fetched_url.as_str()).unwrap_or_else(|_| fetched_url.clone())
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - fragment-only (`#...`) links
/// - `mailto:` and `tel:` links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution (`javascript:`, `data:`, ...)
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("mailto:") || lower.starts_with("tel:") {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/category/page").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://other.com/page".to_string()]);
    }

    #[test]
    fn test_extract_relative_links() {
        let html = r#"<a href="/other">Root</a><a href="sibling">Sibling</a>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(
            links,
            vec![
                "https://example.com/other".to_string(),
                "https://example.com/category/sibling".to_string(),
            ]
        );
    }

    #[test]
    fn test_keeps_query_for_normalizer() {
        let html = r#"<a href="/brakes?page=2#list">Next</a>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://example.com/brakes?page=2#list".to_string()]);
    }

    #[test]
    fn test_skip_fragment_mailto_tel() {
        let html = r##"
            <a href="#section">Jump</a>
            <a href="mailto:sales@example.com">Email</a>
            <a href="MAILTO:sales@example.com">Email</a>
            <a href="tel:+441234567890">Call</a>
        "##;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_skip_javascript_and_empty() {
        let html = r#"<a href="javascript:void(0)">JS</a><a href="">Empty</a><a>No href</a>"#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let html = r#"<a href="/p">One</a><a href="/p">Two</a>"#;
        assert_eq!(extract_links(html, &base_url()).len(), 2);
    }

    #[test]
    fn test_unresolvable_href_does_not_abort_page() {
        let html = r#"<a href="http://[::1">Broken</a><a href="/ok">Fine</a>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://example.com/ok".to_string()]);
    }

    #[test]
    fn test_canonical_relative_href() {
        let fetched = Url::parse("https://site.com/p?ref=abc").unwrap();
        let html = r#"<html><head><link rel="canonical" href="/p"></head></html>"#;
        assert_eq!(canonical_url(html, &fetched).as_str(), "https://site.com/p");
    }

    #[test]
    fn test_canonical_absolute_and_normalized() {
        let fetched = Url::parse("https://site.com/x").unwrap();
        let html = r#"<link rel="canonical" href="https://SITE.com/Widget/?colour=red">"#;
        assert_eq!(canonical_url(html, &fetched).as_str(), "https://site.com/Widget");
    }

    #[test]
    fn test_canonical_rel_case_and_tokens() {
        let fetched = Url::parse("https://site.com/x").unwrap();
        let html = r#"<link href="/y" rel="Canonical alternate">"#;
        assert_eq!(canonical_url(html, &fetched).as_str(), "https://site.com/y");
    }

    #[test]
    fn test_no_canonical_falls_back_to_fetched() {
        let fetched = Url::parse("https://site.com/p/?utm_source=x").unwrap();
        let html = r#"<html><head><title>No canonical</title></head></html>"#;
        assert_eq!(canonical_url(html, &fetched).as_str(), "https://site.com/p");
    }

    #[test]
    fn test_malformed_canonical_falls_back() {
        let fetched = Url::parse("https://site.com/p").unwrap();
        let html = r#"<link rel="canonical" href="http://[broken">"#;
        assert_eq!(canonical_url(html, &fetched).as_str(), "https://site.com/p");
    }

    #[test]
    fn test_stylesheet_link_is_not_canonical() {
        let fetched = Url::parse("https://site.com/p").unwrap();
        let html = r#"<link rel="stylesheet" href="/styles.css">"#;
        assert_eq!(canonical_url(html, &fetched).as_str(), "https://site.com/p");
    }

    #[test]
    fn test_parse_html_combines_both() {
        let fetched = Url::parse("https://site.com/p?ref=abc").unwrap();
        let html = r#"<link rel="canonical" href="/p"><a href="/q">Q</a><a href="mailto:x@y.z">M</a>"#;
        let parsed = parse_html(html, &fetched);
        assert_eq!(parsed.canonical.as_str(), "https://site.com/p");
        assert_eq!(parsed.links, vec!["https://site.com/q".to_string()]);
    }
}
