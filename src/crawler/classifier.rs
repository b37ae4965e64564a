//! Product page classification
//!
//! Three cheap signals over the raw HTML, any one of which is enough:
//!
//! 1. A JSON-LD `"@type": "Product"` declaration
//! 2. An Open Graph `<meta property="og:type" content="product">` tag
//! 3. The `product-info-main` container class of a common storefront template
//!
//! Matching is purely textual so truncated or minified JSON-LD still counts.

use regex::Regex;
use std::sync::LazyLock;

static JSON_LD_PRODUCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"@type"\s*:\s*"product""#).expect("hardcoded regex pattern is valid")
});

static META_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("hardcoded regex pattern is valid"));

static OG_TYPE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bproperty\s*=\s*["']?og:type["']?"#).expect("hardcoded regex pattern is valid")
});

static PRODUCT_CONTENT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bcontent\s*=\s*["']?product["'\s/>]"#)
        .expect("hardcoded regex pattern is valid")
});

/// Marker class of the product page container in a common storefront template
const TEMPLATE_FINGERPRINT: &str = "product-info-main";

/// Which signal identified a product page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSignal {
    JsonLd,
    OpenGraph,
    TemplateFingerprint,
}

/// Returns the first signal that marks the HTML as a product page
///
/// Signals are checked in order and short-circuit. Empty input never matches.
pub fn product_signal(html: &str) -> Option<ProductSignal> {
    if html.is_empty() {
        return None;
    }

    if JSON_LD_PRODUCT.is_match(html) {
        return Some(ProductSignal::JsonLd);
    }

    if has_og_product_meta(html) {
        return Some(ProductSignal::OpenGraph);
    }

    if html.contains(TEMPLATE_FINGERPRINT) {
        return Some(ProductSignal::TemplateFingerprint);
    }

    None
}

/// Decides whether a fetched page is a product detail page
///
/// # Example
///
/// ```
/// use product_crawler::crawler::is_product_page;
///
/// assert!(is_product_page(r#"<meta content="product" property="og:type">"#));
/// assert!(!is_product_page("<html><body>About us</body></html>"));
/// ```
pub fn is_product_page(html: &str) -> bool {
    product_signal(html).is_some()
}

/// Looks for an og:type=product meta tag, in any attribute order
fn has_og_product_meta(html: &str) -> bool {
    META_TAG.find_iter(html).any(|tag| {
        let tag = tag.as_str();
        OG_TYPE_ATTR.is_match(tag) && PRODUCT_CONTENT_ATTR.is_match(tag)
    })
}
