//! Outcome definitions for URLs taken off the frontier
//!
//! Every dequeued URL ends in exactly one outcome. Discard outcomes happen
//! before any request is sent and never consume page budget.

use std::fmt;

/// What happened to a URL taken off the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageOutcome {
    // ===== Discards (no fetch, no budget) =====
    /// URL was already attempted earlier in the run
    AlreadyVisited,

    /// URL host is not in the allowed-hosts set
    OffSite,

    /// robots.txt forbids fetching the URL
    RobotsDenied,

    // ===== Fetch attempts (consume budget) =====
    /// DNS, connect, timeout or body read failure
    TransportFailed,

    /// Response status was not 200
    HttpError,

    /// 200 response whose body was empty or not HTML
    NotHtml,

    /// HTML page that did not classify as a product page
    Processed,

    /// HTML page classified as a product page
    Product,
}

impl PageOutcome {
    /// Returns true if a request was sent for this URL
    pub fn is_fetch_attempt(&self) -> bool {
        !self.is_discard()
    }

    /// Returns true if the URL was dropped before fetching
    pub fn is_discard(&self) -> bool {
        matches!(self, Self::AlreadyVisited | Self::OffSite | Self::RobotsDenied)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyVisited => "already_visited",
            Self::OffSite => "off_site",
            Self::RobotsDenied => "robots_denied",
            Self::TransportFailed => "transport_failed",
            Self::HttpError => "http_error",
            Self::NotHtml => "not_html",
            Self::Processed => "processed",
            Self::Product => "product",
        }
    }

    /// Returns all outcomes in reporting order
    pub fn all_outcomes() -> [Self; 8] {
        [
            Self::AlreadyVisited,
            Self::OffSite,
            Self::RobotsDenied,
            Self::TransportFailed,
            Self::HttpError,
            Self::NotHtml,
            Self::Processed,
            Self::Product,
        ]
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
