//! Robots.txt policy implementation
//!
//! Permission checks are delegated to the robotstxt crate; Crawl-delay is
//! read with a small line scanner since the crate does not expose it.

use robotstxt::DefaultMatcher;
use std::time::Duration;

/// Parsed robots.txt policy
///
/// Immutable once loaded. The permissive variant allows every URL and is
/// what the crawl falls back to when robots.txt cannot be fetched.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
    /// Whether to allow all regardless of content
    allow_all: bool,
}

impl ParsedRobots {
    /// Creates a policy from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive policy that allows everything
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Returns true if this policy enforces nothing
    pub fn is_permissive(&self) -> bool {
        self.allow_all || self.content.trim().is_empty()
    }

    /// Checks if a URL is allowed for the given user agent token
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The robots.txt product token (e.g. "url-exporter")
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.is_permissive() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Gets the Crawl-delay that applies to a user agent token
    ///
    /// A group naming the agent wins over the `*` group.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<Duration> {
        if self.is_permissive() {
            return None;
        }

        let normalized_agent = user_agent.to_lowercase();
        let mut group_agents: Vec<String> = Vec::new();
        let mut in_agent_lines = false;
        let mut delay_for_wildcard: Option<Duration> = None;
        let mut delay_for_agent: Option<Duration> = None;

        for line in self.content.lines() {
            // Strip trailing comments
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // Consecutive User-agent lines share one group
                    if !in_agent_lines {
                        group_agents.clear();
                    }
                    in_agent_lines = true;
                    group_agents.push(value.to_lowercase());
                }
                "crawl-delay" => {
                    in_agent_lines = false;
                    // Negative, non-finite and out-of-range values are ignored
                    let Some(delay) = value
                        .parse::<f64>()
                        .ok()
                        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                    else {
                        continue;
                    };
                    if group_agents.iter().any(|ua| *ua == normalized_agent) {
                        delay_for_agent = Some(delay);
                    } else if group_agents.iter().any(|ua| ua == "*") {
                        delay_for_wildcard = Some(delay);
                    }
                }
                _ => in_agent_lines = false,
            }
        }

        delay_for_agent.or(delay_for_wildcard)
    }
}
