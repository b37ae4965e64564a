use serde::Deserialize;
use std::time::Duration;

/// Default start URL when none is configured
pub const DEFAULT_START_URL: &str = "https://www.hardrace.co.uk/";

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; url-exporter/1.0; +https://example.local)";

/// Main configuration structure
///
/// Every section and key is optional in the TOML file; missing values fall
/// back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// URL the breadth-first crawl starts from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Page budget: maximum number of fetch attempts
    #[serde(rename = "max-pages")]
    pub max_pages: u64,

    /// Politeness delay between fetch attempts (seconds)
    #[serde(rename = "delay-secs")]
    pub delay_secs: f64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            max_pages: 15_000,
            delay_secs: 1.0,
        }
    }
}

impl CrawlerConfig {
    /// The politeness delay as a Duration
    ///
    /// Only meaningful after validation (finite and non-negative).
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_secs).unwrap_or_default()
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 20,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the product URL CSV
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "hardrace_product_urls.csv".to_string(),
        }
    }
}

/// Command-line overrides applied on top of the file/default configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub start_url: Option<String>,
    pub max_pages: Option<u64>,
    pub delay_secs: Option<f64>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    pub csv_path: Option<String>,
}

impl Config {
    /// Applies every override that is set
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(start_url) = overrides.start_url {
            self.crawler.start_url = start_url;
        }
        if let Some(max_pages) = overrides.max_pages {
            self.crawler.max_pages = max_pages;
        }
        if let Some(delay_secs) = overrides.delay_secs {
            self.crawler.delay_secs = delay_secs;
        }
        if let Some(user_agent) = overrides.user_agent {
            self.http.user_agent = user_agent;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.http.timeout_secs = timeout_secs;
        }
        if let Some(csv_path) = overrides.csv_path {
            self.output.csv_path = csv_path;
        }
    }
}
