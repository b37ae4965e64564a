//! Configuration module
//!
//! This module handles defaults, optional TOML configuration files,
//! command-line overrides and validation.
//!
//! # Example
//!
//! ```no_run
//! use product_crawler::config::{resolve_config, ConfigOverrides};
//! use std::path::Path;
//!
//! let (config, _) = resolve_config(Some(Path::new("crawler.toml")), ConfigOverrides::default()).unwrap();
//! println!("Crawler will fetch at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ConfigOverrides, CrawlerConfig, HttpConfig, OutputConfig, DEFAULT_START_URL,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::resolve_config;
pub use validation::validate;
