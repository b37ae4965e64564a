use crate::config::types::{Config, ConfigOverrides};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Resolves the effective configuration for a run
///
/// Starts from the file at `path` (or built-in defaults when `None`),
/// applies command-line overrides, then validates the merged result.
/// A file may therefore be invalid on its own as long as the overrides
/// repair it.
///
/// # Returns
///
/// The validated config and the file's fingerprint, if a file was used
///
/// # Example
///
/// ```no_run
/// use product_crawler::config::{resolve_config, ConfigOverrides};
/// use std::path::Path;
///
/// let overrides = ConfigOverrides {
///     max_pages: Some(100),
///     ..Default::default()
/// };
/// let (config, hash) = resolve_config(Some(Path::new("crawler.toml")), overrides).unwrap();
/// println!("Page budget: {} (config {:?})", config.crawler.max_pages, hash);
/// ```
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<(Config, Option<String>), ConfigError> {
    let (mut config, hash) = match path {
        Some(path) => {
            let (config, hash) = read_config_file(path)?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    config.apply_overrides(overrides);
    validate(&config)?;

    Ok((config, hash))
}

/// Reads a file once and returns the unvalidated config and its fingerprint
fn read_config_file(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok((config, fingerprint(&content)))
}

fn fingerprint(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
