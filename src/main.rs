//! product-crawler main entry point
//!
//! This is the command-line interface for the single-site product crawler.

use anyhow::Context;
use clap::Parser;
use product_crawler::config::{resolve_config, Config, ConfigOverrides};
use product_crawler::crawler::crawl;
use product_crawler::output::{log_statistics, print_summary, write_product_csv};
use product_crawler::robots::robots_url_for;
use product_crawler::url::{normalize_url, SiteScope};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// product-crawler: a polite single-site product page finder
///
/// Crawls one site breadth-first from a start URL, respecting robots.txt,
/// and writes the canonical URL of every product page it finds to a CSV.
#[derive(Parser, Debug)]
#[command(name = "product-crawler")]
#[command(version)]
#[command(about = "Find product page URLs on a single site", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start URL (the crawl stays on this site)
    #[arg(long, value_name = "URL")]
    start: Option<String>,

    /// Output CSV path
    #[arg(long, value_name = "PATH")]
    out: Option<String>,

    /// Delay between requests in seconds
    #[arg(long, value_name = "SECS")]
    delay: Option<f64>,

    /// Maximum number of pages to fetch
    #[arg(long, value_name = "N")]
    max_pages: Option<u64>,

    /// User-Agent header
    #[arg(long, value_name = "STRING")]
    ua: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            start_url: self.start.clone(),
            max_pages: self.max_pages,
            delay_secs: self.delay,
            user_agent: self.ua.clone(),
            timeout_secs: self.timeout,
            csv_path: self.out.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = resolve_config(cli.config.as_deref(), cli.overrides())
        .context("Failed to load configuration")?;

    match (&cli.config, &config_hash) {
        (Some(path), Some(hash)) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        ),
        _ => tracing::debug!("Using built-in defaults and command-line options"),
    }

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_crawl(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the run summary.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("product_crawler=info,warn"),
            1 => EnvFilter::new("product_crawler=debug,info"),
            2 => EnvFilter::new("product_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved settings without network access
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let start_url = normalize_url(&config.crawler.start_url).context("Invalid start URL")?;
    let scope = SiteScope::for_start_url(&start_url).context("Invalid start URL")?;

    println!("=== product-crawler Dry Run ===\n");

    println!("Crawler:");
    println!("  Start URL: {}", start_url);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Delay: {}s", config.crawler.delay_secs);

    println!("\nHTTP:");
    println!("  User-Agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\nAllowed Hosts ({}):", scope.len());
    for host in scope.hosts() {
        println!("  - {}", host);
    }

    println!("\nrobots.txt: {}", robots_url_for(&start_url));
    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the normal crawl mode
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let report = crawl(config).await.context("Crawl failed")?;
    log_statistics(&report);

    let csv_path = Path::new(&config.output.csv_path);
    write_product_csv(csv_path, &report.product_urls)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;

    print_summary(&report, csv_path);

    Ok(())
}
