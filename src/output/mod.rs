//! Output module for crawl results
//!
//! This module handles:
//! - Writing the product URL CSV
//! - Per-outcome crawl statistics
//! - The stdout summary printed after a run

mod csv_writer;
pub mod stats;

pub use csv_writer::{write_product_csv, write_product_rows, CSV_HEADER};
pub use stats::{format_summary, log_statistics, print_summary, CrawlStats};
