//! CSV export of discovered product URLs

use crate::Result;
use csv::{Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header of the single output column
pub const CSV_HEADER: &str = "url";

/// Writes product URLs to a CSV file at `path`, replacing any existing file
///
/// The file has one `url` header row followed by one row per URL in the
/// order given. Callers pass URLs already sorted and deduplicated.
///
/// # Arguments
///
/// * `path` - Destination file
/// * `urls` - Product URLs, one row each
pub fn write_product_csv(path: &Path, urls: &[String]) -> Result<()> {
    let file = File::create(path)?;
    write_product_rows(file, urls)?;
    tracing::debug!("Wrote {} product URLs to {}", urls.len(), path.display());
    Ok(())
}

/// Writes the header and one row per URL to any writer
pub fn write_product_rows<W: Write>(writer: W, urls: &[String]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record([CSV_HEADER])?;
    for url in urls {
        writer.write_record([url.as_str()])?;
    }
    writer.flush()?;

    Ok(())
}
