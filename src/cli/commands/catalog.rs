//! Catalog command implementation.
//!
//! Walks a movie directory and writes the alphabetic or per-series index.

use crate::core::catalog::{self, SortType};
use crate::generators::table::{self, OutputType};
use crate::models::config::load_config;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Build and emit a catalog.
pub fn catalog(
    path: &Path,
    sort: &str,
    strip: bool,
    output_type: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config();

    // Validate selectors before touching the disk
    let sort_type: SortType = sort.parse()?;
    let output_type: OutputType = output_type
        .unwrap_or(config.catalog.output_type.as_str())
        .parse()?;
    let strip = strip || config.catalog.strip;

    println!("{}", "[CATALOG] Building movie catalog".bold().cyan());
    println!("  {} {}", "Source:".bold(), path.display());
    println!("  {} {}", "Sort:".bold(), sort_type);
    println!("  {} {}", "Output:".bold(), output_type);
    println!();

    let report = catalog::build_catalog(path, sort_type, strip)?;

    if report.is_empty() {
        println!("{}", "[WARNING] No media files found".yellow());
    }

    let written = table::emit(
        &report.to_table(),
        output_type,
        output,
        &config.catalog.filename,
    )?;

    if let Some(path) = written {
        println!();
        println!(
            "{} {} titles written to {}",
            "[OK]".green(),
            report.item_count(),
            path.display()
        );
    }

    Ok(())
}
