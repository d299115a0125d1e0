//! Episodes command implementation.
//!
//! Fetches a show's episode table from TMDB and writes it out.

use crate::cli::args::ShowId;
use crate::generators::table::{self, OutputType};
use crate::models::config::load_config;
use crate::models::episode::EpisodeTable;
use crate::services::tmdb::TmdbClient;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Default file name of an exported episode table.
pub const EPISODES_FILENAME: &str = "Episodes";

/// Fetch and emit an episode table.
pub async fn episodes(
    show: &ShowId,
    start: u16,
    end: Option<u16>,
    output_type: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config();
    let output_type: OutputType = output_type
        .unwrap_or(config.catalog.output_type.as_str())
        .parse()?;

    let client = TmdbClient::from_env()?;
    let table = fetch_table(&client, show, start, end).await?;

    let written = table::emit(&table.to_table(), output_type, output, EPISODES_FILENAME)?;

    if let Some(path) = written {
        println!();
        println!(
            "{} {} episodes written to {}",
            "[OK]".green(),
            table.len(),
            path.display()
        );
    }

    Ok(())
}

/// Resolve the show id and fetch its episodes.
pub async fn fetch_table(
    client: &TmdbClient,
    show: &ShowId,
    start: u16,
    end: Option<u16>,
) -> Result<EpisodeTable> {
    let tv_id = match (show.tmdb_id, show.imdb_id.as_deref()) {
        (Some(id), _) => id,
        (None, Some(imdb_id)) => {
            let found = client.find_tv_by_imdb_id(imdb_id).await?;
            println!("  {} {} (TMDB {})", "Show:".bold(), found.name, found.id);
            found.id
        }
        (None, None) => return Err(crate::Error::other("No TMDB or IMDB id given")),
    };

    println!("{}", "[FETCH] Fetching episodes from TMDB...".bold().cyan());
    let table = client.fetch_episodes(tv_id, start, end).await?;
    println!("  {} {}", "Episodes:".bold(), table.len());

    Ok(table)
}
