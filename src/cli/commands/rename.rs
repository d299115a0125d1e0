//! Rename command implementation.
//!
//! Renames the episode files of a series after an episode table and writes
//! a rollback file for recovery.

use crate::cli::args::EpisodeSource;
use crate::cli::commands::episodes::fetch_table;
use crate::core::reconciler::{MatchMode, Reconciler, ReconcilerOptions, RenameSummary, SeasonOutcome};
use crate::core::rollback::save_rollback;
use crate::models::config::load_config;
use crate::models::episode::EpisodeTable;
use crate::services::tmdb::TmdbClient;
use crate::utils::fs::ensure_directory;
use crate::Result;
use chrono::Local;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Options of a rename run.
#[derive(Debug, Clone, Default)]
pub struct RenameArgs {
    pub info: Option<String>,
    pub strict: bool,
    pub dry_run: bool,
    pub rollback_output: Option<PathBuf>,
}

/// Rename the episode files under `path`.
pub async fn rename(path: &Path, source: &EpisodeSource, args: &RenameArgs) -> Result<()> {
    let config = load_config();

    println!("{}", "[RENAME] Renaming episodes".bold().cyan());
    println!("  {} {}", "Series:".bold(), path.display());
    println!();

    ensure_directory(path)?;

    let table = match (&source.csv, source.show()) {
        (Some(csv), _) => {
            println!("[INFO] Loading episode table: {}", csv.display());
            EpisodeTable::load_csv(csv)?
        }
        (None, Some(show)) => {
            let client = TmdbClient::from_env()?;
            fetch_table(&client, &show, 1, None).await?
        }
        (None, None) => return Err(crate::Error::other("No episode table source given")),
    };
    println!("  {} {}", "Episodes:".bold(), table.len());
    println!();

    if args.dry_run {
        println!("{}", "[DRY-RUN] Showing what would be done:".bold().yellow());
        println!();
    }

    let options = ReconcilerOptions {
        info: args.info.clone().or(config.rename.info.clone()),
        mode: if args.strict {
            MatchMode::Strict
        } else {
            MatchMode::Positional
        },
        dry_run: args.dry_run,
        season_folder: config.rename.season_folder.clone(),
    };

    let mut reconciler = Reconciler::new(path, options);
    let outcome = reconciler.rename_episodes(&table);

    // Whatever got renamed before a failure must stay recoverable
    if !reconciler.journal().is_empty() {
        let rollback_path = args
            .rollback_output
            .clone()
            .unwrap_or_else(|| default_rollback_path(path));
        save_rollback(reconciler.journal(), &rollback_path)?;
        println!(
            "{} Rollback saved to: {}",
            "[OK]".green(),
            rollback_path.display()
        );
    }

    let summary = outcome?;
    print_summary(&summary, args.dry_run);

    Ok(())
}

/// `rollback_<timestamp>.json` inside the series folder.
fn default_rollback_path(root: &Path) -> PathBuf {
    root.join(format!(
        "rollback_{}.json",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

fn print_summary(summary: &RenameSummary, dry_run: bool) {
    if dry_run {
        for op in &summary.renames {
            println!(
                "  {} {} -> {}",
                "[DRY-RUN]".yellow(),
                op.from.file_name().unwrap_or_default().to_string_lossy(),
                op.to.file_name().unwrap_or_default().to_string_lossy()
            );
        }
        println!();
    }

    println!("{}", "[Rename Summary]".bold().green());
    for season in &summary.seasons {
        match season {
            SeasonOutcome::Renamed {
                season,
                renamed,
                unchanged,
            } => println!(
                "  Season {}: {} renamed, {} already named",
                season, renamed, unchanged
            ),
            SeasonOutcome::MissingFolder { season, .. } => println!(
                "  Season {}: {}",
                season,
                "skipped (no folder)".yellow()
            ),
            SeasonOutcome::CountMismatch {
                season,
                files,
                rows,
            } => println!(
                "  Season {}: {}",
                season,
                format!("skipped ({} files, {} episodes)", files, rows).yellow()
            ),
        }
    }
    println!(
        "  {} {}",
        (if dry_run { "Planned:" } else { "Renamed:" }).bold(),
        summary.renamed_count()
    );
    println!("  {} {}", "Skipped seasons:".bold(), summary.skipped_seasons());
}
