//! Command line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Media File Tools - Catalog movie collections and rename TV episodes
#[derive(Parser, Debug)]
#[command(name = "mediafiletools")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Catalog the movies under a directory
    Catalog {
        /// Directory to catalog
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Sort type: abc or folder
        #[arg(short, long, default_value = "abc")]
        sort: String,

        /// Strip everything after the release year
        #[arg(long)]
        strip: bool,

        /// Output type: csv, txt or console (default from config)
        #[arg(short = 't', long)]
        output_type: Option<String>,

        /// Output file or directory
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Fetch the episode table of a TV show
    Episodes {
        #[command(flatten)]
        show: ShowId,

        /// First season to fetch
        #[arg(long, default_value_t = 1)]
        start: u16,

        /// Last season to fetch (default: the show's last season)
        #[arg(long)]
        end: Option<u16>,

        /// Output type: csv, txt or console (default from config)
        #[arg(short = 't', long)]
        output_type: Option<String>,

        /// Output file or directory
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Rename episode files in season folders
    Rename {
        /// Series directory containing the season folders
        #[arg(value_name = "PATH")]
        path: PathBuf,

        #[command(flatten)]
        source: EpisodeSource,

        /// Extra text appended to every new name (e.g. "1080p")
        #[arg(long)]
        info: Option<String>,

        /// Pair files with episodes by the number in their names
        #[arg(long)]
        strict: bool,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,

        /// Output path for the rollback file
        #[arg(long, value_name = "FILE")]
        rollback_output: Option<PathBuf>,
    },

    /// Rollback a previous rename
    Rollback {
        /// Path to the rollback file
        #[arg(value_name = "ROLLBACK_FILE")]
        rollback_file: PathBuf,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },
}

/// A TV show identified on TMDB or IMDB.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ShowId {
    /// TMDB TV show id
    #[arg(long)]
    pub tmdb_id: Option<u64>,

    /// IMDB id (e.g. tt1439629)
    #[arg(long)]
    pub imdb_id: Option<String>,
}

/// Where the episode table of a rename comes from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct EpisodeSource {
    /// Episode table CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// TMDB TV show id
    #[arg(long)]
    pub tmdb_id: Option<u64>,

    /// IMDB id (e.g. tt1439629)
    #[arg(long)]
    pub imdb_id: Option<String>,
}

impl EpisodeSource {
    /// The show to fetch, when the table does not come from a file.
    pub fn show(&self) -> Option<ShowId> {
        if self.csv.is_some() {
            return None;
        }
        Some(ShowId {
            tmdb_id: self.tmdb_id,
            imdb_id: self.imdb_id.clone(),
        })
    }
}

impl Commands {
    /// Whether the command talks to TMDB.
    pub fn needs_tmdb(&self) -> bool {
        match self {
            Commands::Episodes { .. } => true,
            Commands::Rename { source, .. } => source.csv.is_none(),
            _ => false,
        }
    }
}
