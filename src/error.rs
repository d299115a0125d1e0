//! Error types for mediafiletools.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mediafiletools.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Invalid sort type '{0}'. Expected one of: abc, folder")]
    InvalidSortType(String),

    #[error("Invalid output type '{0}'. Expected one of: csv, txt, console")]
    InvalidOutputType(String),

    #[error("TMDB API key not configured. Set TMDB_API_KEY environment variable")]
    TmdbApiKeyMissing,

    // Input shape errors
    #[error("Episode table is missing required columns: {}. Is it the correct file?", .0.join(", "))]
    MissingColumns(Vec<String>),

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    #[error("Failed to rename {} -> {}: {source}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // TMDB errors
    #[error("TV show not found on TMDB: {0}")]
    ShowNotFound(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    // Serialization errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Whether the error was raised before touching the filesystem because
    /// of a bad selector or a malformed input table.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidSortType(_)
                | Error::InvalidOutputType(_)
                | Error::TmdbApiKeyMissing
                | Error::MissingColumns(_)
        )
    }
}
