//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB configuration.
    pub tmdb: TmdbConfig,
    /// Catalog output defaults.
    pub catalog: CatalogConfig,
    /// Episode renaming defaults.
    pub rename: RenameConfig,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// API key.
    pub api_key: Option<String>,
    /// Language for responses.
    pub language: String,
}

/// Catalog output defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Output type: csv, txt or console.
    pub output_type: String,
    /// File name (without extension) used when the output is a directory.
    pub filename: String,
    /// Strip release tags after the year.
    pub strip: bool,
}

/// Episode renaming defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Season folder name pattern, `{season}` is replaced by the number.
    pub season_folder: String,
    /// Free text appended to every new episode name.
    pub info: Option<String>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("TMDB_API_KEY").ok(),
            language: "en-US".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            output_type: "csv".to_string(),
            filename: "Movie Database".to_string(),
            strip: false,
        }
    }
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            season_folder: "Season {season}".to_string(),
            info: None,
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mediafiletools")
}

/// Path of the user config file.
pub fn config_file_path() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> crate::Result<Config> {
    let mut config: Config = toml::from_str(content)?;
    if config.tmdb.api_key.as_deref().is_some_and(str::is_empty) {
        config.tmdb.api_key = None;
    }
    if config.tmdb.api_key.is_none() {
        config.tmdb.api_key = std::env::var("TMDB_API_KEY").ok();
    }
    Ok(config)
}

/// Load configuration from file.
pub fn load_config() -> Config {
    let config_path = config_file_path();

    if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match parse_config(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring invalid config {}: {}", config_path.display(), e),
            },
            Err(e) => tracing::warn!("Failed to read config {}: {}", config_path.display(), e),
        }
    }

    Config::default()
}
