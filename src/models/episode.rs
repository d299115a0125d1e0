//! Episode table model.

use crate::models::report::Table;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Columns an episode table must provide.
pub const REQUIRED_COLUMNS: &[&str] = &["Season", "Episode Number", "Title"];

/// All columns written when exporting an episode table.
pub const ALL_COLUMNS: &[&str] = &["Season", "Episode Number", "Title", "Airdate", "Description"];

/// A single episode row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Season number.
    #[serde(rename = "Season")]
    pub season: u16,
    /// Episode number within the season.
    #[serde(rename = "Episode Number")]
    pub episode_number: u16,
    /// Episode title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Air date as published.
    #[serde(rename = "Airdate", default)]
    pub air_date: Option<String>,
    /// Short synopsis.
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

/// Ordered list of episode rows.
///
/// Row order matters: within a season, the n-th row is matched against the
/// n-th file of each file type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeTable {
    pub records: Vec<EpisodeRecord>,
}

impl EpisodeTable {
    pub fn new(records: Vec<EpisodeRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Group rows by season in ascending season order, keeping row order.
    pub fn by_season(&self) -> BTreeMap<u16, Vec<&EpisodeRecord>> {
        let mut seasons: BTreeMap<u16, Vec<&EpisodeRecord>> = BTreeMap::new();
        for record in &self.records {
            seasons.entry(record.season).or_default().push(record);
        }
        seasons
    }

    /// Read a table from CSV, validating the header before any row.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = reader.headers()?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(crate::Error::MissingColumns(missing));
        }

        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<EpisodeRecord>, csv::Error>>()?;

        Ok(Self { records })
    }

    /// Load a table from a CSV file.
    pub fn load_csv(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(crate::Error::PathNotFound(path.display().to_string()));
        }
        let file = std::fs::File::open(path)?;
        let table = Self::from_csv_reader(file)?;
        tracing::info!("Loaded {} episodes from {}", table.len(), path.display());
        Ok(table)
    }

    /// Convert into a generic table for rendering.
    pub fn to_table(&self) -> Table {
        Table {
            headers: ALL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: self
                .records
                .iter()
                .map(|r| {
                    vec![
                        r.season.to_string(),
                        r.episode_number.to_string(),
                        r.title.clone(),
                        r.air_date.clone().unwrap_or_default(),
                        r.description.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
        }
    }
}
