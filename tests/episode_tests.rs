//! Integration tests for episode tables.
//!
//! Tests cover:
//! - Loading episode tables from CSV files
//! - Column validation
//! - Exporting a table and renaming from the exported file

use mediafiletools::core::reconciler::{Reconciler, ReconcilerOptions};
use mediafiletools::generators::table::{emit, OutputType};
use mediafiletools::models::episode::{EpisodeRecord, EpisodeTable};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_csv_with_optional_columns_missing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("episodes.csv");
    fs::write(
        &path,
        "Season,Episode Number,Title\n1,1,Pilot\n1,2,Spanish 101\n",
    )
    .unwrap();

    let table = EpisodeTable::load_csv(&path).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.records[1].title, "Spanish 101");
    assert_eq!(table.records[1].air_date, None);
}

#[test]
fn test_load_csv_missing_columns() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("movies.csv");
    fs::write(&path, "A - Z,Movie\n,\nA,Alien\n").unwrap();

    match EpisodeTable::load_csv(&path) {
        Err(mediafiletools::Error::MissingColumns(cols)) => {
            assert_eq!(cols, vec!["Season", "Episode Number", "Title"]);
        }
        other => panic!("expected MissingColumns, got {:?}", other),
    }
}

#[test]
fn test_load_csv_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(
        EpisodeTable::load_csv(&temp_dir.path().join("none.csv")),
        Err(mediafiletools::Error::PathNotFound(_))
    ));
}

#[test]
fn test_exported_table_drives_rename() {
    let temp_dir = TempDir::new().unwrap();
    let table = EpisodeTable::new(vec![
        EpisodeRecord {
            season: 1,
            episode_number: 1,
            title: "Pilot".to_string(),
            air_date: Some("Thu, Sep 17, 2009".to_string()),
            description: Some("Jeff starts a study group.".to_string()),
        },
        EpisodeRecord {
            season: 1,
            episode_number: 2,
            title: "Spanish 101: Part \"One\"".to_string(),
            ..Default::default()
        },
    ]);

    let csv_path = emit(&table.to_table(), OutputType::Csv, Some(temp_dir.path()), "Episodes")
        .unwrap()
        .unwrap();
    assert_eq!(csv_path, temp_dir.path().join("Episodes.csv"));

    let loaded = EpisodeTable::load_csv(&csv_path).unwrap();
    assert_eq!(loaded, table);

    let series = temp_dir.path().join("Community");
    let season = series.join("Season 1");
    fs::create_dir_all(&season).unwrap();
    fs::write(season.join("community.101.mkv"), "").unwrap();
    fs::write(season.join("community.102.mkv"), "").unwrap();

    let summary = Reconciler::new(&series, ReconcilerOptions::default())
        .rename_episodes(&loaded)
        .unwrap();

    assert_eq!(summary.renamed_count(), 2);
    assert!(season.join("S01E01 - Pilot.mkv").exists());
    assert!(season.join("S01E02 - Spanish 101 Part One.mkv").exists());
}
