//! Catalog builder module.
//!
//! Two strategies turn walked titles into a report:
//! - `abc`: every title in one alphabetical index, bucketed by first character
//! - `folder`: one group per top-level folder, with single-file folders
//!   reclassified as uncategorized

use crate::core::normalizer::normalize;
use crate::core::walker::{self, SeriesScan};
use crate::models::report::{Report, ALPHABETIC_COLUMNS, SERIES_COLUMNS};
use crate::Result;
use std::path::Path;
use std::str::FromStr;

/// Label of the group holding loose and reclassified titles.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Label of the trailing bucket for titles no character bucket claims.
pub const OTHER_BUCKET: &str = "#";

/// Bucket characters in output order: digits 1-9, then A-Z.
fn bucket_chars() -> impl Iterator<Item = char> {
    ('1'..='9').chain('A'..='Z')
}

/// Catalog sort strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortType {
    /// Alphabetical index over the whole tree.
    Abc,
    /// One group per top-level folder.
    Folder,
}

impl FromStr for SortType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "abc" | "alphabetic" => Ok(SortType::Abc),
            "folder" | "series" => Ok(SortType::Folder),
            _ => Err(crate::Error::InvalidSortType(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortType::Abc => write!(f, "abc"),
            SortType::Folder => write!(f, "folder"),
        }
    }
}

/// Walk `root` and build the catalog for the given strategy.
pub fn build_catalog(root: &Path, sort_type: SortType, strip: bool) -> Result<Report> {
    let report = match sort_type {
        SortType::Abc => alphabetic_catalog(&walker::collect_titles(root, strip)?),
        SortType::Folder => series_catalog(&walker::walk_series(root, strip)?, strip),
    };

    tracing::info!(
        "Built {} catalog with {} titles",
        sort_type,
        report.item_count()
    );

    Ok(report)
}

/// Build an alphabetical index.
///
/// Titles are taken in case-sensitive sorted order. Each bucket claims
/// every remaining title starting with its character; buckets without
/// titles are left out. Anything unclaimed ends up in a final `#` bucket.
pub fn alphabetic_catalog(titles: &[String]) -> Report {
    let mut pool: Vec<&str> = titles.iter().map(String::as_str).collect();
    pool.sort_unstable();

    let mut report = Report::new(ALPHABETIC_COLUMNS);

    for bucket in bucket_chars() {
        let (claimed, rest): (Vec<&str>, Vec<&str>) =
            pool.into_iter().partition(|t| t.starts_with(bucket));
        pool = rest;
        report.push_group(&bucket.to_string(), claimed);
    }

    if !pool.is_empty() {
        tracing::debug!("{} titles outside 1-9/A-Z buckets", pool.len());
    }
    report.push_group(OTHER_BUCKET, pool);

    report
}

/// Build a folder index.
///
/// Folders are ordered case-insensitively and the uncategorized group is
/// always last. A folder with a single title is not a series: the title
/// moves to the uncategorized group and the folder is dropped, as is any
/// folder left with fewer than two titles.
pub fn series_catalog(scan: &SeriesScan, strip: bool) -> Report {
    let mut uncategorized = scan.loose.clone();
    let mut groups: Vec<(&str, &[String])> = Vec::new();

    for folder in &scan.folders {
        if folder.name.eq_ignore_ascii_case(UNCATEGORIZED) {
            uncategorized.extend(folder.titles.iter().cloned());
        } else {
            groups.push((folder.name.as_str(), folder.titles.as_slice()));
        }
    }

    groups.sort_by_key(|(name, _)| name.to_lowercase());

    for (name, titles) in &groups {
        if titles.len() == 1 {
            tracing::debug!("Single title in '{}', moving to {}", name, UNCATEGORIZED);
            uncategorized.extend(titles.iter().cloned());
        }
    }

    let mut report = Report::new(SERIES_COLUMNS);
    for (name, titles) in groups.into_iter().filter(|(_, t)| t.len() >= 2) {
        report.push_group(&normalize(name, strip), sorted_ignore_case(titles.to_vec()));
    }
    report.push_group(UNCATEGORIZED, sorted_ignore_case(uncategorized));

    report
}

fn sorted_ignore_case(mut titles: Vec<String>) -> Vec<String> {
    titles.sort_by_key(|t| t.to_lowercase());
    titles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::walker::SeriesFolder;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sort_type_from_str() {
        assert_eq!("abc".parse::<SortType>().unwrap(), SortType::Abc);
        assert_eq!("Folder".parse::<SortType>().unwrap(), SortType::Folder);
        assert!(matches!(
            "size".parse::<SortType>(),
            Err(crate::Error::InvalidSortType(_))
        ));
    }

    #[test]
    fn test_alphabetic_buckets() {
        let report = alphabetic_catalog(&strings(&["Fargo 1996", "2012", "Alien 1979"]));
        let groups = report.groups();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].label, "2");
        assert_eq!(groups[0].items, vec!["2012"]);
        assert_eq!(groups[1].label, "A");
        assert_eq!(groups[1].items, vec!["Alien 1979"]);
        assert_eq!(groups[2].label, "F");
        assert_eq!(groups[2].items, vec!["Fargo 1996"]);
    }

    #[test]
    fn test_alphabetic_rows_layout() {
        let report = alphabetic_catalog(&strings(&["Amelie", "Alien"]));
        let rows: Vec<(&str, &str)> = report
            .rows
            .iter()
            .map(|r| (r.label.as_str(), r.value.as_str()))
            .collect();
        assert_eq!(rows, vec![("", ""), ("A", "Alien"), ("", "Amelie")]);
    }

    #[test]
    fn test_alphabetic_items_start_with_bucket() {
        let titles = strings(&["Zodiac", "Heat", "9", "Her", "Alien", "Up", "Ran", "1917"]);
        let report = alphabetic_catalog(&titles);
        for group in report.groups() {
            for item in &group.items {
                assert!(item.starts_with(&group.label), "{item} in {}", group.label);
            }
        }
    }

    #[test]
    fn test_alphabetic_no_loss_no_duplication() {
        let titles = strings(&["Heat", "heat", "0 Day", "(500) Days", "Heat", "Élite", "1917"]);
        let report = alphabetic_catalog(&titles);

        let mut all: Vec<String> = report.groups().into_iter().flat_map(|g| g.items).collect();
        let mut expected = titles.clone();
        all.sort();
        expected.sort();
        assert_eq!(all, expected);

        let last = report.groups().pop().unwrap();
        assert_eq!(last.label, OTHER_BUCKET);
    }

    #[test]
    fn test_series_singleton_folder_reclassified() {
        let scan = SeriesScan {
            folders: vec![
                SeriesFolder {
                    name: "Breaking Bad".to_string(),
                    titles: strings(&["S01E01 Pilot", "S01E02 Cat'S In The Bag"]),
                },
                SeriesFolder {
                    name: "Annabelle".to_string(),
                    titles: strings(&["Annabelle 2014"]),
                },
            ],
            loose: vec![],
        };

        let groups = series_catalog(&scan, false).groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Breaking Bad");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[1].label, UNCATEGORIZED);
        assert_eq!(groups[1].items, vec!["Annabelle 2014"]);
    }

    #[test]
    fn test_series_order_ignores_case_and_uncategorized_last() {
        let scan = SeriesScan {
            folders: vec![
                SeriesFolder {
                    name: "zombies".to_string(),
                    titles: strings(&["b", "A"]),
                },
                SeriesFolder {
                    name: "Alien".to_string(),
                    titles: strings(&["Alien 3", "Aliens"]),
                },
                SeriesFolder {
                    name: "Empty".to_string(),
                    titles: vec![],
                },
            ],
            loose: strings(&["Zulu", "amelie"]),
        };

        let groups = series_catalog(&scan, false).groups();
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Alien", "zombies", UNCATEGORIZED]);
        assert_eq!(groups[1].items, vec!["A", "b"]);
        assert_eq!(groups[2].items, vec!["amelie", "Zulu"]);
    }

    #[test]
    fn test_series_without_uncategorized_titles() {
        let scan = SeriesScan {
            folders: vec![SeriesFolder {
                name: "Alien".to_string(),
                titles: strings(&["Alien 3", "Aliens"]),
            }],
            loose: vec![],
        };

        let groups = series_catalog(&scan, false).groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Alien");
    }
}
