//! Directory walker module.
//!
//! Walks a media directory tree in a deterministic order (directories
//! before files, alphabetical within each level) and collects normalized
//! titles for every media file found.

use crate::core::normalizer::{is_media_file, normalize};
use crate::utils::fs::ensure_directory;
use crate::Result;
use std::cmp::Ordering;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// A top-level folder and the titles found anywhere beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesFolder {
    /// Folder name as found on disk.
    pub name: String,
    /// Normalized titles in walk order.
    pub titles: Vec<String>,
}

/// Result of a series-mode walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesScan {
    /// Immediate child folders of the root, in walk order.
    pub folders: Vec<SeriesFolder>,
    /// Media files directly in the root.
    pub loose: Vec<String>,
}

impl SeriesScan {
    /// Total number of titles found.
    pub fn total_titles(&self) -> usize {
        self.loose.len() + self.folders.iter().map(|f| f.titles.len()).sum::<usize>()
    }
}

/// Directories first, then files, each group ordered by raw name.
fn dirs_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_file = !a.file_type().is_dir();
    let b_file = !b.file_type().is_dir();
    a_file
        .cmp(&b_file)
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn sorted_walk(path: &Path) -> WalkDir {
    WalkDir::new(path).follow_links(true).sort_by(dirs_first)
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().to_string()
}

/// Collect the normalized titles of every media file under `path`.
///
/// The walk is depth-first: at each level all subdirectories are visited
/// (in name order) before the files of that level. Any I/O error aborts
/// the walk.
pub fn collect_titles(path: &Path, strip: bool) -> Result<Vec<String>> {
    ensure_directory(path)?;

    let mut titles = Vec::new();
    let mut files_seen = 0usize;

    for entry in sorted_walk(path) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        files_seen += 1;

        let name = entry_name(&entry);
        if is_media_file(&name) {
            titles.push(normalize(&name, strip));
        } else {
            tracing::debug!("Skipping non-media file: {}", entry.path().display());
        }
    }

    tracing::debug!(
        "Walked {}: {} files, {} media titles",
        path.display(),
        files_seen,
        titles.len()
    );

    Ok(titles)
}

/// Walk `root` treating each immediate subfolder as one series.
///
/// Every subfolder is walked fully and its nested folders flatten into the
/// same series. Every file sitting directly in the root is returned as a
/// loose title; non-media names pass through `normalize` unchanged.
pub fn walk_series(root: &Path, strip: bool) -> Result<SeriesScan> {
    ensure_directory(root)?;

    let mut scan = SeriesScan::default();

    for entry in sorted_walk(root).min_depth(1).max_depth(1) {
        let entry = entry?;
        let name = entry_name(&entry);

        if entry.file_type().is_dir() {
            let titles = collect_titles(entry.path(), strip)?;
            scan.folders.push(SeriesFolder { name, titles });
        } else if entry.file_type().is_file() {
            scan.loose.push(normalize(&name, strip));
        }
    }

    tracing::info!(
        "Scanned {}: {} folders, {} loose files, {} titles",
        root.display(),
        scan.folders.len(),
        scan.loose.len(),
        scan.total_titles()
    );

    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "fake").unwrap();
    }

    #[test]
    fn test_directories_before_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("a_file.mkv"));
        touch(&root.join("z_dir").join("inner.mkv"));
        touch(&root.join("b_dir").join("deep").join("deepest.mp4"));
        touch(&root.join("b_dir").join("b_file.avi"));

        let titles = collect_titles(root, false).unwrap();
        assert_eq!(titles, vec!["Deepest", "B_file", "Inner", "A_file"]);
    }

    #[test]
    fn test_non_media_files_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("movie.mkv"));
        touch(&root.join("movie.srt"));
        touch(&root.join("movie.nfo"));

        let titles = collect_titles(root, false).unwrap();
        assert_eq!(titles, vec!["Movie"]);
    }

    #[test]
    fn test_walk_series_flattens_nested_folders() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("Show").join("Season 1").join("e1.mkv"));
        touch(&root.join("Show").join("Season 2").join("e2.mkv"));
        touch(&root.join("loose.mp4"));
        touch(&root.join("notes.txt"));

        let scan = walk_series(root, false).unwrap();
        assert_eq!(scan.folders.len(), 1);
        assert_eq!(scan.folders[0].name, "Show");
        assert_eq!(scan.folders[0].titles, vec!["E1", "E2"]);
        assert_eq!(scan.loose, vec!["Loose", "notes.txt"]);
        assert_eq!(scan.total_titles(), 4);
    }

    #[test]
    fn test_walk_series_keeps_every_root_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("Loose.mkv"));
        touch(&root.join("readme.txt"));

        let scan = walk_series(root, false).unwrap();
        assert!(scan.folders.is_empty());
        assert_eq!(scan.loose, vec!["Loose", "readme.txt"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        assert!(collect_titles(&missing, false).is_err());
        assert!(walk_series(&missing, false).is_err());
    }
}
