//! Episode reconciler module.
//!
//! Renames the files in `Season N` folders after an episode table:
//! - Rows are grouped by season and matched against that season's folder
//! - Files are bucketed by extension and each bucket is numbered on its own
//! - A season is skipped when its largest bucket does not match the row count
//! - Every applied rename is journaled so it can be rolled back

use crate::core::normalizer::MEDIA_EXTENSIONS;
use crate::generators::filename::{extract_episode_number, generate_episode_filename};
use crate::models::episode::{EpisodeRecord, EpisodeTable};
use crate::models::rollback::Rollback;
use crate::utils::fs::{ensure_directory, get_extension, list_files, rename_file};
use crate::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Subtitle extensions renamed alongside the videos.
pub const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "sub", "ass", "ssa", "vtt", "idx"];

/// Metadata extensions renamed alongside the videos.
pub const METADATA_EXTENSIONS: &[&str] = &["nfo"];

/// All extensions that get their own bucket, in bucket order.
fn bucket_extensions() -> impl Iterator<Item = &'static str> {
    MEDIA_EXTENSIONS
        .iter()
        .chain(SUBTITLE_EXTENSIONS)
        .chain(METADATA_EXTENSIONS)
        .copied()
}

/// How files are paired with episode rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// The n-th file of a bucket gets the n-th row of the season.
    #[default]
    Positional,
    /// Pair by the episode number found in each filename, falling back to
    /// positional order when a bucket has no usable numbering.
    Strict,
}

/// Reconciler options.
#[derive(Debug, Clone)]
pub struct ReconcilerOptions {
    /// Free text appended to every new name.
    pub info: Option<String>,
    /// Pairing strategy.
    pub mode: MatchMode,
    /// Plan renames without touching the disk.
    pub dry_run: bool,
    /// Season folder name pattern, `{season}` is replaced by the number.
    pub season_folder: String,
}

impl ReconcilerOptions {
    /// Folder name of a season.
    pub fn season_folder_name(&self, season: u16) -> String {
        self.season_folder.replace("{season}", &season.to_string())
    }
}

impl Default for ReconcilerOptions {
    fn default() -> Self {
        Self {
            info: None,
            mode: MatchMode::default(),
            dry_run: false,
            season_folder: "Season {season}".to_string(),
        }
    }
}

/// A single planned rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOp {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl RenameOp {
    /// Whether the file already carries its target name.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// What happened to one season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeasonOutcome {
    /// Renames were applied (or planned, in dry-run mode).
    Renamed {
        season: u16,
        renamed: usize,
        unchanged: usize,
    },
    /// No folder for the season.
    MissingFolder { season: u16, folder: PathBuf },
    /// The largest file bucket does not match the number of rows.
    CountMismatch {
        season: u16,
        files: usize,
        rows: usize,
    },
}

/// Summary of a reconcile run.
#[derive(Debug, Default)]
pub struct RenameSummary {
    /// Outcome per season, in season order.
    pub seasons: Vec<SeasonOutcome>,
    /// Renames applied, or planned in dry-run mode.
    pub renames: Vec<RenameOp>,
}

impl RenameSummary {
    pub fn renamed_count(&self) -> usize {
        self.renames.len()
    }

    pub fn skipped_seasons(&self) -> usize {
        self.seasons
            .iter()
            .filter(|s| !matches!(s, SeasonOutcome::Renamed { .. }))
            .count()
    }
}

/// Episode reconciler.
///
/// Holds the rollback journal of the run, which stays available after an
/// error so already applied renames can be undone.
#[derive(Debug)]
pub struct Reconciler {
    root: PathBuf,
    options: ReconcilerOptions,
    journal: Rollback,
}

impl Reconciler {
    /// Create a reconciler for the series folder at `root`.
    pub fn new(root: &Path, options: ReconcilerOptions) -> Self {
        Self {
            root: root.to_path_buf(),
            options,
            journal: Rollback::new(root),
        }
    }

    /// Renames applied so far.
    pub fn journal(&self) -> &Rollback {
        &self.journal
    }

    /// Rename every season of `table` found under the root.
    ///
    /// Missing season folders and count mismatches skip the season. A
    /// failing rename undoes the renames already applied to that season
    /// and aborts the run; earlier seasons stay renamed and journaled.
    pub fn rename_episodes(&mut self, table: &EpisodeTable) -> Result<RenameSummary> {
        ensure_directory(&self.root)?;

        let mut summary = RenameSummary::default();

        for (season, rows) in table.by_season() {
            let folder = self.root.join(self.options.season_folder_name(season));

            if !folder.is_dir() {
                tracing::warn!(
                    "Season folder {} does not exist. Skipping...",
                    folder.display()
                );
                summary
                    .seasons
                    .push(SeasonOutcome::MissingFolder { season, folder });
                continue;
            }

            let ops = match self.plan_season(&folder, season, &rows)? {
                SeasonPlan::Ready(ops) => ops,
                SeasonPlan::Mismatch { files } => {
                    tracing::warn!(
                        "The number of files in {} ({}) does not match the number of episodes for season {} ({}). Skipping...",
                        folder.display(),
                        files,
                        season,
                        rows.len()
                    );
                    summary.seasons.push(SeasonOutcome::CountMismatch {
                        season,
                        files,
                        rows: rows.len(),
                    });
                    continue;
                }
            };

            let (noop, pending): (Vec<RenameOp>, Vec<RenameOp>) =
                ops.into_iter().partition(RenameOp::is_noop);

            if !self.options.dry_run {
                self.apply_season(&pending)?;
            }

            summary.seasons.push(SeasonOutcome::Renamed {
                season,
                renamed: pending.len(),
                unchanged: noop.len(),
            });
            summary.renames.extend(pending);
        }

        tracing::info!(
            "Renamed {} files, skipped {} seasons",
            summary.renamed_count(),
            summary.skipped_seasons()
        );

        Ok(summary)
    }

    /// Work out every rename for one season and check it for collisions.
    fn plan_season(&self, folder: &Path, season: u16, rows: &[&EpisodeRecord]) -> Result<SeasonPlan> {
        let files = list_files(folder)?;
        let buckets = bucket_files(&files);

        let reference = buckets.iter().map(|(_, b)| b.len()).max().unwrap_or(0);
        if reference != rows.len() {
            return Ok(SeasonPlan::Mismatch { files: reference });
        }

        let mut ops = Vec::new();
        for (ext, bucket) in buckets.iter().filter(|(_, b)| !b.is_empty()) {
            let pairs = pair_files(bucket, rows, self.options.mode);
            tracing::debug!("Season {}: {} {} files", season, pairs.len(), ext);

            for (file, row) in pairs {
                let extension = Path::new(file)
                    .extension()
                    .map(|e| e.to_string_lossy().to_string())
                    .unwrap_or_else(|| ext.to_string());
                let new_name = generate_episode_filename(
                    season,
                    row.episode_number,
                    &row.title,
                    self.options.info.as_deref(),
                    &extension,
                );
                ops.push(RenameOp {
                    from: folder.join(file),
                    to: folder.join(new_name),
                });
            }
        }

        check_collisions(&ops)?;
        Ok(SeasonPlan::Ready(ops))
    }

    /// Apply one season's renames, undoing them all if one fails.
    fn apply_season(&mut self, ops: &[RenameOp]) -> Result<()> {
        let mut applied = 0usize;

        for op in ops {
            if let Err(e) = rename_file(&op.from, &op.to) {
                tracing::error!("Rename failed, reverting {} renames: {}", applied, e);
                self.revert(applied);
                return Err(e);
            }
            self.journal.record(&op.from, &op.to);
            applied += 1;
            tracing::info!(
                "Renamed: {} -> {}",
                op.from.file_name().unwrap_or_default().to_string_lossy(),
                op.to.file_name().unwrap_or_default().to_string_lossy()
            );
        }

        Ok(())
    }

    /// Undo the last `count` journaled renames.
    ///
    /// Renames that cannot be undone stay in the journal so the saved
    /// rollback file still matches the disk.
    fn revert(&mut self, count: usize) {
        let mut stuck = Vec::new();

        for _ in 0..count {
            let Some(op) = self.journal.pop() else {
                break;
            };
            if let Err(e) = rename_file(&op.to, &op.from) {
                tracing::error!(
                    "Failed to revert {} -> {}: {}",
                    op.to.display(),
                    op.from.display(),
                    e
                );
                stuck.push(op);
            }
        }

        for op in stuck.into_iter().rev() {
            self.journal.record(&op.from, &op.to);
        }
    }
}

enum SeasonPlan {
    Ready(Vec<RenameOp>),
    Mismatch { files: usize },
}

/// Group file names by extension bucket, keeping name order.
fn bucket_files(files: &[String]) -> Vec<(&'static str, Vec<&str>)> {
    let mut buckets: Vec<(&'static str, Vec<&str>)> =
        bucket_extensions().map(|ext| (ext, Vec::new())).collect();

    for file in files {
        let Some(ext) = get_extension(Path::new(file)) else {
            continue;
        };
        if let Some((_, bucket)) = buckets.iter_mut().find(|(e, _)| *e == ext) {
            bucket.push(file.as_str());
        }
    }

    buckets
}

/// Pair the files of one bucket with episode rows.
fn pair_files<'a>(
    files: &[&'a str],
    rows: &[&'a EpisodeRecord],
    mode: MatchMode,
) -> Vec<(&'a str, &'a EpisodeRecord)> {
    if mode == MatchMode::Strict {
        if let Some(pairs) = pair_by_episode_number(files, rows) {
            return pairs;
        }
        tracing::debug!("No usable episode numbers, falling back to positional order");
    }

    files.iter().copied().zip(rows.iter().copied()).collect()
}

/// Pair files with rows by the episode number in their names.
///
/// Returns `None` unless every file has a distinct number that appears in
/// the rows.
fn pair_by_episode_number<'a>(
    files: &[&'a str],
    rows: &[&'a EpisodeRecord],
) -> Option<Vec<(&'a str, &'a EpisodeRecord)>> {
    let mut seen = HashSet::new();
    files
        .iter()
        .map(|file| {
            let number = extract_episode_number(file)?;
            if !seen.insert(number) {
                return None;
            }
            let row = rows.iter().find(|r| r.episode_number == number)?;
            Some((*file, *row))
        })
        .collect()
}

/// Reject plans that would overwrite a file or map two files to one name.
fn check_collisions(ops: &[RenameOp]) -> Result<()> {
    let mut targets = HashSet::new();
    for op in ops {
        if !targets.insert(&op.to) {
            return Err(crate::Error::FileAlreadyExists(op.to.display().to_string()));
        }
        if !op.is_noop() && op.to.exists() {
            return Err(crate::Error::FileAlreadyExists(op.to.display().to_string()));
        }
    }
    Ok(())
}
