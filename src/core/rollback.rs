//! Rollback execution module.
//!
//! Reverses the renames recorded in a rollback file, newest first.

use crate::models::rollback::{Rollback, RollbackOperation};
use crate::utils::fs::rename_file;
use crate::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Rollback executor.
#[derive(Debug, Default)]
pub struct RollbackExecutor;

impl RollbackExecutor {
    /// Create a new rollback executor.
    pub fn new() -> Self {
        Self
    }

    /// Execute a rollback.
    pub fn execute(&self, rollback: &Rollback, dry_run: bool) -> Result<RollbackResult> {
        // Check for conflicts first
        let conflicts = self.check_conflicts(rollback);
        if !conflicts.is_empty() {
            println!("{}", "[WARNING] Conflicts detected:".bold().yellow());
            for conflict in &conflicts {
                println!("  - {}", conflict);
            }
            println!();
        }

        let mut result = RollbackResult::default();

        // Execute operations in reverse order
        let operations: Vec<_> = rollback.operations.iter().filter(|op| op.executed).rev().collect();

        let pb = if dry_run {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(operations.len() as u64)
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        for op in operations {
            pb.set_message(
                op.to
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
            pb.inc(1);

            if dry_run {
                println!(
                    "  {} {} -> {}",
                    "[DRY-RUN]".yellow(),
                    op.to.display(),
                    op.from.display()
                );
                result.success_count += 1;
                continue;
            }

            match self.execute_rollback_op(op) {
                Ok(true) => result.success_count += 1,
                Ok(false) => result.skip_count += 1,
                Err(e) => {
                    let error_msg = format!("{}: {}", op.to.display(), e);
                    tracing::error!("Rollback operation failed: {}", error_msg);
                    result.errors.push(error_msg);
                    result.error_count += 1;
                }
            }
        }

        pb.finish_and_clear();

        Ok(result)
    }

    /// Check for conflicts before rollback.
    fn check_conflicts(&self, rollback: &Rollback) -> Vec<String> {
        let mut conflicts = Vec::new();

        for op in rollback.operations.iter().filter(|op| op.executed) {
            if !op.to.exists() {
                conflicts.push(format!("File not found at target: {}", op.to.display()));
            }
            if op.from.exists() {
                conflicts.push(format!(
                    "Original location occupied: {}",
                    op.from.display()
                ));
            }
        }

        conflicts
    }

    /// Undo a single rename.
    fn execute_rollback_op(&self, op: &RollbackOperation) -> Result<bool> {
        if !op.to.exists() {
            tracing::warn!("Renamed file not found, skipping: {:?}", op.to);
            return Ok(false);
        }

        rename_file(&op.to, &op.from)?;
        tracing::debug!("Renamed back: {:?} -> {:?}", op.to, op.from);
        Ok(true)
    }
}

/// Result of a rollback execution.
#[derive(Debug, Default)]
pub struct RollbackResult {
    /// Number of successful operations.
    pub success_count: usize,
    /// Number of skipped operations.
    pub skip_count: usize,
    /// Number of failed operations.
    pub error_count: usize,
    /// Error messages.
    pub errors: Vec<String>,
}

impl RollbackResult {
    /// Check if rollback was successful.
    pub fn is_success(&self) -> bool {
        self.error_count == 0
    }

    /// Print summary.
    pub fn print_summary(&self) {
        println!("{}", "[Rollback Summary]".bold().green());
        println!("  {} {}", "Successful:".bold(), self.success_count);
        println!("  {} {}", "Skipped:".bold(), self.skip_count);
        println!("  {} {}", "Failed:".bold(), self.error_count);

        if !self.errors.is_empty() {
            println!();
            println!("{}", "[Errors]".bold().red());
            for error in &self.errors {
                println!("  - {}", error);
            }
        }
    }
}

/// Load a rollback from a JSON file.
pub fn load_rollback(path: &Path) -> Result<Rollback> {
    let content = fs::read_to_string(path)?;
    let rollback: Rollback = serde_json::from_str(&content)?;
    Ok(rollback)
}

/// Save a rollback to a JSON file.
pub fn save_rollback(rollback: &Rollback, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(rollback)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    tracing::info!("Rollback saved to {:?}", path);
    Ok(())
}
