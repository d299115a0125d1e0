//! Rollback command implementation.
//!
//! Reads a rollback file and reverses all renames to restore the original
//! file names.

use crate::core::rollback::{self, RollbackExecutor};
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Execute a rollback.
pub fn rollback(rollback_file: &Path, dry_run: bool) -> Result<()> {
    println!("{}", "[ROLLBACK] Rollback command".bold().cyan());
    println!();

    if !rollback_file.exists() {
        return Err(crate::Error::PathNotFound(
            rollback_file.display().to_string(),
        ));
    }

    println!("[INFO] Loading rollback: {}", rollback_file.display());
    let rb = rollback::load_rollback(rollback_file)?;

    println!("  {} {}", "Rename ID:".bold(), rb.id);
    println!("  {} {}", "Series:".bold(), rb.root.display());
    println!("  {} {}", "Executed at:".bold(), rb.executed_at);
    println!("  {} {}", "Operations:".bold(), rb.operations.len());
    println!();

    if dry_run {
        println!(
            "{}",
            "[DRY-RUN] Showing what would be done:".bold().yellow()
        );
    } else {
        println!(
            "{}",
            "[WARNING] This will restore the previous file names!"
                .bold()
                .yellow()
        );
    }
    println!();

    let result = RollbackExecutor::new().execute(&rb, dry_run)?;

    result.print_summary();
    println!();

    if result.is_success() {
        if dry_run {
            println!("{}", "[OK] Dry run complete - no changes were made".green());
            println!();
            println!("{}", "[Next Steps]".bold().cyan());
            println!("  To actually execute the rollback:");
            println!(
                "     {}",
                format!("mediafiletools rollback {}", rollback_file.display()).bold()
            );
        } else {
            println!("{}", "[OK] Rollback completed successfully!".green());
        }
    } else {
        println!("{}", "[WARNING] Rollback completed with errors".yellow());
    }

    Ok(())
}
