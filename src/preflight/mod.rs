//! Preflight checks module.
//!
//! Runs before commands that fetch from TMDB.

mod config;
mod tmdb;

use crate::Result;
use colored::Colorize;

/// Result of a preflight check.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    pub fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            message: message.to_string(),
            hint: None,
        }
    }

    pub fn fail(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }
}

/// Run all preflight checks.
pub async fn run_preflight_checks() -> Result<Vec<CheckResult>> {
    let mut results = Vec::new();

    results.push(config::check());

    // TMDB credentials must be present and accepted
    results.push(tmdb::check().await);

    Ok(results)
}

/// Print preflight check results.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        if result.success {
            println!(
                "{} {}: {}",
                "[OK]".green(),
                result.name.bold(),
                result.message
            );
        } else {
            println!(
                "{} {}: {}",
                "[FAIL]".red(),
                result.name.bold(),
                result.message
            );
            if let Some(ref hint) = result.hint {
                println!("  {} {}", "->".yellow(), hint);
            }
        }
    }
}

/// Check if all preflight checks passed.
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_passed() {
        let ok = CheckResult::ok("TMDB API", "connected");
        let fail = CheckResult::fail("TMDB API", "invalid API key", "Check TMDB_API_KEY");
        assert!(all_passed(&[CheckResult::ok("TMDB API", "connected")]));
        assert!(!all_passed(&[ok, fail]));
        assert!(all_passed(&[]));
    }
}



