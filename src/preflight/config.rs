//! Config file preflight check.

use super::CheckResult;
use crate::models::config::{config_file_path, parse_config};
use std::path::Path;

/// Check that the user config, if any, parses.
pub fn check() -> CheckResult {
    check_path(&config_file_path())
}

fn check_path(path: &Path) -> CheckResult {
    if !path.exists() {
        return CheckResult::ok("Config", "not found, using defaults");
    }

    match std::fs::read_to_string(path).map_err(crate::Error::from).and_then(|c| parse_config(&c)) {
        Ok(_) => CheckResult::ok("Config", &path.display().to_string()),
        Err(e) => CheckResult::fail(
            "Config",
            &e.to_string(),
            &format!("Fix or remove {}", path.display()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_passes() {
        let temp_dir = TempDir::new().unwrap();
        assert!(check_path(&temp_dir.path().join("config.toml")).success);
    }

    #[test]
    fn test_invalid_config_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\nlanguage = ").unwrap();

        let result = check_path(&path);
        assert!(!result.success);
        assert!(result.hint.unwrap().contains("config.toml"));
    }

    #[test]
    fn test_valid_config_passes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb]\nlanguage = \"de-DE\"\n").unwrap();
        assert!(check_path(&path).success);
    }
}
