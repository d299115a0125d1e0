//! File system utilities.

use crate::Result;
use std::path::Path;

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Rename a file without ever overwriting an existing one.
pub fn rename_file(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(crate::Error::FileAlreadyExists(to.display().to_string()));
    }
    std::fs::rename(from, to).map_err(|source| crate::Error::RenameFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// List the regular files directly inside a directory, sorted by name.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}
