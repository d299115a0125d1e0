//! Rollback data model.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Rollback file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rollback {
    /// Rollback version.
    pub version: String,
    /// Unique id of the rename run.
    pub id: String,
    /// Execution timestamp.
    pub executed_at: String,
    /// Series root the renames happened under.
    pub root: PathBuf,
    /// Renames performed (in execution order).
    pub operations: Vec<RollbackOperation>,
}

/// A single applied rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackOperation {
    /// Sequence number.
    pub seq: u32,
    /// Original path.
    pub from: PathBuf,
    /// New path.
    pub to: PathBuf,
    /// Whether this operation was executed.
    pub executed: bool,
}

impl Rollback {
    /// Start an empty journal for a rename run under `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            version: "1.0".to_string(),
            id: Uuid::new_v4().to_string(),
            executed_at: Utc::now().to_rfc3339(),
            root: root.to_path_buf(),
            operations: Vec::new(),
        }
    }

    /// Record an applied rename.
    pub fn record(&mut self, from: &Path, to: &Path) {
        let seq = self.operations.len() as u32 + 1;
        self.operations.push(RollbackOperation {
            seq,
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            executed: true,
        });
    }

    /// Drop the most recent operation (after it has been undone).
    pub fn pop(&mut self) -> Option<RollbackOperation> {
        self.operations.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
