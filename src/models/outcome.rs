//! Result structure for a fix invocation

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of one fix invocation
///
/// Partial success is a valid outcome: per-file mutation failures are
/// recorded in `errors` without aborting the run. `success` is false only
/// when the whole run was rolled back after a failed verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixOutcome {
    pub success: bool,
    /// Files rewritten by this run, including the manifest if it changed
    pub modified_files: Vec<PathBuf>,
    /// Number of import bindings removed (whole-line and token-level edits)
    pub imports_removed: usize,
    /// Names of dependencies deleted from the manifest
    pub dependencies_removed: Vec<String>,
    /// Non-fatal error strings, plus the verification cause on rollback
    pub errors: Vec<String>,
    /// Whether the modified files were restored after a failed verification
    pub rolled_back: bool,
}

impl FixOutcome {
    pub fn new() -> Self {
        Self {
            success: false,
            modified_files: Vec::new(),
            imports_removed: 0,
            dependencies_removed: Vec::new(),
            errors: Vec::new(),
            rolled_back: false,
        }
    }

    /// Whether anything was actually changed on disk
    pub fn changed_anything(&self) -> bool {
        !self.modified_files.is_empty()
    }
}

impl Default for FixOutcome {
    fn default() -> Self {
        Self::new()
    }
}
