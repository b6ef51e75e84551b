//! Pre-mutation file snapshots for rollback

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Original file contents recorded before the first mutation of each file.
///
/// Restoring writes the snapshots back byte-for-byte; only files this run
/// modified are ever touched.
#[derive(Debug, Default)]
pub struct FileSnapshots {
    states: HashMap<PathBuf, String>,
}

impl FileSnapshots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state of a file before modification; first record wins
    pub fn record(&mut self, path: &Path, contents: &str) {
        self.states
            .entry(path.to_path_buf())
            .or_insert_with(|| contents.to_string());
    }

    /// Restore every recorded file, returning error strings for files that
    /// could not be written back
    pub fn restore_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (path, contents) in &self.states {
            if let Err(e) = fs::write(path, contents) {
                errors.push(format!("could not restore {}: {}", path.display(), e));
            }
        }

        errors
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_record_wins() {
        let mut snapshots = FileSnapshots::new();
        snapshots.record(Path::new("a.js"), "original");
        snapshots.record(Path::new("a.js"), "mutated");

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots.states[Path::new("a.js")], "original");
    }

    #[test]
    fn test_restore_writes_back_exact_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.js");
        std::fs::write(&path, "before").unwrap();

        let mut snapshots = FileSnapshots::new();
        snapshots.record(&path, "before");
        std::fs::write(&path, "after").unwrap();

        let errors = snapshots.restore_all();

        assert!(errors.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "before");
    }
}
