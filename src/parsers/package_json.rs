//! Project manifest (package.json) reading and rewriting
//!
//! The manifest is kept as a raw JSON object so a rewrite only touches the
//! keys that were deleted; unrelated structure and key order are preserved
//! (serde_json is built with `preserve_order`).

use crate::error::{DeadwoodError, Result};
use crate::models::findings::DependencyKind;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the project manifest
pub const MANIFEST_FILE: &str = "package.json";

/// A declared dependency entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub name: String,
    pub version_spec: String,
}

/// In-memory view of a project's package.json
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    root: Map<String, Value>,
}

impl Manifest {
    /// Load the manifest from a project root
    ///
    /// A missing manifest is a hard error: dependency analysis has nothing
    /// to check without one.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(DeadwoodError::ManifestMissing { path });
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| DeadwoodError::file_read(path.clone(), e))?;

        Self::parse(&content, path)
    }

    /// Parse manifest content; `path` is kept for error context and rewrites
    pub fn parse(content: &str, path: PathBuf) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| DeadwoodError::json_parse_error(path.clone(), e))?;

        let root = match value {
            Value::Object(obj) => obj,
            _ => {
                return Err(DeadwoodError::ManifestInvalid {
                    path,
                    message: "Root value is not an object".into(),
                });
            }
        };

        Ok(Self { path, root })
    }

    /// Path this manifest was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared package name, if present
    pub fn package_name(&self) -> Option<&str> {
        self.root.get("name").and_then(Value::as_str)
    }

    /// Entries of one dependency map, in declaration order
    pub fn entries(&self, kind: DependencyKind) -> Vec<DependencyEntry> {
        let mut entries = Vec::new();

        if let Some(Value::Object(map)) = self.root.get(kind.manifest_key()) {
            for (name, version) in map {
                if let Some(version_str) = version.as_str() {
                    entries.push(DependencyEntry {
                        name: name.clone(),
                        version_spec: version_str.to_string(),
                    });
                }
            }
        }

        entries
    }

    /// Delete one dependency entry; returns whether the key existed
    pub fn remove(&mut self, kind: DependencyKind, name: &str) -> bool {
        match self.root.get_mut(kind.manifest_key()) {
            Some(Value::Object(map)) => map.remove(name).is_some(),
            _ => false,
        }
    }

    /// Rewrite the manifest to disk, verbatim except for deleted keys
    ///
    /// Key order is preserved; the output always ends with a newline.
    pub fn write(&self) -> Result<()> {
        let mut content = serde_json::to_string_pretty(&Value::Object(self.root.clone()))?;
        content.push('\n');

        fs::write(&self.path, content)
            .map_err(|e| DeadwoodError::mutation(self.path.clone(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FIXTURE: &str = r#"{
  "name": "fixture",
  "version": "1.0.0",
  "dependencies": {
    "react": "^18.2.0",
    "lodash": "^4.17.21"
  },
  "devDependencies": {
    "eslint": "^9.0.0"
  }
}"#;

    #[test]
    fn test_missing_manifest_is_hard_error() {
        let dir = TempDir::new().unwrap();
        let result = Manifest::load(dir.path());

        assert!(matches!(result, Err(DeadwoodError::ManifestMissing { .. })));
    }

    #[test]
    fn test_entries_in_declaration_order() {
        let manifest = Manifest::parse(FIXTURE, PathBuf::from(MANIFEST_FILE)).unwrap();

        let deps = manifest.entries(DependencyKind::Dependency);
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].name, "react");
        assert_eq!(deps[1].name, "lodash");

        let dev = manifest.entries(DependencyKind::DevDependency);
        assert_eq!(dev.len(), 1);
        assert_eq!(dev[0].version_spec, "^9.0.0");

        assert!(manifest.entries(DependencyKind::PeerDependency).is_empty());
    }

    #[test]
    fn test_remove_and_rewrite_preserves_unrelated_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, FIXTURE).unwrap();

        let mut manifest = Manifest::load(dir.path()).unwrap();
        assert!(manifest.remove(DependencyKind::Dependency, "lodash"));
        assert!(!manifest.remove(DependencyKind::Dependency, "lodash"));
        manifest.write().unwrap();

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("\"react\""));
        assert!(!rewritten.contains("\"lodash\""));
        assert!(rewritten.contains("\"eslint\""));
        assert!(rewritten.ends_with('\n'));

        // Key order survives the round-trip.
        let name_idx = rewritten.find("\"name\"").unwrap();
        let deps_idx = rewritten.find("\"dependencies\"").unwrap();
        assert!(name_idx < deps_idx);
    }

    #[test]
    fn test_non_object_root_rejected() {
        let result = Manifest::parse("[1, 2]", PathBuf::from(MANIFEST_FILE));
        assert!(matches!(result, Err(DeadwoodError::ManifestInvalid { .. })));
    }
}
