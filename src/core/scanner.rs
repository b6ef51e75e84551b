//! Project file discovery
//!
//! Walks the configured source directory collecting JavaScript/TypeScript
//! files, plus the project-root configuration files that the dependency
//! resolver's textual scan also samples.

use crate::error::Result;
use crate::models::config::Settings;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions treated as analyzable source files
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"];

/// Well-known project-root config files whose raw text is scanned for
/// package references (tools are commonly referenced only there).
const ROOT_CONFIG_FILES: &[&str] = &[
    ".babelrc",
    ".babelrc.js",
    ".eslintrc.cjs",
    ".eslintrc.js",
    ".eslintrc.json",
    "Gruntfile.js",
    "gulpfile.js",
    "karma.conf.js",
];

/// File discovery over one project tree
pub struct Scanner {
    root: PathBuf,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl Scanner {
    /// Create a scanner from resolved settings, compiling the glob patterns
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            root: settings.source_dir.clone(),
            include: Self::compile_patterns(&settings.include_patterns)?,
            exclude: Self::compile_patterns(&settings.exclude_patterns)?,
        })
    }

    fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
        patterns
            .iter()
            .map(|p| Pattern::new(p).map_err(Into::into))
            .collect()
    }

    /// Collect all analyzable source files, sorted for deterministic order
    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry.path()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // Unreadable directories are skipped, not fatal.
                Err(_) => continue,
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !Self::is_source_file(path) {
                continue;
            }
            if !self.matches_include(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Project-root config files for the dependency usage scan
    pub fn config_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(_) => return files,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };

            if name.contains(".config.") || ROOT_CONFIG_FILES.contains(&name) {
                files.push(path);
            }
        }

        files.sort();
        files
    }

    fn is_source_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
            .unwrap_or(false)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        self.exclude
            .iter()
            .any(|pattern| pattern.matches(name) || pattern.matches(&path_str))
    }

    fn matches_include(&self, path: &Path) -> bool {
        if self.include.is_empty() {
            return true;
        }

        let path_str = path.to_string_lossy();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        self.include
            .iter()
            .any(|pattern| pattern.matches(name) || pattern.matches(&path_str))
    }
}
