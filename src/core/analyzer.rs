//! Analysis orchestration
//!
//! Drives discovery, parsing, symbol extraction and both resolvers for one
//! run. Per-file work is independent and fans out across a rayon pool; the
//! dependency usage set is built by merging per-file sets afterwards, so no
//! mutable state is shared between workers.

use crate::core::scanner::Scanner;
use crate::detectors::{ManifestUsageSet, UnusedDependencyDetector, UnusedImportDetector, UsageScanner};
use crate::error::{DeadwoodError, Result};
use crate::models::config::Settings;
use crate::models::findings::{AnalysisResults, ComplexityFinding, UnusedImportFinding};
use crate::output::progress::ScanProgress;
use crate::parsers::ast_parser::SourceParser;
use crate::parsers::package_json::Manifest;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome of processing a single file; merged sequentially afterwards
struct FileOutcome {
    path: PathBuf,
    parsed: bool,
    import_findings: Vec<UnusedImportFinding>,
    complexity_findings: Vec<ComplexityFinding>,
    used_packages: ManifestUsageSet,
    error: Option<DeadwoodError>,
}

/// Main analyzer for one project tree
pub struct Analyzer {
    settings: Settings,
    parser: SourceParser,
    usage_scanner: UsageScanner,
}

impl Analyzer {
    /// Create a new analyzer with resolved settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            parser: SourceParser::new(),
            usage_scanner: UsageScanner::new(),
        }
    }

    /// Run a full analysis pass over the configured project
    pub fn analyze(&self) -> Result<AnalysisResults> {
        let start_time = Instant::now();

        if !self.settings.source_dir.exists() {
            return Err(DeadwoodError::InvalidPath {
                path: self.settings.source_dir.clone(),
            });
        }

        // Dependency resolution has nothing to check without a manifest;
        // its absence is fatal for that detector only.
        let manifest = if self.settings.detect_unused_dependencies {
            Some(Manifest::load(&self.settings.source_dir)?)
        } else {
            None
        };

        let scanner = Scanner::new(&self.settings)?;
        let files = scanner.source_files()?;

        let progress = ScanProgress::new(
            files.len() as u64,
            self.settings.show_progress && !self.settings.quiet,
        );

        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|path| {
                let outcome = self.process_file(path);
                progress.tick();
                outcome
            })
            .collect();

        progress.finish(&format!("Analyzed {} files", files.len()));

        let mut results = AnalysisResults::new();
        results.summary.files_scanned = files.len();

        let mut used_packages = ManifestUsageSet::new();
        for outcome in outcomes {
            if outcome.parsed {
                results.summary.files_parsed += 1;
            } else {
                results.summary.files_skipped += 1;
            }
            if let Some(error) = outcome.error {
                results.add_error(outcome.path.clone(), &error);
            }
            results.add_unused_imports(outcome.import_findings);
            results.add_complexity(outcome.complexity_findings);
            used_packages.extend(outcome.used_packages);
        }

        if let Some(manifest) = &manifest {
            // Tool packages referenced only from root config files still
            // count as used; sample those files too.
            for config_file in scanner.config_files() {
                if let Ok(text) = fs::read_to_string(&config_file) {
                    self.usage_scanner.scan(&text, &mut used_packages);
                }
            }

            results.add_unused_dependencies(UnusedDependencyDetector::detect(
                manifest,
                &used_packages,
            ));
        }

        results.set_scan_duration(start_time.elapsed());
        Ok(results)
    }

    /// Parse and resolve a single file; all failures stay local to the file
    fn process_file(&self, path: &Path) -> FileOutcome {
        let mut outcome = FileOutcome {
            path: path.to_path_buf(),
            parsed: false,
            import_findings: Vec::new(),
            complexity_findings: Vec::new(),
            used_packages: ManifestUsageSet::new(),
            error: None,
        };

        let source_text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                outcome.error = Some(DeadwoodError::file_read(path, e));
                return outcome;
            }
        };

        // The textual package scan works even on files the parser rejects.
        if self.settings.detect_unused_dependencies {
            self.usage_scanner
                .scan(&source_text, &mut outcome.used_packages);
        }

        let analysis = match self.parser.parse_and_extract(
            &source_text,
            path,
            self.settings.detect_complexity,
        ) {
            Ok(analysis) => analysis,
            Err(e) => {
                outcome.error = Some(e);
                return outcome;
            }
        };
        outcome.parsed = true;

        if self.settings.detect_unused_imports {
            outcome.import_findings = UnusedImportDetector::detect(path, &analysis.symbols);
        }

        if self.settings.detect_complexity {
            outcome.complexity_findings = analysis
                .functions
                .into_iter()
                .filter(|f| f.complexity > self.settings.complexity_threshold)
                .map(|f| ComplexityFinding {
                    file: path.to_path_buf(),
                    line: f.line,
                    function_name: f.name,
                    complexity: f.complexity,
                })
                .collect();
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project(manifest: &str, files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), manifest).unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn quiet_settings(root: &Path) -> Settings {
        Settings {
            source_dir: root.to_path_buf(),
            quiet: true,
            show_progress: false,
            ..Settings::default()
        }
    }

    #[test]
    fn test_end_to_end_detection() {
        let dir = project(
            r#"{"dependencies": {"react": "^18.0.0", "left-pad": "^1.3.0"}}"#,
            &[(
                "src/app.jsx",
                "import React from 'react';\nimport helper from './helper';\nexport const App = () => <div/>;\n",
            ),
            ("src/helper.js", "export default function helper() { return 1; }\n")],
        );

        let results = Analyzer::new(quiet_settings(dir.path())).analyze().unwrap();

        // `helper` is imported but never referenced.
        assert_eq!(results.unused_imports.len(), 1);
        assert_eq!(results.unused_imports[0].import_name, "helper");

        // `react` is referenced, `left-pad` is not.
        assert_eq!(results.unused_dependencies.len(), 1);
        assert_eq!(results.unused_dependencies[0].package_name, "left-pad");

        assert_eq!(results.summary.files_scanned, 2);
        assert_eq!(results.summary.files_parsed, 2);
    }

    #[test]
    fn test_missing_manifest_is_fatal_only_for_dependency_detection() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "import x from 'y';\n").unwrap();

        let settings = quiet_settings(dir.path());
        assert!(matches!(
            Analyzer::new(settings.clone()).analyze(),
            Err(DeadwoodError::ManifestMissing { .. })
        ));

        let mut without_deps = settings;
        without_deps.detect_unused_dependencies = false;
        let results = Analyzer::new(without_deps).analyze().unwrap();
        assert_eq!(results.unused_imports.len(), 1);
    }

    #[test]
    fn test_parse_failures_are_isolated() {
        let dir = project(
            r#"{"dependencies": {}}"#,
            &[
                ("bad.js", "import { from 'nowhere\n"),
                ("good.js", "import used from 'pkg';\nused();\n"),
            ],
        );

        let results = Analyzer::new(quiet_settings(dir.path())).analyze().unwrap();

        assert_eq!(results.summary.files_skipped, 1);
        assert_eq!(results.summary.files_parsed, 1);
        assert_eq!(results.summary.errors_encountered, 1);
        assert!(results.unused_imports.is_empty());
    }
}
