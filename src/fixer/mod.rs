//! Confidence-gated rewrite engine
//!
//! Runs as a small state machine:
//! `Idle -> ImportsPass -> DependenciesPass -> (VerifyPass) -> Committed | RolledBack`.
//! Only findings at or above the configured confidence floor are eligible
//! for mutation; everything below is silently skipped. Per-file mutation
//! failures are recorded in the outcome without aborting the run. A failed
//! verification restores every file this run modified and nothing else.

pub mod edits;
pub mod rollback;
pub mod test_runner;

use crate::models::config::Settings;
use crate::models::findings::{AnalysisResults, UnusedImportFinding};
use crate::models::outcome::FixOutcome;
use crate::parsers::package_json::Manifest;
use edits::LineEdit;
use rollback::FileSnapshots;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use test_runner::{CommandTestRunner, TestRunner};

/// Default confidence floor for mutation eligibility
pub const DEFAULT_CONFIDENCE_FLOOR: f32 = 0.7;

/// Raised floor applied when safe mode is on
pub const SAFE_MODE_CONFIDENCE_FLOOR: f32 = 0.8;

/// States of one fix invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixState {
    Idle,
    ImportsPass,
    DependenciesPass,
    VerifyPass,
    Committed,
    RolledBack,
}

/// Rewrite engine applying eligible findings to disk
pub struct Fixer {
    settings: Settings,
    runner: Box<dyn TestRunner>,
    state: FixState,
}

impl Fixer {
    /// Create a fixer with the default `npm test` verification runner
    pub fn new(settings: Settings) -> Self {
        Self::with_runner(settings, Box::new(CommandTestRunner::npm_test()))
    }

    /// Create a fixer with an explicit verification collaborator
    pub fn with_runner(settings: Settings, runner: Box<dyn TestRunner>) -> Self {
        Self {
            settings,
            runner,
            state: FixState::Idle,
        }
    }

    /// Current state, terminal after `apply` returns
    pub fn state(&self) -> FixState {
        self.state
    }

    /// The confidence a finding needs to be eligible for mutation
    pub fn confidence_floor(&self) -> f32 {
        if self.settings.safe_mode {
            SAFE_MODE_CONFIDENCE_FLOOR.max(self.settings.confidence_threshold)
        } else {
            self.settings.confidence_threshold
        }
    }

    /// Apply eligible findings to the project, returning the outcome.
    ///
    /// Never panics and never returns early on per-file failures; the
    /// outcome lists every file touched and every error encountered.
    pub fn apply(&mut self, results: &AnalysisResults, project_root: &Path) -> FixOutcome {
        let mut outcome = FixOutcome::new();
        let mut snapshots = FileSnapshots::new();
        let floor = self.confidence_floor();

        self.state = FixState::ImportsPass;
        self.remove_imports(results, floor, &mut outcome, &mut snapshots);

        self.state = FixState::DependenciesPass;
        self.remove_dependencies(results, floor, project_root, &mut outcome, &mut snapshots);

        if self.settings.verify && outcome.changed_anything() {
            self.state = FixState::VerifyPass;
            if !self.verification_passed(project_root, &mut outcome) {
                outcome.errors.extend(snapshots.restore_all());
                outcome.errors.push("tests failed after cleanup".to_string());
                outcome.rolled_back = true;
                outcome.success = false;
                self.state = FixState::RolledBack;
                return outcome;
            }
        }

        self.state = FixState::Committed;
        outcome.success = true;
        outcome
    }

    fn remove_imports(
        &self,
        results: &AnalysisResults,
        floor: f32,
        outcome: &mut FixOutcome,
        snapshots: &mut FileSnapshots,
    ) {
        // Group eligible findings by file; BTreeMap keeps file order stable.
        let mut by_file: BTreeMap<&PathBuf, Vec<&UnusedImportFinding>> = BTreeMap::new();
        for finding in &results.unused_imports {
            if finding.confidence >= floor {
                by_file.entry(&finding.file).or_default().push(finding);
            }
        }

        for (file, findings) in by_file {
            let content = match fs::read_to_string(file) {
                Ok(content) => content,
                Err(e) => {
                    outcome
                        .errors
                        .push(format!("could not read {}: {}", file.display(), e));
                    continue;
                }
            };

            let lines: Vec<&str> = content.lines().collect();

            // All bindings on one line are planned as a single edit; two
            // conflicting rewrites of the same line would lose one of them.
            let mut by_line: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
            for finding in findings {
                by_line
                    .entry(finding.line)
                    .or_default()
                    .push(finding.import_name.as_str());
            }

            let mut planned = Vec::new();
            let mut bindings_planned = 0;

            for (line, names) in by_line {
                let plan = match lines.get(line.wrapping_sub(1)) {
                    Some(line_text) => edits::plan_import_removal(line_text, &names),
                    None => edits::plan_import_removal("", &names),
                };

                for name in &plan.failed {
                    outcome.errors.push(format!(
                        "could not edit {}:{} ({})",
                        file.display(),
                        line,
                        name
                    ));
                }

                if let Some(kind) = plan.edit {
                    planned.push(LineEdit { line, kind });
                    bindings_planned += plan.removed;
                }
            }

            if planned.is_empty() {
                continue;
            }

            let (new_content, _applied) = edits::apply_edits(&content, planned);
            if new_content == content {
                continue;
            }

            snapshots.record(file, &content);
            match fs::write(file, &new_content) {
                Ok(()) => {
                    outcome.modified_files.push(file.clone());
                    outcome.imports_removed += bindings_planned;
                }
                Err(e) => {
                    outcome
                        .errors
                        .push(format!("could not write {}: {}", file.display(), e));
                }
            }
        }
    }

    fn remove_dependencies(
        &self,
        results: &AnalysisResults,
        floor: f32,
        project_root: &Path,
        outcome: &mut FixOutcome,
        snapshots: &mut FileSnapshots,
    ) {
        let eligible: Vec<_> = results
            .unused_dependencies
            .iter()
            .filter(|f| f.confidence >= floor)
            .collect();

        if eligible.is_empty() {
            return;
        }

        let mut manifest = match Manifest::load(project_root) {
            Ok(manifest) => manifest,
            Err(e) => {
                outcome.errors.push(e.user_message());
                return;
            }
        };

        let original = match fs::read_to_string(manifest.path()) {
            Ok(original) => original,
            Err(e) => {
                outcome
                    .errors
                    .push(format!("could not read {}: {}", manifest.path().display(), e));
                return;
            }
        };

        let mut removed = Vec::new();
        for finding in eligible {
            if manifest.remove(finding.dependency_kind, &finding.package_name) {
                removed.push(finding.package_name.clone());
            }
        }

        if removed.is_empty() {
            return;
        }

        // One read-modify-write cycle per fix invocation.
        snapshots.record(manifest.path(), &original);
        match manifest.write() {
            Ok(()) => {
                outcome.modified_files.push(manifest.path().to_path_buf());
                outcome.dependencies_removed = removed;
            }
            Err(e) => outcome.errors.push(e.user_message()),
        }
    }

    fn verification_passed(&self, project_root: &Path, outcome: &mut FixOutcome) -> bool {
        match self.runner.run(project_root) {
            Ok(passed) => passed,
            Err(e) => {
                outcome.errors.push(e.user_message());
                false
            }
        }
    }
}
