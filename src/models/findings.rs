//! Analysis result structures

use crate::error::DeadwoodError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Which manifest map a dependency was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyKind {
    Dependency,
    DevDependency,
    PeerDependency,
}

impl DependencyKind {
    /// Key of the corresponding map in package.json
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyKind::Dependency => "dependencies",
            DependencyKind::DevDependency => "devDependencies",
            DependencyKind::PeerDependency => "peerDependencies",
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.manifest_key())
    }
}

/// An import binding that is never referenced in its file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedImportFinding {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub import_name: String,
    pub source: String,
    pub confidence: f32,
}

/// A declared package with no detectable reference anywhere in the project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedDependencyFinding {
    pub package_name: String,
    pub declared_version: String,
    pub dependency_kind: DependencyKind,
    pub confidence: f32,
    pub reason: String,
}

/// A function whose cyclomatic complexity exceeds the configured threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityFinding {
    pub file: PathBuf,
    pub line: usize,
    pub function_name: String,
    pub complexity: usize,
}

/// A non-fatal error collected during analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisError {
    pub file: PathBuf,
    pub message: String,
}

/// Aggregate counters for a whole analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub files_scanned: usize,
    pub files_parsed: usize,
    pub files_skipped: usize,
    pub unused_imports: usize,
    pub unused_dependencies: usize,
    pub complexity_warnings: usize,
    pub errors_encountered: usize,
    pub scan_duration: Duration,
}

impl AnalysisSummary {
    pub fn format_duration(&self) -> String {
        let millis = self.scan_duration.as_millis();
        if millis < 1000 {
            format!("{}ms", millis)
        } else {
            format!("{:.2}s", self.scan_duration.as_secs_f64())
        }
    }
}

/// Collection of all findings from one analysis invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub unused_imports: Vec<UnusedImportFinding>,
    pub unused_dependencies: Vec<UnusedDependencyFinding>,
    pub complexity: Vec<ComplexityFinding>,
    pub errors: Vec<AnalysisError>,
    pub summary: AnalysisSummary,
    pub analyzed_at: chrono::DateTime<chrono::Utc>,
}

impl AnalysisResults {
    /// Create a new empty AnalysisResults instance
    pub fn new() -> Self {
        Self {
            unused_imports: Vec::new(),
            unused_dependencies: Vec::new(),
            complexity: Vec::new(),
            errors: Vec::new(),
            summary: AnalysisSummary::default(),
            analyzed_at: chrono::Utc::now(),
        }
    }

    /// Add unused-import findings for one file, keeping declaration order
    pub fn add_unused_imports(&mut self, findings: Vec<UnusedImportFinding>) {
        self.summary.unused_imports += findings.len();
        self.unused_imports.extend(findings);
    }

    /// Add unused-dependency findings
    pub fn add_unused_dependencies(&mut self, findings: Vec<UnusedDependencyFinding>) {
        self.summary.unused_dependencies += findings.len();
        self.unused_dependencies.extend(findings);
    }

    /// Add complexity findings for one file
    pub fn add_complexity(&mut self, findings: Vec<ComplexityFinding>) {
        self.summary.complexity_warnings += findings.len();
        self.complexity.extend(findings);
    }

    /// Record a non-fatal error against a file
    pub fn add_error(&mut self, file: PathBuf, error: &DeadwoodError) {
        self.summary.errors_encountered += 1;
        self.errors.push(AnalysisError {
            file,
            message: error.user_message(),
        });
    }

    /// Set the scan duration in the summary
    pub fn set_scan_duration(&mut self, duration: Duration) {
        self.summary.scan_duration = duration;
    }

    /// Total number of findings of all kinds
    pub fn total_findings(&self) -> usize {
        self.unused_imports.len() + self.unused_dependencies.len() + self.complexity.len()
    }
}

impl Default for AnalysisResults {
    fn default() -> Self {
        Self::new()
    }
}
