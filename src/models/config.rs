//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration settings for deadwood
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory of the project to analyze
    pub source_dir: PathBuf,

    /// Glob patterns for files that must be included (empty means all)
    pub include_patterns: Vec<String>,

    /// Glob patterns for directories and files to exclude
    pub exclude_patterns: Vec<String>,

    /// Whether to detect unused imports
    pub detect_unused_imports: bool,

    /// Whether to detect unused dependencies
    pub detect_unused_dependencies: bool,

    /// Whether to report high cyclomatic complexity
    pub detect_complexity: bool,

    /// Whether to apply fixes after detection
    pub fix: bool,

    /// Whether to use the raised safe-mode confidence floor when fixing
    pub safe_mode: bool,

    /// Whether to run the project test suite after fixing (rolls back on failure)
    pub verify: bool,

    /// Minimum confidence a finding needs to be eligible for fixing
    pub confidence_threshold: f32,

    /// Cyclomatic complexity above which a function is reported
    pub complexity_threshold: usize,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            include_patterns: Vec::new(),
            exclude_patterns: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "dist".to_string(),
                "build".to_string(),
                "coverage".to_string(),
            ],
            detect_unused_imports: true,
            detect_unused_dependencies: true,
            detect_complexity: true,
            fix: false,
            safe_mode: false,
            verify: false,
            confidence_threshold: crate::fixer::DEFAULT_CONFIDENCE_FLOOR,
            complexity_threshold: 10,
            output_format: OutputFormat::Text,
            output_file: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub source_dir: Option<PathBuf>,
    pub include_patterns: Option<Vec<String>>,
    pub exclude_patterns: Option<Vec<String>>,
    pub detect_unused_imports: Option<bool>,
    pub detect_unused_dependencies: Option<bool>,
    pub detect_complexity: Option<bool>,
    pub fix: Option<bool>,
    pub safe_mode: Option<bool>,
    pub verify: Option<bool>,
    pub confidence_threshold: Option<f32>,
    pub complexity_threshold: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.source_dir.is_some() {
            self.source_dir = other.source_dir;
        }
        if other.include_patterns.is_some() {
            self.include_patterns = other.include_patterns;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.detect_unused_imports.is_some() {
            self.detect_unused_imports = other.detect_unused_imports;
        }
        if other.detect_unused_dependencies.is_some() {
            self.detect_unused_dependencies = other.detect_unused_dependencies;
        }
        if other.detect_complexity.is_some() {
            self.detect_complexity = other.detect_complexity;
        }
        if other.fix.is_some() {
            self.fix = other.fix;
        }
        if other.safe_mode.is_some() {
            self.safe_mode = other.safe_mode;
        }
        if other.verify.is_some() {
            self.verify = other.verify;
        }
        if other.confidence_threshold.is_some() {
            self.confidence_threshold = other.confidence_threshold;
        }
        if other.complexity_threshold.is_some() {
            self.complexity_threshold = other.complexity_threshold;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(source_dir) = &self.source_dir {
            settings.source_dir = source_dir.clone();
        }
        if let Some(include_patterns) = &self.include_patterns {
            settings.include_patterns = include_patterns.clone();
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(detect_unused_imports) = self.detect_unused_imports {
            settings.detect_unused_imports = detect_unused_imports;
        }
        if let Some(detect_unused_dependencies) = self.detect_unused_dependencies {
            settings.detect_unused_dependencies = detect_unused_dependencies;
        }
        if let Some(detect_complexity) = self.detect_complexity {
            settings.detect_complexity = detect_complexity;
        }
        if let Some(fix) = self.fix {
            settings.fix = fix;
        }
        if let Some(safe_mode) = self.safe_mode {
            settings.safe_mode = safe_mode;
        }
        if let Some(verify) = self.verify {
            settings.verify = verify;
        }
        if let Some(confidence_threshold) = self.confidence_threshold {
            settings.confidence_threshold = confidence_threshold;
        }
        if let Some(complexity_threshold) = self.complexity_threshold {
            settings.complexity_threshold = complexity_threshold;
        }
        if let Some(output_format) = &self.output_format {
            settings.output_format = output_format.clone();
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
