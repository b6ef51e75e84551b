//! Command-line argument parsing

use crate::models::config::{self, PartialSettings};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// deadwood - unused import and dependency cleaner for JavaScript/TypeScript
#[derive(Parser, Debug, Default)]
#[command(name = "deadwood")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find and remove unused imports and dependencies in JavaScript/TypeScript projects")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Analyze the current directory
    deadwood

    # Analyze a specific project
    deadwood --path ./my-project

    # Skip additional directories
    deadwood --exclude fixtures --exclude generated

Fixing:
    # Remove eligible findings
    deadwood --path ./my-project --fix

    # Fix with the raised safe-mode confidence floor
    deadwood --path ./my-project --fix --safe

    # Fix, then run the test suite and roll back if it fails
    deadwood --path ./my-project --fix --verify

Output Options:
    # JSON report for machine consumption
    deadwood --output json

    # CSV report written to a file
    deadwood --output csv --output-file report.csv

Configuration:
    # Use a specific configuration file
    deadwood --config ./deadwood.toml

    # Create a default configuration file
    deadwood --init
")]
pub struct Args {
    /// Project directory to analyze
    #[arg(short, long, value_name = "PATH", help = "Project directory to analyze (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to a configuration file (defaults to .deadwood.toml in the project root)")]
    pub config: Option<PathBuf>,

    /// Glob patterns for files to include
    #[arg(long, value_name = "PATTERN", help = "Glob patterns for files to include (can be specified multiple times; all source files when omitted)")]
    pub include: Vec<String>,

    /// Glob patterns for directories and files to exclude
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns to exclude (can be specified multiple times, e.g. --exclude node_modules --exclude dist)")]
    pub exclude: Vec<String>,

    /// Disable unused-import detection
    #[arg(long, help = "Disable unused-import detection")]
    pub no_imports: bool,

    /// Disable unused-dependency detection
    #[arg(long, help = "Disable unused-dependency detection (also skips the package.json requirement)")]
    pub no_dependencies: bool,

    /// Disable complexity reporting
    #[arg(long, help = "Disable cyclomatic complexity reporting")]
    pub no_complexity: bool,

    /// Apply fixes after detection
    #[arg(long, help = "Remove eligible findings from source files and package.json")]
    pub fix: bool,

    /// Use the raised safe-mode confidence floor when fixing
    #[arg(long, help = "Raise the confidence floor for fixing (skips lower-confidence findings such as dev dependencies)")]
    pub safe: bool,

    /// Verify fixes by running the test suite, rolling back on failure
    #[arg(long, help = "Run `npm test` after fixing; restore every modified file if the tests fail")]
    pub verify: bool,

    /// Minimum confidence for a finding to be fixed
    #[arg(long, value_name = "FLOOR", help = "Minimum confidence (0.0-1.0) a finding needs to be eligible for fixing")]
    pub confidence: Option<f32>,

    /// Complexity above which a function is reported
    #[arg(long, value_name = "LIMIT", help = "Cyclomatic complexity above which a function is reported (default: 10)")]
    pub max_complexity: Option<usize>,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, help = "Output format: 'text' for human-readable output, 'json' for machine processing, 'csv' for spreadsheets")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write the report to (stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (only show the report)")]
    pub quiet: bool,

    /// Show detailed information
    #[arg(short, long, help = "Show detailed information, including finding reasons and resolved settings")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful when piping the report)")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable progress bars (useful for CI environments)")]
    pub no_progress: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.deadwood.toml) in the project root")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl From<OutputFormat> for config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => config::OutputFormat::Text,
            OutputFormat::Json => config::OutputFormat::Json,
            OutputFormat::Csv => config::OutputFormat::Csv,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Convert the flags that were actually given into partial settings.
    ///
    /// Unset flags stay `None` so config-file values and defaults survive
    /// the merge.
    pub fn to_partial_settings(&self) -> PartialSettings {
        PartialSettings {
            source_dir: self.path.clone(),
            include_patterns: if self.include.is_empty() {
                None
            } else {
                Some(self.include.clone())
            },
            exclude_patterns: if self.exclude.is_empty() {
                None
            } else {
                Some(self.exclude.clone())
            },
            detect_unused_imports: self.no_imports.then_some(false),
            detect_unused_dependencies: self.no_dependencies.then_some(false),
            detect_complexity: self.no_complexity.then_some(false),
            fix: self.fix.then_some(true),
            safe_mode: self.safe.then_some(true),
            verify: self.verify.then_some(true),
            confidence_threshold: self.confidence,
            complexity_threshold: self.max_complexity,
            output_format: self.output.map(Into::into),
            output_file: self.output_file.clone(),
            quiet: self.quiet.then_some(true),
            verbose: self.verbose.then_some(true),
            use_colors: self.no_colors.then_some(false),
            show_progress: self.no_progress.then_some(false),
        }
    }
}
