//! deadwood - unused import and dependency cleaner for JavaScript/TypeScript
//!
//! This library analyzes a JavaScript/TypeScript source tree to find code
//! and dependencies that are declared but never used, and can remove them
//! behind a confidence gate with optional test verification and rollback.

pub mod cli;
pub mod config;
pub mod core;
pub mod detectors;
pub mod error;
pub mod fixer;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use error::{DeadwoodError, ErrorSeverity, Result};
pub use models::{
    config::Settings,
    findings::{AnalysisResults, UnusedDependencyFinding, UnusedImportFinding},
    outcome::FixOutcome,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
