//! Usage-resolution detectors
//!
//! Both detectors are heuristic by contract: bounded confidence, bounded
//! risk. The confidence constants below are fixed per detector class and
//! consumed by the fixer's eligibility floor.

pub mod unused_dependencies;
pub mod unused_imports;

/// Confidence assigned to unused-import findings; textual absence of any
/// reference is a strong signal.
pub const IMPORT_CONFIDENCE: f32 = 0.9;

/// Confidence for unused production dependencies.
pub const DEPENDENCY_CONFIDENCE: f32 = 0.8;

/// Confidence for unused dev dependencies; dev tooling is often referenced
/// only through configuration, not source imports.
pub const DEV_DEPENDENCY_CONFIDENCE: f32 = 0.6;

pub use unused_dependencies::{ManifestUsageSet, UnusedDependencyDetector, UsageScanner};
pub use unused_imports::UnusedImportDetector;
