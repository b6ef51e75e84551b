//! Configuration loading and merging
//!
//! Configuration is resolved once, up front: defaults, then the project's
//! `.deadwood.toml` (if any), then command-line flags. Every component
//! receives the fully resolved `Settings` value; nothing looks up
//! configuration ambiently.

use crate::cli::args::Args;
use crate::error::{DeadwoodError, Result};
use crate::models::config::{PartialSettings, Settings};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the project root
pub const CONFIG_FILE: &str = ".deadwood.toml";

/// Resolve final settings from CLI arguments and the optional config file
pub fn resolve(args: &Args) -> Result<Settings> {
    let project_root = args.path.clone().unwrap_or_else(|| PathBuf::from("."));

    let mut partial = PartialSettings::default();

    if let Some(config_path) = &args.config {
        if !config_path.exists() {
            return Err(DeadwoodError::ConfigNotFound {
                path: config_path.clone(),
            });
        }
        partial.merge_from(load_file(config_path)?);
    } else {
        let default_path = project_root.join(CONFIG_FILE);
        if default_path.exists() {
            partial.merge_from(load_file(&default_path)?);
        }
    }

    // CLI flags take precedence over the config file.
    partial.merge_from(args.to_partial_settings());

    let mut settings = partial.to_settings();
    settings.source_dir = project_root;

    validate(&settings)?;
    Ok(settings)
}

/// Load partial settings from a TOML file
pub fn load_file(path: &Path) -> Result<PartialSettings> {
    let content = fs::read_to_string(path).map_err(|e| DeadwoodError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| DeadwoodError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate(settings: &Settings) -> Result<()> {
    if !(0.0..=1.0).contains(&settings.confidence_threshold) {
        return Err(DeadwoodError::config_error(format!(
            "confidence_threshold must be between 0.0 and 1.0, got {}",
            settings.confidence_threshold
        )));
    }
    Ok(())
}

/// Write a commented default configuration file
pub fn create_default_config(path: &Path) -> Result<()> {
    let template = r#"# deadwood configuration
# CLI flags take precedence over values in this file.

# Glob patterns excluded from scanning
exclude_patterns = ["node_modules", ".git", "dist", "build", "coverage"]

# Detectors
detect_unused_imports = true
detect_unused_dependencies = true
detect_complexity = true

# Fixing
# safe_mode = true          # raise the confidence floor to 0.8
# verify = true             # run `npm test` after fixing, roll back on failure
# confidence_threshold = 0.7

# Reporting
# complexity_threshold = 10
# output_format = "text"    # text, json or csv
"#;

    fs::write(path, template).map_err(|e| DeadwoodError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
