//! Output formatting functionality
//!
//! This module provides formatters for the supported output formats.

use crate::error::Result;
use crate::models::config::{OutputFormat, Settings};
use crate::models::findings::AnalysisResults;
use crate::models::outcome::FixOutcome;
use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;
use std::io::Write;
use std::path::Path;

/// Render analysis results in the configured output format
pub fn format_results(results: &AnalysisResults, settings: &Settings) -> Result<String> {
    match settings.output_format {
        OutputFormat::Text => Ok(format_results_text(
            results,
            settings.use_colors,
            settings.verbose,
        )),
        OutputFormat::Json => format_json(results),
        OutputFormat::Csv => format_results_csv(results),
    }
}

/// Render a fix outcome in the configured output format
pub fn format_outcome(outcome: &FixOutcome, settings: &Settings) -> Result<String> {
    match settings.output_format {
        OutputFormat::Text => Ok(format_outcome_text(outcome, settings.use_colors)),
        _ => format_json(outcome),
    }
}

/// Write rendered output to a file, or stdout when no file is configured
pub fn write_output(rendered: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|e| crate::error::DeadwoodError::OutputWrite {
                path: path.to_path_buf(),
                source: e,
            })
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", rendered.trim_end_matches('\n'))
                .map_err(|e| crate::error::DeadwoodError::StdoutWrite { source: e })
        }
    }
}

fn format_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn format_results_text(results: &AnalysisResults, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    let heading = |text: &str| {
        if use_colors {
            Blue.bold().paint(text).to_string()
        } else {
            text.to_string()
        }
    };
    let dim = |text: String| {
        if use_colors {
            Style::new().dimmed().paint(text).to_string()
        } else {
            text
        }
    };

    if !results.unused_imports.is_empty() {
        output.push_str(&heading("Unused imports\n"));
        for finding in &results.unused_imports {
            output.push_str(&format!(
                "  {}:{}:{} {} {}\n",
                finding.file.display(),
                finding.line,
                finding.column,
                finding.import_name,
                dim(format!("(from '{}', confidence {:.2})", finding.source, finding.confidence)),
            ));
        }
        output.push('\n');
    }

    if !results.unused_dependencies.is_empty() {
        output.push_str(&heading("Unused dependencies\n"));
        for finding in &results.unused_dependencies {
            output.push_str(&format!(
                "  {} {} {}\n",
                finding.package_name,
                finding.declared_version,
                dim(format!(
                    "({}, confidence {:.2})",
                    finding.dependency_kind, finding.confidence
                )),
            ));
            if verbose {
                output.push_str(&format!("    {}\n", dim(finding.reason.clone())));
            }
        }
        output.push('\n');
    }

    if !results.complexity.is_empty() {
        output.push_str(&heading("High complexity\n"));
        for finding in &results.complexity {
            output.push_str(&format!(
                "  {}:{} {} {}\n",
                finding.file.display(),
                finding.line,
                finding.function_name,
                dim(format!("(complexity {})", finding.complexity)),
            ));
        }
        output.push('\n');
    }

    if !results.errors.is_empty() {
        let warn = if use_colors {
            Yellow.paint("Warnings").to_string()
        } else {
            "Warnings".to_string()
        };
        output.push_str(&format!("{}\n", warn));
        for error in &results.errors {
            output.push_str(&format!("  {}: {}\n", error.file.display(), error.message));
        }
        output.push('\n');
    }

    let status = if results.total_findings() == 0 {
        if use_colors {
            Green.paint("No findings").to_string()
        } else {
            "No findings".to_string()
        }
    } else {
        format!("{} findings", results.total_findings())
    };

    output.push_str(&format!(
        "{} in {} files ({} parsed, {} skipped) in {}\n",
        status,
        results.summary.files_scanned,
        results.summary.files_parsed,
        results.summary.files_skipped,
        results.summary.format_duration(),
    ));

    output
}

fn format_outcome_text(outcome: &FixOutcome, use_colors: bool) -> String {
    let mut output = String::new();

    let status = if outcome.success {
        if use_colors {
            Green.paint("Fix applied").to_string()
        } else {
            "Fix applied".to_string()
        }
    } else if use_colors {
        Red.paint("Fix rolled back").to_string()
    } else {
        "Fix rolled back".to_string()
    };

    output.push_str(&format!(
        "{}: {} imports removed, {} dependencies removed, {} files modified\n",
        status,
        outcome.imports_removed,
        outcome.dependencies_removed.len(),
        outcome.modified_files.len(),
    ));

    for file in &outcome.modified_files {
        let note = if outcome.rolled_back { " (restored)" } else { "" };
        output.push_str(&format!("  {}{}\n", file.display(), note));
    }

    for name in &outcome.dependencies_removed {
        output.push_str(&format!("  - {}\n", name));
    }

    for error in &outcome.errors {
        let prefix = if use_colors {
            Yellow.paint("warning").to_string()
        } else {
            "warning".to_string()
        };
        output.push_str(&format!("  {}: {}\n", prefix, error));
    }

    output
}

fn format_results_csv(results: &AnalysisResults) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["kind", "file", "line", "name", "detail", "confidence"])?;

    for finding in &results.unused_imports {
        writer.write_record([
            "unused-import".to_string(),
            finding.file.display().to_string(),
            finding.line.to_string(),
            finding.import_name.clone(),
            finding.source.clone(),
            format!("{:.2}", finding.confidence),
        ])?;
    }

    for finding in &results.unused_dependencies {
        writer.write_record([
            "unused-dependency".to_string(),
            "package.json".to_string(),
            String::new(),
            finding.package_name.clone(),
            finding.declared_version.clone(),
            format!("{:.2}", finding.confidence),
        ])?;
    }

    for finding in &results.complexity {
        writer.write_record([
            "complexity".to_string(),
            finding.file.display().to_string(),
            finding.line.to_string(),
            finding.function_name.clone(),
            finding.complexity.to_string(),
            String::new(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::error::DeadwoodError::config_error(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| crate::error::DeadwoodError::CsvSerialize { source: e })
}
