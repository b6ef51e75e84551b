use deadwood::core::Analyzer;
use deadwood::error::Result;
use deadwood::fixer::test_runner::TestRunner;
use deadwood::fixer::{FixState, Fixer};
use deadwood::models::config::Settings;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create_project(manifest: &str, files: &[(&str, &str)]) -> TempDir {
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

fn settings_for(root: &Path) -> Settings {
    Settings {
        source_dir: root.to_path_buf(),
        quiet: true,
        show_progress: false,
        ..Settings::default()
    }
}

/// Verification stub with a predetermined result
struct StubRunner {
    passes: bool,
}

impl TestRunner for StubRunner {
    fn run(&self, _project_root: &Path) -> Result<bool> {
        Ok(self.passes)
    }
}

#[test]
fn test_import_fix_round_trip() {
    let dir = create_project(
        r#"{"name": "fixture"}"#,
        &[(
            "src/entry.js",
            "import unused from 'pkg';\nconst kept = 1;\nexport default kept;\n",
        )],
    );

    let settings = settings_for(dir.path());
    let results = Analyzer::new(settings.clone()).analyze().unwrap();
    assert_eq!(results.unused_imports.len(), 1);

    let mut fixer = Fixer::new(settings.clone());
    let outcome = fixer.apply(&results, dir.path());

    assert!(outcome.success);
    assert_eq!(outcome.imports_removed, 1);
    assert_eq!(outcome.modified_files.len(), 1);
    assert_eq!(fixer.state(), FixState::Committed);

    let fixed = fs::read_to_string(dir.path().join("src/entry.js")).unwrap();
    assert_eq!(fixed, "const kept = 1;\nexport default kept;\n");

    // Detection on the fixed tree comes back clean.
    let rerun = Analyzer::new(settings).analyze().unwrap();
    assert!(rerun.unused_imports.is_empty());
}

#[test]
fn test_descending_line_mutation_order() {
    let source = "const one = 1;\nconst two = 2;\nimport a from 'a';\nconst three = 3;\nconst four = 4;\nconst five = 5;\nimport b from 'b';\nexport default one + two + three + four + five;\n";
    let dir = create_project(r#"{"name": "fixture"}"#, &[("src/spread.js", source)]);

    let settings = settings_for(dir.path());
    let results = Analyzer::new(settings.clone()).analyze().unwrap();

    let lines: Vec<usize> = results.unused_imports.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![3, 7]);

    let outcome = Fixer::new(settings).apply(&results, dir.path());
    assert_eq!(outcome.imports_removed, 2);

    // Removing line 7 first keeps line 3's number valid; every surviving
    // line lands at its shifted position.
    let fixed = fs::read_to_string(dir.path().join("src/spread.js")).unwrap();
    assert_eq!(
        fixed,
        "const one = 1;\nconst two = 2;\nconst three = 3;\nconst four = 4;\nconst five = 5;\nexport default one + two + three + four + five;\n"
    );
}

#[test]
fn test_safe_mode_floor_skips_low_confidence_findings() {
    let manifest = r#"{
  "name": "fixture",
  "devDependencies": {
    "some-helper": "^1.0.0"
  }
}"#;
    let dir = create_project(manifest, &[("src/index.js", "export const x = 1;\n")]);

    let mut settings = settings_for(dir.path());
    settings.safe_mode = true;

    let results = Analyzer::new(settings.clone()).analyze().unwrap();
    // The finding is still reported...
    assert_eq!(results.unused_dependencies.len(), 1);
    assert!(results.unused_dependencies[0].confidence < 0.8);

    let outcome = Fixer::new(settings).apply(&results, dir.path());

    // ...but never mutated under the raised floor.
    assert!(outcome.success);
    assert!(outcome.dependencies_removed.is_empty());
    assert!(outcome.modified_files.is_empty());
    let manifest_after = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert_eq!(manifest_after, manifest);
}

#[test]
fn test_dependency_removal_preserves_manifest_shape() {
    let dir = create_project(
        r#"{
  "name": "fixture",
  "version": "1.0.0",
  "dependencies": {
    "react": "^18.0.0",
    "left-pad": "^1.3.0"
  },
  "scripts": {
    "test": "jest"
  }
}"#,
        &[(
            "src/app.jsx",
            "import React from 'react';\nexport const App = () => <div/>;\n",
        )],
    );

    let settings = settings_for(dir.path());
    let results = Analyzer::new(settings.clone()).analyze().unwrap();
    assert_eq!(results.unused_dependencies.len(), 1);

    let outcome = Fixer::new(settings).apply(&results, dir.path());

    assert!(outcome.success);
    assert_eq!(outcome.dependencies_removed, vec!["left-pad".to_string()]);

    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(!manifest.contains("left-pad"));
    assert!(manifest.contains("\"react\""));
    assert!(manifest.contains("\"scripts\""));
    assert!(manifest.ends_with('\n'));

    // Key order is preserved across the rewrite.
    let name_idx = manifest.find("\"name\"").unwrap();
    let deps_idx = manifest.find("\"dependencies\"").unwrap();
    let scripts_idx = manifest.find("\"scripts\"").unwrap();
    assert!(name_idx < deps_idx && deps_idx < scripts_idx);
}

#[test]
fn test_rollback_restores_pre_fix_contents() {
    let file_a = "import gone from 'gone';\nexport const a = 1;\n";
    let file_b = "import also from 'also';\nexport const b = 2;\n";
    let dir = create_project(
        r#"{"name": "fixture"}"#,
        &[("src/a.js", file_a), ("src/b.js", file_b)],
    );

    let mut settings = settings_for(dir.path());
    settings.verify = true;

    let results = Analyzer::new(settings.clone()).analyze().unwrap();
    assert_eq!(results.unused_imports.len(), 2);

    let mut fixer = Fixer::with_runner(settings, Box::new(StubRunner { passes: false }));
    let outcome = fixer.apply(&results, dir.path());

    assert!(!outcome.success);
    assert!(outcome.rolled_back);
    assert_eq!(outcome.modified_files.len(), 2);
    assert!(outcome
        .errors
        .iter()
        .any(|e| e == "tests failed after cleanup"));
    assert_eq!(fixer.state(), FixState::RolledBack);

    // Both files are byte-identical to their pre-fix contents.
    assert_eq!(fs::read_to_string(dir.path().join("src/a.js")).unwrap(), file_a);
    assert_eq!(fs::read_to_string(dir.path().join("src/b.js")).unwrap(), file_b);
}

#[test]
fn test_passing_verification_commits() {
    let dir = create_project(
        r#"{"name": "fixture"}"#,
        &[("src/a.js", "import gone from 'gone';\nexport const a = 1;\n")],
    );

    let mut settings = settings_for(dir.path());
    settings.verify = true;

    let results = Analyzer::new(settings.clone()).analyze().unwrap();
    let mut fixer = Fixer::with_runner(settings, Box::new(StubRunner { passes: true }));
    let outcome = fixer.apply(&results, dir.path());

    assert!(outcome.success);
    assert!(!outcome.rolled_back);
    assert_eq!(fixer.state(), FixState::Committed);
    assert_eq!(
        fs::read_to_string(dir.path().join("src/a.js")).unwrap(),
        "export const a = 1;\n"
    );
}

#[test]
fn test_partial_failure_is_reported_not_fatal() {
    // A finding pointing at a line that cannot be edited (multi-line import)
    // is recorded as an error string while other files are still fixed.
    let dir = create_project(
        r#"{"name": "fixture"}"#,
        &[
            (
                "src/multi.js",
                "import {\n  alpha,\n  beta\n} from 'pkg';\nexport const keep = beta;\n",
            ),
            ("src/simple.js", "import gone from 'gone';\nexport const s = 1;\n"),
        ],
    );

    let settings = settings_for(dir.path());
    let results = Analyzer::new(settings.clone()).analyze().unwrap();

    // `alpha` (multi-line declaration) and `gone` are both unused.
    assert_eq!(results.unused_imports.len(), 2);

    let outcome = Fixer::new(settings).apply(&results, dir.path());

    assert!(outcome.success);
    assert_eq!(outcome.imports_removed, 1);
    assert_eq!(outcome.modified_files.len(), 1);
    assert!(outcome.errors.iter().any(|e| e.contains("could not edit")));

    // The multi-line import is left untouched.
    let untouched = fs::read_to_string(dir.path().join("src/multi.js")).unwrap();
    assert!(untouched.contains("alpha"));
}
