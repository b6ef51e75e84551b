use deadwood::core::Analyzer;
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

const EMPTY_MANIFEST: &str = r#"{"name": "fixture", "version": "1.0.0"}"#;

#[test]
fn test_detection_is_idempotent() {
    let dir = create_project(
        EMPTY_MANIFEST,
        &[
            (
                "src/a.js",
                "import one from 'one';\nimport two from 'two';\ntwo();\n",
            ),
            ("src/b.js", "import three from 'three';\n"),
        ],
    );

    let settings = settings_for(dir.path());
    let first = Analyzer::new(settings.clone()).analyze().unwrap();
    let second = Analyzer::new(settings).analyze().unwrap();

    assert_eq!(first.unused_imports.len(), second.unused_imports.len());
    for (lhs, rhs) in first.unused_imports.iter().zip(second.unused_imports.iter()) {
        assert_eq!(lhs.file, rhs.file);
        assert_eq!(lhs.line, rhs.line);
        assert_eq!(lhs.import_name, rhs.import_name);
    }
}

#[test]
fn test_jsx_exception_shields_react_import() {
    let dir = create_project(
        EMPTY_MANIFEST,
        &[(
            "src/app.jsx",
            "import React from 'react';\nexport const App = () => <div>hello</div>;\n",
        )],
    );

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();

    assert!(
        results.unused_imports.is_empty(),
        "React must not be flagged in a file containing JSX"
    );
}

#[test]
fn test_react_import_without_jsx_is_flagged() {
    let dir = create_project(
        EMPTY_MANIFEST,
        &[("src/util.js", "import React from 'react';\nexport const n = 1;\n")],
    );

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();

    assert_eq!(results.unused_imports.len(), 1);
    assert_eq!(results.unused_imports[0].import_name, "React");
}

#[test]
fn test_namespace_exception_both_directions() {
    let dir = create_project(
        EMPTY_MANIFEST,
        &[
            (
                "src/used.js",
                "import * as utils from './utils';\nexport const out = utils.format(1);\n",
            ),
            (
                "src/unused.js",
                "import * as helpers from './helpers';\nexport const out = 2;\n",
            ),
            ("src/utils.js", "export function format(x) { return x; }\n"),
            ("src/helpers.js", "export function noop() {}\n"),
        ],
    );

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();

    let names: Vec<&str> = results
        .unused_imports
        .iter()
        .map(|f| f.import_name.as_str())
        .collect();
    assert_eq!(names, vec!["helpers"]);
}

#[test]
fn test_scoped_sub_package_confirms_meta_package() {
    let dir = create_project(
        r#"{"name": "fixture", "dependencies": {"@babel/core": "^7.0.0"}}"#,
        &[(
            "src/build.js",
            "import { parse } from '@babel/parser';\nexport const ast = parse('1');\n",
        )],
    );

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();

    assert!(
        results.unused_dependencies.is_empty(),
        "a sibling @babel package confirms @babel/core"
    );
}

#[test]
fn test_known_tool_dev_dependency_never_flagged() {
    let dir = create_project(
        r#"{"name": "fixture", "devDependencies": {"eslint": "^9.0.0", "some-helper": "^1.0.0"}}"#,
        &[("src/index.js", "export const x = 1;\n")],
    );

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();

    let names: Vec<&str> = results
        .unused_dependencies
        .iter()
        .map(|f| f.package_name.as_str())
        .collect();
    assert_eq!(names, vec!["some-helper"]);
}

#[test]
fn test_require_and_dynamic_import_count_as_usage() {
    let dir = create_project(
        r#"{"name": "fixture", "dependencies": {"fs-extra": "^11.0.0", "chalk": "^5.0.0"}}"#,
        &[(
            "src/tool.cjs",
            "const fse = require('fs-extra');\nasync function color() { return import('chalk'); }\nmodule.exports = { fse, color };\n",
        )],
    );

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();

    assert!(results.unused_dependencies.is_empty());
}

#[test]
fn test_root_config_files_feed_dependency_usage() {
    let dir = create_project(
        r#"{"name": "fixture", "dependencies": {"fancy-loader": "^2.0.0"}}"#,
        &[
            ("src/index.js", "export const x = 1;\n"),
            (
                "webpack.config.js",
                "module.exports = { loader: require('fancy-loader') };\n",
            ),
        ],
    );

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();

    assert!(
        results.unused_dependencies.is_empty(),
        "a reference in a root config file counts as usage"
    );
}

#[test]
fn test_findings_report_positions_and_order() {
    let dir = create_project(
        EMPTY_MANIFEST,
        &[(
            "src/many.js",
            "import a from 'a';\nconst local = 1;\nimport b from 'b';\nexport default local;\n",
        )],
    );

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();

    assert_eq!(results.unused_imports.len(), 2);
    assert_eq!(results.unused_imports[0].import_name, "a");
    assert_eq!(results.unused_imports[0].line, 1);
    assert_eq!(results.unused_imports[1].import_name, "b");
    assert_eq!(results.unused_imports[1].line, 3);
}

#[test]
fn test_complexity_threshold_filters_functions() {
    let busy = r#"
export function busy(x) {
  if (x === 1) return 1;
  if (x === 2) return 2;
  if (x === 3) return 3;
  return 0;
}
export function calm() { return 1; }
"#;
    let dir = create_project(EMPTY_MANIFEST, &[("src/math.js", busy)]);

    let mut settings = settings_for(dir.path());
    settings.complexity_threshold = 3;

    let results = Analyzer::new(settings).analyze().unwrap();

    assert_eq!(results.complexity.len(), 1);
    assert_eq!(results.complexity[0].function_name, "busy");
    assert_eq!(results.complexity[0].complexity, 4);
}
