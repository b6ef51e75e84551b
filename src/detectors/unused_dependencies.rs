//! Unused-dependency detection via lightweight reference scanning
//!
//! The scanner is textual on purpose: it targets exactly three literal
//! syntactic forms (import-from, require call, dynamic import) and nothing
//! else. It can both over-match (specifiers in strings that merely look
//! like imports) and under-match (computed specifiers) relative to true
//! static analysis; it is a heuristic layer kept separate from the
//! AST-based resolver, not a parsing substitute.

use crate::detectors::{DEPENDENCY_CONFIDENCE, DEV_DEPENDENCY_CONFIDENCE};
use crate::models::findings::{DependencyKind, UnusedDependencyFinding};
use crate::parsers::package_json::Manifest;
use regex::Regex;
use std::collections::HashSet;

/// Package names observed referenced anywhere in the scanned file set.
/// Built once per run, read-only afterwards.
pub type ManifestUsageSet = HashSet<String>;

/// Tool-name prefixes that are exempt from the devDependency usage test.
/// Build, test and lint tools are typically invoked through configuration
/// or a CLI rather than imported from source.
pub const KNOWN_TOOL_PREFIXES: &[&str] = &[
    "@types/",
    "@typescript-eslint/",
    "autoprefixer",
    "babel",
    "c8",
    "concurrently",
    "cross-env",
    "eslint",
    "husky",
    "jest",
    "lint-staged",
    "mocha",
    "nodemon",
    "npm-run-all",
    "nyc",
    "postcss",
    "prettier",
    "rimraf",
    "rollup",
    "tailwind",
    "ts-jest",
    "ts-node",
    "tsx",
    "typescript",
    "vite",
    "vitest",
    "webpack",
];

/// Three-pattern scanner for module specifiers in raw source text
pub struct UsageScanner {
    static_import: Regex,
    require_call: Regex,
    dynamic_import: Regex,
}

impl UsageScanner {
    pub fn new() -> Self {
        Self {
            // import defaultExport from 'x'; import { a } from 'x'; import 'x';
            static_import: Regex::new(r#"import\s+(?:[\w$*{},\s]+\s+from\s+)?["']([^"']+)["']"#)
                .expect("hard-coded pattern"),
            // require('x'), require ( "x" )
            require_call: Regex::new(r#"require\s*\(\s*["']([^"']+)["']\s*\)"#)
                .expect("hard-coded pattern"),
            // import('x')
            dynamic_import: Regex::new(r#"import\s*\(\s*["']([^"']+)["']\s*\)"#)
                .expect("hard-coded pattern"),
        }
    }

    /// Scan one file's text, adding every referenced package name to `used`
    pub fn scan(&self, text: &str, used: &mut ManifestUsageSet) {
        for regex in [&self.static_import, &self.require_call, &self.dynamic_import] {
            for capture in regex.captures_iter(text) {
                if let Some(specifier) = capture.get(1) {
                    if let Some(package) = specifier_to_package(specifier.as_str()) {
                        used.insert(package);
                    }
                }
            }
        }
    }
}

impl Default for UsageScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduce a module specifier to the package name it refers to.
///
/// Relative and absolute specifiers contribute nothing. A scoped specifier
/// contributes `@scope/<first-segment>`; a plain specifier contributes its
/// first path segment (so sub-path imports confirm the whole package).
pub fn specifier_to_package(specifier: &str) -> Option<String> {
    if specifier.is_empty() || specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }

    if let Some(scoped) = specifier.strip_prefix('@') {
        let mut segments = scoped.split('/');
        let scope = segments.next().filter(|s| !s.is_empty())?;
        let name = segments.next().filter(|s| !s.is_empty())?;
        return Some(format!("@{}/{}", scope, name));
    }

    specifier
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Resolver for dependencies declared in the manifest but never referenced
pub struct UnusedDependencyDetector;

impl UnusedDependencyDetector {
    /// Diff the manifest's declared dependency sets against the usage set
    pub fn detect(manifest: &Manifest, used: &ManifestUsageSet) -> Vec<UnusedDependencyFinding> {
        let mut findings = Vec::new();

        for entry in manifest.entries(DependencyKind::Dependency) {
            if !Self::is_used(&entry.name, used) {
                findings.push(UnusedDependencyFinding {
                    package_name: entry.name,
                    declared_version: entry.version_spec,
                    dependency_kind: DependencyKind::Dependency,
                    confidence: DEPENDENCY_CONFIDENCE,
                    reason: "no import, require or dynamic import references this package"
                        .to_string(),
                });
            }
        }

        for entry in manifest.entries(DependencyKind::DevDependency) {
            if Self::is_known_tool(&entry.name) {
                continue;
            }
            if !Self::is_used(&entry.name, used) {
                findings.push(UnusedDependencyFinding {
                    package_name: entry.name,
                    declared_version: entry.version_spec,
                    dependency_kind: DependencyKind::DevDependency,
                    confidence: DEV_DEPENDENCY_CONFIDENCE,
                    reason: "no reference found; dev tooling may still be used via scripts or configuration"
                        .to_string(),
                });
            }
        }

        findings
    }

    /// A declared package counts as used on direct membership, or - for
    /// scoped packages - when any used package shares its scope (sub-package
    /// imports of a meta-package are common).
    fn is_used(name: &str, used: &ManifestUsageSet) -> bool {
        if used.contains(name) {
            return true;
        }

        if let Some(scope_end) = name.strip_prefix('@').and_then(|rest| rest.find('/')) {
            let scope_prefix = &name[..scope_end + 2];
            return used.iter().any(|u| u.starts_with(scope_prefix));
        }

        false
    }

    fn is_known_tool(name: &str) -> bool {
        KNOWN_TOOL_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn manifest(content: &str) -> Manifest {
        Manifest::parse(content, PathBuf::from("package.json")).unwrap()
    }

    #[test]
    fn test_specifier_reduction() {
        assert_eq!(specifier_to_package("lodash"), Some("lodash".to_string()));
        assert_eq!(
            specifier_to_package("lodash/debounce"),
            Some("lodash".to_string())
        );
        assert_eq!(
            specifier_to_package("@babel/parser"),
            Some("@babel/parser".to_string())
        );
        assert_eq!(
            specifier_to_package("@scope/pkg/deep/path"),
            Some("@scope/pkg".to_string())
        );
        assert_eq!(specifier_to_package("./local"), None);
        assert_eq!(specifier_to_package("../up"), None);
        assert_eq!(specifier_to_package("/abs"), None);
        assert_eq!(specifier_to_package("@broken"), None);
    }

    #[test]
    fn test_scanner_matches_the_three_forms() {
        let scanner = UsageScanner::new();
        let mut used = ManifestUsageSet::new();

        scanner.scan(
            r#"
            import React from 'react';
            import { debounce } from "lodash";
            import './side-effect.css';
            const fs = require('fs-extra');
            const lazy = await import('chalk');
            "#,
            &mut used,
        );

        assert!(used.contains("react"));
        assert!(used.contains("lodash"));
        assert!(used.contains("fs-extra"));
        assert!(used.contains("chalk"));
        // Relative specifiers contribute nothing.
        assert_eq!(used.len(), 4);
    }

    #[test]
    fn test_scanner_ignores_non_literal_specifiers() {
        let scanner = UsageScanner::new();
        let mut used = ManifestUsageSet::new();

        scanner.scan("const mod = require(dynamicName);\n", &mut used);

        assert!(used.is_empty());
    }

    #[test]
    fn test_unreferenced_dependency_flagged() {
        let m = manifest(r#"{"dependencies": {"left-pad": "^1.3.0", "react": "^18.0.0"}}"#);
        let used: ManifestUsageSet = ["react".to_string()].into_iter().collect();

        let findings = UnusedDependencyDetector::detect(&m, &used);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].package_name, "left-pad");
        assert_eq!(findings[0].dependency_kind, DependencyKind::Dependency);
        assert_eq!(findings[0].confidence, DEPENDENCY_CONFIDENCE);
    }

    #[test]
    fn test_dev_dependency_has_lower_confidence() {
        let m = manifest(r#"{"devDependencies": {"some-helper": "^2.0.0"}}"#);
        let used = ManifestUsageSet::new();

        let findings = UnusedDependencyDetector::detect(&m, &used);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].dependency_kind, DependencyKind::DevDependency);
        assert!(findings[0].confidence < DEPENDENCY_CONFIDENCE);
    }

    #[test]
    fn test_scoped_sibling_confirms_meta_package() {
        let m = manifest(r#"{"dependencies": {"@babel/core": "^7.0.0"}}"#);
        let used: ManifestUsageSet = ["@babel/parser".to_string()].into_iter().collect();

        let findings = UnusedDependencyDetector::detect(&m, &used);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_unrelated_scope_does_not_confirm() {
        let m = manifest(r#"{"dependencies": {"@babel/core": "^7.0.0"}}"#);
        let used: ManifestUsageSet = ["@vue/compiler".to_string()].into_iter().collect();

        let findings = UnusedDependencyDetector::detect(&m, &used);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_known_tools_never_flagged() {
        let m = manifest(
            r#"{"devDependencies": {"eslint": "^9.0.0", "eslint-config-airbnb": "^19.0.0", "prettier": "^3.0.0", "@types/node": "^20.0.0"}}"#,
        );
        let used = ManifestUsageSet::new();

        let findings = UnusedDependencyDetector::detect(&m, &used);
        assert!(findings.is_empty());
    }
}
