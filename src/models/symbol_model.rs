//! Per-file symbol model produced by the extractor
//!
//! One `SymbolModel` is built per parsed source file and discarded once the
//! detectors have consumed it. No state is kept across files or runs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single import binding introduced by an `import` declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBinding {
    /// Local bound name (post-rename for aliased imports)
    pub local_name: String,
    /// Source specifier (e.g. "./utils" or "lodash")
    pub source: String,
    /// 1-based line of the import declaration
    pub line: usize,
    /// 1-based column of the import declaration
    pub column: usize,
    /// Whether this is the default specifier
    pub is_default: bool,
    /// Whether this is a namespace (`* as name`) specifier
    pub is_namespace: bool,
}

/// Usage model for a single source file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolModel {
    /// Import bindings in declaration order, one entry per specifier
    pub imports: Vec<ImportBinding>,

    /// Identifier names referenced anywhere in the file body.
    ///
    /// Import-specifier binding positions and non-computed object keys are
    /// excluded. Static member accesses additionally contribute a compound
    /// `"object.property"` entry.
    pub used_identifiers: HashSet<String>,

    /// Names exported from this file; a default export registers `"default"`
    pub exported_names: HashSet<String>,

    /// Whether any JSX element or fragment appears in the file
    pub has_jsx: bool,
}

impl SymbolModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an identifier (or compound member path) is referenced
    pub fn is_used(&self, name: &str) -> bool {
        self.used_identifiers.contains(name)
    }
}
