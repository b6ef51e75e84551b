//! Unused-import detection over per-file symbol models

use crate::detectors::IMPORT_CONFIDENCE;
use crate::models::findings::UnusedImportFinding;
use crate::models::symbol_model::SymbolModel;
use std::path::Path;

/// Local name bound by the automatic JSX runtime convention. A file that
/// contains JSX needs this binding even when no identifier references it.
pub const JSX_RUNTIME_BINDING: &str = "React";

/// Resolver for unused import bindings
pub struct UnusedImportDetector;

impl UnusedImportDetector {
    /// Resolve every import binding in a file's model, in declaration order.
    ///
    /// Precedence per binding:
    /// 1. direct identifier match
    /// 2. JSX runtime exception
    /// 3. namespace member-access exception
    /// 4. otherwise: unused
    pub fn detect(file: &Path, model: &SymbolModel) -> Vec<UnusedImportFinding> {
        model
            .imports
            .iter()
            .filter(|import| !Self::is_used(import.is_namespace, &import.local_name, model))
            .map(|import| UnusedImportFinding {
                file: file.to_path_buf(),
                line: import.line,
                column: import.column,
                import_name: import.local_name.clone(),
                source: import.source.clone(),
                confidence: IMPORT_CONFIDENCE,
            })
            .collect()
    }

    fn is_used(is_namespace: bool, local_name: &str, model: &SymbolModel) -> bool {
        if model.is_used(local_name) {
            return true;
        }

        if local_name == JSX_RUNTIME_BINDING && model.has_jsx {
            return true;
        }

        if is_namespace {
            let member_prefix = format!("{}.", local_name);
            if model
                .used_identifiers
                .iter()
                .any(|id| id.starts_with(&member_prefix))
            {
                return true;
            }
        }

        false
    }
}
