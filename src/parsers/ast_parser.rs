//! AST parser wrapper using OXC

use crate::core::complexity::{self, FunctionComplexity};
use crate::error::{DeadwoodError, Result};
use crate::models::symbol_model::SymbolModel;
use crate::parsers::symbol_extractor;
use oxc_allocator::Allocator;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{ParseOptions, Parser, ParserReturn};
use oxc_span::SourceType;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

/// Thread-safe allocator pool for reuse across parses
pub struct AllocatorPool {
    allocators: Arc<Mutex<Vec<Allocator>>>,
}

impl AllocatorPool {
    /// Create a new allocator pool
    pub fn new(size: usize) -> Self {
        let mut allocators = Vec::with_capacity(size);
        for _ in 0..size {
            allocators.push(Allocator::default());
        }
        Self {
            allocators: Arc::new(Mutex::new(allocators)),
        }
    }

    /// Take an allocator from the pool
    pub fn take(&self) -> Option<Allocator> {
        self.allocators.lock().pop()
    }

    /// Return an allocator to the pool
    pub fn return_allocator(&self, allocator: Allocator) {
        self.allocators.lock().push(allocator);
    }
}

/// Extracted per-file analysis data that doesn't depend on AST lifetimes
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub symbols: SymbolModel,
    pub functions: Vec<FunctionComplexity>,
}

/// Source parser using OXC
pub struct SourceParser {
    parse_options: ParseOptions,
    allocator_pool: AllocatorPool,
}

impl SourceParser {
    /// Create a new source parser
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions {
                parse_regular_expression: true,
                ..ParseOptions::default()
            },
            allocator_pool: AllocatorPool::new(num_cpus::get()),
        }
    }

    /// Parse a source file and extract needed data immediately
    ///
    /// The symbol model and complexity measurements are produced while the
    /// allocator is alive; nothing borrowed from the AST escapes this call.
    ///
    /// Parsing is attempted as an ES module first; files that fail module
    /// parsing get one retry as a classic script. Files failing both
    /// attempts produce a `Parse` error the caller treats as "skip this
    /// file", never as fatal.
    pub fn parse_and_extract(
        &self,
        source_text: &str,
        path: &Path,
        measure_complexity: bool,
    ) -> Result<FileAnalysis> {
        let source_type = source_type_for(path);

        // Get or create an allocator
        let allocator = self
            .allocator_pool
            .take()
            .unwrap_or_else(Allocator::default);

        let analysis = self.parse_with(&allocator, source_text, path, source_type, measure_complexity);

        // Return allocator to pool for reuse
        self.allocator_pool.return_allocator(allocator);

        analysis
    }

    fn parse_with(
        &self,
        allocator: &Allocator,
        source_text: &str,
        path: &Path,
        source_type: SourceType,
        measure_complexity: bool,
    ) -> Result<FileAnalysis> {
        let mut ret = self.run_parser(allocator, source_text, source_type.with_module(true));

        if Self::failed(&ret) {
            // Retry once as a classic script; pure-script files without any
            // module syntax are still analyzable.
            ret = self.run_parser(allocator, source_text, source_type.with_script(true));
        }

        if Self::failed(&ret) {
            return Err(DeadwoodError::parse_failure(
                path,
                Self::first_error_message(&ret.errors),
            ));
        }

        let symbols = symbol_extractor::extract(&ret.program, source_text);
        let functions = if measure_complexity {
            complexity::measure(&ret.program, source_text)
        } else {
            Vec::new()
        };

        Ok(FileAnalysis { symbols, functions })
    }

    fn run_parser<'a>(
        &self,
        allocator: &'a Allocator,
        source_text: &'a str,
        source_type: SourceType,
    ) -> ParserReturn<'a> {
        Parser::new(allocator, source_text, source_type)
            .with_options(self.parse_options.clone())
            .parse()
    }

    fn failed(ret: &ParserReturn<'_>) -> bool {
        ret.panicked || !ret.errors.is_empty()
    }

    fn first_error_message(errors: &[OxcDiagnostic]) -> String {
        errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown syntax error".to_string())
    }
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Select the grammar for a file from its extension.
///
/// TypeScript variants get the typed grammar, `jsx`/`tsx` get JSX; the
/// module/script ambiguity is resolved by the two-pass parse, not here.
fn source_type_for(path: &Path) -> SourceType {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    match extension {
        "ts" | "mts" | "cts" => SourceType::mjs().with_typescript(true),
        "tsx" => SourceType::mjs().with_typescript(true).with_jsx(true),
        "jsx" => SourceType::mjs().with_jsx(true),
        "cjs" => SourceType::cjs(),
        _ => SourceType::mjs(),
    }
}

/// Byte-offset to line/column mapping for one source text
#[derive(Debug)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source_text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (offset, byte) in source_text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset as u32 + 1);
            }
        }
        Self { line_starts }
    }

    /// Map a byte offset to a 1-based (line, column) pair
    pub fn position(&self, offset: u32) -> (usize, usize) {
        let line_idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let column = offset.saturating_sub(self.line_starts[line_idx]) as usize + 1;
        (line_idx + 1, column)
    }
}
