//! Line-oriented edits for removing import bindings
//!
//! Edits are planned per line and applied as an explicit ordered list by
//! descending line number. Removing a line shifts every subsequent line
//! number, so later lines must mutate first; `apply_edits` sorts internally
//! to enforce that invariant mechanically rather than relying on callers.

/// What to do with one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEditKind {
    /// Delete the whole line (the import statement would become empty)
    RemoveLine,
    /// Replace the line with a rewritten import clause
    ReplaceLine(String),
}

/// One planned edit, keyed by 1-based line number
#[derive(Debug, Clone)]
pub struct LineEdit {
    pub line: usize,
    pub kind: LineEditKind,
}

/// Result of planning the removal of one line's unused bindings
#[derive(Debug)]
pub struct LinePlan {
    /// The edit to apply, present when at least one binding was removed
    pub edit: Option<LineEditKind>,
    /// Number of bindings the edit removes
    pub removed: usize,
    /// Local names that could not be matched on this line (e.g. an import
    /// spread over several lines); the caller records these as non-fatal
    /// errors
    pub failed: Vec<String>,
}

/// Decide how to remove a line's unused import bindings.
///
/// All bindings slated for removal on one line must be planned together:
/// the line either disappears entirely (the statement would become empty)
/// or is replaced by a single rewritten clause.
pub fn plan_import_removal(line_text: &str, local_names: &[&str]) -> LinePlan {
    let mut plan = LinePlan {
        edit: None,
        removed: 0,
        failed: Vec::new(),
    };

    let mut import = match ImportLine::parse(line_text) {
        Some(import) => import,
        None => {
            plan.failed = local_names.iter().map(|s| s.to_string()).collect();
            return plan;
        }
    };

    for name in local_names {
        if import.remove_binding(name) {
            plan.removed += 1;
        } else {
            plan.failed.push(name.to_string());
        }
    }

    if plan.removed > 0 {
        plan.edit = Some(if import.is_empty() {
            LineEditKind::RemoveLine
        } else {
            LineEditKind::ReplaceLine(import.render())
        });
    }

    plan
}

/// Apply a batch of edits to file content, later lines first.
///
/// Returns the new content and the number of edits actually applied.
pub fn apply_edits(content: &str, mut edits: Vec<LineEdit>) -> (String, usize) {
    edits.sort_by(|a, b| b.line.cmp(&a.line));

    let had_trailing_newline = content.ends_with('\n');
    let mut lines: Vec<String> = content.lines().map(String::from).collect();
    let mut applied = 0;

    for edit in &edits {
        if edit.line == 0 || edit.line > lines.len() {
            continue;
        }
        match &edit.kind {
            LineEditKind::RemoveLine => {
                lines.remove(edit.line - 1);
            }
            LineEditKind::ReplaceLine(replacement) => {
                lines[edit.line - 1] = replacement.clone();
            }
        }
        applied += 1;
    }

    let mut output = lines.join("\n");
    if had_trailing_newline && !output.is_empty() {
        output.push('\n');
    }

    (output, applied)
}

/// Structural view of a single-line import declaration
struct ImportLine {
    indent: String,
    type_only: bool,
    default: Option<String>,
    namespace: Option<String>,
    /// Raw named specifiers, e.g. `"x"`, `"orig as alias"`, `"type T"`
    named: Vec<String>,
    /// The `from '...'` part onwards, verbatim
    tail: String,
}

impl ImportLine {
    fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        let indent = line[..line.len() - trimmed.len()].to_string();

        let body = trimmed.strip_prefix("import")?;
        if !(body.starts_with(char::is_whitespace) || body.starts_with('{') || body.starts_with('*'))
        {
            return None;
        }

        let mut body = body.trim_start();
        let type_only = match body.strip_prefix("type") {
            Some(rest) if rest.starts_with(char::is_whitespace) => {
                body = rest.trim_start();
                true
            }
            _ => false,
        };

        // The specifier string starts at the first quote; `from` must sit
        // before it. Side-effect imports have no bindings and no findings.
        let quote_idx = body.find(['\'', '"'])?;
        let from_idx = body[..quote_idx].rfind("from")?;
        let clause = body[..from_idx].trim_end();
        let tail = body[from_idx..].to_string();

        // An empty clause means a side-effect import; those carry no
        // bindings and never produce findings.
        if clause.is_empty() {
            return None;
        }

        let mut default = None;
        let mut namespace = None;
        let mut named = Vec::new();

        let outside = if let Some(brace_start) = clause.find('{') {
            let brace_end = clause.find('}')?;
            if brace_end < brace_start {
                return None;
            }
            for spec in clause[brace_start + 1..brace_end].split(',') {
                let spec = spec.trim();
                if !spec.is_empty() {
                    named.push(spec.to_string());
                }
            }
            format!("{}{}", &clause[..brace_start], &clause[brace_end + 1..])
        } else {
            clause.to_string()
        };

        for segment in outside.split(',') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            if let Some(rest) = segment.strip_prefix('*') {
                let ns = rest.trim().strip_prefix("as")?.trim();
                if ns.is_empty() {
                    return None;
                }
                namespace = Some(ns.to_string());
            } else {
                default = Some(segment.to_string());
            }
        }

        Some(Self {
            indent,
            type_only,
            default,
            namespace,
            named,
            tail,
        })
    }

    /// Local bound name of a named specifier (`orig as alias` binds `alias`)
    fn local_of(spec: &str) -> &str {
        let spec = spec.strip_prefix("type ").unwrap_or(spec).trim();
        match spec.rsplit_once(" as ") {
            Some((_, alias)) => alias.trim(),
            None => spec,
        }
    }

    fn remove_binding(&mut self, local_name: &str) -> bool {
        if self.default.as_deref() == Some(local_name) {
            self.default = None;
            return true;
        }
        if self.namespace.as_deref() == Some(local_name) {
            self.namespace = None;
            return true;
        }
        if let Some(idx) = self.named.iter().position(|s| Self::local_of(s) == local_name) {
            self.named.remove(idx);
            return true;
        }
        false
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.namespace.is_none() && self.named.is_empty()
    }

    /// Reassemble the line; rebuilding from parts makes comma artifacts
    /// (dangling or doubled commas, empty brace lists) impossible.
    fn render(&self) -> String {
        let mut parts = Vec::new();
        if let Some(default) = &self.default {
            parts.push(default.clone());
        }
        if let Some(namespace) = &self.namespace {
            parts.push(format!("* as {}", namespace));
        }
        if !self.named.is_empty() {
            parts.push(format!("{{ {} }}", self.named.join(", ")));
        }

        let type_prefix = if self.type_only { "type " } else { "" };
        format!(
            "{}import {}{} {}",
            self.indent,
            type_prefix,
            parts.join(", "),
            self.tail
        )
    }
}
