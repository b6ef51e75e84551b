//! Cyclomatic complexity measurement
//!
//! A plain branch-node counting pass: every function starts at 1 and each
//! decision point adds 1. No data-flow, no nesting weights.

use crate::parsers::ast_parser::LineIndex;
use oxc_ast::ast::*;
use oxc_ast_visit::{walk, Visit};
use oxc_syntax::scope::ScopeFlags;

/// Measured complexity of one function
#[derive(Debug, Clone)]
pub struct FunctionComplexity {
    pub name: String,
    /// 1-based line of the function
    pub line: usize,
    pub complexity: usize,
}

/// Measure every function in a parsed program
pub fn measure(program: &Program<'_>, source_text: &str) -> Vec<FunctionComplexity> {
    let mut visitor = ComplexityVisitor {
        lines: LineIndex::new(source_text),
        stack: Vec::new(),
        measured: Vec::new(),
    };
    visitor.visit_program(program);
    visitor.measured
}

struct Frame {
    name: String,
    line: usize,
    complexity: usize,
}

struct ComplexityVisitor {
    lines: LineIndex,
    stack: Vec<Frame>,
    measured: Vec<FunctionComplexity>,
}

impl ComplexityVisitor {
    fn enter(&mut self, name: String, offset: u32) {
        let (line, _) = self.lines.position(offset);
        self.stack.push(Frame {
            name,
            line,
            complexity: 1,
        });
    }

    fn leave(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.measured.push(FunctionComplexity {
                name: frame.name,
                line: frame.line,
                complexity: frame.complexity,
            });
        }
    }

    fn branch(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.complexity += 1;
        }
    }
}

impl<'a> Visit<'a> for ComplexityVisitor {
    fn visit_function(&mut self, func: &Function<'a>, flags: ScopeFlags) {
        let name = func
            .id
            .as_ref()
            .map(|id| id.name.to_string())
            .unwrap_or_else(|| "<anonymous>".to_string());
        self.enter(name, func.span.start);
        walk::walk_function(self, func, flags);
        self.leave();
    }

    fn visit_arrow_function_expression(&mut self, func: &ArrowFunctionExpression<'a>) {
        self.enter("<arrow>".to_string(), func.span.start);
        walk::walk_arrow_function_expression(self, func);
        self.leave();
    }

    fn visit_if_statement(&mut self, stmt: &IfStatement<'a>) {
        self.branch();
        walk::walk_if_statement(self, stmt);
    }

    fn visit_for_statement(&mut self, stmt: &ForStatement<'a>) {
        self.branch();
        walk::walk_for_statement(self, stmt);
    }

    fn visit_for_in_statement(&mut self, stmt: &ForInStatement<'a>) {
        self.branch();
        walk::walk_for_in_statement(self, stmt);
    }

    fn visit_for_of_statement(&mut self, stmt: &ForOfStatement<'a>) {
        self.branch();
        walk::walk_for_of_statement(self, stmt);
    }

    fn visit_while_statement(&mut self, stmt: &WhileStatement<'a>) {
        self.branch();
        walk::walk_while_statement(self, stmt);
    }

    fn visit_do_while_statement(&mut self, stmt: &DoWhileStatement<'a>) {
        self.branch();
        walk::walk_do_while_statement(self, stmt);
    }

    fn visit_switch_case(&mut self, case: &SwitchCase<'a>) {
        // The default case is not a decision point.
        if case.test.is_some() {
            self.branch();
        }
        walk::walk_switch_case(self, case);
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause<'a>) {
        self.branch();
        walk::walk_catch_clause(self, clause);
    }

    fn visit_conditional_expression(&mut self, expr: &ConditionalExpression<'a>) {
        self.branch();
        walk::walk_conditional_expression(self, expr);
    }

    fn visit_logical_expression(&mut self, expr: &LogicalExpression<'a>) {
        self.branch();
        walk::walk_logical_expression(self, expr);
    }
}
