//! Symbol model extraction via a single AST traversal
//!
//! The collector deliberately over-approximates usage: identifier references
//! AND local binding positions both count as "used", so a binding that is
//! only ever declared still shields its import from being flagged. The only
//! exclusions are import-specifier bindings themselves and non-computed
//! property keys (which are `IdentifierName` nodes, a different node kind
//! from references and bindings, and are simply never collected).

use crate::models::symbol_model::{ImportBinding, SymbolModel};
use crate::parsers::ast_parser::LineIndex;
use oxc_ast::ast::*;
use oxc_ast_visit::{walk, Visit};

/// Build the symbol model for one parsed program
pub fn extract(program: &Program<'_>, source_text: &str) -> SymbolModel {
    let mut collector = SymbolCollector {
        model: SymbolModel::new(),
        lines: LineIndex::new(source_text),
    };
    collector.visit_program(program);
    collector.model
}

struct SymbolCollector {
    model: SymbolModel,
    lines: LineIndex,
}

impl<'a> Visit<'a> for SymbolCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let source = decl.source.value.as_str();
        if source.is_empty() {
            // Entries with unresolved specifiers are dropped, never emitted
            // with empty names.
            return;
        }

        let (line, column) = self.lines.position(decl.span.start);

        if let Some(specifiers) = &decl.specifiers {
            for specifier in specifiers {
                let (local_name, is_default, is_namespace) = match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(spec) => {
                        (spec.local.name.as_str(), false, false)
                    }
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
                        (spec.local.name.as_str(), true, false)
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
                        (spec.local.name.as_str(), false, true)
                    }
                };

                if local_name.is_empty() {
                    continue;
                }

                self.model.imports.push(ImportBinding {
                    local_name: local_name.to_string(),
                    source: source.to_string(),
                    line,
                    column,
                    is_default,
                    is_namespace,
                });
            }
        }

        // Do not walk children: the binding position of an import specifier
        // is not an identifier use.
    }

    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        self.model.used_identifiers.insert(ident.name.to_string());
    }

    fn visit_binding_identifier(&mut self, ident: &BindingIdentifier<'a>) {
        // Local declarations count as uses (conservative: prefer false
        // negatives over false positives).
        self.model.used_identifiers.insert(ident.name.to_string());
    }

    fn visit_static_member_expression(&mut self, expr: &StaticMemberExpression<'a>) {
        // Record `ns.member` as a compound entry so namespace imports can be
        // confirmed by property access.
        if let Expression::Identifier(object) = &expr.object {
            self.model
                .used_identifiers
                .insert(format!("{}.{}", object.name, expr.property.name));
        }
        walk::walk_static_member_expression(self, expr);
    }

    fn visit_jsx_element(&mut self, elem: &JSXElement<'a>) {
        self.model.has_jsx = true;
        walk::walk_jsx_element(self, elem);
    }

    fn visit_jsx_fragment(&mut self, frag: &JSXFragment<'a>) {
        self.model.has_jsx = true;
        walk::walk_jsx_fragment(self, frag);
    }

    fn visit_jsx_member_expression(&mut self, expr: &JSXMemberExpression<'a>) {
        if let JSXMemberExpressionObject::IdentifierReference(object) = &expr.object {
            self.model
                .used_identifiers
                .insert(format!("{}.{}", object.name, expr.property.name));
        }
        walk::walk_jsx_member_expression(self, expr);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        for specifier in &decl.specifiers {
            // Re-exported specifiers register the exported name, not the
            // local name.
            self.model
                .exported_names
                .insert(specifier.exported.name().to_string());

            if decl.source.is_none() {
                // `export { x }` references the local binding `x`.
                self.model
                    .used_identifiers
                    .insert(specifier.local.name().to_string());
            }
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_default_declaration(&mut self, decl: &ExportDefaultDeclaration<'a>) {
        self.model.exported_names.insert("default".to_string());
        walk::walk_export_default_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        if let Some(exported) = &decl.exported {
            self.model.exported_names.insert(exported.name().to_string());
        }
        walk::walk_export_all_declaration(self, decl);
    }
}
