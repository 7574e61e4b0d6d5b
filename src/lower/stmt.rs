//! Lowers `oxc_ast::ast::{Program, Statement}` into `crate::ast::{Module, Stmt}`.
//!
//! Import/export forms keep their original shape (spec.md §4.7 needs to see
//! the declaration before the Binder rewrites it away); everything else is
//! lowered structurally when the Printer documents formatting for it, or
//! passed through verbatim otherwise (see `crate::lower` module docs).

use oxc_ast::ast::{self as oxc, Program, Statement};
use oxc_span::GetSpan;

use crate::ast::stmt::{ExportDefaultValue, ExportSpecifier, ImportSpecifier, ImportedName, VarDeclarator, VarKind};
use crate::ast::{Module as InternalModule, Part, Stmt};
use crate::import_record::{ImportRecord, ImportRecordKind};
use crate::symbol::SymbolKind;

use super::expr::{lower_binding_pattern, lower_expression, lower_params};
use super::{range_of, LowerCtx, LowerError};

pub(super) fn lower_program(ctx: &mut LowerCtx, program: &Program) -> Result<InternalModule, LowerError> {
    hoist_top_level_names(ctx, &program.body);
    let starts = program.body.iter().map(|s| s.span().start).collect();
    let stmts = lower_statements(ctx, &program.body);

    Ok(InternalModule {
        parts: vec![Part { stmts, starts }],
        import_records: std::mem::take(&mut ctx.import_records),
        has_commonjs_exports: ctx.saw_commonjs_exports,
        require_ref: None,
        exports_ref: None,
        module_ref: None,
        reserved_slots: false,
    })
}

pub(super) fn lower_statements(ctx: &mut LowerCtx, stmts: &oxc_allocator::Vec<Statement>) -> Vec<Stmt> {
    stmts.iter().map(|s| lower_statement(ctx, s)).collect()
}

/// Registers every module-top-level binding (`import`, `function`, `class`,
/// `var`/`let`/`const`, and their `export`-wrapped forms) with `ctx` before
/// the main lowering pass runs, so a forward reference resolves to the same
/// `Ref` the later declaration site reuses via `LowerCtx::bind_name`. Mirrors
/// JS's own function/var hoisting closely enough for the Binder's purposes
/// (spec.md §4.7 only binds names declared at module top level).
fn hoist_top_level_names(ctx: &mut LowerCtx, stmts: &oxc_allocator::Vec<Statement>) {
    for stmt in stmts {
        hoist_statement(ctx, stmt);
    }
}

fn hoist_statement(ctx: &mut LowerCtx, stmt: &Statement) {
    match stmt {
        Statement::ImportDeclaration(decl) => {
            if let Some(specs) = &decl.specifiers {
                for spec in specs {
                    let local = match spec {
                        oxc::ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => &s.local,
                        oxc::ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => &s.local,
                        oxc::ImportDeclarationSpecifier::ImportSpecifier(s) => &s.local,
                    };
                    ctx.bind_name(local.name.to_string(), SymbolKind::Import);
                }
            }
        }
        Statement::ExportNamedDeclaration(decl) => {
            if let Some(declaration) = &decl.declaration {
                hoist_declaration(ctx, declaration);
            }
        }
        Statement::VariableDeclaration(decl) => hoist_var_decl(ctx, decl),
        Statement::FunctionDeclaration(func) => {
            if let Some(id) = &func.id {
                ctx.bind_name(id.name.to_string(), SymbolKind::Hoisted);
            }
        }
        Statement::ClassDeclaration(class) => {
            if let Some(id) = &class.id {
                ctx.bind_name(id.name.to_string(), SymbolKind::Class);
            }
        }
        _ => {}
    }
}

fn hoist_declaration(ctx: &mut LowerCtx, decl: &oxc::Declaration) {
    match decl {
        oxc::Declaration::VariableDeclaration(v) => hoist_var_decl(ctx, v),
        oxc::Declaration::FunctionDeclaration(f) => {
            if let Some(id) = &f.id {
                ctx.bind_name(id.name.to_string(), SymbolKind::Hoisted);
            }
        }
        oxc::Declaration::ClassDeclaration(c) => {
            if let Some(id) = &c.id {
                ctx.bind_name(id.name.to_string(), SymbolKind::Class);
            }
        }
        _ => {}
    }
}

fn hoist_var_decl(ctx: &mut LowerCtx, decl: &oxc::VariableDeclaration) {
    for d in &decl.declarations {
        hoist_binding_pattern(ctx, &d.id);
    }
}

fn hoist_binding_pattern(ctx: &mut LowerCtx, pattern: &oxc::BindingPattern) {
    match &pattern.kind {
        oxc::BindingPatternKind::BindingIdentifier(id) => {
            ctx.bind_name(id.name.to_string(), SymbolKind::Other);
        }
        oxc::BindingPatternKind::ArrayPattern(arr) => {
            for el in arr.elements.iter().flatten() {
                hoist_binding_pattern(ctx, el);
            }
        }
        oxc::BindingPatternKind::ObjectPattern(obj) => {
            for p in &obj.properties {
                hoist_binding_pattern(ctx, &p.value);
            }
            if let Some(rest) = &obj.rest {
                hoist_binding_pattern(ctx, &rest.argument);
            }
        }
        oxc::BindingPatternKind::AssignmentPattern(a) => hoist_binding_pattern(ctx, &a.left),
    }
}

fn lower_statement(ctx: &mut LowerCtx, stmt: &Statement) -> Stmt {
    match stmt {
        Statement::ImportDeclaration(decl) => lower_import_declaration(ctx, decl),
        Statement::ExportNamedDeclaration(decl) => lower_export_named(ctx, decl),
        Statement::ExportDefaultDeclaration(decl) => lower_export_default(ctx, decl),
        Statement::ExportAllDeclaration(decl) => lower_export_all(ctx, decl),
        Statement::VariableDeclaration(decl) => lower_var_decl(ctx, decl),
        Statement::FunctionDeclaration(func) => lower_function_decl(ctx, func),
        Statement::ClassDeclaration(class) => lower_class_decl(ctx, class),
        Statement::ExpressionStatement(expr_stmt) => Stmt::Expr(lower_expression(ctx, &expr_stmt.expression)),
        Statement::BlockStatement(block) => Stmt::Block(lower_statements(ctx, &block.body)),
        Statement::IfStatement(if_stmt) => Stmt::If {
            test: lower_expression(ctx, &if_stmt.test),
            consequent: Box::new(lower_statement(ctx, &if_stmt.consequent)),
            alternate: if_stmt.alternate.as_ref().map(|a| Box::new(lower_statement(ctx, a))),
        },
        Statement::ReturnStatement(ret) => Stmt::Return(ret.argument.as_ref().map(|e| lower_expression(ctx, e))),
        Statement::ThrowStatement(t) => Stmt::Throw(lower_expression(ctx, &t.argument)),
        Statement::BreakStatement(b) => Stmt::Break(b.label.as_ref().map(|l| l.name.to_string())),
        Statement::ContinueStatement(c) => Stmt::Continue(c.label.as_ref().map(|l| l.name.to_string())),
        Statement::EmptyStatement(_) => Stmt::Empty,
        Statement::WhileStatement(w) => Stmt::While {
            test: lower_expression(ctx, &w.test),
            body: Box::new(lower_statement(ctx, &w.body)),
        },
        Statement::ForStatement(f) => {
            let init = f.init.as_ref().map(|init| match init {
                oxc::ForStatementInit::VariableDeclaration(decl) => Box::new(lower_var_decl(ctx, decl)),
                other => other
                    .as_expression()
                    .map(|e| Box::new(Stmt::Expr(lower_expression(ctx, e))))
                    .unwrap_or_else(|| Box::new(Stmt::Empty)),
            });
            Stmt::For {
                init,
                test: f.test.as_ref().map(|e| lower_expression(ctx, e)),
                update: f.update.as_ref().map(|e| lower_expression(ctx, e)),
                body: Box::new(lower_statement(ctx, &f.body)),
            }
        }
        Statement::TryStatement(t) => Stmt::Try {
            block: lower_statements(ctx, &t.block.body),
            handler: t.handler.as_ref().map(|h| {
                (
                    h.param.as_ref().map(|p| lower_binding_pattern(ctx, &p.pattern)),
                    lower_statements(ctx, &h.body.body),
                )
            }),
            finalizer: t.finalizer.as_ref().map(|f| lower_statements(ctx, &f.body)),
        },
        other => Stmt::Raw(source_slice(ctx, other.span())),
    }
}

fn lower_import_declaration(ctx: &mut LowerCtx, decl: &oxc::ImportDeclaration) -> Stmt {
    let raw_path = decl.source.value.to_string();
    let idx = ctx.push_import_record(ImportRecord::new(ImportRecordKind::StaticImport, raw_path));

    let mut specifiers = Vec::new();
    if let Some(specs) = &decl.specifiers {
        for spec in specs {
            match spec {
                oxc::ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    let r = ctx.bind_name(s.local.name.to_string(), SymbolKind::Import);
                    specifiers.push(ImportSpecifier { imported_name: ImportedName::Default, local_ref: r });
                }
                oxc::ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    let r = ctx.bind_name(s.local.name.to_string(), SymbolKind::Import);
                    specifiers.push(ImportSpecifier { imported_name: ImportedName::Namespace, local_ref: r });
                }
                oxc::ImportDeclarationSpecifier::ImportSpecifier(s) => {
                    let name = module_export_name(&s.imported);
                    let r = ctx.bind_name(s.local.name.to_string(), SymbolKind::Import);
                    specifiers.push(ImportSpecifier { imported_name: ImportedName::Named(name), local_ref: r });
                }
            }
        }
    }
    Stmt::Import { import_record_index: idx, specifiers }
}

fn lower_export_named(ctx: &mut LowerCtx, decl: &oxc::ExportNamedDeclaration) -> Stmt {
    if let Some(src) = &decl.source {
        let idx = ctx.push_import_record(ImportRecord::new(ImportRecordKind::ExportFrom, src.value.to_string()));
        let specifiers = decl
            .specifiers
            .iter()
            .map(|s| ExportSpecifier {
                local_name: module_export_name(&s.local),
                exported_name: module_export_name(&s.exported),
            })
            .collect();
        return Stmt::ExportNamed { import_record_index: Some(idx), specifiers };
    }

    if let Some(declaration) = &decl.declaration {
        return Stmt::ExportDecl(Box::new(lower_declaration(ctx, declaration)));
    }

    let specifiers = decl
        .specifiers
        .iter()
        .map(|s| ExportSpecifier {
            local_name: module_export_name(&s.local),
            exported_name: module_export_name(&s.exported),
        })
        .collect();
    Stmt::ExportNamed { import_record_index: None, specifiers }
}

fn lower_declaration(ctx: &mut LowerCtx, decl: &oxc::Declaration) -> Stmt {
    match decl {
        oxc::Declaration::VariableDeclaration(v) => lower_var_decl(ctx, v),
        oxc::Declaration::FunctionDeclaration(f) => lower_function_decl(ctx, f),
        oxc::Declaration::ClassDeclaration(c) => lower_class_decl(ctx, c),
        other => Stmt::Raw(source_slice(ctx, other.span())),
    }
}

fn lower_export_default(ctx: &mut LowerCtx, decl: &oxc::ExportDefaultDeclaration) -> Stmt {
    let default_ref = ctx.fresh_ref("default", SymbolKind::Other);
    let value = match &decl.declaration {
        oxc::ExportDefaultDeclarationKind::FunctionDeclaration(f) => ExportDefaultValue::Function {
            params: lower_params(ctx, &f.params),
            body: f.body.as_ref().map(|b| lower_statements(ctx, &b.statements)).unwrap_or_default(),
            is_async: f.r#async,
            is_generator: f.generator,
        },
        oxc::ExportDefaultDeclarationKind::ClassDeclaration(c) => ExportDefaultValue::Class {
            super_class: c.super_class.as_ref().map(|s| lower_expression(ctx, s)),
            body_source: source_slice(ctx, c.body.span()),
        },
        other => {
            let expr = other
                .as_expression()
                .map(|e| lower_expression(ctx, e))
                .unwrap_or_else(|| crate::ast::Expr::Raw(source_slice(ctx, other.span())));
            ExportDefaultValue::Expr(expr)
        }
    };
    Stmt::ExportDefault { default_ref, value }
}

fn lower_export_all(ctx: &mut LowerCtx, decl: &oxc::ExportAllDeclaration) -> Stmt {
    let idx = ctx.push_import_record(ImportRecord::new(ImportRecordKind::ExportStar, decl.source.value.to_string()));
    match &decl.exported {
        Some(name) => Stmt::ExportStarAs { import_record_index: idx, alias: module_export_name(name) },
        None => Stmt::ExportStar { import_record_index: idx },
    }
}

fn lower_var_decl(ctx: &mut LowerCtx, decl: &oxc::VariableDeclaration) -> Stmt {
    let kind = match decl.kind {
        oxc::VariableDeclarationKind::Var => VarKind::Var,
        oxc::VariableDeclarationKind::Let => VarKind::Let,
        oxc::VariableDeclarationKind::Const => VarKind::Const,
        _ => VarKind::Let,
    };
    let declarators = decl
        .declarations
        .iter()
        .map(|d| VarDeclarator {
            pattern: lower_binding_pattern(ctx, &d.id),
            init: d.init.as_ref().map(|e| lower_expression(ctx, e)),
        })
        .collect();
    Stmt::VarDecl { kind, declarators }
}

fn lower_function_decl(ctx: &mut LowerCtx, func: &oxc::Function) -> Stmt {
    let name_ref = func
        .id
        .as_ref()
        .map(|id| ctx.bind_name(id.name.to_string(), SymbolKind::Hoisted))
        .unwrap_or_else(|| ctx.fresh_ref("<anonymous>", SymbolKind::Hoisted));
    let params = lower_params(ctx, &func.params);
    let body = func.body.as_ref().map(|b| lower_statements(ctx, &b.statements)).unwrap_or_default();
    Stmt::FunctionDecl { name_ref, params, body, is_async: func.r#async, is_generator: func.generator }
}

fn lower_class_decl(ctx: &mut LowerCtx, class: &oxc::Class) -> Stmt {
    let name_ref = class
        .id
        .as_ref()
        .map(|id| ctx.bind_name(id.name.to_string(), SymbolKind::Class))
        .unwrap_or_else(|| ctx.fresh_ref("<anonymous class>", SymbolKind::Class));
    Stmt::ClassDecl {
        name_ref,
        super_class: class.super_class.as_ref().map(|s| lower_expression(ctx, s)),
        body_source: source_slice(ctx, class.body.span()),
    }
}

fn module_export_name(name: &oxc::ModuleExportName) -> String {
    match name {
        oxc::ModuleExportName::IdentifierName(id) => id.name.to_string(),
        oxc::ModuleExportName::IdentifierReference(id) => id.name.to_string(),
        oxc::ModuleExportName::StringLiteral(s) => s.value.to_string(),
    }
}

fn source_slice(ctx: &LowerCtx, span: oxc_span::Span) -> String {
    ctx.source_text.get(span.start as usize..span.end as usize).unwrap_or_default().to_string()
}
