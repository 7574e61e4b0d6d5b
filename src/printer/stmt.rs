//! Statement printing (spec.md §4.4). Kept separate from expression printing
//! since a statement's own layout rules (semicolons, block braces, one
//! `mark()` per top-level statement done by the caller in `mod.rs`) don't
//! interact with expression precedence at all.

use crate::ast::stmt::VarKind;
use crate::ast::{Pattern, PropertyKey, Stmt};
use crate::error::PrintError;

use super::Printer;

impl<'a> Printer<'a> {
    pub(super) fn print_stmt(&mut self, stmt: &Stmt) -> Result<(), PrintError> {
        match stmt {
            Stmt::Expr(e) => {
                // spec.md testable property 13: an expression statement that
                // would otherwise parse as a block, function, or class needs
                // a leading paren to keep it an expression.
                let needs_parens = e.starts_statement_ambiguously();
                if needs_parens {
                    self.write("(");
                }
                self.print_expr(e, 0)?;
                if needs_parens {
                    self.write(")");
                }
                self.write(";");
                self.newline();
            }
            Stmt::VarDecl { kind, declarators } => {
                self.print_var_decl(*kind, declarators)?;
                self.write(";");
                self.newline();
            }
            Stmt::FunctionDecl { name_ref, params, body, is_async, is_generator } => {
                if *is_async {
                    self.write("async ");
                }
                self.write("function");
                if *is_generator {
                    self.write("*");
                }
                self.write(" ");
                self.print_symbol_ref(*name_ref);
                self.print_params(params)?;
                self.write(" ");
                self.print_block_stmts(body)?;
                self.newline();
            }
            Stmt::ClassDecl { name_ref, super_class, body_source } => {
                self.write("class ");
                self.print_symbol_ref(*name_ref);
                if let Some(sc) = super_class {
                    self.write(" extends ");
                    self.print_expr(sc, 17)?;
                }
                self.write(" ");
                self.write(body_source);
                self.newline();
            }
            Stmt::Return(value) => {
                self.write("return");
                if let Some(e) = value {
                    self.write(" ");
                    self.print_expr(e, 0)?;
                }
                self.write(";");
                self.newline();
            }
            Stmt::If { test, consequent, alternate } => {
                self.write("if (");
                self.print_expr(test, 0)?;
                self.write(") ");
                self.print_stmt(consequent)?;
                if let Some(alt) = alternate {
                    self.write("else ");
                    self.print_stmt(alt)?;
                }
            }
            Stmt::Block(stmts) => {
                self.print_block_stmts(stmts)?;
                self.newline();
            }
            Stmt::Throw(e) => {
                self.write("throw ");
                self.print_expr(e, 0)?;
                self.write(";");
                self.newline();
            }
            Stmt::Try { block, handler, finalizer } => {
                self.write("try ");
                self.print_block_stmts(block)?;
                if let Some((param, body)) = handler {
                    self.write(" catch ");
                    if let Some(p) = param {
                        self.write("(");
                        self.print_pattern(p)?;
                        self.write(") ");
                    }
                    self.print_block_stmts(body)?;
                }
                if let Some(fin) = finalizer {
                    self.write(" finally ");
                    self.print_block_stmts(fin)?;
                }
                self.newline();
            }
            Stmt::For { init, test, update, body } => {
                self.write("for (");
                if let Some(init) = init {
                    self.print_for_init(init)?;
                }
                self.write("; ");
                if let Some(t) = test {
                    self.print_expr(t, 0)?;
                }
                self.write("; ");
                if let Some(u) = update {
                    self.print_expr(u, 0)?;
                }
                self.write(") ");
                self.print_stmt(body)?;
            }
            Stmt::While { test, body } => {
                self.write("while (");
                self.print_expr(test, 0)?;
                self.write(") ");
                self.print_stmt(body)?;
            }
            Stmt::Break(label) => {
                self.write("break");
                if let Some(l) = label {
                    self.write(" ");
                    self.write(l);
                }
                self.write(";");
                self.newline();
            }
            Stmt::Continue(label) => {
                self.write("continue");
                if let Some(l) = label {
                    self.write(" ");
                    self.write(l);
                }
                self.write(";");
                self.newline();
            }
            // A slot the Binder never filled in; nothing to print (spec.md
            // §4.7 reserves both slots unconditionally and discards unused
            // ones rather than leaving a gap in the statement list).
            Stmt::Empty | Stmt::ReservedSlot => {}
            Stmt::Raw(text) => {
                self.write(text);
                self.newline();
            }
            Stmt::Import { .. }
            | Stmt::ExportNamed { .. }
            | Stmt::ExportStar { .. }
            | Stmt::ExportStarAs { .. }
            | Stmt::ExportDefault { .. }
            | Stmt::ExportDecl(_) => {
                return Err(PrintError::Unsupported(
                    "import/export declaration reached the printer without being rewritten by the binder".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn print_var_decl(&mut self, kind: VarKind, declarators: &[crate::ast::stmt::VarDeclarator]) -> Result<(), PrintError> {
        self.write(match kind {
            VarKind::Var => "var ",
            VarKind::Let => "let ",
            VarKind::Const => "const ",
        });
        for (i, d) in declarators.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_pattern(&d.pattern)?;
            if let Some(init) = &d.init {
                self.write(" = ");
                // Precedence 2 (above Assign) so a bare sequence expression
                // initializer still gets parenthesized; assignment itself
                // needs none since `=` right-associates into another `=`.
                self.print_expr(init, 2)?;
            }
        }
        Ok(())
    }

    fn print_for_init(&mut self, stmt: &Stmt) -> Result<(), PrintError> {
        match stmt {
            Stmt::VarDecl { kind, declarators } => self.print_var_decl(*kind, declarators),
            Stmt::Expr(e) => self.print_expr(e, 2),
            other => self.print_stmt(other),
        }
    }

    fn print_block_stmts(&mut self, stmts: &[Stmt]) -> Result<(), PrintError> {
        self.write("{");
        self.indent += 1;
        for s in stmts {
            self.newline();
            self.print_stmt(s)?;
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
        Ok(())
    }

    pub(super) fn print_pattern(&mut self, pattern: &Pattern) -> Result<(), PrintError> {
        match pattern {
            Pattern::Identifier(r) => self.print_symbol_ref(*r),
            Pattern::Array(elements) => {
                self.write("[");
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(p) = el {
                        self.print_pattern(p)?;
                    }
                }
                self.write("]");
            }
            Pattern::Object(props) => {
                self.write("{");
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_property_key(&prop.key)?;
                    self.write(": ");
                    self.print_pattern(&prop.value)?;
                }
                self.write("}");
            }
            Pattern::Default(inner, default) => {
                self.print_pattern(inner)?;
                self.write(" = ");
                self.print_expr(default, 2)?;
            }
            Pattern::Rest(inner) => {
                self.write("...");
                self.print_pattern(inner)?;
            }
        }
        Ok(())
    }

    pub(super) fn print_property_key(&mut self, key: &PropertyKey) -> Result<(), PrintError> {
        match key {
            PropertyKey::Identifier(name) => self.write(name),
            PropertyKey::StringLiteral(value) => {
                let rendered = super::string_lit::print_string_literal(value, self.ctx.options.quote_style);
                self.write(&rendered);
            }
            PropertyKey::Computed(expr) => {
                self.write("[");
                self.print_expr(expr, 2)?;
                self.write("]");
            }
        }
        Ok(())
    }

    pub(super) fn print_params(&mut self, params: &[crate::ast::expr::Param]) -> Result<(), PrintError> {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_pattern(&param.pattern)?;
            if let Some(default) = &param.default {
                self.write(" = ");
                self.print_expr(default, 2)?;
            }
        }
        self.write(")");
        Ok(())
    }
}
