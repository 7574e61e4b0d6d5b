//! Expression printing (spec.md §4.4): precedence-correct parenthesization,
//! optional-chain token selection, operator-fusion spacing, numeric/string
//! literal formatting, and require/import emission.
//!
//! Parenthesization is a single uniform rule applied at the top of
//! [`Printer::print_expr`]: every variant's [`Expr::precedence`] already
//! encodes the binding power spec.md documents, so the generic "wrap if
//! `own_prec <= incoming_level`" check (spec.md §4.4) is all that's needed —
//! individual match arms only need to pass the right `incoming_level` to
//! their children (tighter than their own precedence for left-associative
//! operands, looser for the one that may recurse without parens).

use crate::ast::expr::{
    ArrowBody, AssignOp, BinaryOp, Expr, LogicalOp, MemberProperty, UnaryOp, UpdateOp,
};
use crate::ast::PropertyKey;
use crate::error::PrintError;
use crate::format::OutputFormat;

use super::{numeric, string_lit, Printer};

fn is_ident_continue_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

impl<'a> Printer<'a> {
    /// Writes a keyword or bare word, inserting a single space first if the
    /// previous byte would otherwise fuse with it into one longer identifier
    /// (spec.md §4.4 "`print_space_before_identifier`").
    fn write_word(&mut self, s: &str) {
        if let Some(last) = self.js.last().copied() {
            if is_ident_continue_byte(last) && s.as_bytes().first().copied().map(is_ident_continue_byte).unwrap_or(false) {
                self.write(" ");
            }
        }
        self.write(s);
    }

    /// Writes an operator token, inserting a space if the previous byte
    /// would otherwise fuse with its first character into a different token
    /// (spec.md §4.4 "Operator-spacing": `+ +`, `- --`, `< !`).
    fn write_op(&mut self, s: &str) {
        if let Some(last) = self.js.last().copied() {
            let first = s.as_bytes().first().copied();
            let needs_space = matches!((last, first), (b'+', Some(b'+')) | (b'-', Some(b'-')) | (b'<', Some(b'!')));
            if needs_space {
                self.write(" ");
            }
        }
        self.write(s);
    }

    /// Writes `.` or `?.` before a property access, inserting a space first
    /// if the preceding byte is an ASCII digit — `1.toString` would
    /// otherwise be lexed as a malformed numeric literal (spec.md §4.4
    /// "`.toString` on a numeric literal is emitted as `N .toString`").
    fn write_dot(&mut self, optional: bool) {
        if let Some(last) = self.js.last().copied() {
            if last.is_ascii_digit() {
                self.write(" ");
            }
        }
        self.write(if optional { "?." } else { "." });
    }

    pub(super) fn print_expr(&mut self, expr: &Expr, incoming_level: u8) -> Result<(), PrintError> {
        let own_prec = expr.precedence();
        let needs_parens = own_prec <= incoming_level;
        if needs_parens {
            self.write("(");
        }
        self.print_expr_inner(expr, own_prec)?;
        if needs_parens {
            self.write(")");
        }
        Ok(())
    }

    fn print_expr_inner(&mut self, expr: &Expr, own_prec: u8) -> Result<(), PrintError> {
        match expr {
            Expr::Numeric(n) => self.write(&numeric::format_number(n.0)),
            Expr::String(s) => {
                let rendered = string_lit::print_string_literal(s, self.ctx.options.quote_style);
                self.write(&rendered);
            }
            Expr::Boolean(b) => self.write_word(if *b { "true" } else { "false" }),
            Expr::Null => self.write_word("null"),
            Expr::Undefined => self.write_word("void 0"),
            Expr::This => self.write_word("this"),
            Expr::Identifier(r) => self.print_symbol_ref(*r),
            Expr::IndirectImport { namespace_ref, alias } => {
                self.print_symbol_ref(*namespace_ref);
                self.write_dot(false);
                self.write(alias);
            }
            Expr::Template(parts) => {
                self.write("`");
                for part in parts {
                    match part {
                        crate::ast::expr::TemplatePart::Quasi(text) => {
                            self.write(&string_lit::escape_template_quasi(text));
                        }
                        crate::ast::expr::TemplatePart::Expr(inner) => {
                            self.write("${");
                            self.print_expr(inner, 0)?;
                            self.write("}");
                        }
                    }
                }
                self.write("`");
            }
            Expr::Array(elements) => {
                self.write("[");
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(e) = el {
                        self.print_expr(e, 2)?;
                    }
                }
                self.write("]");
            }
            Expr::Object(properties) => {
                self.write("{");
                for (i, prop) in properties.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_object_property(prop)?;
                }
                self.write("}");
            }
            Expr::Unary { op, operand } => {
                let text = match op {
                    UnaryOp::Minus => "-",
                    UnaryOp::Plus => "+",
                    UnaryOp::Not => "!",
                    UnaryOp::BitNot => "~",
                    UnaryOp::TypeOf => "typeof ",
                    UnaryOp::Void => "void ",
                    UnaryOp::Delete => "delete ",
                };
                if matches!(op, UnaryOp::TypeOf | UnaryOp::Void | UnaryOp::Delete) {
                    self.write_word(text.trim_end());
                    self.write(" ");
                } else {
                    self.write_op(text);
                }
                self.print_expr(operand, own_prec.saturating_sub(1))?;
            }
            Expr::Await(operand) => {
                self.write_word("await");
                self.write(" ");
                self.print_expr(operand, own_prec.saturating_sub(1))?;
            }
            Expr::Yield { argument, delegate } => {
                self.write_word("yield");
                if *delegate {
                    self.write("*");
                }
                if let Some(arg) = argument {
                    self.write(" ");
                    self.print_expr(arg, 1)?;
                }
            }
            Expr::Update { op, operand, prefix } => {
                let text = match op {
                    UpdateOp::Increment => "++",
                    UpdateOp::Decrement => "--",
                };
                if *prefix {
                    self.write_op(text);
                    self.print_expr(operand, 15)?;
                } else {
                    self.print_expr(operand, 16)?;
                    self.write(text);
                }
            }
            Expr::Binary { op, left, right } => {
                let (text, right_level) = binary_op_text(*op);
                let is_pow = matches!(op, BinaryOp::Pow);
                if is_pow {
                    // `**` is right-associative: the left operand needs
                    // parens at its own precedence, the right doesn't.
                    self.print_expr(left, own_prec)?;
                } else {
                    self.print_expr(left, own_prec.saturating_sub(1))?;
                }
                self.write(" ");
                self.write_op(text);
                self.write(" ");
                self.print_expr(right, right_level)?;
            }
            Expr::Logical { op, left, right } => {
                let text = match op {
                    LogicalOp::And => "&&",
                    LogicalOp::Or => "||",
                    LogicalOp::NullishCoalescing => "??",
                };
                self.print_expr(left, own_prec.saturating_sub(1))?;
                self.write(" ");
                self.write(text);
                self.write(" ");
                self.print_expr(right, own_prec)?;
            }
            Expr::Assign { op, target, value } => {
                let text = assign_op_text(*op);
                self.print_expr(target, own_prec)?;
                self.write(" ");
                self.write(text);
                self.write(" ");
                self.print_expr(value, own_prec.saturating_sub(1))?;
            }
            Expr::Conditional { test, consequent, alternate } => {
                self.print_expr(test, own_prec.saturating_sub(1))?;
                self.write(" ? ");
                self.print_expr(consequent, 1)?;
                self.write(" : ");
                self.print_expr(alternate, 1)?;
            }
            Expr::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_expr(item, 1)?;
                }
            }
            Expr::Spread(inner) => {
                self.write("...");
                self.print_expr(inner, 1)?;
            }
            Expr::Member { object, property, optional, is_chain_continuation: _ } => {
                self.print_expr(object, 18)?;
                match property {
                    MemberProperty::Identifier(name) => {
                        self.write_dot(*optional);
                        self.write(name);
                    }
                    MemberProperty::PrivateIdentifier(name) => {
                        self.write_dot(*optional);
                        self.write("#");
                        self.write(name);
                    }
                    MemberProperty::Computed(index) => {
                        if *optional {
                            self.write("?.");
                        }
                        self.write("[");
                        self.print_expr(index, 0)?;
                        self.write("]");
                    }
                }
            }
            Expr::Call { callee, arguments, optional, is_chain_continuation: _ } => {
                self.print_expr(callee, 16)?;
                if *optional {
                    self.write("?.");
                }
                self.print_call_args(arguments)?;
            }
            Expr::New { callee, arguments } => {
                self.write_word("new");
                self.write(" ");
                self.print_expr(callee, 17)?;
                self.print_call_args(arguments)?;
            }
            Expr::Arrow { params, body, is_async } => self.print_arrow(params, body, *is_async)?,
            Expr::Function { name, params, body, is_async, is_generator } => {
                if *is_async {
                    self.write_word("async");
                    self.write(" ");
                }
                self.write_word("function");
                if *is_generator {
                    self.write("*");
                }
                if let Some(r) = name {
                    self.write(" ");
                    self.print_symbol_ref(*r);
                } else {
                    self.write(" ");
                }
                self.print_params(params)?;
                self.write(" ");
                self.print_block_stmts(body)?;
            }
            Expr::Class { name, super_class, body_source } => {
                self.write_word("class");
                if let Some(r) = name {
                    self.write(" ");
                    self.print_symbol_ref(*r);
                }
                if let Some(sc) = super_class {
                    self.write(" extends ");
                    self.print_expr(sc, 17)?;
                }
                self.write(" ");
                self.write(body_source);
            }
            Expr::Import { import_record_index } => self.print_require_or_import(*import_record_index, true)?,
            Expr::Require { import_record_index } => self.print_require_or_import(*import_record_index, false)?,
            Expr::ToModule(inner) => {
                self.write("__toModule(");
                self.print_expr(inner, 1)?;
                self.write(")");
            }
            Expr::Raw(text) => self.write(text),
        }
        Ok(())
    }

    fn print_call_args(&mut self, arguments: &[Expr]) -> Result<(), PrintError> {
        self.write("(");
        for (i, arg) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expr(arg, 1)?;
        }
        self.write(")");
        Ok(())
    }

    fn print_object_property(&mut self, prop: &crate::ast::expr::ObjectProperty) -> Result<(), PrintError> {
        if prop.is_spread {
            self.write("...");
            return self.print_expr(&prop.value, 1);
        }
        if prop.is_method {
            self.print_property_key(&prop.key)?;
            if let Expr::Function { params, body, is_async, is_generator, .. } = &prop.value {
                if *is_async {
                    self.write_word("async");
                    self.write(" ");
                }
                if *is_generator {
                    self.write("*");
                }
                self.print_params(params)?;
                self.write(" ");
                self.print_block_stmts(body)?;
            }
            return Ok(());
        }
        // Shorthand is only valid output when the target doesn't force
        // object-extensions off (spec.md §4.4 "Feature-gated output").
        if prop.shorthand && !self.ctx.options.unsupported_features.object_extensions {
            return self.print_expr(&prop.value, 1);
        }
        self.print_property_key(&prop.key)?;
        self.write(": ");
        self.print_expr(&prop.value, 1)
    }

    fn print_arrow(&mut self, params: &[crate::ast::expr::Param], body: &ArrowBody, is_async: bool) -> Result<(), PrintError> {
        if self.ctx.options.unsupported_features.arrow {
            // Fall back to an equivalent `function` expression (spec.md
            // §4.4 "emit `function() {}` fallback if arrow is unsupported").
            if is_async {
                self.write_word("async");
                self.write(" ");
            }
            self.write_word("function");
            self.write(" ");
            self.print_params(params)?;
            self.write(" ");
            match body {
                ArrowBody::Block(stmts) => self.print_block_stmts(stmts)?,
                ArrowBody::Expr(e) => {
                    self.write("{ return ");
                    self.print_expr(e, 0)?;
                    self.write("; }");
                }
            }
            return Ok(());
        }

        if is_async {
            self.write_word("async");
            self.write(" ");
        }
        self.print_params(params)?;
        self.write(" => ");
        match body {
            ArrowBody::Block(stmts) => self.print_block_stmts(stmts)?,
            ArrowBody::Expr(e) => {
                // spec.md testable property 13: an arrow whose expression
                // body is an object literal must be parenthesized, or it
                // would be parsed as the arrow's block body.
                if e.starts_statement_ambiguously() {
                    self.write("(");
                    self.print_expr(e, 0)?;
                    self.write(")");
                } else {
                    self.print_expr(e, 2)?;
                }
            }
        }
        Ok(())
    }

    /// `print_require_or_import_expr` (spec.md §4.4): a reference resolved
    /// inside the bundle becomes a numeric output-index lookup; an external
    /// one keeps its raw specifier. `esm` output format (the only format
    /// that `preserves_dynamic_import`) leaves a dynamic `import()` as
    /// literal syntax regardless of resolution (spec.md §8 Scenario D) since
    /// there is no closure-wrapped module array to index into.
    fn print_require_or_import(&mut self, import_record_index: u32, is_dynamic: bool) -> Result<(), PrintError> {
        let record = &self.ctx.import_records[import_record_index as usize];
        let raw_path = record.raw_path.clone();
        let resolved = record.resolved_source_index;

        if is_dynamic && self.ctx.options.format == OutputFormat::Esm {
            let quoted = string_lit::print_string_literal(&raw_path, self.ctx.options.quote_style);
            self.write("import(");
            self.write(&quoted);
            self.write(")");
            return Ok(());
        }

        match resolved {
            Some(target) => {
                let output_index = self
                    .ctx
                    .source_index_to_output_index
                    .get(target as usize)
                    .copied()
                    .unwrap_or(target);
                if is_dynamic {
                    self.write("Promise.resolve().then(() => __toModule(require(");
                    self.write(&output_index.to_string());
                    self.write(")))");
                } else {
                    self.write("require(");
                    self.write(&output_index.to_string());
                    self.write(")");
                }
            }
            None => {
                let quoted = string_lit::print_string_literal(&raw_path, self.ctx.options.quote_style);
                if is_dynamic {
                    self.write("Promise.resolve().then(() => __toModule(require(");
                    self.write(&quoted);
                    self.write(")))");
                } else {
                    self.write("require(");
                    self.write(&quoted);
                    self.write(")");
                }
            }
        }
        Ok(())
    }
}

fn binary_op_text(op: BinaryOp) -> (&'static str, u8) {
    let prec = Expr::Binary { op, left: Box::new(Expr::Null), right: Box::new(Expr::Null) }.precedence();
    let text = match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Pow => "**",
        BinaryOp::Equal => "==",
        BinaryOp::NotEqual => "!=",
        BinaryOp::StrictEqual => "===",
        BinaryOp::StrictNotEqual => "!==",
        BinaryOp::Less => "<",
        BinaryOp::LessEq => "<=",
        BinaryOp::Greater => ">",
        BinaryOp::GreaterEq => ">=",
        BinaryOp::ShiftLeft => "<<",
        BinaryOp::ShiftRight => ">>",
        BinaryOp::ShiftRightUnsigned => ">>>",
        BinaryOp::BitAnd => "&",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
        BinaryOp::In => "in",
        BinaryOp::InstanceOf => "instanceof",
    };
    // Right operand of a left-associative operator needs parens at the
    // operator's own precedence (so `a - (b - c)` keeps its parens while
    // `(a - b) - c` doesn't need any); `**` is handled separately by its
    // caller since it's right-associative.
    (text, prec)
}

fn assign_op_text(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::AddAssign => "+=",
        AssignOp::SubAssign => "-=",
        AssignOp::MulAssign => "*=",
        AssignOp::DivAssign => "/=",
        AssignOp::ModAssign => "%=",
        AssignOp::PowAssign => "**=",
        AssignOp::ShiftLeftAssign => "<<=",
        AssignOp::ShiftRightAssign => ">>=",
        AssignOp::BitAndAssign => "&=",
        AssignOp::BitOrAssign => "|=",
        AssignOp::BitXorAssign => "^=",
        AssignOp::LogicalAndAssign => "&&=",
        AssignOp::LogicalOrAssign => "||=",
        AssignOp::NullishAssign => "??=",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{PrintOptions as _PrintOptionsAlias};
    use crate::import_record::{ImportRecord, ImportRecordKind};
    use crate::printer::{PrintContext, PrintOptions};
    use crate::symbol::{SymbolKind, SymbolMap};

    fn print_one(expr: &Expr, records: &[ImportRecord], output_index: &[u32], options: &PrintOptions) -> String {
        let symbols = SymbolMap::new();
        let ctx = PrintContext {
            symbols: &symbols,
            import_records: records,
            source_index_to_output_index: output_index,
            own_source_index: 0,
            source_text: "",
            options,
        };
        let mut printer = Printer::new(&ctx);
        printer.print_expr(expr, 0).unwrap();
        String::from_utf8(printer.js).unwrap()
    }

    #[test]
    fn nested_unary_minus_keeps_a_separating_space() {
        let options = PrintOptions::default();
        let expr = Expr::Unary {
            op: UnaryOp::Minus,
            operand: Box::new(Expr::Unary { op: UnaryOp::Minus, operand: Box::new(Expr::Numeric(crate::ast::expr::NumericLiteral(1.0))) }),
        };
        let out = print_one(&expr, &[], &[], &options);
        assert_eq!(out, "- -1");
    }

    #[test]
    fn subtraction_right_operand_gets_parens() {
        let options = PrintOptions::default();
        let expr = Expr::Binary {
            op: BinaryOp::Sub,
            left: Box::new(Expr::Numeric(crate::ast::expr::NumericLiteral(1.0))),
            right: Box::new(Expr::Binary {
                op: BinaryOp::Sub,
                left: Box::new(Expr::Numeric(crate::ast::expr::NumericLiteral(2.0))),
                right: Box::new(Expr::Numeric(crate::ast::expr::NumericLiteral(3.0))),
            }),
        };
        let out = print_one(&expr, &[], &[], &options);
        assert_eq!(out, "1 - (2 - 3)");
    }

    #[test]
    fn exponent_right_operand_needs_no_parens_but_left_does() {
        let options = PrintOptions::default();
        let expr = Expr::Binary {
            op: BinaryOp::Pow,
            left: Box::new(Expr::Binary {
                op: BinaryOp::Pow,
                left: Box::new(Expr::Numeric(crate::ast::expr::NumericLiteral(2.0))),
                right: Box::new(Expr::Numeric(crate::ast::expr::NumericLiteral(3.0))),
            }),
            right: Box::new(Expr::Numeric(crate::ast::expr::NumericLiteral(4.0))),
        };
        let out = print_one(&expr, &[], &[], &options);
        assert_eq!(out, "(2 ** 3) ** 4");
    }

    #[test]
    fn dynamic_import_of_an_internal_module_is_promise_wrapped() {
        let options = PrintOptions::default();
        let mut record = ImportRecord::new(ImportRecordKind::DynamicImport, "./m");
        record.resolved_source_index = Some(1);
        let expr = Expr::Import { import_record_index: 0 };
        let out = print_one(&expr, &[record], &[0, 5], &options);
        assert_eq!(out, "Promise.resolve().then(() => __toModule(require(5)))");
    }

    #[test]
    fn esm_format_keeps_dynamic_import_literal() {
        let mut options = PrintOptions::default();
        options.format = OutputFormat::Esm;
        let mut record = ImportRecord::new(ImportRecordKind::DynamicImport, "./p");
        record.resolved_source_index = Some(1);
        let expr = Expr::Import { import_record_index: 0 };
        let out = print_one(&expr, &[record], &[0, 1], &options);
        assert_eq!(out, "import(\"./p\")");
    }

    #[test]
    fn optional_member_emits_question_dot() {
        let options = PrintOptions::default();
        let mut symbols = SymbolMap::new();
        let r = symbols.new_symbol(0, "a", SymbolKind::Other);
        symbols.follow_all_symbols();
        let ctx = PrintContext {
            symbols: &symbols,
            import_records: &[],
            source_index_to_output_index: &[],
            own_source_index: 0,
            source_text: "",
            options: &options,
        };
        let mut printer = Printer::new(&ctx);
        let expr = Expr::Member {
            object: Box::new(Expr::Identifier(r)),
            property: MemberProperty::Identifier("b".to_string()),
            optional: true,
            is_chain_continuation: false,
        };
        printer.print_expr(&expr, 0).unwrap();
        assert_eq!(String::from_utf8(printer.js).unwrap(), "a?.b");
    }

    #[test]
    fn number_member_access_keeps_a_disambiguating_space() {
        let options = PrintOptions::default();
        let symbols = SymbolMap::new();
        let ctx = PrintContext {
            symbols: &symbols,
            import_records: &[],
            source_index_to_output_index: &[],
            own_source_index: 0,
            source_text: "",
            options: &options,
        };
        let mut printer = Printer::new(&ctx);
        let expr = Expr::Member {
            object: Box::new(Expr::Numeric(crate::ast::expr::NumericLiteral(1.0))),
            property: MemberProperty::Identifier("toString".to_string()),
            optional: false,
            is_chain_continuation: false,
        };
        printer.print_expr(&expr, 0).unwrap();
        assert_eq!(String::from_utf8(printer.js).unwrap(), "1 .toString");
    }
}
