//! Printer: turns a bound module's AST back into JS source text plus a VLQ
//! source-map chunk (spec.md §4.4).
//!
//! Grounded on the Scanner's own worker-thread shape (`scanner.rs`): the
//! Linker calls [`print_module`] once per module from a `std::thread::scope`
//! pool exactly the way the Scanner parallelizes `parse_one`, reading the
//! (by now read-only) `SymbolMap` through [`crate::symbol::SymbolMap::follow_ro`]
//! so no two threads ever need a lock (spec.md §5 "the SymbolMap is
//! effectively read-only for the printer").
//!
//! Source positions: the internal AST only retains a byte offset per
//! top-level statement (`ast::Part::starts`), not one per expression node, so
//! this printer emits exactly one mapping per top-level statement rather than
//! one per token. That is a real loss of fidelity against a byte-accurate
//! source map, recorded as a deliberate scope cut in DESIGN.md, not an
//! oversight.

mod expr;
mod numeric;
mod stmt;
mod string_lit;

use crate::ast::Module as InternalModule;
use crate::error::PrintError;
use crate::format::{OutputFormat, QuoteStyle, UnsupportedFeatures};
use crate::import_record::ImportRecord;
use crate::source::SourceIndex;
use crate::sourcemap::SourceMapState;
use crate::symbol::{Ref, SymbolMap};

#[derive(Debug, Clone)]
pub struct PrintOptions {
    pub format: OutputFormat,
    pub quote_style: QuoteStyle,
    pub unsupported_features: UnsupportedFeatures,
    /// Omits the indentation and blank lines a human-authored file would have
    /// (spec.md §6 `--minify-whitespace`). Newlines between statements are
    /// kept even when set, since the printer still needs one generated line
    /// per mapped statement for the source map to stay meaningful.
    pub minify_whitespace: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            quote_style: QuoteStyle::default(),
            unsupported_features: UnsupportedFeatures::default(),
            minify_whitespace: false,
        }
    }
}

/// Everything the printer needs to know about the wider build that isn't
/// carried in the module it's printing: symbol resolution, the target of
/// every `import`/`require`, and this module's place in the output ordering.
pub struct PrintContext<'a> {
    pub symbols: &'a SymbolMap,
    pub import_records: &'a [ImportRecord],
    pub source_index_to_output_index: &'a [u32],
    pub own_source_index: SourceIndex,
    pub source_text: &'a str,
    pub options: &'a PrintOptions,
}

/// One module's printed output: generated JS plus a self-contained VLQ
/// mapping stream whose deltas all assume a zero starting state (spec.md
/// §4.3) — joining many chunks into one bundle-wide stream is
/// [`crate::sourcemap::append_source_map_chunk`]'s job, not this one's.
pub struct PrintChunk {
    pub js: Vec<u8>,
    pub mappings: Vec<u8>,
    pub end_state: SourceMapState,
}

/// Byte-offset -> (line, UTF-16 column) lookup over one source file's text,
/// built once per module printed (spec.md §4.3 "original_line"/
/// "original_column" are UTF-16-code-unit positions, matching the source map
/// spec everyone else's tooling already assumes).
struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<u32>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { text, line_starts }
    }

    fn line_col(&self, offset: u32) -> (i32, i32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line];
        let prefix = self.text.get(line_start as usize..offset as usize).unwrap_or("");
        let col: i32 = prefix.chars().map(|c| c.len_utf16() as i32).sum();
        (line as i32, col)
    }
}

pub(crate) struct Printer<'a> {
    ctx: &'a PrintContext<'a>,
    line_index: LineIndex<'a>,
    js: Vec<u8>,
    mappings: Vec<u8>,
    prev_mark: SourceMapState,
    last_mapping_byte: Option<u8>,
    pending_newlines: i32,
    total_generated_lines: i32,
    current_generated_column: i32,
    indent: u32,
}

impl<'a> Printer<'a> {
    fn new(ctx: &'a PrintContext<'a>) -> Self {
        Self {
            ctx,
            line_index: LineIndex::new(ctx.source_text),
            js: Vec::new(),
            mappings: Vec::new(),
            prev_mark: SourceMapState::default(),
            last_mapping_byte: None,
            pending_newlines: 0,
            total_generated_lines: 0,
            current_generated_column: 0,
            indent: 0,
        }
    }

    fn write(&mut self, s: &str) {
        self.js.extend_from_slice(s.as_bytes());
        for ch in s.chars() {
            if ch == '\n' {
                self.total_generated_lines += 1;
                self.pending_newlines += 1;
                self.current_generated_column = 0;
            } else {
                self.current_generated_column += ch.len_utf16() as i32;
            }
        }
    }

    fn newline(&mut self) {
        self.write("\n");
        if !self.ctx.options.minify_whitespace {
            for _ in 0..self.indent {
                self.write("  ");
            }
        }
    }

    /// Anchors the next bytes written to `orig_start_byte` in this module's
    /// own source (spec.md §4.3). Called once per top-level statement
    /// (coarse granularity, see module docs).
    fn mark(&mut self, orig_start_byte: u32) {
        let (orig_line, orig_col) = self.line_index.line_col(orig_start_byte);
        if self.pending_newlines > 0 {
            for _ in 0..self.pending_newlines {
                self.mappings.push(b';');
            }
            self.prev_mark.generated_column = 0;
            self.last_mapping_byte = Some(b';');
            self.pending_newlines = 0;
        }
        let current = SourceMapState {
            generated_line: 0,
            generated_column: self.current_generated_column,
            source_index: self.ctx.own_source_index as i32,
            original_line: orig_line,
            original_column: orig_col,
        };
        let last = crate::sourcemap::append_mapping(&mut self.mappings, self.last_mapping_byte, &mut self.prev_mark, &current);
        self.last_mapping_byte = Some(last);
    }

    fn finish(self) -> PrintChunk {
        PrintChunk {
            js: self.js,
            mappings: self.mappings,
            end_state: SourceMapState {
                generated_line: self.total_generated_lines,
                generated_column: self.current_generated_column,
                ..Default::default()
            },
        }
    }

    /// Writes whatever name the printer should use for `r`: the symbol's own
    /// name, or `ns.alias` when the Binder recorded a namespace alias for it
    /// (spec.md §4.7 "cross-group named import becomes a namespace alias").
    ///
    /// This printer does not run a whole-bundle renaming pass, so two
    /// distinct top-level bindings with the same source name that end up in
    /// the same generated scope (spec.md §4.8 "modules sharing a group share
    /// one generated scope") will collide in the printed output exactly as
    /// they would if hand-written that way. A real cross-module renamer is
    /// recorded as a known gap rather than worked around here (see
    /// DESIGN.md).
    fn print_symbol_ref(&mut self, r: Ref) {
        let resolved = self.ctx.symbols.follow_ro(r);
        let symbol = self.ctx.symbols.get(resolved);
        if let Some(alias) = &symbol.namespace_alias {
            let ns_ref = alias.namespace_ref;
            let alias_string = alias.alias_string.clone();
            self.print_symbol_ref(ns_ref);
            self.write(".");
            self.write(&alias_string);
            return;
        }
        let name = symbol.name.clone();
        self.write(&name);
    }
}

/// Prints one module's bound statement list. `module.parts[0].starts` gives
/// each top-level statement's original byte offset (0 for anything the
/// Binder synthesized, see `ast::Part` docs).
pub fn print_module<'a>(module: &InternalModule, ctx: &'a PrintContext<'a>) -> Result<PrintChunk, PrintError> {
    let mut printer = Printer::new(ctx);
    let stmts = &module.parts[0].stmts;
    let starts = &module.parts[0].starts;
    for (i, stmt) in stmts.iter().enumerate() {
        printer.mark(starts.get(i).copied().unwrap_or(0));
        printer.print_stmt(stmt)?;
    }
    Ok(printer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expr::NumericLiteral;
    use crate::ast::stmt::{VarDeclarator, VarKind};
    use crate::ast::{Expr, Module, Part, Pattern, Stmt};
    use crate::import_record::ImportRecordKind;
    use crate::symbol::SymbolKind;

    fn ctx_for<'a>(
        symbols: &'a SymbolMap,
        records: &'a [ImportRecord],
        output_index: &'a [u32],
        source_text: &'a str,
        options: &'a PrintOptions,
    ) -> PrintContext<'a> {
        PrintContext {
            symbols,
            import_records: records,
            source_index_to_output_index: output_index,
            own_source_index: 0,
            source_text,
            options,
        }
    }

    #[test]
    fn prints_a_const_declaration_with_a_numeric_initializer() {
        let mut symbols = SymbolMap::new();
        let x = symbols.new_symbol(0, "x", SymbolKind::Other);
        symbols.follow_all_symbols();

        let module = Module {
            parts: vec![Part {
                stmts: vec![Stmt::VarDecl {
                    kind: VarKind::Const,
                    declarators: vec![VarDeclarator { pattern: Pattern::Identifier(x), init: Some(Expr::Numeric(NumericLiteral(1.0))) }],
                }],
                starts: vec![0],
            }],
            ..Default::default()
        };

        let options = PrintOptions::default();
        let ctx = ctx_for(&symbols, &[], &[], "const x = 1;", &options);
        let chunk = print_module(&module, &ctx).unwrap();
        let text = String::from_utf8(chunk.js).unwrap();
        assert_eq!(text.trim(), "const x = 1;");
    }

    #[test]
    fn wraps_a_sequence_expression_initializer_in_parens_only_when_needed() {
        let mut symbols = SymbolMap::new();
        symbols.follow_all_symbols();
        let module = Module {
            parts: vec![Part {
                stmts: vec![Stmt::Expr(Expr::Call {
                    callee: Box::new(Expr::Identifier(symbols_ref(&mut symbols))),
                    arguments: vec![],
                    optional: false,
                    is_chain_continuation: false,
                })],
                starts: vec![0],
            }],
            ..Default::default()
        };
        let options = PrintOptions::default();
        let ctx = ctx_for(&symbols, &[], &[], "f();", &options);
        let chunk = print_module(&module, &ctx).unwrap();
        let text = String::from_utf8(chunk.js).unwrap();
        assert!(text.contains("f()"));
    }

    fn symbols_ref(symbols: &mut SymbolMap) -> Ref {
        symbols.new_symbol(0, "f", SymbolKind::Other)
    }

    #[test]
    fn object_literal_expression_statement_gets_wrapped_in_parens() {
        let symbols = SymbolMap::new();
        let module = Module {
            parts: vec![Part {
                stmts: vec![Stmt::Expr(Expr::Object(vec![]))],
                starts: vec![0],
            }],
            ..Default::default()
        };
        let options = PrintOptions::default();
        let ctx = ctx_for(&symbols, &[], &[], "({});", &options);
        let chunk = print_module(&module, &ctx).unwrap();
        let text = String::from_utf8(chunk.js).unwrap();
        assert!(text.trim_start().starts_with('('), "expected a leading paren, got {text:?}");
    }

    #[test]
    fn require_to_an_internal_module_is_rewritten_to_its_output_index() {
        let symbols = SymbolMap::new();
        let mut record = ImportRecord::new(ImportRecordKind::Require, "./m");
        record.resolved_source_index = Some(1);
        let records = vec![record];
        let module = Module {
            parts: vec![Part {
                stmts: vec![Stmt::Expr(Expr::Require { import_record_index: 0 })],
                starts: vec![0],
            }],
            ..Default::default()
        };
        let options = PrintOptions::default();
        let output_index = vec![0u32, 3u32];
        let ctx = ctx_for(&symbols, &records, &output_index, "require('./m');", &options);
        let chunk = print_module(&module, &ctx).unwrap();
        let text = String::from_utf8(chunk.js).unwrap();
        assert!(text.contains("require(3)"), "got {text:?}");
    }
}
