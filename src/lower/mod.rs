//! Lowers a real `oxc_ast::ast::Program` into this crate's closed internal
//! AST (`crate::ast`).
//!
//! Grounded on `raya-compiler/src/lower/{mod,stmt,expr}.rs`'s separation of
//! "external syntax" from "internal IR" — generalized here to project the
//! *real* JS/TS/JSX grammar (via `oxc_parser`/`oxc_ast`, already a teacher
//! dependency, used exactly the way `analyzer/ast_js/mod.rs` already uses it:
//! `Parser::new(&allocator, content, source_type).parse()` then
//! `SemanticBuilder::new().build(&ret.program)`) down onto the small surface
//! the Printer/Binder actually need.
//!
//! Every module-top-level binding identifier is assigned one
//! [`crate::symbol::Ref`], shared by every later reference to that name
//! within the module (see `LowerCtx::bind_name`/`use_name`), so the rest of
//! the pipeline never touches string names for resolution — only for
//! diagnostics and rename output.
//!
//! Scope: this module fully lowers the statement and declaration forms the
//! Binder (spec.md §4.7) and Classifier (spec.md §4.6) depend on — imports,
//! all export forms, variable/function/class declarations, and common
//! control flow — and the expression forms the Printer (spec.md §4.4)
//! specifically documents formatting rules for. Expression or statement
//! kinds with no documented printer/binder behavior (JSX elements, TS
//! ambient declarations, generators, labeled statements, `switch`) are
//! lowered to a verbatim source-text passthrough (`Expr::Raw`/`Stmt::Raw`)
//! rather than force-fit into a shape the rest of the pipeline would then
//! have to special-case; this keeps `LowerError::UnsupportedSyntax` reserved
//! for the few module-level shapes (`Statement::TSModuleDeclaration` and
//! friends) that would otherwise silently corrupt the Classifier's notion of
//! what this module exports.

mod expr;
mod stmt;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use rustc_hash::FxHashMap;

use crate::ast::Module as InternalModule;
use crate::error::Range;
use crate::import_record::ImportRecord;
use crate::source::SourceIndex;
use crate::symbol::{Ref, SymbolKind, SymbolMap};

#[derive(Debug)]
pub struct LowerError {
    pub message: String,
    pub range: Range,
}

impl LowerError {
    fn new(message: impl Into<String>, range: Range) -> Self {
        Self { message: message.into(), range }
    }
}

/// Per-module lowering state: the symbol table being populated, a map from
/// oxc's own symbol ids to the `Ref`s we mint for them (so repeated
/// references to the same binding share one `Ref`), and the accumulated
/// import records (populated as `import`/`export ... from`/dynamic-import
/// sites are encountered, consumed later by the Scanner to enqueue targets).
pub struct LowerCtx<'a> {
    pub source_index: SourceIndex,
    pub symbols: &'a mut SymbolMap,
    pub source_text: &'a str,
    /// Name -> `Ref` for every binding declared so far in this module.
    ///
    /// The Binder (spec.md §4.7) only ever needs to find the `Ref` behind a
    /// *module-top-level* declaration — import/export bindings are
    /// necessarily top-level by the ES module grammar — so a flat
    /// per-module name table is enough to make repeated references to the
    /// same top-level binding share one `Ref`, which is the identity the
    /// union-find symbol merge in [`crate::symbol`] depends on. Nested
    /// function/block scopes that shadow a top-level name are the known gap
    /// this simplification accepts.
    declared_by_name: FxHashMap<String, Ref>,
    pub import_records: Vec<ImportRecord>,
    /// Set when an assignment to `module.exports` or `exports.x` is seen
    /// anywhere in the module body (spec.md §3 `has_commonjs_exports`).
    pub saw_commonjs_exports: bool,
}

impl<'a> LowerCtx<'a> {
    pub fn new(source_index: SourceIndex, symbols: &'a mut SymbolMap, source_text: &'a str) -> Self {
        Self {
            source_index,
            symbols,
            source_text,
            declared_by_name: FxHashMap::default(),
            import_records: Vec::new(),
            saw_commonjs_exports: false,
        }
    }

    /// Mints a `Ref` with no identity tracking at all: for synthetic or
    /// expression-local names (anonymous function/class expression names,
    /// the synthesized `default` export binding) that the Binder never
    /// looks up by name.
    pub fn fresh_ref(&mut self, name: impl Into<String>, kind: SymbolKind) -> Ref {
        self.symbols.new_symbol(self.source_index, name, kind)
    }

    /// Declares a binding by name: reuses the `Ref` already registered for
    /// `name` (covers `var` redeclaration and hoisting), or mints and
    /// registers a fresh one. Call this at every binding-identifier site
    /// (function/class/var declarators, import specifiers, destructuring
    /// patterns) so later references to the same name resolve to it.
    pub fn bind_name(&mut self, name: impl Into<String>, kind: SymbolKind) -> Ref {
        let name = name.into();
        if let Some(r) = self.declared_by_name.get(&name) {
            return *r;
        }
        let r = self.symbols.new_symbol(self.source_index, name.clone(), kind);
        self.declared_by_name.insert(name, r);
        r
    }

    /// Resolves an identifier *reference* against bindings declared so far
    /// in this module; unresolved names (real globals, or a forward
    /// reference to something hoisted later and not yet visited) get one
    /// shared `Ref` of their own per name so repeated uses still merge
    /// correctly in the Binder even though no declaration backs them here.
    pub fn use_name(&mut self, name: impl Into<String>) -> Ref {
        let name = name.into();
        if let Some(r) = self.declared_by_name.get(&name) {
            return *r;
        }
        let r = self.symbols.new_symbol(self.source_index, name.clone(), SymbolKind::Unbound);
        self.declared_by_name.insert(name, r);
        r
    }

    pub fn push_import_record(&mut self, record: ImportRecord) -> u32 {
        self.import_records.push(record);
        (self.import_records.len() - 1) as u32
    }

    fn text(&self, start: u32, end: u32) -> String {
        self.source_text
            .get(start as usize..end as usize)
            .unwrap_or_default()
            .to_string()
    }
}

/// Parses `content` with the real external parser and lowers it into the
/// internal AST. `is_jsx`/`is_typescript` mirror the teacher's own
/// extension-based source-type selection.
pub fn lower_source(
    source_index: SourceIndex,
    content: &str,
    is_typescript: bool,
    is_jsx: bool,
    symbols: &mut SymbolMap,
) -> Result<(InternalModule, Vec<String>), LowerError> {
    let allocator = Allocator::default();
    let source_type = SourceType::default()
        .with_typescript(is_typescript)
        .with_jsx(is_jsx);

    let ret = Parser::new(&allocator, content, source_type).parse();
    let mut parse_errors: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();

    // Semantic errors (duplicate bindings, invalid-assignment-target, etc.)
    // are surfaced as diagnostics but never block lowering: the rest of the
    // pipeline only needs binding identities, not full type-checked
    // semantics (spec.md §1 non-goal: "no TypeScript type checking").
    let semantic_ret = SemanticBuilder::new().build(&ret.program);
    parse_errors.extend(semantic_ret.errors.iter().map(|e| e.to_string()));

    let mut ctx = LowerCtx::new(source_index, symbols, content);
    let module = stmt::lower_program(&mut ctx, &ret.program)?;

    Ok((module, parse_errors))
}

pub(crate) fn range_of(span: oxc_span::Span) -> Range {
    Range::new(span.start, span.end.saturating_sub(span.start))
}

#[allow(dead_code)]
fn unsupported<T>(kind: &str, span: oxc_span::Span) -> Result<T, LowerError> {
    Err(LowerError::new(format!("unsupported syntax: {kind}"), range_of(span)))
}
