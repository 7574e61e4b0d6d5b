//! Internal, closed tagged-variant AST that the Binder and Printer operate
//! over (spec.md §9 "Dynamic dispatch on AST node kinds ... re-architect as a
//! tagged-variant `StmtData`/`ExprData`").
//!
//! The real parser is `oxc_parser`/`oxc_ast` (kept as a dependency exactly as
//! the teacher already uses it — see `crate::lower`), but its AST is a much
//! larger surface than this pipeline needs and is arena-lifetime-bound. This
//! module is the small, owned surface `lower` projects that AST onto; every
//! variant here corresponds to a behavior spec.md §4.4/§4.6/§4.7 actually
//! describes. Nodes the lowering pass doesn't recognize become
//! `LowerError::UnsupportedSyntax` rather than a printer-side panic branch —
//! the exhaustive match below makes an "unknown AST node kind" path
//! structurally unreachable once lowering succeeds.

use crate::error::Range;
use crate::import_record::ImportRecord;
use crate::symbol::Ref;

pub mod expr;
pub mod stmt;

pub use expr::Expr;
pub use stmt::Stmt;

/// One module's statement list plus the cross-cutting facts the Classifier
/// and Binder need (spec.md §3 `AST` contract). `parts` mirrors the source
/// spec's `{parts: [{stmts: [...]}]}` shape; we only ever populate one part
/// per module (the printer's "sequential part graph" is future work this
/// core doesn't need), kept as a `Vec` so Binder statement-slot reservation
/// can still operate per-part the way the contract names it.
#[derive(Debug, Default)]
pub struct Module {
    pub parts: Vec<Part>,
    pub import_records: Vec<ImportRecord>,
    pub has_commonjs_exports: bool,
    pub require_ref: Option<Ref>,
    pub exports_ref: Option<Ref>,
    pub module_ref: Option<Ref>,
    /// True once the Binder has reserved the two leading statement slots
    /// (spec.md §4.7) in this module's first part.
    pub reserved_slots: bool,
}

#[derive(Debug, Default)]
pub struct Part {
    pub stmts: Vec<Stmt>,
    /// Byte offset into the source text where each `stmts[i]` started before
    /// any rewriting, used by the printer to anchor a coarse, one-mapping-
    /// per-statement source map (spec.md §4.3). A statement synthesized by
    /// the Binder (a `require()` binding, a reserved exports slot) carries
    /// the offset of whichever original statement it was emitted next to,
    /// or 0 if there's no good anchor; this is a statement-granularity
    /// simplification, not per-token (see DESIGN.md).
    pub starts: Vec<u32>,
}

/// A destructuring-capable binding target (spec.md §4.7 "for destructuring
/// bindings, walk into the binding pattern").
#[derive(Debug, Clone)]
pub enum Pattern {
    Identifier(Ref),
    Array(Vec<Option<Pattern>>),
    Object(Vec<ObjectPatternProperty>),
    Default(Box<Pattern>, Box<Expr>),
    Rest(Box<Pattern>),
}

#[derive(Debug, Clone)]
pub struct ObjectPatternProperty {
    pub key: PropertyKey,
    pub value: Pattern,
}

#[derive(Debug, Clone)]
pub enum PropertyKey {
    Identifier(String),
    Computed(Box<Expr>),
    StringLiteral(String),
}

/// Every statement carries a [`Range`] so diagnostics and source maps stay
/// attributable back to the original text.
#[derive(Debug, Clone, Copy)]
pub struct Spanned<T> {
    pub node: T,
    pub range: Range,
}
