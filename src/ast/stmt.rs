//! Statement variants. Import/export forms are kept distinct (rather than
//! desugared during lowering) because the Binder needs to see the original
//! declaration shape to record binding pairs and exports entries (spec.md
//! §4.7) before rewriting them away.

use crate::error::Range;
use crate::symbol::Ref;

use super::{Expr, Pattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone)]
pub struct VarDeclarator {
    pub pattern: Pattern,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct ImportSpecifier {
    pub imported_name: ImportedName,
    pub local_ref: Ref,
}

#[derive(Debug, Clone)]
pub enum ImportedName {
    /// `import x from './m'`
    Default,
    /// `import * as ns from './m'`
    Namespace,
    /// `import {a as b} from './m'`
    Named(String),
}

#[derive(Debug, Clone)]
pub struct ExportSpecifier {
    pub local_name: String,
    pub exported_name: String,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expr(Expr),
    VarDecl {
        kind: VarKind,
        declarators: Vec<VarDeclarator>,
    },
    FunctionDecl {
        name_ref: Ref,
        params: Vec<super::expr::Param>,
        body: Vec<Stmt>,
        is_async: bool,
        is_generator: bool,
    },
    ClassDecl {
        name_ref: Ref,
        super_class: Option<Expr>,
        body_source: String,
    },
    Return(Option<Expr>),
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    Block(Vec<Stmt>),
    Throw(Expr),
    Try {
        block: Vec<Stmt>,
        handler: Option<(Option<Pattern>, Vec<Stmt>)>,
        finalizer: Option<Vec<Stmt>>,
    },
    For {
        init: Option<Box<Stmt>>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    While {
        test: Expr,
        body: Box<Stmt>,
    },
    Break(Option<String>),
    Continue(Option<String>),
    Empty,

    /// `import ... from "path"`, not yet rewritten by the Binder.
    Import {
        import_record_index: u32,
        specifiers: Vec<ImportSpecifier>,
    },
    /// `export {a, b as c}` with no source, or `export {a} from "path"`.
    ExportNamed {
        import_record_index: Option<u32>,
        specifiers: Vec<ExportSpecifier>,
    },
    /// `export * from "path"`.
    ExportStar { import_record_index: u32 },
    /// `export * as ns from "path"`.
    ExportStarAs { import_record_index: u32, alias: String },
    /// `export default <expr>` or `export default function/class ...`.
    ExportDefault { default_ref: Ref, value: ExportDefaultValue },
    /// `export const x = ...` / `export function f() {}` / `export class C {}`.
    ExportDecl(Box<Stmt>),

    /// A statement slot reserved by the Binder (spec.md §4.7 "Reserves two
    /// leading slots"), filled in later or discarded if unused.
    ReservedSlot,

    /// Verbatim text, used only for the bootstrap prelude and for lowering
    /// escape hatches the printer doesn't need to understand structurally
    /// (e.g. ambient TypeScript declarations erased at parse time).
    Raw(String),
}

#[derive(Debug, Clone)]
pub enum ExportDefaultValue {
    Expr(Expr),
    Function {
        params: Vec<super::expr::Param>,
        body: Vec<Stmt>,
        is_async: bool,
        is_generator: bool,
    },
    Class {
        super_class: Option<Expr>,
        body_source: String,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct StmtRange {
    pub range: Range,
}
