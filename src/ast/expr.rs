//! Expression variants the Printer (spec.md §4.4) and Binder (spec.md §4.7)
//! need to recognize or synthesize. Anything the lowering pass encounters
//! that has no variant here becomes `LowerError::UnsupportedSyntax` instead
//! of being force-fit into an `Opaque` bucket — the one exception is
//! [`Expr::Raw`], used only for synthesized runtime-helper snippets the
//! Linker's bootstrap prelude needs verbatim (spec.md §4.8 step 3), never
//! for user source.

use crate::import_record::ImportRecordKind;
use crate::symbol::Ref;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    Plus,
    Not,
    BitNot,
    TypeOf,
    Void,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,
    BitAnd,
    BitOr,
    BitXor,
    In,
    InstanceOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    NullishCoalescing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    PowAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    LogicalAndAssign,
    LogicalOrAssign,
    NullishAssign,
}

/// A floating-point literal, kept as `f64` with the boundary cases the
/// printer's numeric formatter special-cases called out explicitly (spec.md
/// §4.4, testable property 11/12).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericLiteral(pub f64);

#[derive(Debug, Clone)]
pub enum TemplatePart {
    Quasi(String),
    Expr(Box<Expr>),
}

#[derive(Debug, Clone)]
pub struct ObjectProperty {
    pub key: super::PropertyKey,
    pub value: Expr,
    pub shorthand: bool,
    pub computed: bool,
    pub is_method: bool,
    pub is_spread: bool,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub pattern: super::Pattern,
    pub default: Option<Box<Expr>>,
}

#[derive(Debug, Clone)]
pub enum ArrowBody {
    Block(Vec<super::Stmt>),
    Expr(Box<Expr>),
}

#[derive(Debug, Clone)]
pub enum Expr {
    Numeric(NumericLiteral),
    String(String),
    Boolean(bool),
    Null,
    Undefined,
    This,
    Identifier(Ref),

    /// An identifier whose home module lives outside the current group and
    /// must therefore be emitted as `ns.alias` (spec.md §4.7 "indirect
    /// import").
    IndirectImport { namespace_ref: Ref, alias: String },

    Template(Vec<TemplatePart>),

    Array(Vec<Option<Expr>>),
    Object(Vec<ObjectProperty>),

    Unary { op: UnaryOp, operand: Box<Expr> },
    Await(Box<Expr>),
    Yield { argument: Option<Box<Expr>>, delegate: bool },
    Update { op: UpdateOp, operand: Box<Expr>, prefix: bool },
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    Logical { op: LogicalOp, left: Box<Expr>, right: Box<Expr> },
    Assign { op: AssignOp, target: Box<Expr>, value: Box<Expr> },
    Conditional { test: Box<Expr>, consequent: Box<Expr>, alternate: Box<Expr> },
    Sequence(Vec<Expr>),
    Spread(Box<Expr>),

    Member {
        object: Box<Expr>,
        property: MemberProperty,
        optional: bool,
        /// True once an ancestor in the same optional chain already emitted
        /// `?.`; subsequent links use plain `.` (spec.md §4.4 "Optional-chain
        /// propagation").
        is_chain_continuation: bool,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
        optional: bool,
        is_chain_continuation: bool,
    },
    New { callee: Box<Expr>, arguments: Vec<Expr> },

    Arrow {
        params: Vec<Param>,
        body: ArrowBody,
        is_async: bool,
    },
    Function {
        name: Option<Ref>,
        params: Vec<Param>,
        body: Vec<super::Stmt>,
        is_async: bool,
        is_generator: bool,
    },
    Class {
        name: Option<Ref>,
        super_class: Option<Box<Expr>>,
        /// The body is kept as printer-opaque source text; no cross-module
        /// binding ever needs to reach inside a class body for this pipeline
        /// (methods can't be individually tree-shaken here).
        body_source: String,
    },

    /// `import(specifier)` — resolved when `specifier` is a bundled module,
    /// left as a dynamic `import_record_index` lookup otherwise (spec.md
    /// §4.4 "Require / import emission").
    Import { import_record_index: u32 },
    /// `require(specifier)`.
    Require { import_record_index: u32 },

    /// A cross-module reference synthesized by the Binder: call the target
    /// module's wrapper function, or wrap an already-resolved CommonJS
    /// namespace through the runtime's `to_module_ref` helper (spec.md
    /// §4.4 "CommonJS-to-ESM imports are wrapped in the runtime's
    /// `to_module_ref(...)` helper").
    ToModule(Box<Expr>),

    /// Verbatim text for runtime-synthesized snippets (bootstrap prelude
    /// fragments). Never produced by `lower`.
    Raw(String),
}

#[derive(Debug, Clone)]
pub enum MemberProperty {
    Identifier(String),
    PrivateIdentifier(String),
    Computed(Box<Expr>),
}

impl Expr {
    /// Binding-power precedence used by the printer to decide parenthesization
    /// (spec.md §4.4: "wraps itself in `(...)` if its own precedence is <=
    /// `incoming_level`"). Higher binds tighter.
    pub fn precedence(&self) -> u8 {
        use Expr::*;
        match self {
            Sequence(_) => 0,
            Assign { .. } => 1,
            Conditional { .. } => 2,
            Logical { op: LogicalOp::NullishCoalescing, .. } => 3,
            Logical { op: LogicalOp::Or, .. } => 4,
            Logical { op: LogicalOp::And, .. } => 5,
            Binary { op: BinaryOp::BitOr, .. } => 6,
            Binary { op: BinaryOp::BitXor, .. } => 7,
            Binary { op: BinaryOp::BitAnd, .. } => 8,
            Binary { op: BinaryOp::Equal | BinaryOp::NotEqual | BinaryOp::StrictEqual | BinaryOp::StrictNotEqual, .. } => 9,
            Binary { op: BinaryOp::Less | BinaryOp::LessEq | BinaryOp::Greater | BinaryOp::GreaterEq | BinaryOp::In | BinaryOp::InstanceOf, .. } => 10,
            Binary { op: BinaryOp::ShiftLeft | BinaryOp::ShiftRight | BinaryOp::ShiftRightUnsigned, .. } => 11,
            Binary { op: BinaryOp::Add | BinaryOp::Sub, .. } => 12,
            Binary { op: BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod, .. } => 13,
            Binary { op: BinaryOp::Pow, .. } => 14,
            Unary { .. } => 15,
            Await(_) => 15,
            Yield { .. } => 1,
            Update { prefix: true, .. } => 15,
            Update { prefix: false, .. } => 16,
            New { .. } => 17,
            Call { .. } => 16,
            Member { .. } => 18,
            Arrow { .. } => 1,
            ToModule(_) => 16,
            Import { .. } | Require { .. } => 16,
            _ => 20,
        }
    }

    pub fn is_optional_chain(&self) -> bool {
        matches!(
            self,
            Expr::Member { optional: true, .. }
                | Expr::Call { optional: true, .. }
                | Expr::Member { is_chain_continuation: true, .. }
                | Expr::Call { is_chain_continuation: true, .. }
        )
    }

    /// Whether printing this expression at the start of a statement requires
    /// parenthesization (spec.md testable property 13).
    pub fn starts_statement_ambiguously(&self) -> bool {
        matches!(
            self,
            Expr::Object(_) | Expr::Function { .. } | Expr::Class { .. }
        ) || matches!(self, Expr::Arrow { body: ArrowBody::Expr(inner), .. } if inner.starts_statement_ambiguously())
    }
}

pub(crate) fn import_kind_for_call(is_dynamic: bool) -> ImportRecordKind {
    if is_dynamic {
        ImportRecordKind::DynamicImport
    } else {
        ImportRecordKind::Require
    }
}
