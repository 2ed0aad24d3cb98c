//! The expression family.
//!
//! Expressions are a refinement of statements: any `Expr` can appear where a
//! `Stmt` is expected through [`crate::Stmt::Expr`]. Implicit nodes the
//! front end materializes (casts, temporaries, cleanups) are kept in the tree
//! so the generator can decide per kind whether they become visible text.

use elab_common::SourceLoc;

use crate::decl::MethodDecl;
use crate::ops::{BinOp, CastKind, NamedCastKind, OverloadedOp, UnOp};
use crate::types::TypeRef;

#[derive(Clone, Debug)]
pub enum Expr {
    IntLit { value: i128, ty: TypeRef },
    FloatLit { spelling: String, ty: TypeRef },
    BoolLit(bool),
    CharLit { value: u32, encoding: CharEncoding },
    /// Pre-rendered string literal, quotes and escapes included.
    StringLit { spelling: String },
    NullPtr,
    GnuNull,
    /// `__func__` and friends; carries the function-name literal.
    Predefined(Box<Expr>),
    DeclRef(DeclRef),
    UnresolvedLookup { name: String },
    Member(MemberExpr),
    Call { callee: Box<Expr>, args: Vec<Expr>, udl_args: Option<Vec<TemplateArg>> },
    MemberCall { callee: Box<Expr>, args: Vec<Expr> },
    OperatorCall(OperatorCallExpr),
    Construct { ty: TypeRef, args: Vec<Expr>, list_init: bool },
    FunctionalCast { ty_as_written: TypeRef, sub: Box<Expr>, paren_form: bool },
    InitList(Vec<Expr>),
    StdInitList { ty: TypeRef, sub: Box<Expr> },
    DefaultArg(Box<Expr>),
    DefaultInit(Box<Expr>),
    Lambda(Box<LambdaExpr>),
    This { implicit: bool },
    Paren(Box<Expr>),
    Unary { op: UnOp, sub: Box<Expr> },
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Conditional { cond: Box<Expr>, then_expr: Box<Expr>, else_expr: Box<Expr> },
    Subscript { lhs: Box<Expr>, rhs: Box<Expr> },
    /// Element-wise array copy materialized by the front end; `sub` contains
    /// an [`Expr::ArrayInitIndex`] placeholder for the running index.
    ArrayInitLoop { source: Box<Expr>, size: u64, sub: Box<Expr> },
    ArrayInitIndex,
    OpaqueValue(Box<Expr>),
    ImplicitCast { kind: CastKind, ty: TypeRef, sub: Box<Expr> },
    NamedCast { cast: NamedCastKind, kind: CastKind, ty: TypeRef, sub: Box<Expr> },
    CStyleCast { kind: CastKind, ty: TypeRef, sub: Box<Expr> },
    SizeofAlignof { trait_kind: TraitKind, arg: TraitArg },
    Typeid(TraitArg),
    New {
        placement: Vec<Expr>,
        ty: TypeRef,
        construct: Option<Box<Expr>>,
        array_size: Option<Box<Expr>>,
        init: Option<Box<Expr>>,
    },
    Delete { array_form: bool, arg: Box<Expr> },
    MaterializeTemporary(Box<Expr>),
    BindTemporary(Box<Expr>),
    WithCleanups(Box<Expr>),
    SubstTemplateParam(Box<Expr>),
    Unsupported(UnsupportedNode),
}

/// What kind of entity a name reference resolved to. Operator-call rewriting
/// needs to distinguish member operators from free functions and from
/// references that are neither.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RefDeclKind {
    Var,
    Function,
    Method,
    Other,
}

#[derive(Clone, Debug)]
pub struct DeclRef {
    /// Possibly qualified name; empty for references to unnamed entities such
    /// as the invisible object behind a decomposition declaration.
    pub name: String,
    pub decl_kind: RefDeclKind,
    pub template_args: Vec<TemplateArg>,
}

impl DeclRef {
    pub fn new(name: impl Into<String>) -> Self {
        DeclRef {
            name: name.into(),
            decl_kind: RefDeclKind::Var,
            template_args: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MemberExpr {
    pub base: Box<Expr>,
    pub arrow: bool,
    pub name: String,
    /// Set when the member is a closure class conversion; the member is then
    /// rendered through the closure's `retType` alias instead of `name`.
    pub lambda_conversion_loc: Option<SourceLoc>,
    pub template_args: Vec<TemplateArg>,
}

#[derive(Clone, Debug)]
pub struct OperatorCallExpr {
    pub op: OverloadedOp,
    /// Reference to the resolved `operator` function itself.
    pub callee: Box<Expr>,
    /// For member operators the first argument is the receiver object.
    pub args: Vec<Expr>,
}

/// A resolved template argument.
#[derive(Clone, Debug)]
pub enum TemplateArg {
    Type(TypeRef),
    /// A declaration argument, rendered through its function-pointer type.
    Decl(TypeRef),
    Expr(Expr),
    Integral(i128),
    Pack(Vec<TemplateArg>),
    Template(String),
    NullPtr(TypeRef),
    Null,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraitKind {
    SizeOf,
    AlignOf,
}

impl TraitKind {
    pub fn spelling(self) -> &'static str {
        match self {
            TraitKind::SizeOf => "sizeof",
            TraitKind::AlignOf => "alignof",
        }
    }
}

/// Type-or-expression operand of `sizeof`, `alignof`, and `typeid`.
#[derive(Clone, Debug)]
pub enum TraitArg {
    Type(TypeRef),
    Expr(Box<Expr>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CharEncoding {
    Plain,
    Wide,
    Utf8,
    Utf16,
    Utf32,
}

impl CharEncoding {
    pub fn prefix(self) -> &'static str {
        match self {
            CharEncoding::Plain => "",
            CharEncoding::Wide => "L",
            CharEncoding::Utf8 => "u8",
            CharEncoding::Utf16 => "u",
            CharEncoding::Utf32 => "U",
        }
    }
}

/// A node kind outside the supported set, carried through so the generator
/// can mark the spot and keep going.
#[derive(Clone, Debug)]
pub struct UnsupportedNode {
    pub kind: String,
    pub loc: SourceLoc,
}

// =============================================================================
// Closures
// =============================================================================

/// How a closure records one captured entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaptureKind {
    This,
    StarThis,
    ByCopy,
    ByRef,
    /// Variably-modified type captures; not representable as a field.
    VlaType,
}

#[derive(Clone, Debug)]
pub struct Capture {
    pub kind: CaptureKind,
    /// Captured variable name; `None` for `this` and VLA captures.
    pub name: Option<String>,
    /// The captured entity's type: the pointer type for `this`, the pointee
    /// type for `*this`, the variable's type otherwise.
    pub ty: TypeRef,
    /// Explicit initializer for init-captures (`[x = expr]`). This is the
    /// same expression the enclosing statement references; it is owned here.
    pub init: Option<Expr>,
}

/// The members the front end synthesized for one closure class.
#[derive(Clone, Debug, Default)]
pub struct LambdaClass {
    /// Function-pointer conversion operators; generic closures carry one
    /// entry per deduced specialization.
    pub conversions: Vec<MethodDecl>,
    /// Call operators; generic closures carry one entry per specialization.
    pub call_operators: Vec<MethodDecl>,
    /// Static invokers backing the conversion operators.
    pub static_invokers: Vec<MethodDecl>,
}

#[derive(Clone, Debug)]
pub struct LambdaExpr {
    pub loc: SourceLoc,
    pub is_generic: bool,
    pub captures: Vec<Capture>,
    pub class: LambdaClass,
}

// =============================================================================
// Implicit-node stripping
// =============================================================================

impl Expr {
    /// Look through implicit casts only.
    pub fn strip_implicit_casts(&self) -> &Expr {
        let mut expr = self;
        while let Expr::ImplicitCast { sub, .. } = expr {
            expr = sub;
        }
        expr
    }

    /// Look through every node the front end inserted without source
    /// spelling: implicit casts, temporary materialization and binding, and
    /// cleanup wrappers.
    pub fn ignore_implicit(&self) -> &Expr {
        let mut expr = self;
        loop {
            match expr {
                Expr::ImplicitCast { sub, .. }
                | Expr::MaterializeTemporary(sub)
                | Expr::BindTemporary(sub)
                | Expr::WithCleanups(sub) => expr = sub,
                _ => return expr,
            }
        }
    }

    /// Look through casts of every spelling, implicit and explicit.
    pub fn ignore_casts(&self) -> &Expr {
        let mut expr = self;
        loop {
            match expr {
                Expr::ImplicitCast { sub, .. }
                | Expr::NamedCast { sub, .. }
                | Expr::CStyleCast { sub, .. } => expr = sub,
                _ => return expr,
            }
        }
    }
}
