//! The fully resolved abstract syntax tree consumed by the elab generator.
//!
//! Everything here is produced by an external front end: names are resolved,
//! overloads are picked, templates are instantiated, and every expression
//! carries its sugar-free static type. The generator only reads this tree.
//!
//! Two closed variant families exist — [`Stmt`] and [`Decl`] — with [`Expr`]
//! as a refinement of statements (an expression can stand where a statement
//! can). Each family carries an `Unsupported` escape variant for node kinds
//! outside the generator's scope; those are rendered as visible placeholder
//! markers, never as hard failures.

pub mod decl;
pub mod expr;
pub mod ops;
pub mod stmt;
pub mod types;

pub use decl::{
    Access, AliasDecl, BaseSpec, BindingDecl, BindingMode, CtorInit, Decl, DecompositionDecl,
    FieldDecl, FunctionDecl, MethodDecl, MethodKind, MethodQuals, Param, RecordDecl,
    StaticAssertDecl, UsingDecl, VarDecl, VarQuals,
};
pub use expr::{
    Capture, CaptureKind, CharEncoding, DeclRef, Expr, LambdaClass, LambdaExpr, MemberExpr,
    OperatorCallExpr, RefDeclKind, TemplateArg, TraitArg, TraitKind, UnsupportedNode,
};
pub use ops::{BinOp, CastKind, NamedCastKind, OverloadedOp, UnOp};
pub use stmt::{RangeForStmt, Stmt};
pub use types::{BuiltinKind, TypeFlags, TypeRef};
