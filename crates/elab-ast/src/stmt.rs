//! The statement family.

use crate::decl::Decl;
use crate::expr::{Expr, UnsupportedNode};

#[derive(Clone, Debug)]
pub enum Stmt {
    Compound(Vec<Stmt>),
    Expr(Expr),
    If {
        constexpr_if: bool,
        init: Option<Box<Stmt>>,
        cond_var: Option<Box<Decl>>,
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    Do {
        body: Box<Stmt>,
        cond: Expr,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        inc: Option<Expr>,
        body: Box<Stmt>,
    },
    RangeFor(Box<RangeForStmt>),
    Switch {
        init: Option<Box<Stmt>>,
        cond_var: Option<Box<Decl>>,
        cond: Expr,
        body: Box<Stmt>,
    },
    Case {
        value: Expr,
        sub: Box<Stmt>,
    },
    Default(Box<Stmt>),
    Break,
    Continue,
    Return(Option<Expr>),
    Decl(Vec<Decl>),
    Null,
    Unsupported(UnsupportedNode),
}

/// A range-iteration statement as resolved by the front end: the implicit
/// range/begin/end declarations, the per-iteration condition and increment
/// that reference them, and the loop-variable declaration, all materialized
/// as ordinary nodes.
#[derive(Clone, Debug)]
pub struct RangeForStmt {
    /// `auto && __range = <range-expr>;`
    pub range_stmt: Stmt,
    /// `auto __begin = __range.begin();` (or the free/array form)
    pub begin_stmt: Stmt,
    /// `auto __end = __range.end();`
    pub end_stmt: Stmt,
    /// `__begin != __end`
    pub cond: Expr,
    /// `++__begin`
    pub inc: Expr,
    /// `<decl> = *__begin;`
    pub loop_var: Decl,
    pub body: Box<Stmt>,
}
