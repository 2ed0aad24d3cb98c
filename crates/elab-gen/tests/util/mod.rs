//! Shared AST-building helpers for the generator integration tests.

#![allow(dead_code)]

use elab_ast::{
    BuiltinKind, Decl, DeclRef, Expr, RefDeclKind, Stmt, TypeFlags, TypeRef, VarDecl,
};
use elab_common::{SourceLoc, SourceMap};
use elab_gen::{CodeGenerator, GenContext, GenOutput};

/// A small synthetic source file; offsets into it drive the deterministic
/// name generation in tests. Line N starts at offset (N - 1) * 40.
pub fn source_map() -> SourceMap {
    let line = "x".repeat(39);
    let text = (0..20).map(|_| line.clone() + "\n").collect::<String>();
    SourceMap::new("test.cpp", &text)
}

/// Offset of (1-based) `line`/`column` in the synthetic source file.
pub fn loc(line: u32, column: u32) -> SourceLoc {
    SourceLoc((line - 1) * 40 + (column - 1))
}

pub fn lower_stmt(map: &SourceMap, stmt: &Stmt) -> GenOutput {
    let ctx = GenContext::new(map);
    let mut generator = CodeGenerator::new(&ctx);
    generator.emit_stmt(stmt);
    generator.finish()
}

pub fn lower_decl(map: &SourceMap, decl: &Decl) -> GenOutput {
    let ctx = GenContext::new(map);
    let mut generator = CodeGenerator::new(&ctx);
    generator.emit_decl(decl);
    generator.finish()
}

pub fn lower_expr(map: &SourceMap, expr: &Expr) -> GenOutput {
    let ctx = GenContext::new(map);
    let mut generator = CodeGenerator::new(&ctx);
    generator.emit_expr(expr);
    generator.finish()
}

// =============================================================================
// Expression builders
// =============================================================================

pub fn declref(name: &str) -> Expr {
    Expr::DeclRef(DeclRef::new(name))
}

pub fn funcref(name: &str) -> Expr {
    Expr::DeclRef(DeclRef {
        name: name.to_string(),
        decl_kind: RefDeclKind::Function,
        template_args: Vec::new(),
    })
}

pub fn methodref(name: &str) -> Expr {
    Expr::DeclRef(DeclRef {
        name: name.to_string(),
        decl_kind: RefDeclKind::Method,
        template_args: Vec::new(),
    })
}

pub fn int(value: i128) -> Expr {
    Expr::IntLit {
        value,
        ty: TypeRef::builtin(BuiltinKind::Int),
    }
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call {
        callee: Box::new(callee),
        args,
        udl_args: None,
    }
}

// =============================================================================
// Type builders
// =============================================================================

pub fn int_ty() -> TypeRef {
    TypeRef::builtin(BuiltinKind::Int)
}

pub fn ref_ty(text: &str) -> TypeRef {
    TypeRef::named(text).with_flags(TypeFlags::REFERENCE)
}

// =============================================================================
// Declaration builders
// =============================================================================

pub fn var(name: &str, ty: TypeRef, init: Expr) -> Decl {
    Decl::Var(VarDecl::new(name, ty).with_init(init))
}

pub fn decl_stmt(decl: Decl) -> Stmt {
    Stmt::Decl(vec![decl])
}
