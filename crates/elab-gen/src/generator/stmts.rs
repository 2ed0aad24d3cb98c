//! Statement lowering routines.

use elab_ast::{Decl, Expr, RangeForStmt, Stmt};

use super::CodeGenerator;
use crate::lambda::LambdaTrigger;
use crate::writer::NoNewLineBefore;

impl CodeGenerator<'_> {
    // =========================================================================
    // Blocks
    // =========================================================================

    pub(crate) fn emit_compound(&mut self, stmts: &[Stmt]) {
        self.open_scope();
        self.emit_compound_body(stmts);
        self.close_scope(NoNewLineBefore::Yes);
    }

    /// Emit a block's statements without opening a scope of our own; used
    /// where the surrounding lowering already opened one.
    pub(crate) fn emit_compound_body(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.emit_stmt(stmt);
            if Self::needs_terminator(stmt) {
                self.line(";");
            }
        }
    }

    /// Statement kinds that terminate themselves; everything else gets the
    /// terminator from the enclosing block.
    fn needs_terminator(stmt: &Stmt) -> bool {
        !matches!(stmt, Stmt::If { .. } | Stmt::For { .. } | Stmt::Decl(_))
    }

    // =========================================================================
    // Branches
    // =========================================================================

    pub(crate) fn emit_if(
        &mut self,
        constexpr_if: bool,
        init: Option<&Stmt>,
        cond_var: Option<&Decl>,
        cond: &Expr,
        then_branch: &Stmt,
        else_branch: Option<&Stmt>,
    ) {
        // An init-statement or condition variable needs its own enclosing
        // scope so its lifetime matches the original.
        let has_init = init.is_some() || cond_var.is_some();
        if has_init {
            self.open_scope();
            if let Some(cond_var) = cond_var {
                self.emit_decl(cond_var);
            }
            self.emit_opt_stmt(init);
        }

        self.write("if");
        if constexpr_if {
            self.write(" constexpr");
        }
        self.wrap_parens(true, |g| g.emit_expr(cond));

        self.emit_stmt(then_branch);
        let body_braced = matches!(then_branch, Stmt::Compound(_));
        if !body_braced && !matches!(then_branch, Stmt::Null) {
            self.line(";");
        }

        if let Some(else_branch) = else_branch {
            if body_braced {
                self.write(" ");
            }
            self.write("else ");
            if constexpr_if {
                self.write("/* constexpr */ ");
            }

            let needs_scope = matches!(else_branch, Stmt::If { .. });
            if needs_scope {
                self.open_scope();
            }
            self.emit_stmt(else_branch);
            if needs_scope {
                self.close_scope(NoNewLineBefore::No);
            }
        }

        self.newline();

        if has_init {
            self.close_scope(NoNewLineBefore::No);
            self.newline();
        }
    }

    pub(crate) fn emit_switch(
        &mut self,
        init: Option<&Stmt>,
        cond_var: Option<&Decl>,
        cond: &Expr,
        body: &Stmt,
    ) {
        let has_init = init.is_some() || cond_var.is_some();
        if has_init {
            self.open_scope();
            if let Some(cond_var) = cond_var {
                self.emit_decl(cond_var);
            }
            self.emit_opt_stmt(init);
        }

        self.write("switch");
        self.wrap_parens(true, |g| g.emit_expr(cond));
        self.emit_stmt(body);

        if has_init {
            self.close_scope(NoNewLineBefore::No);
        }
    }

    pub(crate) fn emit_case(&mut self, value: &Expr, sub: &Stmt) {
        self.write("case ");
        self.emit_expr(value);
        self.write(": ");
        self.emit_stmt(sub);
    }

    pub(crate) fn emit_default(&mut self, sub: &Stmt) {
        self.write("default: ");
        self.emit_stmt(sub);
    }

    // =========================================================================
    // Loops
    // =========================================================================

    pub(crate) fn emit_while(&mut self, cond: &Expr, body: &Stmt) {
        self.write("while");
        self.wrap_parens(true, |g| g.emit_expr(cond));
        self.emit_stmt(body);
    }

    pub(crate) fn emit_do(&mut self, body: &Stmt, cond: &Expr) {
        self.write("do ");
        self.emit_stmt(body);
        if matches!(body, Stmt::Compound(_)) {
            self.write(" ");
        }
        self.write("while");
        self.wrap_parens(true, |g| g.emit_expr(cond));
    }

    pub(crate) fn emit_for(
        &mut self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        inc: Option<&Expr>,
        body: &Stmt,
    ) {
        self.write("for");
        self.wrap_parens(true, |g| {
            if let Some(init) = init {
                // a declaration init-statement carries its own terminator
                g.emit_stmt(init);
            } else {
                g.write("; ");
            }
            if let Some(cond) = cond {
                g.emit_expr(cond);
            }
            g.write("; ");
            if let Some(inc) = inc {
                g.emit_expr(inc);
            }
        });
        self.newline();
        self.emit_stmt(body);
        self.newline();
    }

    /// Range iteration, made explicit: the implicit range/begin/end
    /// declarations come first, then the classic three-clause loop whose
    /// condition and increment reference them, then a body scope that
    /// materializes the loop variable ahead of the original body.
    pub(crate) fn emit_range_for(&mut self, range_for: &RangeForStmt) {
        self.open_scope();

        self.emit_stmt(&range_for.range_stmt);
        self.emit_stmt(&range_for.begin_stmt);
        self.emit_stmt(&range_for.end_stmt);

        // blank line after the declarations
        self.newline();

        self.write("for( ; ");
        self.emit_expr(&range_for.cond);
        self.write("; ");
        self.emit_expr(&range_for.inc);
        self.line(" )");

        // open loop-body scope
        self.open_scope();

        self.emit_decl(&range_for.loop_var);

        let body = range_for.body.as_ref();
        if let Stmt::Compound(stmts) = body {
            // the scope is already open, splice the statements directly
            self.emit_compound_body(stmts);
        } else {
            self.emit_stmt(body);
            if !matches!(body, Stmt::Null) {
                self.line(";");
            }
        }

        // close loop-body scope
        self.close_scope(NoNewLineBefore::Yes);

        // close the outer range scope
        self.close_scope(NoNewLineBefore::No);
    }

    // =========================================================================
    // Jumps
    // =========================================================================

    pub(crate) fn emit_return(&mut self, value: Option<&Expr>) {
        self.with_lambda_scope(LambdaTrigger::ReturnStmt, |g| {
            g.write("return");
            if let Some(value) = value {
                g.write(" ");
                g.emit_expr(value);
            }
        });
    }
}
