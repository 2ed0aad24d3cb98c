//! Range-iteration lowering: the implicit range/begin/end protocol becomes
//! explicit declarations plus a classic three-clause loop.

mod util;

use elab_ast::{BinOp, Expr, MemberExpr, RangeForStmt, Stmt, TypeRef, UnOp};
use util::*;

fn member_call(base: Expr, name: &str) -> Expr {
    Expr::MemberCall {
        callee: Box::new(Expr::Member(MemberExpr {
            base: Box::new(base),
            arrow: false,
            name: name.to_string(),
            lambda_conversion_loc: None,
            template_args: Vec::new(),
        })),
        args: Vec::new(),
    }
}

/// `for (auto& e : v) sum += e;` with the front end's resolved helpers.
fn sum_over_vector(body: Stmt) -> Stmt {
    let iter_ty = TypeRef::named("std::vector<int>::iterator");
    Stmt::RangeFor(Box::new(RangeForStmt {
        range_stmt: decl_stmt(var(
            "__range1",
            ref_ty("std::vector<int> &"),
            declref("v"),
        )),
        begin_stmt: decl_stmt(var(
            "__begin1",
            iter_ty.clone(),
            member_call(declref("__range1"), "begin"),
        )),
        end_stmt: decl_stmt(var(
            "__end1",
            iter_ty,
            member_call(declref("__range1"), "end"),
        )),
        cond: Expr::Binary {
            op: BinOp::Ne,
            lhs: Box::new(declref("__begin1")),
            rhs: Box::new(declref("__end1")),
        },
        inc: Expr::Unary {
            op: UnOp::PreInc,
            sub: Box::new(declref("__begin1")),
        },
        loop_var: var(
            "e",
            ref_ty("int &"),
            Expr::Unary {
                op: UnOp::Deref,
                sub: Box::new(declref("__begin1")),
            },
        ),
        body: Box::new(body),
    }))
}

#[test]
fn lowers_to_explicit_iterator_loop() {
    let map = source_map();
    let body = Stmt::Expr(Expr::Binary {
        op: BinOp::AddAssign,
        lhs: Box::new(declref("sum")),
        rhs: Box::new(declref("e")),
    });
    let output = lower_stmt(&map, &sum_over_vector(body));

    assert_eq!(
        output.text,
        "{\n\
         \x20\x20std::vector<int> & __range1 = v;\n\
         \x20\x20std::vector<int>::iterator __begin1 = __range1.begin();\n\
         \x20\x20std::vector<int>::iterator __end1 = __range1.end();\n\
         \n\
         \x20\x20for( ; __begin1 != __end1; ++__begin1 )\n\
         \x20\x20{\n\
         \x20\x20\x20\x20int & e = *__begin1;\n\
         \x20\x20\x20\x20sum += e;\n\
         \x20\x20}\n\
         }"
    );
    assert!(output.diagnostics.is_empty());
}

#[test]
fn condition_references_synthesized_iterators_not_the_range() {
    let map = source_map();
    let body = Stmt::Null;
    let output = lower_stmt(&map, &sum_over_vector(body));

    let for_line_start = output.text.find("for( ; ").expect("for header");
    let for_line = &output.text[for_line_start..];
    let header_end = for_line.find('\n').expect("header line break");
    let header = &for_line[..header_end];

    assert!(header.contains("__begin1 != __end1"));
    assert!(header.contains("++__begin1"));
    assert!(!header.contains('v'), "header must not name the range: {header}");
}

#[test]
fn braced_body_is_not_wrapped_twice() {
    let map = source_map();
    let body = Stmt::Compound(vec![Stmt::Expr(call(funcref("touch"), vec![declref("e")]))]);
    let output = lower_stmt(&map, &sum_over_vector(body));

    // one body scope only: range scope, loop scope, and no third brace level
    assert!(output.text.contains("  {\n    int & e = *__begin1;\n    touch(e);\n  }"));
}

#[test]
fn null_body_gets_no_extra_terminator() {
    let map = source_map();
    let output = lower_stmt(&map, &sum_over_vector(Stmt::Null));

    // the null statement spells its own `;`
    assert!(output.text.contains("int & e = *__begin1;\n    ;\n"));
}
