//! Overloaded-operator call rewriting: resolved operator calls re-render as
//! explicit member or free-function calls.

mod util;

use elab_ast::{Expr, OperatorCallExpr, OverloadedOp, TemplateArg, UnOp};
use util::*;

fn operator_call(op: OverloadedOp, callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::OperatorCall(OperatorCallExpr {
        op,
        callee: Box::new(callee),
        args,
    })
}

#[test]
fn two_name_operands_render_as_member_call() {
    let map = source_map();
    let expr = operator_call(
        OverloadedOp::Plus,
        methodref("operator+"),
        vec![declref("a"), declref("b")],
    );
    let output = lower_expr(&map, &expr);

    assert_eq!(output.text, "a.operator+(b)");
}

#[test]
fn two_name_operands_render_as_free_call() {
    let map = source_map();
    let expr = operator_call(
        OverloadedOp::LessLess,
        funcref("operator<<"),
        vec![declref("std::cout"), declref("value")],
    );
    let output = lower_expr(&map, &expr);

    assert_eq!(output.text, "operator<<(std::cout, value)");
}

#[test]
fn dereferenced_receiver_is_parenthesized() {
    let map = source_map();
    let receiver = Expr::Unary {
        op: UnOp::Deref,
        sub: Box::new(declref("p")),
    };
    let expr = operator_call(
        OverloadedOp::Plus,
        methodref("operator+"),
        vec![receiver, declref("b")],
    );
    let output = lower_expr(&map, &expr);

    assert_eq!(output.text, "(*p).operator+(b)");
}

#[test]
fn free_operator_with_complex_operand_keeps_prefix_form() {
    let map = source_map();
    let lhs = Expr::Unary {
        op: UnOp::Deref,
        sub: Box::new(declref("p")),
    };
    let expr = operator_call(
        OverloadedOp::LessLess,
        funcref("operator<<"),
        vec![lhs, declref("value")],
    );
    let output = lower_expr(&map, &expr);

    assert_eq!(output.text, "operator<<((*p), value)");
}

#[test]
fn call_operator_takes_extra_arguments() {
    let map = source_map();
    let expr = operator_call(
        OverloadedOp::Call,
        methodref("operator()"),
        vec![declref("functor"), declref("a"), declref("b")],
    );
    let output = lower_expr(&map, &expr);

    assert_eq!(output.text, "functor.operator()(a, b)");
}

#[test]
fn callee_outside_function_scope_is_dropped() {
    let map = source_map();
    // the callee resolved to a plain variable: the rewrite skips the call
    let expr = operator_call(
        OverloadedOp::Plus,
        declref("not_an_operator"),
        vec![
            Expr::Paren(Box::new(declref("a"))),
            declref("b"),
        ],
    );
    let output = lower_expr(&map, &expr);

    assert_eq!(output.text, "");
}

#[test]
fn literal_operator_pack_renders_as_character_literals() {
    let map = source_map();
    let expr = Expr::Call {
        callee: Box::new(funcref("operator\"\"_km")),
        args: vec![],
        udl_args: Some(vec![TemplateArg::Pack(vec![
            TemplateArg::Integral('1' as i128),
            TemplateArg::Integral('2' as i128),
        ])]),
    };
    let output = lower_expr(&map, &expr);

    assert_eq!(output.text, "operator\"\"_km<'1', '2'>()");
}

#[test]
fn literal_operator_with_type_arguments_renders_generic_list() {
    let map = source_map();
    let expr = Expr::Call {
        callee: Box::new(funcref("operator\"\"_t")),
        args: vec![],
        udl_args: Some(vec![
            TemplateArg::Type(elab_ast::TypeRef::named("char")),
            TemplateArg::Integral(3),
        ]),
    };
    let output = lower_expr(&map, &expr);

    assert_eq!(output.text, "operator\"\"_t<char, 3>()");
}
