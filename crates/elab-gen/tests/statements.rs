//! General statement and declaration emission: branches, loops, blocks,
//! records, and the plain re-emission paths.

mod util;

use elab_ast::{
    AliasDecl, BinOp, Decl, Expr, FieldDecl, FunctionDecl, RecordDecl, StaticAssertDecl, Stmt,
    TypeFlags, TypeRef, UnOp, UsingDecl, VarDecl,
};
use elab_gen::{GenContext, generate};
use util::*;

fn bool_ty() -> TypeRef {
    TypeRef::builtin(elab_ast::BuiltinKind::Bool)
}

#[test]
fn if_with_condition_variable_gets_an_enclosing_scope() {
    let map = source_map();
    let stmt = Stmt::If {
        constexpr_if: false,
        init: None,
        cond_var: Some(Box::new(var(
            "ok",
            bool_ty(),
            call(funcref("check"), vec![]),
        ))),
        cond: declref("ok"),
        then_branch: Box::new(Stmt::Compound(vec![Stmt::Expr(call(
            funcref("use"),
            vec![],
        ))])),
        else_branch: None,
    };
    let output = lower_stmt(&map, &stmt);

    assert_eq!(
        output.text,
        "{\n\
         \x20\x20bool ok = check();\n\
         \x20\x20if(ok) \n\
         \x20\x20{\n\
         \x20\x20\x20\x20use();\n\
         \x20\x20}\n\
         \n\
         }\n"
    );
}

#[test]
fn constexpr_if_comments_the_else_keyword() {
    let map = source_map();
    let stmt = Stmt::If {
        constexpr_if: true,
        init: None,
        cond_var: None,
        cond: declref("flag"),
        then_branch: Box::new(Stmt::Compound(vec![Stmt::Expr(call(funcref("a"), vec![]))])),
        else_branch: Some(Box::new(Stmt::Compound(vec![Stmt::Expr(call(
            funcref("b"),
            vec![],
        ))]))),
    };
    let output = lower_stmt(&map, &stmt);

    assert_eq!(
        output.text,
        "if constexpr(flag) \n\
         {\n\
         \x20\x20a();\n\
         } else /* constexpr */ \n\
         {\n\
         \x20\x20b();\n\
         }\n"
    );
}

#[test]
fn do_while_keeps_the_condition_after_the_body() {
    let map = source_map();
    let stmt = Stmt::Compound(vec![Stmt::Do {
        body: Box::new(Stmt::Compound(vec![Stmt::Expr(Expr::Unary {
            op: UnOp::PostDec,
            sub: Box::new(declref("x")),
        })])),
        cond: Expr::Binary {
            op: BinOp::Gt,
            lhs: Box::new(declref("x")),
            rhs: Box::new(int(0)),
        },
    }]);
    let output = lower_stmt(&map, &stmt);

    assert_eq!(
        output.text,
        "{\n\
         \x20\x20do \n\
         \x20\x20{\n\
         \x20\x20\x20\x20x--;\n\
         \x20\x20} while(x > 0) ;\n\
         }"
    );
}

#[test]
fn switch_cases_terminate_through_the_enclosing_block() {
    let map = source_map();
    let stmt = Stmt::Compound(vec![Stmt::Switch {
        init: None,
        cond_var: None,
        cond: declref("x"),
        body: Box::new(Stmt::Compound(vec![
            Stmt::Case {
                value: int(1),
                sub: Box::new(Stmt::Expr(call(funcref("f"), vec![]))),
            },
            Stmt::Break,
            Stmt::Default(Box::new(Stmt::Break)),
        ])),
    }]);
    let output = lower_stmt(&map, &stmt);

    assert_eq!(
        output.text,
        "{\n\
         \x20\x20switch(x) \n\
         \x20\x20{\n\
         \x20\x20\x20\x20case 1: f();\n\
         \x20\x20\x20\x20break;\n\
         \x20\x20\x20\x20default: break;\n\
         \x20\x20};\n\
         }"
    );
}

#[test]
fn classic_for_keeps_the_declaration_terminator() {
    let map = source_map();
    let stmt = Stmt::For {
        init: Some(Box::new(decl_stmt(var("i", int_ty(), int(0))))),
        cond: Some(Expr::Binary {
            op: BinOp::Lt,
            lhs: Box::new(declref("i")),
            rhs: Box::new(declref("n")),
        }),
        inc: Some(Expr::Unary {
            op: UnOp::PreInc,
            sub: Box::new(declref("i")),
        }),
        body: Box::new(Stmt::Compound(vec![Stmt::Expr(call(
            funcref("body"),
            vec![],
        ))])),
    };
    let output = lower_stmt(&map, &stmt);

    assert_eq!(
        output.text,
        "for(int i = 0;\n\
         i < n; ++i) \n\
         {\n\
         \x20\x20body();\n\
         }\n"
    );
}

#[test]
fn function_pointer_variable_introduces_an_alias() {
    let map = source_map();
    let mut var = VarDecl::new(
        "fp",
        TypeRef::named("void (*)(int)").with_flags(TypeFlags::FUNCTION_POINTER),
    )
    .with_init(declref("callback"));
    var.loc = loc(3, 1);
    let output = lower_decl(&map, &Decl::Var(var));

    assert_eq!(
        output.text,
        "using FuncPtr_3 = void (*)(int);\n\
         FuncPtr_3 fp = callback;\n"
    );
}

#[test]
fn nrvo_variables_are_annotated() {
    let map = source_map();
    let mut var = VarDecl::new("result", TypeRef::record("Widget"))
        .with_init(call(funcref("make"), vec![]));
    var.is_nrvo = true;
    let output = lower_decl(&map, &Decl::Var(var));

    assert_eq!(output.text, "Widget result = make() /* NRVO variable */;\n");
}

#[test]
fn records_and_functions_emit_through_the_unit_driver() {
    let map = source_map();
    let decls = vec![
        Decl::Record(RecordDecl {
            name: "Point".to_string(),
            is_class: false,
            template_args: None,
            bases: Vec::new(),
            decls: vec![
                Decl::Field(FieldDecl {
                    name: "x".to_string(),
                    ty: int_ty(),
                }),
                Decl::Field(FieldDecl {
                    name: "y".to_string(),
                    ty: int_ty(),
                }),
            ],
            has_definition: true,
        }),
        Decl::Function(FunctionDecl {
            prototype: "int main()".to_string(),
            body: Some(Stmt::Compound(vec![Stmt::Return(Some(int(0)))])),
        }),
    ];
    let ctx = GenContext::new(&map);
    let output = generate(&ctx, &decls);

    assert_eq!(
        output.text,
        "struct Point\n\
         {\n\
         \x20\x20int x;\n\
         \x20\x20int y;\n\
         };\n\
         \n\
         int main()\n\
         {\n\
         \x20\x20return 0;\n\
         }\n"
    );
}

#[test]
fn aliases_and_using_declarations() {
    let map = source_map();
    let alias = Decl::TypeAlias(AliasDecl {
        name: "Meters".to_string(),
        underlying: TypeRef::builtin(elab_ast::BuiltinKind::Double),
    });
    assert_eq!(lower_decl(&map, &alias).text, "using Meters = double;\n");

    let using = Decl::Using(UsingDecl {
        scope: vec!["std".to_string()],
        name: "swap".to_string(),
    });
    assert_eq!(lower_decl(&map, &using).text, "using std::swap;\n");
}

#[test]
fn static_assertions_emit_as_inert_comments() {
    let map = source_map();
    let assert_decl = Decl::StaticAssert(StaticAssertDecl {
        cond: Expr::BoolLit(true),
        message: Some(Expr::StringLit {
            spelling: "\"size\"".to_string(),
        }),
        failed: false,
    });
    let output = lower_decl(&map, &assert_decl);

    assert_eq!(output.text, "/* PASSED: static_assert(true, \"size\"); */\n");
}

#[test]
fn array_init_loops_unroll_per_index() {
    let map = source_map();
    let expr = Expr::ArrayInitLoop {
        source: Box::new(declref("arr")),
        size: 3,
        sub: Box::new(Expr::Subscript {
            lhs: Box::new(declref("arr")),
            rhs: Box::new(Expr::ArrayInitIndex),
        }),
    };
    let output = lower_expr(&map, &expr);

    assert_eq!(output.text, "{arr[0], arr[1], arr[2]}");
    assert!(output.diagnostics.is_empty());
}

#[test]
fn construction_spells_brace_or_paren_by_form() {
    let map = source_map();
    let braced = Expr::Construct {
        ty: TypeRef::record("Widget"),
        args: vec![int(1), int(2)],
        list_init: true,
    };
    assert_eq!(lower_expr(&map, &braced).text, "Widget{1, 2}");

    let paren = Expr::Construct {
        ty: TypeRef::record("Widget"),
        args: vec![int(1), int(2)],
        list_init: false,
    };
    assert_eq!(lower_expr(&map, &paren).text, "Widget(1, 2)");
}

#[test]
fn conditional_operator_emits_inline() {
    let map = source_map();
    let expr = Expr::Conditional {
        cond: Box::new(declref("flag")),
        then_expr: Box::new(int(1)),
        else_expr: Box::new(int(2)),
    };
    assert_eq!(lower_expr(&map, &expr).text, "flag ? 1 : 2");
}
