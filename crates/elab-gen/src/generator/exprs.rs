//! Expression lowering routines.

use elab_ast::{
    CharEncoding, DeclRef, Expr, MemberExpr, OperatorCallExpr, RefDeclKind, TemplateArg, TraitArg,
    TraitKind, TypeRef, UnOp,
};
use elab_ast::ops::BinOp;

use super::{CodeGenerator, Rewrite};
use crate::lambda::LambdaTrigger;

impl CodeGenerator<'_> {
    // =========================================================================
    // Literals
    // =========================================================================

    pub(crate) fn emit_int_literal(&mut self, value: i128, ty: &TypeRef) {
        self.write(&value.to_string());
        self.write_literal_suffix(ty);
    }

    pub(crate) fn write_literal_suffix(&mut self, ty: &TypeRef) {
        if let Some(kind) = ty.builtin {
            self.write(kind.literal_suffix());
        }
    }

    pub(crate) fn emit_char_literal(&mut self, value: u32, encoding: CharEncoding) {
        self.write(encoding.prefix());

        let escaped = match value {
            0x5c => Some("'\\\\'"),
            0x00 => Some("'\\0'"),
            0x27 => Some("'\\''"),
            0x07 => Some("'\\a'"),
            0x08 => Some("'\\b'"),
            0x0c => Some("'\\f'"),
            0x0a => Some("'\\n'"),
            0x0d => Some("'\\r'"),
            0x09 => Some("'\\t'"),
            0x0b => Some("'\\v'"),
            _ => None,
        };
        if let Some(text) = escaped {
            self.write(text);
            return;
        }

        // plain chars can arrive sign-extended
        let mut value = value;
        if (value & !0xFFu32) == !0xFFu32 && encoding == CharEncoding::Plain {
            value &= 0xFF;
        }
        if value < 256
            && let Some(ch) = char::from_u32(value)
            && (ch.is_ascii_graphic() || ch == ' ')
        {
            self.write(&format!("'{}'", ch));
        }
    }

    // =========================================================================
    // Names and members
    // =========================================================================

    pub(crate) fn emit_decl_ref(&mut self, dref: &DeclRef) {
        if let Some(Rewrite::BindingName(substitute)) = self.rewrite() {
            // References to the unnamed decomposed object (empty or
            // qualifier-only spelling) resolve to the synthesized temporary.
            let substitute = substitute.clone();
            self.write(&dref.name);
            if dref.name.is_empty() || dref.name.ends_with("::") {
                self.write(&substitute);
            } else {
                self.emit_ref_template_args(dref);
            }
            return;
        }

        self.write(&dref.name);
        self.emit_ref_template_args(dref);
    }

    pub(crate) fn emit_this(&mut self) {
        if let Some(Rewrite::LambdaThis) = self.rewrite() {
            self.write("__this");
        } else {
            self.write("this");
        }
    }

    pub(crate) fn emit_member_expr(&mut self, member: &MemberExpr) {
        self.emit_expr(&member.base);
        self.write(if member.arrow { "->" } else { "." });

        // Closure conversion members render through the synthesized class's
        // return-type alias rather than their unutterable spelling.
        if let Some(loc) = member.lambda_conversion_loc {
            let class_name = self.lambda_class_name(loc);
            self.write("operator ");
            self.write(&class_name);
            self.write("::retType");
            return;
        }

        self.write(&member.name);
        if !member.template_args.is_empty() {
            self.emit_template_args(&member.template_args);
        }
    }

    // =========================================================================
    // Calls
    // =========================================================================

    pub(crate) fn emit_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        udl_args: Option<&[TemplateArg]>,
    ) {
        self.with_lambda_scope(LambdaTrigger::CallExpr, |g| {
            g.emit_expr(callee);

            if let Some(targs) = udl_args {
                g.emit_udl_template_args(targs);
            }

            g.wrap_parens(false, |g| g.emit_comma_separated(args));
        });
    }

    /// A literal operator's template arguments: a single pack spells its
    /// elements as character literals, anything else renders generically.
    fn emit_udl_template_args(&mut self, targs: &[TemplateArg]) {
        if targs.len() == 1
            && let TemplateArg::Pack(elements) = &targs[0]
        {
            self.write("<");
            let mut first = true;
            for element in elements {
                if !first {
                    self.write(", ");
                }
                first = false;
                if let TemplateArg::Integral(value) = element {
                    let ch = char::from_u32(*value as u32).unwrap_or('?');
                    self.write(&format!("'{}'", ch));
                } else {
                    self.emit_template_arg(element);
                }
            }
            self.write(">");
        } else {
            self.emit_template_args(targs);
        }
    }

    pub(crate) fn emit_member_call(&mut self, callee: &Expr, args: &[Expr]) {
        self.with_lambda_scope(LambdaTrigger::MemberCall, |g| {
            g.emit_expr(callee);
            g.wrap_parens(false, |g| g.emit_comma_separated(args));
        });
    }

    // =========================================================================
    // Overloaded-operator calls
    // =========================================================================

    pub(crate) fn emit_operator_call(&mut self, call: &OperatorCallExpr) {
        self.with_lambda_scope(LambdaTrigger::OperatorCall, |g| {
            g.emit_operator_call_inner(call);
        });
    }

    fn emit_operator_call_inner(&mut self, call: &OperatorCallExpr) {
        let callee_ref = match call.callee.strip_implicit_casts() {
            Expr::DeclRef(dref) => Some(dref),
            _ => None,
        };
        let is_method = callee_ref.is_some_and(|d| d.decl_kind == RefDeclKind::Method);

        // Both operands are plain name references: render the compact form.
        if call.args.len() == 2
            && let Some(callee) = callee_ref
            && let Expr::DeclRef(lhs) = call.args[0].strip_implicit_casts()
            && let Expr::DeclRef(rhs) = call.args[1].strip_implicit_casts()
        {
            let text = if is_method {
                format!("{}.{}({})", lhs.name, callee.name, rhs.name)
            } else {
                format!("{}({}, {})", callee.name, lhs.name, rhs.name)
            };
            self.write(&text);
            return;
        }

        // A callee that resolved to neither a method nor a free function is
        // outside this rewrite's scope.
        if let Expr::DeclRef(dref) = call.callee.ignore_implicit()
            && !matches!(dref.decl_kind, RefDeclKind::Function | RefDeclKind::Method)
        {
            return;
        }

        let Some(first_arg) = call.args.first() else {
            self.error_at(
                elab_common::SourceLoc::default(),
                "operator call without arguments",
            );
            return;
        };

        if !is_method {
            let Some(callee) = callee_ref else {
                return;
            };
            self.write(&callee.name);
            self.write("(");
        }

        // the receiver (or first operand); a dereference gets parenthesized
        self.emit_arg_with_parens_if_needed(first_arg);

        if is_method {
            self.write(".operator");
            self.write(call.op.spelling());
            self.write("(");
        }

        let mut first = true;
        for arg in &call.args[1..] {
            if !is_method {
                self.write(", ");
            } else if !first {
                self.write(", ");
            }
            first = false;
            self.emit_expr(arg);
        }
        self.write(")");
    }

    fn emit_arg_with_parens_if_needed(&mut self, expr: &Expr) {
        let needs_parens = matches!(
            expr.ignore_implicit(),
            Expr::Unary {
                op: UnOp::Deref,
                ..
            }
        );
        if needs_parens {
            self.write("(");
        }
        self.emit_expr(expr);
        if needs_parens {
            self.write(")");
        }
    }

    // =========================================================================
    // Construction and initializer lists
    // =========================================================================

    pub(crate) fn emit_construct(&mut self, ty: &TypeRef, args: &[Expr], list_init: bool) {
        let name = ty.unqualified_text().to_string();
        self.write(&name);
        if list_init {
            self.wrap_curlys(|g| g.emit_comma_separated(args));
        } else {
            self.wrap_parens(false, |g| g.emit_comma_separated(args));
        }
    }

    pub(crate) fn emit_functional_cast(&mut self, ty: &TypeRef, sub: &Expr, paren_form: bool) {
        let is_constructor = matches!(sub, Expr::Construct { .. });
        let is_std_list_init = matches!(sub, Expr::StdInitList { .. });
        // the constructor renders the type name itself
        let needs_parens = !is_constructor && paren_form && !is_std_list_init;

        if !is_constructor && !is_std_list_init {
            self.write(&ty.text);
        }
        if needs_parens {
            self.write("(");
        }
        self.emit_expr(sub);
        if needs_parens {
            self.write(")");
        }
    }

    pub(crate) fn emit_init_list(&mut self, inits: &[Expr]) {
        self.write("{");
        self.buf().increase_indent();
        self.emit_comma_separated(inits);
        self.write("}");
        self.buf().decrease_indent();
    }

    /// Brace an initializer unless its own form already provides grouping.
    pub(crate) fn insert_curlys_if_required(&mut self, expr: &Expr) {
        let requires_curlys = !matches!(
            expr,
            Expr::InitList(_) | Expr::Paren(_) | Expr::DefaultInit(_)
        );
        if requires_curlys {
            self.write("{");
        }
        self.emit_expr(expr);
        if requires_curlys {
            self.write("}");
        }
    }

    // =========================================================================
    // Operators
    // =========================================================================

    pub(crate) fn emit_unary(&mut self, op: UnOp, sub: &Expr) {
        if !op.is_postfix() {
            self.write(op.spelling());
        }
        self.emit_expr(sub);
        if op.is_postfix() {
            self.write(op.spelling());
        }
    }

    pub(crate) fn emit_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr) {
        self.with_lambda_scope(LambdaTrigger::BinaryOperator, |g| {
            g.emit_expr(lhs);
            g.write(" ");
            g.write(op.spelling());
            g.write(" ");
            g.emit_expr(rhs);
        });
    }

    pub(crate) fn emit_conditional(&mut self, cond: &Expr, then_expr: &Expr, else_expr: &Expr) {
        self.emit_expr(cond);
        self.write(" ? ");
        self.emit_expr(then_expr);
        self.write(" : ");
        self.emit_expr(else_expr);
    }

    pub(crate) fn emit_subscript(&mut self, lhs: &Expr, rhs: &Expr) {
        self.emit_expr(lhs);
        self.write("[");
        self.emit_expr(rhs);
        self.write("]");
    }

    // =========================================================================
    // Array initialization loops
    // =========================================================================

    /// Element-wise array copy: unrolled into a braced list, rendering the
    /// element expression once per index with the index placeholder bound.
    pub(crate) fn emit_array_init_loop(&mut self, size: u64, sub: &Expr) {
        self.wrap_curlys(|g| {
            let mut first = true;
            for index in 0..size {
                if !first {
                    g.write(", ");
                }
                first = false;
                g.with_rewrite(Some(Rewrite::ArrayIndex(index)), |g| g.emit_expr(sub));
            }
        });
    }

    pub(crate) fn emit_array_init_index(&mut self) {
        if let Some(Rewrite::ArrayIndex(index)) = self.rewrite() {
            let index = *index;
            self.write(&index.to_string());
        } else {
            self.error_at(
                elab_common::SourceLoc::default(),
                "array-init index reached outside an array-init loop",
            );
        }
    }

    // =========================================================================
    // Type queries and allocation
    // =========================================================================

    pub(crate) fn emit_sizeof_alignof(&mut self, trait_kind: TraitKind, arg: &TraitArg) {
        self.write(trait_kind.spelling());
        match arg {
            TraitArg::Type(ty) => {
                self.write("(");
                self.write(&ty.text);
                self.write(")");
            }
            TraitArg::Expr(expr) => self.emit_expr(expr),
        }
    }

    pub(crate) fn emit_typeid(&mut self, operand: &TraitArg) {
        self.write("typeid");
        match operand {
            TraitArg::Type(ty) => {
                self.wrap_parens(false, |g| g.write(&ty.text));
            }
            TraitArg::Expr(expr) => {
                self.wrap_parens(false, |g| g.emit_expr(expr));
            }
        }
    }

    pub(crate) fn emit_new(
        &mut self,
        placement: &[Expr],
        ty: &TypeRef,
        construct: Option<&Expr>,
        array_size: Option<&Expr>,
        init: Option<&Expr>,
    ) {
        self.write("new ");

        if !placement.is_empty() {
            self.wrap_parens(false, |g| g.emit_comma_separated(placement));
        }

        if let Some(construct) = construct {
            self.emit_expr(construct);
            return;
        }

        self.write(&ty.text);
        if let Some(size) = array_size {
            self.write("[");
            self.emit_expr(size);
            self.write("]");
        }
        if let Some(init) = init {
            self.insert_curlys_if_required(init);
        }
    }

    pub(crate) fn emit_delete(&mut self, array_form: bool, arg: &Expr) {
        self.write("delete");
        if array_form {
            self.write("[]");
        }
        self.write(" ");
        self.emit_expr(arg);
    }

    // =========================================================================
    // Template arguments
    // =========================================================================

    /// `<a, b, c>` with the `> >` spacing fix for nested closers.
    pub(crate) fn emit_template_args(&mut self, args: &[TemplateArg]) {
        self.write("<");
        self.emit_template_arg_list(args);
        // keep two closing brackets apart: >> -> > >
        if self.last_char() == Some('>') {
            self.write(" ");
        }
        self.write(">");
    }

    /// Template arguments attached to a name reference; empty lists stay
    /// invisible.
    fn emit_ref_template_args(&mut self, dref: &DeclRef) {
        if dref.template_args.is_empty() {
            return;
        }
        self.write("<");
        self.emit_template_arg_list(&dref.template_args);
        self.write(">");
    }

    fn emit_template_arg_list(&mut self, args: &[TemplateArg]) {
        let mut first = true;
        for arg in args {
            if !first {
                self.write(", ");
            }
            first = false;
            self.emit_template_arg(arg);
        }
    }

    pub(crate) fn emit_template_arg(&mut self, arg: &TemplateArg) {
        match arg {
            TemplateArg::Type(ty) | TemplateArg::Decl(ty) => self.write(&ty.text),
            TemplateArg::Expr(expr) => self.emit_expr(expr),
            TemplateArg::Integral(value) => self.write(&value.to_string()),
            // packs flatten into the surrounding list
            TemplateArg::Pack(elements) => self.emit_template_arg_list(elements),
            TemplateArg::Template(name) => self.write(name),
            TemplateArg::NullPtr(ty) => self.write(&ty.text),
            TemplateArg::Null => self.write("null"),
        }
    }
}
