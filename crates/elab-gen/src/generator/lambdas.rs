//! Closure lowering: each lambda becomes a named local class with the call
//! operator as a member function, one field per capture, and a constructor
//! taking one argument per capture. Placement is resolved through the lambda
//! scope stack (see [`crate::lambda`]).

use elab_ast::{CaptureKind, LambdaExpr, MethodDecl};
use elab_common::SourceLoc;

use super::{CodeGenerator, Rewrite};
use crate::lambda::LambdaTrigger;
use crate::writer::NoNewLineBefore;

impl CodeGenerator<'_> {
    pub(crate) fn lambda_class_name(&mut self, loc: SourceLoc) -> String {
        let lc = self.line_col_of(loc);
        self.names.lambda_class(lc)
    }

    pub(crate) fn emit_lambda_expr(&mut self, lambda: &LambdaExpr) {
        if !self.lambda_stack_is_empty() {
            self.handle_lambda(lambda);
            let name = self.lambda_class_name(lambda.loc);
            self.write(&name);
        } else {
            // no enclosing trigger: the class definition and a named instance
            // are emitted in place
            self.with_lambda_scope(LambdaTrigger::LambdaExpr, |g| g.handle_lambda(lambda));
        }

        // constructor-argument text deferred by the class emission lands at
        // the use site
        let inits = self.take_use_site_inits();
        self.write(&inits);
    }

    /// Emit the synthesized class for `lambda` into the innermost scope's
    /// hoist buffer, and route the constructor-argument text according to the
    /// scope's trigger kind.
    fn handle_lambda(&mut self, lambda: &LambdaExpr) {
        let Some(hoist) = self.current_hoist_buffer() else {
            debug_assert!(false, "lambda lowering requires an active scope");
            return;
        };
        let trigger = self
            .current_lambda_trigger()
            .unwrap_or(LambdaTrigger::LambdaExpr);
        let class_name = self.lambda_class_name(lambda.loc);

        tracing::debug!(
            "[lambda] class {} under trigger {:?}",
            class_name,
            trigger
        );

        let inits = self.with_sink(hoist, |g| g.write_lambda_class(lambda, &class_name));

        self.with_sink(hoist, |g| {
            if !matches!(trigger, LambdaTrigger::VarDecl | LambdaTrigger::CallExpr) {
                // declare a named instance right after the class definition;
                // the use site then refers to it by name
                g.write(" ");
                g.write(&class_name);
                g.write(&inits);
            } else {
                g.append_use_site_inits(&inits);
            }
            g.line(";");
            g.newline();
        });
    }

    /// Write the class definition itself and return the brace-enclosed
    /// constructor-argument text for the use site.
    fn write_lambda_class(&mut self, lambda: &LambdaExpr, class_name: &str) -> String {
        self.newline();
        self.line(&format!("class {}", class_name));
        self.open_scope();

        // conversion operators first, then the call operator(s), then the
        // static invokers backing the conversions
        let mut have_conversion = false;
        for conversion in &lambda.class.conversions {
            // undeduced conversions (auto return, no body) are not real
            // members yet
            if !lambda.is_generic && conversion.body.is_none() {
                continue;
            }
            have_conversion = true;
            self.write_lambda_method(conversion);
        }

        for call_op in &lambda.class.call_operators {
            self.write_lambda_method(call_op);
        }

        if have_conversion {
            for invoker in &lambda.class.static_invokers {
                self.write_lambda_method(invoker);
            }
        }

        // captures: private fields plus the matching constructor
        let mut ctor = format!("public: {}(", class_name);
        let mut ctor_inits = String::from(": ");
        let mut inits = String::from("{");
        let mut first = true;
        let mut ctor_required = false;

        if !lambda.captures.is_empty() {
            self.newline();
            self.write("private:");
        }

        for capture in &lambda.captures {
            ctor_required = true;

            let captures_this =
                matches!(capture.kind, CaptureKind::This | CaptureKind::StarThis);
            if capture.kind == CaptureKind::VlaType || (!captures_this && capture.name.is_none()) {
                self.error_at(lambda.loc, "capture without a capturable entity");
                continue;
            }

            if first {
                first = false;
                self.newline();
            } else {
                ctor.push_str(", ");
                inits.push_str(", ");
                ctor_inits.push_str("\n, ");
            }

            let plain_name = if captures_this {
                "this".to_string()
            } else {
                capture.name.clone().unwrap_or_default()
            };
            // a field literally named `this` would collide with the implicit
            // receiver inside the body; prefix it
            let field_name = if captures_this {
                format!("__{}", plain_name)
            } else {
                plain_name.clone()
            };

            let field_type = capture.ty.capture_declarator(&plain_name);
            let ctor_param_type = capture.ty.capture_declarator(&format!("_{}", plain_name));

            ctor.push_str(&ctor_param_type);
            self.write(&field_type);

            if capture.kind == CaptureKind::ByRef
                && !capture.ty.is_reference()
                && !capture.ty.is_array()
            {
                // the type text already carries `&` when a reference was
                // captured by reference; arrays used the parenthesized
                // declarator above
                ctor.push('&');
                self.write("&");
            }

            // constructor argument: an init-capture renders its initializer
            // expression, everything else passes the captured entity itself
            if capture.kind == CaptureKind::ByCopy
                && capture.name.is_some()
                && let Some(init) = &capture.init
            {
                let text = self.render_to_string(|g| g.emit_expr(init));
                inits.push_str(&text);
            } else {
                if capture.kind == CaptureKind::StarThis {
                    inits.push('*');
                }
                inits.push_str(&plain_name);
            }

            if !capture.ty.is_array() {
                ctor.push_str(&format!(" _{}", field_name));
                self.write(" ");
                self.write(&field_name);
                self.line(";");
            } else {
                self.line(";");
            }

            ctor_inits.push_str(&format!("{}{{_{}}}", field_name, field_name));
        }

        ctor.push(')');
        inits.push('}');

        if ctor_required {
            self.newline();
            self.line(&ctor);
            self.line(&ctor_inits);
            self.line("{}");
        }

        self.close_scope(NoNewLineBefore::No);

        inits
    }

    /// One synthesized member function: signature (constexpr commented, the
    /// deduced spelling is not repeatable verbatim), then the body with the
    /// implicit receiver rewritten to the disambiguated field.
    fn write_lambda_method(&mut self, method: &MethodDecl) {
        self.write_method_signature(method, true, false);
        self.newline();
        self.with_rewrite(Some(Rewrite::LambdaThis), |g| {
            if let Some(body) = &method.body {
                g.emit_stmt(body);
            }
        });
        self.newline();
    }
}
