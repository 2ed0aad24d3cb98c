//! Cast formatting: every cast that survives into the output renders as an
//! explicit named cast over the canonical destination type.

use elab_ast::{CastKind, Expr, NamedCastKind, TypeRef};

use super::CodeGenerator;

impl CodeGenerator<'_> {
    /// `castName<DestType>(sub)`, optionally wrapped in a comment when the
    /// cast adds no information over what is already spelled out.
    pub(crate) fn format_cast(
        &mut self,
        cast_name: &str,
        dest: &TypeRef,
        sub: &Expr,
        kind: CastKind,
        as_comment: bool,
    ) {
        let cast_to_base = kind.is_derived_to_base() && dest.is_record();
        let mut dest_text = dest.text.clone();
        // a base cast of a non-pointer glvalue binds a reference
        if cast_to_base && !dest.is_any_pointer() {
            dest_text.push('&');
        }

        if as_comment {
            self.write("/*");
        }
        self.write(cast_name);
        self.write("<");
        self.write(&dest_text);
        self.write(">(");
        self.emit_expr(sub);
        self.write(")");
        if as_comment {
            self.write("*/");
        }
    }

    pub(crate) fn emit_named_cast(
        &mut self,
        cast: NamedCastKind,
        kind: CastKind,
        ty: &TypeRef,
        sub: &Expr,
    ) {
        self.format_cast(cast.name(), ty, sub, kind, false);
    }

    /// C-style casts re-render as the named cast with equivalent power.
    pub(crate) fn emit_cstyle_cast(&mut self, kind: CastKind, ty: &TypeRef, sub: &Expr) {
        self.format_cast("reinterpret_cast", ty, sub, kind, false);
    }

    pub(crate) fn emit_implicit_cast(&mut self, kind: CastKind, ty: &TypeRef, sub: &Expr) {
        if !kind.is_visible_conversion() {
            self.emit_expr(sub);
            return;
        }

        // a literal already spells its value; the conversion adds nothing
        if matches!(sub, Expr::IntLit { .. }) {
            self.emit_expr(sub);
            return;
        }

        let is_reinterpret = kind == CastKind::BitCast;
        let cast_name = if is_reinterpret {
            "reinterpret_cast"
        } else {
            "static_cast"
        };
        // casting `this` restates the obvious; keep it visible but inert
        let as_comment = !is_reinterpret && matches!(sub, Expr::This { .. });

        self.format_cast(cast_name, ty, sub, kind, as_comment);
    }
}
