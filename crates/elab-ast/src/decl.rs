//! The declaration family.
//!
//! Free-function prototypes arrive pre-rendered (prototype formatting is the
//! front end's job); method signatures inside synthesized closure classes are
//! built by the generator and therefore carry their parts individually.

use bitflags::bitflags;
use elab_common::SourceLoc;

use crate::expr::{Expr, TemplateArg, UnsupportedNode};
use crate::stmt::Stmt;
use crate::types::TypeRef;

#[derive(Clone, Debug)]
pub enum Decl {
    Var(VarDecl),
    Decomposition(DecompositionDecl),
    Function(FunctionDecl),
    Method(MethodDecl),
    Record(RecordDecl),
    Field(FieldDecl),
    AccessSpec(Access),
    StaticAssert(StaticAssertDecl),
    TypeAlias(AliasDecl),
    Typedef(AliasDecl),
    Using(UsingDecl),
    Unsupported(UnsupportedNode),
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct VarQuals: u8 {
        const INLINE = 1 << 0;
        const EXTERN = 1 << 1;
        const STATIC = 1 << 2;
        const CONSTEXPR = 1 << 3;
    }
}

#[derive(Clone, Debug)]
pub struct VarDecl {
    pub name: String,
    pub ty: TypeRef,
    pub init: Option<Expr>,
    pub quals: VarQuals,
    pub is_nrvo: bool,
    pub loc: SourceLoc,
}

impl VarDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        VarDecl {
            name: name.into(),
            ty,
            init: None,
            quals: VarQuals::empty(),
            is_nrvo: false,
            loc: SourceLoc::default(),
        }
    }

    pub fn with_init(mut self, init: Expr) -> Self {
        self.init = Some(init);
        self
    }
}

/// A structured binding: one initializer, N binding declarations.
#[derive(Clone, Debug)]
pub struct DecompositionDecl {
    /// Type of the whole decomposed object (possibly a reference type).
    pub ty: TypeRef,
    pub init: Expr,
    pub bindings: Vec<BindingDecl>,
    pub loc: SourceLoc,
}

#[derive(Clone, Debug)]
pub struct BindingDecl {
    pub name: String,
    pub ty: TypeRef,
    pub mode: BindingMode,
}

/// How one binding resolves into the decomposed object.
#[derive(Clone, Debug)]
pub enum BindingMode {
    /// Tuple-like binding through a hidden holding variable; carries the
    /// holding variable's initializer (a `get<I>` call on the object).
    HoldingVar { init: Expr },
    /// Direct member access into the decomposed object.
    Member { expr: Expr },
    /// Array element binding; carries the subscript index expression.
    ArrayElement { index: Expr },
    /// Anything else: rendered as a placeholder marker.
    Unsupported,
}

#[derive(Clone, Debug)]
pub struct FunctionDecl {
    /// Pre-rendered prototype text, return type and parameter list included.
    pub prototype: String,
    pub body: Option<Stmt>,
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct MethodQuals: u8 {
        const INLINE = 1 << 0;
        const STATIC = 1 << 1;
        const VIRTUAL = 1 << 2;
        const VOLATILE = 1 << 3;
        const CONSTEXPR = 1 << 4;
        const CONST = 1 << 5;
        const NOEXCEPT = 1 << 6;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MethodKind {
    Regular,
    Constructor,
    Destructor,
    Conversion,
}

#[derive(Clone, Debug)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Clone, Debug)]
pub struct CtorInit {
    /// Initialized member name; `None` for base and delegating initializers.
    pub member: Option<String>,
    pub init: Expr,
}

#[derive(Clone, Debug)]
pub struct MethodDecl {
    pub access: Access,
    pub kind: MethodKind,
    /// `operator()`, the class name for constructors, `~Foo`, ...; unused for
    /// conversions, which render through their return type.
    pub name: String,
    /// Desugared return type.
    pub ret: TypeRef,
    pub params: Vec<Param>,
    pub quals: MethodQuals,
    pub is_defaulted: bool,
    pub is_deleted: bool,
    pub is_user_provided: bool,
    pub ctor_inits: Vec<CtorInit>,
    pub body: Option<Stmt>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, ret: TypeRef) -> Self {
        MethodDecl {
            access: Access::Public,
            kind: MethodKind::Regular,
            name: name.into(),
            ret,
            params: Vec::new(),
            quals: MethodQuals::empty(),
            is_defaulted: false,
            is_deleted: false,
            is_user_provided: true,
            ctor_inits: Vec::new(),
            body: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BaseSpec {
    pub access: Access,
    pub ty: TypeRef,
}

#[derive(Clone, Debug)]
pub struct RecordDecl {
    pub name: String,
    pub is_class: bool,
    /// Present for class template specializations.
    pub template_args: Option<Vec<TemplateArg>>,
    pub bases: Vec<BaseSpec>,
    pub decls: Vec<Decl>,
    pub has_definition: bool,
}

#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    Private,
    None,
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Protected => "protected",
            Access::Private => "private",
            Access::None => "",
        }
    }
}

#[derive(Clone, Debug)]
pub struct StaticAssertDecl {
    pub cond: Expr,
    pub message: Option<Expr>,
    pub failed: bool,
}

#[derive(Clone, Debug)]
pub struct AliasDecl {
    pub name: String,
    pub underlying: TypeRef,
}

#[derive(Clone, Debug)]
pub struct UsingDecl {
    /// Pre-rendered qualifier segments, outermost first; empty inside
    /// function scope.
    pub scope: Vec<String>,
    pub name: String,
}
