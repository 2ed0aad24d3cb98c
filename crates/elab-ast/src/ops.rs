//! Operator kind tables with their source spellings, plus cast kinds.

/// Binary operator kinds, including compound assignments and the comma
/// operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    LogicalAnd,
    LogicalOr,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    XorAssign,
    OrAssign,
    Comma,
}

impl BinOp {
    pub fn spelling(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::BitAnd => "&",
            BinOp::BitXor => "^",
            BinOp::BitOr => "|",
            BinOp::LogicalAnd => "&&",
            BinOp::LogicalOr => "||",
            BinOp::Assign => "=",
            BinOp::AddAssign => "+=",
            BinOp::SubAssign => "-=",
            BinOp::MulAssign => "*=",
            BinOp::DivAssign => "/=",
            BinOp::RemAssign => "%=",
            BinOp::ShlAssign => "<<=",
            BinOp::ShrAssign => ">>=",
            BinOp::AndAssign => "&=",
            BinOp::XorAssign => "^=",
            BinOp::OrAssign => "|=",
            BinOp::Comma => ",",
        }
    }
}

/// Unary operator kinds. Postfix increment/decrement are distinct variants so
/// the emitter can place the spelling on the right side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnOp {
    PostInc,
    PostDec,
    PreInc,
    PreDec,
    AddrOf,
    Deref,
    Plus,
    Minus,
    Not,
    LogicalNot,
}

impl UnOp {
    pub fn spelling(self) -> &'static str {
        match self {
            UnOp::PostInc | UnOp::PreInc => "++",
            UnOp::PostDec | UnOp::PreDec => "--",
            UnOp::AddrOf => "&",
            UnOp::Deref => "*",
            UnOp::Plus => "+",
            UnOp::Minus => "-",
            UnOp::Not => "~",
            UnOp::LogicalNot => "!",
        }
    }

    pub fn is_postfix(self) -> bool {
        matches!(self, UnOp::PostInc | UnOp::PostDec)
    }
}

/// Overloadable operator kinds as resolved by the front end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverloadedOp {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Amp,
    Pipe,
    Tilde,
    Exclaim,
    Equal,
    Less,
    Greater,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    LessLess,
    GreaterGreater,
    LessLessEqual,
    GreaterGreaterEqual,
    EqualEqual,
    ExclaimEqual,
    LessEqual,
    GreaterEqual,
    AmpAmp,
    PipePipe,
    PlusPlus,
    MinusMinus,
    Comma,
    ArrowStar,
    Arrow,
    Call,
    Subscript,
}

impl OverloadedOp {
    /// The token spelled after `operator`.
    pub fn spelling(self) -> &'static str {
        match self {
            OverloadedOp::Plus => "+",
            OverloadedOp::Minus => "-",
            OverloadedOp::Star => "*",
            OverloadedOp::Slash => "/",
            OverloadedOp::Percent => "%",
            OverloadedOp::Caret => "^",
            OverloadedOp::Amp => "&",
            OverloadedOp::Pipe => "|",
            OverloadedOp::Tilde => "~",
            OverloadedOp::Exclaim => "!",
            OverloadedOp::Equal => "=",
            OverloadedOp::Less => "<",
            OverloadedOp::Greater => ">",
            OverloadedOp::PlusEqual => "+=",
            OverloadedOp::MinusEqual => "-=",
            OverloadedOp::StarEqual => "*=",
            OverloadedOp::SlashEqual => "/=",
            OverloadedOp::LessLess => "<<",
            OverloadedOp::GreaterGreater => ">>",
            OverloadedOp::LessLessEqual => "<<=",
            OverloadedOp::GreaterGreaterEqual => ">>=",
            OverloadedOp::EqualEqual => "==",
            OverloadedOp::ExclaimEqual => "!=",
            OverloadedOp::LessEqual => "<=",
            OverloadedOp::GreaterEqual => ">=",
            OverloadedOp::AmpAmp => "&&",
            OverloadedOp::PipePipe => "||",
            OverloadedOp::PlusPlus => "++",
            OverloadedOp::MinusMinus => "--",
            OverloadedOp::Comma => ",",
            OverloadedOp::ArrowStar => "->*",
            OverloadedOp::Arrow => "->",
            OverloadedOp::Call => "()",
            OverloadedOp::Subscript => "[]",
        }
    }
}

/// The resolved kind of a cast, implicit or explicit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastKind {
    LValueToRValue,
    NoOp,
    ArrayToPointerDecay,
    FunctionToPointerDecay,
    NullToPointer,
    IntegralCast,
    IntegralToBoolean,
    IntegralToFloating,
    FloatingToIntegral,
    FloatingCast,
    DerivedToBase,
    UncheckedDerivedToBase,
    BitCast,
    UserDefinedConversion,
    ConstructorConversion,
    PointerToBoolean,
    ToVoid,
}

impl CastKind {
    /// Whether an implicit cast of this kind carries behavior worth making
    /// visible. Decorative value-category and decay adjustments stay silent.
    pub fn is_visible_conversion(self) -> bool {
        matches!(
            self,
            CastKind::IntegralCast
                | CastKind::IntegralToFloating
                | CastKind::FloatingToIntegral
                | CastKind::FloatingCast
                | CastKind::DerivedToBase
                | CastKind::UncheckedDerivedToBase
                | CastKind::BitCast
        )
    }

    pub fn is_derived_to_base(self) -> bool {
        matches!(
            self,
            CastKind::DerivedToBase | CastKind::UncheckedDerivedToBase
        )
    }
}

/// The explicitly spelled named casts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NamedCastKind {
    Static,
    Const,
    Reinterpret,
    Dynamic,
}

impl NamedCastKind {
    pub fn name(self) -> &'static str {
        match self {
            NamedCastKind::Static => "static_cast",
            NamedCastKind::Const => "const_cast",
            NamedCastKind::Reinterpret => "reinterpret_cast",
            NamedCastKind::Dynamic => "dynamic_cast",
        }
    }
}
