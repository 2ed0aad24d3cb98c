//! The lambda scope stack.
//!
//! A closure's synthesized class definition must precede the full expression
//! that uses it, however deeply the closure sits inside that expression. Every
//! construct that can directly own a closure occurrence pushes a scope before
//! lowering its children. The scope owns a side buffer that collects hoisted
//! class definitions; when the construct finishes, the side buffer's content
//! is spliced into the flush target at the position recorded at push time —
//! which is exactly where the construct's own text began.
//!
//! The flush target is chosen by scanning the stack from the innermost entry
//! outward for the nearest scope whose trigger anchors placement. Nested
//! closures therefore land in the buffer already collecting their enclosing
//! anchor's definitions (a closure returned from inside another closure's
//! body hoists only to the top of that body, never past the enclosing class);
//! with no anchor on the stack, definitions land directly in the ambient
//! output.
//!
//! Splice positions stay valid because scopes pop in LIFO order and recorded
//! positions grow monotonically with push time: any insertion can only shift
//! text behind positions that no live scope still references.

/// Handle to one buffer inside the generator's buffer arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BufferId(pub(crate) usize);

/// The ambient output buffer.
pub(crate) const AMBIENT: BufferId = BufferId(0);

/// The syntactic position that caused a lambda scope to be pushed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LambdaTrigger {
    CallExpr,
    VarDecl,
    ReturnStmt,
    OperatorCall,
    MemberCall,
    BinaryOperator,
    /// A closure with no enclosing trigger; the class definition and a named
    /// instance are emitted in place.
    LambdaExpr,
}

impl LambdaTrigger {
    /// Whether this trigger kind anchors the placement of hoisted class
    /// definitions for closures nested below it.
    pub fn anchors_placement(self) -> bool {
        !matches!(self, LambdaTrigger::LambdaExpr)
    }
}

/// One lexically active closure-lowering context.
#[derive(Debug)]
pub(crate) struct LambdaScope {
    pub trigger: LambdaTrigger,
    /// Side buffer receiving synthesized class definitions.
    pub hoist: BufferId,
    /// Where the side buffer's content is spliced on pop.
    pub target: BufferId,
    /// Insertion offset into `target`, recorded at push time.
    pub target_pos: usize,
    /// Constructor-argument text to be appended at the closure's use site.
    pub inits: String,
}
