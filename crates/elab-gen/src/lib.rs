//! elab-gen: the desugaring code generator.
//!
//! Consumes the fully resolved tree from `elab-ast` and re-emits it as
//! explicit source text in the same language. Constructs whose runtime
//! behavior the compiler defines through internal lowering rules — closures,
//! structured bindings, range-based iteration, overloaded-operator calls,
//! guarded static locals, implicit casts — are printed in the equivalent form
//! a programmer could have written by hand.
//!
//! The pass is a single depth-first traversal. Output normally flows into one
//! ambient buffer; lowering a construct that can anchor a closure temporarily
//! redirects writes into a side buffer, which is spliced back ahead of the
//! enclosing statement when the construct finishes (see [`lambda`]).

pub mod context;
pub mod generator;
pub mod lambda;
pub mod names;
pub mod writer;

pub use context::{GenContext, GenOptions};
pub use generator::{CodeGenerator, GenOutput, generate};
pub use lambda::LambdaTrigger;
pub use writer::{NoNewLineBefore, OutputBuffer};
