//! Shared infrastructure for the elab code generator: source locations,
//! the line/column resolver, and the diagnostic channel.

pub mod diagnostics;
pub mod span;

pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticCategory};
pub use span::{LineCol, SourceLoc, SourceMap};
