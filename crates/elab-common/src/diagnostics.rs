//! Diagnostic Infrastructure
//!
//! The generator never aborts on a malformed or unsupported node: it reports
//! through this channel and keeps producing output. Diagnostics carry a file
//! name, a byte offset, and a message; severity distinguishes constructs the
//! generator deliberately skipped (warnings) from conditions that should be
//! structurally impossible in a well-formed resolved tree (errors).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::span::{SourceLoc, SourceMap};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl DiagnosticCategory {
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DiagnosticCategory::Error)
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single diagnostic message tied to a source location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub file: String,
    pub start: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(file: impl Into<String>, loc: SourceLoc, message: impl Into<String>) -> Self {
        Diagnostic {
            category: DiagnosticCategory::Error,
            file: file.into(),
            start: loc.0,
            message_text: message.into(),
        }
    }

    pub fn warning(file: impl Into<String>, loc: SourceLoc, message: impl Into<String>) -> Self {
        Diagnostic {
            category: DiagnosticCategory::Warning,
            file: file.into(),
            start: loc.0,
            message_text: message.into(),
        }
    }

    /// Render as `file:line:col: severity: message` using the given resolver.
    pub fn format(&self, map: &SourceMap) -> String {
        let lc = map.line_col(SourceLoc(self.start));
        format!(
            "{}:{}:{}: {}: {}",
            self.file, lc.line, lc.column, self.category, self.message_text
        )
    }
}

/// A collection of diagnostics for one generation pass.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        DiagnosticBag::default()
    }

    pub fn error(&mut self, file: impl Into<String>, loc: SourceLoc, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(file, loc, message));
    }

    pub fn warning(&mut self, file: impl Into<String>, loc: SourceLoc, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::warning(file, loc, message));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.category.is_error())
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bag_collects_and_classifies() {
        let mut bag = DiagnosticBag::new();
        bag.warning("a.cpp", SourceLoc(3), "unsupported construct");
        assert!(!bag.has_errors());
        bag.error("a.cpp", SourceLoc(7), "no name reference found");
        assert!(bag.has_errors());
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn format_includes_location() {
        let map = SourceMap::new("a.cpp", "ab\ncd\n");
        let diag = Diagnostic::error("a.cpp", SourceLoc(4), "boom");
        assert_eq!(diag.format(&map), "a.cpp:2:2: error: boom");
    }
}
