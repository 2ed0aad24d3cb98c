//! Source locations and the location-to-line/column resolver.
//!
//! The generator consumes an already-resolved tree; the only things it needs
//! from the original source are byte offsets (carried on a handful of node
//! kinds) and a way to turn them into 1-based line/column pairs. Lines and
//! columns feed deterministic name synthesis and diagnostic messages, nothing
//! else.

use serde::{Deserialize, Serialize};

/// A byte offset into the translation unit's source text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLoc(pub u32);

impl SourceLoc {
    pub fn offset(self) -> u32 {
        self.0
    }
}

/// A resolved 1-based line/column pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

/// Maps byte offsets to line/column pairs for one translation unit.
pub struct SourceMap {
    file_name: String,
    /// Byte offset of the first character of each line, in ascending order.
    line_starts: Vec<u32>,
    len: u32,
}

impl SourceMap {
    pub fn new(file_name: impl Into<String>, text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (pos, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(pos as u32 + 1);
            }
        }
        SourceMap {
            file_name: file_name.into(),
            line_starts,
            len: text.len() as u32,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resolve an offset to its 1-based line/column. Offsets past the end of
    /// the text resolve to the last line rather than panicking; the resolver
    /// is used for display and name synthesis, not bounds enforcement.
    pub fn line_col(&self, loc: SourceLoc) -> LineCol {
        let offset = loc.0.min(self.len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        LineCol {
            line: line_idx as u32 + 1,
            column: offset - self.line_starts[line_idx] + 1,
        }
    }
}
