//! Generation context: the front-end collaborators and output options.

use elab_common::SourceMap;

/// Output shaping options.
#[derive(Clone, Debug)]
pub struct GenOptions {
    /// Spaces per indent level.
    pub indent_width: usize,
}

impl Default for GenOptions {
    fn default() -> Self {
        GenOptions { indent_width: 2 }
    }
}

/// Everything a generation pass borrows from the outside: the line/column
/// resolver for deterministic name synthesis and diagnostics, plus options.
pub struct GenContext<'a> {
    pub source_map: &'a SourceMap,
    pub options: GenOptions,
}

impl<'a> GenContext<'a> {
    pub fn new(source_map: &'a SourceMap) -> Self {
        GenContext {
            source_map,
            options: GenOptions::default(),
        }
    }

    pub fn with_options(source_map: &'a SourceMap, options: GenOptions) -> Self {
        GenContext {
            source_map,
            options,
        }
    }
}
