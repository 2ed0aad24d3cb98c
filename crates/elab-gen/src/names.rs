//! Deterministic synthesized-name generation.
//!
//! Every name the generator invents — closure class names, structured-binding
//! temporaries, function-pointer aliases — derives from the source location
//! and the original spelling, so re-running on identical input reproduces
//! identical output. A per-unit registry guards uniqueness: should two
//! distinct keys collide on the same rendered name, the later one gets a
//! deterministic numeric disambiguator.

use elab_common::LineCol;
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum NameKey {
    LambdaClass { line: u32, column: u32 },
    InternalVar { base: String, line: u32 },
    FuncPtrAlias { line: u32 },
}

#[derive(Default)]
pub struct NameGenerator {
    assigned: FxHashMap<NameKey, String>,
    taken: FxHashSet<String>,
}

impl NameGenerator {
    pub fn new() -> Self {
        NameGenerator::default()
    }

    /// Class name for the closure introduced at `lc`: `__lambda_<line>_<col>`.
    pub fn lambda_class(&mut self, lc: LineCol) -> String {
        let key = NameKey::LambdaClass {
            line: lc.line,
            column: lc.column,
        };
        let candidate = format!("__lambda_{}_{}", lc.line, lc.column);
        self.claim(key, candidate)
    }

    /// Internal variable derived from an original name and a line:
    /// `__<base><line>`.
    pub fn internal_var(&mut self, base: &str, line: u32) -> String {
        let key = NameKey::InternalVar {
            base: base.to_string(),
            line,
        };
        let candidate = format!("__{}{}", base, line);
        self.claim(key, candidate)
    }

    /// Internal variable with no location component: `__<base>`. Used for
    /// static-local storage, whose original name is already unique within its
    /// function.
    pub fn internal_var_plain(&mut self, base: &str) -> String {
        let key = NameKey::InternalVar {
            base: base.to_string(),
            line: 0,
        };
        let candidate = format!("__{}", base);
        self.claim(key, candidate)
    }

    /// Alias name for a function-pointer variable's type: `FuncPtr_<line>`.
    pub fn func_ptr_alias(&mut self, line: u32) -> String {
        let key = NameKey::FuncPtrAlias { line };
        let candidate = format!("FuncPtr_{}", line);
        self.claim(key, candidate)
    }

    fn claim(&mut self, key: NameKey, candidate: String) -> String {
        if let Some(existing) = self.assigned.get(&key) {
            return existing.clone();
        }
        let mut name = candidate.clone();
        let mut counter = 2usize;
        while self.taken.contains(&name) {
            name = format!("{}_{}", candidate, counter);
            counter += 1;
        }
        self.taken.insert(name.clone());
        self.assigned.insert(key, name.clone());
        name
    }
}
