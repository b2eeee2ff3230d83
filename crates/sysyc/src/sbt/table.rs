//! Scoped symbol table (SBT).
//!
//! Names are mangled as `<pureName>_<blockId>` when they reach the IR text
//! (`@x_0`, `@x_1`, ...), so two variables named `x` in sibling or nested
//! scopes never collide once lowered — only the front end's scope-aware
//! lookup needs to know which `x` a bare identifier refers to.

use std::collections::HashMap;

use super::blocks::{ScopeId, ScopeTree};
use crate::error::{CompileError, Result};

#[derive(Debug, Clone)]
pub enum Binding {
    Const(i32),
    /// The mangled name of the stack slot holding this variable.
    Var(String),
}

#[derive(Default)]
pub struct SymbolTable {
    scopes: HashMap<ScopeId, HashMap<String, Binding>>,
}

/// `<pureName>_<blockId>` — the one mangling rule used for every declared
/// name in the emitted IR.
pub fn mangle(pure_name: &str, scope: ScopeId) -> String {
    format!("{pure_name}_{scope}")
}

/// Inverse of [`mangle`]: splits on the *last* underscore, since the pure
/// name itself may contain underscores. An implementation detail of the
/// mangling scheme (§9), not part of this crate's public API — nothing
/// outside this module needs to reverse a mangled name.
#[cfg(test)]
fn demangle(mangled: &str) -> Option<(&str, u32)> {
    let idx = mangled.rfind('_')?;
    let (name, id) = (&mangled[..idx], &mangled[idx + 1..]);
    id.parse().ok().map(|id| (name, id))
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    fn scope(&self, id: ScopeId) -> Option<&HashMap<String, Binding>> {
        self.scopes.get(&id)
    }

    fn declared_here(&self, scope: ScopeId, name: &str) -> bool {
        self.scope(scope).is_some_and(|s| s.contains_key(name))
    }

    pub fn add_const(&mut self, scope: ScopeId, name: &str, value: i32) -> Result<()> {
        if self.declared_here(scope, name) {
            return Err(CompileError::Redefinition { name: name.to_string(), block_id: scope.0 });
        }
        self.scopes.entry(scope).or_default().insert(name.to_string(), Binding::Const(value));
        Ok(())
    }

    pub fn add_var(&mut self, scope: ScopeId, name: &str) -> Result<String> {
        if self.declared_here(scope, name) {
            return Err(CompileError::Redefinition { name: name.to_string(), block_id: scope.0 });
        }
        let mangled = mangle(name, scope);
        self.scopes.entry(scope).or_default().insert(name.to_string(), Binding::Var(mangled.clone()));
        Ok(mangled)
    }

    /// Walks from `scope` up through its ancestors (per [`ScopeTree::ancestors`])
    /// looking for `name`.
    pub fn lookup(&self, tree: &ScopeTree, scope: ScopeId, name: &str) -> Result<&Binding> {
        for ancestor in tree.ancestors(scope) {
            if let Some(binding) = self.scope(ancestor).and_then(|s| s.get(name)) {
                return Ok(binding);
            }
        }
        Err(CompileError::Undefined { name: name.to_string() })
    }

    /// Resolves an assignment target: must exist and must not be const.
    pub fn lookup_assignable(&self, tree: &ScopeTree, scope: ScopeId, name: &str) -> Result<&str> {
        match self.lookup(tree, scope, name)? {
            Binding::Var(mangled) => Ok(mangled),
            Binding::Const(_) => Err(CompileError::AssignToConst { name: name.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mangle_demangle_roundtrip() {
        let mangled = mangle("count", ScopeId(2));
        assert_eq!(mangled, "count_2");
        assert_eq!(demangle(&mangled), Some(("count", 2)));
    }

    #[test]
    fn demangle_handles_underscores_in_pure_name() {
        assert_eq!(demangle("loop_count_3"), Some(("loop_count", 3)));
    }

    #[test]
    fn redefinition_in_same_scope_is_rejected() {
        let mut sbt = SymbolTable::new();
        sbt.add_var(ScopeId(0), "x").unwrap();
        assert!(matches!(
            sbt.add_var(ScopeId(0), "x"),
            Err(CompileError::Redefinition { .. })
        ));
    }

    #[test]
    fn shadowing_in_nested_scope_is_allowed() {
        let mut sbt = SymbolTable::new();
        sbt.add_var(ScopeId(0), "x").unwrap();
        assert!(sbt.add_var(ScopeId(1), "x").is_ok());
    }

    #[test]
    fn lookup_walks_up_to_parent_scope() {
        let mut tree = ScopeTree::new();
        let child = tree.alloc_child(ScopeTree::root());
        let mut sbt = SymbolTable::new();
        sbt.add_var(ScopeTree::root(), "x").unwrap();
        assert!(sbt.lookup(&tree, child, "x").is_ok());
    }

    #[test]
    fn lookup_of_unknown_name_is_undefined() {
        let tree = ScopeTree::new();
        let sbt = SymbolTable::new();
        assert!(matches!(
            sbt.lookup(&tree, ScopeTree::root(), "ghost"),
            Err(CompileError::Undefined { .. })
        ));
    }

    #[test]
    fn assigning_to_const_is_rejected() {
        let tree = ScopeTree::new();
        let mut sbt = SymbolTable::new();
        sbt.add_const(ScopeTree::root(), "k", 7).unwrap();
        assert!(matches!(
            sbt.lookup_assignable(&tree, ScopeTree::root(), "k"),
            Err(CompileError::AssignToConst { .. })
        ));
    }
}
