//! The lexical block tree. Every `{ ... }` in the source, including the
//! function body itself, gets a `ScopeId`; the root (function body) is
//! always `ScopeId(0)`. Parent links are stored in a flat arena rather than
//! as raw pointers between heap-allocated nodes, so there is nothing to free
//! and nothing that can dangle.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct ScopeTree {
    /// `parents[id]` is the parent of scope `id`; the root has no parent.
    parents: Vec<Option<ScopeId>>,
}

impl ScopeTree {
    pub fn new() -> Self {
        ScopeTree { parents: vec![None] }
    }

    pub fn root() -> ScopeId {
        ScopeId(0)
    }

    /// Allocates a fresh child scope under `parent`.
    pub fn alloc_child(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.parents.len() as u32);
        self.parents.push(Some(parent));
        id
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.parents[id.0 as usize]
    }

    /// The chain `id, parent(id), parent(parent(id)), ..., root`, in that
    /// search order — used by symbol-table lookups (§4.1's DFS up the block
    /// tree).
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        let mut cur = Some(id);
        std::iter::from_fn(move || {
            let this = cur?;
            cur = self.parent(this);
            Some(this)
        })
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_no_parent() {
        let tree = ScopeTree::new();
        assert_eq!(tree.parent(ScopeTree::root()), None);
    }

    #[test]
    fn ancestors_walk_to_root() {
        let mut tree = ScopeTree::new();
        let a = tree.alloc_child(ScopeTree::root());
        let b = tree.alloc_child(a);
        let chain: Vec<ScopeId> = tree.ancestors(b).collect();
        assert_eq!(chain, vec![b, a, ScopeTree::root()]);
    }

    #[test]
    fn sibling_scopes_do_not_see_each_other() {
        let mut tree = ScopeTree::new();
        let a = tree.alloc_child(ScopeTree::root());
        let b = tree.alloc_child(ScopeTree::root());
        assert!(!tree.ancestors(a).any(|s| s == b));
    }
}
