//! Builder state: scope tree, symbol table, temp pool, and the single
//! `terminated` flag that drives both branch-landing-pad emission (§4.2.5)
//! and post-return dead-code suppression (§4.2.6).
//!
//! One way to get "no IR text for statements that follow an unconditional
//! `return` in the same straight-line block" is a branch counter plus a
//! sentinel character appended to the emitted text, truncated at dump
//! time. This builder reaches the same observable result without a
//! sentinel, by simply not lowering those statements at all: `lower_block`
//! stops walking its item list once `terminated` is set. See DESIGN.md.

use crate::error::Result;
use crate::ir::graph::{BlockId, TempId};
use crate::sbt::{ScopeId, ScopeTree, SymbolTable, TempPool};

pub struct Builder {
    pub(super) tree: ScopeTree,
    pub(super) sbt: SymbolTable,
    pub(super) temps: TempPool,
    pub(super) lines: Vec<String>,
    next_block: u32,
    /// Set once the current straight-line block has emitted a terminator
    /// (`ret`, `jump`, or `br`). Checked before lowering each further
    /// statement in the same block and reset to `false` whenever a new
    /// block's label is emitted.
    pub(super) terminated: bool,
}

impl Builder {
    pub fn new(temp_pool_size: usize) -> Self {
        Builder {
            tree: ScopeTree::new(),
            sbt: SymbolTable::new(),
            temps: TempPool::new(temp_pool_size),
            lines: Vec::new(),
            next_block: 0,
            terminated: false,
        }
    }

    pub(super) fn root_scope(&self) -> ScopeId {
        ScopeTree::root()
    }

    pub(super) fn child_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.tree.alloc_child(parent)
    }

    /// Allocates the next basic-block tag, `%L0, %L1, ...`, in the order
    /// blocks are entered. The function's entry block is always the first
    /// one allocated, so it is always `%L0`.
    pub(super) fn alloc_block(&mut self) -> BlockId {
        let id = BlockId(self.next_block);
        self.next_block += 1;
        id
    }

    pub(super) fn alloc_temp(&mut self) -> Result<TempId> {
        self.temps.alloc()
    }

    pub(super) fn emit(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Opens a new basic block: emits its label and marks the builder as
    /// live again (reachable) starting from this point.
    pub(super) fn open_block(&mut self, id: BlockId) {
        self.emit(format!("{id}:"));
        self.terminated = false;
    }
}
