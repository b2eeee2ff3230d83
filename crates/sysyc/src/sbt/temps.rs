//! Temporary virtual register pool.
//!
//! Every `%n` the builder hands out for an intermediate value comes from
//! here. The pool is bounded (1024 by default, see `CompileOptions`): once
//! a function has produced that many distinct virtual registers, further
//! allocation fails with `TempExhausted` rather than growing silently.
//!
//! Allocation is monotonic, not a genuine free list — a freed slot is never
//! handed back out within the same function. Reusing a virtual register
//! name for two different live ranges would make the stack allocator (which
//! maps each distinct `%n`/`@name` token to its own slot by name) alias two
//! unrelated values onto one slot.

use crate::error::{CompileError, Result};
use crate::ir::graph::TempId;

pub struct TempPool {
    capacity: usize,
    next: u32,
}

impl TempPool {
    pub fn new(capacity: usize) -> Self {
        TempPool { capacity, next: 0 }
    }

    pub fn alloc(&mut self) -> Result<TempId> {
        if self.next as usize >= self.capacity {
            return Err(CompileError::TempExhausted { limit: self.capacity });
        }
        let id = TempId(self.next);
        self.next += 1;
        Ok(id)
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

impl Default for TempPool {
    fn default() -> Self {
        TempPool::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_increasing_ids() {
        let mut pool = TempPool::new(4);
        assert_eq!(pool.alloc().unwrap(), TempId(0));
        assert_eq!(pool.alloc().unwrap(), TempId(1));
    }

    #[test]
    fn exhaustion_is_reported() {
        let mut pool = TempPool::new(1);
        pool.alloc().unwrap();
        assert!(matches!(pool.alloc(), Err(CompileError::TempExhausted { limit: 1 })));
    }

    #[test]
    fn reset_restores_capacity_for_next_function() {
        let mut pool = TempPool::new(1);
        pool.alloc().unwrap();
        pool.reset();
        assert!(pool.alloc().is_ok());
    }
}
