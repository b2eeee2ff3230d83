//! Symbol table: the lexical block tree, the scoped binding table, and the
//! temporary virtual register pool.

pub mod blocks;
pub mod table;
pub mod temps;

pub use blocks::{ScopeId, ScopeTree};
pub use table::{mangle, Binding, SymbolTable};
pub use temps::TempPool;
