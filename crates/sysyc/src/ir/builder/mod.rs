//! # IR Builder
//!
//! Translates an [`CompUnit`](crate::ast::CompUnit) into textual IR
//! (§4.2). Split into three pieces matching the design's natural
//! separation of responsibilities:
//!
//! | Module | Responsibility |
//! |---|---|
//! | [`core`] | Builder state: scope tree, symbol table, temp pool, block/temp allocation |
//! | [`translate`] | AST-node lowering: expressions (with constant folding), statements, `if`/`else` |
//! | [`dump`] | Wrapping the emitted instruction lines into a complete `fun @main(): i32 { ... }` program |

mod core;
mod dump;
mod translate;

use crate::ast::CompUnit;
use crate::error::Result;
use crate::CompileOptions;

pub use core::Builder;

/// Lowers a whole compilation unit to IR text, per §4.2.
#[tracing::instrument(skip(unit, options), level = "debug")]
pub fn lower(unit: &CompUnit, options: &CompileOptions) -> Result<String> {
    let mut builder = Builder::new(options.temp_pool_size);
    builder.lower_function(&unit.func)?;
    Ok(dump::assemble(&unit.func.ident, &builder.lines))
}
