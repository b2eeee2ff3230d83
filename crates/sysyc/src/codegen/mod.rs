//! Back end: stack frame allocation (§4.4) and RISC-V emission (§4.5).

pub mod emit;
pub mod stack;

use crate::error::Result;
use crate::ir::graph::Program;

/// Runs the full back end over an already-parsed IR graph: compute the
/// shared frame size from the source text (§4.4), then emit RISC-V (§4.5).
#[tracing::instrument(skip(program, ir_text), level = "debug")]
pub fn generate(program: &Program, ir_text: &str) -> Result<String> {
    let stack_size = stack::scan_stack_size(ir_text);
    tracing::debug!(stack_size, "computed frame size");
    emit::emit_program(program, stack_size)
}
