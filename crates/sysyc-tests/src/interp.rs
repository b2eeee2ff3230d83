//! A tiny interpreter over the parsed IR graph, used only by tests.
//!
//! It mirrors the back end's own traversal (one pass over a function's
//! blocks, following `Jump`/`Branch` terminators) but evaluates values with
//! a `HashMap` instead of emitting RISC-V for them.

use std::collections::HashMap;

use sysyc::ir::graph::{BasicBlock, BinOp, Function, Instr, Operand, Program, Terminator};

/// Runs `main` to completion and returns its `ret` operand (0 if `ret;`
/// with no value, matching the RISC-V back end's behaviour of leaving `a0`
/// at whatever it already holds — callers of this interpreter only ever
/// pass programs with a value-carrying `return`, per §1's scope).
pub fn run_main(program: &Program) -> i32 {
    let main = program
        .functions
        .iter()
        .find(|f| f.name == "@main" || f.name == "main")
        .expect("program has no main function");
    run_function(main)
}

fn run_function(func: &Function) -> i32 {
    let mut temps: HashMap<u32, i32> = HashMap::new();
    let mut vars: HashMap<String, i32> = HashMap::new();
    let by_id: HashMap<u32, &BasicBlock> = func.blocks.iter().map(|b| (b.id.0, b)).collect();

    let mut block = func.entry();
    loop {
        for instr in &block.instrs {
            match instr {
                Instr::Alloc { dest } => {
                    vars.insert(dest.clone(), 0);
                }
                Instr::Load { dest, src } => {
                    let value = eval(src, &temps, &vars);
                    temps.insert(dest.0, value);
                }
                Instr::Store { value, dest } => {
                    let value = eval(value, &temps, &vars);
                    let Operand::Var(name) = dest else {
                        panic!("store target is not a variable: {dest:?}");
                    };
                    vars.insert(name.clone(), value);
                }
                Instr::Binary { dest, op, lhs, rhs } => {
                    let l = eval(lhs, &temps, &vars);
                    let r = eval(rhs, &temps, &vars);
                    temps.insert(dest.0, eval_binop(*op, l, r));
                }
            }
        }

        match block.terminator.as_ref().expect("block missing terminator") {
            Terminator::Ret(value) => {
                return value.as_ref().map_or(0, |op| eval(op, &temps, &vars));
            }
            Terminator::Jump(target) => {
                block = by_id[&target.0];
            }
            Terminator::Branch { cond, then_block, else_block } => {
                let taken = if eval(cond, &temps, &vars) != 0 { then_block } else { else_block };
                block = by_id[&taken.0];
            }
        }
    }
}

fn eval(operand: &Operand, temps: &HashMap<u32, i32>, vars: &HashMap<String, i32>) -> i32 {
    match operand {
        Operand::Int(v) => *v,
        Operand::Temp(t) => temps[&t.0],
        Operand::Var(name) => vars[name],
    }
}

fn eval_binop(op: BinOp, l: i32, r: i32) -> i32 {
    match op {
        BinOp::Add => l.wrapping_add(r),
        BinOp::Sub => l.wrapping_sub(r),
        BinOp::Mul => l.wrapping_mul(r),
        BinOp::Div => l.wrapping_div(r),
        BinOp::Mod => l.wrapping_rem(r),
        BinOp::And => ((l != 0) && (r != 0)) as i32,
        BinOp::Or => ((l != 0) || (r != 0)) as i32,
        BinOp::Eq => (l == r) as i32,
        BinOp::NotEq => (l != r) as i32,
        BinOp::Lt => (l < r) as i32,
        BinOp::Gt => (l > r) as i32,
        BinOp::Le => (l <= r) as i32,
        BinOp::Ge => (l >= r) as i32,
    }
}
