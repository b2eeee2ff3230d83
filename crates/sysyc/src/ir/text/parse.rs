//! A small recursive-descent-free, line-oriented parser for the textual IR
//! sketched in spec §6.2. Every production the builder emits is handled;
//! anything else is a malformed-IR error (`IrParseShape`), which is the
//! only way this stage can fail — there is no semantic checking here, only
//! shape checking, by design (this plays the external-collaborator role
//! spec §1 describes as "thin glue").

use crate::error::{CompileError, Result};
use crate::ir::graph::{BasicBlock, BinOp, BlockId, Function, Instr, IrType, Operand, Program, Terminator, TempId};

fn shape(message: impl Into<String>) -> CompileError {
    CompileError::IrParseShape { line: 0, message: message.into() }
}

pub fn parse_program(text: &str) -> Result<Program> {
    let mut functions = Vec::new();
    let mut lines = text.lines();

    while let Some(raw) = lines.next() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        functions.push(parse_function(line, &mut lines)?);
    }

    Ok(Program { functions })
}

fn parse_function<'a>(header: &str, lines: &mut impl Iterator<Item = &'a str>) -> Result<Function> {
    let rest = header
        .strip_prefix("fun @")
        .ok_or_else(|| shape(format!("expected `fun @...`, found `{header}`")))?;
    let paren = rest.find('(').ok_or_else(|| shape("missing `(` in function header"))?;
    let name = rest[..paren].to_string();
    let ret_type = if rest.contains("i32") { IrType::Int32 } else { IrType::Unit };

    let mut blocks: Vec<BasicBlock> = Vec::new();
    let mut current: Option<BasicBlock> = None;

    loop {
        let raw = lines.next().ok_or_else(|| shape("unexpected end of input inside function body"))?;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == "}" {
            if let Some(b) = current.take() {
                blocks.push(b);
            }
            break;
        }
        if let Some(label) = line.strip_suffix(':') {
            if let Some(b) = current.take() {
                blocks.push(b);
            }
            current = Some(BasicBlock::new(parse_block_id(label)?));
            continue;
        }

        let block = current.as_mut().ok_or_else(|| shape("instruction outside any basic block"))?;
        match parse_terminator(line)? {
            Some(term) => block.terminator = Some(term),
            None => block.instrs.push(parse_instr(line)?),
        }
    }

    Ok(Function { name, ret_type, blocks })
}

fn parse_block_id(tok: &str) -> Result<BlockId> {
    let digits = tok
        .strip_prefix("%L")
        .ok_or_else(|| shape(format!("expected a block tag `%Lk`, found `{tok}`")))?;
    digits
        .parse()
        .map(BlockId)
        .map_err(|_| shape(format!("invalid block tag `{tok}`")))
}

fn parse_operand(tok: &str) -> Result<Operand> {
    let tok = tok.trim_end_matches(',');
    if let Some(name) = tok.strip_prefix('@') {
        return Ok(Operand::Var(name.to_string()));
    }
    if let Some(digits) = tok.strip_prefix('%') {
        return digits
            .parse()
            .map(|n| Operand::Temp(TempId(n)))
            .map_err(|_| shape(format!("invalid temporary `{tok}`")));
    }
    tok.parse().map(Operand::Int).map_err(|_| shape(format!("invalid operand `{tok}`")))
}

fn parse_terminator(line: &str) -> Result<Option<Terminator>> {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("ret") => {
            let value = match tokens.next() {
                Some(tok) => Some(parse_operand(tok)?),
                None => None,
            };
            Ok(Some(Terminator::Ret(value)))
        }
        Some("jump") => {
            let tok = tokens.next().ok_or_else(|| shape("`jump` with no target"))?;
            Ok(Some(Terminator::Jump(parse_block_id(tok)?)))
        }
        Some("br") => {
            let cond = tokens.next().ok_or_else(|| shape("`br` with no condition"))?;
            let then_tok = tokens.next().ok_or_else(|| shape("`br` missing then-target"))?;
            let else_tok = tokens.next().ok_or_else(|| shape("`br` missing else-target"))?;
            Ok(Some(Terminator::Branch {
                cond: parse_operand(cond)?,
                then_block: parse_block_id(then_tok.trim_end_matches(','))?,
                else_block: parse_block_id(else_tok)?,
            }))
        }
        _ => Ok(None),
    }
}

fn parse_instr(line: &str) -> Result<Instr> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if let Some(name) = tokens.first().and_then(|t| t.strip_prefix('@')) {
        if tokens.get(1) == Some(&"=") && tokens.get(2) == Some(&"alloc") {
            return Ok(Instr::Alloc { dest: name.to_string() });
        }
        return Err(shape(format!("malformed instruction `{line}`")));
    }

    if tokens.first() == Some(&"store") {
        let value = tokens.get(1).ok_or_else(|| shape("`store` missing value"))?;
        let dest = tokens.get(2).ok_or_else(|| shape("`store` missing destination"))?;
        return Ok(Instr::Store { value: parse_operand(value)?, dest: parse_operand(dest)? });
    }

    if let Some(dest_tok) = tokens.first().and_then(|t| t.strip_prefix('%')) {
        if tokens.get(1) != Some(&"=") {
            return Err(shape(format!("malformed instruction `{line}`")));
        }
        let dest =
            dest_tok.parse().map(TempId).map_err(|_| shape(format!("invalid temporary `{dest_tok}`")))?;
        match tokens.get(2) {
            Some(&"load") => {
                let src = tokens.get(3).ok_or_else(|| shape("`load` missing source"))?;
                return Ok(Instr::Load { dest, src: parse_operand(src)? });
            }
            Some(mnemonic) => {
                let op = BinOp::from_mnemonic(mnemonic)
                    .ok_or_else(|| shape(format!("unsupported operator `{mnemonic}`")))?;
                let lhs = tokens.get(3).ok_or_else(|| shape("binary op missing lhs"))?;
                let rhs = tokens.get(4).ok_or_else(|| shape("binary op missing rhs"))?;
                return Ok(Instr::Binary { dest, op, lhs: parse_operand(lhs)?, rhs: parse_operand(rhs)? });
            }
            None => return Err(shape(format!("malformed instruction `{line}`"))),
        }
    }

    Err(shape(format!("unrecognized instruction `{line}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::graph::Operand;

    #[test]
    fn parses_minimal_function() {
        let text = "fun @main(): i32 {\n%L0:\n  ret 0\n}\n";
        let program = parse_program(text).unwrap();
        assert_eq!(program.functions.len(), 1);
        let func = &program.functions[0];
        assert_eq!(func.name, "main");
        assert_eq!(func.blocks.len(), 1);
        assert_eq!(func.blocks[0].terminator, Some(Terminator::Ret(Some(Operand::Int(0)))));
    }

    #[test]
    fn parses_alloc_store_load_and_binary() {
        let text = "fun @main(): i32 {\n%L0:\n  @x_0 = alloc i32\n  store 5, @x_0\n  %0 = load @x_0\n  %1 = add %0, 2\n  ret %1\n}\n";
        let program = parse_program(text).unwrap();
        let block = &program.functions[0].blocks[0];
        assert_eq!(block.instrs.len(), 4);
        assert!(matches!(block.instrs[0], Instr::Alloc { .. }));
        assert!(matches!(block.instrs[1], Instr::Store { .. }));
        assert!(matches!(block.instrs[2], Instr::Load { .. }));
        assert!(matches!(block.instrs[3], Instr::Binary { op: BinOp::Add, .. }));
    }

    #[test]
    fn parses_branch_and_jump() {
        let text = "fun @main(): i32 {\n%L0:\n  br %0, %L1, %L2\n%L1:\n  jump %L2\n%L2:\n  ret 0\n}\n";
        let program = parse_program(text).unwrap();
        let func = &program.functions[0];
        assert_eq!(func.blocks.len(), 3);
        assert!(matches!(func.blocks[0].terminator, Some(Terminator::Branch { .. })));
        assert_eq!(func.blocks[1].terminator, Some(Terminator::Jump(BlockId(2))));
    }

    #[test]
    fn malformed_instruction_is_a_parse_shape_error() {
        let text = "fun @main(): i32 {\n%L0:\n  this is not ir\n}\n";
        assert!(matches!(parse_program(text), Err(CompileError::IrParseShape { .. })));
    }
}
