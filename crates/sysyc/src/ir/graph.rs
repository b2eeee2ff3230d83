//! The in-memory IR graph — "Program / Function / BasicBlock / Value" from
//! the data model. This is the consumer-side representation: both the
//! builder (which constructs it while lowering the AST) and the textual
//! parser (which reconstructs it from a `.koopa` file for the `-riscv`
//! pipeline stage) produce the same `Program`.

use std::fmt;

/// A basic-block tag, `%L0`, `%L1`, ... allocated in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%L{}", self.0)
    }
}

/// A virtual register, `%0`, `%1`, ... drawn from the temp pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TempId(pub u32);

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// An operand: an immediate, a virtual register, or a named stack slot
/// pointer (`@name`, produced by `alloc`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Int(i32),
    Temp(TempId),
    Var(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(v) => write!(f, "{v}"),
            Operand::Temp(t) => write!(f, "{t}"),
            Operand::Var(name) => write!(f, "@{name}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Eq,
    NotEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Ge,
    Gt,
    Le,
    Lt,
    And,
    Or,
}

impl BinOp {
    /// The mnemonic this op lowers to in the textual IR (`%n = <mnemonic> a, b`).
    pub fn mnemonic(self) -> &'static str {
        match self {
            BinOp::Eq => "eq",
            BinOp::NotEq => "ne",
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::Div => "div",
            BinOp::Mod => "mod",
            BinOp::Ge => "ge",
            BinOp::Gt => "gt",
            BinOp::Le => "le",
            BinOp::Lt => "lt",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }

    pub fn from_mnemonic(s: &str) -> Option<Self> {
        Some(match s {
            "eq" => BinOp::Eq,
            "ne" => BinOp::NotEq,
            "add" => BinOp::Add,
            "sub" => BinOp::Sub,
            "mul" => BinOp::Mul,
            "div" => BinOp::Div,
            "mod" => BinOp::Mod,
            "ge" => BinOp::Ge,
            "gt" => BinOp::Gt,
            "le" => BinOp::Le,
            "lt" => BinOp::Lt,
            "and" => BinOp::And,
            "or" => BinOp::Or,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instr {
    /// `@name = alloc i32`
    Alloc { dest: String },
    /// `%n = load @name`
    Load { dest: TempId, src: Operand },
    /// `store value, @name`
    Store { value: Operand, dest: Operand },
    /// `%n = <op> lhs, rhs`
    Binary { dest: TempId, op: BinOp, lhs: Operand, rhs: Operand },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminator {
    Ret(Option<Operand>),
    Jump(BlockId),
    Branch { cond: Operand, then_block: BlockId, else_block: BlockId },
}

#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub id: BlockId,
    pub instrs: Vec<Instr>,
    /// Always `Some` once the builder finalizes the function — every block
    /// carries exactly one terminator, even unreachable ones (see
    /// `ir::builder::translate`'s dead-code handling).
    pub terminator: Option<Terminator>,
}

impl BasicBlock {
    pub fn new(id: BlockId) -> Self {
        BasicBlock { id, instrs: Vec::new(), terminator: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrType {
    Int32,
    Unit,
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Int32 => write!(f, "i32"),
            IrType::Unit => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub ret_type: IrType,
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    pub fn entry(&self) -> &BasicBlock {
        &self.blocks[0]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Program {
    pub functions: Vec<Function>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_id_displays_with_l_tag() {
        assert_eq!(BlockId(3).to_string(), "%L3");
    }

    #[test]
    fn temp_id_displays_as_percent_number() {
        assert_eq!(TempId(7).to_string(), "%7");
    }

    #[test]
    fn operand_display_matches_textual_ir_shapes() {
        assert_eq!(Operand::Int(-1).to_string(), "-1");
        assert_eq!(Operand::Temp(TempId(2)).to_string(), "%2");
        assert_eq!(Operand::Var("x_0".into()).to_string(), "@x_0");
    }

    #[test]
    fn binop_mnemonic_roundtrips() {
        for op in [
            BinOp::Eq, BinOp::NotEq, BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div,
            BinOp::Mod, BinOp::Ge, BinOp::Gt, BinOp::Le, BinOp::Lt, BinOp::And, BinOp::Or,
        ] {
            assert_eq!(BinOp::from_mnemonic(op.mnemonic()), Some(op));
        }
    }
}
