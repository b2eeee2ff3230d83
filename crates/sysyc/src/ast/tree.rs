//! Abstract syntax tree for the source language.
//!
//! A tagged sum rather than a class hierarchy with mutable attribute slots:
//! `depth`/`blockId`/`t_type`/`r_val`/`isConst` from the component design are
//! not stored on the tree at all. They're synthesized during IR lowering and
//! threaded through as return values of the recursive lowering functions (see
//! `ir::builder::translate`), the same way a textbook attribute grammar would
//! be implemented with ordinary recursive functions instead of mutable node
//! fields.

/// A whole source file: one function, `main`, returning `int`.
#[derive(Debug, Clone)]
pub struct CompUnit {
    pub func: FuncDef,
}

#[derive(Debug, Clone)]
pub struct FuncDef {
    pub ident: String,
    pub body: Block,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub items: Vec<BlockItem>,
}

#[derive(Debug, Clone)]
pub enum BlockItem {
    Decl(Decl),
    Stmt(Stmt),
}

#[derive(Debug, Clone)]
pub enum Decl {
    Const(Vec<ConstDef>),
    Var(Vec<VarDef>),
}

#[derive(Debug, Clone)]
pub struct ConstDef {
    pub ident: String,
    pub init: Expr,
}

#[derive(Debug, Clone)]
pub struct VarDef {
    pub ident: String,
    pub init: Option<Expr>,
}

/// Statement grammar already resolved for dangling-else: `If` always carries
/// a matched `then` arm resolved at parse time by the matched/unmatched
/// production split, so the builder never has to disambiguate.
#[derive(Debug, Clone)]
pub enum Stmt {
    Assign { lval: String, value: Expr },
    Expr(Option<Expr>),
    Block(Block),
    If { cond: Expr, then_branch: Box<Stmt>, else_branch: Option<Box<Stmt>> },
    Return(Option<Expr>),
}

#[derive(Debug, Clone)]
pub enum Expr {
    Number(i32),
    LVal(String),
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    NotEq,
    And,
    Or,
}
