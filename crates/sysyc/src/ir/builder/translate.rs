//! AST → IR text lowering (§4.2 of the design).
//!
//! Two synthesized-attribute families collapse onto one Rust type here: a lowered expression is either a folded constant (`isConst`/
//! `r_val`) or a not-yet-materialized reference (`t_id`/`ident`) that still
//! needs a `load` emitted at its point of use. `Lowered` is exactly that
//! union; `materialize` is `loadIfisPointer`.

use crate::ast::tree::*;
use crate::error::{CompileError, Result};
use crate::ir::graph::{BinOp, Operand};
use crate::sbt::{Binding, ScopeId};

use super::core::Builder;

/// The result of lowering an `Expr`, before it is necessarily usable as an
/// operand.
#[derive(Debug, Clone)]
pub(super) enum Lowered {
    /// Folded entirely at compile time; no IR was emitted for it.
    Const(i32),
    /// Already a usable operand (an immediate or a temp holding a value).
    Value(Operand),
    /// A named stack variable that has not been loaded yet.
    Name(String),
}

impl Builder {
    /// Lowers a whole compilation unit's function body, returning the
    /// assembled IR text for `fun @main(): i32 { ... }`.
    ///
    /// A trailing `if`/`else` whose arms both return (or a trailing `if`
    /// with no `else` at all) opens its join block last and leaves it
    /// untouched: `terminated` is cleared by `open_block` but nothing
    /// follows to give that block a terminator. Every basic block must end
    /// with one (§3.7), so a block still open when the body runs out falls
    /// off the end of `main` the way C does: `ret 0`.
    pub(super) fn lower_function(&mut self, func: &FuncDef) -> Result<()> {
        let entry = self.alloc_block();
        self.open_block(entry);
        let scope = self.root_scope();
        self.lower_block_in_scope(scope, &func.body)?;
        if !self.terminated {
            self.emit("ret 0".to_string());
            self.terminated = true;
        }
        Ok(())
    }

    /// Lowers a `Block` statement: allocates a fresh scope and walks its
    /// items, stopping early once `terminated` is set (§4.2.6).
    pub(super) fn lower_block(&mut self, parent: ScopeId, block: &Block) -> Result<()> {
        let scope = self.child_scope(parent);
        self.lower_block_in_scope(scope, block)
    }

    fn lower_block_in_scope(&mut self, scope: ScopeId, block: &Block) -> Result<()> {
        for item in &block.items {
            if self.terminated {
                break;
            }
            self.lower_block_item(scope, item)?;
        }
        Ok(())
    }

    fn lower_block_item(&mut self, scope: ScopeId, item: &BlockItem) -> Result<()> {
        match item {
            BlockItem::Decl(decl) => self.lower_decl(scope, decl),
            BlockItem::Stmt(stmt) => self.lower_stmt(scope, stmt),
        }
    }

    fn lower_decl(&mut self, scope: ScopeId, decl: &Decl) -> Result<()> {
        match decl {
            Decl::Const(defs) => {
                for def in defs {
                    let value = self.lower_expr(scope, &def.init)?;
                    let Lowered::Const(value) = value else {
                        return Err(CompileError::ParseShape {
                            line: 0,
                            message: format!(
                                "initializer for const `{}` is not a constant expression",
                                def.ident
                            ),
                        });
                    };
                    self.sbt.add_const(scope, &def.ident, value)?;
                }
                Ok(())
            }
            Decl::Var(defs) => {
                for def in defs {
                    let mangled = self.sbt.add_var(scope, &def.ident)?;
                    self.emit(format!("{} = alloc i32", Operand::Var(mangled.clone())));
                    let value = match &def.init {
                        Some(init) => {
                            let lowered = self.lower_expr(scope, init)?;
                            self.materialize(lowered)?
                        }
                        None => Operand::Int(0),
                    };
                    self.emit(format!("store {}, {}", value, Operand::Var(mangled)));
                }
                Ok(())
            }
        }
    }

    fn lower_stmt(&mut self, scope: ScopeId, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Assign { lval, value } => {
                let mangled = self.sbt.lookup_assignable(&self.tree, scope, lval)?.to_string();
                let lowered = self.lower_expr(scope, value)?;
                let operand = self.materialize(lowered)?;
                self.emit(format!("store {}, {}", operand, Operand::Var(mangled)));
                Ok(())
            }
            Stmt::Expr(Some(e)) => {
                self.lower_expr(scope, e)?;
                Ok(())
            }
            Stmt::Expr(None) => Ok(()),
            Stmt::Block(block) => self.lower_block(scope, block),
            Stmt::Return(value) => {
                let operand = match value {
                    Some(e) => {
                        let lowered = self.lower_expr(scope, e)?;
                        Some(self.materialize(lowered)?)
                    }
                    None => None,
                };
                match operand {
                    Some(op) => self.emit(format!("ret {op}")),
                    None => self.emit("ret".to_string()),
                }
                self.terminated = true;
                Ok(())
            }
            Stmt::If { cond, then_branch, else_branch } => {
                self.lower_if(scope, cond, then_branch, else_branch.as_deref())
            }
        }
    }

    fn lower_if(
        &mut self,
        scope: ScopeId,
        cond: &Expr,
        then_branch: &Stmt,
        else_branch: Option<&Stmt>,
    ) -> Result<()> {
        let lowered_cond = self.lower_expr(scope, cond)?;
        let cond_operand = self.materialize(lowered_cond)?;

        let then_block = self.alloc_block();
        let join_block = self.alloc_block();

        if let Some(else_branch) = else_branch {
            let else_block = self.alloc_block();
            self.emit(format!("br {cond_operand}, {then_block}, {else_block}"));

            self.open_block(then_block);
            self.lower_stmt(scope, then_branch)?;
            if !self.terminated {
                self.emit(format!("jump {join_block}"));
            }

            self.open_block(else_block);
            self.lower_stmt(scope, else_branch)?;
            if !self.terminated {
                self.emit(format!("jump {join_block}"));
            }
        } else {
            self.emit(format!("br {cond_operand}, {then_block}, {join_block}"));

            self.open_block(then_block);
            self.lower_stmt(scope, then_branch)?;
            if !self.terminated {
                self.emit(format!("jump {join_block}"));
            }
        }

        self.open_block(join_block);
        Ok(())
    }

    /// Turns a `Lowered` into a usable `Operand`, emitting a `load` for a
    /// bare variable name (§4.2.3 rule 2, "loadIfisPointer").
    fn materialize(&mut self, value: Lowered) -> Result<Operand> {
        match value {
            Lowered::Const(v) => Ok(Operand::Int(v)),
            Lowered::Value(op) => Ok(op),
            Lowered::Name(name) => {
                let dest = self.alloc_temp()?;
                self.emit(format!("{} = load {}", Operand::Temp(dest), Operand::Var(name)));
                Ok(Operand::Temp(dest))
            }
        }
    }

    fn lower_expr(&mut self, scope: ScopeId, expr: &Expr) -> Result<Lowered> {
        match expr {
            Expr::Number(n) => Ok(Lowered::Const(*n)),
            Expr::LVal(name) => match self.sbt.lookup(&self.tree, scope, name)? {
                Binding::Const(v) => Ok(Lowered::Const(*v)),
                Binding::Var(mangled) => Ok(Lowered::Name(mangled.clone())),
            },
            Expr::Unary { op, operand } => self.lower_unary(scope, *op, operand),
            Expr::Binary { op: BinaryOp::And, lhs, rhs } => {
                self.lower_short_circuit(scope, true, lhs, rhs)
            }
            Expr::Binary { op: BinaryOp::Or, lhs, rhs } => {
                self.lower_short_circuit(scope, false, lhs, rhs)
            }
            Expr::Binary { op, lhs, rhs } => self.lower_binary(scope, *op, lhs, rhs),
        }
    }

    fn lower_unary(&mut self, scope: ScopeId, op: UnaryOp, operand: &Expr) -> Result<Lowered> {
        let value = self.lower_expr(scope, operand)?;
        match op {
            UnaryOp::Plus => Ok(value),
            UnaryOp::Neg => match value {
                Lowered::Const(v) => Ok(Lowered::Const(0i32.wrapping_sub(v))),
                other => {
                    let operand = self.materialize(other)?;
                    let dest = self.alloc_temp()?;
                    self.emit(format!(
                        "{} = {} {}, {}",
                        Operand::Temp(dest),
                        BinOp::Sub.mnemonic(),
                        Operand::Int(0),
                        operand
                    ));
                    Ok(Lowered::Value(Operand::Temp(dest)))
                }
            },
            UnaryOp::Not => match value {
                Lowered::Const(v) => Ok(Lowered::Const((v == 0) as i32)),
                other => {
                    let operand = self.materialize(other)?;
                    let dest = self.alloc_temp()?;
                    self.emit(format!(
                        "{} = {} {}, {}",
                        Operand::Temp(dest),
                        BinOp::Eq.mnemonic(),
                        operand,
                        Operand::Int(0)
                    ));
                    Ok(Lowered::Value(Operand::Temp(dest)))
                }
            },
        }
    }

    /// `L op R` for every binary operator except `&&`/`||` (§4.2.3 rules
    /// 1-4): left then right, constant-fold if both sides folded, else
    /// allocate one temp and emit one instruction.
    fn lower_binary(&mut self, scope: ScopeId, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Result<Lowered> {
        let l = self.lower_expr(scope, lhs)?;
        let r = self.lower_expr(scope, rhs)?;
        if let (Lowered::Const(l), Lowered::Const(r)) = (&l, &r) {
            return Ok(Lowered::Const(fold_arith(op, *l, *r)?));
        }
        let lop = self.materialize(l)?;
        let rop = self.materialize(r)?;
        let dest = self.alloc_temp()?;
        let mnemonic = to_binop(op).mnemonic();
        self.emit(format!("{} = {} {}, {}", Operand::Temp(dest), mnemonic, lop, rop));
        Ok(Lowered::Value(Operand::Temp(dest)))
    }

    /// `&&`/`||` lower to the fixed `ne, ne, and|or` shape of §4.2.3,
    /// rather than through the generic binary-op path, but still fold to a
    /// single constant when both sides do (§8 invariant 4).
    fn lower_short_circuit(
        &mut self,
        scope: ScopeId,
        is_and: bool,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Result<Lowered> {
        let l = self.lower_expr(scope, lhs)?;
        let r = self.lower_expr(scope, rhs)?;
        if let (Lowered::Const(l), Lowered::Const(r)) = (&l, &r) {
            let (l, r) = (*l != 0, *r != 0);
            let result = if is_and { l && r } else { l || r };
            return Ok(Lowered::Const(result as i32));
        }

        let lop = self.materialize(l)?;
        let a = self.alloc_temp()?;
        self.emit(format!("{} = {} {}, {}", Operand::Temp(a), BinOp::NotEq.mnemonic(), lop, Operand::Int(0)));

        let rop = self.materialize(r)?;
        let b = self.alloc_temp()?;
        self.emit(format!("{} = {} {}, {}", Operand::Temp(b), BinOp::NotEq.mnemonic(), rop, Operand::Int(0)));

        let c = self.alloc_temp()?;
        let op = if is_and { BinOp::And } else { BinOp::Or };
        self.emit(format!(
            "{} = {} {}, {}",
            Operand::Temp(c),
            op.mnemonic(),
            Operand::Temp(a),
            Operand::Temp(b)
        ));
        Ok(Lowered::Value(Operand::Temp(c)))
    }
}

fn to_binop(op: BinaryOp) -> BinOp {
    match op {
        BinaryOp::Add => BinOp::Add,
        BinaryOp::Sub => BinOp::Sub,
        BinaryOp::Mul => BinOp::Mul,
        BinaryOp::Div => BinOp::Div,
        BinaryOp::Mod => BinOp::Mod,
        BinaryOp::Lt => BinOp::Lt,
        BinaryOp::Gt => BinOp::Gt,
        BinaryOp::Le => BinOp::Le,
        BinaryOp::Ge => BinOp::Ge,
        BinaryOp::Eq => BinOp::Eq,
        BinaryOp::NotEq => BinOp::NotEq,
        BinaryOp::And | BinaryOp::Or => unreachable!("handled by lower_short_circuit"),
    }
}

/// Host-arithmetic constant folding (§5 Open Question: wrapping for
/// add/sub/mul to match RISC-V two's-complement semantics, checked
/// div/rem so a compile-time `1/0` is a clean `ConstDivByZero` instead of a
/// host panic).
fn fold_arith(op: BinaryOp, l: i32, r: i32) -> Result<i32> {
    Ok(match op {
        BinaryOp::Add => l.wrapping_add(r),
        BinaryOp::Sub => l.wrapping_sub(r),
        BinaryOp::Mul => l.wrapping_mul(r),
        BinaryOp::Div => l.checked_div(r).ok_or(CompileError::ConstDivByZero { lhs: l, op: "div", rhs: r })?,
        BinaryOp::Mod => l.checked_rem(r).ok_or(CompileError::ConstDivByZero { lhs: l, op: "mod", rhs: r })?,
        BinaryOp::Lt => (l < r) as i32,
        BinaryOp::Gt => (l > r) as i32,
        BinaryOp::Le => (l <= r) as i32,
        BinaryOp::Ge => (l >= r) as i32,
        BinaryOp::Eq => (l == r) as i32,
        BinaryOp::NotEq => (l != r) as i32,
        BinaryOp::And | BinaryOp::Or => unreachable!("handled by lower_short_circuit"),
    })
}
