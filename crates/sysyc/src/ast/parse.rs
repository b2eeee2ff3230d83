//! Recursive-descent parser producing the AST.
//!
//! `if`/`else` dangling-else resolution: rather than splitting the grammar
//! into matched/unmatched statement productions, a plain recursive descent
//! parser resolves it implicitly — after parsing a `then` statement it
//! immediately checks for a following `else` token and attaches it if
//! present, which is exactly "bind to the nearest unmatched `if`". Same
//! result as the formal MS/UMS grammar split, fewer productions.

use super::lex::{Lexer, Token};
use super::tree::*;
use crate::error::{CompileError, Result};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    line: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(src);
        let (cur, line) = lexer.next_token()?;
        Ok(Parser { lexer, cur, line })
    }

    fn bump(&mut self) -> Result<Token> {
        let (next, line) = self.lexer.next_token()?;
        self.line = line;
        Ok(std::mem::replace(&mut self.cur, next))
    }

    fn expect(&mut self, tok: &Token) -> Result<()> {
        if &self.cur == tok {
            self.bump()?;
            Ok(())
        } else {
            Err(CompileError::ParseShape {
                line: self.line,
                message: format!("expected {:?}, found {:?}", tok, self.cur),
            })
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        match self.bump()? {
            Token::Ident(name) => Ok(name),
            other => Err(CompileError::ParseShape {
                line: self.line,
                message: format!("expected identifier, found {:?}", other),
            }),
        }
    }

    pub fn parse_comp_unit(&mut self) -> Result<CompUnit> {
        self.expect(&Token::Int)?;
        let ident = self.expect_ident()?;
        self.expect(&Token::LParen)?;
        self.expect(&Token::RParen)?;
        let body = self.parse_block()?;
        self.expect(&Token::Eof)?;
        Ok(CompUnit { func: FuncDef { ident, body } })
    }

    fn parse_block(&mut self) -> Result<Block> {
        self.expect(&Token::LBrace)?;
        let mut items = Vec::new();
        while self.cur != Token::RBrace {
            items.push(self.parse_block_item()?);
        }
        self.expect(&Token::RBrace)?;
        Ok(Block { items })
    }

    fn parse_block_item(&mut self) -> Result<BlockItem> {
        match self.cur {
            Token::Const => Ok(BlockItem::Decl(self.parse_const_decl()?)),
            Token::Int => Ok(BlockItem::Decl(self.parse_var_decl()?)),
            _ => Ok(BlockItem::Stmt(self.parse_stmt()?)),
        }
    }

    fn parse_const_decl(&mut self) -> Result<Decl> {
        self.expect(&Token::Const)?;
        self.expect(&Token::Int)?;
        let mut defs = Vec::new();
        loop {
            let ident = self.expect_ident()?;
            self.expect(&Token::Assign)?;
            let init = self.parse_expr()?;
            defs.push(ConstDef { ident, init });
            if self.cur == Token::Comma {
                self.bump()?;
                continue;
            }
            break;
        }
        self.expect(&Token::Semi)?;
        Ok(Decl::Const(defs))
    }

    fn parse_var_decl(&mut self) -> Result<Decl> {
        self.expect(&Token::Int)?;
        let mut defs = Vec::new();
        loop {
            let ident = self.expect_ident()?;
            let init = if self.cur == Token::Assign {
                self.bump()?;
                Some(self.parse_expr()?)
            } else {
                None
            };
            defs.push(VarDef { ident, init });
            if self.cur == Token::Comma {
                self.bump()?;
                continue;
            }
            break;
        }
        self.expect(&Token::Semi)?;
        Ok(Decl::Var(defs))
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        match &self.cur {
            Token::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            Token::Semi => {
                self.bump()?;
                Ok(Stmt::Expr(None))
            }
            Token::If => {
                self.bump()?;
                self.expect(&Token::LParen)?;
                let cond = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                let then_branch = Box::new(self.parse_stmt()?);
                let else_branch = if self.cur == Token::Else {
                    self.bump()?;
                    Some(Box::new(self.parse_stmt()?))
                } else {
                    None
                };
                Ok(Stmt::If { cond, then_branch, else_branch })
            }
            Token::Return => {
                self.bump()?;
                let value = if self.cur == Token::Semi {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect(&Token::Semi)?;
                Ok(Stmt::Return(value))
            }
            Token::Ident(_) if self.is_assignment_ahead() => {
                let lval = self.expect_ident()?;
                self.expect(&Token::Assign)?;
                let value = self.parse_expr()?;
                self.expect(&Token::Semi)?;
                Ok(Stmt::Assign { lval, value })
            }
            _ => {
                let e = self.parse_expr()?;
                self.expect(&Token::Semi)?;
                Ok(Stmt::Expr(Some(e)))
            }
        }
    }

    /// `ident =` vs. `ident` starting a larger expression statement — a
    /// one-token lookahead is not enough since both start with `Ident`, so
    /// peek at the raw lexer state is avoided by re-lexing defensively: this
    /// parser commits to the assignment reading whenever the current token
    /// is a bare identifier immediately followed by `=` (never `==`, which
    /// is already a distinct token from the lexer).
    fn is_assignment_ahead(&mut self) -> bool {
        // The lexer only ever hands us one token of lookahead via `self.cur`;
        // cloning the lexer to peek two tokens ahead is the simplest correct
        // way to disambiguate `ident = ...` from `ident + ...` etc.
        let mut probe = self.lexer.clone();
        matches!(probe.next_token(), Ok((Token::Assign, _)))
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_lor()
    }

    fn parse_lor(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_land()?;
        while self.cur == Token::OrOr {
            self.bump()?;
            let rhs = self.parse_land()?;
            lhs = Expr::Binary { op: BinaryOp::Or, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_land(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_eq()?;
        while self.cur == Token::AndAnd {
            self.bump()?;
            let rhs = self.parse_eq()?;
            lhs = Expr::Binary { op: BinaryOp::And, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_eq(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_rel()?;
        loop {
            let op = match self.cur {
                Token::Eq => BinaryOp::Eq,
                Token::NotEq => BinaryOp::NotEq,
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_rel()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_rel(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_add()?;
        loop {
            let op = match self.cur {
                Token::Lt => BinaryOp::Lt,
                Token::Gt => BinaryOp::Gt,
                Token::Le => BinaryOp::Le,
                Token::Ge => BinaryOp::Ge,
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_add()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_add(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_mul()?;
        loop {
            let op = match self.cur {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_mul()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_mul(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.cur {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                Token::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.cur {
            Token::Plus => Some(UnaryOp::Plus),
            Token::Minus => Some(UnaryOp::Neg),
            Token::Not => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            self.bump()?;
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary { op, operand: Box::new(operand) });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.cur.clone() {
            Token::LParen => {
                self.bump()?;
                let e = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(e)
            }
            Token::Number(n) => {
                self.bump()?;
                Ok(Expr::Number(n))
            }
            Token::Ident(name) => {
                self.bump()?;
                Ok(Expr::LVal(name))
            }
            other => Err(CompileError::ParseShape {
                line: self.line,
                message: format!("expected expression, found {:?}", other),
            }),
        }
    }
}
