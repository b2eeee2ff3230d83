//! Hand-rolled lexer. Thin on purpose — tokenizing this language is not the
//! hard part of the system, the IR builder and RISC-V emitter are.

use crate::error::{CompileError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Int,
    Const,
    Void,
    If,
    Else,
    Return,
    Ident(String),
    Number(i32),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    Eq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    AndAnd,
    OrOr,
    Not,
    Semi,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Eof,
}

#[derive(Clone)]
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src: src.as_bytes(), pos: 0, line: 1 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_whitespace() => {
                    self.bump();
                }
                Some(b'/') if self.src.get(self.pos + 1) == Some(&b'/') => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some(b'/') if self.src.get(self.pos + 1) == Some(&b'*') => {
                    self.bump();
                    self.bump();
                    while let Some(c) = self.peek() {
                        if c == b'*' && self.src.get(self.pos + 1) == Some(&b'/') {
                            self.bump();
                            self.bump();
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    pub fn next_token(&mut self) -> Result<(Token, usize)> {
        self.skip_trivia();
        let line = self.line;
        let Some(c) = self.peek() else {
            return Ok((Token::Eof, line));
        };

        if c.is_ascii_digit() {
            return Ok((self.lex_number()?, line));
        }
        if c.is_ascii_alphabetic() || c == b'_' {
            return Ok((self.lex_ident_or_keyword(), line));
        }

        let tok = match c {
            b'+' => { self.bump(); Token::Plus }
            b'-' => { self.bump(); Token::Minus }
            b'*' => { self.bump(); Token::Star }
            b'/' => { self.bump(); Token::Slash }
            b'%' => { self.bump(); Token::Percent }
            b';' => { self.bump(); Token::Semi }
            b',' => { self.bump(); Token::Comma }
            b'(' => { self.bump(); Token::LParen }
            b')' => { self.bump(); Token::RParen }
            b'{' => { self.bump(); Token::LBrace }
            b'}' => { self.bump(); Token::RBrace }
            b'=' => {
                self.bump();
                if self.peek() == Some(b'=') {
                    self.bump();
                    Token::Eq
                } else {
                    Token::Assign
                }
            }
            b'!' => {
                self.bump();
                if self.peek() == Some(b'=') {
                    self.bump();
                    Token::NotEq
                } else {
                    Token::Not
                }
            }
            b'<' => {
                self.bump();
                if self.peek() == Some(b'=') {
                    self.bump();
                    Token::Le
                } else {
                    Token::Lt
                }
            }
            b'>' => {
                self.bump();
                if self.peek() == Some(b'=') {
                    self.bump();
                    Token::Ge
                } else {
                    Token::Gt
                }
            }
            b'&' => {
                self.bump();
                if self.peek() == Some(b'&') {
                    self.bump();
                    Token::AndAnd
                } else {
                    return Err(CompileError::ParseShape {
                        line,
                        message: "expected `&&`".into(),
                    });
                }
            }
            b'|' => {
                self.bump();
                if self.peek() == Some(b'|') {
                    self.bump();
                    Token::OrOr
                } else {
                    return Err(CompileError::ParseShape {
                        line,
                        message: "expected `||`".into(),
                    });
                }
            }
            other => {
                return Err(CompileError::ParseShape {
                    line,
                    message: format!("unexpected character `{}`", other as char),
                });
            }
        };
        Ok((tok, line))
    }

    fn lex_number(&mut self) -> Result<Token> {
        let start = self.pos;
        if self.peek() == Some(b'0')
            && matches!(self.src.get(self.pos + 1), Some(b'x') | Some(b'X'))
        {
            self.bump();
            self.bump();
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
            let text = std::str::from_utf8(&self.src[start + 2..self.pos]).unwrap();
            let value = i32::from_str_radix(text, 16).map_err(|e| CompileError::ParseShape {
                line: self.line,
                message: format!("invalid hex literal: {e}"),
            })?;
            return Ok(Token::Number(value));
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap();
        let value: i32 = text.parse().map_err(|e| CompileError::ParseShape {
            line: self.line,
            message: format!("invalid integer literal: {e}"),
        })?;
        Ok(Token::Number(value))
    }

    fn lex_ident_or_keyword(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_') {
            self.bump();
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap();
        match text {
            "int" => Token::Int,
            "const" => Token::Const,
            "void" => Token::Void,
            "if" => Token::If,
            "else" => Token::Else,
            "return" => Token::Return,
            _ => Token::Ident(text.to_string()),
        }
    }
}
