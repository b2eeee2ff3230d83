//! Lexer, parser, and abstract syntax tree for the source language.
//!
//! Kept deliberately thin: the rigor of this system lives in the IR builder
//! and RISC-V emitter, not in parsing.

mod lex;
mod parse;
mod tree;

pub use parse::Parser;
pub use tree::*;

use crate::error::Result;

pub fn parse(src: &str) -> Result<CompUnit> {
    Parser::new(src)?.parse_comp_unit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_main() {
        let unit = parse("int main() { return 0; }").unwrap();
        assert_eq!(unit.func.ident, "main");
        assert_eq!(unit.func.body.items.len(), 1);
    }

    #[test]
    fn parses_const_and_var_decls() {
        let unit = parse("int main() { const int a = 1, b = 2; int c = a + b; return c; }").unwrap();
        assert_eq!(unit.func.body.items.len(), 3);
    }

    #[test]
    fn dangling_else_binds_to_nearest_if() {
        let unit = parse("int main() { if (1) if (0) return 1; else return 2; return 3; }").unwrap();
        let BlockItem::Stmt(Stmt::If { else_branch, then_branch, .. }) = &unit.func.body.items[0]
        else {
            panic!("expected an if statement");
        };
        assert!(else_branch.is_none(), "outer if must not capture the else");
        let Stmt::If { else_branch: inner_else, .. } = then_branch.as_ref() else {
            panic!("expected nested if");
        };
        assert!(inner_else.is_some(), "inner if must capture the else");
    }

    #[test]
    fn operator_precedence_is_left_to_right_for_same_level() {
        let unit = parse("int main() { return 1 - 2 - 3; }").unwrap();
        let BlockItem::Stmt(Stmt::Return(Some(Expr::Binary { op: BinaryOp::Sub, lhs, .. }))) =
            &unit.func.body.items[0]
        else {
            panic!("expected a subtraction at top level");
        };
        assert!(matches!(lhs.as_ref(), Expr::Binary { op: BinaryOp::Sub, .. }));
    }
}
