//! Parenthesized prefix rendering of an [`Expr`] tree
//!
//! `(1 + 2) * 3` prints as `(* (group (+ 1 2)) 3)`. Useful for eyeballing
//! what the parser built and for asserting on tree shape in tests.

use crate::parser::ast::{Expr, Visitor};
use crate::parser::token::{Literal, Token};

#[derive(Debug, Default)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        AstPrinter
    }

    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = String::from("(");
        out.push_str(name);
        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out.push(')');
        out
    }
}

impl Visitor<String> for AstPrinter {
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        self.parenthesize(&operator.lexeme, &[left, right])
    }

    fn visit_grouping(&mut self, expression: &Expr) -> String {
        self.parenthesize("group", &[expression])
    }

    fn visit_literal(&mut self, value: &Literal) -> String {
        value.to_string()
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> String {
        self.parenthesize(&operator.lexeme, &[right])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::TokenKind;

    #[test]
    fn test_print_hand_built_tree() {
        // -123 * (45.67)
        let expr = Expr::binary(
            Expr::unary(
                Token::new(TokenKind::Minus, "-", None, 1),
                Expr::literal(Literal::Number(123.0)),
            ),
            Token::new(TokenKind::Star, "*", None, 1),
            Expr::grouping(Expr::literal(Literal::Number(45.67))),
        );

        assert_eq!(AstPrinter::new().print(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn test_print_literals() {
        let mut printer = AstPrinter::new();
        assert_eq!(printer.print(&Expr::literal(Literal::Nil)), "nil");
        assert_eq!(printer.print(&Expr::literal(Literal::Bool(true))), "true");
        assert_eq!(
            printer.print(&Expr::literal(Literal::Str("a b".to_string()))),
            "a b"
        );
    }
}
