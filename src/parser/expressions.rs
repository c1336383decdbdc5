//! Expression parsing implementation
//!
//! One method per grammar rule, lowest precedence first:
//!
//! ```text
//! expression → equality
//! equality   → comparison ( ( "!=" | "==" ) comparison )*
//! comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
//! term       → factor ( ( "-" | "+" ) factor )*
//! factor     → unary ( ( "/" | "*" ) unary )*
//! unary      → ( "!" | "-" ) unary | primary
//! primary    → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"
//! ```
//!
//! Binary levels loop so that operators of equal precedence associate to the
//! left. Any error returns immediately through `?`. Groups and prefix
//! operators count against [`MAX_NESTING`](crate::parser::parse::MAX_NESTING).

use crate::parser::ast::Expr;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::{Literal, TokenKind};
use tracing::instrument;

const EQUALITY_OPS: &[TokenKind] = &[TokenKind::BangEqual, TokenKind::EqualEqual];
const COMPARISON_OPS: &[TokenKind] = &[
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
];
const TERM_OPS: &[TokenKind] = &[TokenKind::Minus, TokenKind::Plus];
const FACTOR_OPS: &[TokenKind] = &[TokenKind::Slash, TokenKind::Star];
const UNARY_OPS: &[TokenKind] = &[TokenKind::Bang, TokenKind::Minus];

impl Parser {
    /// Parse expression (top-level rule)
    #[instrument(level = tracing::Level::TRACE, skip(self), fields(at = self.position))]
    pub(crate) fn expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::equality)
    }

    /// Parse equality (!= ==)
    fn equality(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(EQUALITY_OPS, Self::comparison)
    }

    /// Parse comparison (> >= < <=)
    fn comparison(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(COMPARISON_OPS, Self::term)
    }

    /// Parse term (- +)
    fn term(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(TERM_OPS, Self::factor)
    }

    /// Parse factor (/ *)
    fn factor(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(FACTOR_OPS, Self::unary)
    }

    /// Shared loop for the left-associative binary levels: parse an operand
    /// with `operand`, then fold `left op right` while the current token is
    /// one of `operators`.
    fn binary_level(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;

        while self.match_any(operators) {
            let operator = self.previous().clone();
            let right = operand(self)?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse unary (! -), right-recursive
    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_any(UNARY_OPS) {
            let operator = self.previous().clone();
            let right = self.nested(Self::unary)?;
            return Ok(Expr::unary(operator, right));
        }

        self.primary()
    }

    /// Parse primary: literals and parenthesized groups
    fn primary(&mut self) -> Result<Expr, ParseError> {
        if self.match_any(&[TokenKind::False]) {
            return Ok(Expr::literal(Literal::Bool(false)));
        }
        if self.match_any(&[TokenKind::True]) {
            return Ok(Expr::literal(Literal::Bool(true)));
        }
        if self.match_any(&[TokenKind::Nil]) {
            return Ok(Expr::literal(Literal::Nil));
        }

        if self.match_any(&[TokenKind::Number, TokenKind::String]) {
            let token = self.previous();
            return match &token.literal {
                Some(value) => Ok(Expr::literal(value.clone())),
                None => Err(ParseError {
                    message: "Expect literal value.".to_string(),
                    token: token.clone(),
                }),
            };
        }

        if self.match_any(&[TokenKind::LeftParen]) {
            let expr = self.expression()?;
            self.expect_token(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::grouping(expr));
        }

        Err(self.error("Expect expression."))
    }
}
