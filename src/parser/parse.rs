//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, cursor helpers, error recovery, and the
//! top-level parse entry points.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, helper methods, and coordination
//! - `expressions`: the expression grammar, one method per precedence level
//!
//! The grammar rules live in a separate `impl Parser` block so each file stays
//! focused while sharing the cursor state defined here.

use crate::diagnostics::Diagnostics;
use crate::parser::ast::Expr;
use crate::parser::token::{Token, TokenKind};
use std::fmt;
use tracing::instrument;

/// Parser error type. Carries the token the parser was looking at.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub token: Token,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.token.is_eof() {
            write!(
                f,
                "Parse error at line {}, at end: {}",
                self.token.line, self.message
            )
        } else {
            write!(
                f,
                "Parse error at line {}, at '{}': {}",
                self.token.line, self.token.lexeme, self.message
            )
        }
    }
}

impl std::error::Error for ParseError {}

/// Keywords that begin a statement; error recovery stops in front of them.
const STATEMENT_START: &[TokenKind] = &[
    TokenKind::Class,
    TokenKind::Fun,
    TokenKind::Var,
    TokenKind::For,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Print,
    TokenKind::Return,
];

/// Deepest nesting of groups and prefix operators the parser will descend
/// into. Keeps recursion well inside a 2 MiB thread stack in debug builds.
pub const MAX_NESTING: usize = 128;

/// Recursive descent parser over a scanned token sequence
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) depth: usize,
}

impl Parser {
    /// Create a parser over `tokens`.
    ///
    /// The cursor relies on the sequence ending in EOF; one is appended if the
    /// caller did not supply it.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::eof(line));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse a single expression, recording a syntax error in `diagnostics`.
    ///
    /// Returns `None` on failure; a partially built tree is never returned.
    #[instrument(level = tracing::Level::TRACE, skip_all)]
    pub fn parse(&mut self, diagnostics: &mut Diagnostics) -> Option<Expr> {
        match self.parse_expression() {
            Ok(expr) => Some(expr),
            Err(err) => {
                diagnostics.report(err);
                None
            }
        }
    }

    /// Parse a single expression, returning the first syntax error.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.expression()
    }

    /// Discard tokens until a likely statement boundary: just past a `;`, or
    /// in front of a statement keyword. Always moves past the current token.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if STATEMENT_START.contains(&self.peek().kind) {
                return;
            }
            self.advance();
        }
    }

    /// True once the cursor sits on the EOF token.
    pub fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    // ===== Helper methods =====

    /// Consume the current token if its kind is one of `kinds`.
    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek().kind == kind
    }

    /// Move past the current token, never beyond EOF.
    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// The most recently consumed token. At the very start this is the
    /// current token.
    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }

    /// Run a recursive rule one nesting level deeper, failing with
    /// "Too much nesting." once [`MAX_NESTING`] is reached.
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error("Too much nesting."));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Build an error bound to the current token.
    pub(crate) fn error(&self, message: &str) -> ParseError {
        ParseError {
            message: message.to_string(),
            token: self.peek().clone(),
        }
    }
}
