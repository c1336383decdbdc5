//! # Introduction
//!
//! rlox is the front end of a small tree-walking interpreter for Lox, a
//! C-like scripting language. It turns source text into a validated
//! expression AST ready for a downstream evaluator or printer.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Tokens → Parser → Expr → Visitor (printer, evaluator, ...)
//! ```
//!
//! 1. [`parser::scanner`] — single-pass tokenizer with line tracking.
//! 2. [`parser::parse`] — recursive-descent expression parser.
//! 3. [`parser::ast`] — the closed [`Expr`] node set and its
//!    [`parser::ast::Visitor`] dispatch trait.
//! 4. [`diagnostics`] — lexical and syntax errors, accumulated per unit of
//!    source instead of in global state.
//! 5. [`printer`] — parenthesized prefix rendering of an AST.
//!
//! ## Example
//!
//! ```
//! use rlox::printer::AstPrinter;
//!
//! let parsed = rlox::parse("(1 + 2) * 3");
//! let expr = parsed.expr.expect("valid expression");
//! assert_eq!(AstPrinter::new().print(&expr), "(* (group (+ 1 2)) 3)");
//! ```

pub mod diagnostics;
pub mod parser;
pub mod printer;

pub use diagnostics::{Diagnostic, Diagnostics, ErrorSite};
pub use parser::ast::{Expr, Visitor};
pub use parser::parse::{ParseError, Parser};
pub use parser::scanner::{LexError, Scanner};
pub use parser::token::{Literal, Token, TokenKind};

/// Result of running the whole front end over one unit of source.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// `None` when parsing failed. Lexical errors alone do not clear it.
    pub expr: Option<Expr>,
    pub diagnostics: Diagnostics,
}

impl Parsed {
    /// True when the source scanned and parsed without any diagnostic.
    pub fn is_clean(&self) -> bool {
        self.expr.is_some() && !self.diagnostics.had_error()
    }
}

/// Scan `source` into tokens, collecting lexical diagnostics.
pub fn scan(source: &str) -> (Vec<Token>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
    (tokens, diagnostics)
}

/// Scan and parse `source` as a single expression.
pub fn parse(source: &str) -> Parsed {
    let (tokens, mut diagnostics) = scan(source);
    let expr = Parser::new(tokens).parse(&mut diagnostics);
    Parsed { expr, diagnostics }
}
