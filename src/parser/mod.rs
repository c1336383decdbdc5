//! Lox source code front end
//!
//! This module transforms Lox source text into an expression AST:
//! - [`token`]: Token kinds, literal values and the keyword table
//! - [`scanner`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser state, errors and entry points (tokens → AST)
//! - [`ast`]: AST node definitions and the [`ast::Visitor`] dispatch trait
//!
//! # Supported Grammar
//!
//! Only single expressions are parsed: literals (`number`, `string`, `true`,
//! `false`, `nil`), parenthesized groups, prefix `!` and `-`, and the binary
//! operators `* /`, `+ -`, `> >= < <=`, `!= ==` in increasing order of
//! looseness. There are no statements, declarations or identifiers in
//! expression position yet.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one method per precedence level and a
//! single token of lookahead. No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod parse;
pub mod scanner;
pub mod token;
