//! Diagnostics collected while scanning and parsing
//!
//! Lexical errors are recorded and scanning continues; a syntax error aborts
//! the parse. Both end up as a [`Diagnostic`] in a [`Diagnostics`] accumulator
//! that the caller owns and threads through each stage, so a failed unit of
//! source never leaves global state behind.

use crate::parser::parse::ParseError;
use crate::parser::scanner::LexError;
use std::fmt;

/// Where on the line a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSite {
    /// Only the line is known (lexical errors).
    Line,
    /// The offending token was the end of input.
    AtEnd,
    /// The offending token's lexeme.
    AtLexeme(String),
}

impl fmt::Display for ErrorSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSite::Line => Ok(()),
            ErrorSite::AtEnd => write!(f, " at end"),
            ErrorSite::AtLexeme(lexeme) => write!(f, " at '{}'", lexeme),
        }
    }
}

/// A single reported problem, rendered as `[line N] Error<where>: message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub site: ErrorSite,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error{}: {}", self.line, self.site, self.message)
    }
}

impl From<LexError> for Diagnostic {
    fn from(err: LexError) -> Self {
        Diagnostic {
            line: err.line,
            site: ErrorSite::Line,
            message: err.message,
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        let site = if err.token.is_eof() {
            ErrorSite::AtEnd
        } else {
            ErrorSite::AtLexeme(err.token.lexeme.clone())
        };
        Diagnostic {
            line: err.token.line,
            site,
            message: err.message,
        }
    }
}

/// Ordered accumulator of diagnostics for one unit of source.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: impl Into<Diagnostic>) {
        let diagnostic = diagnostic.into();
        tracing::debug!(line = diagnostic.line, "{}", diagnostic.message);
        self.items.push(diagnostic);
    }

    /// True once anything has been reported. Callers use this to suppress
    /// downstream printing and to pick a failing exit code.
    pub fn had_error(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
