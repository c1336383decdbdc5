//! Scanner (tokenizer) for Lox source code
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the
//! parser. Lexical errors are reported into a [`Diagnostics`] accumulator and
//! scanning carries on, so the caller always gets a best-effort token stream
//! terminated by a single EOF token.

use super::token::{keyword, Literal, Token, TokenKind};
use crate::diagnostics::Diagnostics;
use std::fmt;
use tracing::instrument;

/// Scanner error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub line: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexical error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for LexError {}

/// Single-use scanner over one unit of source text.
pub struct Scanner {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
}

impl Scanner {
    /// Create a new scanner for the given source string.
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scan the entire input, consuming the scanner.
    #[instrument(level = tracing::Level::TRACE, skip_all)]
    pub fn scan_tokens(mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token(diagnostics);
        }

        self.tokens.push(Token::eof(self.line));
        tracing::debug!(tokens = self.tokens.len(), lines = self.line, "scan finished");
        self.tokens
    }

    fn scan_token(&mut self, diagnostics: &mut Diagnostics) {
        let Some(ch) = self.advance() else {
            return;
        };

        match ch {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            // Maximal munch on the two-character comparison operators
            '!' => {
                let kind = if self.match_char('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_char('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add_token(kind);
            }

            '/' => {
                if self.match_char('/') {
                    self.skip_line_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '"' => self.string_literal(diagnostics),
            '0'..='9' => self.number_literal(diagnostics),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(),

            _ => diagnostics.report(LexError {
                message: "Unexpected character.".to_string(),
                line: self.line,
            }),
        }
    }

    /// Scan a string literal. No escape processing; newlines are allowed.
    fn string_literal(&mut self, diagnostics: &mut Diagnostics) {
        while let Some(ch) = self.peek() {
            if ch == '"' {
                break;
            }
            if ch == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            diagnostics.report(LexError {
                message: "Unterminated string.".to_string(),
                line: self.line,
            });
            return;
        }

        self.advance(); // closing quote

        let value: String = self.source[self.start + 1..self.current - 1].iter().collect();
        self.add_literal_token(TokenKind::String, Some(Literal::Str(value)));
    }

    /// Scan a number literal: a digit run, optionally followed by `.` and a
    /// further digit run. A trailing `.` with no digit after it is left for
    /// the next token.
    fn number_literal(&mut self, diagnostics: &mut Diagnostics) {
        self.consume_digits();

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume '.'
            self.consume_digits();
        }

        let text = self.lexeme();
        match text.parse::<f64>() {
            Ok(value) => self.add_literal_token(TokenKind::Number, Some(Literal::Number(value))),
            Err(_) => diagnostics.report(LexError {
                message: format!("Invalid number literal '{}'.", text),
                line: self.line,
            }),
        }
    }

    fn identifier_or_keyword(&mut self) {
        while self.peek().is_some_and(is_alphanumeric) {
            self.advance();
        }

        let kind = keyword(&self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Skip the rest of a `//` comment, leaving the newline for the main loop.
    fn skip_line_comment(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal_token(kind, None);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let token = Token::new(kind, self.lexeme(), literal, self.line);
        tracing::trace!(%token, line = token.line, "token");
        self.tokens.push(token);
    }

    /// Text of the token currently being scanned.
    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    /// Consume `expected` if it is the next character.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.current + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += 1;
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

fn is_alphanumeric(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> (Vec<Token>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        (tokens, diagnostics)
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation() {
        let (tokens, diagnostics) = scan("(){},.-+;*/");
        assert!(diagnostics.is_empty());
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Semicolon,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        let (tokens, _) = scan("! != = == < <= > >=");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_maximal_munch() {
        let (tokens, _) = scan("!=");
        assert_eq!(kinds(&tokens), vec![TokenKind::BangEqual, TokenKind::Eof]);
        assert_eq!(tokens[0].lexeme, "!=");

        let (tokens, _) = scan("!==");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::BangEqual, TokenKind::Equal, TokenKind::Eof]
        );
    }

    #[test]
    fn test_comments_and_whitespace() {
        let (tokens, diagnostics) = scan("  \t\r\n// nothing to see\n   // here either");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert_eq!(tokens[0].line, 3);
        assert_eq!(tokens[0].lexeme, "");
    }

    #[test]
    fn test_comment_then_code() {
        let (tokens, _) = scan("1 // one\n/ 2");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Number, TokenKind::Slash, TokenKind::Number, TokenKind::Eof]
        );
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_numbers() {
        let (tokens, _) = scan("123 45.67");
        assert_eq!(tokens[0].literal, Some(Literal::Number(123.0)));
        assert_eq!(tokens[0].lexeme, "123");
        assert_eq!(tokens[1].literal, Some(Literal::Number(45.67)));
        assert_eq!(tokens[1].lexeme, "45.67");
    }

    #[test]
    fn test_number_trailing_dot() {
        let (tokens, diagnostics) = scan("123.");
        assert!(diagnostics.is_empty());
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Number, TokenKind::Dot, TokenKind::Eof]
        );
        assert_eq!(tokens[0].literal, Some(Literal::Number(123.0)));
    }

    #[test]
    fn test_leading_dot_is_not_a_number() {
        let (tokens, _) = scan(".5");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Dot, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_string_literal() {
        let (tokens, diagnostics) = scan(r#""hello // world""#);
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, r#""hello // world""#);
        assert_eq!(tokens[0].literal, Some(Literal::Str("hello // world".to_string())));
    }

    #[test]
    fn test_string_no_escapes() {
        let (tokens, _) = scan(r#""a\nb""#);
        assert_eq!(tokens[0].literal, Some(Literal::Str(r"a\nb".to_string())));
    }

    #[test]
    fn test_multiline_string_counts_lines() {
        let (tokens, _) = scan("\"one\ntwo\"\n+");
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[1].kind, TokenKind::Plus);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, diagnostics) = scan("\"abc");
        assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.message, "Unterminated string.");
        assert_eq!(diagnostic.line, 1);
    }

    #[test]
    fn test_unterminated_string_reports_final_line() {
        let (_, diagnostics) = scan("\"abc\ndef\n");
        assert_eq!(diagnostics.iter().next().unwrap().line, 3);
    }

    #[test]
    fn test_identifiers_and_keywords() {
        let (tokens, _) = scan("and or_else _tmp1 nil true false orchid");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::And,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Nil,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].lexeme, "or_else");
        assert!(tokens[1].literal.is_none());
    }

    #[test]
    fn test_unexpected_character_continues() {
        let (tokens, diagnostics) = scan("1 @ 2\n#");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]
        );
        assert_eq!(diagnostics.len(), 2);
        let lines: Vec<usize> = diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 2]);
        assert!(diagnostics.iter().all(|d| d.message == "Unexpected character."));
    }

    #[test]
    fn test_non_ascii_is_unexpected() {
        let (tokens, diagnostics) = scan("é");
        assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let source = "(1 + 2.5) * -x >= \"s\" // c\n != nil";
        let (first, _) = scan(source);
        let (second, _) = scan(source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_lines_non_decreasing() {
        let (tokens, _) = scan("1\n+\n\n2 \"a\nb\" 3");
        assert!(tokens.windows(2).all(|w| w[0].line <= w[1].line));
        assert_eq!(tokens.last().map(|t| t.line), Some(5));
    }
}
