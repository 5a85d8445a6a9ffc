//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure, including error types, helper methods, and the token
//! stream.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following
//! organization:
//! - This module: Parser struct, token-stream primitives, helper methods
//! - `statements`: Parsing statements and blocks (if, if-else, while, call)
//! - `program`: Parsing the `PROGRAM … BEGIN … END` envelope
//!
//! Parser methods are split across multiple files using `impl Parser`
//! blocks, allowing each module to extend the Parser with related
//! functionality while maintaining access to the shared parser state.
//!
//! # Token stream discipline
//!
//! Tokens live in a deque consumed strictly front-to-back. The only stream
//! primitives are [`Parser::peek`] (inspect the front token) and
//! [`Parser::take`] (remove and return it); there is no further lookahead
//! and nothing is ever pushed back. The terminating [`Token::Eof`] marker
//! is checked with `is_at_end` and never consumed.

use crate::parser::ast::{Condition, SourceLocation};
use crate::parser::lexer::{LexError, Lexer, Token};
use std::collections::VecDeque;
use std::fmt;

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for BL
pub struct Parser {
    tokens: VecDeque<Token>,
}

impl Parser {
    /// Tokenize `source` and set up a parser over the resulting stream.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens: tokens.into(),
        })
    }

    // ===== Token stream primitives =====

    /// Inspect the front token without consuming it.
    pub(crate) fn peek(&self) -> &Token {
        self.tokens
            .front()
            .expect("token stream exhausted past its end marker")
    }

    /// Remove and return the front token.
    pub(crate) fn take(&mut self) -> Token {
        self.tokens
            .pop_front()
            .expect("token stream exhausted past its end marker")
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    // ===== Helper methods =====

    /// Whether the front token has the same kind as `token` (payloads and
    /// locations are ignored).
    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    /// Consume the front token if it has the same kind as `token`.
    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.take();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        token: &Token,
        message: &str,
    ) -> Result<(), ParseError> {
        if self.check(token) {
            self.take();
            Ok(())
        } else {
            Err(ParseError {
                message: format!("{}, found {}", message, self.peek()),
                location: self.current_location(),
            })
        }
    }

    pub(crate) fn expect_is(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Is(self.current_location()),
            &format!("Expected 'IS' {ctx}"),
        )
    }

    pub(crate) fn expect_end(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::End(self.current_location()),
            &format!("Expected 'END' {ctx}"),
        )
    }

    pub(crate) fn expect_then(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Then(self.current_location()),
            &format!("Expected 'THEN' {ctx}"),
        )
    }

    pub(crate) fn expect_do(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Do(self.current_location()),
            &format!("Expected 'DO' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(_, _) = self.peek() {
            match self.take() {
                Token::Ident(name, _) => Ok(name),
                _ => unreachable!(),
            }
        } else {
            Err(ParseError {
                message: format!("Expected identifier, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }

    pub(crate) fn expect_condition(&mut self) -> Result<Condition, ParseError> {
        if let Token::Condition(_, _) = self.peek() {
            match self.take() {
                Token::Condition(condition, _) => Ok(condition),
                _ => unreachable!(),
            }
        } else {
            Err(ParseError {
                message: format!("Expected condition, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let parser = Parser::new("move turnleft").unwrap();
        assert!(matches!(parser.peek(), Token::Ident(s, _) if s == "move"));
        assert!(matches!(parser.peek(), Token::Ident(s, _) if s == "move"));
    }

    #[test]
    fn test_take_consumes_front_to_back() {
        let mut parser = Parser::new("move turnleft").unwrap();
        assert!(matches!(parser.take(), Token::Ident(s, _) if s == "move"));
        assert!(matches!(parser.take(), Token::Ident(s, _) if s == "turnleft"));
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_expect_identifier_reports_offender() {
        let mut parser = Parser::new("IF").unwrap();
        let err = parser.expect_identifier().unwrap_err();
        assert!(err.message.contains("Expected identifier"));
        assert!(err.message.contains("'IF'"));
    }

    #[test]
    fn test_expect_condition() {
        let mut parser = Parser::new("next-is-enemy move").unwrap();
        assert_eq!(parser.expect_condition().unwrap(), Condition::NextIsEnemy);
        let err = parser.expect_condition().unwrap_err();
        assert!(err.message.contains("Expected condition"));
    }

    #[test]
    fn test_lex_error_becomes_parse_error() {
        let err = match Parser::new("move ; turnleft") {
            Ok(_) => panic!("expected a lex error"),
            Err(err) => err,
        };
        assert!(err.message.contains("Unexpected character"));
        assert_eq!(err.location.line, 1);
    }
}
