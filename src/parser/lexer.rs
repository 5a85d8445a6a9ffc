//! Lexer (tokenizer) for BL source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. BL tokens are whitespace-delimited words: uppercase keywords,
//! condition spellings, and identifiers. The stream always ends with a
//! [`Token::Eof`] marker.
//!
//! Keyword and condition recognition happens on the scanned word by value
//! comparison (`match` on `&str`), never on string identity.

use super::ast::{Condition, SourceLocation};
use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier: a letter followed by letters, digits, or hyphens
    Ident(String, SourceLocation),

    /// One of the ten sensor-predicate spellings, e.g. `next-is-wall`
    Condition(Condition, SourceLocation),

    // Keywords
    Program(SourceLocation),
    Instruction(SourceLocation),
    Is(SourceLocation),
    Begin(SourceLocation),
    End(SourceLocation),
    If(SourceLocation),
    Then(SourceLocation),
    Else(SourceLocation),
    While(SourceLocation),
    Do(SourceLocation),

    /// End of input
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Ident(_, loc)
            | Token::Condition(_, loc)
            | Token::Program(loc)
            | Token::Instruction(loc)
            | Token::Is(loc)
            | Token::Begin(loc)
            | Token::End(loc)
            | Token::If(loc)
            | Token::Then(loc)
            | Token::Else(loc)
            | Token::While(loc)
            | Token::Do(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Condition(c, _) => write!(f, "condition '{}'", c),
            Token::Program(_) => write!(f, "'PROGRAM'"),
            Token::Instruction(_) => write!(f, "'INSTRUCTION'"),
            Token::Is(_) => write!(f, "'IS'"),
            Token::Begin(_) => write!(f, "'BEGIN'"),
            Token::End(_) => write!(f, "'END'"),
            Token::If(_) => write!(f, "'IF'"),
            Token::Then(_) => write!(f, "'THEN'"),
            Token::Else(_) => write!(f, "'ELSE'"),
            Token::While(_) => write!(f, "'WHILE'"),
            Token::Do(_) => write!(f, "'DO'"),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for BL source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of input".to_string(),
            location: loc,
        })?;

        match ch {
            'a'..='z' | 'A'..='Z' => self.word(ch, loc),
            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Scan a word (keyword, condition, or identifier)
    fn word(&mut self, first_char: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut word = String::new();
        word.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '-' {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Keywords first, then the closed condition set, then identifiers.
        // All matching is by value on the scanned word.
        let token = match word.as_str() {
            "PROGRAM" => Token::Program(loc),
            "INSTRUCTION" => Token::Instruction(loc),
            "IS" => Token::Is(loc),
            "BEGIN" => Token::Begin(loc),
            "END" => Token::End(loc),
            "IF" => Token::If(loc),
            "THEN" => Token::Then(loc),
            "ELSE" => Token::Else(loc),
            "WHILE" => Token::While(loc),
            "DO" => Token::Do(loc),
            _ => match Condition::from_str(&word) {
                Some(condition) => Token::Condition(condition, loc),
                None => Token::Ident(word, loc),
            },
        };

        Ok(token)
    }

    /// Skip whitespace between tokens
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' || ch == '\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        if self.position < self.input.len() {
            Some(self.input[self.position])
        } else {
            None
        }
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        if self.position >= self.input.len() {
            return None;
        }

        let ch = self.input[self.position];
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_and_identifiers() {
        let mut lexer = Lexer::new("PROGRAM guard IS BEGIN move END guard");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Program(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "guard"));
        assert!(matches!(tokens[2], Token::Is(_)));
        assert!(matches!(tokens[3], Token::Begin(_)));
        assert!(matches!(tokens[4], Token::Ident(ref s, _) if s == "move"));
        assert!(matches!(tokens[5], Token::End(_)));
        assert!(matches!(tokens[6], Token::Ident(ref s, _) if s == "guard"));
        assert!(matches!(tokens[7], Token::Eof(_)));
    }

    #[test]
    fn test_conditions() {
        let mut lexer = Lexer::new("next-is-wall random true next-is-not-empty");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(
            tokens[0],
            Token::Condition(Condition::NextIsWall, _)
        ));
        assert!(matches!(tokens[1], Token::Condition(Condition::Random, _)));
        assert!(matches!(tokens[2], Token::Condition(Condition::True, _)));
        assert!(matches!(
            tokens[3],
            Token::Condition(Condition::NextIsNotEmpty, _)
        ));
    }

    #[test]
    fn test_hyphenated_identifier() {
        let mut lexer = Lexer::new("find-wall step2 Zig-zag-3");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "find-wall"));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "step2"));
        assert!(matches!(tokens[2], Token::Ident(ref s, _) if s == "Zig-zag-3"));
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        // Lowercase "if" is an identifier, not the IF keyword
        let mut lexer = Lexer::new("if If IF");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "if"));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "If"));
        assert!(matches!(tokens[2], Token::If(_)));
    }

    #[test]
    fn test_locations() {
        let mut lexer = Lexer::new("move\n  turnleft");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].location(), SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location(), SourceLocation::new(2, 3));
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("move { turnleft");
        let err = lexer.tokenize().unwrap_err();
        assert!(err.message.contains("Unexpected character"));
        assert_eq!(err.location.line, 1);
        assert_eq!(err.location.column, 6);
    }

    #[test]
    fn test_word_starting_with_digit_rejected() {
        let mut lexer = Lexer::new("2fast");
        let err = lexer.tokenize().unwrap_err();
        assert!(err.message.contains("Unexpected character"));
    }

    #[test]
    fn test_empty_input_is_just_eof() {
        let mut lexer = Lexer::new("   \n\t ");
        let tokens = lexer.tokenize().unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0], Token::Eof(_)));
    }
}
