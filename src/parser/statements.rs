//! Statement parsing implementation
//!
//! This module handles parsing of the BL statement forms:
//!
//! - Conditionals: `IF cond THEN … END`, `IF cond THEN … ELSE … END`
//! - Loops: `WHILE cond DO … END`
//! - Calls: a bare instruction name, primitive or user-defined
//!
//! # Grammar
//!
//! ```text
//! block     ::= {statement}
//! statement ::= "IF" cond "THEN" block ("ELSE" block)? "END"
//!             | "WHILE" cond "DO" block "END"
//!             | identifier
//! ```
//!
//! A block keeps consuming statements while the front token can start one
//! (an identifier, `IF`, or `WHILE`); whatever ends it (`END`, `ELSE`,
//! `BEGIN`, end of input) is left in the stream for the caller to check.
//! Each compound statement parses its child blocks into scratch values
//! first and then folds them into the result with a single `assemble_*`
//! call.
//!
//! All parsing methods are implemented as methods on the [`Parser`] struct.

use crate::parser::ast::Statement;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a block: zero or more statements up to the first token that
    /// cannot start another one.
    pub(crate) fn parse_block(&mut self) -> Result<Statement, ParseError> {
        let mut block = Statement::new();

        while self.at_statement_start() {
            let statement = self.parse_statement()?;
            let len = block.block_len();
            block.add_to_block(len, statement);
        }

        Ok(block)
    }

    fn at_statement_start(&self) -> bool {
        matches!(
            self.peek(),
            Token::Ident(_, _) | Token::If(_) | Token::While(_)
        )
    }

    /// Parse exactly one statement from the front of the stream.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek() {
            Token::If(_) => self.parse_if_statement(),
            Token::While(_) => self.parse_while_statement(),
            Token::Ident(_, _) => self.parse_call_statement(),
            _ => Err(ParseError {
                message: format!("Expected statement, found {}", self.peek()),
                location: self.current_location(),
            }),
        }
    }

    /// Parse IF cond THEN block [ELSE block] END
    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        self.take(); // consume 'IF'
        let condition = self.expect_condition()?;
        self.expect_then("after IF condition")?;

        let then_body = self.parse_block()?;

        let mut statement = Statement::new();
        if self.match_token(&Token::Else(self.current_location())) {
            let else_body = self.parse_block()?;
            self.expect_end("after ELSE body")?;
            statement.assemble_if_else(condition, then_body, else_body);
        } else {
            self.expect_end("after IF body")?;
            statement.assemble_if(condition, then_body);
        }

        Ok(statement)
    }

    /// Parse WHILE cond DO block END
    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        self.take(); // consume 'WHILE'
        let condition = self.expect_condition()?;
        self.expect_do("after WHILE condition")?;

        let body = self.parse_block()?;
        self.expect_end("after WHILE body")?;

        let mut statement = Statement::new();
        statement.assemble_while(condition, body);
        Ok(statement)
    }

    /// Parse a call: a bare instruction name
    fn parse_call_statement(&mut self) -> Result<Statement, ParseError> {
        let name = self.expect_identifier()?;
        let mut statement = Statement::new();
        statement.assemble_call(&name);
        Ok(statement)
    }
}
