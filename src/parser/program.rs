//! Program envelope parsing implementation
//!
//! This module handles parsing of the top-level BL program unit:
//!
//! ```text
//! program     ::= "PROGRAM" identifier "IS"
//!                     {instruction}
//!                 "BEGIN" block "END" identifier
//! instruction ::= "INSTRUCTION" identifier "IS" block "END"
//! ```
//!
//! The identifier after the final `END` must repeat the program name, and
//! every instruction name must be fresh: redefining a primitive
//! instruction or an earlier user instruction is rejected at the offending
//! token. The assembled [`Program`] re-checks the same context invariants
//! defensively in `Program::new`.
//!
//! All parsing methods are implemented as methods on the [`Parser`] struct.

use crate::parser::ast::{
    is_primitive_instruction, Program, SourceLocation, Statement,
};
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};
use rustc_hash::FxHashMap;

impl Parser {
    /// Parse a whole program, consuming the entire token stream.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        self.expect_token(
            &Token::Program(self.current_location()),
            "Expected 'PROGRAM' at start of program",
        )?;
        let name = self.expect_identifier()?;
        self.expect_is("after program name")?;

        let mut context: FxHashMap<String, Statement> = FxHashMap::default();
        while self.check(&Token::Instruction(self.current_location())) {
            let (instruction_name, body, location) = self.parse_instruction()?;

            if is_primitive_instruction(&instruction_name) {
                return Err(ParseError {
                    message: format!(
                        "Instruction name '{}' redefines a primitive instruction",
                        instruction_name
                    ),
                    location,
                });
            }
            if context.contains_key(&instruction_name) {
                return Err(ParseError {
                    message: format!(
                        "Instruction '{}' is defined more than once",
                        instruction_name
                    ),
                    location,
                });
            }

            context.insert(instruction_name, body);
        }

        self.expect_token(
            &Token::Begin(self.current_location()),
            "Expected 'BEGIN' before program body",
        )?;
        let body = self.parse_block()?;
        self.expect_end("after program body")?;

        let end_location = self.current_location();
        let end_name = self.expect_identifier()?;
        if end_name != name {
            return Err(ParseError {
                message: format!(
                    "Program name '{}' after END does not match '{}'",
                    end_name, name
                ),
                location: end_location,
            });
        }

        if !self.is_at_end() {
            return Err(ParseError {
                message: format!(
                    "Expected end of input after program, found {}",
                    self.peek()
                ),
                location: self.current_location(),
            });
        }

        Ok(Program::new(name, context, body))
    }

    /// Parse INSTRUCTION name IS block END, returning the name, its body,
    /// and the location of the name token.
    fn parse_instruction(
        &mut self,
    ) -> Result<(String, Statement, SourceLocation), ParseError> {
        self.take(); // consume 'INSTRUCTION'
        let location = self.current_location();
        let name = self.expect_identifier()?;
        self.expect_is("after instruction name")?;

        let body = self.parse_block()?;
        self.expect_end("after instruction body")?;

        Ok((name, body, location))
    }
}
