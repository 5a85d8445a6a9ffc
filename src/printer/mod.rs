//! Pretty-printer for BL statement trees and programs
//!
//! The printer regenerates source text from an AST using the same keyword
//! vocabulary the parser accepts, with one statement per line for calls
//! and a fixed indentation step (4 columns by default) per nesting level.
//!
//! Traversal is non-destructive but goes through the same assembly
//! primitives the parser uses to build trees: each node is disassembled,
//! its parts printed recursively, and the node reassembled from those same
//! parts before returning, so the caller's tree compares equal afterward.
//! Re-parsing the printed text yields a structurally equal tree.

use crate::parser::ast::{Program, Statement, StatementKind};

/// Pretty-printer with a configurable indentation step.
pub struct Printer {
    indent_step: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Printer::new()
    }
}

impl Printer {
    /// Create a printer with the standard 4-column indentation step.
    pub fn new() -> Self {
        Self { indent_step: 4 }
    }

    /// Create a printer with a custom indentation step.
    pub fn with_indent_step(indent_step: usize) -> Self {
        Self { indent_step }
    }

    /// Render one statement (of any kind) as source text.
    ///
    /// `statement` is borrowed mutably for the disassemble/reassemble walk
    /// but is unchanged when this returns.
    pub fn print_statement(&self, statement: &mut Statement) -> String {
        let mut out = String::new();
        self.write_statement(statement, 0, &mut out);
        out
    }

    /// Render a whole program, instructions sorted by name for
    /// deterministic output.
    pub fn print_program(&self, program: &mut Program) -> String {
        let mut out = String::new();
        out.push_str(&format!("PROGRAM {} IS\n", program.name));

        let mut names: Vec<String> = program.context.keys().cloned().collect();
        names.sort();
        for name in &names {
            out.push('\n');
            out.push_str(&format!("INSTRUCTION {} IS\n", name));
            let body = program
                .context
                .get_mut(name)
                .expect("instruction body for listed name");
            self.write_block(body, 1, &mut out);
            out.push_str("END\n");
        }

        out.push('\n');
        out.push_str("BEGIN\n");
        self.write_block(&mut program.body, 1, &mut out);
        out.push_str(&format!("END {}\n", program.name));
        out
    }

    fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_step * level)
    }

    fn write_statement(
        &self,
        statement: &mut Statement,
        level: usize,
        out: &mut String,
    ) {
        match statement.kind() {
            StatementKind::Block => self.write_block(statement, level, out),
            StatementKind::If => {
                let (condition, mut body) = statement.disassemble_if();
                out.push_str(&format!(
                    "{}IF {} THEN\n",
                    self.indent(level),
                    condition
                ));
                self.write_block(&mut body, level + 1, out);
                out.push_str(&format!("{}END\n", self.indent(level)));
                statement.assemble_if(condition, body);
            }
            StatementKind::IfElse => {
                let (condition, mut then_body, mut else_body) =
                    statement.disassemble_if_else();
                out.push_str(&format!(
                    "{}IF {} THEN\n",
                    self.indent(level),
                    condition
                ));
                self.write_block(&mut then_body, level + 1, out);
                out.push_str(&format!("{}ELSE\n", self.indent(level)));
                self.write_block(&mut else_body, level + 1, out);
                out.push_str(&format!("{}END\n", self.indent(level)));
                statement.assemble_if_else(condition, then_body, else_body);
            }
            StatementKind::While => {
                let (condition, mut body) = statement.disassemble_while();
                out.push_str(&format!(
                    "{}WHILE {} DO\n",
                    self.indent(level),
                    condition
                ));
                self.write_block(&mut body, level + 1, out);
                out.push_str(&format!("{}END\n", self.indent(level)));
                statement.assemble_while(condition, body);
            }
            StatementKind::Call => {
                let name = statement.disassemble_call();
                out.push_str(&format!("{}{}\n", self.indent(level), name));
                statement.assemble_call(&name);
            }
        }
    }

    // Children are removed, printed, and re-inserted at the same position,
    // so the block's sequence is unchanged afterward.
    fn write_block(&self, block: &mut Statement, level: usize, out: &mut String) {
        for position in 0..block.block_len() {
            let mut child = block.remove_from_block(position);
            self.write_statement(&mut child, level, out);
            block.add_to_block(position, child);
        }
    }
}
