//! # Introduction
//!
//! buglang parses BL, a small imperative robot instruction language, into
//! an abstract syntax tree and regenerates source text from that tree.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Token stream → Parser → AST (Statement / Program) → Printer → Source
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an AST through
//!    ownership-transferring assembly operations on
//!    [`parser::ast::Statement`].
//! 2. [`printer`] — walks a tree by disassembling and reassembling each
//!    node, emitting indented source text; re-parsing the output yields an
//!    equal tree (the round-trip property).
//!
//! ## The BL language
//!
//! A program names itself, defines user instructions, and gives a main
//! body:
//!
//! ```text
//! PROGRAM guard IS
//!
//! INSTRUCTION patrol IS
//!     move
//!     move
//! END
//!
//! BEGIN
//!     WHILE next-is-not-wall DO
//!         patrol
//!     END
//! END guard
//! ```
//!
//! Statements are `IF`/`IF … ELSE` conditionals guarded by one of ten
//! sensor conditions (`next-is-empty`, `next-is-wall`, `random`, `true`,
//! …), `WHILE` loops, and calls to primitive (`move`, `turnleft`,
//! `turnright`, `infect`, `skip`) or user-defined instructions. User
//! instructions may not redefine the primitives.

pub mod parser;
pub mod printer;
