// AST definitions for the BL language front-end

use rustc_hash::FxHashMap;
use std::fmt;
use std::mem;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The ten sensor predicates that may guard an `IF` or `WHILE`.
///
/// Conditions only ever appear as labels on compound statements; they carry
/// no payload and their canonical spelling is fixed by [`Condition::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NextIsEmpty,
    NextIsNotEmpty,
    NextIsEnemy,
    NextIsNotEnemy,
    NextIsFriend,
    NextIsNotFriend,
    NextIsWall,
    NextIsNotWall,
    Random,
    True,
}

impl Condition {
    /// Canonical source spelling of this condition.
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::NextIsEmpty => "next-is-empty",
            Condition::NextIsNotEmpty => "next-is-not-empty",
            Condition::NextIsEnemy => "next-is-enemy",
            Condition::NextIsNotEnemy => "next-is-not-enemy",
            Condition::NextIsFriend => "next-is-friend",
            Condition::NextIsNotFriend => "next-is-not-friend",
            Condition::NextIsWall => "next-is-wall",
            Condition::NextIsNotWall => "next-is-not-wall",
            Condition::Random => "random",
            Condition::True => "true",
        }
    }

    /// Look up a condition by its source spelling (value equality, not
    /// identity).
    pub fn from_str(word: &str) -> Option<Condition> {
        match word {
            "next-is-empty" => Some(Condition::NextIsEmpty),
            "next-is-not-empty" => Some(Condition::NextIsNotEmpty),
            "next-is-enemy" => Some(Condition::NextIsEnemy),
            "next-is-not-enemy" => Some(Condition::NextIsNotEnemy),
            "next-is-friend" => Some(Condition::NextIsFriend),
            "next-is-not-friend" => Some(Condition::NextIsNotFriend),
            "next-is-wall" => Some(Condition::NextIsWall),
            "next-is-not-wall" => Some(Condition::NextIsNotWall),
            "random" => Some(Condition::Random),
            "true" => Some(Condition::True),
            _ => None,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five built-in action names. No user instruction may redefine them.
pub const PRIMITIVE_INSTRUCTIONS: [&str; 5] =
    ["move", "turnleft", "turnright", "infect", "skip"];

/// Whether `name` is one of the built-in primitive instruction names.
pub fn is_primitive_instruction(name: &str) -> bool {
    PRIMITIVE_INSTRUCTIONS.contains(&name)
}

/// Whether `name` satisfies the lexical identifier rule: an ASCII letter
/// followed by letters, digits, or hyphens. Case-sensitive.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Statement tag, as reported by [`Statement::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Block,
    If,
    IfElse,
    While,
    Call,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::Block => "BLOCK",
            StatementKind::If => "IF",
            StatementKind::IfElse => "IF_ELSE",
            StatementKind::While => "WHILE",
            StatementKind::Call => "CALL",
        };
        f.write_str(name)
    }
}

// The variant tree behind Statement. Private so that the assemble/
// disassemble operations below are the only way to build or take apart a
// node; direct construction could violate the arity invariants (e.g. a
// Block nested directly inside a Block).
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Block(Vec<Statement>),
    If {
        condition: Condition,
        body: Box<Statement>,
    },
    IfElse {
        condition: Condition,
        then_body: Box<Statement>,
        else_body: Box<Statement>,
    },
    While {
        condition: Condition,
        body: Box<Statement>,
    },
    Call(String),
}

/// One node of a BL statement tree.
///
/// A `Statement` is a tagged variant with five cases (block, if, if-else,
/// while, call). Its tag determines its exact shape: a Block holds any
/// number of non-Block children, If and While hold one Block body each,
/// IfElse holds two, and Call holds an instruction name and nothing else.
///
/// # Assembly and disassembly
///
/// Trees are built and taken apart exclusively through the `assemble_*`
/// and `disassemble_*` operations. Assembly consumes its child statements
/// by value, so a subtree is never referenced from two places at once;
/// disassembly hands the children back as fresh owned values and leaves
/// `self` as an empty Block, ready to be reassembled. Calling an operation
/// on a statement whose current tag does not match is a contract violation
/// and panics; the parser never does this, and there is no meaningful way
/// to recover from it.
///
/// ```
/// use buglang::parser::ast::{Condition, Statement, StatementKind};
///
/// let mut call = Statement::new();
/// call.assemble_call("turnleft");
///
/// let mut body = Statement::new();
/// body.add_to_block(0, call);
///
/// let mut stmt = Statement::new();
/// stmt.assemble_while(Condition::NextIsWall, body);
/// assert_eq!(stmt.kind(), StatementKind::While);
///
/// let (condition, body) = stmt.disassemble_while();
/// assert_eq!(condition, Condition::NextIsWall);
/// assert_eq!(body.block_len(), 1);
/// assert_eq!(stmt.kind(), StatementKind::Block); // stmt is empty again
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    node: Node,
}

impl Default for Statement {
    fn default() -> Self {
        Statement {
            node: Node::Block(Vec::new()),
        }
    }
}

impl Statement {
    /// Create an empty, unassembled statement (an empty Block).
    pub fn new() -> Self {
        Statement::default()
    }

    /// Report the current tag without mutating.
    pub fn kind(&self) -> StatementKind {
        match self.node {
            Node::Block(_) => StatementKind::Block,
            Node::If { .. } => StatementKind::If,
            Node::IfElse { .. } => StatementKind::IfElse,
            Node::While { .. } => StatementKind::While,
            Node::Call(_) => StatementKind::Call,
        }
    }

    fn is_empty_block(&self) -> bool {
        matches!(self.node, Node::Block(ref children) if children.is_empty())
    }

    /// Replace this (empty) statement with `Call(name)`.
    ///
    /// Panics if `self` is already assembled or `name` is not a valid
    /// identifier.
    pub fn assemble_call(&mut self, name: &str) {
        assert!(
            self.is_empty_block(),
            "assemble_call: target must be an empty Block, found {}",
            self.kind()
        );
        assert!(
            is_valid_identifier(name),
            "assemble_call: '{}' is not a valid identifier",
            name
        );
        self.node = Node::Call(name.to_string());
    }

    /// Inverse of [`assemble_call`](Statement::assemble_call): hand back
    /// the instruction name, leaving `self` empty.
    pub fn disassemble_call(&mut self) -> String {
        match mem::take(self).node {
            Node::Call(name) => name,
            node => panic!(
                "disassemble_call: expected CALL, found {}",
                Statement { node }.kind()
            ),
        }
    }

    /// Replace this (empty) statement with `If(condition, body)`, taking
    /// ownership of `body`.
    ///
    /// Panics if `self` is already assembled or `body` is not a Block.
    pub fn assemble_if(&mut self, condition: Condition, body: Statement) {
        assert!(
            self.is_empty_block(),
            "assemble_if: target must be an empty Block, found {}",
            self.kind()
        );
        assert!(
            body.kind() == StatementKind::Block,
            "assemble_if: body must be a Block, found {}",
            body.kind()
        );
        self.node = Node::If {
            condition,
            body: Box::new(body),
        };
    }

    /// Inverse of [`assemble_if`](Statement::assemble_if): extract the
    /// condition and body, leaving `self` empty.
    pub fn disassemble_if(&mut self) -> (Condition, Statement) {
        match mem::take(self).node {
            Node::If { condition, body } => (condition, *body),
            node => panic!(
                "disassemble_if: expected IF, found {}",
                Statement { node }.kind()
            ),
        }
    }

    /// Replace this (empty) statement with
    /// `IfElse(condition, then_body, else_body)`, taking ownership of both
    /// bodies.
    pub fn assemble_if_else(
        &mut self,
        condition: Condition,
        then_body: Statement,
        else_body: Statement,
    ) {
        assert!(
            self.is_empty_block(),
            "assemble_if_else: target must be an empty Block, found {}",
            self.kind()
        );
        assert!(
            then_body.kind() == StatementKind::Block,
            "assemble_if_else: then body must be a Block, found {}",
            then_body.kind()
        );
        assert!(
            else_body.kind() == StatementKind::Block,
            "assemble_if_else: else body must be a Block, found {}",
            else_body.kind()
        );
        self.node = Node::IfElse {
            condition,
            then_body: Box::new(then_body),
            else_body: Box::new(else_body),
        };
    }

    /// Inverse of [`assemble_if_else`](Statement::assemble_if_else).
    pub fn disassemble_if_else(&mut self) -> (Condition, Statement, Statement) {
        match mem::take(self).node {
            Node::IfElse {
                condition,
                then_body,
                else_body,
            } => (condition, *then_body, *else_body),
            node => panic!(
                "disassemble_if_else: expected IF_ELSE, found {}",
                Statement { node }.kind()
            ),
        }
    }

    /// Replace this (empty) statement with `While(condition, body)`, taking
    /// ownership of `body`.
    pub fn assemble_while(&mut self, condition: Condition, body: Statement) {
        assert!(
            self.is_empty_block(),
            "assemble_while: target must be an empty Block, found {}",
            self.kind()
        );
        assert!(
            body.kind() == StatementKind::Block,
            "assemble_while: body must be a Block, found {}",
            body.kind()
        );
        self.node = Node::While {
            condition,
            body: Box::new(body),
        };
    }

    /// Inverse of [`assemble_while`](Statement::assemble_while).
    pub fn disassemble_while(&mut self) -> (Condition, Statement) {
        match mem::take(self).node {
            Node::While { condition, body } => (condition, *body),
            node => panic!(
                "disassemble_while: expected WHILE, found {}",
                Statement { node }.kind()
            ),
        }
    }

    /// Insert `statement` at `position` in this Block's child sequence,
    /// taking ownership of it.
    ///
    /// Panics if `self` is not a Block, `statement` is a Block (blocks do
    /// not nest directly), or `position` exceeds the current length.
    pub fn add_to_block(&mut self, position: usize, statement: Statement) {
        assert!(
            statement.kind() != StatementKind::Block,
            "add_to_block: a Block may not be a direct child of a Block"
        );
        match self.node {
            Node::Block(ref mut children) => {
                assert!(
                    position <= children.len(),
                    "add_to_block: position {} out of range for block of length {}",
                    position,
                    children.len()
                );
                children.insert(position, statement);
            }
            _ => panic!("add_to_block: expected BLOCK, found {}", self.kind()),
        }
    }

    /// Remove and return the child at `position` from this Block.
    ///
    /// Panics if `self` is not a Block or `position` is out of range.
    pub fn remove_from_block(&mut self, position: usize) -> Statement {
        match self.node {
            Node::Block(ref mut children) => {
                assert!(
                    position < children.len(),
                    "remove_from_block: position {} out of range for block of length {}",
                    position,
                    children.len()
                );
                children.remove(position)
            }
            _ => panic!(
                "remove_from_block: expected BLOCK, found {}",
                self.kind()
            ),
        }
    }

    /// Number of children of this Block.
    ///
    /// Panics if `self` is not a Block.
    pub fn block_len(&self) -> usize {
        match self.node {
            Node::Block(ref children) => children.len(),
            _ => panic!("block_len: expected BLOCK, found {}", self.kind()),
        }
    }
}

/// A named top-level BL unit: user instruction definitions plus a main body.
///
/// `context` maps each user-defined instruction name to its defining body.
/// Invariants, checked at construction and re-checkable with
/// [`Program::validate`]: `name` is a valid identifier, no context key
/// shadows a primitive instruction, and every context value and the main
/// body are Block statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub name: String,
    pub context: FxHashMap<String, Statement>,
    pub body: Statement,
}

impl Program {
    /// Build a program from its parts, checking the context invariants.
    ///
    /// Panics if any invariant is violated. The parser only ever supplies
    /// data that passes; this is a defensive check on the caller, not
    /// user-facing error reporting.
    pub fn new(
        name: String,
        context: FxHashMap<String, Statement>,
        body: Statement,
    ) -> Self {
        let program = Program {
            name,
            context,
            body,
        };
        program.validate();
        program
    }

    /// Re-check the program invariants, panicking on violation.
    pub fn validate(&self) {
        assert!(
            is_valid_identifier(&self.name),
            "program name '{}' is not a valid identifier",
            self.name
        );
        for (name, body) in &self.context {
            assert!(
                is_valid_identifier(name),
                "instruction name '{}' is not a valid identifier",
                name
            );
            assert!(
                !is_primitive_instruction(name),
                "instruction name '{}' redefines a primitive instruction",
                name
            );
            assert!(
                body.kind() == StatementKind::Block,
                "body of instruction '{}' must be a Block, found {}",
                name,
                body.kind()
            );
        }
        assert!(
            self.body.kind() == StatementKind::Block,
            "program body must be a Block, found {}",
            self.body.kind()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str) -> Statement {
        let mut stmt = Statement::new();
        stmt.assemble_call(name);
        stmt
    }

    fn block(children: Vec<Statement>) -> Statement {
        let mut stmt = Statement::new();
        for (i, child) in children.into_iter().enumerate() {
            stmt.add_to_block(i, child);
        }
        stmt
    }

    #[test]
    fn test_new_statement_is_empty_block() {
        let stmt = Statement::new();
        assert_eq!(stmt.kind(), StatementKind::Block);
        assert_eq!(stmt.block_len(), 0);
    }

    #[test]
    fn test_assemble_disassemble_call() {
        let mut stmt = Statement::new();
        stmt.assemble_call("move");
        assert_eq!(stmt.kind(), StatementKind::Call);

        let name = stmt.disassemble_call();
        assert_eq!(name, "move");
        // Disassembly leaves the statement unassembled
        assert_eq!(stmt.kind(), StatementKind::Block);
        assert_eq!(stmt.block_len(), 0);
    }

    #[test]
    fn test_assemble_disassemble_if() {
        let mut stmt = Statement::new();
        stmt.assemble_if(Condition::NextIsWall, block(vec![call("turnleft")]));
        assert_eq!(stmt.kind(), StatementKind::If);

        let (condition, body) = stmt.disassemble_if();
        assert_eq!(condition, Condition::NextIsWall);
        assert_eq!(body.kind(), StatementKind::Block);
        assert_eq!(body.block_len(), 1);
        assert_eq!(stmt.kind(), StatementKind::Block);
    }

    #[test]
    fn test_assemble_disassemble_if_else() {
        let mut stmt = Statement::new();
        stmt.assemble_if_else(
            Condition::Random,
            block(vec![call("move")]),
            block(vec![call("skip")]),
        );
        assert_eq!(stmt.kind(), StatementKind::IfElse);

        let (condition, then_body, else_body) = stmt.disassemble_if_else();
        assert_eq!(condition, Condition::Random);
        assert_eq!(then_body.block_len(), 1);
        assert_eq!(else_body.block_len(), 1);
        assert_eq!(stmt.kind(), StatementKind::Block);
    }

    #[test]
    fn test_assemble_disassemble_while() {
        let mut stmt = Statement::new();
        stmt.assemble_while(Condition::True, block(vec![call("move")]));
        assert_eq!(stmt.kind(), StatementKind::While);

        let (condition, body) = stmt.disassemble_while();
        assert_eq!(condition, Condition::True);
        assert_eq!(body.block_len(), 1);
    }

    #[test]
    fn test_block_insert_remove_order() {
        let mut stmt = Statement::new();
        stmt.add_to_block(0, call("move"));
        stmt.add_to_block(1, call("infect"));
        stmt.add_to_block(1, call("turnright"));
        assert_eq!(stmt.block_len(), 3);

        assert_eq!(stmt.remove_from_block(1).disassemble_call(), "turnright");
        assert_eq!(stmt.remove_from_block(0).disassemble_call(), "move");
        assert_eq!(stmt.remove_from_block(0).disassemble_call(), "infect");
        assert_eq!(stmt.block_len(), 0);
    }

    #[test]
    fn test_structural_equality() {
        let a = block(vec![call("move"), call("turnleft")]);
        let b = block(vec![call("move"), call("turnleft")]);
        let c = block(vec![call("turnleft"), call("move")]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    #[should_panic(expected = "disassemble_if: expected IF")]
    fn test_disassemble_wrong_kind_panics() {
        let mut stmt = Statement::new();
        stmt.assemble_while(Condition::True, Statement::new());
        stmt.disassemble_if();
    }

    #[test]
    #[should_panic(expected = "assemble_call: target must be an empty Block")]
    fn test_assemble_over_assembled_panics() {
        let mut stmt = Statement::new();
        stmt.assemble_call("move");
        stmt.assemble_call("move");
    }

    #[test]
    #[should_panic(expected = "not a valid identifier")]
    fn test_assemble_call_invalid_name_panics() {
        let mut stmt = Statement::new();
        stmt.assemble_call("7up");
    }

    #[test]
    #[should_panic(expected = "a Block may not be a direct child")]
    fn test_block_in_block_panics() {
        let mut stmt = Statement::new();
        stmt.add_to_block(0, Statement::new());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_add_to_block_out_of_range_panics() {
        let mut stmt = Statement::new();
        stmt.add_to_block(1, call("move"));
    }

    #[test]
    fn test_identifier_rule() {
        assert!(is_valid_identifier("move"));
        assert!(is_valid_identifier("find-wall"));
        assert!(is_valid_identifier("Step2"));
        assert!(is_valid_identifier("a"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2step"));
        assert!(!is_valid_identifier("-lead"));
        assert!(!is_valid_identifier("two words"));
        assert!(!is_valid_identifier("under_score"));
    }

    #[test]
    fn test_condition_spellings_round_trip() {
        let all = [
            Condition::NextIsEmpty,
            Condition::NextIsNotEmpty,
            Condition::NextIsEnemy,
            Condition::NextIsNotEnemy,
            Condition::NextIsFriend,
            Condition::NextIsNotFriend,
            Condition::NextIsWall,
            Condition::NextIsNotWall,
            Condition::Random,
            Condition::True,
        ];
        for condition in all {
            assert_eq!(Condition::from_str(condition.as_str()), Some(condition));
        }
        assert_eq!(Condition::from_str("next-is-lava"), None);
    }

    #[test]
    fn test_program_new_accepts_valid_context() {
        let mut context = FxHashMap::default();
        context.insert("patrol".to_string(), block(vec![call("move")]));
        let program =
            Program::new("p".to_string(), context, block(vec![call("patrol")]));
        assert_eq!(program.name, "p");
        assert_eq!(program.context.len(), 1);
    }

    #[test]
    #[should_panic(expected = "redefines a primitive instruction")]
    fn test_program_primitive_key_panics() {
        let mut context = FxHashMap::default();
        context.insert("move".to_string(), block(vec![call("skip")]));
        Program::new("p".to_string(), context, Statement::new());
    }

    #[test]
    #[should_panic(expected = "must be a Block")]
    fn test_program_non_block_value_panics() {
        let mut context = FxHashMap::default();
        context.insert("patrol".to_string(), call("move"));
        Program::new("p".to_string(), context, Statement::new());
    }

    #[test]
    #[should_panic(expected = "is not a valid identifier")]
    fn test_program_bad_name_panics() {
        Program::new("9lives".to_string(), FxHashMap::default(), Statement::new());
    }
}
