use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::lexer::{lexer::Lexer, Position, Syntax};

pub mod parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Flip the bit under the pointer
    Toggle,

    MoveLeft,
    MoveRight,

    /// Read one input bit into the current cell
    Read,
    /// Write the current cell to the output
    Write,

    /// `[`: skip past the matching `]` when the current bit is 0
    JumpIfZero,
    /// `]`: go back past the matching `[` when the current bit is 1
    JumpIfNonZero,
}

impl Instruction {
    pub fn symbol(self) -> char {
        match self {
            Instruction::Toggle => '+',
            Instruction::MoveLeft => '<',
            Instruction::MoveRight => '>',
            Instruction::Read => ',',
            Instruction::Write => ';',
            Instruction::JumpIfZero => '[',
            Instruction::JumpIfNonZero => ']',
        }
    }

    pub fn is_jump(self) -> bool {
        matches!(self, Instruction::JumpIfZero | Instruction::JumpIfNonZero)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Can't find other symbol (]) for [ at {position}")]
    UnmatchedOpen { position: Position },

    #[error("Can't find other symbol ([) for ] at {position}")]
    UnmatchedClose { position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::UnmatchedOpen { position } | ParseError::UnmatchedClose { position } => {
                *position
            }
        }
    }
}

/// A validated program: instructions plus the bracket pairs.
///
/// `jumps[i]` is the index of the bracket matching instruction `i`, and `None`
/// for everything that isn't a bracket.
#[derive(Debug, Clone, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
    positions: Vec<Position>,
    jumps: Vec<Option<usize>>,
}

/// Two programs are the same when they run the same; where the instructions
/// sat in the source doesn't matter.
impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.instructions == other.instructions && self.jumps == other.jumps
    }
}

impl Eq for Program {}

impl Program {
    pub fn parse(source: &str, syntax: Syntax) -> Result<Program, ParseError> {
        let tokens = Lexer::new(source, syntax).collect_tokens();
        parser::Parser::new(&tokens).parse_program()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, index: usize) -> Option<Instruction> {
        self.instructions.get(index).copied()
    }

    /// The bracket paired with the one at `index`.
    pub fn matching(&self, index: usize) -> Option<usize> {
        self.jumps.get(index).copied().flatten()
    }

    pub fn position(&self, index: usize) -> Option<Position> {
        self.positions.get(index).copied()
    }

    /// All `(open, close)` pairs ordered by the opening bracket.
    pub fn loops(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.jumps
            .iter()
            .enumerate()
            .filter_map(|(i, jump)| match (self.instructions[i], jump) {
                (Instruction::JumpIfZero, Some(j)) => Some((i, *j)),
                _ => None,
            })
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Program::parse(s, Syntax::default())
    }
}

/// Writes the program back out as canonical Boolfuck.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            write!(f, "{}", instruction.symbol())?;
        }
        Ok(())
    }
}
