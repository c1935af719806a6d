use crate::lexer::{Token, TokenKind};

use super::{Instruction, ParseError, Program};

pub struct Parser<'a> {
    tokens: std::slice::Iter<'a, Token>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser {
            tokens: tokens.iter(),
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::default();
        // indices of the `[` we haven't closed yet
        let mut open = vec![];

        for token in self.tokens.by_ref() {
            let instruction = match token.kind {
                TokenKind::Flip => Instruction::Toggle,
                TokenKind::Left => Instruction::MoveLeft,
                TokenKind::Right => Instruction::MoveRight,
                TokenKind::Read => Instruction::Read,
                TokenKind::Write => Instruction::Write,
                TokenKind::JumpStart => Instruction::JumpIfZero,
                TokenKind::JumpEnd => Instruction::JumpIfNonZero,
                TokenKind::EOF => break,
                // we aren't keeping comments in the program
                TokenKind::Comment(_) => continue,
            };

            let index = program.instructions.len();
            let mut jump = None;
            match instruction {
                Instruction::JumpIfZero => open.push(index),
                Instruction::JumpIfNonZero => {
                    let start = open.pop().ok_or(ParseError::UnmatchedClose {
                        position: token.position,
                    })?;
                    program.jumps[start] = Some(index);
                    jump = Some(start);
                }
                _ => {}
            }

            program.instructions.push(instruction);
            program.positions.push(token.position);
            program.jumps.push(jump);
        }

        // the innermost unclosed bracket is the most useful one to report
        if let Some(&start) = open.last() {
            return Err(ParseError::UnmatchedOpen {
                position: program.positions[start],
            });
        }

        Ok(program)
    }
}
