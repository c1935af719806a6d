use crate::{io::EofPolicy, lexer::Syntax};

/// Knobs for a single run. Everything defaults to plain Boolfuck with no
/// limits: non-command characters are comments, reading past the input gives
/// 0 bits and a trailing partial output byte is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub syntax: Syntax,
    pub eof: EofPolicy,
    /// Write a trailing partial byte (zero padded) instead of dropping it
    pub pad_output: bool,
    /// Max number of instructions to execute
    pub step_limit: Option<u64>,
    /// Max number of bits the tape may hold
    pub tape_limit: Option<usize>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn eof(mut self, eof: EofPolicy) -> Self {
        self.eof = eof;
        self
    }

    pub fn pad_output(mut self, pad_output: bool) -> Self {
        self.pad_output = pad_output;
        self
    }

    pub fn step_limit(mut self, limit: impl Into<Option<u64>>) -> Self {
        self.step_limit = limit.into();
        self
    }

    pub fn tape_limit(mut self, limit: impl Into<Option<usize>>) -> Self {
        self.tape_limit = limit.into();
        self
    }
}
