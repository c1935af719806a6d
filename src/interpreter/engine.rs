use std::io::{self, Read, Write};

use crate::{config::Config, parser::Instruction, parser::Program, tape::Tape};

use super::{CancelToken, Runtime, RuntimeError, State, Summary};

/// Runs a [`Program`] one instruction at a time.
///
/// Brackets jump through the program's precomputed table: `[` on a zero bit
/// and `]` on a one bit both continue right after their partner.
pub struct Interpreter<'a, R, W> {
    program: &'a Program,
    runtime: Runtime<R, W>,

    /// instruction pointer, `program.len()` means we're done
    pc: usize,
    steps: u64,
    state: State,

    step_limit: Option<u64>,
    pad_output: bool,
    cancel: Option<CancelToken>,

    /// flushing the output failed after a fault had already stopped the run
    flush_error: Option<io::Error>,
}

impl<'a, R: Read, W: Write> Interpreter<'a, R, W> {
    pub fn new(program: &'a Program, in_stream: R, out_stream: W, config: &Config) -> Self {
        let tape = Tape::with_limit(config.tape_limit);
        Self {
            program,
            runtime: Runtime::new(tape, in_stream, out_stream, config.eof),
            pc: 0,
            steps: 0,
            state: if program.is_empty() {
                State::Halted
            } else {
                State::Running
            },
            step_limit: config.step_limit,
            pad_output: config.pad_output,
            cancel: None,
            flush_error: None,
        }
    }

    /// Checked before every instruction
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn ip(&self) -> usize {
        self.pc
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn tape(&self) -> &Tape {
        self.runtime.tape()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            steps: self.steps,
            bits_read: self.runtime.reader().bits_read(),
            bits_written: self.runtime.writer().bits_written(),
            bytes_written: self.runtime.writer().bytes_written(),
        }
    }

    /// A flush failure hidden behind the fault `run` returned
    pub fn take_flush_error(&mut self) -> Option<io::Error> {
        self.flush_error.take()
    }

    pub fn into_output(self) -> W {
        self.runtime.into_output()
    }

    /// Execute the instruction under the instruction pointer.
    pub fn step(&mut self) -> Result<State, RuntimeError> {
        match self.state {
            State::Running => {}
            State::Halted => return Ok(State::Halted),
            State::Faulted => return Err(RuntimeError::Faulted),
        }

        match self.execute() {
            Ok(()) => {
                self.steps += 1;
                if self.pc >= self.program.len() {
                    self.state = State::Halted;
                }
                Ok(self.state)
            }
            Err(e) => {
                self.state = State::Faulted;
                Err(e)
            }
        }
    }

    /// Step until the program halts, then deal with the trailing partial
    /// byte. Bytes written before a fault stay written.
    pub fn run(&mut self) -> Result<Summary, RuntimeError> {
        loop {
            match self.step() {
                Ok(State::Halted) => break,
                Ok(_) => continue,
                Err(e) => {
                    // report the fault, keep the flush failure for the caller
                    match self.runtime.flush() {
                        Ok(()) => {}
                        Err(RuntimeError::Io(flush)) => self.flush_error = Some(flush),
                        Err(other) => {
                            self.flush_error = Some(io::Error::new(io::ErrorKind::Other, other))
                        }
                    }
                    return Err(e);
                }
            }
        }

        self.runtime.finish(self.pad_output)?;
        Ok(self.summary())
    }

    fn execute(&mut self) -> Result<(), RuntimeError> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(RuntimeError::Cancelled);
        }
        if let Some(limit) = self.step_limit {
            if self.steps >= limit {
                return Err(RuntimeError::StepLimitExceeded { limit });
            }
        }

        let Some(instruction) = self.program.get(self.pc) else {
            return Ok(());
        };
        match instruction {
            Instruction::Toggle => self.runtime.flip()?,
            Instruction::MoveLeft => self.runtime.shift_data_pointer(-1)?,
            Instruction::MoveRight => self.runtime.shift_data_pointer(1)?,
            Instruction::Read => self.runtime.read()?,
            Instruction::Write => self.runtime.write()?,
            Instruction::JumpIfZero => {
                if self.runtime.value_is_zero() {
                    self.pc = self.jump_target();
                    // don't do the ++
                    return Ok(());
                }
            }
            Instruction::JumpIfNonZero => {
                if !self.runtime.value_is_zero() {
                    self.pc = self.jump_target();
                    return Ok(());
                }
            }
        }
        self.pc += 1;
        Ok(())
    }

    /// One past the bracket matching the one at `pc`
    fn jump_target(&self) -> usize {
        // a parsed program always pairs its brackets
        self.program.matching(self.pc).unwrap_or(self.pc) + 1
    }
}
