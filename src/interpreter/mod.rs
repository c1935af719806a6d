pub mod engine;

use std::{
    io::{self, Read, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use thiserror::Error;

use crate::{
    io::{BitReader, BitWriter, EofPolicy},
    tape::{Tape, TapeError},
};

pub use engine::Interpreter;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    #[error("Ran out of input after {bit} bits")]
    InputExhausted { bit: u64 },

    #[error(transparent)]
    Tape(#[from] TapeError),

    #[error("Step limit of {limit} reached")]
    StepLimitExceeded { limit: u64 },

    #[error("Execution was cancelled")]
    Cancelled,

    #[error("Interpreter already faulted")]
    Faulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// The instruction pointer is inside the program
    Running,
    /// The instruction pointer walked off the end
    Halted,
    /// A runtime error stopped the program, it can't be resumed
    Faulted,
}

/// Lets another thread (a watchdog, a ctrl-c handler) stop a run between
/// two instructions.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters from a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub steps: u64,
    pub bits_read: u64,
    pub bits_written: u64,
    pub bytes_written: u64,
}

/// Everything a program can touch: the tape and both ends of the io.
pub struct Runtime<R, W> {
    tape: Tape,

    in_stream: BitReader<R>,
    out_stream: BitWriter<W>,
}

impl<R: Read, W: Write> Runtime<R, W> {
    pub fn new(tape: Tape, in_stream: R, out_stream: W, eof: EofPolicy) -> Self {
        Self {
            tape,
            in_stream: BitReader::new(in_stream, eof),
            out_stream: BitWriter::new(out_stream),
        }
    }

    pub fn flip(&mut self) -> Result<(), RuntimeError> {
        Ok(self.tape.toggle()?)
    }

    pub fn shift_data_pointer(&mut self, by: isize) -> Result<(), RuntimeError> {
        Ok(self.tape.move_by(by)?)
    }

    /// Read one bit from the input into the data pointer
    pub fn read(&mut self) -> Result<(), RuntimeError> {
        let bit = self.in_stream.read_bit()?;
        Ok(self.tape.set_current(bit)?)
    }

    /// Write the bit at the data pointer to the output
    pub fn write(&mut self) -> Result<(), RuntimeError> {
        Ok(self.out_stream.write_bit(self.tape.read_current())?)
    }

    /// is the bit at the data pointer zero?
    pub fn value_is_zero(&self) -> bool {
        !self.tape.read_current()
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn reader(&self) -> &BitReader<R> {
        &self.in_stream
    }

    pub fn writer(&self) -> &BitWriter<W> {
        &self.out_stream
    }

    pub fn finish(&mut self, pad: bool) -> Result<(), RuntimeError> {
        Ok(self.out_stream.finish(pad)?)
    }

    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        Ok(self.out_stream.flush()?)
    }

    pub fn into_output(self) -> W {
        self.out_stream.into_inner()
    }
}
