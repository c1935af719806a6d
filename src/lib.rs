//! A Boolfuck interpreter.
//!
//! Boolfuck is brainfuck over single bits: the tape holds bits, `+` flips the
//! current one, `,` and `;` read and write one bit at a time (packed
//! least-significant bit first into bytes) and `[`/`]` loop while the current
//! bit is set.
//!
//! ```
//! let outcome = boolfuck::run(",;,;,;,;,;,;,;,;", b"A");
//! assert_eq!(outcome.output, b"A");
//! assert!(outcome.status.is_success());
//! ```

extern crate thiserror;

pub mod config;
pub mod interpreter;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod tape;

use std::io::{Read, Write};

use thiserror::Error;

pub use config::Config;
pub use interpreter::{CancelToken, Interpreter, RuntimeError, State, Summary};
pub use io::EofPolicy;
pub use lexer::Syntax;
pub use parser::{Instruction, ParseError, Program};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse Error: {0}")]
    Parse(#[from] ParseError),

    #[error("Runtime Error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// How a run ended
#[derive(Debug)]
pub enum ExitStatus {
    Halted(Summary),
    ParseError(ParseError),
    RuntimeFault(RuntimeError),
}

impl ExitStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ExitStatus::Halted(_))
    }

    /// Process exit code: 0 halted, 2 didn't parse, 3 faulted while running
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Halted(_) => 0,
            ExitStatus::ParseError(_) => 2,
            ExitStatus::RuntimeFault(_) => 3,
        }
    }
}

impl From<Result<Summary, Error>> for ExitStatus {
    fn from(result: Result<Summary, Error>) -> Self {
        match result {
            Ok(summary) => ExitStatus::Halted(summary),
            Err(Error::Parse(e)) => ExitStatus::ParseError(e),
            Err(Error::Runtime(e)) => ExitStatus::RuntimeFault(e),
        }
    }
}

/// Output bytes together with how the run ended. Bytes written before a
/// fault are kept.
#[derive(Debug)]
pub struct Outcome {
    pub output: Vec<u8>,
    pub status: ExitStatus,
}

/// Parse `source` and run it against the given streams.
pub fn execute<R: Read, W: Write>(
    source: &str,
    input: R,
    output: W,
    config: &Config,
) -> Result<Summary, Error> {
    let program = Program::parse(source, config.syntax)?;
    Ok(Interpreter::new(&program, input, output, config).run()?)
}

/// Run `source` on an in-memory input with the default [`Config`].
pub fn run(source: &str, input: &[u8]) -> Outcome {
    run_with(source, input, &Config::default())
}

pub fn run_with(source: &str, input: &[u8], config: &Config) -> Outcome {
    let mut output = vec![];
    let status = execute(source, input, &mut output, config).into();
    Outcome { output, status }
}
