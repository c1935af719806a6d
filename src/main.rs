extern crate clap;

use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufReader, Read},
    process::ExitCode,
    time::Instant,
};

use anyhow::Context;
use boolfuck::{
    lexer::{lexer::Lexer, TokenKind},
    Config, EofPolicy, Interpreter, Program, Syntax,
};
use clap::{Parser, ValueEnum};
use colored::Colorize;

/// Boolfuck interpreter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to operate on
    #[arg()]
    file: String,

    /// What to do with it, defaults to `run`
    #[arg(value_enum)]
    commands: Vec<Commands>,

    /// Read program input from a file instead of stdin
    #[arg(short, long)]
    input: Option<String>,

    #[arg(short, long, value_enum, default_value_t = SyntaxArg::Extended)]
    syntax: SyntaxArg,

    /// What `,` reads once the input has run out
    #[arg(short, long, value_enum, default_value_t = EofArg::Zero)]
    eof: EofArg,

    /// Write a trailing partial byte padded with zeros instead of dropping it
    #[arg(short, long)]
    pad_output: bool,

    /// Give up after this many instructions
    #[arg(long)]
    step_limit: Option<u64>,

    /// Max number of tape bits the program may write to
    #[arg(long)]
    tape_limit: Option<usize>,

    /// Don't print stage timings
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Commands {
    /// Output the lexer
    Tokens,
    /// Output the program without comments
    Program,
    /// Output the jump table
    Jumps,
    /// Run the program
    Run,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SyntaxArg {
    /// Only `+ , ; < > [ ]`
    Boolfuck,
    /// Also accept `-` for flip and `.` for write
    Extended,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum EofArg {
    Zero,
    One,
    Fault,
}

impl Args {
    fn config(&self) -> Config {
        Config::new()
            .syntax(match self.syntax {
                SyntaxArg::Boolfuck => Syntax::Boolfuck,
                SyntaxArg::Extended => Syntax::Extended,
            })
            .eof(match self.eof {
                EofArg::Zero => EofPolicy::Zero,
                EofArg::One => EofPolicy::One,
                EofArg::Fault => EofPolicy::Fault,
            })
            .pad_output(self.pad_output)
            .step_limit(self.step_limit)
            .tape_limit(self.tape_limit)
    }
}

/// Stage banners go to stderr so they never mix with program output
struct Log {
    quiet: bool,
}

impl Log {
    fn start(&self, stage: &str) -> Instant {
        if !self.quiet {
            eprintln!("{}", format!("Starting {stage}").blue());
        }
        Instant::now()
    }

    fn finish(&self, stage: &str, started: Instant) {
        if !self.quiet {
            eprintln!(
                "{} {:.2?}",
                format!("Finished {stage} in").green(),
                started.elapsed()
            );
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match drive(&args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn drive(args: &Args) -> anyhow::Result<u8> {
    let mut commands: HashSet<Commands> = args.commands.iter().cloned().collect();
    if commands.is_empty() {
        commands.insert(Commands::Run);
    }
    let config = args.config();
    let log = Log { quiet: args.quiet };

    if !args.quiet {
        eprintln!("Running {}", args.file);
    }
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("can't read {}", args.file))?;

    if commands.contains(&Commands::Tokens) {
        let tokens = Lexer::new(&text, config.syntax).collect_tokens();
        for token in tokens.iter() {
            match (&token.kind, token.symbol()) {
                (TokenKind::Comment(c), _) => println!("\t\t{c}"),
                (_, Some(symbol)) => print!("{symbol}"),
                _ => {}
            }
        }
        println!();
    }

    let started = log.start("parsing");
    let program = match Program::parse(&text, config.syntax) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}: {}", "Parse Error".red(), e);
            let position = e.position();
            if let Some(line) = text.lines().nth(position.line - 1) {
                eprintln!("  {line}");
                eprintln!("  {}{}", " ".repeat(position.column - 1), "^".red());
            }
            return Ok(2);
        }
    };
    log.finish("parsing", started);

    if commands.contains(&Commands::Program) {
        println!("{}", program);
    }

    if commands.contains(&Commands::Jumps) {
        for (open, close) in program.loops() {
            let at = |i| program.position(i).unwrap_or_default();
            println!("[ {open} ({}) <-> ] {close} ({})", at(open), at(close));
        }
    }

    if !commands.contains(&Commands::Run) {
        return Ok(0);
    }

    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("can't open input {path}"))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let stdout = io::stdout().lock();

    let started = log.start("interpreter");
    let mut interpreter = Interpreter::new(&program, input, stdout, &config);
    let result = interpreter.run();
    log.finish("interpreter", started);

    match result {
        Ok(summary) => {
            if !args.quiet {
                eprintln!(
                    "{} steps, {} bits read, {} bits written",
                    summary.steps, summary.bits_read, summary.bits_written
                );
            }
            Ok(0)
        }
        Err(e) => {
            let at = program
                .position(interpreter.ip())
                .map(|p| format!(" at {p}"))
                .unwrap_or_default();
            eprintln!(
                "{}: {} (instruction {}{}, after {} steps)",
                "Runtime Error".red(),
                e,
                interpreter.ip(),
                at,
                interpreter.steps()
            );
            if let Some(flush) = interpreter.take_flush_error() {
                eprintln!("{}: couldn't flush output: {}", "IO Error".red(), flush);
            }
            Ok(3)
        }
    }
}
