mod errors;
mod eval;
mod syntax;

use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser as ClapParser, ValueEnum};
use errors::{Diagnostics, EXIT_IO};
use syntax::{render, Lexer, Parser};

/// Front end for a small expression language.
#[derive(Debug, ClapParser)]
#[command(name = "lexeval", version)]
struct Cli {
    /// What to print for the source file
    #[arg(value_enum)]
    command: Mode,
    /// Source file holding one expression
    filename: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Mode {
    /// One line per token
    Tokenize,
    /// Parenthesized prefix form of the expression
    Parse,
    /// Value of the expression
    Evaluate,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let source = match fs::read_to_string(&cli.filename) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::from(EXIT_IO);
        }
    };
    ExitCode::from(run(cli.command, &source))
}

/// Runs one mode over `source` and returns the process exit code.
fn run(mode: Mode, source: &str) -> u8 {
    let mut diag = Diagnostics::new();
    let tokens = Lexer::new(source).tokenize(&mut diag);
    match mode {
        Mode::Tokenize => {
            for token in &tokens {
                println!("{}", token);
            }
        }
        Mode::Parse => {
            let expr = Parser::new(tokens.into_iter()).parse(&mut diag);
            if let Some(out) = render(expr.as_ref(), &diag) {
                println!("{}", out);
            }
        }
        Mode::Evaluate => match eval::evaluate(&tokens) {
            Ok(result) => println!("{}", eval::show(&result)),
            Err(err) => {
                eprintln!("{}", err);
                match err.state() {
                    Some(state) => diag.escalate(state),
                    None => return err.exit_code(),
                }
            }
        },
    }
    tracing::debug!(state = ?diag.state(), syntax_errors = diag.errors().len(), "finished");
    diag.exit_code()
}

/// Logging is off unless RUST_LOG is set; it goes to stderr either way.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}
