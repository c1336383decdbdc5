// rlox: scan and parse Lox expressions from a script or an interactive prompt

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;

use rlox::printer::AstPrinter;
use rlox::{Diagnostics, Parser, Scanner};

// sysexits.h
const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_IOERR: u8 = 74;

/// Scan and parse Lox expressions, printing the resulting syntax tree
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Script to read; starts an interactive prompt when omitted
    script: Option<PathBuf>,

    /// Print the scanned tokens before the tree
    #[arg(long)]
    tokens: bool,

    /// Never color diagnostics
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match <Cli as clap::Parser>::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also arrive here, on stdout
            if let Err(e) = err.print() {
                eprintln!("Error: could not print usage: {}", e);
            }
            return if err.use_stderr() {
                ExitCode::from(EX_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if cli.no_color {
        crossterm::style::force_color_output(false);
    }

    match &cli.script {
        Some(path) => run_file(path, cli.tokens),
        None => run_prompt(cli.tokens),
    }
}

/// Logging goes to stderr and is silent unless RUST_LOG asks for more.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

fn run_file(path: &Path, show_tokens: bool) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: could not read '{}': {}", path.display(), e);
            return ExitCode::from(EX_IOERR);
        }
    };

    tracing::debug!(path = %path.display(), bytes = source.len(), "running script");

    if run(&source, show_tokens).had_error() {
        ExitCode::from(EX_DATAERR)
    } else {
        ExitCode::SUCCESS
    }
}

/// Read-eval-print over stdin. Each line stands alone, so an error on one
/// line does not affect the next. An empty line or end of input ends the
/// session.
fn run_prompt(show_tokens: bool) -> ExitCode {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("{}", "> ".dark_grey());
        if io::stdout().flush().is_err() {
            return ExitCode::from(EX_IOERR);
        }

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: could not read input: {}", e);
                return ExitCode::from(EX_IOERR);
            }
        }

        if line.trim_end_matches(&['\n', '\r'][..]).is_empty() {
            break;
        }

        run(&line, show_tokens);
    }

    ExitCode::SUCCESS
}

/// Run the front end over one unit of source and report the outcome.
fn run(source: &str, show_tokens: bool) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);

    if show_tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    let expr = Parser::new(tokens).parse(&mut diagnostics);

    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic.to_string().red());
    }

    // Any diagnostic, lexical or syntactic, suppresses output.
    if let (Some(expr), false) = (&expr, diagnostics.had_error()) {
        println!("{}", AstPrinter::new().print(expr));
    }

    diagnostics
}
