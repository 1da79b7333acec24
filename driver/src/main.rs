use clap::{ArgAction, Parser}; // clap crate for CLI argument parsing
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use model::print::print_program;
use model::{LexError, Program, SyntaxError};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the source file
    input_path: PathBuf,

    /// Run lexer only and dump the tokens
    #[arg(short, long)]
    lex: bool,

    /// Pretty-print the parsed program
    #[arg(short, long)]
    print: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let source = match fs::read_to_string(&args.input_path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}: {e}", args.input_path.display());
            return ExitCode::from(2);
        }
    };
    tracing::debug!(path = %args.input_path.display(), bytes = source.len(), "read source");

    if args.lex {
        let (tokens, errors) = lexer::tokenize(&source);
        for token in &tokens {
            println!("{}:{}\t{:?}\t{}", token.line, token.column, token.kind, token.text);
        }
        report(&errors, &[]);
        return exit_status(errors.is_empty());
    }

    let result = parser::parse(&source);
    if args.print {
        print!("{}", print_program(&result.ast));
    } else {
        summarize(&result.ast);
    }

    report(&result.lex_errors, &result.diagnostics);
    exit_status(result.is_clean())
}

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn summarize(program: &Program) {
    for function in &program.functions {
        let params: Vec<String> = function
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty.name()))
            .collect();
        println!(
            "fun {}({}): {} ({} statements)",
            function.name,
            params.join(", "),
            function.return_type.name(),
            function.body.statements.len()
        );
    }
    println!("{} function(s)", program.functions.len());
}

/// Lexical and syntax errors, merged into source order, on stderr.
fn report(lex_errors: &[LexError], diagnostics: &[SyntaxError]) {
    let mut lines: Vec<(u32, u32, String)> = lex_errors
        .iter()
        .map(|e| (e.line, e.column, e.to_string()))
        .chain(diagnostics.iter().map(|d| (d.line(), d.column(), d.to_string())))
        .collect();
    lines.sort_by_key(|(line, column, _)| (*line, *column));

    for (line, column, message) in lines {
        eprintln!("{line}:{column}: {message}");
    }
}

fn exit_status(clean: bool) -> ExitCode {
    if clean { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
