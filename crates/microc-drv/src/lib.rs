//! microc-drv — the external collaborator around the core (§1): CLI
//! argument handling, file I/O, stage selection, and the debug printers
//! for tokens and trees. None of this is part of the compiler core
//! proper; it exists only to make the three entry points the core
//! exposes (*tokenize*, *parse*, *emit*) reachable from a shell.

mod cli;
mod error;
mod print;

pub use cli::{Config, Stage};
pub use error::DriverError;
pub use print::{print_tokens, print_tree};

use microc_util::span::{FileId, SourceMap};
use std::path::Path;
use tracing::debug_span;

/// Runs the configured stage of the pipeline against `config.input` and
/// returns the text that should be written to `config.output` (or
/// stdout).
pub fn run(config: &Config) -> Result<String, DriverError> {
    let source = read_source(&config.input)?;

    let mut sources = SourceMap::new();
    let file = sources.add_file(config.input.display().to_string(), source.clone());

    match config.stage {
        Stage::Lex => Ok(lex_stage(&source, file)),
        Stage::Parse => Ok(parse_stage(&source, file)?),
        Stage::EmitAsm => emit_stage(&source, file),
    }
}

fn read_source(path: &Path) -> Result<String, DriverError> {
    let _span = debug_span!("read_source", path = %path.display()).entered();
    std::fs::read_to_string(path).map_err(|e| DriverError::Io(path.to_path_buf(), e))
}

fn lex_stage(source: &str, file: FileId) -> String {
    let _span = debug_span!("lex").entered();
    let tokens: Vec<_> = microc_lex::Lexer::new(source, file).collect();
    tracing::debug!(count = tokens.len(), "tokenized");
    print_tokens(&tokens)
}

fn parse_stage(source: &str, file: FileId) -> Result<String, DriverError> {
    let _span = debug_span!("parse").entered();
    let ast = microc_par::parse(source, file)?;
    tracing::debug!(nodes = ast.len(), "parsed");
    Ok(print_tree(&ast))
}

fn emit_stage(source: &str, file: FileId) -> Result<String, DriverError> {
    let ast = {
        let _span = debug_span!("parse").entered();
        microc_par::parse(source, file)?
    };
    let _span = debug_span!("codegen").entered();
    let asm = microc_gen::generate(&ast)?;
    tracing::debug!(bytes = asm.len(), "emitted assembly");
    Ok(asm)
}

/// Initializes `tracing-subscriber` for the process, honoring
/// `MICROC_LOG` and falling back to `debug` output when `--verbose` was
/// passed and the variable is unset.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("MICROC_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// The binary's real entry point: parse argv, run the selected stage,
/// write its output, and turn any error into the `Result` `main.rs`
/// reports to the process exit code.
pub fn main() -> Result<(), DriverError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match cli::parse_args(args)? {
        cli::ParsedArgs::Help => {
            print!("{}", cli::USAGE);
            Ok(())
        }
        cli::ParsedArgs::Config(config) => {
            init_tracing(config.verbose);
            let output = run(&config)?;
            write_output(&config, &output)?;
            Ok(())
        }
    }
}

fn write_output(config: &Config, text: &str) -> Result<(), DriverError> {
    match &config.output {
        Some(path) => std::fs::write(path, ensure_trailing_newline(text))
            .map_err(|e| DriverError::Io(path.clone(), e)),
        None => {
            print!("{}", ensure_trailing_newline(text));
            Ok(())
        }
    }
}

fn ensure_trailing_newline(text: &str) -> String {
    if text.ends_with('\n') || text.is_empty() {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}
