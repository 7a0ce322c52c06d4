//! Command-line argument handling.
//!
//! This is one of the external collaborators spec.md explicitly leaves
//! unspecified ("the command-line entry point ... the stage-selection
//! switch"); the grammar below is this implementation's choice of
//! shape, not a normative interface.
//!
//! ```text
//! microc [--lex | --parse | --emit-asm] [-o OUTPUT] [--verbose] INPUT
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Which prefix of the pipeline to run and print (§1: "honor stage
/// selection by calling only the scanner, or the scanner+parser, or
/// the full pipeline").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Scanner only; prints the token stream.
    Lex,
    /// Scanner + parser; prints the syntax tree.
    Parse,
    /// The full pipeline; prints assembly text.
    EmitAsm,
}

impl Default for Stage {
    fn default() -> Self {
        Stage::EmitAsm
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub stage: Stage,
    pub verbose: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("no input file given")]
    MissingInput,

    #[error("'{0}' requires a value")]
    MissingValue(&'static str),

    #[error("unrecognized option '{0}'")]
    UnknownOption(String),

    #[error("too many input files (this pipeline compiles one file at a time): '{0}'")]
    TooManyInputs(String),
}

pub const USAGE: &str = "\
usage: microc [--lex | --parse | --emit-asm] [-o OUTPUT] [--verbose] INPUT

    --lex         tokenize INPUT and print the token stream
    --parse       tokenize and parse INPUT and print the syntax tree
    --emit-asm    run the full pipeline and print assembly text (default)
    -o OUTPUT     write output to OUTPUT instead of stdout
    --verbose     trace each pipeline stage to stderr
    -h, --help    print this message
";

/// Parses a command line (excluding argv[0]) into a [`Config`].
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, CliError> {
    let mut input: Option<String> = None;
    let mut output: Option<PathBuf> = None;
    let mut stage = Stage::EmitAsm;
    let mut verbose = false;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParsedArgs::Help),
            "--lex" => stage = Stage::Lex,
            "--parse" => stage = Stage::Parse,
            "--emit-asm" => stage = Stage::EmitAsm,
            "--verbose" => verbose = true,
            "-o" => {
                let value = iter.next().ok_or(CliError::MissingValue("-o"))?;
                output = Some(PathBuf::from(value));
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(CliError::UnknownOption(arg));
            }
            _ => {
                if input.is_some() {
                    return Err(CliError::TooManyInputs(arg));
                }
                input = Some(arg);
            }
        }
    }

    let input = input.ok_or(CliError::MissingInput)?;
    Ok(ParsedArgs::Config(Config {
        input: PathBuf::from(input),
        output,
        stage,
        verbose,
    }))
}

/// The two things a successful parse of argv can produce: a request to
/// print usage and exit cleanly, or a [`Config`] to run.
pub enum ParsedArgs {
    Help,
    Config(Config),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_emit_asm_stage() {
        let parsed = parse_args(args(&["main.c"])).unwrap();
        match parsed {
            ParsedArgs::Config(cfg) => {
                assert_eq!(cfg.stage, Stage::EmitAsm);
                assert_eq!(cfg.input, PathBuf::from("main.c"));
                assert_eq!(cfg.output, None);
                assert!(!cfg.verbose);
            }
            ParsedArgs::Help => panic!("expected a config"),
        }
    }

    #[test]
    fn recognizes_stage_flags() {
        for (flag, expect) in [("--lex", Stage::Lex), ("--parse", Stage::Parse)] {
            let parsed = parse_args(args(&[flag, "main.c"])).unwrap();
            match parsed {
                ParsedArgs::Config(cfg) => assert_eq!(cfg.stage, expect),
                ParsedArgs::Help => panic!("expected a config"),
            }
        }
    }

    #[test]
    fn reads_output_path_and_verbose_flag() {
        let parsed = parse_args(args(&["main.c", "-o", "out.s", "--verbose"])).unwrap();
        match parsed {
            ParsedArgs::Config(cfg) => {
                assert_eq!(cfg.output, Some(PathBuf::from("out.s")));
                assert!(cfg.verbose);
            }
            ParsedArgs::Help => panic!("expected a config"),
        }
    }

    #[test]
    fn missing_input_is_an_error() {
        assert_eq!(parse_args(args(&["--verbose"])), Err(CliError::MissingInput));
    }

    #[test]
    fn dash_o_without_a_value_is_an_error() {
        assert_eq!(
            parse_args(args(&["main.c", "-o"])),
            Err(CliError::MissingValue("-o"))
        );
    }

    #[test]
    fn unknown_option_is_reported() {
        assert_eq!(
            parse_args(args(&["--bogus", "main.c"])),
            Err(CliError::UnknownOption("--bogus".to_string()))
        );
    }

    #[test]
    fn second_positional_argument_is_an_error() {
        assert_eq!(
            parse_args(args(&["a.c", "b.c"])),
            Err(CliError::TooManyInputs("b.c".to_string()))
        );
    }

    #[test]
    fn help_flag_short_circuits_everything_else() {
        assert!(matches!(
            parse_args(args(&["--help"])).unwrap(),
            ParsedArgs::Help
        ));
    }
}
