//! The driver's own error type: everything a fatal condition anywhere
//! in the pipeline, or in argument handling or file I/O, gets turned
//! into before [`crate::main`] prints it and exits (§7: "may substitute
//! a non-terminating error return for process exit").

use crate::cli::CliError;
use microc_util::error::{CodegenError, ParseError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Cli(#[from] CliError),

    #[error("{0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}
