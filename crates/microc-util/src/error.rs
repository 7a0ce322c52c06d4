//! Error types shared by every compiler phase.
//!
//! Each phase gets its own enum (§7 of the design: syntactic, semantic,
//! internal-invariant errors) rather than one grab-bag type, so a
//! caller can match on `ParseError` without dragging in codegen
//! variants it can never see. Every variant carries the [`Span`] of the
//! offending token or identifier; `microc-drv` is the only place that
//! turns one into a printed `error: ...` line and a process exit, per
//! §7's "may substitute a non-terminating error return for process
//! exit" allowance.

use thiserror::Error;

/// Error type for source map operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceMapError {
    /// A `FileId` that does not correspond to any loaded file.
    #[error("file not found: id {0}")]
    FileNotFound(usize),
}

pub type SourceMapResult<T> = std::result::Result<T, SourceMapError>;

/// The scanner never fails (§4.1): unrecognized bytes are silently
/// skipped, exactly like whitespace. This type exists so the pipeline's
/// error plumbing has a uniform shape across phases even though no
/// value of this type can ever be constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {}

/// Fatal errors raised while building the syntax tree (§4.2, §7.2).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An expected token was not found.
    #[error("at byte {offset}: expected {expected}, found {found}")]
    Expected {
        offset: usize,
        expected: String,
        found: String,
    },

    /// A token that cannot start a primary expression.
    #[error("at byte {offset}: unexpected token in expression: {found}")]
    UnexpectedInPrimary { offset: usize, found: String },

    /// The token stream ran out inside an open block or parameter list.
    #[error("at byte {offset}: unexpected end of input")]
    UnexpectedEof { offset: usize },

    /// Unbalanced parentheses around a declarator, e.g. `int (x;`.
    #[error("at byte {offset}: unbalanced parentheses in declarator")]
    UnbalancedDeclarator { offset: usize },
}

impl ParseError {
    /// The byte offset the diagnostic is anchored to, independent of
    /// which file it came from (the caller already knows that).
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Expected { offset, .. }
            | ParseError::UnexpectedInPrimary { offset, .. }
            | ParseError::UnexpectedEof { offset }
            | ParseError::UnbalancedDeclarator { offset } => *offset,
        }
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Fatal errors raised by the scope table (§4.3).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// A name declared twice within the same lexical frame.
    #[error("redeclaration of '{0}' in the same scope")]
    Redeclared(String),

    /// A name that no enclosing frame declares.
    #[error("use of undeclared identifier '{0}'")]
    Undeclared(String),
}

pub type ScopeResult<T> = std::result::Result<T, ScopeError>;

/// Fatal errors raised while lowering the tree to assembly (§4.4, §7.3,
/// §7.4).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error(transparent)]
    Scope(#[from] ScopeError),

    /// More than six arguments in a call, or more than six parameters
    /// in a function definition — the System V register set runs out.
    #[error("'{0}' passes/declares more than six arguments")]
    TooManyArguments(String),

    /// `break`/`continue` with no enclosing loop.
    #[error("'{0}' outside of a loop")]
    LoopControlOutsideLoop(&'static str),

    /// The tree holds a node kind the generator never expects at this
    /// position — a bug in the parser, not in the source program.
    #[error("internal error: unexpected node kind at {0}")]
    UnexpectedNodeKind(&'static str),
}

pub type CodegenResult<T> = std::result::Result<T, CodegenError>;
