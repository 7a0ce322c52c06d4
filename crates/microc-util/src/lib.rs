//! microc-util — foundation types shared by every compiler phase.
//!
//! This crate has no knowledge of the source language; it only provides
//! the plumbing every other crate needs:
//!
//! - [`span`] — byte-offset source locations and the file table they're
//!   resolved against.
//! - [`diagnostic`] — the fatal-error reporting `Handler` used by the
//!   parser and code generator.
//! - [`index_vec`] — a typed arena vector, used to store the syntax
//!   tree as a flat `IndexVec<NodeId, Node>` instead of a tree of boxed
//!   nodes.
//! - [`error`] — the per-phase `thiserror` enums (`ParseError`,
//!   `ScopeError`, `CodegenError`) that every fatal condition in the
//!   core is reported through.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;

pub use diagnostic::Handler;
pub use error::{CodegenError, LexError, ParseError, ScopeError};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceMap, Span};
