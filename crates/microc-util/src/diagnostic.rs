//! Diagnostic reporting.
//!
//! Every fatal condition in the compiler (§7 of the design: syntactic,
//! semantic, internal-invariant errors) is reported through a
//! [`Handler`]. There are no warnings in this language — every
//! diagnostic the core ever raises is fatal, so [`Level`] exists mainly
//! to keep the door open for a future `-W` without reshaping this type.
//!
//! # Examples
//!
//! ```
//! use microc_util::diagnostic::Handler;
//! use microc_util::span::Span;
//!
//! let mut handler = Handler::new();
//! handler.error(Span::DUMMY, "expected ';'");
//! assert!(handler.has_errors());
//! ```

use crate::span::Span;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
        }
    }
}

/// A single reported diagnostic: a level, a message, and the span it
/// is anchored to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// Collects diagnostics raised during one compile invocation.
///
/// Currently unused scaffolding: the parser and code generator report
/// their fatal conditions directly as `thiserror` `Result` types
/// (`ParseError`, `CodegenError`) that `microc-drv` matches on and
/// prints, rather than routing through a shared `Handler`. This type is
/// kept available for a richer diagnostic path (batching, multiple
/// errors per run) without forcing that shape on every phase yet.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(span, message));
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The first reported diagnostic, if any — the core never tries to
    /// recover past the first fatal error, so this is the one that
    /// matters to a caller.
    pub fn first(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::FileId;

    #[test]
    fn handler_starts_clean() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        assert!(handler.first().is_none());
    }

    #[test]
    fn handler_records_errors_in_order() {
        let mut handler = Handler::new();
        handler.error(Span::point(FileId(0), 4), "first");
        handler.error(Span::point(FileId(0), 9), "second");
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics().len(), 2);
        assert_eq!(handler.first().unwrap().message, "first");
    }

    #[test]
    fn diagnostic_display_includes_level_and_message() {
        let diag = Diagnostic::error(Span::DUMMY, "oops");
        assert_eq!(format!("{diag}"), "error: oops");
    }
}
