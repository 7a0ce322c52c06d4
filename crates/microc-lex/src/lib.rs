//! microc-lex — turns source text into a token stream.
//!
//! The language is a 7-bit ASCII subset, so [`cursor::Cursor`] walks
//! bytes rather than `char`s. [`lexer::Lexer`] skips whitespace and
//! comments and dispatches each remaining byte to one of the per-kind
//! scanners under [`lexer`]; it never fails, so it carries no
//! `Handler` — unrecognized bytes are dropped silently, exactly like
//! whitespace.

mod cursor;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

#[cfg(test)]
mod proptests {
    use super::*;
    use microc_util::span::FileId;
    use proptest::prelude::*;

    proptest! {
        /// Any source string the lexer scans ends with exactly one
        /// `Eof`, and never panics.
        #[test]
        fn always_terminates_with_a_single_eof(source in "[ -~\n\t]{0,64}") {
            let tokens: Vec<_> = Lexer::new(&source, FileId(0)).collect();
            prop_assert_eq!(tokens.last().map(|t| t.kind == TokenKind::Eof), Some(true));
            prop_assert!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count() == 1);
        }

        /// Every token's span lies within the source buffer and is
        /// non-decreasing across the stream.
        #[test]
        fn spans_are_monotonic_and_in_bounds(source in "[a-zA-Z0-9_ +\\-*/%;(){}=!&|^,\n]{0,64}") {
            let mut last_end = 0usize;
            for token in Lexer::new(&source, FileId(0)) {
                prop_assert!(token.span.start >= last_end || token.span.start == token.span.end);
                prop_assert!(token.span.end <= source.len());
                last_end = token.span.end;
            }
        }
    }
}
