//! Main scanner loop: whitespace and comment skipping, then dispatch to
//! the per-kind scanners.

use super::{comment, identifier, number, operator};
use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use microc_util::span::{FileId, Span};

/// Turns a source buffer into a stream of [`Token`]s.
///
/// The scanner never fails (§4.1): any byte it does not recognize is
/// silently skipped, exactly like whitespace. It carries no `Handler`
/// for that reason — there is nothing for it to ever report.
///
/// Restartable on a cloned state value, per §4.1 — the parser uses this
/// to snapshot the lexer before a speculative parse and restore it on
/// rewind.
#[derive(Clone)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    file: FileId,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: FileId) -> Self {
        Self {
            cursor: Cursor::new(source),
            file,
            done: false,
        }
    }

    /// Scans and returns the next token, skipping whitespace and
    /// comments first. Returns `Eof` forever once the buffer is
    /// exhausted.
    pub fn next_token(&mut self) -> Token {
        loop {
            let Some(byte) = self.cursor.current() else {
                return Token::new(TokenKind::Eof, Span::point(self.file, self.cursor.position()));
            };

            if byte.is_ascii_whitespace() {
                self.cursor.bump();
                continue;
            }

            if byte == b'/' && self.cursor.peek_next() == Some(b'/') {
                comment::skip_line(&mut self.cursor);
                continue;
            }

            if byte == b'/' && self.cursor.peek_next() == Some(b'*') {
                comment::skip_block(&mut self.cursor);
                continue;
            }

            let start = self.cursor.position();

            if byte.is_ascii_digit() {
                let kind = number::scan(&mut self.cursor);
                return Token::new(kind, Span::new(self.file, start, self.cursor.position()));
            }

            if identifier::is_ident_start(byte) {
                let kind = identifier::scan(&mut self.cursor);
                return Token::new(kind, Span::new(self.file, start, self.cursor.position()));
            }

            if let Some(kind) = operator::scan(&mut self.cursor) {
                return Token::new(kind, Span::new(self.file, start, self.cursor.position()));
            }

            // Any other byte is not part of this language's alphabet;
            // skip it and keep scanning.
            self.cursor.bump();
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    /// Yields every real token followed by exactly one `Eof`, then
    /// stops, so a lexer can be collected into a `Vec<Token>` directly.
    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.kind.is_eof() {
            self.done = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source, FileId(0)).map(|t| t.kind).collect()
    }

    #[test]
    fn scans_empty_input_to_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn scans_declaration_statement() {
        assert_eq!(
            kinds("int x1 = 2 + 2;"),
            vec![
                TokenKind::Int,
                TokenKind::Ident("x1".to_string()),
                TokenKind::Assign,
                TokenKind::Number(2),
                TokenKind::Plus,
                TokenKind::Number(2),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn skips_whitespace_and_comments_between_tokens() {
        assert_eq!(
            kinds("int /* c */ x1; // trailing\n"),
            vec![
                TokenKind::Int,
                TokenKind::Ident("x1".to_string()),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn distinguishes_double_char_punctuators() {
        assert_eq!(
            kinds("a == b != c"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::EqEq,
                TokenKind::Ident("b".to_string()),
                TokenKind::BangEq,
                TokenKind::Ident("c".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keeps_yielding_eof_after_exhaustion() {
        let mut lexer = Lexer::new(";", FileId(0));
        assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn unrecognized_bytes_are_skipped_without_a_token() {
        assert_eq!(
            kinds("a @ b"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Ident("b".to_string()),
                TokenKind::Eof,
            ]
        );
    }
}
