//! Identifier and keyword lexing.

use crate::cursor::Cursor;
use crate::token::TokenKind;

pub fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

pub fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

/// Consumes the longest run of identifier characters starting at the
/// cursor and classifies it as a keyword or a plain identifier.
pub fn scan(cursor: &mut Cursor<'_>) -> TokenKind {
    let start = cursor.position();
    while cursor.current().is_some_and(is_ident_continue) {
        cursor.bump();
    }
    let word = cursor.slice(start, cursor.position()).to_string();
    TokenKind::keyword_or_ident(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_plain_identifier() {
        let mut cursor = Cursor::new("x1 ");
        assert_eq!(scan(&mut cursor), TokenKind::Ident("x1".to_string()));
    }

    #[test]
    fn scans_keyword() {
        let mut cursor = Cursor::new("while (");
        assert_eq!(scan(&mut cursor), TokenKind::While);
    }

    #[test]
    fn underscore_is_not_part_of_an_identifier() {
        let mut cursor = Cursor::new("x_1;");
        assert_eq!(scan(&mut cursor), TokenKind::Ident("x".to_string()));
    }
}
