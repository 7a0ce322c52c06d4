//! Operator and punctuation lexing.

use crate::cursor::Cursor;
use crate::token::TokenKind;

/// Scans one punctuator starting at the cursor, which must be
/// positioned on a byte this module recognizes. Two-character
/// punctuators (`==`, `!=`) consume their second byte on a match;
/// otherwise only the first byte is consumed.
pub fn scan(cursor: &mut Cursor<'_>) -> Option<TokenKind> {
    let byte = cursor.current()?;
    let kind = match byte {
        b'(' => TokenKind::LParen,
        b')' => TokenKind::RParen,
        b'{' => TokenKind::LBrace,
        b'}' => TokenKind::RBrace,
        b';' => TokenKind::Semicolon,
        b',' => TokenKind::Comma,
        b'+' => TokenKind::Plus,
        b'-' => TokenKind::Minus,
        b'*' => TokenKind::Star,
        b'/' => TokenKind::Slash,
        b'%' => TokenKind::Percent,
        b'~' => TokenKind::Tilde,
        b'&' => TokenKind::Amp,
        b'|' => TokenKind::Pipe,
        b'^' => TokenKind::Caret,
        b'=' => {
            cursor.bump();
            if cursor.current() == Some(b'=') {
                cursor.bump();
                return Some(TokenKind::EqEq);
            }
            return Some(TokenKind::Assign);
        }
        b'!' => {
            cursor.bump();
            if cursor.current() == Some(b'=') {
                cursor.bump();
                return Some(TokenKind::BangEq);
            }
            return Some(TokenKind::Bang);
        }
        _ => return None,
    };
    cursor.bump();
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_single_char_punctuators() {
        for (src, expect) in [
            ("(", TokenKind::LParen),
            (")", TokenKind::RParen),
            ("{", TokenKind::LBrace),
            ("}", TokenKind::RBrace),
            (";", TokenKind::Semicolon),
            (",", TokenKind::Comma),
            ("+", TokenKind::Plus),
            ("-", TokenKind::Minus),
            ("*", TokenKind::Star),
            ("/", TokenKind::Slash),
            ("%", TokenKind::Percent),
            ("~", TokenKind::Tilde),
            ("&", TokenKind::Amp),
            ("|", TokenKind::Pipe),
            ("^", TokenKind::Caret),
        ] {
            let mut cursor = Cursor::new(src);
            assert_eq!(scan(&mut cursor), Some(expect));
            assert_eq!(cursor.position(), 1);
        }
    }

    #[test]
    fn distinguishes_assign_from_eqeq() {
        let mut cursor = Cursor::new("=x");
        assert_eq!(scan(&mut cursor), Some(TokenKind::Assign));
        assert_eq!(cursor.position(), 1);

        let mut cursor = Cursor::new("==");
        assert_eq!(scan(&mut cursor), Some(TokenKind::EqEq));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn distinguishes_bang_from_bangeq() {
        let mut cursor = Cursor::new("!x");
        assert_eq!(scan(&mut cursor), Some(TokenKind::Bang));
        assert_eq!(cursor.position(), 1);

        let mut cursor = Cursor::new("!=");
        assert_eq!(scan(&mut cursor), Some(TokenKind::BangEq));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn unrecognized_byte_is_none() {
        let mut cursor = Cursor::new("$");
        assert_eq!(scan(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }
}
