//! Integer literal lexing.
//!
//! The language has a single numeric type, a 32-bit `int`; a literal is
//! a run of decimal digits accumulated left to right. Overflow past
//! `u32::MAX` is not rejected (DESIGN.md records this as the resolution
//! of the overflow open question) — the accumulator wraps instead of
//! panicking.

use crate::cursor::Cursor;
use crate::token::TokenKind;

/// Consumes a run of decimal digits starting at the cursor.
pub fn scan(cursor: &mut Cursor<'_>) -> TokenKind {
    let mut value: u32 = 0;
    while let Some(byte) = cursor.current() {
        if !byte.is_ascii_digit() {
            break;
        }
        cursor.bump();
        let digit = (byte - b'0') as u32;
        value = value.wrapping_mul(10).wrapping_add(digit);
    }
    TokenKind::Number(value)
}
