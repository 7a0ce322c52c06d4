//! Comment skipping.
//!
//! Both comment forms produce no token; they are skipped as if they
//! were whitespace. An unterminated block comment consumes the rest of
//! the buffer rather than erroring — the scanner has no failure mode
//! (§4.1), so running off the end here simply hands the caller `Eof`.

use crate::cursor::Cursor;

/// Skips a `//` line comment, assuming the cursor sits on the first
/// `/`. Stops before the newline, or at end of buffer.
pub fn skip_line(cursor: &mut Cursor<'_>) {
    while let Some(byte) = cursor.current() {
        if byte == b'\n' {
            break;
        }
        cursor.bump();
    }
}

/// Skips a `/* ... */` block comment, assuming the cursor sits on the
/// opening `/`. The byte that opens the comment can never also close
/// it — scanning for `*/` starts only after both opening bytes are
/// consumed, so `/*/` is not a complete comment.
pub fn skip_block(cursor: &mut Cursor<'_>) {
    cursor.bump();
    cursor.bump();
    loop {
        match cursor.current() {
            None => break,
            Some(b'*') if cursor.peek_next() == Some(b'/') => {
                cursor.bump();
                cursor.bump();
                break;
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }
}
