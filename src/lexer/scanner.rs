use super::*;

/// Peek at the next byte without consuming it
pub(super) fn peek(lexer: &Lexer) -> Option<u8> {
    lexer.input.get(lexer.pos).copied()
}

/// Advance one byte and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<u8> {
    let curr = lexer.input.get(lexer.pos).copied();
    if let Some(b) = curr {
        lexer.pos += 1;
        if b == b'\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    curr
}

/// Consume an exact byte sequence, failing on the first mismatch
pub(super) fn expect_bytes(lexer: &mut Lexer, expected: &[u8]) -> Result<(), SigilError> {
    let start = lexer.pos;
    for &want in expected {
        if bump(lexer) != Some(want) {
            let got = String::from_utf8_lossy(&lexer.input[start..lexer.pos]).into_owned();
            return Err(SigilError::InvalidLiteral {
                literal: got,
                line: lexer.line,
                column: lexer.column,
                hint: Some(format!(
                    "Expected '{}'",
                    String::from_utf8_lossy(expected)
                )),
                code: Some(102),
            });
        }
    }
    Ok(())
}
