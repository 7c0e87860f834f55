use super::scanner::{bump, expect_bytes, peek};
use super::*;
use crate::placeholder;

/// Consume a string literal, opening quote to matching unescaped closing
/// quote. An odd run of backslashes keeps a quote escaped. The raw span is
/// returned with both quotes; escape sequences are not decoded here.
pub(super) fn read_string(lexer: &mut Lexer) -> Result<Vec<u8>, SigilError> {
    let start = lexer.pos;
    let start_line = lexer.line;
    let start_column = lexer.column;
    bump(lexer); // consume opening '"'

    let mut backslashes = 0usize;
    loop {
        let byte = bump(lexer).ok_or(SigilError::UnclosedString {
            line: start_line,
            column: start_column,
            hint: Some("String literal not closed".into()),
            code: Some(103),
        })?;

        if byte == b'\\' {
            backslashes += 1;
            continue;
        }
        if byte == b'"' && backslashes % 2 == 0 {
            break;
        }
        backslashes = 0;
    }

    Ok(lexer.input[start..lexer.pos].to_vec())
}

/// Consume the maximal valid JSON-number run and decode it to an f64.
pub(super) fn read_number(lexer: &mut Lexer) -> Result<f64, SigilError> {
    let start = lexer.pos;

    if peek(lexer) == Some(b'-') {
        bump(lexer);
    }

    // Integer part: a lone zero or a nonzero digit run
    match peek(lexer) {
        Some(b'0') => {
            bump(lexer);
            if matches!(peek(lexer), Some(b'0'..=b'9')) {
                return Err(invalid_number(lexer, start, "Leading zeros are not allowed"));
            }
        }
        Some(b'1'..=b'9') => {
            while matches!(peek(lexer), Some(b'0'..=b'9')) {
                bump(lexer);
            }
        }
        _ => return Err(invalid_number(lexer, start, "Expected a digit")),
    }

    // Fractional part
    if peek(lexer) == Some(b'.') {
        bump(lexer);
        if !matches!(peek(lexer), Some(b'0'..=b'9')) {
            return Err(invalid_number(lexer, start, "Expected a digit after '.'"));
        }
        while matches!(peek(lexer), Some(b'0'..=b'9')) {
            bump(lexer);
        }
    }

    // Exponent
    if matches!(peek(lexer), Some(b'e') | Some(b'E')) {
        bump(lexer);
        if matches!(peek(lexer), Some(b'+') | Some(b'-')) {
            bump(lexer);
        }
        if !matches!(peek(lexer), Some(b'0'..=b'9')) {
            return Err(invalid_number(lexer, start, "Expected a digit in exponent"));
        }
        while matches!(peek(lexer), Some(b'0'..=b'9')) {
            bump(lexer);
        }
    }

    let span = &lexer.input[start..lexer.pos];
    let text = std::str::from_utf8(span)
        .map_err(|_| invalid_number(lexer, start, "Number span is not UTF-8"))?;
    text.parse::<f64>()
        .map_err(|_| invalid_number(lexer, start, "Not a valid JSON number"))
}

fn invalid_number(lexer: &Lexer, start: usize, hint: &str) -> SigilError {
    SigilError::InvalidLiteral {
        literal: String::from_utf8_lossy(&lexer.input[start..lexer.pos]).into_owned(),
        line: lexer.line,
        column: lexer.column,
        hint: Some(hint.into()),
        code: Some(102),
    }
}

/// Consume exactly `true` or `false`.
pub(super) fn read_boolean(lexer: &mut Lexer) -> Result<bool, SigilError> {
    match peek(lexer) {
        Some(b't') => {
            expect_bytes(lexer, b"true")?;
            Ok(true)
        }
        _ => {
            expect_bytes(lexer, b"false")?;
            Ok(false)
        }
    }
}

/// Consume exactly `null`.
pub(super) fn read_null(lexer: &mut Lexer) -> Result<(), SigilError> {
    expect_bytes(lexer, b"null")
}

/// Consume a whole-value placeholder up to and including the next `}` and
/// validate the `${identifier}` shape.
pub(super) fn read_variable(lexer: &mut Lexer) -> Result<(Vec<u8>, String), SigilError> {
    let start = lexer.pos;
    let start_line = lexer.line;
    let start_column = lexer.column;

    loop {
        match bump(lexer) {
            Some(b'}') => break,
            Some(_) => {}
            None => {
                return Err(SigilError::UnclosedVariable {
                    line: start_line,
                    column: start_column,
                    hint: Some("Expected '}' to close the placeholder".into()),
                    code: Some(104),
                });
            }
        }
    }

    let raw = lexer.input[start..lexer.pos].to_vec();
    let name = placeholder::exact(&raw).ok_or_else(|| SigilError::InvalidLiteral {
        literal: String::from_utf8_lossy(&raw).into_owned(),
        line: start_line,
        column: start_column,
        hint: Some("Placeholders take the form ${identifier}".into()),
        code: Some(105),
    })?;

    Ok((raw, name))
}
