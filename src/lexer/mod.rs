use crate::SigilError;
use crate::token::TokenKind;

mod readers;
mod scanner;

/// Incremental byte-stream lexer with one byte of lookahead.
///
/// `next_token_kind` classifies the next meaningful byte. Structural and
/// whitespace tokens are consumed on classification; value-starting tokens
/// leave the input untouched until the matching `read_*` call, so the
/// parser decides which decoder runs.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Byte offset of the next unconsumed byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The next unconsumed byte, if any.
    pub fn peek_byte(&self) -> Option<u8> {
        scanner::peek(self)
    }

    /// Classify the next byte. Structural and space tokens are consumed
    /// immediately; value-starting kinds only classify.
    pub fn next_token_kind(&mut self) -> Result<TokenKind, SigilError> {
        let byte = scanner::peek(self).ok_or_else(|| SigilError::UnexpectedEof {
            message: "Unexpected end of input".into(),
            line: self.line,
            column: self.column,
            hint: Some("Document is incomplete".into()),
            code: Some(106),
        })?;

        let kind = TokenKind::classify(byte);
        if kind.is_structural() || kind == TokenKind::Space {
            scanner::bump(self);
        }
        Ok(kind)
    }

    /// Consume a string literal and return its raw span, quotes included.
    pub fn read_string(&mut self) -> Result<Vec<u8>, SigilError> {
        readers::read_string(self)
    }

    /// Consume the maximal valid JSON-number run and decode it.
    pub fn read_number(&mut self) -> Result<f64, SigilError> {
        readers::read_number(self)
    }

    /// Consume exactly `true` or `false`.
    pub fn read_boolean(&mut self) -> Result<bool, SigilError> {
        readers::read_boolean(self)
    }

    /// Consume exactly `null`.
    pub fn read_null(&mut self) -> Result<(), SigilError> {
        readers::read_null(self)
    }

    /// Consume up to and including the next `}` and validate the
    /// `${identifier}` shape. Returns the raw span and the variable name.
    pub fn read_variable(&mut self) -> Result<(Vec<u8>, String), SigilError> {
        readers::read_variable(self)
    }
}
