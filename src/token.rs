/// Token kinds produced by the lexer, classified from a single leading byte.
///
/// Structural kinds and `Space` are consumed by the lexer as soon as they
/// are classified. Value-starting kinds (`String`, `Number`, `Boolean`,
/// `Null`, `Variable`) leave the input untouched until the matching
/// `read_*` call. `StringWithVariable` is never produced by classification;
/// the parser promotes a `String` to it after placeholder scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    String,
    Number,
    Boolean,
    Null,
    Variable,
    StringWithVariable,

    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,

    /// Insignificant whitespace, ignored by the parser.
    Space,
    /// Lex-error sentinel: the byte cannot start any token.
    Drop,
}

impl TokenKind {
    pub fn classify(byte: u8) -> TokenKind {
        match byte {
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            b'[' => TokenKind::LeftBracket,
            b']' => TokenKind::RightBracket,
            b':' => TokenKind::Colon,
            b',' => TokenKind::Comma,
            b'"' => TokenKind::String,
            b'-' | b'0'..=b'9' => TokenKind::Number,
            b't' | b'f' => TokenKind::Boolean,
            b'n' => TokenKind::Null,
            b'$' => TokenKind::Variable,
            b' ' | b'\t' | b'\n' | b'\r' => TokenKind::Space,
            _ => TokenKind::Drop,
        }
    }

    pub fn is_structural(self) -> bool {
        matches!(
            self,
            TokenKind::LeftBrace
                | TokenKind::RightBrace
                | TokenKind::LeftBracket
                | TokenKind::RightBracket
                | TokenKind::Colon
                | TokenKind::Comma
        )
    }

    pub fn is_value_start(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::Boolean
                | TokenKind::Null
                | TokenKind::Variable
        )
    }
}
