use std::fmt;

/// The main error type for SIGIL template parsing and rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum SigilError {
    /// Raised when a byte cannot start any token.
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a string literal is not closed before end of input.
    UnclosedString {
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a `${` placeholder is not closed before end of input.
    UnclosedVariable {
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for malformed numbers, literals, and placeholder shapes.
    InvalidLiteral {
        literal: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a tree-building operation arrives out of sequence.
    /// The syntax checker should reject these inputs first; this is the
    /// builder's own guard.
    ProtocolError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    RenderError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl fmt::Display for SigilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigilError::UnexpectedCharacter { character, line, column, hint, code } =>
                write!(f, "[SIGIL] Unexpected character '{}' at {}:{}{}{}",
                    character, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::UnclosedString { line, column, hint, code } =>
                write!(f, "[SIGIL] Unclosed string starting at {}:{}{}{}",
                    line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::UnclosedVariable { line, column, hint, code } =>
                write!(f, "[SIGIL] Unclosed variable starting at {}:{}{}{}",
                    line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::InvalidLiteral { literal, line, column, hint, code } =>
                write!(f, "[SIGIL] Invalid literal '{}' at {}:{}{}{}",
                    literal, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::UnexpectedEof { message, line, column, hint, code } =>
                write!(f, "[SIGIL] Unexpected EOF at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::SyntaxError { message, line, column, hint, code } =>
                write!(f, "[SIGIL] Syntax Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::ProtocolError { message, hint, code } =>
                write!(f, "[SIGIL] Protocol Error: {}{}{}",
                    message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::RenderError { message, hint, code } =>
                write!(f, "[SIGIL] Render Error: {}{}{}",
                    message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::FileError { message, path, hint, code } =>
                write!(f, "[SIGIL] File Error '{}': {}{}{}",
                    path, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
        }
    }
}

impl std::error::Error for SigilError {}
