use crate::SigilError;
use crate::ast::Node;
use crate::builder::{AstBuilder, ContainerKind};
use crate::lexer::Lexer;
use crate::syntax::{Mark, SyntaxChecker};
use crate::token::TokenKind;

mod value;

/// Parse one template document from raw bytes.
pub fn parse(input: &[u8]) -> Result<Node, SigilError> {
    Parser::new(input).parse_document()
}

/// Orchestrator state. The primitive kinds are transient: a value token is
/// read, recorded, and the state re-derived in one step, so only the
/// resting states appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    InArray,
    InObject,
    Done,
}

/// Pull-based parser driving the lexer, syntax checker, and AST builder in
/// a single forward pass.
///
/// There is no return-address stack: after every value or enclose the next
/// state is derived from the builder's open-container top (array → array
/// context, object or pending pair → object context, completed → done).
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    checker: SyntaxChecker,
    builder: AstBuilder,
    state: State,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Parser {
            lexer: Lexer::new(input),
            checker: SyntaxChecker::new(),
            builder: AstBuilder::new(),
            state: State::Init,
        }
    }

    /// Consume tokens until the document completes. Reading stops at
    /// completion; trailing bytes are left untouched. End of input while
    /// the tree is incomplete is fatal.
    pub fn parse_document(&mut self) -> Result<Node, SigilError> {
        while self.state != State::Done {
            self.step()?;
        }
        self.builder.take_root()
    }

    fn step(&mut self) -> Result<(), SigilError> {
        let kind = self.lexer.next_token_kind()?;
        match kind {
            TokenKind::Space => Ok(()),

            TokenKind::LeftBracket => {
                self.checker.push(Mark::ArrayOpen);
                self.builder.open_array()?;
                self.state = State::InArray;
                Ok(())
            }
            TokenKind::LeftBrace => {
                self.checker.push(Mark::ObjectOpen);
                self.builder.open_object()?;
                self.state = State::InObject;
                Ok(())
            }
            TokenKind::RightBracket | TokenKind::RightBrace => {
                self.checker
                    .enclose(kind, self.lexer.line(), self.lexer.column())?;
                self.builder.enclose()?;
                self.derive_state();
                Ok(())
            }

            TokenKind::Colon => {
                if self.state == State::Init {
                    return Err(self.syntax_error("Unexpected ':' at document root", 207));
                }
                self.checker.push(Mark::Colon);
                Ok(())
            }
            TokenKind::Comma => {
                if self.state == State::Init {
                    return Err(self.syntax_error("Unexpected ',' at document root", 203));
                }
                self.checker.push(Mark::Comma);
                Ok(())
            }

            TokenKind::String => value::read_string(self),
            TokenKind::Number => value::read_number(self),
            TokenKind::Boolean => value::read_boolean(self),
            TokenKind::Null => value::read_null(self),
            TokenKind::Variable => value::read_variable(self),

            TokenKind::Drop => {
                let byte = self.lexer.peek_byte().unwrap_or(b'?');
                Err(SigilError::UnexpectedCharacter {
                    character: byte as char,
                    line: self.lexer.line(),
                    column: self.lexer.column(),
                    hint: Some("Byte cannot start a JSON token".into()),
                    code: Some(101),
                })
            }
            // Classification never yields this kind; strings are promoted
            // after placeholder scanning.
            TokenKind::StringWithVariable => Err(SigilError::ProtocolError {
                message: "lexer classified a token as StringWithVariable".into(),
                hint: None,
                code: Some(301),
            }),
        }
    }

    /// Re-derive the resting state from the builder's open-container top.
    fn derive_state(&mut self) {
        self.state = if self.builder.is_complete() {
            State::Done
        } else {
            match self.builder.top_container_kind() {
                Some(ContainerKind::Array) => State::InArray,
                Some(ContainerKind::Object) | Some(ContainerKind::Pair) => State::InObject,
                None => State::Init,
            }
        };
    }

    fn in_key_position(&self) -> bool {
        self.builder.top_container_kind() == Some(ContainerKind::Object)
    }

    fn syntax_error(&self, message: &str, code: u32) -> SigilError {
        SigilError::SyntaxError {
            message: message.into(),
            line: self.lexer.line(),
            column: self.lexer.column(),
            hint: None,
            code: Some(code),
        }
    }
}
