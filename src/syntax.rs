use crate::SigilError;
use crate::token::TokenKind;

/// Value kinds tracked by the syntax checker. Keys may only be `String` or
/// `StringWithVariable`; a raw `Variable` is rejected in key position
/// because its rendered type is unknown until bind time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    StringWithVariable,
    Variable,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl ValueKind {
    fn is_key_shaped(self) -> bool {
        matches!(self, ValueKind::String | ValueKind::StringWithVariable)
    }
}

/// One mark on the checker stack, pushed in encounter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    ArrayOpen,
    ObjectOpen,
    Colon,
    Comma,
    Value(ValueKind),
}

/// Grammar validator for closed array/object spans.
///
/// Marks are pushed as tokens arrive; when a closer shows up, `enclose`
/// pops back to the matching opener and checks the popped span. A valid
/// span collapses to a single `Value` mark, so an already-validated
/// container looks like one opaque value to every ancestor check.
#[derive(Debug, Default)]
pub struct SyntaxChecker {
    stack: Vec<Mark>,
}

impl SyntaxChecker {
    pub fn new() -> Self {
        SyntaxChecker { stack: Vec::new() }
    }

    pub fn push(&mut self, mark: Mark) {
        self.stack.push(mark);
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Validate the span closed by `closer` (`RightBracket` or
    /// `RightBrace`) and collapse it to one value mark.
    pub fn enclose(
        &mut self,
        closer: TokenKind,
        line: usize,
        column: usize,
    ) -> Result<(), SigilError> {
        let (opener, closer_char) = match closer {
            TokenKind::RightBracket => (Mark::ArrayOpen, ']'),
            TokenKind::RightBrace => (Mark::ObjectOpen, '}'),
            _ => {
                return Err(SigilError::ProtocolError {
                    message: format!("enclose called with non-closer token {:?}", closer),
                    hint: None,
                    code: Some(301),
                });
            }
        };

        let mut span = Vec::new();
        loop {
            match self.stack.pop() {
                None => {
                    return Err(SigilError::SyntaxError {
                        message: format!("Unbalanced '{}' with no open container", closer_char),
                        line,
                        column,
                        hint: Some("Check for a missing opening bracket".into()),
                        code: Some(201),
                    });
                }
                Some(mark) if mark == opener => break,
                Some(Mark::ArrayOpen) | Some(Mark::ObjectOpen) => {
                    return Err(SigilError::SyntaxError {
                        message: format!("Mismatched '{}' closing the wrong container", closer_char),
                        line,
                        column,
                        hint: Some("Brackets and braces must pair up".into()),
                        code: Some(202),
                    });
                }
                Some(mark) => span.push(mark),
            }
        }
        span.reverse(); // popped back-to-front; validate in source order

        let collapsed = match closer {
            TokenKind::RightBracket => {
                check_array_span(&span, line, column)?;
                ValueKind::Array
            }
            _ => {
                check_object_span(&span, line, column)?;
                ValueKind::Object
            }
        };
        self.stack.push(Mark::Value(collapsed));
        Ok(())
    }
}

/// Arrays alternate `value, comma, ..., value`, or are empty.
fn check_array_span(span: &[Mark], line: usize, column: usize) -> Result<(), SigilError> {
    let mut expect_value = true;
    for mark in span {
        match (expect_value, mark) {
            (true, Mark::Value(_)) => expect_value = false,
            (false, Mark::Comma) => expect_value = true,
            (true, Mark::Comma) => {
                return Err(syntax(
                    "Comma without a preceding value in array",
                    "Remove the extra comma",
                    203,
                    line,
                    column,
                ));
            }
            (false, Mark::Value(_)) => {
                return Err(syntax(
                    "Two array values without a separating comma",
                    "Insert a comma between values",
                    204,
                    line,
                    column,
                ));
            }
            (_, Mark::Colon) => {
                return Err(syntax(
                    "Colon is not allowed inside an array",
                    "Arrays hold plain values, not key/value pairs",
                    207,
                    line,
                    column,
                ));
            }
            // Openers collapse before reaching a span
            (_, Mark::ArrayOpen) | (_, Mark::ObjectOpen) => unreachable!(),
        }
    }
    if expect_value && !span.is_empty() {
        return Err(syntax(
            "Trailing comma before ']'",
            "Remove the comma after the last value",
            203,
            line,
            column,
        ));
    }
    Ok(())
}

/// Objects alternate `key, colon, value, comma, ...`, or are empty.
fn check_object_span(span: &[Mark], line: usize, column: usize) -> Result<(), SigilError> {
    #[derive(PartialEq)]
    enum Want {
        Key,
        Colon,
        Value,
        CommaOrEnd,
    }

    let mut want = Want::Key;
    for mark in span {
        want = match (want, mark) {
            (Want::Key, Mark::Value(kind)) if kind.is_key_shaped() => Want::Colon,
            (Want::Key, Mark::Value(ValueKind::Variable)) => {
                return Err(syntax(
                    "Unquoted ${...} placeholder cannot be an object key",
                    "Quote it: \"${name}\"",
                    205,
                    line,
                    column,
                ));
            }
            (Want::Key, Mark::Value(_)) => {
                return Err(syntax(
                    "Object keys must be strings",
                    "Quote the key",
                    205,
                    line,
                    column,
                ));
            }
            (Want::Key, Mark::Comma) => {
                return Err(syntax(
                    "Comma without a preceding entry in object",
                    "Remove the extra comma",
                    203,
                    line,
                    column,
                ));
            }
            (Want::Colon, Mark::Colon) => Want::Value,
            (Want::Value, Mark::Value(_)) => Want::CommaOrEnd,
            (Want::CommaOrEnd, Mark::Comma) => Want::Key,
            (Want::CommaOrEnd, Mark::Value(_)) => {
                return Err(syntax(
                    "Two object entries without a separating comma",
                    "Insert a comma between entries",
                    204,
                    line,
                    column,
                ));
            }
            (_, Mark::Colon) => {
                return Err(syntax(
                    "Misplaced colon in object",
                    "Entries take the form \"key\": value",
                    207,
                    line,
                    column,
                ));
            }
            (Want::Colon, _) => {
                return Err(syntax(
                    "Missing colon after object key",
                    "Entries take the form \"key\": value",
                    206,
                    line,
                    column,
                ));
            }
            (Want::Value, Mark::Comma) => {
                return Err(syntax(
                    "Comma where an object value was expected",
                    "Entries take the form \"key\": value",
                    206,
                    line,
                    column,
                ));
            }
            (_, Mark::ArrayOpen) | (_, Mark::ObjectOpen) => unreachable!(),
        };
    }

    match want {
        Want::CommaOrEnd => Ok(()),
        Want::Key if span.is_empty() => Ok(()),
        Want::Key => Err(syntax(
            "Trailing comma before '}'",
            "Remove the comma after the last entry",
            203,
            line,
            column,
        )),
        Want::Colon => Err(syntax(
            "Object key without a value",
            "Entries take the form \"key\": value",
            206,
            line,
            column,
        )),
        Want::Value => Err(syntax(
            "Object entry is missing its value",
            "Entries take the form \"key\": value",
            206,
            line,
            column,
        )),
    }
}

fn syntax(message: &str, hint: &str, code: u32, line: usize, column: usize) -> SigilError {
    SigilError::SyntaxError {
        message: message.into(),
        line,
        column,
        hint: Some(hint.into()),
        code: Some(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(kind: ValueKind) -> Mark {
        Mark::Value(kind)
    }

    fn enclose_array(checker: &mut SyntaxChecker) -> Result<(), SigilError> {
        checker.enclose(TokenKind::RightBracket, 1, 1)
    }

    fn enclose_object(checker: &mut SyntaxChecker) -> Result<(), SigilError> {
        checker.enclose(TokenKind::RightBrace, 1, 1)
    }

    fn code_of(err: SigilError) -> Option<u32> {
        match err {
            SigilError::SyntaxError { code, .. } => code,
            _ => None,
        }
    }

    #[test]
    fn test_empty_array() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ArrayOpen);
        assert!(enclose_array(&mut checker).is_ok());
    }

    #[test]
    fn test_simple_array() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ArrayOpen);
        checker.push(value(ValueKind::Number));
        checker.push(Mark::Comma);
        checker.push(value(ValueKind::String));
        assert!(enclose_array(&mut checker).is_ok());
    }

    #[test]
    fn test_array_collapses_to_value() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ArrayOpen);
        checker.push(Mark::ArrayOpen);
        checker.push(value(ValueKind::Number));
        enclose_array(&mut checker).expect("inner array should validate");
        // Inner array now behaves as one value of the outer array
        checker.push(Mark::Comma);
        checker.push(value(ValueKind::Null));
        assert!(enclose_array(&mut checker).is_ok());
    }

    #[test]
    fn test_array_trailing_comma() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ArrayOpen);
        checker.push(value(ValueKind::Number));
        checker.push(Mark::Comma);
        assert_eq!(code_of(enclose_array(&mut checker).unwrap_err()), Some(203));
    }

    #[test]
    fn test_array_leading_comma() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ArrayOpen);
        checker.push(Mark::Comma);
        checker.push(value(ValueKind::Number));
        assert_eq!(code_of(enclose_array(&mut checker).unwrap_err()), Some(203));
    }

    #[test]
    fn test_array_missing_comma() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ArrayOpen);
        checker.push(value(ValueKind::Number));
        checker.push(value(ValueKind::Number));
        assert_eq!(code_of(enclose_array(&mut checker).unwrap_err()), Some(204));
    }

    #[test]
    fn test_array_with_colon() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ArrayOpen);
        checker.push(value(ValueKind::String));
        checker.push(Mark::Colon);
        checker.push(value(ValueKind::Number));
        assert_eq!(code_of(enclose_array(&mut checker).unwrap_err()), Some(207));
    }

    #[test]
    fn test_empty_object() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ObjectOpen);
        assert!(enclose_object(&mut checker).is_ok());
    }

    #[test]
    fn test_simple_object() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ObjectOpen);
        checker.push(value(ValueKind::String));
        checker.push(Mark::Colon);
        checker.push(value(ValueKind::Number));
        checker.push(Mark::Comma);
        checker.push(value(ValueKind::StringWithVariable));
        checker.push(Mark::Colon);
        checker.push(value(ValueKind::Variable));
        assert!(enclose_object(&mut checker).is_ok());
    }

    #[test]
    fn test_object_trailing_comma() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ObjectOpen);
        checker.push(value(ValueKind::String));
        checker.push(Mark::Colon);
        checker.push(value(ValueKind::Number));
        checker.push(Mark::Comma);
        assert_eq!(code_of(enclose_object(&mut checker).unwrap_err()), Some(203));
    }

    #[test]
    fn test_object_variable_key_rejected() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ObjectOpen);
        checker.push(value(ValueKind::Variable));
        checker.push(Mark::Colon);
        checker.push(value(ValueKind::Number));
        assert_eq!(code_of(enclose_object(&mut checker).unwrap_err()), Some(205));
    }

    #[test]
    fn test_object_number_key_rejected() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ObjectOpen);
        checker.push(value(ValueKind::Number));
        checker.push(Mark::Colon);
        checker.push(value(ValueKind::Number));
        assert_eq!(code_of(enclose_object(&mut checker).unwrap_err()), Some(205));
    }

    #[test]
    fn test_object_missing_colon() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ObjectOpen);
        checker.push(value(ValueKind::String));
        checker.push(value(ValueKind::Number));
        assert_eq!(code_of(enclose_object(&mut checker).unwrap_err()), Some(206));
    }

    #[test]
    fn test_object_key_without_value() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ObjectOpen);
        checker.push(value(ValueKind::String));
        checker.push(Mark::Colon);
        assert_eq!(code_of(enclose_object(&mut checker).unwrap_err()), Some(206));
    }

    #[test]
    fn test_unbalanced_closer() {
        let mut checker = SyntaxChecker::new();
        assert_eq!(code_of(enclose_array(&mut checker).unwrap_err()), Some(201));
    }

    #[test]
    fn test_mismatched_closer() {
        let mut checker = SyntaxChecker::new();
        checker.push(Mark::ArrayOpen);
        checker.push(value(ValueKind::Number));
        assert_eq!(code_of(enclose_object(&mut checker).unwrap_err()), Some(202));
    }
}
