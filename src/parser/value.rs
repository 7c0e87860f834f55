use super::*;
use crate::placeholder;
use crate::syntax::ValueKind;

pub(super) fn read_string(parser: &mut Parser) -> Result<(), SigilError> {
    let raw = parser.lexer.read_string()?;
    let found = placeholder::scan(&raw);

    if found.is_empty() {
        return record(parser, ValueKind::String, Node::String(raw));
    }

    // Keep one entry per distinct name, first appearance first
    let mut placeholders: Vec<(String, Vec<u8>)> = Vec::new();
    for ph in &found {
        if !placeholders.iter().any(|(name, _)| name == &ph.name) {
            placeholders.push((ph.name.clone(), ph.literal()));
        }
    }
    record(
        parser,
        ValueKind::StringWithVariable,
        Node::StringWithVariable { raw, placeholders },
    )
}

pub(super) fn read_number(parser: &mut Parser) -> Result<(), SigilError> {
    let number = parser.lexer.read_number()?;
    record(parser, ValueKind::Number, Node::Number(number))
}

pub(super) fn read_boolean(parser: &mut Parser) -> Result<(), SigilError> {
    let flag = parser.lexer.read_boolean()?;
    record(parser, ValueKind::Boolean, Node::Boolean(flag))
}

pub(super) fn read_null(parser: &mut Parser) -> Result<(), SigilError> {
    parser.lexer.read_null()?;
    record(parser, ValueKind::Null, Node::Null)
}

pub(super) fn read_variable(parser: &mut Parser) -> Result<(), SigilError> {
    let (raw, name) = parser.lexer.read_variable()?;
    record(parser, ValueKind::Variable, Node::Variable { raw, name })
}

/// Record one finished value into the checker and the builder, then
/// re-derive the parser state. Key-shape violations are rejected here so
/// they surface as syntax errors, before the builder's protocol guard.
fn record(parser: &mut Parser, kind: ValueKind, node: Node) -> Result<(), SigilError> {
    if parser.in_key_position() {
        if !node.is_string_like() {
            return Err(parser.syntax_error(
                &format!("Object key must be a string, got {}", node.kind_name()),
                205,
            ));
        }
        if node.string_value().is_none_or(<[u8]>::is_empty) {
            return Err(parser.syntax_error("Object key must not be empty", 205));
        }
    }

    parser.checker.push(Mark::Value(kind));
    parser.builder.push_value(node)?;
    parser.derive_state();
    Ok(())
}
