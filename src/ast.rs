#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A string literal kept as its raw source span, quotes included.
    String(Vec<u8>),
    Number(f64),
    Boolean(bool),
    Null,
    /// A whole-value placeholder, e.g. `${host}`.
    Variable {
        raw: Vec<u8>,
        name: String,
    },
    /// A quoted string containing one or more placeholders. Each entry maps
    /// a placeholder name to its literal bytes (`${name}`) for splicing.
    StringWithVariable {
        raw: Vec<u8>,
        placeholders: Vec<(String, Vec<u8>)>,
    },
    Array(Vec<Node>),
    /// Key/value pairs in insertion order. Keys are string-like nodes only.
    Object(Vec<(Node, Node)>),
}

impl Node {
    /// True for nodes that may serve as object keys.
    pub fn is_string_like(&self) -> bool {
        matches!(self, Node::String(_) | Node::StringWithVariable { .. })
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Array(_) | Node::Object(_))
    }

    /// The content of a string-like node with the two quote bytes stripped.
    pub fn string_value(&self) -> Option<&[u8]> {
        let raw = match self {
            Node::String(raw) => raw,
            Node::StringWithVariable { raw, .. } => raw,
            _ => return None,
        };
        if raw.len() >= 2 {
            Some(&raw[1..raw.len() - 1])
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Node>> {
        if let Node::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_object(&self) -> Option<&Vec<(Node, Node)>> {
        if let Node::Object(pairs) = self {
            Some(pairs)
        } else {
            None
        }
    }

    /// Short name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::String(_) => "string",
            Node::Number(_) => "number",
            Node::Boolean(_) => "boolean",
            Node::Null => "null",
            Node::Variable { .. } => "variable",
            Node::StringWithVariable { .. } => "string with variable",
            Node::Array(_) => "array",
            Node::Object(_) => "object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_value_strips_quotes() {
        let node = Node::String(b"\"hello\"".to_vec());
        assert_eq!(node.string_value(), Some(&b"hello"[..]));
    }

    #[test]
    fn test_string_value_on_non_string() {
        assert_eq!(Node::Number(1.0).string_value(), None);
        assert_eq!(Node::Null.string_value(), None);
        assert_eq!(Node::Array(vec![]).string_value(), None);
    }

    #[test]
    fn test_string_like() {
        assert!(Node::String(b"\"k\"".to_vec()).is_string_like());
        assert!(
            Node::StringWithVariable {
                raw: b"\"${k}\"".to_vec(),
                placeholders: vec![("k".into(), b"${k}".to_vec())],
            }
            .is_string_like()
        );
        assert!(!Node::Variable { raw: b"${k}".to_vec(), name: "k".into() }.is_string_like());
        assert!(!Node::Boolean(true).is_string_like());
    }
}
