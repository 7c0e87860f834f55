use serde_json::Value as JsonValue;

use crate::SigilError;
use crate::ast::Node;
use crate::bindings::Bindings;

const INDENT: &[u8] = b"    ";

/// Render the tree to compact JSON text, substituting bound placeholders.
pub fn render(root: &Node, bindings: &Bindings) -> Result<String, SigilError> {
    finish(Renderer::new(bindings, false).run(root)?)
}

/// Render the tree with 4-space indentation and a newline after each
/// structural separator.
pub fn render_pretty(root: &Node, bindings: &Bindings) -> Result<String, SigilError> {
    finish(Renderer::new(bindings, true).run(root)?)
}

fn finish(bytes: Vec<u8>) -> Result<String, SigilError> {
    String::from_utf8(bytes).map_err(|_| SigilError::RenderError {
        message: "Rendered output is not valid UTF-8".into(),
        hint: Some("The template source contained non-UTF-8 bytes".into()),
        code: Some(403),
    })
}

/// Work items for the explicit traversal stack. Containers push their
/// closing marker and children in reverse so popping emits left to right;
/// a key/value pair pushes the value first so the key pops first.
enum Task<'a> {
    Node(&'a Node),
    KeyColon(&'a Node),
    Comma,
    Close(u8),
}

struct Renderer<'a> {
    bindings: &'a Bindings,
    pretty: bool,
    out: Vec<u8>,
    depth: usize,
}

impl<'a> Renderer<'a> {
    fn new(bindings: &'a Bindings, pretty: bool) -> Self {
        Renderer {
            bindings,
            pretty,
            out: Vec::new(),
            depth: 0,
        }
    }

    fn run(mut self, root: &'a Node) -> Result<Vec<u8>, SigilError> {
        let mut tasks = vec![Task::Node(root)];

        while let Some(task) = tasks.pop() {
            match task {
                Task::Node(node) => self.visit(node, &mut tasks)?,
                Task::KeyColon(key) => {
                    self.emit_primitive(key)?;
                    self.out.push(b':');
                    if self.pretty {
                        self.out.push(b' ');
                    }
                }
                Task::Comma => {
                    self.out.push(b',');
                    if self.pretty {
                        self.newline_indent();
                    }
                }
                Task::Close(byte) => {
                    if self.depth == 0 {
                        return Err(SigilError::RenderError {
                            message: "Traversal stack underflow at a closing marker".into(),
                            hint: Some("The document tree is malformed".into()),
                            code: Some(402),
                        });
                    }
                    self.depth -= 1;
                    if self.pretty {
                        self.newline_indent();
                    }
                    self.out.push(byte);
                }
            }
        }

        Ok(self.out)
    }

    fn visit(&mut self, node: &'a Node, tasks: &mut Vec<Task<'a>>) -> Result<(), SigilError> {
        match node {
            Node::Array(items) => {
                self.out.push(b'[');
                if items.is_empty() {
                    self.out.push(b']');
                    return Ok(());
                }
                self.depth += 1;
                if self.pretty {
                    self.newline_indent();
                }
                tasks.push(Task::Close(b']'));
                for (i, item) in items.iter().enumerate().rev() {
                    tasks.push(Task::Node(item));
                    if i > 0 {
                        tasks.push(Task::Comma);
                    }
                }
                Ok(())
            }
            Node::Object(pairs) => {
                self.out.push(b'{');
                if pairs.is_empty() {
                    self.out.push(b'}');
                    return Ok(());
                }
                self.depth += 1;
                if self.pretty {
                    self.newline_indent();
                }
                tasks.push(Task::Close(b'}'));
                for (i, (key, value)) in pairs.iter().enumerate().rev() {
                    tasks.push(Task::Node(value));
                    tasks.push(Task::KeyColon(key));
                    if i > 0 {
                        tasks.push(Task::Comma);
                    }
                }
                Ok(())
            }
            _ => self.emit_primitive(node),
        }
    }

    fn emit_primitive(&mut self, node: &Node) -> Result<(), SigilError> {
        match node {
            Node::String(raw) => {
                self.out.extend_from_slice(raw);
                Ok(())
            }
            Node::Number(n) => {
                // f64 Display is the shortest decimal that round-trips
                self.out.extend(format!("{}", n).into_bytes());
                Ok(())
            }
            Node::Boolean(true) => {
                self.out.extend_from_slice(b"true");
                Ok(())
            }
            Node::Boolean(false) => {
                self.out.extend_from_slice(b"false");
                Ok(())
            }
            Node::Null => {
                self.out.extend_from_slice(b"null");
                Ok(())
            }
            Node::Variable { raw, name } => match self.bindings.get(name) {
                // Unresolved placeholders pass through for a later pass
                None => {
                    self.out.extend_from_slice(raw);
                    Ok(())
                }
                Some(value) => {
                    let encoded = encode(value)?;
                    self.out.extend(encoded.into_bytes());
                    Ok(())
                }
            },
            Node::StringWithVariable { raw, placeholders } => {
                let mut buf = raw.clone();
                for (name, literal) in placeholders {
                    if let Some(value) = self.bindings.get(name) {
                        let encoded = encode(value)?;
                        // Splicing inside an already-quoted string: drop
                        // the encoder's own quotes
                        let splice = strip_quotes(&encoded);
                        buf = replace_all(&buf, literal, splice.as_bytes());
                    }
                }
                self.out.extend(buf);
                Ok(())
            }
            Node::Array(_) | Node::Object(_) => Err(SigilError::RenderError {
                message: "Container node in primitive position".into(),
                hint: Some("The document tree is malformed".into()),
                code: Some(402),
            }),
        }
    }

    fn newline_indent(&mut self) {
        self.out.push(b'\n');
        for _ in 0..self.depth {
            self.out.extend_from_slice(INDENT);
        }
    }
}

/// Marshal one bound value to JSON text.
fn encode(value: &JsonValue) -> Result<String, SigilError> {
    serde_json::to_string(value).map_err(|e| SigilError::RenderError {
        message: format!("Failed to encode binding value: {}", e),
        hint: None,
        code: Some(401),
    })
}

fn strip_quotes(encoded: &str) -> &str {
    let bytes = encoded.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
        &encoded[1..encoded.len() - 1]
    } else {
        encoded
    }
}

fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(replacement);
            i += needle.len();
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests;
