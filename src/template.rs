use std::fs;
use std::io::Read;
use std::path::Path;

use crate::SigilError;
use crate::ast::Node;
use crate::bindings::Bindings;
use crate::parser;
use crate::render;

/// A parsed template document.
///
/// Parsing happens once at construction; `render` can then be called any
/// number of times against different binding tables. Placeholders with no
/// binding survive rendering verbatim, so the output of a partial render
/// parses back into an equivalent template.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonTemplate {
    root: Node,
}

impl JsonTemplate {
    pub fn from_slice(input: &[u8]) -> Result<Self, SigilError> {
        Ok(JsonTemplate {
            root: parser::parse(input)?,
        })
    }

    pub fn from_str(input: &str) -> Result<Self, SigilError> {
        Self::from_slice(input.as_bytes())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SigilError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| SigilError::FileError {
            message: format!("Failed to read template: {}", e),
            path: path.display().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(501),
        })?;
        Self::from_slice(&bytes)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, SigilError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| SigilError::FileError {
                message: format!("Failed to read template: {}", e),
                path: "<reader>".into(),
                hint: None,
                code: Some(501),
            })?;
        Self::from_slice(&bytes)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn render(&self, bindings: &Bindings) -> Result<String, SigilError> {
        render::render(&self.root, bindings)
    }

    pub fn render_pretty(&self, bindings: &Bindings) -> Result<String, SigilError> {
        render::render_pretty(&self.root, bindings)
    }

    /// Distinct placeholder names, in order of first appearance.
    pub fn variables(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut pending = vec![&self.root];

        while let Some(node) = pending.pop() {
            match node {
                Node::Variable { name, .. } => {
                    if !names.iter().any(|n| n == name) {
                        names.push(name.clone());
                    }
                }
                Node::StringWithVariable { placeholders, .. } => {
                    for (name, _) in placeholders {
                        if !names.iter().any(|n| n == name) {
                            names.push(name.clone());
                        }
                    }
                }
                Node::Array(items) => {
                    pending.extend(items.iter().rev());
                }
                Node::Object(pairs) => {
                    for (key, value) in pairs.iter().rev() {
                        pending.push(value);
                        pending.push(key);
                    }
                }
                _ => {}
            }
        }

        names
    }

    /// True when every placeholder in the document has a binding.
    pub fn is_fully_bound(&self, bindings: &Bindings) -> bool {
        self.variables().iter().all(|name| bindings.contains(name))
    }
}
