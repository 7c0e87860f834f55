use crate::SigilError;
use crate::ast::Node;

/// An in-progress composite on the builder's open stack.
///
/// A pair holds only its key: a primitive value finalizes the pair at once,
/// and a container value lives on the stack above it until enclosed.
#[derive(Debug)]
enum OpenNode {
    Array(Vec<Node>),
    Object(Vec<(Node, Node)>),
    Pair { key: Node },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Array,
    Object,
    Pair,
}

/// Stack machine assembling the document tree as tokens arrive.
///
/// The open stack doubles as the parser's return address: the state after
/// any value or enclose is derived from the top entry, so no second stack
/// is needed. All failure modes here are protocol errors; the syntax
/// checker rejects these inputs first on well-behaved callers.
#[derive(Debug, Default)]
pub struct AstBuilder {
    root: Option<Node>,
    open: Vec<OpenNode>,
    completed: bool,
}

impl AstBuilder {
    pub fn new() -> Self {
        AstBuilder {
            root: None,
            open: Vec::new(),
            completed: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn has_open_elements(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn top_container_kind(&self) -> Option<ContainerKind> {
        self.open.last().map(|open| match open {
            OpenNode::Array(_) => ContainerKind::Array,
            OpenNode::Object(_) => ContainerKind::Object,
            OpenNode::Pair { .. } => ContainerKind::Pair,
        })
    }

    /// Record a finished primitive node.
    pub fn push_value(&mut self, node: Node) -> Result<(), SigilError> {
        if self.completed {
            return Err(protocol("value created after the document completed"));
        }
        match self.open.last_mut() {
            None => {
                // A primitive root completes the document immediately
                self.root = Some(node);
                self.completed = true;
                Ok(())
            }
            Some(OpenNode::Array(items)) => {
                items.push(node);
                Ok(())
            }
            Some(OpenNode::Object(_)) => {
                if !node.is_string_like() {
                    return Err(protocol(&format!(
                        "object key must be a string, got {}",
                        node.kind_name()
                    )));
                }
                match node.string_value() {
                    Some(key) if !key.is_empty() => {}
                    _ => return Err(protocol("object key must be a non-empty string")),
                }
                self.open.push(OpenNode::Pair { key: node });
                Ok(())
            }
            Some(OpenNode::Pair { .. }) => self.finish_pair(node),
        }
    }

    pub fn open_array(&mut self) -> Result<(), SigilError> {
        self.open_container(OpenNode::Array(Vec::new()))
    }

    pub fn open_object(&mut self) -> Result<(), SigilError> {
        self.open_container(OpenNode::Object(Vec::new()))
    }

    fn open_container(&mut self, open: OpenNode) -> Result<(), SigilError> {
        if self.completed {
            return Err(protocol("container opened after the document completed"));
        }
        self.open.push(open);
        Ok(())
    }

    /// Close the container on top of the open stack and attach it to its
    /// owner (or make it the root).
    pub fn enclose(&mut self) -> Result<(), SigilError> {
        if self.completed {
            return Err(protocol("enclose called after the document completed"));
        }
        let closed = match self.open.pop() {
            None => return Err(protocol("enclose called with nothing open")),
            Some(OpenNode::Array(items)) => Node::Array(items),
            Some(OpenNode::Object(pairs)) => Node::Object(pairs),
            Some(OpenNode::Pair { .. }) => {
                return Err(protocol("key/value pair closed without a value"));
            }
        };

        match self.open.last_mut() {
            None => {
                self.root = Some(closed);
                self.completed = true;
                Ok(())
            }
            Some(OpenNode::Array(items)) => {
                items.push(closed);
                Ok(())
            }
            Some(OpenNode::Pair { .. }) => self.finish_pair(closed),
            Some(OpenNode::Object(_)) => Err(protocol(
                "container closed directly inside an object; a key is required",
            )),
        }
    }

    /// Pop the pair on top of the stack, set `value`, and append it to the
    /// object that must sit beneath.
    fn finish_pair(&mut self, value: Node) -> Result<(), SigilError> {
        let key = match self.open.pop() {
            Some(OpenNode::Pair { key }) => key,
            _ => return Err(protocol("finish_pair called without an open pair")),
        };
        match self.open.last_mut() {
            Some(OpenNode::Object(pairs)) => {
                pairs.push((key, value));
                Ok(())
            }
            _ => Err(protocol("key/value pair is not owned by an object")),
        }
    }

    /// Hand over the finished tree.
    pub fn take_root(&mut self) -> Result<Node, SigilError> {
        if !self.completed {
            return Err(protocol("document tree requested before completion"));
        }
        self.root
            .take()
            .ok_or_else(|| protocol("document tree already taken"))
    }
}

fn protocol(message: &str) -> SigilError {
    SigilError::ProtocolError {
        message: message.into(),
        hint: None,
        code: Some(302),
    }
}
