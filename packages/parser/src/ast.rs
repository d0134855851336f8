use serde::{Deserialize, Serialize};

/// Node identifier, unique within a single parse generation.
///
/// Ids are handed out by [`crate::id_generator::IdGenerator`] in creation
/// order and are reassigned on every full re-parse.
pub type NodeId = u32;

/// A node in the prompt tree: literal text or a tagged element.
///
/// Text nodes hold the exact substring they were parsed from, whitespace and
/// newlines included. Element children are ordered and match document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// Literal document text
    #[serde(rename = "text")]
    Text {
        id: NodeId,
        enabled: bool,
        content: String,
    },

    /// Tagged container (`<name>...</name>`)
    #[serde(rename = "element")]
    Element {
        id: NodeId,
        enabled: bool,
        #[serde(rename = "tagName")]
        tag_name: String,
        children: Vec<Node>,
    },
}

impl Node {
    /// Create an enabled text node.
    pub fn text(id: NodeId, content: impl Into<String>) -> Self {
        Node::Text {
            id,
            enabled: true,
            content: content.into(),
        }
    }

    /// Create an enabled element node.
    pub fn element(id: NodeId, tag_name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element {
            id,
            enabled: true,
            tag_name: tag_name.into(),
            children,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Node::Text { id, .. } | Node::Element { id, .. } => *id,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            Node::Text { enabled, .. } | Node::Element { enabled, .. } => *enabled,
        }
    }

    pub fn set_enabled(&mut self, value: bool) {
        match self {
            Node::Text { enabled, .. } | Node::Element { enabled, .. } => *enabled = value,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }
}

/// Find a node by id, depth-first over the forest.
pub fn find_node(nodes: &[Node], id: NodeId) -> Option<&Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Node::Element { children, .. } = node {
            if let Some(found) = find_node(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Mutable counterpart of [`find_node`].
pub fn find_node_mut(nodes: &mut [Node], id: NodeId) -> Option<&mut Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Node::Element { children, .. } = node {
            if let Some(found) = find_node_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}
