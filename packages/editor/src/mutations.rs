//! # Tree Mutations
//!
//! Semantic operations on the prompt tree, addressed by node id.
//!
//! Every mutation carries a static classification ([`MutationKind`]) that
//! tells the owning session what must happen afterwards:
//!
//! - **Text-affecting** (rename, content edit, append): the raw text must be
//!   rebuilt from the tree and re-parsed, resetting node ids.
//! - **View-only** (enable toggle): the tree changes in place and the raw
//!   text stays byte-identical, so toggling visibility can never disturb the
//!   user's formatting.
//!
//! Lookup is a depth-first search over the forest; a miss or a variant
//! mismatch is a typed error the session turns into a no-op.

use promptmark_parser::ast::{find_node_mut, Node, NodeId};
use promptmark_parser::id_generator::IdGenerator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations over the forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Rename an element; an empty (or all-whitespace) name falls back to "div"
    RenameTag { node_id: NodeId, tag_name: String },

    /// Toggle a node's enabled flag without touching the raw text
    SetEnabled { node_id: NodeId, enabled: bool },

    /// Replace a text node's content (atomic, not a character diff)
    SetTextContent { node_id: NodeId, content: String },

    /// Append a new enabled text child to an element
    AppendChildText { parent_id: NodeId, content: String },
}

/// What the session must do after a mutation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Rebuild raw text and re-parse; node ids reset
    TextAffecting,
    /// Tree-only change; raw text and ids untouched
    ViewOnly,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("node {0} is not a text node")]
    NotText(NodeId),
}

impl Mutation {
    /// Static rebuild-vs-toggle classification. This is a property of the
    /// mutation type, never a runtime decision.
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::SetEnabled { .. } => MutationKind::ViewOnly,
            Mutation::RenameTag { .. }
            | Mutation::SetTextContent { .. }
            | Mutation::AppendChildText { .. } => MutationKind::TextAffecting,
        }
    }

    /// Apply to the forest. Returns the id of a newly created node, if any.
    pub fn apply(
        &self,
        nodes: &mut [Node],
        ids: &mut IdGenerator,
    ) -> Result<Option<NodeId>, MutationError> {
        match self {
            Mutation::RenameTag { node_id, tag_name } => {
                match find_node_mut(nodes, *node_id) {
                    Some(Node::Element { tag_name: name, .. }) => {
                        let trimmed = tag_name.trim();
                        *name = if trimmed.is_empty() {
                            "div".to_string()
                        } else {
                            trimmed.to_string()
                        };
                        Ok(None)
                    }
                    Some(_) => Err(MutationError::NotAnElement(*node_id)),
                    None => Err(MutationError::NodeNotFound(*node_id)),
                }
            }

            Mutation::SetEnabled { node_id, enabled } => {
                match find_node_mut(nodes, *node_id) {
                    Some(node) => {
                        node.set_enabled(*enabled);
                        Ok(None)
                    }
                    None => Err(MutationError::NodeNotFound(*node_id)),
                }
            }

            Mutation::SetTextContent { node_id, content } => {
                match find_node_mut(nodes, *node_id) {
                    Some(Node::Text { content: slot, .. }) => {
                        *slot = content.clone();
                        Ok(None)
                    }
                    Some(_) => Err(MutationError::NotText(*node_id)),
                    None => Err(MutationError::NodeNotFound(*node_id)),
                }
            }

            Mutation::AppendChildText { parent_id, content } => {
                match find_node_mut(nodes, *parent_id) {
                    Some(Node::Element { children, .. }) => {
                        let id = ids.new_id();
                        children.push(Node::text(id, content.clone()));
                        Ok(Some(id))
                    }
                    Some(_) => Err(MutationError::NotAnElement(*parent_id)),
                    None => Err(MutationError::NodeNotFound(*parent_id)),
                }
            }
        }
    }
}
