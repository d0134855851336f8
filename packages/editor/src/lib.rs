//! # Promptmark Editor
//!
//! Editing engine for tag-structured prompts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: raw text → forest                   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Session owns text + tree + caret    │
//! │  - Mutations by node id, with validation    │
//! │  - Rebuild-vs-toggle policy per mutation    │
//! │  - Autocomplete state over the raw text     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ serializer: forest → text / markup views    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The raw text is source of truth**: the forest is re-derived from it
//!    after every text-affecting mutation.
//! 2. **Single writer**: all mutation goes through the [`Session`] by node
//!    id; callers never hold a mutable node.
//! 3. **Toggles never rewrite**: disabling a node is a view attribute, so the
//!    user's original formatting survives every visibility click.
//! 4. **No failures**: bad ids and malformed markup degrade to no-ops and
//!    plain text, never to errors at the call site.
//!
//! ## Usage
//!
//! ```rust
//! use promptmark_editor::Session;
//!
//! let mut session = Session::with_text("<x>hi</x>");
//!
//! let element_id = session.forest()[0].id();
//! session.append_child_text(element_id, "bye");
//!
//! assert_eq!(session.raw_text(), "<x>\nhi\nbye\n</x>");
//! ```

mod mutations;
mod session;

pub use mutations::{Mutation, MutationError, MutationKind};
pub use session::{Session, SuggestionAnchor};

// Re-export the tree types for convenience
pub use promptmark_parser::ast::{Node, NodeId};
