//! # Promptmark Parser
//!
//! Document model for the prompt markup language: free text interleaved with
//! balanced `<tag>...</tag>` blocks, arbitrarily nested.
//!
//! The crate provides the full parse → tree → reserialize pipeline:
//!
//! - [`parse`] turns raw text into a forest of [`ast::Node`]s, tolerating
//!   malformed markup (it degrades to text, never errors).
//! - [`serializer`] renders a tree back to text in canonical, preserving and
//!   flat rebuild modes, plus the copyable export view.
//! - [`markup`] renders the forest as escaped inline markup for highlighting,
//!   honoring disabled-state inheritance.
//! - [`scanner`] answers "which tags are open at this cursor?" directly over
//!   raw text, for tag autocompletion.

pub mod ast;
pub mod id_generator;
pub mod markup;
pub mod parser;
pub mod scanner;
pub mod serializer;

pub use ast::{find_node, find_node_mut, Node, NodeId};
pub use id_generator::IdGenerator;
pub use parser::parse;
pub use scanner::{open_tags_at, should_suggest};
