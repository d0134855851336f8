//! # Editing Session
//!
//! Stateful owner of the raw prompt text, the parsed forest, and the
//! autocomplete state.
//!
//! The session is the single writer: callers never hold a mutable node, they
//! address nodes by id through the operations here. Each operation runs to
//! completion synchronously, and every derived view reflects the latest
//! committed state by the time control returns.
//!
//! Text-affecting mutations regenerate the raw text with the flat rebuild
//! serializer and re-parse it, so node ids reset. The enable/disable toggle
//! deliberately does neither; the raw text stays byte-identical.

use promptmark_parser::ast::{Node, NodeId};
use promptmark_parser::id_generator::IdGenerator;
use promptmark_parser::markup::{escape_html, render_markup};
use promptmark_parser::scanner::{open_tags_at, should_suggest};
use promptmark_parser::serializer::{copyable_text, serialize_flat};
use promptmark_parser::parse;
use serde::{Deserialize, Serialize};

use crate::mutations::{Mutation, MutationKind};

/// Caller-owned positioning metadata for the suggestion popup. The session
/// stores and returns it unchanged; it never computes pixel geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestionAnchor {
    pub top: f64,
    pub left: f64,
    pub height: f64,
}

/// Editing state for one prompt document.
#[derive(Debug, Default)]
pub struct Session {
    raw_text: String,
    forest: Vec<Node>,
    ids: IdGenerator,
    suggestions: Vec<String>,
    active_index: Option<usize>,
    anchor: SuggestionAnchor,
    revision: u64,
}

impl Session {
    /// Empty session: no text, no tree, no suggestions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session seeded with `text`, parsed immediately.
    pub fn with_text(text: &str) -> Self {
        let mut session = Self::default();
        session.raw_text = text.to_string();
        session.reparse();
        session
    }

    /// Accept an input snapshot from the caller.
    ///
    /// If `text` matches the stored raw text only the suggestions are
    /// recomputed; non-text interactions (caret moves, drags) must not
    /// churn the tree. Otherwise the text is stored, the id counter resets
    /// and the forest is re-parsed from scratch.
    pub fn set_from_input(&mut self, text: &str, caret: usize) {
        if self.raw_text != text {
            self.raw_text = text.to_string();
            self.reparse();
            self.revision += 1;
        }
        self.recompute_suggestions(caret);
    }

    /// Recompute the autocomplete candidates at `caret` (a byte offset).
    ///
    /// Runs the open-tag scan only when the caret sits right after a `</`;
    /// the scan itself backs off over those two bytes.
    pub fn recompute_suggestions(&mut self, caret: usize) {
        if !should_suggest(&self.raw_text, caret) {
            self.dismiss_suggestions();
            return;
        }
        let tags = open_tags_at(&self.raw_text, caret - 2);
        if tags.is_empty() {
            self.dismiss_suggestions();
            return;
        }
        self.suggestions = tags;
        self.active_index = Some(0);
    }

    /// Clear the suggestion list, selection and anchor.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.clear();
        self.active_index = None;
        self.anchor = SuggestionAnchor::default();
    }

    /// Move the selection by `delta`, wrapping around. No-op when empty.
    pub fn cycle_suggestion(&mut self, delta: isize) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        let current = self.active_index.unwrap_or(0) as isize;
        self.active_index = Some((current + delta).rem_euclid(len as isize) as usize);
    }

    pub fn active_suggestion(&self) -> Option<&str> {
        self.active_index
            .and_then(|index| self.suggestions.get(index))
            .map(String::as_str)
    }

    pub fn set_suggestion_anchor(&mut self, anchor: SuggestionAnchor) {
        self.anchor = anchor;
    }

    pub fn suggestion_anchor(&self) -> SuggestionAnchor {
        self.anchor
    }

    /// Apply a mutation by id. Errors (unknown id, wrong node variant) are
    /// absorbed: the state is left untouched and `None` is returned.
    ///
    /// Returns the id of a newly created node, if the mutation creates one.
    /// Note that text-affecting mutations re-parse afterwards, so a returned
    /// id refers to the pre-rebuild generation.
    pub fn apply(&mut self, mutation: Mutation) -> Option<NodeId> {
        let kind = mutation.kind();
        match mutation.apply(&mut self.forest, &mut self.ids) {
            Ok(new_id) => {
                self.revision += 1;
                if kind == MutationKind::TextAffecting {
                    self.rebuild_and_reparse();
                }
                new_id
            }
            Err(_) => None,
        }
    }

    /// Rename an element's tag; empty names fall back to "div".
    pub fn rename_tag(&mut self, id: NodeId, name: &str) {
        let _ = self.apply(Mutation::RenameTag {
            node_id: id,
            tag_name: name.to_string(),
        });
    }

    /// Toggle a node's visibility without touching the raw text.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) {
        let _ = self.apply(Mutation::SetEnabled {
            node_id: id,
            enabled,
        });
    }

    /// Replace a text node's content.
    pub fn set_text_content(&mut self, id: NodeId, content: &str) {
        let _ = self.apply(Mutation::SetTextContent {
            node_id: id,
            content: content.to_string(),
        });
    }

    /// Append a new text child to an element. Returns `None` when
    /// `parent_id` does not resolve to an element.
    pub fn append_child_text(&mut self, parent_id: NodeId, content: &str) -> Option<NodeId> {
        self.apply(Mutation::AppendChildText {
            parent_id,
            content: content.to_string(),
        })
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Read-only view of the parsed forest.
    pub fn forest(&self) -> &[Node] {
        &self.forest
    }

    /// Bumped on every committed change; the change signal for observers.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Highlighting markup for the whole document. Falls back to the escaped
    /// raw text when there is text but no tree (never happens after a parse,
    /// but the empty-forest case must still render something).
    pub fn serialized_markup(&self) -> String {
        if self.forest.is_empty() {
            if self.raw_text.is_empty() {
                String::new()
            } else {
                escape_html(&self.raw_text)
            }
        } else {
            render_markup(&self.forest)
        }
    }

    /// Export text: enabled top-level blocks, canonically rendered.
    pub fn copyable_text(&self) -> String {
        copyable_text(&self.forest)
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn active_suggestion_index(&self) -> Option<usize> {
        self.active_index
    }

    fn reparse(&mut self) {
        self.ids.reset();
        self.forest = parse(&self.raw_text, &mut self.ids);
    }

    fn rebuild_and_reparse(&mut self) {
        self.raw_text = serialize_flat(&self.forest);
        self.reparse();
    }
}
