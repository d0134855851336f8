use crate::ast::Node;
use crate::id_generator::IdGenerator;

/// Parse prompt markup into a forest of nodes.
///
/// The language is free text interleaved with balanced `<tag>...</tag>`
/// blocks, arbitrarily nested. Parsing is total: only a complete open/close
/// pair with the same name becomes an element. Everything else (unmatched
/// opens, stray closes, self-closing tokens) passes through as literal text.
///
/// Text nodes keep their substring verbatim, indentation and newlines
/// included. Ids come from `ids` in creation order: preceding text first, then
/// the children of a match, then the element itself.
pub fn parse(source: &str, ids: &mut IdGenerator) -> Vec<Node> {
    walk(source, ids)
}

fn walk(text: &str, ids: &mut IdGenerator) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut last = 0;
    let mut search = 0;

    while let Some(pair) = find_tag_pair(text, search) {
        if pair.open_start > last {
            nodes.push(Node::text(ids.new_id(), &text[last..pair.open_start]));
        }
        let children = walk(&text[pair.body_start..pair.body_end], ids);
        nodes.push(Node::element(ids.new_id(), pair.name, children));
        last = pair.end;
        search = pair.end;
    }

    if last < text.len() {
        nodes.push(Node::text(ids.new_id(), &text[last..]));
    }

    nodes
}

/// A complete `<name ...>body</name>` match.
struct TagPair<'a> {
    name: &'a str,
    open_start: usize,
    body_start: usize,
    body_end: usize,
    end: usize,
}

/// Tag names exclude angle brackets, whitespace and `/`.
fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && c != '<' && c != '>' && c != '/'
}

/// Find the first complete same-name pair at or after `from`.
///
/// An open candidate is `<` + a maximal run of name characters + anything up
/// to and including the first `>` (junk after the name is tolerated, so
/// `<a foo>` opens `a`). The body runs to the first exact `</name>` after the
/// open token: the shortest match, so same-name nesting closes early.
fn find_tag_pair(text: &str, from: usize) -> Option<TagPair<'_>> {
    let mut at = from;
    while let Some(rel) = text[at..].find('<') {
        let open_start = at + rel;
        let name_start = open_start + 1;
        let name_len = text[name_start..]
            .find(|c: char| !is_name_char(c))
            .unwrap_or(text.len() - name_start);
        if name_len == 0 {
            at = name_start;
            continue;
        }
        let name_end = name_start + name_len;

        // No '>' after the name means no pair can complete anywhere to the
        // right, since any later candidate starts past this point.
        let gt = name_end + text[name_end..].find('>')?;
        let body_start = gt + 1;

        let name = &text[name_start..name_end];
        let close = format!("</{name}>");
        match text[body_start..].find(&close) {
            Some(rel_close) => {
                let body_end = body_start + rel_close;
                return Some(TagPair {
                    name,
                    open_start,
                    body_start,
                    body_end,
                    end: body_end + close.len(),
                });
            }
            None => {
                // Unclosed candidate. A '<' swallowed into its junk may still
                // open a real element, so resume right after this '<'.
                at = name_start;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;

    fn parse_str(source: &str) -> Vec<Node> {
        let mut ids = IdGenerator::new();
        parse(source, &mut ids)
    }

    fn text_content(node: &Node) -> &str {
        match node {
            Node::Text { content, .. } => content,
            _ => panic!("expected text node, got {node:?}"),
        }
    }

    fn element_parts(node: &Node) -> (&str, &[Node]) {
        match node {
            Node::Element {
                tag_name, children, ..
            } => (tag_name.as_str(), children.as_slice()),
            _ => panic!("expected element node, got {node:?}"),
        }
    }

    #[test]
    fn test_empty_input_yields_empty_forest() {
        assert!(parse_str("").is_empty());
    }

    #[test]
    fn test_plain_text_is_one_node() {
        let forest = parse_str("just some text\nwith lines");
        assert_eq!(forest.len(), 1);
        assert_eq!(text_content(&forest[0]), "just some text\nwith lines");
    }

    #[test]
    fn test_single_element() {
        let forest = parse_str("<x>hi</x>");
        assert_eq!(forest.len(), 1);

        let (tag, children) = element_parts(&forest[0]);
        assert_eq!(tag, "x");
        assert_eq!(children.len(), 1);
        assert_eq!(text_content(&children[0]), "hi");
    }

    #[test]
    fn test_surrounding_text_preserved_verbatim() {
        let forest = parse_str("  lead\n<x>hi</x>\ntrail  ");
        assert_eq!(forest.len(), 3);
        assert_eq!(text_content(&forest[0]), "  lead\n");
        assert_eq!(text_content(&forest[2]), "\ntrail  ");
    }

    #[test]
    fn test_nested_elements() {
        let forest = parse_str("<a> pre <b>in</b> post </a>");
        let (tag, children) = element_parts(&forest[0]);
        assert_eq!(tag, "a");
        assert_eq!(children.len(), 3);
        assert_eq!(text_content(&children[0]), " pre ");

        let (inner_tag, inner_children) = element_parts(&children[1]);
        assert_eq!(inner_tag, "b");
        assert_eq!(text_content(&inner_children[0]), "in");
        assert_eq!(text_content(&children[2]), " post ");
    }

    #[test]
    fn test_unmatched_open_degrades_to_text() {
        let forest = parse_str("<foo> no close here");
        assert_eq!(forest.len(), 1);
        assert_eq!(text_content(&forest[0]), "<foo> no close here");
    }

    #[test]
    fn test_stray_close_degrades_to_text() {
        let forest = parse_str("</foo> opener missing");
        assert_eq!(forest.len(), 1);
        assert!(forest[0].is_text());
    }

    #[test]
    fn test_unmatched_before_matched_pair() {
        let forest = parse_str("<a> text <b>x</b>");
        assert_eq!(forest.len(), 2);
        assert_eq!(text_content(&forest[0]), "<a> text ");

        let (tag, children) = element_parts(&forest[1]);
        assert_eq!(tag, "b");
        assert_eq!(text_content(&children[0]), "x");
    }

    #[test]
    fn test_candidate_rescan_inside_junk() {
        // The '<b' is swallowed into the failed '<a ...>' candidate's junk but
        // still opens an element once the candidate is abandoned.
        let forest = parse_str("<a <b>x</b>");
        assert_eq!(forest.len(), 2);
        assert_eq!(text_content(&forest[0]), "<a ");

        let (tag, _) = element_parts(&forest[1]);
        assert_eq!(tag, "b");
    }

    #[test]
    fn test_same_name_nesting_closes_early() {
        // Shortest match: the inner "</a>" closes the outer "<a>".
        let forest = parse_str("<a><a>x</a></a>");
        assert_eq!(forest.len(), 2);

        let (tag, children) = element_parts(&forest[0]);
        assert_eq!(tag, "a");
        assert_eq!(text_content(&children[0]), "<a>x");
        assert_eq!(text_content(&forest[1]), "</a>");
    }

    #[test]
    fn test_junk_after_name_is_discarded() {
        let forest = parse_str("<a class=note>x</a>");
        let (tag, children) = element_parts(&forest[0]);
        assert_eq!(tag, "a");
        assert_eq!(text_content(&children[0]), "x");
    }

    #[test]
    fn test_self_closing_token_is_text() {
        let forest = parse_str("line one<br/>line two");
        assert_eq!(forest.len(), 1);
        assert_eq!(text_content(&forest[0]), "line one<br/>line two");
    }

    #[test]
    fn test_sibling_elements() {
        let forest = parse_str("<a>x</a><b>y</b>");
        assert_eq!(forest.len(), 2);
        assert_eq!(element_parts(&forest[0]).0, "a");
        assert_eq!(element_parts(&forest[1]).0, "b");
    }

    #[test]
    fn test_ids_unique_children_before_parent() {
        let forest = parse_str("pre<x>hi</x>");
        // Creation order: preceding text, then the body, then the element.
        assert_eq!(forest[0].id(), 0);
        let (_, children) = element_parts(&forest[1]);
        assert_eq!(children[0].id(), 1);
        assert_eq!(forest[1].id(), 2);
    }
}
