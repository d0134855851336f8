use crate::ast::Node;
use crate::serializer::effective_tag;

/// Inline-markup rendering of the forest for syntax highlighting.
///
/// Tag tokens are escaped and wrapped in `tag-highlight` spans; text content
/// is wrapped in a plain span. A node disabled anywhere up its ancestor chain
/// renders with the `raw-text-disabled` class, descendants included.
/// Whitespace-only text is emitted unwrapped so the original layout survives
/// the markup pass byte for byte.
pub fn render_markup(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| render_node(node, false))
        .collect()
}

/// Escape the characters that would be interpreted as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn tag_span(token: &str, disabled: bool) -> String {
    let class = if disabled {
        "tag-highlight raw-text-disabled"
    } else {
        "tag-highlight"
    };
    format!(r#"<span class="{class}">{}</span>"#, escape_html(token))
}

fn text_span(content: &str, disabled: bool) -> String {
    if disabled {
        format!(
            r#"<span class="raw-text-disabled">{}</span>"#,
            escape_html(content)
        )
    } else {
        format!("<span>{}</span>", escape_html(content))
    }
}

fn render_node(node: &Node, parent_disabled: bool) -> String {
    let disabled = parent_disabled || !node.enabled();

    match node {
        Node::Text { content, .. } => {
            if content.is_empty() {
                return String::new();
            }
            if content.trim().is_empty() {
                // Pure whitespace stays unwrapped so indentation and
                // newlines pass through untouched.
                return escape_html(content);
            }
            text_span(content, disabled)
        }
        Node::Element {
            tag_name, children, ..
        } => {
            let tag = effective_tag(tag_name);

            if children.is_empty() {
                return tag_span(&format!("<{tag}></{tag}>"), disabled);
            }

            let open = tag_span(&format!("<{tag}>"), disabled);
            let close = tag_span(&format!("</{tag}>"), disabled);

            if let [Node::Text {
                content, enabled, ..
            }] = children.as_slice()
            {
                if !content.contains('\n') {
                    let text_disabled = disabled || !enabled;
                    return format!(
                        "{open}{}{close}",
                        text_span(content.trim(), text_disabled)
                    );
                }
            }

            let body: String = children
                .iter()
                .map(|child| render_node(child, disabled))
                .collect();
            format!("{open}{body}{close}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::find_node_mut;
    use crate::id_generator::IdGenerator;
    use crate::parser::parse;

    fn parse_str(source: &str) -> Vec<Node> {
        let mut ids = IdGenerator::new();
        parse(source, &mut ids)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_single_line_element_markup() {
        let forest = parse_str("<x>hi</x>");
        assert_eq!(
            render_markup(&forest),
            "<span class=\"tag-highlight\">&lt;x&gt;</span>\
             <span>hi</span>\
             <span class=\"tag-highlight\">&lt;/x&gt;</span>"
        );
    }

    #[test]
    fn test_whitespace_only_text_unwrapped() {
        let forest = parse_str("<a>\n  <b>hi</b>\n</a>");
        let markup = render_markup(&forest);
        // The pure-whitespace runs around <b> stay outside any span.
        assert!(markup.contains(">\n  <span class=\"tag-highlight\">&lt;b&gt;</span>"));
        assert!(markup.ends_with("</span>"));
    }

    #[test]
    fn test_disabled_propagates_to_descendants() {
        let mut forest = parse_str("<a><b>hi</b></a>");
        let root_id = forest[0].id();
        find_node_mut(&mut forest, root_id).unwrap().set_enabled(false);

        let markup = render_markup(&forest);
        // Every span in the subtree carries the disabled class, even though
        // the inner nodes are individually enabled.
        for span in markup.split("<span").skip(1) {
            assert!(
                span.starts_with(" class=\"tag-highlight raw-text-disabled\"")
                    || span.starts_with(" class=\"raw-text-disabled\""),
                "span not marked disabled: {span}"
            );
        }
    }

    #[test]
    fn test_empty_element_markup() {
        let forest = parse_str("<x></x>");
        assert_eq!(
            render_markup(&forest),
            "<span class=\"tag-highlight\">&lt;x&gt;&lt;/x&gt;</span>"
        );
    }

    #[test]
    fn test_disabled_text_node_marked() {
        let mut forest = parse_str("plain");
        forest[0].set_enabled(false);
        assert_eq!(
            render_markup(&forest),
            "<span class=\"raw-text-disabled\">plain</span>"
        );
    }
}
