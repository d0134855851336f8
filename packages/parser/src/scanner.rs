use logos::Logos;

/// Tag tokens recognized while scanning for open tags.
///
/// The token runs from `<` (optionally `</`) through the first `>`; anything
/// after the name is tolerated junk. Bytes that are not part of a tag token
/// are skipped as plain text.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum TagToken {
    #[regex(r"</?[^<>\s/][^>]*>")]
    Tag,
}

/// Names of the tags still open at `cursor`, innermost first.
///
/// This is a forgiving scan, not a balanced parse: a close token pops the
/// stack only when it matches the innermost open tag, and mismatched closes
/// are ignored so a half-typed document still yields a useful stack.
/// Self-closing tokens (`.../>`) are skipped entirely.
pub fn open_tags_at(text: &str, cursor: usize) -> Vec<String> {
    let content = prefix_at(text, cursor);
    let mut stack: Vec<&str> = Vec::new();
    let mut lexer = TagToken::lexer(content);

    while let Some(token) = lexer.next() {
        if token.is_err() {
            continue;
        }
        let slice = lexer.slice();
        let name = match tag_name(slice) {
            Some(name) => name,
            None => continue,
        };
        if slice.starts_with("</") {
            if stack.last() == Some(&name) {
                stack.pop();
            }
        } else if !slice.ends_with("/>") {
            stack.push(name);
        }
    }

    stack.reverse();
    stack.into_iter().map(str::to_owned).collect()
}

/// True exactly when the two bytes before `cursor` are `</`, the only point
/// where computing suggestions is worthwhile.
pub fn should_suggest(text: &str, cursor: usize) -> bool {
    cursor >= 2 && cursor <= text.len() && &text.as_bytes()[cursor - 2..cursor] == b"</"
}

/// Extract the tag name from a lexed token.
fn tag_name(token: &str) -> Option<&str> {
    let rest = token.strip_prefix('<')?;
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '<' || c == '>' || c == '/')
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

/// Clamp `cursor` down to a char boundary and take the prefix before it.
fn prefix_at(text: &str, cursor: usize) -> &str {
    let mut end = cursor.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
