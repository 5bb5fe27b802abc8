//! Word splitting.
//!
//! A word is a maximal run of non-whitespace characters. Only ASCII whitespace
//! separates words, so `&nbsp;` and U+00A0 stay inside a word.

use crate::dom::Node;

#[inline]
pub fn is_word_boundary(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

/// Non-empty words of `text`, in order.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_word_boundary).filter(|w| !w.is_empty())
}

pub fn count_words(text: &str) -> usize {
    words(text).count()
}

/// Words across all text nodes of a fragment. Raw-text content (script, style, ...)
/// does not count.
pub fn count_tree_words(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(t) => count_words(t),
            Node::Element(el) if el.is_raw_text() => 0,
            Node::Element(el) => count_tree_words(&el.children),
            Node::Comment(_) => 0,
        })
        .sum()
}

/// Words of every counted text node of a fragment, in document order.
pub fn tree_words(nodes: &[Node]) -> Vec<&str> {
    fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a str>) {
        for node in nodes {
            match node {
                Node::Text(t) => out.extend(words(t)),
                Node::Element(el) if !el.is_raw_text() => walk(&el.children, out),
                _ => {}
            }
        }
    }
    let mut out = Vec::new();
    walk(nodes, &mut out);
    out
}
