// src/parser.rs
//
// Strict HTML fragment parser.
//
// - Input must be well formed: every non-void element is closed by a matching end tag
//   (names compared ASCII case-insensitively). There is no error recovery and no
//   implied end tags.
// - Void elements (br, img, ...) and `<x/>` close themselves.
// - RAW-TEXT elements (script, style, textarea, title, xmp) keep their content verbatim
//   as a single text child.
// - A '<' that cannot start a tag ("a < b", "<3") is plain text.
// - Text and attribute values are stored as spelled; entities are not decoded.
// - At most MAX_DEPTH elements may be open at once. Every later tree walk (word count,
//   pruning, serialization, drop) recurses once per level, so deeper input is rejected
//   here instead of overflowing the stack there.

use memchr::memchr;

use crate::dom::{Attribute, Element, Node};
use crate::error::{ParseError, ParseErrorKind};
use crate::scan::{self, find_comment_end, find_raw_text_end, find_tag_end, parse_tag_info};

/// Deepest element nesting accepted by [`parse_fragment`].
pub const MAX_DEPTH: usize = 512;

/// Parse an HTML fragment into an ordered forest of nodes.
pub fn parse_fragment(markup: &str) -> Result<Vec<Node>, ParseError> {
    let src = markup.as_bytes();
    let n = src.len();
    let mut tree = TreeBuilder::default();
    let mut i = 0usize;

    while i < n {
        // Comments
        if src[i..].starts_with(b"<!--") {
            let end = find_comment_end(src, i)
                .ok_or_else(|| ParseError::new(ParseErrorKind::UnterminatedComment, i))?;
            tree.append(Node::Comment(markup[i + 4..end].to_owned()));
            i = end + 3;
            continue;
        }

        if src[i] == b'<' && i + 1 < n {
            let next = src[i + 1];

            if next == b'!' || next == b'?' {
                return Err(ParseError::new(ParseErrorKind::UnsupportedDeclaration, i));
            }

            if next == b'/' || next.is_ascii_alphabetic() {
                let j = find_tag_end(src, i)
                    .ok_or_else(|| ParseError::new(ParseErrorKind::UnterminatedTag, i))?;
                let tag = &src[i..=j];
                let ti = parse_tag_info(tag);
                let name_start = i + if ti.is_end { 2 } else { 1 };
                let name = &markup[name_start..name_start + ti.name.len()];

                if ti.is_end {
                    if name.is_empty() {
                        return Err(ParseError::new(ParseErrorKind::MissingTagName, i));
                    }
                    if scan::is_void(ti.name) {
                        return Err(ParseError::new(
                            ParseErrorKind::VoidEndTag { name: name.to_owned() },
                            i,
                        ));
                    }
                    tree.close(name, i)?;
                    i = j + 1;
                    continue;
                }

                let element = Element {
                    name: name.to_owned(),
                    attrs: attributes(&markup[i..=j]),
                    children: Vec::new(),
                    self_closing: ti.self_closing,
                };

                if ti.self_closing || scan::is_void(ti.name) {
                    tree.append(Node::Element(element));
                    i = j + 1;
                    continue;
                }

                // raw-text content runs to the matching end tag
                if scan::is_raw_text(ti.name) {
                    let (end_start, end_gt) = find_raw_text_end(src, j + 1, ti.name).ok_or_else(|| {
                        ParseError::new(ParseErrorKind::UnclosedElement { name: name.to_owned() }, i)
                    })?;
                    let mut element = element;
                    if end_start > j + 1 {
                        element.children.push(Node::text(&markup[j + 1..end_start]));
                    }
                    tree.append(Node::Element(element));
                    i = end_gt + 1;
                    continue;
                }

                tree.open(element, i)?;
                i = j + 1;
                continue;
            }
        }

        // Text run; a '<' at `i` that reached here is literal
        let from = if src[i] == b'<' { i + 1 } else { i };
        let next_lt = memchr(b'<', &src[from..]).map(|off| from + off).unwrap_or(n);
        tree.append_text(&markup[i..next_lt]);
        i = next_lt;
    }

    tree.finish()
}

fn attributes(tag: &str) -> Vec<Attribute> {
    scan::scan_attributes(tag.as_bytes())
        .into_iter()
        .map(|raw| Attribute {
            name: tag[raw.name.0..raw.name.1].to_owned(),
            value: raw.value.map(|(s, e)| tag[s..e].to_owned()),
        })
        .collect()
}

/// Stack of open elements; finished nodes are attached to the innermost open element
/// or to the fragment root.
#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Node>,
    open: Vec<(Element, usize)>,
}

impl TreeBuilder {
    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some((el, _)) => &mut el.children,
            None => &mut self.roots,
        }
    }

    fn append(&mut self, node: Node) {
        self.children_mut().push(node);
    }

    /// Adjacent text runs merge into one node.
    fn append_text(&mut self, text: &str) {
        let children = self.children_mut();
        if let Some(Node::Text(prev)) = children.last_mut() {
            prev.push_str(text);
        } else {
            children.push(Node::text(text));
        }
    }

    fn open(&mut self, element: Element, offset: usize) -> Result<(), ParseError> {
        if self.open.len() >= MAX_DEPTH {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep { limit: MAX_DEPTH },
                offset,
            ));
        }
        self.open.push((element, offset));
        Ok(())
    }

    fn close(&mut self, name: &str, offset: usize) -> Result<(), ParseError> {
        let Some((top, _)) = self.open.last() else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedEndTag { name: name.to_owned() },
                offset,
            ));
        };
        if !top.name.eq_ignore_ascii_case(name) {
            return Err(ParseError::new(
                ParseErrorKind::MismatchedEndTag {
                    expected: top.name.clone(),
                    found: name.to_owned(),
                },
                offset,
            ));
        }
        if let Some((element, _)) = self.open.pop() {
            self.append(Node::Element(element));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Node>, ParseError> {
        if let Some((element, offset)) = self.open.pop() {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedElement { name: element.name },
                offset,
            ));
        }
        Ok(self.roots)
    }
}
