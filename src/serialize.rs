//! Fragment tree back to markup.
//!
//! Text, comments and attribute values are written verbatim. Attribute values are
//! double-quoted unless they contain `"`, in which case single quotes are used.
//! Void and self-closing elements get no end tag.

use crate::dom::{Element, Node};

pub fn serialize_fragment(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

pub fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(t),
        Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        Node::Element(el) => write_element(el, out),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for attr in &el.attrs {
        out.push(' ');
        out.push_str(&attr.name);
        if let Some(value) = &attr.value {
            let q = if value.contains('"') { '\'' } else { '"' };
            out.push('=');
            out.push(q);
            out.push_str(value);
            out.push(q);
        }
    }
    if el.self_closing {
        out.push_str("/>");
        return;
    }
    out.push('>');
    if el.is_void() {
        return;
    }
    for child in &el.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_fragment;

    fn reserialize(markup: &str) -> String {
        serialize_fragment(&parse_fragment(markup).unwrap())
    }

    #[test]
    fn canonical_markup_is_reproduced() {
        for m in [
            "<p>one <b>two</b> three</p>",
            r#"<a href="/x" hidden>t</a>"#,
            "a<br>b<img src=\"x.png\"/>",
            "<!-- c --><p>x</p>",
            "<script>if (a<b) {}</script>",
            "1 &lt; 2 &amp;&amp; naïve",
        ] {
            assert_eq!(reserialize(m), m);
        }
    }

    #[test]
    fn attribute_quotes_are_normalized() {
        assert_eq!(
            reserialize(r#"<p class=lead title='say "hi"' data-x='y'>z</p>"#),
            r#"<p class="lead" title='say "hi"' data-x="y">z</p>"#
        );
    }

    #[test]
    fn end_tags_use_the_start_tag_spelling() {
        assert_eq!(reserialize("<DIV>x</div>"), "<DIV>x</DIV>");
    }

    #[test]
    fn built_tree() {
        let tree = vec![Element::new("em")
            .with_attr("class", Some("k"))
            .with_child(Node::text("hi"))
            .into()];
        assert_eq!(serialize_fragment(&tree), r#"<em class="k">hi</em>"#);
    }
}
