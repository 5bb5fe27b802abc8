// src/truncate.rs
//
// HTML-aware word truncation.
//
// - Words are counted over text nodes only, left to right, depth first. Element
//   boundaries cost nothing; raw-text content (script, style, ...) never counts.
// - If the whole fragment fits the budget the input string is returned untouched.
// - Otherwise the text node where the budget runs out (even if it runs out exactly at
//   its last word) keeps only its first `remaining` words joined by single spaces,
//   then the ellipsis. Every node after it in document order is
//   dropped, at every depth. Ancestors emptied by this are kept as they are.
// - The parsed tree is never mutated: a new pruned tree is built and serialized.

use crate::config::{checked_limit, Config, DEFAULT_ELLIPSIS};
use crate::dom::Node;
use crate::error::Result;
use crate::parser::parse_fragment;
use crate::serialize::serialize_fragment;
use crate::words::{count_tree_words, count_words, words};

/// Truncate `markup` to at most `word_limit` words, keeping its tag structure.
///
/// # Errors
///
/// [`Error::InvalidArgument`](crate::Error::InvalidArgument) for a negative limit,
/// [`Error::Parse`](crate::Error::Parse) if `markup` is not a well-formed fragment.
///
/// ```
/// let out = readmore::truncate("<p>one two <b>three four</b> five six seven</p>", 4).unwrap();
/// assert_eq!(out, "<p>one two <b>three four...</b></p>");
/// ```
pub fn truncate(markup: &str, word_limit: i64) -> Result<String> {
    let limit = checked_limit(word_limit)?;
    Ok(Truncator::new(limit).truncate(markup)?.html)
}

/// Word count of an HTML fragment, as the truncator sees it.
pub fn word_count(markup: &str) -> Result<usize> {
    Ok(count_tree_words(&parse_fragment(markup)?))
}

/// Outcome of one truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated {
    pub html: String,
    /// `false` when the input already fit and `html` is the input verbatim.
    pub truncated: bool,
    /// Words in the input.
    pub total_words: usize,
}

/// Reusable truncation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncator {
    limit: usize,
    ellipsis: String,
}

impl Truncator {
    pub fn new(limit: usize) -> Self {
        Truncator {
            limit,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Truncator {
            limit: config.word_limit,
            ellipsis: config.ellipsis.clone(),
        }
    }

    #[must_use]
    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn truncate(&self, markup: &str) -> Result<Truncated> {
        let nodes = parse_fragment(markup)?;
        let total_words = count_tree_words(&nodes);

        if total_words <= self.limit {
            tracing::debug!(total_words, limit = self.limit, "fragment fits word budget");
            return Ok(Truncated {
                html: markup.to_owned(),
                truncated: false,
                total_words,
            });
        }

        let mut cut = Cut {
            remaining: self.limit,
            ellipsis: &self.ellipsis,
            done: false,
        };
        let pruned = cut.prune(&nodes, false);
        let html = serialize_fragment(&pruned);
        tracing::debug!(
            total_words,
            limit = self.limit,
            bytes_in = markup.len(),
            bytes_out = html.len(),
            "fragment truncated"
        );

        Ok(Truncated {
            html,
            truncated: true,
            total_words,
        })
    }
}

/// Traversal state: words still allowed, and whether the truncation node was seen.
struct Cut<'a> {
    remaining: usize,
    ellipsis: &'a str,
    done: bool,
}

impl Cut<'_> {
    /// Copy `nodes` up to and including the truncation node.
    fn prune(&mut self, nodes: &[Node], raw: bool) -> Vec<Node> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            if self.done {
                break;
            }
            match node {
                Node::Text(text) if !raw => {
                    let count = count_words(text);
                    if count == 0 || count < self.remaining {
                        self.remaining -= count;
                        out.push(node.clone());
                    } else {
                        out.push(Node::Text(self.cut_text(text)));
                        self.done = true;
                    }
                }
                Node::Text(_) | Node::Comment(_) => out.push(node.clone()),
                Node::Element(el) => {
                    let children = self.prune(&el.children, raw || el.is_raw_text());
                    out.push(Node::Element(el.with_children(children)));
                }
            }
        }
        out
    }

    fn cut_text(&self, text: &str) -> String {
        let mut kept = String::new();
        for (i, word) in words(text).take(self.remaining).enumerate() {
            if i > 0 {
                kept.push(' ');
            }
            kept.push_str(word);
        }
        kept.push_str(self.ellipsis);
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ParseErrorKind};
    use crate::parser::{parse_fragment, MAX_DEPTH};
    use crate::words::tree_words;

    fn cut(markup: &str, limit: i64) -> String {
        truncate(markup, limit).unwrap()
    }

    #[test]
    fn cuts_across_tag_boundary() {
        assert_eq!(
            cut("<p>one two <b>three four</b> five six seven</p>", 4),
            "<p>one two <b>three four...</b></p>"
        );
    }

    #[test]
    fn cuts_inside_later_block() {
        assert_eq!(cut("<p>a</p><p>b c d e</p>", 2), "<p>a</p><p>b...</p>");
        assert_eq!(cut("<p>a</p><p>b c d e</p>", 3), "<p>a</p><p>b c...</p>");
    }

    #[test]
    fn fitting_input_is_returned_verbatim() {
        assert_eq!(cut("hello world", 5), "hello world");
        assert_eq!(cut("hello world", 2), "hello world");
        let odd = "<P CLASS=x>one   two</P>";
        assert_eq!(cut(odd, 2), odd);
    }

    #[test]
    fn zero_limit_keeps_only_ellipsis() {
        assert_eq!(cut("<p>alpha beta</p>", 0), "<p>...</p>");
        assert_eq!(
            cut("<div> <p>alpha beta</p><p>gamma</p></div>", 0),
            "<div> <p>...</p></div>"
        );
    }

    #[test]
    fn words_inside_one_text_node_are_rejoined() {
        assert_eq!(cut("<p>one\n  two\tthree four</p>", 3), "<p>one two three...</p>");
    }

    #[test]
    fn truncation_node_drops_its_leading_whitespace() {
        assert_eq!(cut("<p>  alpha beta</p>", 0), "<p>...</p>");
        assert_eq!(
            cut("<p><b>one</b> two three</p>", 2),
            "<p><b>one</b>two...</p>"
        );
        assert_eq!(
            cut("<p><b>one</b>\n   two three</p>", 2),
            "<p><b>one</b>two...</p>"
        );
    }

    #[test]
    fn later_siblings_are_dropped_at_every_depth() {
        let m = "<div><ul><li>a b</li><li>c</li></ul><p>d</p></div><footer>e</footer>";
        assert_eq!(cut(m, 1), "<div><ul><li>a...</li></ul></div>");
    }

    #[test]
    fn ancestors_of_the_cut_lose_later_children() {
        let m = "<div><p>one two</p><section><p>three</p></section></div>";
        assert_eq!(cut(m, 2), "<div><p>one two...</p></div>");
        let m = "<div><span>one</span><span></span> two three</div>";
        assert_eq!(cut(m, 1), "<div><span>one...</span></div>");
    }

    #[test]
    fn markup_before_the_cut_survives() {
        let m = r#"<p><!-- lead --><img src="a.png"> <a href="/x">one</a><br/>two three</p>"#;
        assert_eq!(
            cut(m, 2),
            r#"<p><!-- lead --><img src="a.png"> <a href="/x">one</a><br/>two...</p>"#
        );
    }

    #[test]
    fn scripts_do_not_consume_budget() {
        let m = "<p>one<script>var a = b c d;</script> two three</p>";
        assert_eq!(cut(m, 2), "<p>one<script>var a = b c d;</script>two...</p>");
    }

    #[test]
    fn custom_ellipsis() {
        let out = Truncator::new(1)
            .with_ellipsis(" [more]")
            .truncate("<p>one two</p>")
            .unwrap();
        assert_eq!(out.html, "<p>one [more]</p>");
        assert!(out.truncated);
        assert_eq!(out.total_words, 2);
    }

    #[test]
    fn from_config() {
        let config = Config::with_word_limit(1).unwrap().ellipsis("…");
        let truncator = Truncator::from_config(&config);
        assert_eq!(truncator.limit(), 1);
        assert_eq!(truncator.truncate("a b").unwrap().html, "a…");
    }

    #[test]
    fn reports_untruncated() {
        let out = Truncator::new(10).truncate("<p>a b c</p>").unwrap();
        assert!(!out.truncated);
        assert_eq!(out.total_words, 3);
        assert_eq!(out.html, "<p>a b c</p>");
    }

    #[test]
    fn negative_limit_is_invalid() {
        assert!(matches!(truncate("<p>x</p>", -3), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn malformed_markup_is_a_parse_error() {
        let err = truncate("<p>one two <b>three</p>", 1).unwrap_err();
        let Error::Parse(parse) = err else {
            panic!("expected parse error, got {err:?}");
        };
        assert_eq!(
            parse.kind,
            ParseErrorKind::MismatchedEndTag {
                expected: "b".into(),
                found: "p".into()
            }
        );
        // fitting but malformed input still fails
        assert!(truncate("<p>x", 100).is_err());
    }

    #[test]
    fn deep_nesting_is_cut_or_rejected() {
        let nested = |depth: usize| {
            format!("{}a b c{}", "<span>".repeat(depth), "</span>".repeat(depth))
        };

        let out = cut(&nested(MAX_DEPTH), 1);
        assert_eq!(out, nested(MAX_DEPTH).replace("a b c", "a..."));

        let err = truncate(&nested(100_000), 1).unwrap_err();
        let Error::Parse(parse) = err else {
            panic!("expected parse error, got {err:?}");
        };
        assert_eq!(parse.kind, ParseErrorKind::NestingTooDeep { limit: MAX_DEPTH });
    }

    #[test]
    fn word_count_of_markup() {
        assert_eq!(word_count("<p>a <i>b</i></p> c").unwrap(), 3);
        assert!(word_count("<p>").is_err());
    }

    const SAMPLES: &[&str] = &[
        "<p>one two <b>three four</b> five six seven</p>",
        "<p>a</p><p>b c d e</p>",
        "<div><h2>Release 1.4</h2><ul><li>Faster <em>sync</em> for large repos</li>\
         <li>New <a href=\"/docs\">docs</a> site</li></ul><p>Thanks to all contributors!</p></div>",
        "plain text with\nline breaks and   extra   spaces",
        "<p> <b> </b> lead <i>in</i> words <!-- c --> and more</p><p>tail</p>",
    ];

    #[test]
    fn truncating_twice_changes_nothing() {
        for m in SAMPLES {
            for n in 0..12 {
                let once = cut(m, n);
                assert_eq!(cut(&once, n), once, "markup {m:?} limit {n}");
            }
        }
    }

    #[test]
    fn output_has_exactly_limit_words_and_reparses() {
        for m in SAMPLES {
            let parsed = parse_fragment(m).unwrap();
            let original = tree_words(&parsed);
            let total = original.len();
            for n in 0..total {
                let out = cut(m, n as i64);
                let nodes = parse_fragment(&out).unwrap();
                let mut got = tree_words(&nodes);
                let last = got.pop().unwrap();
                let last = last.strip_suffix("...").unwrap();
                if !last.is_empty() {
                    got.push(last);
                }
                assert_eq!(got.len(), n, "markup {m:?} limit {n}");

                assert_eq!(got[..], original[..n], "prefix of {m:?} at {n}");
            }
        }
    }
}
