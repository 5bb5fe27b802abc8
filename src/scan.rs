// src/scan.rs
//
// Byte-level lexing helpers shared by the fragment parser.
//
// - All positions are byte offsets into the source. Every boundary these helpers
//   return sits on an ASCII byte ('<', '>', quotes, whitespace), so slicing the
//   original &str at them is always UTF-8 safe.
// - Tag scanning is quote-aware: a '>' inside a quoted attribute value does not end
//   the tag.
// - Element names are compared ASCII case-insensitively.

use memchr::memchr;

/* =============================== Core sets =============================== */

pub fn is_void(name: &[u8]) -> bool {
    matches_ignore_ascii_case(
        name,
        &[
            b"area", b"base", b"br", b"col", b"embed", b"hr", b"img", b"input", b"link", b"meta",
            b"param", b"source", b"track", b"wbr",
        ],
    )
}

/// Elements whose content is copied verbatim up to the matching end tag.
pub fn is_raw_text(name: &[u8]) -> bool {
    matches_ignore_ascii_case(name, &[b"script", b"style", b"textarea", b"title", b"xmp"])
}

/* ============================ Utility predicates ========================= */

#[inline]
pub fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

#[inline]
pub fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' || b == 0x0c
}

fn matches_ignore_ascii_case(name: &[u8], set: &[&[u8]]) -> bool {
    set.iter().any(|&s| name.eq_ignore_ascii_case(s))
}

/* =============================== Tag parsing ============================= */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagInfo<'a> {
    pub name: &'a [u8],
    pub is_end: bool,
    pub self_closing: bool,
}

/// Find the '>' for a tag starting at `i` (s[i] == '<'), being quote-aware.
pub fn find_tag_end(s: &[u8], mut i: usize) -> Option<usize> {
    let n = s.len();
    i += 1;
    let mut quote: u8 = 0;
    while i < n {
        let b = s[i];
        if quote != 0 {
            if b == quote {
                quote = 0;
            }
        } else if b == b'"' || b == b'\'' {
            quote = b;
        } else if b == b'>' {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Extract tag name, end/self-closing flags from raw `<...>` bytes.
pub fn parse_tag_info(tag: &[u8]) -> TagInfo<'_> {
    let n = tag.len();
    let mut i = 1;

    let mut is_end = false;
    if i < n && tag[i] == b'/' {
        is_end = true;
        i += 1;
    }
    let start = i;
    while i < n && is_name_char(tag[i]) {
        i += 1;
    }
    let name = &tag[start..i];

    // self-closing? check before '>'
    let mut j = n - 1;
    while j > 0 && is_ws(tag[j - 1]) {
        j -= 1;
    }
    let self_closing = !is_end && j >= 2 && tag[j - 1] == b'/';

    TagInfo {
        name,
        is_end,
        self_closing,
    }
}

/// Byte offset just past the tag name of a start or end tag.
fn name_end(tag: &[u8]) -> usize {
    let mut i = 1;
    if i < tag.len() && tag[i] == b'/' {
        i += 1;
    }
    while i < tag.len() && is_name_char(tag[i]) {
        i += 1;
    }
    i
}

/* =========================== Attribute scanning ========================== */

/// A raw attribute as spelled in the tag. `value` excludes the surrounding quotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawAttr {
    pub name: (usize, usize),
    pub value: Option<(usize, usize)>,
}

/// Scan the attributes of a start tag `<name ...>`: [name] ( '=' [value] )?
///
/// Returned ranges are relative to `tag`. Values may be quoted or unquoted; a bare
/// name has no value.
pub fn scan_attributes(tag: &[u8]) -> Vec<RawAttr> {
    let len = tag.len().saturating_sub(1); // stop before the closing '>'
    let mut attrs = Vec::new();
    let mut i = name_end(tag);

    while i < len {
        // skip whitespace and slashes
        while i < len && (is_ws(tag[i]) || tag[i] == b'/') {
            i += 1;
        }
        if i >= len {
            break;
        }

        // attribute name: anything up to whitespace, '=', '/' or the end
        let name_start = i;
        while i < len && !is_ws(tag[i]) && tag[i] != b'=' && tag[i] != b'/' {
            i += 1;
        }
        if i == name_start {
            // stray '=' with no name; skip it
            i += 1;
            continue;
        }
        let name = (name_start, i);

        // skip whitespace
        let mut k = i;
        while k < len && is_ws(tag[k]) {
            k += 1;
        }

        // optional "= value"
        let mut value = None;
        if k < len && tag[k] == b'=' {
            i = k + 1;
            while i < len && is_ws(tag[i]) {
                i += 1;
            }
            if i < len && (tag[i] == b'"' || tag[i] == b'\'') {
                let q = tag[i];
                i += 1;
                let v_start = i;
                while i < len && tag[i] != q {
                    i += 1;
                }
                value = Some((v_start, i));
                if i < len {
                    i += 1;
                }
            } else {
                let v_start = i;
                while i < len && !is_ws(tag[i]) {
                    i += 1;
                }
                // `<a href=x/>`: the trailing slash belongs to the tag
                let mut v_end = i;
                if i == len && v_end > v_start && tag[v_end - 1] == b'/' {
                    v_end -= 1;
                }
                value = Some((v_start, v_end));
            }
        }
        attrs.push(RawAttr { name, value });
    }
    attrs
}

/* ============================== Comments ================================ */

/// Return the index of the first '-' of the terminating "-->" for a comment
/// starting at `i` (s[i..] starts with "<!--"), or None if it is unterminated.
pub fn find_comment_end(s: &[u8], i: usize) -> Option<usize> {
    let mut k = i + 4;
    while k < s.len() {
        let j = k + memchr(b'-', &s[k..])?;
        if j + 2 < s.len() && s[j + 1] == b'-' && s[j + 2] == b'>' {
            return Some(j);
        }
        k = j + 1;
    }
    None
}

/* ============================ Raw-text content ========================== */

/// Find the matching end tag `</name>` for raw-text content starting at `i`.
/// Returns (start_of_end_tag, index_of_its_closing_gt).
pub fn find_raw_text_end(src: &[u8], i: usize, name: &[u8]) -> Option<(usize, usize)> {
    let n = src.len();
    let mut j = i;
    while j < n {
        let pos = j + memchr(b'<', &src[j..])?;
        if pos + 1 < n && src[pos + 1] == b'/' {
            let name_start = pos + 2;
            let name_stop = name_start + name.len();
            if name_stop <= n
                && src[name_start..name_stop].eq_ignore_ascii_case(name)
                && (name_stop == n || !is_name_char(src[name_stop]))
            {
                let end = find_tag_end(src, pos)?;
                return Some((pos, end));
            }
        }
        j = pos + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_end_skips_quoted_gt() {
        let s = br#"<a title="x > y">z"#;
        assert_eq!(find_tag_end(s, 0), Some(16));
    }

    #[test]
    fn tag_end_missing() {
        assert_eq!(find_tag_end(b"<p class='a", 0), None);
    }

    #[test]
    fn tag_info_flags() {
        let ti = parse_tag_info(b"<br/>");
        assert_eq!(ti.name, b"br");
        assert!(ti.self_closing);
        assert!(!ti.is_end);

        let ti = parse_tag_info(b"</DIV >");
        assert_eq!(ti.name, b"DIV");
        assert!(ti.is_end);
        assert!(!ti.self_closing);
    }

    #[test]
    fn attributes_quoted_unquoted_bare() {
        let tag = br#"<input type=checkbox checked data-x='1 2' title="a>b">"#;
        let attrs = scan_attributes(tag);
        let spelled: Vec<(&[u8], Option<&[u8]>)> = attrs
            .iter()
            .map(|a| (&tag[a.name.0..a.name.1], a.value.map(|(s, e)| &tag[s..e])))
            .collect();
        assert_eq!(
            spelled,
            vec![
                (&b"type"[..], Some(&b"checkbox"[..])),
                (&b"checked"[..], None),
                (&b"data-x"[..], Some(&b"1 2"[..])),
                (&b"title"[..], Some(&b"a>b"[..])),
            ]
        );
    }

    #[test]
    fn unquoted_value_before_self_close() {
        let tag = b"<a href=x/>";
        let attrs = scan_attributes(tag);
        assert_eq!(attrs.len(), 1);
        let (s, e) = attrs[0].value.unwrap();
        assert_eq!(&tag[s..e], b"x");
    }

    #[test]
    fn comment_end_found_and_missing() {
        let s = b"<!-- a - b -- c -->tail";
        assert_eq!(find_comment_end(s, 0), Some(16));
        assert_eq!(find_comment_end(b"<!-- open", 0), None);
    }

    #[test]
    fn raw_text_end_ignores_other_end_tags() {
        let s = b"if (a </b) {}</SCRIPT>after";
        let (start, end) = find_raw_text_end(s, 0, b"script").unwrap();
        assert_eq!(&s[start..=end], b"</SCRIPT>");
        assert_eq!(find_raw_text_end(b"x </scripts>", 0, b"script"), None);
    }

    #[test]
    fn element_sets() {
        assert!(is_void(b"IMG"));
        assert!(!is_void(b"p"));
        assert!(is_raw_text(b"style"));
        assert!(!is_raw_text(b"pre"));
    }
}
