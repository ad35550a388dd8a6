// src/core/html.rs
// Low-level HTML string scanning, tailored to the swimdata.info and
// section3swim.com page structure: Lotus-era markup with flat tables,
// unquoted attributes and inconsistent tag case. Everything here is
// case-insensitive on ASCII tag/attribute names. Same-name elements are
// assumed not to nest on these pages.

use super::sanitize::{normalize_entities, to_lowercase_fast};

/// Find the next complete element block `<tag ...> ... </tag>` from `from`
/// onwards. The opener must be the tag name followed by '>', '/' or
/// whitespace, so scanning for `b` will not stop at `<br>`.
/// Returns (start, end) byte offsets of the whole block.
pub fn next_tag_block_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lowercase_fast(s);
    let open_lc = format!("<{}", to_lowercase_fast(tag));
    let close_lc = format!("</{}>", to_lowercase_fast(tag));

    let mut search = from;
    let start = loop {
        let cand = lc.get(search..)?.find(&open_lc)? + search;
        if opener_boundary(&lc, cand + open_lc.len()) {
            break cand;
        }
        search = cand + open_lc.len();
    };

    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&close_lc)?;
    Some((start, open_end + end_rel + close_lc.len()))
}

/// All non-overlapping blocks of one element, in document order.
pub fn tag_blocks_ci(s: &str, tag: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = next_tag_block_ci(s, tag, pos) {
        out.push((b_s, b_e));
        pos = b_e;
    }
    out
}

/// Byte ranges of each `<tag ...>` opener (through its '>'). For elements
/// the site never closes, like the teams dropdown's `<option>`s.
pub fn tag_openers_ci(s: &str, tag: &str) -> Vec<(usize, usize)> {
    let lc = to_lowercase_fast(s);
    let open_lc = format!("<{}", to_lowercase_fast(tag));

    let mut out = Vec::new();
    let mut search = 0usize;
    while let Some(rel) = lc.get(search..).and_then(|rest| rest.find(&open_lc)) {
        let cand = search + rel;
        if !opener_boundary(&lc, cand + open_lc.len()) {
            search = cand + open_lc.len();
            continue;
        }
        match s[cand..].find('>') {
            Some(g) => {
                out.push((cand, cand + g + 1));
                search = cand + g + 1;
            }
            None => break,
        }
    }
    out
}

fn opener_boundary(lc: &str, at: usize) -> bool {
    matches!(
        lc.as_bytes().get(at),
        Some(b'>') | Some(b'/') | Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n')
    )
}

/// The opening tag of a block, up to but not including '>'.
pub fn opener_of(block: &str) -> &str {
    &block[..block.find('>').unwrap_or(block.len())]
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return the INNER text without the wrapping tags (may contain nested tags).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(open_end) = block.find('>') {
        if let Some(close_start) = block.rfind('<') {
            if close_start > open_end {
                return block[open_end + 1..close_start].to_string();
            }
        }
    }
    String::new()
}

/// Remove all `<...>` tags, keeping the text between them byte-for-byte.
/// No whitespace collapsing: callers that slice by character position
/// (the swimmer history rows) depend on raw offsets.
pub fn strip_tags_raw(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Flattened text of a block: tags stripped, entities decoded, whitespace
/// left alone.
pub fn text_of(block: &str) -> String {
    strip_tags_raw(&normalize_entities(&inner_after_open_tag(block)))
}

/// Text from the start of `s` up to the next tag, entities decoded.
pub fn text_until_tag(s: &str) -> String {
    let end = s.find('<').unwrap_or(s.len());
    normalize_entities(&s[..end])
}

/// Value of a named attribute inside an opening tag. Tolerates double
/// quotes, single quotes and bare values (terminated by whitespace or '>').
pub fn attr_value(opener: &str, name: &str) -> Option<String> {
    let lc = to_lowercase_fast(opener);
    let needle = format!("{}=", to_lowercase_fast(name));

    let mut from = 0usize;
    let pos = loop {
        let p = lc.get(from..)?.find(&needle)? + from;
        // Attribute name must not be the tail of a longer name.
        if p == 0 || !lc.as_bytes()[p - 1].is_ascii_alphanumeric() {
            break p;
        }
        from = p + needle.len();
    };

    let val = &opener[pos + needle.len()..];
    let (quote, start_off) = match val.as_bytes().first() {
        Some(b'"') => ('"', 1),
        Some(b'\'') => ('\'', 1),
        _ => ('\0', 0),
    };
    let end = if quote != '\0' {
        val[start_off..].find(quote).map(|e| start_off + e).unwrap_or(val.len())
    } else {
        val[start_off..]
            .find(|c: char| c.is_ascii_whitespace() || c == '>')
            .map(|e| start_off + e)
            .unwrap_or(val.len())
    };
    Some(val[start_off..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_scan_is_case_insensitive() {
        let doc = "x<TABLE border=1><TR><TD>a</TD></TR></TABLE>y";
        let (s, e) = next_tag_block_ci(doc, "table", 0).unwrap();
        assert_eq!(&doc[s..e], "<TABLE border=1><TR><TD>a</TD></TR></TABLE>");
    }

    #[test]
    fn opener_boundary_skips_longer_tags() {
        // Scanning for b must not stop at <br>.
        let doc = "<br><b>bold</b>";
        let (s, e) = next_tag_block_ci(doc, "b", 0).unwrap();
        assert_eq!(&doc[s..e], "<b>bold</b>");
    }

    #[test]
    fn blocks_enumerate_in_document_order() {
        let doc = "<table>1</table> <table>2</table> <table>3</table>";
        let tables = tag_blocks_ci(doc, "table");
        assert_eq!(tables.len(), 3);
        assert_eq!(&doc[tables[1].0..tables[1].1], "<table>2</table>");
    }

    #[test]
    fn openers_found_even_without_closing_tag() {
        let doc = "<select><option value=a>A<option value=b>B</select>";
        let opts = tag_openers_ci(doc, "option");
        assert_eq!(opts.len(), 2);
        assert_eq!(&doc[opts[0].0..opts[0].1], "<option value=a>");
    }

    #[test]
    fn text_of_keeps_whitespace() {
        let block = "<tr><td>a</td> <td>b </td></tr>";
        assert_eq!(text_of(block), "a b ");
    }

    #[test]
    fn text_of_decodes_entities() {
        let block = "<td>A&nbsp;&amp;&nbsp;B</td>";
        assert_eq!(text_of(block), "A & B");
    }

    #[test]
    fn attr_values_quoted_and_bare() {
        assert_eq!(
            attr_value(r#"<a href="x.php?i=1" class=z"#, "href").as_deref(),
            Some("x.php?i=1")
        );
        assert_eq!(
            attr_value("<a href='y.php'", "href").as_deref(),
            Some("y.php")
        );
        assert_eq!(
            attr_value("<a href=z.php?d=2>", "href").as_deref(),
            Some("z.php?d=2")
        );
        assert_eq!(attr_value("<a name=q>", "href"), None);
    }

    #[test]
    fn attr_name_must_be_whole() {
        // xhref= must not satisfy a lookup for href=.
        assert_eq!(attr_value("<a xhref=bad>", "href"), None);
    }

    #[test]
    fn text_until_tag_stops_at_markup() {
        assert_eq!(text_until_tag("Team A</option><option>"), "Team A");
        assert_eq!(text_until_tag("No tags at all"), "No tags at all");
    }
}
