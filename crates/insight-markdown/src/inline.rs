// File: crates/insight-markdown/src/inline.rs
// Summary: Inline scanners over escaped text: code spans, bold, italics, links.

use crate::escape::escape_attr_quotes;
use crate::protect::Protected;

/// Run every inline pass in order. `text` must already be HTML-escaped.
pub fn render_inline(text: &str, store: &mut Protected) -> String {
    let text = code_spans(text, store);
    let text = bold(&text);
    let text = italics(&text, '*');
    let text = italics(&text, '_');
    links(&text)
}

/// Characters `.` does not match in a JS-style pattern; emphasis never crosses them.
fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn opens_emphasis(c: char) -> bool {
    c.is_whitespace() || c == '('
}

fn closes_emphasis(next: Option<&char>) -> bool {
    match next {
        None => true,
        Some(&c) => c.is_whitespace() || matches!(c, ')' | '.' | ',' | ';' | ':' | '!' | '?'),
    }
}

/// `` `code` `` becomes a protected `<code>` fragment. An empty pair of
/// backticks is left as text.
pub fn code_spans(text: &str, store: &mut Protected) -> String {
    if !text.contains('`') {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '`' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        match chars[i + 1..].iter().position(|&c| c == '`') {
            Some(0) => {
                out.push('`');
                i += 1;
            }
            Some(k) => {
                let end = i + 1 + k;
                let body: String = chars[i + 1..end].iter().collect();
                out.push_str(&store.push(format!("<code>{body}</code>")));
                i = end + 1;
            }
            None => {
                out.extend(&chars[i..]);
                break;
            }
        }
    }
    out
}

/// `**x**` on a single line becomes `<strong>x</strong>`; the shortest match wins.
pub fn bold(text: &str) -> String {
    if !text.contains("**") {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if let Some(close) = bold_at(&chars, i) {
            out.push_str("<strong>");
            out.extend(&chars[i + 2..close]);
            out.push_str("</strong>");
            i = close + 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

fn bold_at(chars: &[char], i: usize) -> Option<usize> {
    if chars.get(i) != Some(&'*') || chars.get(i + 1) != Some(&'*') {
        return None;
    }
    for j in i + 2..chars.len() {
        if j >= i + 3 && chars[j] == '*' && chars.get(j + 1) == Some(&'*') {
            return Some(j);
        }
        if is_line_break(chars[j]) {
            return None;
        }
    }
    None
}

/// Single-marker emphasis. The opening marker sits at the start of the text or
/// after whitespace or `(`; the closing marker is followed by whitespace,
/// closing punctuation, or the end of the text.
pub fn italics(text: &str, marker: char) -> String {
    if !text.contains(marker) {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if let Some((open, close)) = italic_at(&chars, i, marker) {
            if open > i {
                out.push(chars[i]);
            }
            out.push_str("<em>");
            out.extend(&chars[open + 1..close]);
            out.push_str("</em>");
            i = close + 1;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

fn italic_at(chars: &[char], i: usize, marker: char) -> Option<(usize, usize)> {
    if i == 0 && chars[0] == marker {
        if let Some(close) = italic_close(chars, 0, marker) {
            return Some((0, close));
        }
    }
    if opens_emphasis(chars[i]) && chars.get(i + 1) == Some(&marker) {
        return italic_close(chars, i + 1, marker).map(|close| (i + 1, close));
    }
    None
}

fn italic_close(chars: &[char], open: usize, marker: char) -> Option<usize> {
    let first = *chars.get(open + 1)?;
    if is_line_break(first) {
        return None;
    }
    if marker == '*' {
        // `* item` is a list marker, and `**` belongs to bold.
        if first == '*' || first.is_whitespace() {
            return None;
        }
        let k = chars[open + 1..].iter().position(|&c| c == '*' || is_line_break(c))?;
        let close = open + 1 + k;
        return (chars[close] == '*' && closes_emphasis(chars.get(close + 1))).then_some(close);
    }
    for j in open + 2..chars.len() {
        if chars[j] == marker && closes_emphasis(chars.get(j + 1)) {
            return Some(j);
        }
        if is_line_break(chars[j]) {
            return None;
        }
    }
    None
}

/// `[text](http(s)://url)` becomes an anchor opening in a new tab.
pub fn links(text: &str) -> String {
    if !text.contains("](http") {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 64);
    let mut i = 0;
    while i < chars.len() {
        if let Some(link) = link_at(&chars, i) {
            let label: String = chars[i + 1..link.label_end].iter().collect();
            let url: String = chars[link.url_start..link.end].iter().collect();
            out.push_str(&format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                escape_attr_quotes(&url),
                label
            ));
            i = link.end + 1;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

struct LinkMatch {
    label_end: usize,
    url_start: usize,
    /// Index of the closing `)`.
    end: usize,
}

fn link_at(chars: &[char], i: usize) -> Option<LinkMatch> {
    if chars.get(i) != Some(&'[') {
        return None;
    }
    let label_end = i + 1 + chars[i + 1..].iter().position(|&c| c == ']')?;
    if label_end == i + 1 || chars.get(label_end + 1) != Some(&'(') {
        return None;
    }
    let url_start = label_end + 2;
    let scheme_len = ["https://", "http://"]
        .iter()
        .find(|scheme| starts_with(&chars[url_start.min(chars.len())..], scheme))
        .map(|scheme| scheme.len())?;
    let mut end = url_start + scheme_len;
    while end < chars.len() && chars[end] != ')' && !chars[end].is_whitespace() {
        end += 1;
    }
    if end == url_start + scheme_len || chars.get(end) != Some(&')') {
        return None;
    }
    Some(LinkMatch { label_end, url_start, end })
}

fn starts_with(chars: &[char], prefix: &str) -> bool {
    let mut it = chars.iter();
    prefix.chars().all(|p| it.next() == Some(&p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(text: &str) -> String {
        let mut store = Protected::default();
        let html = render_inline(text, &mut store);
        store.restore(&html)
    }

    #[test]
    fn code_span_contents_are_not_formatted() {
        assert_eq!(inline("run `a **b**` now"), "run <code>a **b**</code> now");
        assert_eq!(inline("empty `` pair"), "empty `` pair");
        assert_eq!(inline("dangling `tick"), "dangling `tick");
    }

    #[test]
    fn bold_is_lazy_and_single_line() {
        assert_eq!(inline("**a** and **b**"), "<strong>a</strong> and <strong>b</strong>");
        assert_eq!(bold("**a\nb**"), "**a\nb**");
        assert_eq!(bold("****"), "****");
    }

    #[test]
    fn star_italics_need_boundaries() {
        assert_eq!(inline("*hi*"), "<em>hi</em>");
        assert_eq!(inline("say *hi*, then"), "say <em>hi</em>, then");
        assert_eq!(inline("(*aside*)"), "(<em>aside</em>)");
        assert_eq!(inline("a*b*c"), "a*b*c");
        assert_eq!(inline("2 * 3 * 4"), "2 * 3 * 4");
    }

    #[test]
    fn underscore_italics_keep_inner_underscores() {
        assert_eq!(inline("_note_"), "<em>note</em>");
        assert_eq!(inline("call __init__ now"), "call <em>_init_</em> now");
        assert_eq!(inline("snake_case_name"), "snake_case_name");
    }

    #[test]
    fn links_open_in_new_tab() {
        assert_eq!(
            inline("see [docs](https://example.com/a?b=1)."),
            r#"see <a href="https://example.com/a?b=1" target="_blank" rel="noopener noreferrer">docs</a>."#
        );
        assert_eq!(inline("[x](ftp://host)"), "[x](ftp://host)");
        assert_eq!(inline("[x](https://)"), "[x](https://)");
        assert_eq!(inline("[](https://a)"), "[](https://a)");
    }

    #[test]
    fn link_href_quotes_are_escaped() {
        let html = inline(r#"[x](https://a.test/"onmouseover=")"#);
        assert!(html.contains(r#"href="https://a.test/&quot;onmouseover=&quot;""#), "{html}");
    }

    #[test]
    fn emphasis_inside_link_text() {
        assert_eq!(
            inline("[**bold**](http://a.b)"),
            r#"<a href="http://a.b" target="_blank" rel="noopener noreferrer"><strong>bold</strong></a>"#
        );
    }
}
