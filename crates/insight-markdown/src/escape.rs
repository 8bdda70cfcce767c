// File: crates/insight-markdown/src/escape.rs
// Summary: HTML escaping for text content and attribute values.

/// Escape `&`, `<` and `>`. Quotes are left alone; text content never needs them.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Make already-escaped text safe inside a double-quoted attribute.
pub fn escape_attr_quotes(s: &str) -> String {
    s.replace('"', "&quot;")
}
