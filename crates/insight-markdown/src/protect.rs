// File: crates/insight-markdown/src/protect.rs
// Summary: Placeholder store that shields rendered code from later passes.

/// Opens a placeholder. Private-use, so it never collides with markup.
pub const OPEN: char = '\u{E000}';
/// Closes a placeholder.
pub const CLOSE: char = '\u{E001}';

/// Finished HTML fragments, referenced from the text stream as `OPEN index CLOSE`.
#[derive(Debug, Default)]
pub struct Protected {
    fragments: Vec<String>,
}

impl Protected {
    /// Store `html` and return the placeholder to splice into the text.
    pub fn push(&mut self, html: String) -> String {
        let idx = self.fragments.len();
        self.fragments.push(html);
        format!("{OPEN}{idx}{CLOSE}")
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Replace every placeholder with its fragment. Placeholders may appear in
    /// any order, or not at all if a table dropped the cell holding them.
    pub fn restore(&self, text: &str) -> String {
        if self.fragments.is_empty() {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len() + self.fragments.iter().map(String::len).sum::<usize>());
        let mut rest = text;
        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let body = &rest[start + OPEN.len_utf8()..];
            let fragment = body
                .find(CLOSE)
                .and_then(|end| body[..end].parse::<usize>().ok().map(|i| (i, end)))
                .and_then(|(i, end)| self.fragments.get(i).map(|f| (f, end)));
            match fragment {
                Some((html, end)) => {
                    out.push_str(html);
                    rest = &body[end + CLOSE.len_utf8()..];
                }
                None => {
                    out.push(OPEN);
                    rest = body;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Input may not carry the placeholder delimiters itself; they become U+FFFD.
pub fn reserve_delimiters(input: &str) -> std::borrow::Cow<'_, str> {
    let reserved = |c: char| c == OPEN || c == CLOSE;
    if input.contains(reserved) {
        std::borrow::Cow::Owned(input.replace(reserved, "\u{FFFD}"))
    } else {
        std::borrow::Cow::Borrowed(input)
    }
}
