// File: crates/insight-markdown/src/fence.rs
// Summary: Fenced code block pass; runs on already-escaped text.

use crate::escape::escape_html;
use crate::protect::Protected;

const FENCE: &str = "```";

/// Replace each complete ```` ```lang body``` ```` block with a placeholder for
/// `<pre><code>body</code></pre>`. The language tag and the whitespace after it
/// are dropped. The body is escaped again, so on escaped input `<` ends up as
/// `&amp;lt;`. An opening fence with no closing fence ends the pass and the
/// remainder stays plain text.
pub fn extract_code_blocks(text: &str, store: &mut Protected) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(FENCE) {
        let after = &rest[open + FENCE.len()..];
        let lang_len = after.bytes().take_while(|b| b.is_ascii_alphanumeric() || *b == b'_').count();
        let after_lang = &after[lang_len..];
        let body = after_lang.trim_start();
        let Some(close) = body.find(FENCE) else { break };

        out.push_str(&rest[..open]);
        let html = format!("<pre><code>{}</code></pre>", escape_html(&body[..close]));
        out.push_str(&store.push(html));
        rest = &body[close + FENCE.len()..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> String {
        let mut store = Protected::default();
        let replaced = extract_code_blocks(text, &mut store);
        store.restore(&replaced)
    }

    #[test]
    fn language_tag_is_dropped_and_body_escaped() {
        assert_eq!(run("```rust\nlet a = 1 < 2;\n```"), "<pre><code>let a = 1 &lt; 2;\n</code></pre>");
    }

    #[test]
    fn multiple_blocks_and_surrounding_text() {
        assert_eq!(run("a ``` x``` b ```\ny``` c"), "a <pre><code>x</code></pre> b <pre><code>y</code></pre> c");
    }

    #[test]
    fn word_right_after_fence_is_the_language() {
        assert_eq!(run("```x```"), "<pre><code></code></pre>");
    }

    #[test]
    fn escaped_input_is_escaped_again() {
        assert_eq!(run("```\na &lt; b\n```"), "<pre><code>a &amp;lt; b\n</code></pre>");
    }

    #[test]
    fn empty_block() {
        assert_eq!(run("``````"), "<pre><code></code></pre>");
    }

    #[test]
    fn unterminated_fence_is_text() {
        assert_eq!(run("before ```js\nopen"), "before ```js\nopen");
        assert_eq!(run("``` a``` then ```b"), "<pre><code>a</code></pre> then ```b");
    }
}
